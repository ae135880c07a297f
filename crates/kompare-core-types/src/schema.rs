//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Comparison subjects
pub const FIELD_KIND: &str = "kind";
pub const FIELD_RECORD_NAME: &str = "record_name";
pub const FIELD_CRITERION: &str = "criterion";
pub const FIELD_SEGMENT: &str = "segment";
pub const FIELD_SIDE: &str = "side";

// Collection sizes
pub const FIELD_SOURCE_LEN: &str = "source_len";
pub const FIELD_TARGET_LEN: &str = "target_len";
pub const FIELD_RECORDS_LEN: &str = "records_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_CRITERION_SKIPPED: &str = "criterion_skipped";
pub const EVENT_COUNT_MISMATCH: &str = "count_mismatch";
pub const EVENT_SHAPE_UNRECOGNIZED: &str = "shape_unrecognized";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_CRITERION.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        let events = [
            EVENT_START,
            EVENT_END,
            EVENT_END_ERROR,
            EVENT_CRITERION_SKIPPED,
            EVENT_COUNT_MISMATCH,
            EVENT_SHAPE_UNRECOGNIZED,
        ];
        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
