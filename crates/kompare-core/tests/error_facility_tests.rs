use kompare_core::errors::{ExError, ExErrorKind, KompareError};

#[test]
fn test_field_not_found_carries_criterion() {
    let err = KompareError::FieldNotFound {
        segment: "Template".to_string(),
        path: "Spec.Template.Spec".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::FieldNotFound);
    assert_eq!(ex_err.code(), "ERR_FIELD_NOT_FOUND");
    assert_eq!(ex_err.criterion(), Some("Spec.Template.Spec"));
    assert!(ex_err.message().contains("Template"));
}

#[test]
fn test_structural_distinct_from_single_unrecognized() {
    let both: ExError = KompareError::BothCollectionsUnrecognized.into();
    let one: ExError = KompareError::UnrecognizedCollectionShape {
        side: "source".to_string(),
    }
    .into();

    assert_eq!(both.kind(), ExErrorKind::Structural);
    assert_eq!(one.kind(), ExErrorKind::UnrecognizedCollection);
    assert_ne!(both.code(), one.code());
    assert_eq!(both.op(), Some("compare"));
}

#[test]
fn test_unknown_kind_is_invalid_input() {
    let ex_err: ExError = KompareError::UnknownResourceKind {
        alias: "widgets".to_string(),
    }
    .into();

    assert_eq!(ex_err.code(), "ERR_INVALID_INPUT");
    assert!(ex_err.message().contains("widgets"));
}

#[test]
fn test_builder_context_in_display() {
    let err = ExError::new(ExErrorKind::Io)
        .with_op("fetch")
        .with_record_name("web")
        .with_message("disk on fire");

    let text = err.to_string();
    assert!(text.starts_with("[ERR_IO] in operation 'fetch': disk on fire"));
    assert!(text.contains("(record: web)"));
}

#[test]
fn test_serde_errors_convert() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(
        KompareError::from(json_err),
        KompareError::Serialization { .. }
    ));

    let yaml_err = serde_yaml::from_str::<Vec<u8>>("a: [").unwrap_err();
    assert!(matches!(
        KompareError::from(yaml_err),
        KompareError::InvalidConfig { .. }
    ));
}
