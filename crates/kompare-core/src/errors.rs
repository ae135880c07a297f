use thiserror::Error;

/// Result type alias using KompareError
pub type Result<T> = std::result::Result<T, KompareError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on without
/// parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Resolution
    /// A criterion path does not resolve on a record (recovered per criterion)
    FieldNotFound,

    // Classification
    /// One collection matched no registered shape (recovered as empty)
    UnrecognizedCollection,
    /// Neither collection matched a registered shape (hard failure)
    Structural,

    // Rendering
    /// A diff side looked like JSON but failed to parse (recovered as raw text)
    JsonPrettify,

    // Input / configuration
    InvalidInput,
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::FieldNotFound => "ERR_FIELD_NOT_FOUND",
            ExErrorKind::UnrecognizedCollection => "ERR_UNRECOGNIZED_COLLECTION",
            ExErrorKind::Structural => "ERR_STRUCTURAL",
            ExErrorKind::JsonPrettify => "ERR_JSON_PRETTIFY",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling and the comparison
/// context (operation, record, criterion) that produced it.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    record_name: Option<String>,
    criterion: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            record_name: None,
            criterion: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the name of the record being compared
    pub fn with_record_name(mut self, name: impl Into<String>) -> Self {
        self.record_name = Some(name.into());
        self
    }

    /// Add the criterion (dotted path) being resolved
    pub fn with_criterion(mut self, criterion: impl Into<String>) -> Self {
        self.criterion = Some(criterion.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the record name context, if any
    pub fn record_name(&self) -> Option<&str> {
        self.record_name.as_deref()
    }

    /// Get the criterion context, if any
    pub fn criterion(&self) -> Option<&str> {
        self.criterion.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(name) = &self.record_name {
            write!(f, " (record: {})", name)?;
        }
        if let Some(criterion) = &self.criterion {
            write!(f, " (criterion: {})", criterion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for comparison operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KompareError {
    /// A path segment does not exist on the structure reached so far
    #[error("Field {segment} not found (path: {path})")]
    FieldNotFound { segment: String, path: String },

    /// A collection matched none of the registered shapes
    #[error("Unrecognized collection shape on {side} side")]
    UnrecognizedCollectionShape { side: String },

    /// Neither input could be classified as a collection
    #[error("Neither the source nor the target collection has a recognized shape")]
    BothCollectionsUnrecognized,

    /// A diff side resembled JSON but did not parse
    #[error("Could not pretty-print {side} side as JSON: {message}")]
    JsonPrettify { side: String, message: String },

    /// A resource kind alias is not in the catalog
    #[error("Unknown resource kind: {alias}")]
    UnknownResourceKind { alias: String },

    /// Configuration failed validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Filesystem failure while loading a collection or config
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// JSON/YAML (de)serialisation failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<KompareError> for ExError {
    fn from(err: KompareError) -> Self {
        let message = err.to_string();
        match err {
            KompareError::FieldNotFound { path, .. } => ExError::new(ExErrorKind::FieldNotFound)
                .with_op("resolve")
                .with_criterion(path)
                .with_message(message),

            KompareError::UnrecognizedCollectionShape { .. } => {
                ExError::new(ExErrorKind::UnrecognizedCollection)
                    .with_op("classify")
                    .with_message(message)
            }

            KompareError::BothCollectionsUnrecognized => ExError::new(ExErrorKind::Structural)
                .with_op("compare")
                .with_message(message),

            KompareError::JsonPrettify { .. } => ExError::new(ExErrorKind::JsonPrettify)
                .with_op("render")
                .with_message(message),

            KompareError::UnknownResourceKind { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            KompareError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }

            KompareError::Io { .. } => ExError::new(ExErrorKind::Io).with_message(message),

            KompareError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to KompareError
impl From<serde_json::Error> for KompareError {
    fn from(err: serde_json::Error) -> Self {
        KompareError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for KompareError {
    fn from(err: serde_yaml::Error) -> Self {
        KompareError::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
