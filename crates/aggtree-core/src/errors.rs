use thiserror::Error;

/// Result type alias using AggTreeError
pub type Result<T> = std::result::Result<T, AggTreeError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and test assertions. Structural kinds are never retriable:
/// they always describe a path the caller got wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural
    NoPath,
    PathNotSelectable,
    AggIsNotInjectable,

    // Rendering
    InvalidScript,
    MissingFilter,
    InvalidQuery,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NoPath => "ERR_NO_PATH",
            ExErrorKind::PathNotSelectable => "ERR_PATH_NOT_SELECTABLE",
            ExErrorKind::AggIsNotInjectable => "ERR_AGG_NOT_INJECTABLE",
            ExErrorKind::InvalidScript => "ERR_INVALID_SCRIPT",
            ExErrorKind::MissingFilter => "ERR_MISSING_FILTER",
            ExErrorKind::InvalidQuery => "ERR_INVALID_QUERY",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }

    /// Whether this kind comes from path navigation rather than rendering
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ExErrorKind::NoPath | ExErrorKind::PathNotSelectable | ExErrorKind::AggIsNotInjectable
        )
    }
}

/// Canonical structured error type
///
/// Carries the classification plus optional operation and path context
/// for logging and external reporting.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
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

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
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
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for aggregation tree operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggTreeError {
    // ===== Structural Errors =====
    /// An operation was given an empty path
    #[error("no path")]
    NoPath,

    /// An intermediate path segment does not resolve to a present node
    #[error("path is not selectable: {path}")]
    PathNotSelectable { path: String },

    /// The injection target cannot receive nodes at this path
    #[error("agg is not injectable: {path}")]
    AggIsNotInjectable { path: String },

    // ===== Rendering Errors =====
    /// A script could not be rendered
    #[error("Invalid script: {reason}")]
    InvalidScript { reason: String },

    /// A filter aggregation was rendered without a filter query
    #[error("{kind} aggregation requires a filter query")]
    MissingFilter { kind: String },

    /// A query could not be rendered
    #[error("Invalid query: {reason}")]
    InvalidQuery { reason: String },

    /// Serialization of a rendered document failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl AggTreeError {
    pub(crate) fn path_not_selectable(path: &[&str]) -> Self {
        AggTreeError::PathNotSelectable {
            path: join_path(path),
        }
    }

    pub(crate) fn not_injectable(path: &[&str]) -> Self {
        AggTreeError::AggIsNotInjectable {
            path: join_path(path),
        }
    }

    /// Get the canonical kind of this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            AggTreeError::NoPath => ExErrorKind::NoPath,
            AggTreeError::PathNotSelectable { .. } => ExErrorKind::PathNotSelectable,
            AggTreeError::AggIsNotInjectable { .. } => ExErrorKind::AggIsNotInjectable,
            AggTreeError::InvalidScript { .. } => ExErrorKind::InvalidScript,
            AggTreeError::MissingFilter { .. } => ExErrorKind::MissingFilter,
            AggTreeError::InvalidQuery { .. } => ExErrorKind::InvalidQuery,
            AggTreeError::Serialization { .. } => ExErrorKind::Serialization,
        }
    }
}

/// Render a path the way it is reported in errors and logs
pub fn join_path(path: &[&str]) -> String {
    path.join(".")
}

/// Conversion from AggTreeError to ExError
impl From<AggTreeError> for ExError {
    fn from(err: AggTreeError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        match err {
            AggTreeError::NoPath => ExError::new(kind).with_message(message),
            AggTreeError::PathNotSelectable { path } => ExError::new(kind)
                .with_op("inject")
                .with_path(path)
                .with_message(message),
            AggTreeError::AggIsNotInjectable { path } => ExError::new(kind)
                .with_op("inject")
                .with_path(path)
                .with_message(message),
            AggTreeError::InvalidScript { .. }
            | AggTreeError::MissingFilter { .. }
            | AggTreeError::InvalidQuery { .. }
            | AggTreeError::Serialization { .. } => {
                ExError::new(kind).with_op("source").with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to AggTreeError
impl From<serde_json::Error> for AggTreeError {
    fn from(err: serde_json::Error) -> Self {
        AggTreeError::Serialization {
            message: err.to_string(),
        }
    }
}
