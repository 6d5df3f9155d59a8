use thiserror::Error;

/// Failure while lowering a filter expression tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("unsupported operator `{operator}`")]
    UnsupportedOperator { operator: String },

    #[error("malformed operands for `{operator}`: {reason}")]
    MalformedOperand { operator: String, reason: String },

    #[error("filter expression exceeds the maximum depth of {limit}")]
    DepthLimitExceeded { limit: usize },
}

impl FilterError {
    pub(crate) fn malformed(operator: impl Into<String>, reason: impl Into<String>) -> Self {
        FilterError::MalformedOperand {
            operator: operator.into(),
            reason: reason.into(),
        }
    }

    /// Discriminant of this error
    pub fn kind(&self) -> DslErrorKind {
        match self {
            FilterError::UnsupportedOperator { .. } => DslErrorKind::UnsupportedOperator,
            FilterError::MalformedOperand { .. } => DslErrorKind::MalformedOperand,
            FilterError::DepthLimitExceeded { .. } => DslErrorKind::ResourceLimit,
        }
    }
}

/// Main error type for query translation
#[derive(Error, Debug)]
pub enum DslError {
    /// The filter tree could not be translated
    #[error("odata syntax error: {0}")]
    InvalidInput(#[from] FilterError),

    /// The parsed query itself has the wrong shape
    #[error("odata syntax error: {0}")]
    InvalidRequest(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error discriminant, for callers mapping errors onto responses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DslErrorKind {
    InputValidation,
    UnsupportedOperator,
    MalformedOperand,
    ResourceLimit,
    Serialization,
}

/// Result type alias for translation operations
pub type Result<T> = std::result::Result<T, DslError>;

impl DslError {
    /// Kind of the underlying failure
    ///
    /// Filter failures report the kind of the wrapped [`FilterError`], so a
    /// caller can tell an unknown operator apart from a malformed operand
    /// even after the assembler wrapped it.
    pub fn kind(&self) -> DslErrorKind {
        match self {
            DslError::InvalidInput(inner) => inner.kind(),
            DslError::InvalidRequest(_) => DslErrorKind::InputValidation,
            DslError::Serialization(_) => DslErrorKind::Serialization,
        }
    }

    /// Check if this error indicates a transient failure that could be retried
    ///
    /// Translation is deterministic, so the answer is always no.
    pub fn is_retriable(&self) -> bool {
        false
    }
}
