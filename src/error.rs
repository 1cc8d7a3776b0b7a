//! Error types for the card codec

use thiserror::Error;

/// Result type for card operations
pub type Result<T> = std::result::Result<T, CardError>;

/// Card codec errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CardError {
    #[error("unknown type: {discriminant:?}")]
    UnknownType { discriminant: String },

    #[error("invalid type: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("invalid {shape}: {reason}")]
    InvalidShape { shape: &'static str, reason: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("invalid version format: {0:?}")]
    VersionParse(String),

    #[error("variant {0} is not registered")]
    UnregisteredVariant(String),

    #[error("{source} (at {path})")]
    At {
        path: String,
        #[source]
        source: Box<CardError>,
    },
}

impl CardError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CardError::MalformedPayload(reason.into())
    }

    pub(crate) fn shape(shape: &'static str, reason: impl Into<String>) -> Self {
        CardError::InvalidShape {
            shape,
            reason: reason.into(),
        }
    }

    /// Attach an object key to the error path.
    pub fn within(self, key: &str) -> Self {
        self.prefixed(key.to_string())
    }

    /// Attach a sequence index to the error path.
    pub fn within_index(self, index: usize) -> Self {
        self.prefixed(format!("[{}]", index))
    }

    fn prefixed(self, segment: String) -> Self {
        match self {
            CardError::At { path, source } => {
                let path = if path.starts_with('[') {
                    format!("{}{}", segment, path)
                } else {
                    format!("{}.{}", segment, path)
                };
                CardError::At { path, source }
            }
            other => CardError::At {
                path: segment,
                source: Box::new(other),
            },
        }
    }

    /// The field path the error occurred at, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            CardError::At { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The underlying error without path context.
    pub fn root(&self) -> &CardError {
        match self {
            CardError::At { source, .. } => source.root(),
            other => other,
        }
    }
}
