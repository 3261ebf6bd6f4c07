//! Graphics error types.

use std::fmt;

/// Errors that can occur in the material pipeline and render systems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// An invalid parameter was provided (e.g. a frame index out of range).
    InvalidParameter(String),
    /// A named resource could not be found.
    ResourceNotFound(String),
    /// A texture asset failed to load.
    LoadFailed {
        /// Name of the texture.
        name: String,
        /// Why loading failed.
        reason: String,
    },
    /// A GPU program failed to compile.
    CompileFailed {
        /// Label of the program.
        label: String,
        /// Compiler output.
        details: String,
    },
    /// A requested feature is not supported.
    FeatureNotSupported(String),
    /// Failed to initialize the render system.
    InitializationFailed(String),
    /// An internal error occurred.
    Internal(String),
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Self::ResourceNotFound(msg) => write!(f, "resource not found: {msg}"),
            Self::LoadFailed { name, reason } => {
                write!(f, "failed to load texture '{name}': {reason}")
            }
            Self::CompileFailed { label, details } => {
                write!(f, "failed to compile program '{label}': {details}")
            }
            Self::FeatureNotSupported(msg) => write!(f, "feature not supported: {msg}"),
            Self::InitializationFailed(msg) => write!(f, "initialization failed: {msg}"),
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for GraphicsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphicsError::InvalidParameter("frame 3 out of range".to_string());
        assert_eq!(err.to_string(), "invalid parameter: frame 3 out of range");

        let err = GraphicsError::LoadFailed {
            name: "rock.png".to_string(),
            reason: "truncated".to_string(),
        };
        assert_eq!(err.to_string(), "failed to load texture 'rock.png': truncated");

        let err = GraphicsError::InitializationFailed("no GPU found".to_string());
        assert_eq!(err.to_string(), "initialization failed: no GPU found");
    }
}
