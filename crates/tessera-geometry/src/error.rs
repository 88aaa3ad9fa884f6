use tessera_text::TextError;

/// Errors reported by draw calls.
///
/// Draw calls never return these to the caller; the render context forwards
/// them to the configured error callback and skips the call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawError {
    /// A draw call received arguments it cannot tessellate.
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },

    /// Text options reference a font that was never loaded.
    UnknownFont(u32),

    /// Text layout failed.
    Text(TextError),
}

impl DrawError {
    pub(crate) fn invalid(operation: &'static str, reason: impl Into<String>) -> Self {
        DrawError::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawError::InvalidArgument { operation, reason } => {
                write!(f, "Invalid argument to {}: {}", operation, reason)
            }
            DrawError::UnknownFont(id) => write!(f, "Unknown font id {}", id),
            DrawError::Text(err) => write!(f, "Text error: {}", err),
        }
    }
}

impl std::error::Error for DrawError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DrawError::Text(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TextError> for DrawError {
    fn from(err: TextError) -> Self {
        DrawError::Text(err)
    }
}

/// Result type for draw operations.
pub type DrawResult<T> = Result<T, DrawError>;
