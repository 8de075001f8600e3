//! Style validation errors.

/// Error returned when a style's fallback chain is unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleValidationError {
    /// The fallback chain is longer than resolution will follow.
    FallbackChainTooDeep { depth: usize, limit: usize },
}

impl std::fmt::Display for StyleValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleValidationError::FallbackChainTooDeep { depth, limit } => {
                write!(
                    f,
                    "invalid fallback chain: {} links deep, limit is {}",
                    depth, limit
                )
            }
        }
    }
}

impl std::error::Error for StyleValidationError {}
