//! Errors raised by the recipe engine

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecipeError {
    /// The brew target cannot be turned into a recipe. Nothing was computed.
    #[error("invalid {field}: {reason}")]
    InvalidTarget { field: &'static str, reason: String },
}

impl RecipeError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        RecipeError::InvalidTarget {
            field,
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            RecipeError::InvalidTarget { field, .. } => field,
        }
    }
}
