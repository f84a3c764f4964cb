// Errors surfaced to callers of the stores

use thiserror::Error;

/// Input rejected by a store operation; the operation made no change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task title is required")]
    EmptyTitle,
    #[error("Task description is required")]
    EmptyDescription,
    #[error("Both task title and description are required")]
    EmptyTitleAndDescription,
}

impl ValidationError {
    /// Check a title/description pair, both judged after trimming whitespace
    pub fn check(title: &str, description: &str) -> Result<(), ValidationError> {
        match (title.trim().is_empty(), description.trim().is_empty()) {
            (false, false) => Ok(()),
            (true, false) => Err(ValidationError::EmptyTitle),
            (false, true) => Err(ValidationError::EmptyDescription),
            (true, true) => Err(ValidationError::EmptyTitleAndDescription),
        }
    }
}
