//! Error types for model operations.

use thiserror::Error;

use crate::id::{CategoryId, TaskId};

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Broad classification of a [`ModelError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied a value that violates a precondition.
    InvalidInput,
    /// An index fell outside `0..len`.
    OutOfRange,
}

/// Errors raised by containers, tasks, logs and the project.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Empty, multi-line or reserved log/project name.
    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    /// A task field was empty, not representable in a project file, or a
    /// duration was not positive.
    #[error("Incomplete task information: {0}")]
    IncompleteTask(&'static str),

    /// A category with the same case-insensitive name already exists.
    #[error("Category already exists: {0}")]
    DuplicateCategory(String),

    /// The aggregate log cannot be renamed, deleted or otherwise edited.
    #[error("The All Tasks log may not be {0}")]
    ProtectedLog(&'static str),

    /// The task is already bound to a category.
    #[error("Task already belongs to a category")]
    CategoryAlreadyBound,

    /// Index outside `0..len`.
    #[error("Invalid index {index} for length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Container length at the time of the call.
        len: usize,
    },

    /// A sorted container already holds an element comparing equal.
    #[error("Cannot add duplicate element")]
    DuplicateElement,

    /// The referenced category no longer exists.
    #[error("Category not found: {0}")]
    UnknownCategory(CategoryId),

    /// The referenced task is not in the arena.
    #[error("Task not found: {0}")]
    UnknownTask(TaskId),
}

impl ModelError {
    /// Taxonomy bucket of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::IndexOutOfRange { .. } => ErrorKind::OutOfRange,
            _ => ErrorKind::InvalidInput,
        }
    }

    pub(crate) const fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_errors_are_out_of_range() {
        assert_eq!(ModelError::out_of_range(3, 3).kind(), ErrorKind::OutOfRange);
        assert_eq!(
            ModelError::DuplicateCategory("Design".into()).kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn messages_name_the_violation() {
        assert_eq!(
            ModelError::ProtectedLog("deleted").to_string(),
            "The All Tasks log may not be deleted"
        );
        assert_eq!(
            ModelError::out_of_range(5, 2).to_string(),
            "Invalid index 5 for length 2"
        );
    }
}
