//! Task records and the arena that owns them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ModelError, Result};
use crate::id::{CategoryId, TaskId};

/// A unit of tracked work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    title: String,
    duration: u32,
    details: String,
    category: Option<CategoryId>,
}

impl Task {
    /// Build an unbound task.
    ///
    /// # Errors
    /// Returns [`ModelError::IncompleteTask`] for an empty title or details,
    /// a zero duration, or text the project file cannot hold (see
    /// [`set_title`](Self::set_title) and [`set_details`](Self::set_details)).
    pub fn new(title: impl Into<String>, duration: u32, details: impl Into<String>) -> Result<Self> {
        let title = title.into();
        let details = details.into();
        validate(&title, duration, &details)?;
        Ok(Self {
            title,
            duration,
            details,
            category: None,
        })
    }

    /// Title of the task.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Duration in minutes.
    #[must_use]
    pub const fn duration(&self) -> u32 {
        self.duration
    }

    /// Free-form details, possibly spanning lines.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Category the task was bound to, if any.
    #[must_use]
    pub const fn category(&self) -> Option<CategoryId> {
        self.category
    }

    /// Titles are a single line without commas.
    ///
    /// # Errors
    /// Returns [`ModelError::IncompleteTask`] when `title` is empty, holds a
    /// comma or holds a line break.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        check_title(&title)?;
        self.title = title;
        Ok(())
    }

    /// # Errors
    /// Returns [`ModelError::IncompleteTask`] when `duration` is zero.
    pub const fn set_duration(&mut self, duration: u32) -> Result<()> {
        if duration == 0 {
            return Err(ModelError::IncompleteTask("duration must be positive"));
        }
        self.duration = duration;
        Ok(())
    }

    /// Details may span lines, but no line may start with `*`, the text may
    /// not end with a line break, and `\r` is not allowed.
    ///
    /// # Errors
    /// Returns [`ModelError::IncompleteTask`] when `details` is empty or
    /// breaks one of the rules above.
    pub fn set_details(&mut self, details: impl Into<String>) -> Result<()> {
        let details = details.into();
        check_details(&details)?;
        self.details = details;
        Ok(())
    }

    /// Replace title, duration and details together.
    ///
    /// All three values are validated before any field changes.
    ///
    /// # Errors
    /// Returns [`ModelError::IncompleteTask`] if any value is invalid.
    pub fn update(&mut self, title: &str, duration: u32, details: &str) -> Result<()> {
        validate(title, duration, details)?;
        title.clone_into(&mut self.title);
        self.duration = duration;
        details.clone_into(&mut self.details);
        Ok(())
    }

    /// Bind the task to `category`. Binding happens at most once.
    ///
    /// # Errors
    /// Returns [`ModelError::CategoryAlreadyBound`] if a category is already set.
    pub const fn bind_category(&mut self, category: CategoryId) -> Result<()> {
        if self.category.is_some() {
            return Err(ModelError::CategoryAlreadyBound);
        }
        self.category = Some(category);
        Ok(())
    }
}

fn validate(title: &str, duration: u32, details: &str) -> Result<()> {
    check_title(title)?;
    if duration == 0 {
        return Err(ModelError::IncompleteTask("duration must be positive"));
    }
    check_details(details)
}

fn check_title(title: &str) -> Result<()> {
    if title.is_empty() {
        return Err(ModelError::IncompleteTask("title must not be empty"));
    }
    if title.contains([',', '\n', '\r']) {
        return Err(ModelError::IncompleteTask(
            "title must not contain commas or line breaks",
        ));
    }
    Ok(())
}

fn check_details(details: &str) -> Result<()> {
    if details.is_empty() {
        return Err(ModelError::IncompleteTask("details must not be empty"));
    }
    if details.contains('\r') || details.ends_with('\n') {
        return Err(ModelError::IncompleteTask(
            "details must not contain carriage returns or end with a line break",
        ));
    }
    if details.split('\n').any(|line| line.starts_with('*')) {
        return Err(ModelError::IncompleteTask(
            "details lines must not start with '*'",
        ));
    }
    Ok(())
}

/// Single owner of every task in a project.
///
/// Logs refer to tasks by [`TaskId`]; removing an id here is the only way a
/// task stops existing.
#[derive(Debug, Clone, Default)]
pub struct TaskArena {
    tasks: BTreeMap<TaskId, Task>,
}

impl TaskArena {
    /// Create an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: BTreeMap::new(),
        }
    }

    /// Store `task` under a fresh identifier.
    pub fn insert(&mut self, task: Task) -> TaskId {
        let id = TaskId::new();
        self.tasks.insert(id, task);
        id
    }

    /// # Errors
    /// Returns [`ModelError::UnknownTask`] when `id` is not stored.
    pub fn get(&self, id: TaskId) -> Result<&Task> {
        self.tasks.get(&id).ok_or(ModelError::UnknownTask(id))
    }

    /// # Errors
    /// Returns [`ModelError::UnknownTask`] when `id` is not stored.
    pub fn get_mut(&mut self, id: TaskId) -> Result<&mut Task> {
        self.tasks.get_mut(&id).ok_or(ModelError::UnknownTask(id))
    }

    /// # Errors
    /// Returns [`ModelError::UnknownTask`] when `id` is not stored.
    pub fn remove(&mut self, id: TaskId) -> Result<Task> {
        self.tasks.remove(&id).ok_or(ModelError::UnknownTask(id))
    }

    /// Number of stored tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether `id` is stored.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }
}
