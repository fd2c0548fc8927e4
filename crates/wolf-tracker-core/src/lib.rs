//! Domain model for wolf-tracker: tasks, category logs and the project that keeps them consistent.

/// Error types.
pub mod error;
/// Identifier types.
pub mod id;
/// Task logs and their statistics.
pub mod log;
/// Insertion-ordered container.
pub mod ordered_log;
/// The project aggregate.
pub mod project;
/// Sorted duplicate-free container.
pub mod sorted_list;
/// Task records and the task arena.
pub mod task;

pub use error::{ErrorKind, ModelError, Result};
pub use id::{CategoryId, TaskId};
pub use log::{ALL_TASKS_NAME, AllTasksLog, CategoryLog, LogStats, TaskLog, compare_names};
pub use ordered_log::OrderedLog;
pub use project::{LogRef, Project, RecentTask, TaskRow};
pub use sorted_list::SortedUniqueList;
pub use task::{Task, TaskArena};
