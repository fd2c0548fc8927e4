//! Task logs: the shared behaviour plus the category and aggregate variants.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use crate::error::{ModelError, Result};
use crate::id::{CategoryId, TaskId};
use crate::ordered_log::OrderedLog;
use crate::task::{Task, TaskArena};

/// Reserved name of the aggregate log.
pub const ALL_TASKS_NAME: &str = "All Tasks";

/// Behaviour shared by [`CategoryLog`] and [`AllTasksLog`].
///
/// A log stores task identifiers in insertion order; the tasks themselves
/// live in a [`TaskArena`]. Statistics are recomputed on every call.
pub trait TaskLog {
    /// Display name of the log.
    fn name(&self) -> &str;

    /// Task identifiers in insertion order.
    fn entries(&self) -> &OrderedLog<TaskId>;

    /// Mutable access to the identifier list.
    fn entries_mut(&mut self) -> &mut OrderedLog<TaskId>;

    /// Number of tasks in the log.
    fn task_count(&self) -> usize {
        self.entries().len()
    }

    /// Identifier at `index`.
    ///
    /// # Errors
    /// Returns [`ModelError::IndexOutOfRange`] unless `index < task_count()`.
    fn task_id(&self, index: usize) -> Result<TaskId> {
        self.entries().get(index).copied()
    }

    /// Task at `index`, resolved through `arena`.
    ///
    /// # Errors
    /// Out-of-range indices and ids missing from the arena.
    fn task<'a>(&self, index: usize, arena: &'a TaskArena) -> Result<&'a Task> {
        arena.get(self.task_id(index)?)
    }

    /// Append the arena task `id`.
    ///
    /// The default only reads `arena`; the borrow is mutable so that
    /// [`CategoryLog`] can bind the task to itself in the same call.
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownTask`] if `id` is not in `arena`.
    fn add_task(&mut self, id: TaskId, arena: &mut TaskArena) -> Result<()> {
        arena.get(id)?;
        self.entries_mut().append(id);
        Ok(())
    }

    /// Replace the entry at `index`, returning the previous identifier.
    ///
    /// `arena` is mutable for the same reason as in [`add_task`](Self::add_task).
    ///
    /// # Errors
    /// Out-of-range indices and ids missing from the arena.
    fn set_task(&mut self, index: usize, id: TaskId, arena: &mut TaskArena) -> Result<TaskId> {
        arena.get(id)?;
        self.entries_mut().set(index, id)
    }

    /// Drop the entry at `index`, returning its identifier.
    ///
    /// # Errors
    /// Returns [`ModelError::IndexOutOfRange`] unless `index < task_count()`.
    fn remove_task(&mut self, index: usize) -> Result<TaskId> {
        self.entries_mut().remove_at(index)
    }

    /// Durations of every task, in log order.
    ///
    /// Every entry must resolve in `arena`; a dangling id is a broken
    /// project and trips a debug assertion.
    fn durations(&self, arena: &TaskArena) -> Vec<u32> {
        self.entries()
            .iter()
            .filter_map(|id| {
                let task = arena.get(*id);
                debug_assert!(task.is_ok(), "log {:?} lists task {id} missing from the arena", self.name());
                task.ok()
            })
            .map(Task::duration)
            .collect()
    }

    /// Shortest duration, or 0 for an empty log.
    fn min_duration(&self, arena: &TaskArena) -> u32 {
        self.durations(arena).into_iter().min().unwrap_or(0)
    }

    /// Longest duration, or 0 for an empty log.
    fn max_duration(&self, arena: &TaskArena) -> u32 {
        self.durations(arena).into_iter().max().unwrap_or(0)
    }

    /// Mean duration rounded half-up to one decimal, or 0 for an empty log.
    fn avg_duration(&self, arena: &TaskArena) -> f64 {
        average(&self.durations(arena))
    }

    /// Snapshot of all statistics.
    fn stats(&self, arena: &TaskArena) -> LogStats {
        let durations = self.durations(arena);
        LogStats {
            name: self.name().to_owned(),
            count: durations.len(),
            min: durations.iter().copied().min().unwrap_or(0),
            max: durations.iter().copied().max().unwrap_or(0),
            avg: average(&durations),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn average(durations: &[u32]) -> f64 {
    if durations.is_empty() {
        return 0.0;
    }
    let sum: u64 = durations.iter().copied().map(u64::from).sum();
    let mean = sum as f64 / durations.len() as f64;
    (mean * 10.0 + 0.5).floor() / 10.0
}

/// Count and duration statistics of one log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogStats {
    /// Name of the log the statistics describe.
    pub name: String,
    /// Number of tasks.
    pub count: usize,
    /// Shortest duration (0 when empty).
    pub min: u32,
    /// Longest duration (0 when empty).
    pub max: u32,
    /// Mean duration rounded to one decimal (0 when empty).
    pub avg: f64,
}

impl fmt::Display for LogStats {
    /// CSV row: `name,count,min,max,avg`, with blank statistics when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 0 {
            write!(f, "{},0,,,", self.name)
        } else {
            write!(
                f,
                "{},{},{},{},{:.1}",
                self.name, self.count, self.min, self.max, self.avg
            )
        }
    }
}

/// User-defined category of tasks.
///
/// Categories order and compare by name, ignoring case.
#[derive(Debug, Clone)]
pub struct CategoryLog {
    id: CategoryId,
    name: String,
    entries: OrderedLog<TaskId>,
}

impl CategoryLog {
    /// Create an empty category.
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidName`] for an empty name or one with a
    /// line break.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        check_name(&name)?;
        Ok(Self {
            id: CategoryId::new(),
            name,
            entries: OrderedLog::new(),
        })
    }

    /// Stable identifier of the category.
    #[must_use]
    pub const fn id(&self) -> CategoryId {
        self.id
    }

    /// Rename the category. Only valid while it sits outside any sorted container.
    pub(crate) fn set_name(&mut self, name: &str) -> Result<()> {
        check_name(name)?;
        name.clone_into(&mut self.name);
        Ok(())
    }
}

impl TaskLog for CategoryLog {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> &OrderedLog<TaskId> {
        &self.entries
    }

    fn entries_mut(&mut self) -> &mut OrderedLog<TaskId> {
        &mut self.entries
    }

    /// Binds the task to this category before appending it.
    fn add_task(&mut self, id: TaskId, arena: &mut TaskArena) -> Result<()> {
        arena.get_mut(id)?.bind_category(self.id)?;
        self.entries.append(id);
        Ok(())
    }

    /// Binds the task to this category before storing it at `index`.
    fn set_task(&mut self, index: usize, id: TaskId, arena: &mut TaskArena) -> Result<TaskId> {
        self.entries.get(index)?;
        arena.get_mut(id)?.bind_category(self.id)?;
        self.entries.set(index, id)
    }
}

/// Log and project names are single, non-empty lines.
pub(crate) fn check_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(['\n', '\r']) {
        return Err(ModelError::InvalidName(name.to_owned()));
    }
    Ok(())
}

/// Case-insensitive name ordering.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_uppercase)
        .cmp(b.chars().flat_map(char::to_uppercase))
}

impl Ord for CategoryLog {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_names(&self.name, &other.name)
    }
}

impl PartialOrd for CategoryLog {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CategoryLog {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CategoryLog {}

/// The aggregate log holding every task in the project.
#[derive(Debug, Clone, Default)]
pub struct AllTasksLog {
    entries: OrderedLog<TaskId>,
}

impl AllTasksLog {
    /// Create an empty aggregate log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts only the reserved name; the aggregate cannot be renamed.
    ///
    /// # Errors
    /// Returns [`ModelError::ProtectedLog`] for any other name.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        if name == ALL_TASKS_NAME {
            Ok(())
        } else {
            Err(ModelError::ProtectedLog("edited"))
        }
    }
}

impl TaskLog for AllTasksLog {
    fn name(&self) -> &str {
        ALL_TASKS_NAME
    }

    fn entries(&self) -> &OrderedLog<TaskId> {
        &self.entries
    }

    fn entries_mut(&mut self) -> &mut OrderedLog<TaskId> {
        &mut self.entries
    }
}
