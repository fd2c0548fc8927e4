//! The project: categories, the aggregate log and the task arena kept consistent.
//!
//! Every task in the arena is listed exactly once in [`AllTasksLog`] and
//! exactly once in the [`CategoryLog`] it is bound to. All mutations go
//! through [`Project`] so that both views change together.

use std::collections::BTreeSet;
use tracing::debug;

use crate::error::{ModelError, Result};
use crate::id::{CategoryId, TaskId};
use crate::log::{ALL_TASKS_NAME, AllTasksLog, CategoryLog, LogStats, TaskLog, check_name};
use crate::sorted_list::SortedUniqueList;
use crate::task::{Task, TaskArena};

/// Selects the log an operation acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogRef {
    /// The aggregate "All Tasks" log.
    #[default]
    AllTasks,
    /// A category log.
    Category(CategoryId),
}

/// One row of a log's task table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// Task title.
    pub title: String,
    /// Duration in minutes.
    pub duration: u32,
    /// Name of the category the task belongs to.
    pub category: String,
}

/// Latest task of a category, or a placeholder when the category is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentTask {
    /// Title of the latest task, `"None"` for an empty category.
    pub title: String,
    /// Duration of the latest task, absent for an empty category.
    pub duration: Option<u32>,
    /// Category name.
    pub category: String,
}

impl RecentTask {
    fn none(category: &str) -> Self {
        Self {
            title: "None".to_owned(),
            duration: None,
            category: category.to_owned(),
        }
    }

    /// Row form `[title, duration, category]`; the duration is blank when absent.
    #[must_use]
    pub fn as_row(&self) -> [String; 3] {
        [
            self.title.clone(),
            self.duration.map(|d| d.to_string()).unwrap_or_default(),
            self.category.clone(),
        ]
    }
}

/// A named collection of categorised tasks.
#[derive(Debug)]
pub struct Project {
    name: String,
    tasks: TaskArena,
    all_tasks: AllTasksLog,
    categories: SortedUniqueList<CategoryLog>,
    current: LogRef,
    changed: bool,
}

impl Project {
    /// Create an empty project. New projects start out changed.
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidName`] for an empty or reserved name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            tasks: TaskArena::new(),
            all_tasks: AllTasksLog::new(),
            categories: SortedUniqueList::new(),
            current: LogRef::AllTasks,
            changed: true,
        })
    }

    /// Project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether there are modifications since the last save.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.changed
    }

    /// Set or clear the changed flag.
    pub const fn set_changed(&mut self, changed: bool) {
        self.changed = changed;
    }

    /// Task storage shared by every log.
    #[must_use]
    pub const fn arena(&self) -> &TaskArena {
        &self.tasks
    }

    /// The aggregate log.
    #[must_use]
    pub const fn all_tasks(&self) -> &AllTasksLog {
        &self.all_tasks
    }

    /// Categories in case-insensitive name order.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryLog> + '_ {
        self.categories.iter()
    }

    /// `"All Tasks"` followed by every category name in sorted order.
    #[must_use]
    pub fn category_names(&self) -> Vec<String> {
        std::iter::once(ALL_TASKS_NAME.to_owned())
            .chain(self.categories.iter().map(|c| c.name().to_owned()))
            .collect()
    }

    /// # Errors
    /// Returns [`ModelError::UnknownCategory`] if no category has `id`.
    pub fn category(&self, id: CategoryId) -> Result<&CategoryLog> {
        self.categories
            .iter()
            .find(|c| c.id() == id)
            .ok_or(ModelError::UnknownCategory(id))
    }

    /// Category whose name matches `name` exactly.
    #[must_use]
    pub fn category_by_name(&self, name: &str) -> Option<&CategoryLog> {
        self.categories.iter().find(|c| c.name() == name)
    }

    /// Name of the category `task` is bound to, or `""` when unbound.
    #[must_use]
    pub fn category_name_of(&self, task: &Task) -> &str {
        task.category()
            .and_then(|id| self.category(id).ok())
            .map_or("", |category| category.name())
    }

    /// Log reference for `name`; unknown names resolve to the aggregate.
    #[must_use]
    pub fn resolve_log(&self, name: &str) -> LogRef {
        self.category_by_name(name)
            .map_or(LogRef::AllTasks, |c| LogRef::Category(c.id()))
    }

    /// Make the log called `name` current, falling back to the aggregate.
    pub fn set_current_log(&mut self, name: &str) {
        self.current = self.resolve_log(name);
    }

    /// Reference to the current log.
    #[must_use]
    pub const fn current(&self) -> LogRef {
        self.current
    }

    /// The current log.
    #[must_use]
    pub fn current_log(&self) -> &dyn TaskLog {
        self.log(self.current).unwrap_or(&self.all_tasks)
    }

    /// # Errors
    /// Returns [`ModelError::UnknownCategory`] for a stale category reference.
    pub fn log(&self, target: LogRef) -> Result<&dyn TaskLog> {
        match target {
            LogRef::AllTasks => Ok(&self.all_tasks as &dyn TaskLog),
            LogRef::Category(id) => Ok(self.category(id)? as &dyn TaskLog),
        }
    }

    /// # Errors
    /// Returns [`ModelError::UnknownTask`] if `id` is not part of the project.
    pub fn task(&self, id: TaskId) -> Result<&Task> {
        self.tasks.get(id)
    }

    /// Task at `index` of the `target` log.
    ///
    /// # Errors
    /// Stale references and out-of-range indices.
    pub fn task_at(&self, target: LogRef, index: usize) -> Result<&Task> {
        self.log(target)?.task(index, &self.tasks)
    }

    /// Add an empty category and make it current.
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidName`] for an empty or reserved name and
    /// [`ModelError::DuplicateCategory`] when the name is already taken
    /// (ignoring case). Nothing changes on error.
    pub fn add_category(&mut self, name: &str) -> Result<CategoryId> {
        validate_name(name)?;
        let category = CategoryLog::new(name)?;
        let id = category.id();
        self.categories.add(category).map_err(|err| match err {
            ModelError::DuplicateElement => ModelError::DuplicateCategory(name.to_owned()),
            other => other,
        })?;
        self.current = LogRef::Category(id);
        self.changed = true;
        Ok(id)
    }

    /// Rename the `target` category, keeping the category list sorted.
    ///
    /// # Errors
    /// [`ModelError::ProtectedLog`] for the aggregate, [`ModelError::InvalidName`]
    /// or [`ModelError::DuplicateCategory`] for an unusable name.
    pub fn rename_category(&mut self, target: LogRef, new_name: &str) -> Result<()> {
        let LogRef::Category(id) = target else {
            return Err(ModelError::ProtectedLog("edited"));
        };
        let index = self.category_index(id)?;
        validate_name(new_name)?;
        let probe = CategoryLog::new(new_name)?;
        if self.categories.contains(&probe) {
            return Err(ModelError::DuplicateCategory(new_name.to_owned()));
        }

        let mut category = self.categories.remove(index)?;
        category.set_name(new_name)?;
        self.categories.add(category)?;
        self.changed = true;
        Ok(())
    }

    /// Rename the current category.
    ///
    /// # Errors
    /// See [`rename_category`](Self::rename_category).
    pub fn edit_category_name(&mut self, new_name: &str) -> Result<()> {
        self.rename_category(self.current, new_name)
    }

    /// Delete the `target` category and every task bound to it.
    ///
    /// Returns the number of tasks removed. If the category was current, the
    /// aggregate becomes current.
    ///
    /// # Errors
    /// [`ModelError::ProtectedLog`] for the aggregate, [`ModelError::UnknownCategory`]
    /// for a stale reference.
    pub fn remove_category(&mut self, target: LogRef) -> Result<usize> {
        let LogRef::Category(id) = target else {
            return Err(ModelError::ProtectedLog("deleted"));
        };
        let index = self.category_index(id)?;
        let removed = self.categories.remove(index)?;

        let doomed: BTreeSet<TaskId> = removed.entries().iter().copied().collect();
        self.all_tasks.entries_mut().retain(|task| !doomed.contains(task));
        for task in &doomed {
            self.tasks.remove(*task)?;
        }
        debug!(category = removed.name(), tasks = doomed.len(), "Removed category");

        if self.current == target {
            self.current = LogRef::AllTasks;
        }
        self.changed = true;
        Ok(doomed.len())
    }

    /// Delete the current category and its tasks.
    ///
    /// # Errors
    /// See [`remove_category`](Self::remove_category).
    pub fn remove_current_category(&mut self) -> Result<usize> {
        self.remove_category(self.current)
    }

    /// Add `task` to the `target` category and to the aggregate.
    ///
    /// Adding to the aggregate directly is a no-op and returns `Ok(None)`.
    ///
    /// # Errors
    /// [`ModelError::UnknownCategory`] for a stale reference and
    /// [`ModelError::CategoryAlreadyBound`] for a task bound elsewhere.
    pub fn add_task_to(&mut self, target: LogRef, task: Task) -> Result<Option<TaskId>> {
        let LogRef::Category(category_id) = target else {
            debug!(title = task.title(), "Ignoring task added to the aggregate log");
            return Ok(None);
        };
        let index = self.category_index(category_id)?;
        let category = self.categories.get_mut(index)?;

        let id = self.tasks.insert(task);
        if let Err(err) = category.add_task(id, &mut self.tasks) {
            self.tasks.remove(id)?;
            return Err(err);
        }
        self.all_tasks.add_task(id, &mut self.tasks)?;
        self.changed = true;
        Ok(Some(id))
    }

    /// Add `task` to the current log.
    ///
    /// # Errors
    /// See [`add_task_to`](Self::add_task_to).
    pub fn add_task(&mut self, task: Task) -> Result<Option<TaskId>> {
        self.add_task_to(self.current, task)
    }

    /// Edit the task at `index` of `target` in place; both views observe it.
    ///
    /// # Errors
    /// Out-of-range indices and invalid task fields. Nothing changes on error.
    pub fn edit_task_in(
        &mut self,
        target: LogRef,
        index: usize,
        title: &str,
        duration: u32,
        details: &str,
    ) -> Result<()> {
        let id = self.log(target)?.task_id(index)?;
        self.tasks.get_mut(id)?.update(title, duration, details)?;
        self.changed = true;
        Ok(())
    }

    /// Edit the task at `index` of the current log.
    ///
    /// # Errors
    /// See [`edit_task_in`](Self::edit_task_in).
    pub fn edit_task(&mut self, index: usize, title: &str, duration: u32, details: &str) -> Result<()> {
        self.edit_task_in(self.current, index, title, duration, details)
    }

    /// Remove the task at `index` of `target` from both its category and the aggregate.
    ///
    /// # Errors
    /// Stale references and out-of-range indices.
    pub fn remove_task_from(&mut self, target: LogRef, index: usize) -> Result<Task> {
        let id = match target {
            LogRef::AllTasks => {
                let id = self.all_tasks.task_id(index)?;
                let owner = self
                    .tasks
                    .get(id)?
                    .category()
                    .map(|category| self.category_index(category))
                    .transpose()?;
                self.all_tasks.remove_task(index)?;
                if let Some(owner) = owner {
                    let category = self.categories.get_mut(owner)?;
                    if let Some(position) = category.entries().position(&id) {
                        category.remove_task(position)?;
                    }
                }
                id
            }
            LogRef::Category(category) => {
                let category_index = self.category_index(category)?;
                let id = self.categories.get_mut(category_index)?.remove_task(index)?;
                if let Some(position) = self.all_tasks.entries().position(&id) {
                    self.all_tasks.remove_task(position)?;
                }
                id
            }
        };
        self.changed = true;
        self.tasks.remove(id)
    }

    /// Remove the task at `index` of the current log.
    ///
    /// # Errors
    /// See [`remove_task_from`](Self::remove_task_from).
    pub fn remove_task(&mut self, index: usize) -> Result<Task> {
        self.remove_task_from(self.current, index)
    }

    /// Latest task of every category, in category order.
    #[must_use]
    pub fn most_recent_tasks(&self) -> Vec<RecentTask> {
        self.categories
            .iter()
            .map(|category| {
                category
                    .entries()
                    .last()
                    .and_then(|id| self.tasks.get(*id).ok())
                    .map_or_else(
                        || RecentTask::none(category.name()),
                        |task| RecentTask {
                            title: task.title().to_owned(),
                            duration: Some(task.duration()),
                            category: category.name().to_owned(),
                        },
                    )
            })
            .collect()
    }

    /// Task table of `target`, in log order.
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownCategory`] for a stale reference.
    pub fn tasks_as_rows(&self, target: LogRef) -> Result<Vec<TaskRow>> {
        let log = self.log(target)?;
        log.entries()
            .iter()
            .map(|id| {
                let task = self.tasks.get(*id)?;
                Ok(TaskRow {
                    title: task.title().to_owned(),
                    duration: task.duration(),
                    category: self.category_name_of(task).to_owned(),
                })
            })
            .collect()
    }

    /// Statistics of `target`.
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownCategory`] for a stale reference.
    pub fn stats(&self, target: LogRef) -> Result<LogStats> {
        Ok(self.log(target)?.stats(&self.tasks))
    }

    /// Statistics of every category followed by the aggregate.
    #[must_use]
    pub fn stats_table(&self) -> Vec<LogStats> {
        self.categories
            .iter()
            .map(|category| category.stats(&self.tasks))
            .chain(std::iter::once(self.all_tasks.stats(&self.tasks)))
            .collect()
    }

    fn category_index(&self, id: CategoryId) -> Result<usize> {
        self.categories
            .iter()
            .position(|c| c.id() == id)
            .ok_or(ModelError::UnknownCategory(id))
    }
}

fn validate_name(name: &str) -> Result<()> {
    check_name(name)?;
    if name == ALL_TASKS_NAME {
        return Err(ModelError::InvalidName(name.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn task(title: &str, duration: u32) -> Task {
        Task::new(title, duration, format!("{title} details")).expect("valid task")
    }

    /// Every category task is in the aggregate, bound to that category, and nothing else is.
    fn assert_consistent(project: &Project) {
        let mut from_categories = BTreeSet::new();
        for category in project.categories() {
            for id in category.entries().iter() {
                let bound = project.task(*id).expect("category task in arena").category();
                assert_eq!(bound, Some(category.id()));
                assert!(from_categories.insert(*id), "task listed twice");
            }
        }
        let aggregate: Vec<TaskId> = project.all_tasks().entries().iter().copied().collect();
        let aggregate_set: BTreeSet<TaskId> = aggregate.iter().copied().collect();
        assert_eq!(aggregate.len(), aggregate_set.len(), "aggregate lists a task twice");
        assert_eq!(aggregate_set, from_categories);
        assert_eq!(project.arena().len(), aggregate.len());
    }

    fn titles(project: &Project, target: LogRef) -> Vec<String> {
        project
            .tasks_as_rows(target)
            .expect("live log")
            .into_iter()
            .map(|row| row.title)
            .collect()
    }

    #[test]
    fn new_rejects_empty_and_reserved_names() {
        assert!(matches!(Project::new(""), Err(ModelError::InvalidName(_))));
        assert!(matches!(Project::new(ALL_TASKS_NAME), Err(ModelError::InvalidName(_))));
        let project = Project::new("Demo").expect("valid name");
        assert!(project.is_changed());
        assert_eq!(project.current(), LogRef::AllTasks);
    }

    #[test]
    fn names_with_line_breaks_are_rejected() {
        assert!(matches!(Project::new("Two\nLines"), Err(ModelError::InvalidName(_))));
        let mut project = Project::new("P").expect("valid name");
        let a = project.add_category("A").expect("new category");
        assert!(matches!(project.add_category("A\nB"), Err(ModelError::InvalidName(_))));
        assert!(matches!(
            project.rename_category(LogRef::Category(a), "A\r\nB"),
            Err(ModelError::InvalidName(_))
        ));
        assert_eq!(project.category_names(), vec!["All Tasks", "A"]);
    }

    #[test]
    fn category_names_are_sorted_after_aggregate() {
        let mut project = Project::new("Demo").expect("valid name");
        project.add_category("B").expect("new category");
        project.add_category("A").expect("new category");
        project.add_category("c").expect("new category");
        assert_eq!(project.category_names(), vec!["All Tasks", "A", "B", "c"]);
    }

    #[test]
    fn add_category_rejects_invalid_and_duplicate_names_without_change() {
        let mut project = Project::new("Demo").expect("valid name");
        let design = project.add_category("Design").expect("new category");
        project.set_changed(false);

        assert!(matches!(project.add_category(""), Err(ModelError::InvalidName(_))));
        assert!(matches!(
            project.add_category(ALL_TASKS_NAME),
            Err(ModelError::InvalidName(_))
        ));
        assert_eq!(
            project.add_category("DESIGN"),
            Err(ModelError::DuplicateCategory("DESIGN".into()))
        );
        assert_eq!(project.category_names(), vec!["All Tasks", "Design"]);
        assert_eq!(project.current(), LogRef::Category(design));
        assert!(!project.is_changed());
    }

    #[test]
    fn set_current_log_falls_back_to_aggregate() {
        let mut project = Project::new("Demo").expect("valid name");
        let design = project.add_category("Design").expect("new category");
        project.set_current_log("All Tasks");
        assert_eq!(project.current(), LogRef::AllTasks);
        project.set_current_log("Design");
        assert_eq!(project.current(), LogRef::Category(design));
        project.set_current_log("design");
        assert_eq!(project.current(), LogRef::AllTasks);
        assert_eq!(project.current_log().name(), ALL_TASKS_NAME);
    }

    #[test]
    fn add_task_populates_category_and_aggregate() {
        let mut project = Project::new("Demo").expect("valid name");
        let design = project.add_category("Design").expect("new category");
        let id = project
            .add_task(task("Sketch", 30))
            .expect("valid add")
            .expect("category is current");

        assert_eq!(project.task(id).expect("stored").category(), Some(design));
        assert_eq!(project.log(LogRef::Category(design)).expect("live").task_count(), 1);
        assert_eq!(project.all_tasks().task_count(), 1);
        assert_consistent(&project);
    }

    #[test]
    fn add_task_to_aggregate_is_a_no_op() {
        let mut project = Project::new("Demo").expect("valid name");
        project.add_category("Design").expect("new category");
        project.set_current_log(ALL_TASKS_NAME);
        project.set_changed(false);

        assert_eq!(project.add_task(task("Lost", 5)), Ok(None));
        assert_eq!(project.all_tasks().task_count(), 0);
        assert!(!project.is_changed());
    }

    #[test]
    fn add_task_rejects_already_bound_task() {
        let mut project = Project::new("Demo").expect("valid name");
        project.add_category("Design").expect("new category");
        let mut bound = task("Bound", 5);
        bound.bind_category(CategoryId::new()).expect("first bind");

        assert_eq!(project.add_task(bound), Err(ModelError::CategoryAlreadyBound));
        assert!(project.arena().is_empty());
        assert_consistent(&project);
    }

    #[test]
    fn edit_task_is_visible_from_both_views() {
        let mut project = Project::new("Demo").expect("valid name");
        let design = project.add_category("Design").expect("new category");
        project.add_task(task("Sketch", 30)).expect("valid add");

        project.set_current_log(ALL_TASKS_NAME);
        project.edit_task(0, "Sketch v2", 45, "revised").expect("valid edit");

        let via_category = project.task_at(LogRef::Category(design), 0).expect("in range");
        assert_eq!(via_category.title(), "Sketch v2");
        assert_eq!(via_category.duration(), 45);
        assert_eq!(via_category.details(), "revised");

        assert!(project.edit_task(0, "", 45, "revised").is_err());
        assert!(project.edit_task(1, "x", 45, "revised").is_err());
        assert_eq!(project.task_at(LogRef::AllTasks, 0).expect("in range").title(), "Sketch v2");
    }

    #[test]
    fn remove_task_from_aggregate_cascades_to_category() {
        let mut project = Project::new("Demo").expect("valid name");
        let design = project.add_category("Design").expect("new category");
        project.add_task(task("one", 10)).expect("valid add");
        project.add_task(task("two", 20)).expect("valid add");
        let code = project.add_category("Code").expect("new category");
        project.add_task(task("three", 30)).expect("valid add");

        project.set_current_log(ALL_TASKS_NAME);
        let removed = project.remove_task(0).expect("in range");
        assert_eq!(removed.title(), "one");
        assert_eq!(titles(&project, LogRef::Category(design)), vec!["two"]);
        assert_eq!(titles(&project, LogRef::Category(code)), vec!["three"]);
        assert_eq!(titles(&project, LogRef::AllTasks), vec!["two", "three"]);
        assert_consistent(&project);
    }

    #[test]
    fn remove_task_from_category_cascades_to_aggregate() {
        let mut project = Project::new("Demo").expect("valid name");
        project.add_category("Design").expect("new category");
        project.add_task(task("one", 10)).expect("valid add");
        project.add_task(task("two", 20)).expect("valid add");

        let removed = project.remove_task(1).expect("in range");
        assert_eq!(removed.title(), "two");
        assert_eq!(titles(&project, LogRef::AllTasks), vec!["one"]);
        assert!(project.remove_task(1).is_err());
        assert_consistent(&project);
    }

    #[test]
    fn remove_category_cascades_adjacent_tasks() {
        let mut project = Project::new("Demo").expect("valid name");
        let design = project.add_category("Design").expect("new category");
        project.add_task(task("d1", 10)).expect("valid add");
        project.add_task(task("d2", 20)).expect("valid add");
        project.add_category("Code").expect("new category");
        project.add_task(task("c1", 30)).expect("valid add");
        project.set_current_log("Design");
        project.add_task(task("d3", 40)).expect("valid add");

        project.set_current_log("Design");
        assert_eq!(project.remove_current_category(), Ok(3));
        assert_eq!(project.current(), LogRef::AllTasks);
        assert_eq!(project.category_names(), vec!["All Tasks", "Code"]);
        assert_eq!(titles(&project, LogRef::AllTasks), vec!["c1"]);
        assert_eq!(project.category(design).err(), Some(ModelError::UnknownCategory(design)));
        assert_consistent(&project);
    }

    #[test]
    fn aggregate_cannot_be_renamed_or_removed() {
        let mut project = Project::new("Demo").expect("valid name");
        assert_eq!(project.edit_category_name("X"), Err(ModelError::ProtectedLog("edited")));
        assert_eq!(project.remove_current_category(), Err(ModelError::ProtectedLog("deleted")));
    }

    #[test]
    fn rename_category_reorders_and_keeps_tasks() {
        let mut project = Project::new("Demo").expect("valid name");
        project.add_category("Alpha").expect("new category");
        project.add_task(task("a1", 10)).expect("valid add");
        project.add_category("Beta").expect("new category");

        project.set_current_log("Alpha");
        project.edit_category_name("Zulu").expect("free name");
        assert_eq!(project.category_names(), vec!["All Tasks", "Beta", "Zulu"]);
        assert_eq!(project.current_log().name(), "Zulu");
        let rows = project.tasks_as_rows(LogRef::AllTasks).expect("live log");
        assert_eq!(rows[0].category, "Zulu");

        assert_eq!(
            project.edit_category_name("beta"),
            Err(ModelError::DuplicateCategory("beta".into()))
        );
        assert!(matches!(project.edit_category_name(""), Err(ModelError::InvalidName(_))));
        assert_eq!(project.category_names(), vec!["All Tasks", "Beta", "Zulu"]);
        assert_consistent(&project);
    }

    #[test]
    fn most_recent_tasks_reports_one_row_per_category() {
        let mut project = Project::new("Demo").expect("valid name");
        project.add_category("Design").expect("new category");
        project.add_task(task("first", 10)).expect("valid add");
        project.add_task(task("latest", 25)).expect("valid add");
        project.add_category("Code").expect("new category");

        let recent: Vec<[String; 3]> = project
            .most_recent_tasks()
            .iter()
            .map(RecentTask::as_row)
            .collect();
        assert_eq!(
            recent,
            vec![
                ["None".to_owned(), String::new(), "Code".to_owned()],
                ["latest".to_owned(), "25".to_owned(), "Design".to_owned()],
            ]
        );
    }

    #[test]
    fn stats_table_lists_categories_then_aggregate() {
        let mut project = Project::new("Demo").expect("valid name");
        project.add_category("Test1").expect("new category");
        project.add_task(task("t", 90)).expect("valid add");
        project.add_category("Test2").expect("new category");

        let rows: Vec<String> = project.stats_table().iter().map(ToString::to_string).collect();
        assert_eq!(rows, vec!["Test1,1,90,90,90.0", "Test2,0,,,", "All Tasks,1,90,90,90.0"]);
    }

    #[test]
    fn invariant_holds_across_mixed_mutations() {
        let mut project = Project::new("Demo").expect("valid name");
        let names = ["Ops", "dev", "Research"];
        for (round, name) in names.iter().enumerate() {
            project.add_category(name).expect("new category");
            for i in 0..4 {
                let duration = u32::try_from(round * 10 + i + 1).expect("small");
                project.add_task(task(&format!("{name}-{i}"), duration)).expect("valid add");
            }
        }
        assert_consistent(&project);

        project.set_current_log(ALL_TASKS_NAME);
        project.remove_task(5).expect("in range");
        project.remove_task(0).expect("in range");
        assert_consistent(&project);

        project.set_current_log("dev");
        project.remove_task(0).expect("in range");
        project.remove_current_category().expect("category current");
        assert_consistent(&project);

        project.set_current_log("Research");
        project.add_task(task("late", 7)).expect("valid add");
        assert_consistent(&project);
        assert_eq!(project.all_tasks().task_count(), 8);
    }
}
