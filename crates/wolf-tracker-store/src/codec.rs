//! Line-oriented project text format.
//!
//! ```text
//! ! <project name>
//! # <category name>
//! * <title>,<duration>,<category name>
//! <details, possibly several lines>
//! ```
//!
//! Decoding walks three phases: the header line, the category
//! declarations, then task records. A record runs from its `*` line up to
//! the next `*` line or the end of input.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wolf_tracker_core::{ALL_TASKS_NAME, LogRef, Project, Task, TaskLog};

use crate::error::FormatError;

/// First line of the statistics table.
pub const STATS_HEADER: &str = "Category,Count,Min,Max,Average";

const HEADER_MARKER: &str = "! ";
const CATEGORY_MARKER: &str = "# ";
const RECORD_MARKER: &str = "* ";

/// What to do with a task record that cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordPolicy {
    /// Log the problem and continue with the next record.
    #[default]
    Skip,
    /// Abort the whole decode.
    Fail,
}

/// Error policy for the task-record phase.
///
/// Header and category-declaration problems are always fatal; only task
/// records can be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodePolicy {
    /// Records with bad fields (missing comma, bad duration, empty details...).
    pub malformed_task: RecordPolicy,
    /// Records naming a category that was never declared.
    pub unknown_category: RecordPolicy,
}

impl DecodePolicy {
    /// Policy that rejects any bad record.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            malformed_task: RecordPolicy::Fail,
            unknown_category: RecordPolicy::Fail,
        }
    }

    const fn for_error(&self, err: &FormatError) -> RecordPolicy {
        match err {
            FormatError::UnknownCategory { .. } => self.unknown_category,
            FormatError::MalformedTask { .. } => self.malformed_task,
            _ => RecordPolicy::Fail,
        }
    }
}

/// Decode with the default (skipping) policy.
///
/// # Errors
/// Returns a [`FormatError`] for header or category problems.
pub fn decode(text: &str) -> Result<Project, FormatError> {
    decode_with(text, DecodePolicy::default())
}

/// Decode `text` into a project whose current log is the aggregate.
///
/// The returned project is marked unchanged.
///
/// # Errors
/// Header and category problems always fail; task record problems fail only
/// when `policy` says so.
pub fn decode_with(text: &str, policy: DecodePolicy) -> Result<Project, FormatError> {
    let mut decoder = Decoder::new(policy);
    for (index, line) in text.lines().enumerate() {
        decoder.feed(index + 1, line)?;
    }
    decoder.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Header,
    Categories,
    Tasks,
}

struct PendingRecord<'a> {
    line: usize,
    header: &'a str,
    details: Vec<&'a str>,
}

struct Decoder<'a> {
    policy: DecodePolicy,
    phase: Phase,
    project: Option<Project>,
    pending: Option<PendingRecord<'a>>,
    loaded: usize,
    skipped: usize,
}

impl<'a> Decoder<'a> {
    const fn new(policy: DecodePolicy) -> Self {
        Self {
            policy,
            phase: Phase::Header,
            project: None,
            pending: None,
            loaded: 0,
            skipped: 0,
        }
    }

    fn feed(&mut self, line_no: usize, line: &'a str) -> Result<(), FormatError> {
        match self.phase {
            Phase::Header => {
                let name = line
                    .strip_prefix(HEADER_MARKER)
                    .ok_or_else(|| FormatError::InvalidHeader(line.to_owned()))?;
                let project =
                    Project::new(name).map_err(|_| FormatError::InvalidHeader(line.to_owned()))?;
                self.project = Some(project);
                self.enter(Phase::Categories);
            }
            Phase::Categories if line.starts_with('#') => {
                self.declare_category(line_no, line)?;
            }
            Phase::Categories if line.starts_with('*') => {
                self.enter(Phase::Tasks);
                self.open_record(line_no, line);
            }
            Phase::Categories => {
                return Err(FormatError::UnexpectedLine {
                    line: line_no,
                    content: line.to_owned(),
                });
            }
            Phase::Tasks if line.starts_with('*') => {
                self.close_record()?;
                self.open_record(line_no, line);
            }
            Phase::Tasks => {
                if let Some(record) = self.pending.as_mut() {
                    record.details.push(line);
                }
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Project, FormatError> {
        self.close_record()?;
        let mut project = self.project.take().ok_or(FormatError::MissingHeader)?;
        project.set_current_log(ALL_TASKS_NAME);
        project.set_changed(false);
        debug!(
            project = project.name(),
            loaded = self.loaded,
            skipped = self.skipped,
            "Decoded project"
        );
        Ok(project)
    }

    fn enter(&mut self, phase: Phase) {
        debug!(from = ?self.phase, to = ?phase, "Decoder phase change");
        self.phase = phase;
    }

    fn declare_category(&mut self, line_no: usize, line: &str) -> Result<(), FormatError> {
        let project = self.project.as_mut().ok_or(FormatError::MissingHeader)?;
        let name = line
            .strip_prefix(CATEGORY_MARKER)
            .ok_or_else(|| FormatError::InvalidCategory {
                line: line_no,
                reason: "expected '# <name>'".to_owned(),
            })?;
        project
            .add_category(name)
            .map_err(|err| FormatError::invalid_category(line_no, &err))?;
        Ok(())
    }

    fn open_record(&mut self, line_no: usize, line: &'a str) {
        self.pending = Some(PendingRecord {
            line: line_no,
            header: line,
            details: Vec::new(),
        });
    }

    fn close_record(&mut self) -> Result<(), FormatError> {
        let Some(record) = self.pending.take() else {
            return Ok(());
        };
        let project = self.project.as_mut().ok_or(FormatError::MissingHeader)?;
        match load_record(project, &record) {
            Ok(()) => {
                self.loaded += 1;
                Ok(())
            }
            Err(err) => match self.policy.for_error(&err) {
                RecordPolicy::Skip => {
                    warn!(line = record.line, error = %err, "Skipping task record");
                    self.skipped += 1;
                    Ok(())
                }
                RecordPolicy::Fail => Err(err),
            },
        }
    }
}

fn load_record(project: &mut Project, record: &PendingRecord<'_>) -> Result<(), FormatError> {
    let line = record.line;
    let fields = record
        .header
        .strip_prefix(RECORD_MARKER)
        .ok_or_else(|| FormatError::malformed(line, "expected '* <title>,<duration>,<category>'"))?;
    let (title, rest) = fields
        .split_once(',')
        .ok_or_else(|| FormatError::malformed(line, "missing duration"))?;
    let (duration, category) = rest
        .split_once(',')
        .ok_or_else(|| FormatError::malformed(line, "missing category"))?;
    let duration: u32 = duration
        .parse()
        .map_err(|err| FormatError::malformed(line, format!("invalid duration {duration:?}: {err}")))?;
    let details = record.details.join("\n");
    let task = Task::new(title, duration, details).map_err(|err| FormatError::malformed(line, err))?;

    let target = project.resolve_log(category);
    if target == LogRef::AllTasks {
        return Err(FormatError::UnknownCategory {
            line,
            category: category.to_owned(),
        });
    }
    project
        .add_task_to(target, task)
        .map_err(|err| FormatError::malformed(line, err))?;
    Ok(())
}

/// Record form of a task: `* title,duration,category` then the details.
pub struct TaskRecord<'a> {
    task: &'a Task,
    category: &'a str,
}

impl<'a> TaskRecord<'a> {
    /// Pair `task` with the name of its category.
    #[must_use]
    pub const fn new(task: &'a Task, category: &'a str) -> Self {
        Self { task, category }
    }
}

impl fmt::Display for TaskRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{RECORD_MARKER}{},{},{}\n{}",
            self.task.title(),
            self.task.duration(),
            self.category,
            self.task.details()
        )
    }
}

/// Serialize `project`: header, categories in stored order, then every task
/// of the aggregate log. There is no newline after the last record.
#[must_use]
pub fn encode(project: &Project) -> String {
    let mut out = format!("{HEADER_MARKER}{}\n", project.name());
    for category in project.categories() {
        out.push_str(CATEGORY_MARKER);
        out.push_str(category.name());
        out.push('\n');
    }
    let records: Vec<String> = project
        .all_tasks()
        .entries()
        .iter()
        .filter_map(|id| project.task(*id).ok())
        .map(|task| TaskRecord::new(task, project.category_name_of(task)).to_string())
        .collect();
    out.push_str(&records.join("\n"));
    out
}

/// Statistics table: one row per category, then the aggregate.
#[must_use]
pub fn encode_stats(project: &Project) -> String {
    std::iter::once(STATS_HEADER.to_owned())
        .chain(project.stats_table().iter().map(ToString::to_string))
        .collect::<Vec<_>>()
        .join("\n")
}
