use anyhow::{Context, Result};
use tracing::info;
use wolf_tracker_core::{Project, TaskLog};
use wolf_tracker_store::{ProjectStore, resolve_path};

use std::path::{Path, PathBuf};

use crate::config::TrackerConfig;

/// Service façade that owns the open project and every file side effect.
pub struct ProjectService<S> {
    store: S,
    config: TrackerConfig,
    base_dir: PathBuf,
    project: Project,
}

impl<S> ProjectService<S> {
    /// The open project.
    pub const fn project(&self) -> &Project {
        &self.project
    }

    /// Mutable access to the open project; edits mark it changed.
    pub const fn project_mut(&mut self) -> &mut Project {
        &mut self.project
    }

    /// Configuration the service was built with.
    pub const fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Give up the service and keep the project.
    pub fn into_project(self) -> Project {
        self.project
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        resolve_path(&self.base_dir, path)
    }
}

impl<S: ProjectStore> ProjectService<S> {
    /// Start from a new, empty project.
    ///
    /// # Errors
    /// Returns an error if `name` is empty or reserved.
    pub fn create(store: S, config: TrackerConfig, base_dir: impl Into<PathBuf>, name: &str) -> Result<Self> {
        let project = Project::new(name).with_context(|| format!("Unable to create project {name:?}"))?;
        Ok(Self {
            store,
            config,
            base_dir: base_dir.into(),
            project,
        })
    }

    /// Open the project stored at `path`, relative paths resolving against
    /// `base_dir`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or its header or category
    /// declarations are invalid.
    pub fn open(
        store: S,
        config: TrackerConfig,
        base_dir: impl Into<PathBuf>,
        path: impl AsRef<Path>,
    ) -> Result<Self> {
        let base_dir = base_dir.into();
        let project = load(&store, &config, &resolve_path(&base_dir, path.as_ref()))?;
        Ok(Self {
            store,
            config,
            base_dir,
            project,
        })
    }

    /// Replace the open project with the one stored at `path`.
    ///
    /// The current project is kept if loading fails.
    ///
    /// # Errors
    /// Same as [`open`](Self::open).
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = self.resolve(path.as_ref());
        self.project = load(&self.store, &self.config, &path)?;
        Ok(())
    }

    /// Write the project file and mark the project unchanged.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written; the project then stays
    /// marked changed.
    pub fn save_project(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = self.resolve(path.as_ref());
        self.store
            .save_project(&path, &self.project)
            .with_context(|| format!("Unable to save project {}", self.project.name()))?;
        self.project.set_changed(false);
        info!(
            path = %path.display(),
            project = self.project.name(),
            tasks = self.project.all_tasks().task_count(),
            "Saved project"
        );
        Ok(())
    }

    /// Write the statistics table. The changed flag is not touched.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save_stats(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = self.resolve(path.as_ref());
        self.store
            .save_stats(&path, &self.project)
            .with_context(|| format!("Unable to save statistics of {}", self.project.name()))?;
        info!(path = %path.display(), project = self.project.name(), "Saved statistics");
        Ok(())
    }
}

fn load<S: ProjectStore>(store: &S, config: &TrackerConfig, path: &Path) -> Result<Project> {
    let project = store
        .load_project(path, config.decode)
        .with_context(|| format!("Unable to open project {}", path.display()))?;
    info!(
        path = %path.display(),
        project = project.name(),
        categories = project.categories().count(),
        tasks = project.all_tasks().task_count(),
        "Loaded project"
    );
    Ok(project)
}
