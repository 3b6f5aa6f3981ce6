//! The list of component files to rewrite, and the loop that rewrites them.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, instrument};

use crate::{
    error::{Error, Result},
    rewriter::{WriteMode, rewrite_file},
    rules::Pipeline,
};

/// Where the components live, relative to the project root.
pub const COMPONENTS_SUBDIR: &str = "src/components";

/// Components still carrying the inline DataTable props, in processing order.
pub const DEFAULT_FILES: [&str; 9] = [
    "TasksGrid.tsx",
    "ContactsManager.tsx",
    "IdentifiersManager.tsx",
    "M2MClientsManager.tsx",
    "EndpointManagement.tsx",
    "ReviewTasks.tsx",
    "KvkReviewQueue.tsx",
    "audit/AuditLogViewer.tsx",
    "users/UserManagement.tsx",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worklist {
    pub components_dir: PathBuf,
    /// Paths relative to `components_dir`.
    pub files: Vec<PathBuf>,
}

impl Worklist {
    pub fn new(
        components_dir: impl Into<PathBuf>,
        files: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> Self {
        Self {
            components_dir: components_dir.into(),
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_default_files(components_dir: impl Into<PathBuf>) -> Self {
        Self::new(components_dir, DEFAULT_FILES)
    }

    /// Default worklist under `<root>/src/components`.
    pub fn from_root(root: &Path) -> Self {
        Self::with_default_files(root.join(COMPONENTS_SUBDIR))
    }

    /// Rewrites every file in order. A missing or unreadable file is reported
    /// and skipped, the rest of the list still runs. `on_report` sees each
    /// report as soon as its file is done.
    #[instrument(level = "info", skip_all, fields(components_dir = %self.components_dir.display()))]
    pub fn run(
        &self,
        pipeline: &Pipeline,
        mode: WriteMode,
        mut on_report: impl FnMut(&FileReport),
    ) -> RunSummary {
        let mut reports = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let path = self.components_dir.join(file);
            let report = if !path.exists() {
                FileReport::NotFound { path }
            } else {
                match rewrite_file(&path, pipeline, mode) {
                    Ok(outcome) if outcome.changed && mode == WriteMode::DryRun => {
                        FileReport::WouldUpdate { path }
                    }
                    Ok(outcome) if outcome.changed => FileReport::Updated { path },
                    Ok(_) => FileReport::Unchanged { path },
                    Err(error) => FileReport::Failed { path, error },
                }
            };
            on_report(&report);
            reports.push(report);
        }
        let summary = RunSummary::new(reports, mode);
        info!(
            updated = summary.updated,
            total = summary.total,
            "worklist done"
        );
        summary
    }
}

/// What happened to one worklist entry.
#[derive(Debug)]
pub enum FileReport {
    Updated { path: PathBuf },
    /// Dry run: the file would have been rewritten.
    WouldUpdate { path: PathBuf },
    Unchanged { path: PathBuf },
    NotFound { path: PathBuf },
    Failed { path: PathBuf, error: Error },
}

impl FileReport {
    pub fn path(&self) -> &Path {
        match self {
            FileReport::Updated { path }
            | FileReport::WouldUpdate { path }
            | FileReport::Unchanged { path }
            | FileReport::NotFound { path }
            | FileReport::Failed { path, .. } => path,
        }
    }

    pub fn is_updated(&self) -> bool {
        matches!(
            self,
            FileReport::Updated { .. } | FileReport::WouldUpdate { .. }
        )
    }
}

fn file_name(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy())
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path();
        match self {
            FileReport::Updated { .. } => write!(f, "✓ Updated {}", file_name(path)),
            FileReport::WouldUpdate { .. } => write!(f, "✓ Would update {}", file_name(path)),
            FileReport::Unchanged { .. } => {
                write!(f, "- No changes needed for {}", file_name(path))
            }
            FileReport::NotFound { .. } => write!(f, "✗ File not found: {}", path.display()),
            FileReport::Failed { error, .. } => {
                write!(f, "✗ Failed to update {}: {error}", path.display())
            }
        }
    }
}

#[derive(Debug)]
pub struct RunSummary {
    pub reports: Vec<FileReport>,
    /// Files rewritten, or that would have been in a dry run.
    pub updated: usize,
    pub total: usize,
    pub mode: WriteMode,
}

impl RunSummary {
    fn new(reports: Vec<FileReport>, mode: WriteMode) -> Self {
        let updated = reports.iter().filter(|report| report.is_updated()).count();
        let total = reports.len();
        Self {
            reports,
            updated,
            total,
            mode,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            WriteMode::Write => write!(f, "✓ Updated {} files", self.updated),
            WriteMode::DryRun => write!(
                f,
                "✓ Would update {} files (dry run, nothing written)",
                self.updated
            ),
        }
    }
}

/// Worklist read from a TOML file:
///
/// ```toml
/// components_dir = "src/components"
/// files = ["TasksGrid.tsx", "users/UserManagement.tsx"]
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WorklistConfig {
    /// Relative paths are taken from the config file's directory.
    pub components_dir: Option<PathBuf>,
    /// Left out, the built-in [`DEFAULT_FILES`] are used. An explicit empty
    /// list means there is nothing to rewrite.
    pub files: Option<Vec<PathBuf>>,
}

impl WorklistConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        let mut config: Self = toml::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: path.to_owned(),
            source,
        })?;
        if let Some(base) = path.parent() {
            config.components_dir = config
                .components_dir
                .map(|dir| if dir.is_relative() { base.join(dir) } else { dir });
        }
        Ok(config)
    }

    /// Falls back to `default_components_dir` and [`DEFAULT_FILES`] for
    /// whatever the file leaves out.
    pub fn into_worklist(self, default_components_dir: PathBuf) -> Worklist {
        let components_dir = self.components_dir.unwrap_or(default_components_dir);
        match self.files {
            Some(files) => Worklist::new(components_dir, files),
            None => Worklist::with_default_files(components_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_worklist_under_root() {
        let worklist = Worklist::from_root(Path::new("/srv/admin-portal"));
        assert_eq!(
            worklist.components_dir,
            PathBuf::from("/srv/admin-portal/src/components")
        );
        assert_eq!(worklist.files.len(), 9);
        assert_eq!(worklist.files[0], PathBuf::from("TasksGrid.tsx"));
        assert_eq!(
            worklist.files.last(),
            Some(&PathBuf::from("users/UserManagement.tsx"))
        );
    }

    #[test]
    fn report_lines() {
        let dir = PathBuf::from("src/components");
        assert_eq!(
            FileReport::Updated {
                path: dir.join("users/UserManagement.tsx")
            }
            .to_string(),
            "✓ Updated UserManagement.tsx"
        );
        assert_eq!(
            FileReport::Unchanged {
                path: dir.join("TasksGrid.tsx")
            }
            .to_string(),
            "- No changes needed for TasksGrid.tsx"
        );
        assert_eq!(
            FileReport::NotFound {
                path: dir.join("audit/AuditLogViewer.tsx")
            }
            .to_string(),
            "✗ File not found: src/components/audit/AuditLogViewer.tsx"
        );
    }

    #[test]
    fn summary_counts_only_updated() {
        let summary = RunSummary::new(vec![
            FileReport::Updated {
                path: "a.tsx".into(),
            },
            FileReport::Unchanged {
                path: "b.tsx".into(),
            },
            FileReport::NotFound {
                path: "c.tsx".into(),
            },
        ], WriteMode::Write);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.to_string(), "✓ Updated 1 files");
    }

    #[test]
    fn config_fills_in_defaults() {
        let config: WorklistConfig = toml::from_str("").unwrap();
        assert_eq!(config, WorklistConfig::default());
        let worklist = config.into_worklist(PathBuf::from("src/components"));
        assert_eq!(worklist, Worklist::with_default_files("src/components"));
    }

    #[test]
    fn config_overrides_files() {
        let config: WorklistConfig = toml::from_str(
            r#"
            components_dir = "/tmp/components"
            files = ["Only.tsx"]
            "#,
        )
        .unwrap();
        let worklist = config.into_worklist(PathBuf::from("unused"));
        assert_eq!(worklist, Worklist::new("/tmp/components", ["Only.tsx"]));
    }

    #[test]
    fn dry_run_lines_say_nothing_was_written() {
        let report = FileReport::WouldUpdate {
            path: PathBuf::from("src/components/audit/AuditLogViewer.tsx"),
        };
        assert_eq!(report.to_string(), "✓ Would update AuditLogViewer.tsx");
        assert_eq!(
            report.path(),
            Path::new("src/components/audit/AuditLogViewer.tsx")
        );

        let summary = RunSummary::new(vec![report], WriteMode::DryRun);
        assert_eq!(summary.updated, 1);
        assert_eq!(
            summary.to_string(),
            "✓ Would update 1 files (dry run, nothing written)"
        );
    }

    #[test]
    fn config_with_empty_file_list_has_nothing_to_do() {
        let config: WorklistConfig = toml::from_str("files = []").unwrap();
        let worklist = config.into_worklist(PathBuf::from("src/components"));
        assert!(worklist.files.is_empty());
        let summary = worklist.run(&Pipeline::standard(), WriteMode::Write, |_| {});
        assert_eq!(summary.total, 0);
    }

    #[test]
    fn config_rejects_unknown_keys() {
        assert!(toml::from_str::<WorklistConfig>("file = [\"a.tsx\"]").is_err());
    }

    #[test]
    fn config_dir_is_relative_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spreadprops.toml");
        fs::write(&path, "components_dir = \"web/src/components\"\n").unwrap();

        let config = WorklistConfig::load(&path).unwrap();

        assert_eq!(
            config.components_dir,
            Some(dir.path().join("web/src/components"))
        );
    }

    #[test]
    fn config_parse_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spreadprops.toml");
        fs::write(&path, "files = 3\n").unwrap();

        let err = WorklistConfig::load(&path).unwrap_err();

        assert!(matches!(&err, Error::ConfigParse { path: p, .. } if *p == path));
        assert!(err.to_string().starts_with("invalid worklist config"));
    }
}
