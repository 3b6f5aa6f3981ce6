use std::{fs, path::Path};

use tracing::{debug, instrument, warn};

use crate::{
    error::{Error, Result},
    rules::{Pipeline, Rewrite, RuleContext},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Write,
    /// Compute the rewrite but leave the file on disk as it is.
    DryRun,
}

#[derive(Debug)]
pub struct FileOutcome {
    /// Whether the file was (or, in a dry run, would have been) overwritten.
    pub changed: bool,
    pub rewrite: Rewrite,
}

/// Runs `pipeline` over the file at `path` and overwrites it if the content
/// changed. An unchanged file is never opened for writing.
#[instrument(level = "debug", skip_all, fields(path = %path.display(), mode = ?mode))]
pub fn rewrite_file(path: &Path, pipeline: &Pipeline, mode: WriteMode) -> Result<FileOutcome> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })?;

    let rewrite = pipeline.rewrite(&content, &RuleContext::new(path));
    for warning in &rewrite.warnings {
        warn!(path = %path.display(), "{warning}");
    }

    let changed = rewrite.changed();
    if changed {
        debug!(rules = %rewrite.applied_rules(), "content changed");
        if mode == WriteMode::Write {
            fs::write(path, &rewrite.content).map_err(|source| Error::Write {
                path: path.to_owned(),
                source,
            })?;
        }
    }
    Ok(FileOutcome { changed, rewrite })
}
