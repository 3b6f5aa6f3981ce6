use spreadprops::{
    Pipeline, RunSummary, Worklist, WorklistConfig, WriteMode, worklist::COMPONENTS_SUBDIR,
};
use tracing_attributes::instrument;

use crate::CLIOpts;

/// Command line flags win over the config file, which wins over the
/// built-in worklist.
pub fn build_worklist(opts: &CLIOpts) -> spreadprops::Result<Worklist> {
    let default_dir = opts.root.join(COMPONENTS_SUBDIR);
    let mut worklist = match &opts.config {
        Some(path) => WorklistConfig::load(path)?.into_worklist(default_dir),
        None => Worklist::with_default_files(default_dir),
    };
    if let Some(dir) = &opts.components_dir {
        worklist.components_dir = dir.clone();
    }
    if !opts.files.is_empty() {
        worklist.files = opts.files.clone();
    }
    Ok(worklist)
}

#[instrument(level = "debug", skip_all)]
pub fn transform(opts: &CLIOpts) -> spreadprops::Result<RunSummary> {
    let worklist = build_worklist(opts)?;
    let mode = if opts.dry_run {
        WriteMode::DryRun
    } else {
        WriteMode::Write
    };
    let summary = worklist.run(&Pipeline::standard(), mode, |report| println!("{report}"));
    println!();
    println!("{summary}");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use pretty_assertions::assert_eq;
    use spreadprops::worklist::DEFAULT_FILES;

    use super::*;

    fn opts(args: &[&str]) -> CLIOpts {
        CLIOpts::try_parse_from(std::iter::once("spreadprops").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_to_built_in_worklist() {
        let worklist = build_worklist(&opts(&["--root", "/srv/portal"])).unwrap();
        assert_eq!(
            worklist,
            Worklist::with_default_files("/srv/portal/src/components")
        );
    }

    #[test]
    fn flags_override_worklist() {
        let worklist = build_worklist(&opts(&[
            "--components-dir",
            "/tmp/components",
            "--file",
            "A.tsx",
            "--file",
            "nested/B.tsx",
        ]))
        .unwrap();
        assert_eq!(
            worklist,
            Worklist::new("/tmp/components", ["A.tsx", "nested/B.tsx"])
        );
    }

    #[test]
    fn config_file_feeds_worklist() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("spreadprops.toml");
        std::fs::write(&config, "files = [\"Only.tsx\"]\n").unwrap();

        let worklist =
            build_worklist(&opts(&["--root", "/srv/portal", "--config", config.to_str().unwrap()]))
                .unwrap();

        assert_eq!(
            worklist,
            Worklist::new("/srv/portal/src/components", ["Only.tsx"])
        );
        assert_ne!(worklist.files.len(), DEFAULT_FILES.len());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let result = build_worklist(&opts(&["--config", "/nonexistent/spreadprops.toml"]));
        assert!(matches!(
            result,
            Err(spreadprops::Error::ConfigRead { path, .. }) if path == PathBuf::from("/nonexistent/spreadprops.toml")
        ));
    }
}
