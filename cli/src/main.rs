use std::{path::PathBuf, process::ExitCode};

use clap::Parser;

/// Moves the inline DataTable props of the admin portal components onto the
/// shared `DataTableConfig` module.
#[derive(Debug, Parser, Clone)]
#[clap(version, author)]
pub struct CLIOpts {
    /// Project root. Components are looked up under `<root>/src/components`.
    #[clap(long, env = "SPREADPROPS_ROOT", default_value = ".")]
    pub root: PathBuf,
    /// Components directory, overriding the one derived from `--root` or the config file.
    #[clap(long, env = "SPREADPROPS_COMPONENTS_DIR")]
    pub components_dir: Option<PathBuf>,
    /// TOML file listing the components to rewrite.
    #[clap(long, env = "SPREADPROPS_CONFIG")]
    pub config: Option<PathBuf>,
    /// Component to rewrite, relative to the components directory. Repeatable;
    /// replaces the built-in list.
    #[clap(long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,
    /// Report what would change without writing anything.
    #[clap(long)]
    pub dry_run: bool,
    /// Log which rules changed each file.
    #[clap(short, long)]
    pub verbose: bool,
}

mod logging;
mod transform;

fn main() -> ExitCode {
    let opts = CLIOpts::parse();
    logging::init(opts.verbose);

    match transform::transform(&opts) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("✗ {error}");
            ExitCode::FAILURE
        }
    }
}
