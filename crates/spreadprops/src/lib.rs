//! Codemod that moves the repeated `<DataTable>` prop block of the admin
//! portal components onto the shared `DataTableConfig` module.

pub mod error;
pub mod import_path;
pub mod rewriter;
pub mod rules;
pub mod worklist;

pub use error::{Error, Result};
pub use rewriter::{FileOutcome, WriteMode, rewrite_file};
pub use rules::{Pipeline, Rewrite, RuleContext};
pub use worklist::{FileReport, RunSummary, Worklist, WorklistConfig};
