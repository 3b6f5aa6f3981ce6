//! Text rules applied to a component's source, in order.
//!
//! Every rule works on the whole file content and on the output of the rule
//! before it. None of them parse the source: they only recognise the exact
//! prop layouts used by the admin portal components.

use std::{fmt, path::Path, sync::OnceLock};

use itertools::Itertools;
use regex::{NoExpand, Regex};

use crate::import_path::{SHARED_CONFIG_IMPORT_PATHS, shared_config_import_path};

/// Replacement for the inline prop block. The trailing indentation keeps the
/// next prop aligned.
pub const SPREAD_PROPS: &str = "<DataTable\n            {...defaultDataTableProps}\n            ";

pub const PAGINATION_LITERAL: &str = "recordsPerPageOptions={[10, 20, 50, 100]}";
pub const PAGINATION_SPREAD: &str = "recordsPerPageOptions={[...defaultPaginationOptions]}";

fn import_statement_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"(import .+ from .+;)\n").expect("Invalid import regex"))
}

fn inline_props_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"<DataTable\s+withTableBorder\s+withColumnBorders\s+striped\s+highlightOnHover\s+")
            .expect("Invalid inline props regex")
    })
}

fn stacked_props_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(
            r"<DataTable\n\s+withTableBorder\n\s+withColumnBorders\n\s+striped\n\s+highlightOnHover\n\s+",
        )
        .expect("Invalid stacked props regex")
    })
}

/// What a rule may know about the file it rewrites.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub path: &'a Path,
}

impl<'a> RuleContext<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }
}

/// Something a rule noticed but could not act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The shared config import is missing, but there is no import statement
    /// to anchor the new one after.
    MissingImportAnchor,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingImportAnchor => {
                f.write_str("no import statement found, shared config import not added")
            }
        }
    }
}

/// Output of a single rule.
#[derive(Debug)]
pub struct Applied {
    pub content: String,
    pub warning: Option<Warning>,
}

impl Applied {
    fn clean(content: String) -> Self {
        Self { content, warning: None }
    }
}

pub trait Rule {
    fn name(&self) -> &'static str;

    fn apply(&self, content: &str, ctx: &RuleContext<'_>) -> Applied;
}

/// Adds `import { defaultDataTableProps, defaultPaginationOptions }` after
/// the last import statement, unless the shared config is already imported.
#[derive(Debug, Default)]
pub struct ImportInjection;

impl ImportInjection {
    fn already_imported(content: &str) -> bool {
        SHARED_CONFIG_IMPORT_PATHS
            .iter()
            .any(|path| content.contains(&format!("from '{path}'")))
    }
}

impl Rule for ImportInjection {
    fn name(&self) -> &'static str {
        "import-injection"
    }

    fn apply(&self, content: &str, ctx: &RuleContext<'_>) -> Applied {
        if Self::already_imported(content) {
            return Applied::clean(content.to_owned());
        }
        let Some(last_import) = import_statement_re().find_iter(content).last() else {
            return Applied {
                content: content.to_owned(),
                warning: Some(Warning::MissingImportAnchor),
            };
        };
        let import_path = shared_config_import_path(ctx.path);
        let (head, tail) = content.split_at(last_import.end());
        Applied::clean(format!(
            "{head}import {{ defaultDataTableProps, defaultPaginationOptions }} from '{import_path}';\n{tail}"
        ))
    }
}

/// Replaces the four boolean DataTable props with a spread of
/// `defaultDataTableProps`.
#[derive(Debug)]
pub struct PropBlockSpread {
    name: &'static str,
    pattern: &'static Regex,
}

impl PropBlockSpread {
    /// Props separated by any whitespace: `<DataTable withTableBorder withColumnBorders ...`.
    pub fn inline() -> Self {
        Self {
            name: "prop-block-inline",
            pattern: inline_props_re(),
        }
    }

    /// One prop per indented line.
    pub fn stacked() -> Self {
        Self {
            name: "prop-block-stacked",
            pattern: stacked_props_re(),
        }
    }
}

impl Rule for PropBlockSpread {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, content: &str, _ctx: &RuleContext<'_>) -> Applied {
        Applied::clean(
            self.pattern
                .replace_all(content, NoExpand(SPREAD_PROPS))
                .into_owned(),
        )
    }
}

/// Exact substring replacement.
#[derive(Debug)]
pub struct LiteralReplace {
    name: &'static str,
    from: &'static str,
    to: &'static str,
}

impl LiteralReplace {
    /// `recordsPerPageOptions={[10, 20, 50, 100]}` becomes a spread of
    /// `defaultPaginationOptions`.
    pub fn pagination_options() -> Self {
        Self {
            name: "pagination-options",
            from: PAGINATION_LITERAL,
            to: PAGINATION_SPREAD,
        }
    }
}

impl Rule for LiteralReplace {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, content: &str, _ctx: &RuleContext<'_>) -> Applied {
        Applied::clean(content.replace(self.from, self.to))
    }
}

/// Result of running a [`Pipeline`] over one file's content.
#[derive(Debug)]
pub struct Rewrite {
    pub original: String,
    pub content: String,
    /// Rules that changed the content, in the order they ran.
    pub applied: Vec<&'static str>,
    pub warnings: Vec<Warning>,
}

impl Rewrite {
    pub fn changed(&self) -> bool {
        self.content != self.original
    }

    pub fn applied_rules(&self) -> String {
        self.applied.iter().join(", ")
    }
}

/// Ordered list of rules.
pub struct Pipeline {
    rules: Vec<Box<dyn Rule>>,
}

impl Pipeline {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Import first, then both prop block layouts, then pagination options.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(ImportInjection),
            Box::new(PropBlockSpread::inline()),
            Box::new(PropBlockSpread::stacked()),
            Box::new(LiteralReplace::pagination_options()),
        ])
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Rules only ever see `\n` line endings. When a rule fires on a CRLF
    /// file, the result is written back with CRLF endings throughout; when
    /// none fires, the original text is kept byte for byte.
    pub fn rewrite(&self, content: &str, ctx: &RuleContext<'_>) -> Rewrite {
        let crlf = content.contains("\r\n");
        let mut current = if crlf {
            content.replace("\r\n", "\n")
        } else {
            content.to_owned()
        };
        let mut applied = Vec::new();
        let mut warnings = Vec::new();
        for rule in &self.rules {
            let Applied {
                content: next,
                warning,
            } = rule.apply(&current, ctx);
            if next != current {
                applied.push(rule.name());
                current = next;
            }
            warnings.extend(warning);
        }
        if applied.is_empty() {
            current = content.to_owned();
        } else if crlf {
            current = current.replace('\n', "\r\n");
        }
        Rewrite {
            original: content.to_owned(),
            content: current,
            applied,
            warnings,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("rules", &self.rule_names())
            .finish()
    }
}
