use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use crate::parse::words;
use crate::types::{intern, Bindings, Expr, ParsedRule, Rule, RuleError, Symbol};

/// Marks the start of order-only prerequisites.
const ORDER_ONLY_MARKER: &str = "|";

/// Filesystem wildcard expansion.
pub trait Glob: fmt::Debug {
    /// Names matching `pattern`, or nothing if there are none.
    fn expand(&self, pattern: &str) -> Vec<String>;
}

/// [`Glob`] over the real filesystem, with results cached per pattern.
#[derive(Debug, Default)]
pub struct FsGlob {
    cache: RefCell<HashMap<String, Vec<String>>>,
}

impl FsGlob {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget cached results, e.g. after files were created.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }
}

/// Wildcards never match a leading `.`, as with POSIX `glob(3)`.
const GLOB_OPTIONS: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

fn has_wildcard(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

impl Glob for FsGlob {
    fn expand(&self, pattern: &str) -> Vec<String> {
        if !has_wildcard(pattern) {
            return Vec::new();
        }
        if let Some(found) = self.cache.borrow().get(pattern) {
            return found.clone();
        }
        let found: Vec<String> = match glob::glob_with(pattern, GLOB_OPTIONS) {
            Ok(paths) => paths
                .filter_map(Result::ok)
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
            Err(err) => {
                tracing::debug!(pattern, error = %err, "invalid glob pattern");
                Vec::new()
            }
        };
        tracing::trace!(pattern, matches = found.len(), "glob");
        self.cache
            .borrow_mut()
            .insert(pattern.to_owned(), found.clone());
        found
    }
}

/// Whether prerequisite tokens are globbed while tokenizing.
#[derive(Debug, Clone, Copy)]
pub enum Expansion<'g> {
    Eager(&'g dyn Glob),
    /// Keep every token literal, for exports to a toolchain that expands
    /// wildcards itself.
    Suppressed,
}

/// Prerequisites split at the order-only marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
    pub normal: Vec<Symbol>,
    pub order_only: Vec<Symbol>,
}

/// Strip any number of leading `./`.
pub(crate) fn trim_leading_curdir(mut s: &str) -> &str {
    while let Some(rest) = s.strip_prefix("./") {
        s = rest;
    }
    s
}

/// Tokenize prerequisite text into interned inputs.
///
/// Tokens after the first `|` are order-only. Each other token is globbed
/// under [`Expansion::Eager`]; a token with no matches is kept as written.
#[must_use]
pub fn tokenize_inputs(text: &str, expansion: Expansion<'_>) -> Inputs {
    let mut inputs = Inputs::default();
    let mut is_order_only = false;
    for token in words(text) {
        if token == ORDER_ONLY_MARKER {
            is_order_only = true;
            continue;
        }
        let files = match expansion {
            Expansion::Eager(glob) => glob.expand(token),
            Expansion::Suppressed => Vec::new(),
        };
        let dest = if is_order_only {
            &mut inputs.order_only
        } else {
            &mut inputs.normal
        };
        if files.is_empty() {
            dest.push(intern(trim_leading_curdir(token)));
        } else {
            dest.extend(files.iter().map(|f| intern(trim_leading_curdir(f))));
        }
    }
    inputs
}

pub(crate) fn parse_inputs(
    rule: Rule,
    vars: &dyn Bindings,
    expansion: Expansion<'_>,
) -> Result<ParsedRule, RuleError> {
    let mut text = rule.prereq_string;
    if rule.second_expansion {
        let expr = Expr::parse(&text).map_err(|source| RuleError::Expr {
            loc: rule.loc.clone(),
            source,
        })?;
        text = expr.eval(vars);
        tracing::debug!(loc = %rule.loc, expanded = %text, "second expansion");
    }
    let inputs = tokenize_inputs(&text, expansion);
    Ok(ParsedRule {
        outputs: rule.outputs,
        inputs: inputs.normal,
        order_only_inputs: inputs.order_only,
        output_patterns: rule.output_patterns,
        validations: rule.validations,
        is_double_colon: rule.is_double_colon,
        is_suffix_rule: rule.is_suffix_rule,
        cmds: rule.cmds,
        loc: rule.loc,
        cmd_lineno: rule.cmd_lineno,
    })
}
