use super::{Bindings, Diagnostics, ExprArena, ExprId, Loc, Pattern, RuleError, Symbol};
use crate::inputs::Expansion;
use crate::render::RuleDisplay;

/// A rule as declared in a build file, before its prerequisites are resolved.
///
/// The statement grammar creates one as soon as it recognises an output list,
/// fills in `outputs` and the flags, then calls
/// [`parse_prerequisites()`](Self::parse_prerequisites) once. Pattern rules may
/// be [`instantiate`](Self::instantiate)d into several sibling rules; each rule
/// is finally turned into a [`ParsedRule`] by
/// [`parse_inputs()`](Self::parse_inputs).
#[derive(Debug, Clone, Default)]
pub struct Rule {
    pub outputs: Vec<Symbol>,
    /// The target pattern of a static pattern rule (or of an implicit rule,
    /// when the grammar records it here). At most one entry.
    pub output_patterns: Vec<Symbol>,
    /// Extra prerequisites that take no part in pattern matching. Passed
    /// through untouched.
    pub validations: Vec<Symbol>,
    pub is_double_colon: bool,
    pub is_suffix_rule: bool,
    /// Expand `prereq_string` against the evaluation context before
    /// tokenizing it.
    pub second_expansion: bool,
    pub cmds: Vec<ExprId>,
    pub loc: Loc,
    pub cmd_lineno: u32,
    /// Unparsed prerequisite text.
    pub prereq_string: String,
}

/// A rule whose prerequisites have been tokenized into symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParsedRule {
    pub outputs: Vec<Symbol>,
    pub inputs: Vec<Symbol>,
    pub order_only_inputs: Vec<Symbol>,
    pub output_patterns: Vec<Symbol>,
    pub validations: Vec<Symbol>,
    pub is_double_colon: bool,
    pub is_suffix_rule: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub cmds: Vec<ExprId>,
    pub loc: Loc,
    pub cmd_lineno: u32,
}

/// Where the statement grammar saw a `;` in the prerequisite text, and
/// whether it already dealt with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separator {
    /// Byte offset of the separator in the prerequisite text.
    pub pos: usize,
    pub kind: SeparatorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorKind {
    /// The `;` at `pos` starts an inline command to be split off here.
    InlineCommand,
    /// The statement was already recognised as a semicolon form; the
    /// position must not be reinterpreted.
    SemicolonForm,
}

impl Separator {
    #[must_use]
    pub fn inline_command(pos: usize) -> Self {
        Self {
            pos,
            kind: SeparatorKind::InlineCommand,
        }
    }

    #[must_use]
    pub fn semicolon_form(pos: usize) -> Self {
        Self {
            pos,
            kind: SeparatorKind::SemicolonForm,
        }
    }
}

/// How [`Rule::parse_prerequisites`] classified the prerequisite text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrereqForm {
    /// A plain prerequisite list.
    Simple,
    /// `target-pattern : prereq-patterns`.
    StaticPattern,
    /// A static pattern clause on a rule with no outputs. Only the inline
    /// command was kept; the rule yields no edges.
    EmptyStaticPattern,
}

impl Rule {
    #[must_use]
    pub fn new(loc: Loc) -> Self {
        Self {
            loc,
            ..Self::default()
        }
    }

    /// Whether an output list names pattern targets.
    #[must_use]
    pub fn is_pattern_rule(target_string: &str) -> bool {
        target_string.contains('%')
    }

    /// Location of the command block.
    #[must_use]
    pub fn cmd_loc(&self) -> Loc {
        self.loc.with_line(self.cmd_lineno)
    }

    /// Split an inline command off `line` and detect a static pattern clause.
    ///
    /// `line` is either `prerequisites [; command]` or
    /// `target-pattern : prereq-patterns [; command]`. Non-fatal warnings go
    /// to `diags`; the inline command, if any, is stored in `arena`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] when a static pattern clause is malformed or is
    /// mixed with an implicit pattern rule.
    pub fn parse_prerequisites(
        &mut self,
        line: &str,
        separator: Option<Separator>,
        arena: &mut ExprArena,
        diags: &mut Diagnostics,
    ) -> Result<PrereqForm, RuleError> {
        crate::prereq::parse_prerequisites(self, line, separator, arena, diags)
    }

    /// Clone this template for one concrete output matched by `pattern`,
    /// substituting the stem into the prerequisite text.
    ///
    /// Commands are shared with the template, not copied.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::PatternMismatch`] if `pattern` does not match
    /// `output`.
    pub fn instantiate(&self, pattern: &Pattern, output: Symbol) -> Result<Rule, RuleError> {
        crate::instantiate::instantiate(self, pattern, output)
    }

    /// Tokenize the prerequisite text into normal and order-only inputs,
    /// expanding it against `vars` first when `second_expansion` is set.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::Expr`] if second expansion meets an unterminated
    /// variable reference.
    pub fn parse_inputs(
        self,
        vars: &dyn Bindings,
        expansion: Expansion<'_>,
    ) -> Result<ParsedRule, RuleError> {
        crate::inputs::parse_inputs(self, vars, expansion)
    }

    /// Render the one-line summary used in logs and test fixtures.
    /// Inputs are not known yet and render as `inputs=[]`.
    #[must_use]
    pub fn display<'a>(&'a self, arena: &'a ExprArena) -> RuleDisplay<'a> {
        RuleDisplay {
            outputs: &self.outputs,
            inputs: &[],
            order_only_inputs: &[],
            output_patterns: &self.output_patterns,
            is_double_colon: self.is_double_colon,
            is_suffix_rule: self.is_suffix_rule,
            cmds: &self.cmds,
            arena,
        }
    }
}

impl ParsedRule {
    #[must_use]
    pub fn cmd_loc(&self) -> Loc {
        self.loc.with_line(self.cmd_lineno)
    }

    /// Pair the rule with its command sources for serialisation.
    ///
    /// `ParsedRule` alone serialises without `cmds`: the handles only mean
    /// something next to the arena that owns the expressions.
    #[cfg(feature = "serde")]
    #[must_use]
    pub fn export<'a>(&'a self, arena: &'a ExprArena) -> RuleExport<'a> {
        RuleExport {
            rule: self,
            cmds: self
                .cmds
                .iter()
                .filter_map(|&id| arena.get(id))
                .map(super::Expr::source)
                .collect(),
        }
    }

    /// Render the one-line summary used in logs and test fixtures.
    #[must_use]
    pub fn display<'a>(&'a self, arena: &'a ExprArena) -> RuleDisplay<'a> {
        RuleDisplay {
            outputs: &self.outputs,
            inputs: &self.inputs,
            order_only_inputs: &self.order_only_inputs,
            output_patterns: &self.output_patterns,
            is_double_colon: self.is_double_colon,
            is_suffix_rule: self.is_suffix_rule,
            cmds: &self.cmds,
            arena,
        }
    }
}

/// A [`ParsedRule`] with its commands written out as source text.
#[cfg(feature = "serde")]
#[derive(Debug, serde::Serialize)]
pub struct RuleExport<'a> {
    #[serde(flatten)]
    rule: &'a ParsedRule,
    cmds: Vec<&'a str>,
}

/// A rule whose inputs are resolved on first use.
///
/// Tokenization can touch the filesystem, so it runs at most once: later
/// calls to [`resolve()`](Self::resolve) return the stored result.
#[derive(Debug, Clone)]
pub struct LazyRule {
    rule: Rule,
    parsed: Option<ParsedRule>,
}

impl LazyRule {
    /// The rule as declared, before resolution.
    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.parsed.is_some()
    }

    #[must_use]
    pub fn as_parsed(&self) -> Option<&ParsedRule> {
        self.parsed.as_ref()
    }

    /// Resolve the inputs if that has not happened yet.
    ///
    /// # Errors
    ///
    /// Returns the [`RuleError`] from [`Rule::parse_inputs`]; the rule stays
    /// unparsed in that case.
    pub fn resolve(
        &mut self,
        vars: &dyn Bindings,
        expansion: Expansion<'_>,
    ) -> Result<&ParsedRule, RuleError> {
        let parsed = match self.parsed.take() {
            Some(parsed) => parsed,
            None => self.rule.clone().parse_inputs(vars, expansion)?,
        };
        Ok(&*self.parsed.insert(parsed))
    }
}

impl From<Rule> for LazyRule {
    fn from(rule: Rule) -> Self {
        Self { rule, parsed: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{intern, Vars};

    #[test]
    fn new_rule_is_empty() {
        let rule = Rule::new(Loc::new("Makefile", 1));
        assert!(rule.outputs.is_empty());
        assert!(rule.cmds.is_empty());
        assert!(rule.prereq_string.is_empty());
        assert!(!rule.is_double_colon);
        assert_eq!(rule.cmd_lineno, 0);
    }

    #[test]
    fn pattern_rule_detection() {
        assert!(Rule::is_pattern_rule("%.o"));
        assert!(Rule::is_pattern_rule("a.o %.o"));
        assert!(!Rule::is_pattern_rule("a.o b.o"));
    }

    #[test]
    fn cmd_loc_uses_cmd_lineno() {
        let mut rule = Rule::new(Loc::new("build.mk", 10));
        rule.cmd_lineno = 11;
        assert_eq!(rule.cmd_loc(), Loc::new("build.mk", 11));
    }

    #[test]
    fn lazy_rule_resolves_once() {
        let mut rule = Rule::new(Loc::new("Makefile", 1));
        rule.outputs.push(intern("app"));
        rule.prereq_string = "main.o util.o".into();

        let mut lazy = LazyRule::from(rule);
        assert!(!lazy.is_parsed());
        let first = lazy
            .resolve(&Vars::new(), Expansion::Suppressed)
            .unwrap()
            .clone();
        assert!(lazy.is_parsed());

        // Bindings that would change the text are ignored the second time.
        let vars = Vars::new().set("X", "other");
        let second = lazy.resolve(&vars, Expansion::Suppressed).unwrap();
        assert_eq!(&first, second);
        assert_eq!(second.inputs, [intern("main.o"), intern("util.o")]);
    }

    #[test]
    fn lazy_rule_stays_unparsed_on_error() {
        let mut rule = Rule::new(Loc::new("Makefile", 4));
        rule.second_expansion = true;
        rule.prereq_string = "$(BROKEN".into();

        let mut lazy = LazyRule::from(rule);
        assert!(lazy.resolve(&Vars::new(), Expansion::Suppressed).is_err());
        assert!(!lazy.is_parsed());
        assert!(lazy.as_parsed().is_none());
        assert_eq!(lazy.rule().prereq_string, "$(BROKEN");

        // A later attempt with the text fixed up succeeds.
        let mut fixed = lazy.rule().clone();
        fixed.prereq_string = "ok.c".into();
        let mut lazy = LazyRule::from(fixed);
        let parsed = lazy.resolve(&Vars::new(), Expansion::Suppressed).unwrap();
        assert_eq!(parsed.inputs, [intern("ok.c")]);
    }
}
