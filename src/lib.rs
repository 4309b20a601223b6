//! Rule resolution for a Make-compatible build description engine.
//!
//! Turns the text after a rule's output list (`prerequisites [; command]` or
//! `target-pattern : prereq-patterns [; command]`) into a [`Rule`], clones
//! pattern-rule templates per concrete output, and tokenizes prerequisites
//! into normal and order-only inputs.
//!
//! ```
//! use mkrule::{intern, Diagnostics, Expansion, ExprArena, Loc, Rule, Separator, Vars};
//!
//! let mut arena = ExprArena::new();
//! let mut diags = Diagnostics::new();
//! let mut rule = Rule::new(Loc::new("Makefile", 1));
//! rule.outputs.push(intern("app"));
//!
//! let line = "main.o util.o ; cc -o $@ $^";
//! rule.parse_prerequisites(line, Some(Separator::inline_command(14)), &mut arena, &mut diags)
//!     .unwrap();
//!
//! let parsed = rule.parse_inputs(&Vars::new(), Expansion::Suppressed).unwrap();
//! assert_eq!(
//!     parsed.display(&arena).to_string(),
//!     "outputs=[app] inputs=[main.o,util.o] cmds=[cc -o $@ $^]"
//! );
//! ```

mod error;
mod inputs;
mod instantiate;
pub mod parse;
mod prereq;
mod render;
mod types;

pub use error::MkruleError;
pub use inputs::{tokenize_inputs, Expansion, FsGlob, Glob, Inputs};
pub use parse::ParseError;
pub use render::RuleDisplay;
pub use types::{
    intern, join_symbols, subst_words, Bindings, Config, Diagnostic, Diagnostics, Expr, ExprArena,
    ExprId, LazyRule, Loc, ParsedRule, Part, Pattern, PrereqForm, Rule, RuleError, Separator,
    SeparatorKind, Severity, Symbol, Vars,
};

#[cfg(feature = "serde")]
pub use types::RuleExport;
