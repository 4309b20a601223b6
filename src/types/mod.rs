mod config;
mod diagnostic;
mod error;
mod expr;
mod loc;
mod pattern;
mod rule;
mod symbol;

pub use config::Config;
pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use error::RuleError;
pub use expr::{Bindings, Expr, ExprArena, ExprId, Part, Vars};
pub use loc::Loc;
pub use pattern::{subst_words, Pattern};
pub use rule::{LazyRule, ParsedRule, PrereqForm, Rule, Separator, SeparatorKind};
pub use symbol::{intern, join_symbols, Symbol};

#[cfg(feature = "serde")]
pub use rule::RuleExport;
