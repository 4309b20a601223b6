use std::collections::HashMap;
use std::fmt;

use crate::parse::ParseError;

/// One piece of a deferred expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Literal(String),
    /// A variable reference. The name is itself a sequence of parts so that
    /// `$(OBJS_$(ARCH))` resolves the inner reference first.
    Var(Vec<Part>),
}

/// A text fragment whose variable references are resolved when evaluated.
///
/// Keeps its source text for display, so commands render the way they were
/// written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    source: String,
    parts: Vec<Part>,
}

impl Expr {
    /// Parse `text`, recognising `$$`, `$X`, `$(NAME)` and `${NAME}`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] on an unterminated reference.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let parts = crate::parse::parse_expr(text)?;
        Ok(Self {
            source: text.to_owned(),
            parts,
        })
    }

    /// An expression that evaluates to `text` verbatim.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        let source = text.into();
        let parts = if source.is_empty() {
            Vec::new()
        } else {
            vec![Part::Literal(source.clone())]
        };
        Self { source, parts }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Expand against `vars`. Unset variables expand to nothing.
    #[must_use]
    pub fn eval(&self, vars: &dyn Bindings) -> String {
        let mut out = String::with_capacity(self.source.len());
        eval_parts(&self.parts, vars, &mut out);
        out
    }
}

fn eval_parts(parts: &[Part], vars: &dyn Bindings, out: &mut String) {
    for part in parts {
        match part {
            Part::Literal(text) => out.push_str(text),
            Part::Var(name_parts) => {
                let mut name = String::new();
                eval_parts(name_parts, vars, &mut name);
                if let Some(value) = vars.get(&name) {
                    out.push_str(value);
                }
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Handle to an [`Expr`] owned by an [`ExprArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(u32);

/// Owns every deferred expression of a build-file pass.
///
/// Rules refer to their commands through [`ExprId`]s, so every rule cloned
/// from a template shares the template's commands.
#[derive(Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
}

impl ExprArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        let id = ExprId(u32::try_from(self.exprs.len()).unwrap_or(u32::MAX));
        self.exprs.push(expr);
        id
    }

    /// Look up an expression. Ids from another arena may return `None`.
    #[must_use]
    pub fn get(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.0 as usize)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

/// Variable bindings consulted when evaluating an [`Expr`].
pub trait Bindings {
    fn get(&self, name: &str) -> Option<&str>;
}

/// A plain map of variable bindings.
#[derive(Debug, Clone, Default)]
pub struct Vars {
    data: HashMap<String, String>,
}

impl Vars {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any previous binding.
    #[must_use]
    pub fn set(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.data.insert(name.to_owned(), value.into());
    }
}

impl Bindings for Vars {
    fn get(&self, name: &str) -> Option<&str> {
        self.data.get(name).map(String::as_str)
    }
}

impl Bindings for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<&str> {
        HashMap::get(self, name).map(String::as_str)
    }
}
