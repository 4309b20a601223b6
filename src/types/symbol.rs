use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

/// Handle to an interned name. Two symbols are equal iff they were interned
/// from the same text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

/// Maps names to symbols. Append-only: nothing interned is ever released, so
/// the backing strings live for the rest of the process.
#[derive(Debug, Default)]
struct SymbolTable {
    indices: HashMap<&'static str, u32>,
    names: Vec<&'static str>,
}

impl SymbolTable {
    fn intern(&mut self, name: &str) -> Symbol {
        if let Some(&idx) = self.indices.get(name) {
            return Symbol(idx);
        }
        let name: &'static str = Box::leak(name.to_owned().into_boxed_str());
        let idx = u32::try_from(self.names.len()).unwrap_or(u32::MAX);
        self.names.push(name);
        self.indices.insert(name, idx);
        Symbol(idx)
    }
}

fn table() -> &'static Mutex<SymbolTable> {
    static TABLE: OnceLock<Mutex<SymbolTable>> = OnceLock::new();
    TABLE.get_or_init(|| Mutex::new(SymbolTable::default()))
}

/// Intern `name` in the process-wide symbol table, returning its handle.
///
/// Interning the same text again returns the same handle.
pub fn intern(name: &str) -> Symbol {
    table()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .intern(name)
}

impl Symbol {
    /// The interned text.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        let table = table().lock().unwrap_or_else(PoisonError::into_inner);
        table.names.get(self.0 as usize).copied().unwrap_or("")
    }

    /// Whether the name contains the `%` wildcard.
    #[must_use]
    pub fn is_pattern(self) -> bool {
        self.as_str().contains('%')
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        intern(name)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Symbol {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Join the names of `symbols` with `sep`.
#[must_use]
pub fn join_symbols(symbols: &[Symbol], sep: &str) -> String {
    symbols
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_and_lookup() {
        let sym = intern("foo.o");
        assert_eq!(sym.as_str(), "foo.o");
        assert_eq!(sym.to_string(), "foo.o");
    }

    #[test]
    fn duplicate_intern_returns_same_handle() {
        let a = intern("bar.c");
        let b = intern("bar.c");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_names_distinct_handles() {
        assert_ne!(intern("x.c"), intern("y.c"));
    }

    #[test]
    fn empty_name_is_internable() {
        assert_eq!(intern("").as_str(), "");
    }

    #[test]
    fn pattern_detection() {
        assert!(intern("%.o").is_pattern());
        assert!(!intern("main.o").is_pattern());
    }

    #[test]
    fn join() {
        let syms = [intern("a"), intern("b"), intern("c")];
        assert_eq!(join_symbols(&syms, ","), "a,b,c");
        assert_eq!(join_symbols(&[], ","), "");
    }
}
