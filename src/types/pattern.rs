use crate::parse::is_space;

/// A name with at most one `%` wildcard, e.g. `%.o` or `obj/%.o`.
///
/// Only the first `%` is significant; any later `%` is matched literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    text: String,
    percent: Option<usize>,
}

impl Pattern {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let percent = text.find('%');
        Self { text, percent }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.percent.is_some()
    }

    /// Match `candidate` against this pattern, returning the stem.
    ///
    /// A pattern without a wildcard only matches itself, with an empty stem.
    #[must_use]
    pub fn matches<'a>(&self, candidate: &'a str) -> Option<&'a str> {
        let Some(idx) = self.percent else {
            return (candidate == self.text).then_some("");
        };
        let prefix = &self.text[..idx];
        let suffix = &self.text[idx + 1..];
        if candidate.len() < prefix.len() + suffix.len() {
            return None;
        }
        candidate
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(suffix))
    }

    /// Replace the wildcard with `stem`.
    #[must_use]
    pub fn substitute(&self, stem: &str) -> String {
        match self.percent {
            Some(idx) => {
                let mut out = String::with_capacity(self.text.len() + stem.len());
                out.push_str(&self.text[..idx]);
                out.push_str(stem);
                out.push_str(&self.text[idx + 1..]);
                out
            }
            None => self.text.clone(),
        }
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Pattern::new(text)
    }
}

/// Substitute `stem` into every whitespace-separated word of `text`,
/// replacing the first `%` of each word. Words without `%` and the
/// whitespace between words are kept as they are.
#[must_use]
pub fn subst_words(text: &str, stem: &str) -> String {
    let mut out = String::with_capacity(text.len() + stem.len());
    let mut rest = text;
    while !rest.is_empty() {
        let word_end = rest
            .find(is_space)
            .unwrap_or(rest.len());
        let (word, tail) = rest.split_at(word_end);
        if word.contains('%') {
            out.push_str(&Pattern::new(word).substitute(stem));
        } else {
            out.push_str(word);
        }
        let gap_end = tail
            .find(|c: char| !is_space(c))
            .unwrap_or(tail.len());
        let (gap, next) = tail.split_at(gap_end);
        out.push_str(gap);
        rest = next;
    }
    out
}
