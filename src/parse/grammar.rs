use winnow::combinator::{alt, cut_err, opt, preceded, repeat, terminated};
use winnow::error::{ErrMode, ModalResult, ParserError, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use crate::types::Part;

/// Word separators: the C `isspace` set.
pub(crate) fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

// -- Words ------------------------------------------------------------------

fn space(input: &mut &str) -> ModalResult<()> {
    take_while(0.., is_space).void().parse_next(input)
}

fn word<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| !is_space(c)).parse_next(input)
}

pub fn words<'i>(input: &mut &'i str) -> ModalResult<Vec<&'i str>> {
    preceded(space, repeat(0.., terminated(word, space))).parse_next(input)
}

// -- Deferred expressions -----------------------------------------------------

fn literal(input: &mut &str) -> ModalResult<Part> {
    take_while(1.., |c: char| c != '$')
        .map(|s: &str| Part::Literal(s.to_owned()))
        .parse_next(input)
}

fn next_char(input: &mut &str) -> ModalResult<Option<char>> {
    opt(any).parse_next(input)
}

fn reference(input: &mut &str) -> ModalResult<Part> {
    '$'.parse_next(input)?;
    match next_char(input)? {
        // A trailing '$' has nothing to refer to.
        None => Ok(Part::Literal("$".to_owned())),
        Some('$') => Ok(Part::Literal("$".to_owned())),
        Some('(') => {
            let name = cut_err(|i: &mut &str| name_parts(i, '(', ')'))
                .context(StrContext::Expected(StrContextValue::CharLiteral(')')))
                .parse_next(input)?;
            Ok(Part::Var(name))
        }
        Some('{') => {
            let name = cut_err(|i: &mut &str| name_parts(i, '{', '}'))
                .context(StrContext::Expected(StrContextValue::CharLiteral('}')))
                .parse_next(input)?;
            Ok(Part::Var(name))
        }
        Some(c) => Ok(Part::Var(vec![Part::Literal(c.to_string())])),
    }
}

/// Parts of a reference name up to (and consuming) the matching `close`.
/// Unnested `open`/`close` pairs inside the name are kept literally.
fn name_parts(input: &mut &str, open: char, close: char) -> ModalResult<Vec<Part>> {
    let mut parts = Vec::new();
    let mut lit = String::new();
    let mut depth = 0usize;
    loop {
        match input.chars().next() {
            None => return Err(ErrMode::from_input(input)),
            Some('$') => {
                if !lit.is_empty() {
                    parts.push(Part::Literal(std::mem::take(&mut lit)));
                }
                parts.push(reference(input)?);
                continue;
            }
            Some(c) if c == close && depth == 0 => {
                next_char(input)?;
                if !lit.is_empty() {
                    parts.push(Part::Literal(lit));
                }
                return Ok(parts);
            }
            Some(c) => {
                if c == open {
                    depth += 1;
                } else if c == close {
                    depth -= 1;
                }
                lit.push(c);
                next_char(input)?;
            }
        }
    }
}

pub fn expr(input: &mut &str) -> ModalResult<Vec<Part>> {
    repeat(0.., alt((literal, reference))).parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{parse_expr, words as scan};

    fn lit(s: &str) -> Part {
        Part::Literal(s.to_owned())
    }

    fn var(s: &str) -> Part {
        Part::Var(vec![lit(s)])
    }

    #[test]
    fn words_split_on_whitespace() {
        assert_eq!(scan("  a.c\tb.c \n c.c  "), ["a.c", "b.c", "c.c"]);
    }

    #[test]
    fn words_empty_and_blank() {
        assert!(scan("").is_empty());
        assert!(scan(" \t ").is_empty());
    }

    #[test]
    fn words_keep_punctuation() {
        assert_eq!(scan("a | b"), ["a", "|", "b"]);
        assert_eq!(scan("a|b"), ["a|b"]);
    }

    #[test]
    fn expr_plain_literal() {
        assert_eq!(parse_expr("foo.c bar.c").unwrap(), [lit("foo.c bar.c")]);
    }

    #[test]
    fn expr_paren_and_brace_refs() {
        assert_eq!(
            parse_expr("$(A) ${B}").unwrap(),
            [var("A"), lit(" "), var("B")]
        );
    }

    #[test]
    fn expr_single_char_ref() {
        assert_eq!(parse_expr("$@.d").unwrap(), [var("@"), lit(".d")]);
    }

    #[test]
    fn expr_dollar_escape() {
        assert_eq!(parse_expr("$$x").unwrap(), [lit("$"), lit("x")]);
    }

    #[test]
    fn expr_trailing_dollar() {
        assert_eq!(parse_expr("a$").unwrap(), [lit("a"), lit("$")]);
    }

    #[test]
    fn expr_nested_ref() {
        assert_eq!(
            parse_expr("$(X_$(Y))").unwrap(),
            [Part::Var(vec![lit("X_"), var("Y")])]
        );
    }

    #[test]
    fn expr_balanced_parens_in_name() {
        assert_eq!(parse_expr("$(a(b))").unwrap(), [var("a(b)")]);
    }

    #[test]
    fn expr_unterminated_is_error() {
        assert!(parse_expr("$(FOO").is_err());
        assert!(parse_expr("${FOO").is_err());
        assert!(parse_expr("x $(A $(B)").is_err());
    }
}
