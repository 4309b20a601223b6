use crate::inputs::trim_leading_curdir;
use crate::parse::{is_space, words};
use crate::types::{
    intern, Diagnostics, Expr, ExprArena, Pattern, PrereqForm, Rule, RuleError, Separator,
    SeparatorKind,
};

fn trim_left_space(s: &str) -> &str {
    s.trim_start_matches(is_space)
}

pub(crate) fn parse_prerequisites(
    rule: &mut Rule,
    line: &str,
    separator: Option<Separator>,
    arena: &mut ExprArena,
    diags: &mut Diagnostics,
) -> Result<PrereqForm, RuleError> {
    rule.prereq_string = line.to_owned();

    if let Some(sep) = separator.filter(|s| s.kind == SeparatorKind::InlineCommand) {
        if line.as_bytes().get(sep.pos) != Some(&b';') {
            return Err(RuleError::BadSeparator {
                loc: rule.loc.clone(),
                pos: sep.pos,
            });
        }
        let cmd = trim_left_space(&line[sep.pos + 1..]);
        rule.cmds.push(arena.alloc(Expr::literal(cmd)));
        rule.prereq_string.truncate(sep.pos);
    }

    let Some(colon) = rule.prereq_string.find(':') else {
        return Ok(PrereqForm::Simple);
    };

    // Static pattern rule.
    if !rule.output_patterns.is_empty() || rule.outputs.iter().any(|o| o.is_pattern()) {
        return Err(RuleError::MixedRules {
            loc: rule.loc.clone(),
        });
    }

    // Nothing to apply the patterns to, but the command was still consumed.
    if rule.outputs.is_empty() {
        return Ok(PrereqForm::EmptyStaticPattern);
    }

    let (target_prereq, rest) = rule.prereq_string.split_at(colon);
    for token in words(target_prereq) {
        let token = trim_leading_curdir(token);
        let pattern = Pattern::new(token);
        for target in &rule.outputs {
            if pattern.matches(target.as_str()).is_none() {
                diags.warn(
                    &rule.loc,
                    format!("target `{target}' doesn't match the target pattern"),
                );
            }
        }
        rule.output_patterns.push(intern(token));
    }
    rule.prereq_string = trim_left_space(&rest[1..]).to_owned();

    match rule.output_patterns.as_slice() {
        [] => Err(RuleError::MissingTargetPattern {
            loc: rule.loc.clone(),
        }),
        [pattern] if !pattern.is_pattern() => Err(RuleError::NoWildcard {
            loc: rule.loc.clone(),
            pattern: pattern.to_string(),
        }),
        [pattern] => {
            tracing::debug!(
                loc = %rule.loc,
                pattern = %pattern,
                prereqs = %rule.prereq_string,
                "static pattern rule"
            );
            Ok(PrereqForm::StaticPattern)
        }
        _ => Err(RuleError::MultipleTargetPatterns {
            loc: rule.loc.clone(),
        }),
    }
}
