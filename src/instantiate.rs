use crate::types::{subst_words, Pattern, Rule, RuleError, Symbol};

pub(crate) fn instantiate(
    template: &Rule,
    pattern: &Pattern,
    output: Symbol,
) -> Result<Rule, RuleError> {
    let Some(stem) = pattern.matches(output.as_str()) else {
        return Err(RuleError::PatternMismatch {
            loc: template.loc.clone(),
            pattern: pattern.as_str().to_owned(),
            output: output.to_string(),
        });
    };
    tracing::trace!(pattern = pattern.as_str(), %output, stem, "instantiate");
    let mut rule = template.clone();
    rule.prereq_string = subst_words(&template.prereq_string, stem);
    Ok(rule)
}
