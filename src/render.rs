use std::fmt;

use crate::types::{join_symbols, ExprArena, ExprId, Symbol};

/// One-line rule summary, e.g.
/// `outputs=[a.o] inputs=[a.c] output_patterns=[%.o] cmds=[cc -c $<]`.
///
/// `outputs` and `inputs` are always shown; the other groups only when
/// non-empty or set. Built by `Rule::display` and `ParsedRule::display`.
#[derive(Debug)]
pub struct RuleDisplay<'a> {
    pub(crate) outputs: &'a [Symbol],
    pub(crate) inputs: &'a [Symbol],
    pub(crate) order_only_inputs: &'a [Symbol],
    pub(crate) output_patterns: &'a [Symbol],
    pub(crate) is_double_colon: bool,
    pub(crate) is_suffix_rule: bool,
    pub(crate) cmds: &'a [ExprId],
    pub(crate) arena: &'a ExprArena,
}

impl fmt::Display for RuleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut groups = vec![
            format!("outputs=[{}]", join_symbols(self.outputs, ",")),
            format!("inputs=[{}]", join_symbols(self.inputs, ",")),
        ];
        if !self.order_only_inputs.is_empty() {
            groups.push(format!(
                "order_only_inputs=[{}]",
                join_symbols(self.order_only_inputs, ",")
            ));
        }
        if !self.output_patterns.is_empty() {
            groups.push(format!(
                "output_patterns=[{}]",
                join_symbols(self.output_patterns, ",")
            ));
        }
        if self.is_double_colon {
            groups.push("is_double_colon".to_owned());
        }
        if self.is_suffix_rule {
            groups.push("is_suffix_rule".to_owned());
        }
        if !self.cmds.is_empty() {
            let cmds: Vec<&str> = self
                .cmds
                .iter()
                .map(|&id| self.arena.get(id).map_or("?", |e| e.source()))
                .collect();
            groups.push(format!("cmds=[{}]", cmds.join(",")));
        }
        f.write_str(&groups.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{intern, Expr, ExprArena, Loc, ParsedRule, Rule};

    fn syms(names: &[&str]) -> Vec<crate::Symbol> {
        names.iter().map(|n| intern(n)).collect()
    }

    #[test]
    fn minimal_rule() {
        let arena = ExprArena::new();
        let rule = ParsedRule {
            outputs: syms(&["all"]),
            ..ParsedRule::default()
        };
        assert_eq!(rule.display(&arena).to_string(), "outputs=[all] inputs=[]");
    }

    #[test]
    fn every_group() {
        let mut arena = ExprArena::new();
        let cmds = vec![
            arena.alloc(Expr::literal("cc -c $<")),
            arena.alloc(Expr::literal("touch $@")),
        ];
        let rule = ParsedRule {
            outputs: syms(&["a.o", "b.o"]),
            inputs: syms(&["a.c"]),
            order_only_inputs: syms(&["gen"]),
            output_patterns: syms(&["%.o"]),
            is_double_colon: true,
            is_suffix_rule: true,
            cmds,
            ..ParsedRule::default()
        };
        assert_eq!(
            rule.display(&arena).to_string(),
            "outputs=[a.o,b.o] inputs=[a.c] order_only_inputs=[gen] \
             output_patterns=[%.o] is_double_colon is_suffix_rule cmds=[cc -c $<,touch $@]"
        );
    }

    #[test]
    fn unset_flags_are_absent() {
        let arena = ExprArena::new();
        let rule = ParsedRule {
            outputs: syms(&["x"]),
            inputs: syms(&["y"]),
            is_suffix_rule: true,
            ..ParsedRule::default()
        };
        assert_eq!(
            rule.display(&arena).to_string(),
            "outputs=[x] inputs=[y] is_suffix_rule"
        );
    }

    #[test]
    fn unparsed_rule_renders_empty_inputs() {
        let mut arena = ExprArena::new();
        let mut rule = Rule::new(Loc::new("Makefile", 1));
        rule.outputs = syms(&["foo.o"]);
        rule.output_patterns = syms(&["%.o"]);
        rule.prereq_string = "%.c".into();
        rule.cmds.push(arena.alloc(Expr::literal("cc")));
        assert_eq!(
            rule.display(&arena).to_string(),
            "outputs=[foo.o] inputs=[] output_patterns=[%.o] cmds=[cc]"
        );
    }
}
