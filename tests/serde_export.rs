#![cfg(feature = "serde")]

use mkrule::{
    intern, Config, Diagnostics, Expansion, ExprArena, Loc, Pattern, Rule, Separator, Vars,
};
use serde_json::json;

#[test]
fn symbol_serializes_as_its_name() {
    let value = serde_json::to_value(intern("out/main.o")).unwrap();
    assert_eq!(value, json!("out/main.o"));
}

#[test]
fn loc_serializes_file_and_line() {
    let value = serde_json::to_value(Loc::new("build/rules.mk", 42)).unwrap();
    assert_eq!(value, json!({ "filename": "build/rules.mk", "line": 42 }));
}

#[test]
fn config_round_trips() {
    let config = Config::new().export_mode(true);
    let text = serde_json::to_string(&config).unwrap();
    let back: Config = serde_json::from_str(&text).unwrap();
    assert_eq!(back, config);
    assert!(back.is_export_mode());
}

#[test]
fn config_fields_default_when_missing() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config, Config::new());
}

fn resolved_rule(arena: &mut ExprArena) -> mkrule::ParsedRule {
    let mut diags = Diagnostics::new();
    let mut rule = Rule::new(Loc::new("Makefile", 7));
    rule.outputs = vec![intern("app.o")];
    rule.cmd_lineno = 7;
    let line = "%.o: %.c | gen ; cc -c $< -o $@";
    let sep = line.find(';').map(Separator::inline_command);
    rule.parse_prerequisites(line, sep, arena, &mut diags)
        .unwrap();
    rule.instantiate(&Pattern::new("%.o"), intern("app.o"))
        .unwrap()
        .parse_inputs(&Vars::new(), Expansion::Suppressed)
        .unwrap()
}

#[test]
fn parsed_rule_leaves_out_command_handles() {
    let mut arena = ExprArena::new();
    let parsed = resolved_rule(&mut arena);

    let value = serde_json::to_value(&parsed).unwrap();
    assert_eq!(
        value,
        json!({
            "outputs": ["app.o"],
            "inputs": ["app.c"],
            "order_only_inputs": ["gen"],
            "output_patterns": ["%.o"],
            "validations": [],
            "is_double_colon": false,
            "is_suffix_rule": false,
            "loc": { "filename": "Makefile", "line": 7 },
            "cmd_lineno": 7,
        })
    );
}

#[test]
fn export_writes_command_sources() {
    let mut arena = ExprArena::new();
    let parsed = resolved_rule(&mut arena);

    let value = serde_json::to_value(parsed.export(&arena)).unwrap();
    assert_eq!(value["cmds"], json!(["cc -c $< -o $@"]));
    assert_eq!(value["inputs"], json!(["app.c"]));
    assert_eq!(value["loc"]["line"], json!(7));
}
