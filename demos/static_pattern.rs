use mkrule::{
    intern, Config, Diagnostic, Diagnostics, Expr, ExprArena, FsGlob, Loc, MkruleError,
    Pattern, Rule, Separator, Vars,
};

fn main() -> Result<(), MkruleError> {
    // objs := foo.o bar.o baz.x
    // $(objs): %.o: %.c $$(HDRS_%) | build ; $(CC) -c $< -o $@
    let mut arena = ExprArena::new();
    let mut diags = Diagnostics::new();

    let mut template = Rule::new(Loc::new("Makefile", 2));
    template.outputs = ["foo.o", "bar.o", "baz.x"].iter().map(|o| intern(o)).collect();
    template.second_expansion = true;

    // The statement grammar has already expanded the line once, turning
    // `$$(HDRS_%)` into `$(HDRS_%)`.
    let line = "%.o: %.c $(HDRS_%) | build ; $(CC) -c $< -o $@";
    let sep = line.find(';').map(Separator::inline_command);
    let form = template.parse_prerequisites(line, sep, &mut arena, &mut diags)?;
    println!("form: {form:?}");
    println!("template: {}", template.display(&arena));

    // An extra command line, parsed rather than taken literally.
    template
        .cmds
        .push(arena.alloc(Expr::parse("@echo built $@")?));

    for diag in diags.iter() {
        println!("{diag}");
    }

    let glob = FsGlob::new();
    let config = Config::new().export_mode(true);
    let vars = Vars::new()
        .set("HDRS_foo", "foo.h common.h")
        .set("HDRS_bar", "bar.h");

    let pattern = Pattern::new(template.output_patterns[0].as_str());
    for &output in &template.outputs {
        let inst = match template.instantiate(&pattern, output) {
            Ok(inst) => inst,
            Err(err) => {
                println!("{}", Diagnostic::from(&err));
                continue;
            }
        };
        let parsed = inst.parse_inputs(&vars, config.expansion(&glob))?;
        println!("{output}: {}", parsed.display(&arena));
    }

    Ok(())
}
