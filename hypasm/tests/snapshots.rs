use hypasm::{assemble, Assembly};

fn render(assembly: &Assembly) -> String {
    let diagnostics = assembly
        .diagnostics
        .iter()
        .map(|d| format!("{}\n", d))
        .collect::<String>();

    format!(
        "INTERMEDIATE\n{}SYMBOLS\n{}LITERALS\n{}POOLS\n{}MACHINE CODE\n{}DIAGNOSTICS\n{}",
        assembly.intermediate_code(),
        assembly.context.symbols,
        assembly.context.literals,
        assembly.context.literals.pool_table(),
        assembly.machine_code(),
        diagnostics
    )
}

#[test]
fn test_forward_reference() {
    let program_text = include_str!("../programs/forward.asm");
    let assembly = assemble(program_text);

    insta::assert_snapshot!("forward_reference", render(&assembly));
}

#[test]
fn test_ltorg() {
    let program_text = include_str!("../programs/ltorg.asm");
    let assembly = assemble(program_text);

    insta::assert_snapshot!("ltorg", render(&assembly));
}

#[test]
fn test_origin() {
    let program_text = include_str!("../programs/origin.asm");
    let assembly = assemble(program_text);

    insta::assert_snapshot!("origin", render(&assembly));
}
