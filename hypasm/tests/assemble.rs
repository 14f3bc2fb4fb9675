use hypasm::{
    assemble, assemble_program,
    directive::Declarative,
    pass_one::{pass_one, Context},
    record::Record,
};

static PROGRAM: &str = include_str!("../programs/ltorg.asm");

#[test]
fn test_forward_reference() {
    let assembled = assemble_program("START 200\nMOVER AREG,X\nX DS 1\nEND").unwrap();
    assert_eq!(assembled, "+ 04 1 201\n");
}

#[test]
fn test_literals_resolved_after_end() {
    let mut context = Context::new();
    pass_one(&mut context, PROGRAM);

    assert!(!context.literals.is_empty());
    assert!(context
        .literals
        .iter()
        .all(|(_, literal)| literal.address.is_some()));
}

#[test]
fn test_pass_one_is_repeatable() {
    let mut first = Context::new();
    let first_lines = pass_one(&mut first, PROGRAM).lines;
    let mut second = Context::new();
    let second_lines = pass_one(&mut second, PROGRAM).lines;

    assert_eq!(first, second);
    assert_eq!(first_lines, second_lines);
    assert_eq!(first.symbols.to_string(), second.symbols.to_string());
    assert_eq!(first.literals.to_string(), second.literals.to_string());
}

#[test]
fn test_word_count() {
    for program in [
        PROGRAM,
        include_str!("../programs/forward.asm"),
        include_str!("../programs/origin.asm"),
    ] {
        let assembly = assemble(program);
        let failed = assembly.diagnostics.len();
        let expected = assembly
            .lines
            .iter()
            .filter(|line| match line.record {
                Record::Imperative { .. } => true,
                Record::Declarative { declarative, .. } => declarative == Declarative::DC,
                Record::Directive { .. } => false,
            })
            .count();

        assert_eq!(assembly.words.len() + failed, expected);
    }
}

#[test]
fn test_counter_overflow_still_completes() {
    let assembly = assemble("START 0\nORIGIN 4294967295\nSTOP\nX DS 4294967295\nEND");

    assert!(assembly.has_errors());
    assert_eq!(
        assembly
            .diagnostics
            .iter()
            .map(|d| d.line_no)
            .collect::<Vec<_>>(),
        vec![3, 4]
    );
    assert!(assembly.words.is_empty());
    assert!(assemble_program("START 5\nX DS 4294967295\nEND").is_err());
}
