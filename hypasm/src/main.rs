use anyhow::{bail, Context, Result};
use hypasm::assemble;
use std::{fs, path::PathBuf};

#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Two-pass assembler for the hypothetical machine")]
struct Args {
    /// Source file
    input: PathBuf,

    /// Output name; `.mc`, `.ic` and `.sdb` are appended. Defaults to the input without its extension
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Print the symbol, literal and pool tables
    #[clap(long)]
    tables: bool,

    /// Fail on warnings too
    #[clap(long)]
    strict: bool,
}

fn main() -> Result<()> {
    use clap::Parser;

    env_logger::init();
    let args = Args::parse();

    let program_text = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let assembly = assemble(&program_text);

    for diagnostic in &assembly.diagnostics {
        eprintln!("{}: {}", args.input.display(), diagnostic);
    }

    let output_name = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension(""));
    let name = output_name
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let debug = assembly.debug_info(&name).to_string()?;
    for (extension, contents) in [
        ("mc", assembly.machine_code()),
        ("ic", assembly.intermediate_code()),
        ("sdb", debug),
    ] {
        let path = format!("{}.{}", output_name.display(), extension);
        fs::write(&path, contents).with_context(|| format!("writing {}", path))?;
    }

    if args.tables {
        println!("SYMBOL TABLE");
        print!("{}", assembly.context.symbols);
        println!("\nLITERAL TABLE");
        print!("{}", assembly.context.literals);
        println!("\nPOOL TABLE");
        print!("{}", assembly.context.literals.pool_table());
    }

    let failed = if args.strict {
        !assembly.diagnostics.is_empty()
    } else {
        assembly.has_errors()
    };
    if failed {
        bail!(
            "{}: {} diagnostic(s)",
            args.input.display(),
            assembly.diagnostics.len()
        );
    }

    Ok(())
}
