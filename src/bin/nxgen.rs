//! nxgen driver: compile a textual tree-IR module to NEANDER-X assembly.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use bumpalo::Bump;
use clap::Parser;

use nxgen::ir::parse_module;
use nxgen::{compile_module, CompilationSession, Grammar};

#[derive(Parser)]
#[command(
    name = "nxgen",
    about = "BURS code generator for the NEANDER-X 16-bit CPU"
)]
struct Args {
    /// Input tree-IR file.
    input: PathBuf,

    /// Output assembly file (stdout if omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print compilation statistics to stderr.
    #[arg(long)]
    stats: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let text = match fs::read_to_string(&args.input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("nxgen: cannot read {}: {}", args.input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let arena = Bump::new();
    let session = CompilationSession::new(&arena);

    let module = match parse_module(&text, &session) {
        Ok(module) => module,
        Err(e) => {
            eprintln!("nxgen: {}: {}", args.input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let asm = match compile_module(&module, Grammar::neanderx(), &session) {
        Ok(asm) => asm,
        Err(e) => {
            eprintln!("nxgen: {}: {}", args.input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &asm) {
                eprintln!("nxgen: cannot write {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        }
        None => print!("{}", asm),
    }

    if args.stats {
        eprint!("{}", session.stats());
    }

    ExitCode::SUCCESS
}
