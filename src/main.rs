mod toplevel;

use clap::Parser;
use kaleidoscope_frontend::Tokenizer;
use std::{fs, path::PathBuf, process::ExitCode};

#[derive(Parser)]
#[command(version, about = "Kaleidoscope tokenizer and parser", long_about = None)]
struct Cli {
    /// Source file; reads lines from stdin when omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print the token list before the syntax tree
    #[arg(long, default_value_t = false)]
    tokens: bool,

    /// Do not print the syntax tree
    #[arg(long, default_value_t = false)]
    no_ast: bool,
}

fn run(cli: Cli) -> Result<bool, failure::Error> {
    let opts = toplevel::Options {
        print_tokens: cli.tokens,
        print_ast: !cli.no_ast,
    };
    let tokenizer = Tokenizer::new();

    match cli.input {
        Some(path) => {
            let source = fs::read_to_string(&path)?;
            toplevel::run_source(&tokenizer, &source, &opts, &mut std::io::stdout())
        }
        None => {
            toplevel::main_loop(&tokenizer, &opts)?;
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
