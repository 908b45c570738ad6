use kaleidoscope_frontend::{token, Parser, Tokenizer};
use log::{info, warn};
use std::io::{stdin, stdout, BufRead, Write};

pub(crate) struct Options {
    pub print_tokens: bool,
    pub print_ast: bool,
}

/// Tokenize and parse one unit of source, printing what was asked for.
/// Returns false if the source failed to parse.
pub(crate) fn run_source<W: Write>(
    tokenizer: &Tokenizer,
    source: &str,
    opts: &Options,
    out: &mut W,
) -> Result<bool, failure::Error> {
    let tokens = tokenizer.tokenize(source);
    if opts.print_tokens {
        writeln!(out, "{:?}", tokens)?;
        info!("canonical text: {}", token::render(&tokens));
    }

    match Parser::new(tokens).parse_program() {
        Ok(nodes) => {
            if opts.print_ast {
                for node in &nodes {
                    writeln!(out, "{}", node)?;
                }
            }
            Ok(true)
        }
        Err(e) => {
            warn!("parse failed: {:?}", e.kind());
            eprintln!("error: {}", e);
            Ok(false)
        }
    }
}

pub(crate) fn main_loop(tokenizer: &Tokenizer, opts: &Options) -> Result<(), failure::Error> {
    let stdin = stdin();
    let mut input = stdin.lock();
    let stdout = stdout();
    loop {
        {
            let mut out = stdout.lock();
            write!(out, "Ready> ")?;
            out.flush()?;
        }

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(stdout.lock())?;
            return Ok(());
        }

        run_source(tokenizer, &line, opts, &mut stdout.lock())?;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn run(source: &str, print_tokens: bool, print_ast: bool) -> (bool, String) {
        let opts = Options {
            print_tokens,
            print_ast,
        };
        let mut out = Vec::new();
        let ok = run_source(&Tokenizer::new(), source, &opts, &mut out).unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_run_source() {
        let (ok, out) = run("def f(x) x * 2", false, true);
        assert!(ok);
        assert_eq!(
            out,
            "Function(Prototype(f, [x]), Binary(*, Variable(x), Number(2)))\n"
        );
    }

    #[test]
    fn test_run_source_tokens() {
        let (ok, out) = run("1 +", true, true);
        assert!(!ok);
        assert_eq!(out, "[Number(1.0), BinaryOperator(\"+\")]\n");
    }

    #[test]
    fn test_run_source_no_ast() {
        let (ok, out) = run("1 + 2", true, false);
        assert!(ok);
        assert_eq!(
            out,
            "[Number(1.0), BinaryOperator(\"+\"), Number(2.0)]\n"
        );

        let (ok, out) = run("1 + 2", false, false);
        assert!(ok);
        assert_eq!(out, "");
    }
}
