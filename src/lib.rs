//! Front end for the Kaleidoscope toy language: source text is split into
//! [Token]s by a rule-ordered [Tokenizer] and turned into [Function] nodes by
//! a recursive-descent [Parser].

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod pattern;
pub mod token;

pub use ast::{Expr, Function, Prototype};
pub use error::{Error, ErrorKind, Result};
pub use lexer::Tokenizer;
pub use parser::Parser;
pub use pattern::PatternMatcher;
pub use token::Token;

/// Tokenize and parse `source` in one go.
pub fn parse(source: &str) -> Result<Vec<Function>> {
    let tokens = Tokenizer::new().tokenize(source);
    Parser::new(tokens).parse_program()
}
