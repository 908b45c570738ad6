use super::error::Result;
use super::pattern::{self, PatternMatcher};
use super::token::Token;
use combine::error::ParseError;
use combine::parser::char::digit;
use combine::parser::Parser;
use combine::stream::Stream;
use combine::{many, optional, token};
use log::{debug, trace};
use regex::Regex;

pub type TokenBuilder = fn(&str) -> Option<Token>;

pub const WHITESPACE: &str = "[ \t\n]";
pub const IDENTIFIER: &str = "[a-zA-Z][a-zA-Z0-9]*";
pub const NUMBER: &str = "[0-9.]+";
pub const BINARY_OPERATOR: &str = "[+\\-*/]";

fn keyword_or_identifier(s: &str) -> Option<Token> {
    match s {
        "def" => Some(Token::Define),
        id => Some(Token::Identifier(id.to_owned())),
    }
}

fn default_rules() -> Vec<(&'static str, TokenBuilder)> {
    vec![
        (WHITESPACE, (|_| None) as TokenBuilder),
        (IDENTIFIER, keyword_or_identifier as TokenBuilder),
        (NUMBER, (|s: &str| Some(Token::Number(number_value(s)))) as TokenBuilder),
        ("\\(", (|_| Some(Token::ParensOpen)) as TokenBuilder),
        ("\\)", (|_| Some(Token::ParensClose)) as TokenBuilder),
        (",", (|_| Some(Token::Comma)) as TokenBuilder),
        (BINARY_OPERATOR, (|s: &str| Some(Token::BinaryOperator(s.to_owned()))) as TokenBuilder),
    ]
}

fn decimal_prefix<Input>() -> impl Parser<Input, Output = String>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    (
        many::<String, _, _>(digit()),
        optional((token('.'), many::<String, _, _>(digit()))),
    )
        .map(|(whole, fraction)| match fraction {
            Some((point, digits)) => format!("{}{}{}", whole, point, digits),
            None => whole,
        })
}

/// Value of the longest leading decimal in `text`, `0.0` if there is none.
/// `1.2.3` reads as `1.2`.
pub fn number_value(text: &str) -> f64 {
    decimal_prefix()
        .parse(text)
        .ok()
        .and_then(|(digits, _)| digits.parse::<f64>().ok())
        .unwrap_or(0.0)
}

struct Rule {
    re: Regex,
    build: TokenBuilder,
}

/// Splits source text into tokens by trying an ordered list of rules; the
/// first rule that matches wins, regardless of match length.
pub struct Tokenizer {
    matcher: PatternMatcher,
    rules: Vec<Rule>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::with_rules(default_rules()).expect("built-in token rules are valid patterns")
    }

    pub fn with_rules<'a, I>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, TokenBuilder)>,
    {
        let mut matcher = PatternMatcher::new();
        let rules = rules
            .into_iter()
            .map(|(pattern, build)| -> Result<Rule> {
                Ok(Rule {
                    re: matcher.compile(pattern)?,
                    build,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Tokenizer { matcher, rules })
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    pub fn tokenize(&self, source: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut rest = source;

        while let Some(c) = rest.chars().next() {
            let matched = self.rules.iter().find_map(|rule| {
                pattern::match_prefix(&rule.re, rest)
                    .filter(|m| !m.is_empty())
                    .map(|m| (m, rule.build))
            });

            let consumed = match matched {
                Some((text, build)) => {
                    if let Some(t) = build(text) {
                        trace!("token {:?}", t);
                        tokens.push(t);
                    }
                    text.len()
                }
                None => {
                    trace!("unrecognised character {:?}", c);
                    tokens.push(Token::Other(c.to_string()));
                    c.len_utf8()
                }
            };
            rest = &rest[consumed..];
        }

        debug!("tokenized {} bytes into {} tokens", source.len(), tokens.len());
        tokens
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::super::error::ErrorKind;
    use failure::Fail;
    use super::super::token::Token::*;
    use super::*;

    fn ident(s: &str) -> Token {
        Identifier(s.to_owned())
    }

    fn op(s: &str) -> Token {
        BinaryOperator(s.to_owned())
    }

    #[test]
    fn test_number() {
        assert_eq!(number_value("1.0"), 1.0);
        assert_eq!(number_value("42"), 42.0);
        assert_eq!(number_value(".5"), 0.5);
        assert_eq!(number_value("1.2.3"), 1.2);
        assert_eq!(number_value("."), 0.0);
        assert_eq!(number_value("..7"), 0.0);
    }

    #[test]
    fn test_ident() {
        let tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.tokenize("test"), vec![ident("test")]);
        assert_eq!(tokenizer.tokenize("def"), vec![Define]);
        assert_eq!(tokenizer.tokenize("define"), vec![ident("define")]);
        assert_eq!(tokenizer.tokenize("x1y2"), vec![ident("x1y2")]);
    }

    #[test]
    fn test_empty() {
        assert_eq!(Tokenizer::new().tokenize(""), vec![]);
        assert_eq!(Tokenizer::new().tokenize(" \t\n\n "), vec![]);
    }

    #[test]
    fn test_program() {
        let tokens = Tokenizer::new().tokenize("def foo(x, y)\n  x + y * 2 + (4 + 5) / 3\n\nfoo(3, 4)");
        assert_eq!(
            tokens,
            vec![
                Define,
                ident("foo"),
                ParensOpen,
                ident("x"),
                Comma,
                ident("y"),
                ParensClose,
                ident("x"),
                op("+"),
                ident("y"),
                op("*"),
                Number(2.0),
                op("+"),
                ParensOpen,
                Number(4.0),
                op("+"),
                Number(5.0),
                ParensClose,
                op("/"),
                Number(3.0),
                ident("foo"),
                ParensOpen,
                Number(3.0),
                Comma,
                Number(4.0),
                ParensClose,
            ]
        );
    }

    #[test]
    fn test_first_match_wins() {
        // Letters never reach the number rule, digits never reach the
        // identifier rule.
        assert_eq!(
            Tokenizer::new().tokenize("12ab"),
            vec![Number(12.0), ident("ab")]
        );
        assert_eq!(
            Tokenizer::new().tokenize("ab12.5"),
            vec![ident("ab12"), Number(0.5)]
        );
    }

    #[test]
    fn test_other() {
        assert_eq!(
            Tokenizer::new().tokenize("a # b;"),
            vec![ident("a"), Other("#".to_owned()), ident("b"), Other(";".to_owned())]
        );
        // Carriage return is not in the whitespace class.
        assert_eq!(
            Tokenizer::new().tokenize("1\r\n"),
            vec![Number(1.0), Other("\r".to_owned())]
        );
        assert_eq!(
            Tokenizer::new().tokenize("λ"),
            vec![Other("λ".to_owned())]
        );
    }

    #[test]
    fn test_custom_rules() {
        let tokenizer = Tokenizer::with_rules(vec![
            (" ", (|_| None) as TokenBuilder),
            ("x*", (|s: &str| Some(Identifier(s.to_owned()))) as TokenBuilder),
            ("[0-9]+", (|s: &str| Some(Number(number_value(s)))) as TokenBuilder),
        ])
        .unwrap();
        assert_eq!(tokenizer.matcher().len(), 3);
        // `x*` matches the empty string before `1`, which must not stall.
        assert_eq!(tokenizer.tokenize("xx 1"), vec![ident("xx"), Number(1.0)]);
    }

    #[test]
    fn test_invalid_rule() {
        let err = Tokenizer::with_rules(vec![("(", (|_| None) as TokenBuilder)])
            .err()
            .unwrap();
        assert_eq!(err.kind(), &ErrorKind::InvalidPattern("(".to_owned()));
        assert!(err.cause().is_some());
    }
}
