use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Define,
    Identifier(String),
    Number(f64),
    ParensOpen,
    ParensClose,
    Comma,
    BinaryOperator(String),
    /// A single character no rule recognises.
    Other(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Define => f.write_str("def"),
            Token::Identifier(name) => f.write_str(name),
            Token::Number(n) => write!(f, "{}", n),
            Token::ParensOpen => f.write_str("("),
            Token::ParensClose => f.write_str(")"),
            Token::Comma => f.write_str(","),
            Token::BinaryOperator(op) => f.write_str(op),
            Token::Other(text) => f.write_str(text),
        }
    }
}

/// Canonical source text for `tokens`, one space between each.
pub fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod test {
    use super::Token::*;
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Define.to_string(), "def");
        assert_eq!(Number(2.0).to_string(), "2");
        assert_eq!(Number(0.25).to_string(), "0.25");
        assert_eq!(BinaryOperator("/".to_owned()).to_string(), "/");
    }

    #[test]
    fn test_render() {
        let tokens = vec![
            Identifier("foo".to_owned()),
            ParensOpen,
            Number(3.0),
            Comma,
            Number(4.5),
            ParensClose,
        ];
        assert_eq!(render(&tokens), "foo ( 3 , 4.5 )");
        assert_eq!(render(&[]), "");
    }
}
