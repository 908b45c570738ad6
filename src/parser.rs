use super::ast::{Expr, Function, Prototype};
use super::error::{ErrorKind, Result};
use super::token::Token;
use log::{debug, trace};

pub fn precedence(op: &str) -> Option<u8> {
    match op {
        "+" | "-" => Some(20),
        "*" | "/" => Some(40),
        _ => None,
    }
}

// Nesting limit for parenthesised expressions and call arguments.
const MAX_DEPTH: usize = 256;

pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            index: 0,
            depth: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.index
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn pop(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.index).cloned();
        if t.is_some() {
            self.index += 1;
        }
        t
    }

    pub fn parse_program(&mut self) -> Result<Vec<Function>> {
        self.index = 0;
        self.depth = 0;

        let mut nodes = Vec::new();
        while self.index < self.tokens.len() {
            let start = self.index;
            let node = match self.peek() {
                Some(Token::Define) => self.parse_definition()?,
                _ => self.parse_top_level_expr()?,
            };
            // Guard against grammar changes that accept an empty item.
            if self.index == start {
                return Err(ErrorKind::UnexpectedToken.into());
            }
            debug!("parsed {} at token {}", node.prototype, start);
            nodes.push(node);
        }

        Ok(nodes)
    }

    pub fn parse_definition(&mut self) -> Result<Function> {
        match self.pop() {
            Some(Token::Define) => {}
            _ => return Err(ErrorKind::UnexpectedToken.into()),
        }
        let prototype = self.parse_prototype()?;
        let body = self.parse_expression()?;
        Ok(Function { prototype, body })
    }

    pub fn parse_top_level_expr(&mut self) -> Result<Function> {
        let body = self.parse_expression()?;
        Ok(Function::anonymous(body))
    }

    pub fn parse_prototype(&mut self) -> Result<Prototype> {
        let name = match self.pop() {
            Some(Token::Identifier(name)) => name,
            _ => return Err(ErrorKind::ExpectedFunctionName.into()),
        };

        match self.pop() {
            Some(Token::ParensOpen) => {}
            _ => return Err(ErrorKind::ExpectedCharacter('(').into()),
        }

        let mut args = Vec::new();
        while let Some(Token::Identifier(arg)) = self.peek() {
            args.push(arg.clone());
            self.pop();

            if let Some(Token::ParensClose) = self.peek() {
                break;
            }

            match self.pop() {
                Some(Token::Comma) => {}
                _ => return Err(ErrorKind::ExpectedArgumentList.into()),
            }
        }

        // Whatever follows the argument list is taken as the closing paren.
        if self.pop().is_none() {
            return Err(ErrorKind::ExpectedCharacter(')').into());
        }

        Ok(Prototype { name, args })
    }

    pub fn parse_expression(&mut self) -> Result<Expr> {
        if self.depth >= MAX_DEPTH {
            return Err(ErrorKind::ExpectedExpression.into());
        }
        self.depth += 1;
        let e = self
            .parse_primary()
            .and_then(|lhs| self.parse_binary_op(lhs, 0));
        self.depth -= 1;
        e
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.peek() {
            Some(Token::Identifier(_)) => self.parse_identifier(),
            Some(Token::Number(_)) => self.parse_number(),
            Some(Token::ParensOpen) => self.parse_parens(),
            _ => Err(ErrorKind::ExpectedExpression.into()),
        }
    }

    fn parse_number(&mut self) -> Result<Expr> {
        match self.pop() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            _ => Err(ErrorKind::UnexpectedToken.into()),
        }
    }

    fn parse_parens(&mut self) -> Result<Expr> {
        match self.pop() {
            Some(Token::ParensOpen) => {}
            _ => return Err(ErrorKind::ExpectedCharacter('(').into()),
        }

        let e = self.parse_expression()?;

        match self.pop() {
            Some(Token::ParensClose) => Ok(e),
            _ => Err(ErrorKind::ExpectedCharacter(')').into()),
        }
    }

    fn parse_identifier(&mut self) -> Result<Expr> {
        let name = match self.pop() {
            Some(Token::Identifier(name)) => name,
            _ => return Err(ErrorKind::UnexpectedToken.into()),
        };

        match self.peek() {
            Some(Token::ParensOpen) => {}
            _ => return Ok(Expr::Variable(name)),
        }
        self.pop();

        let mut args = Vec::new();
        if self.peek() != Some(&Token::ParensClose) {
            loop {
                args.push(self.parse_expression()?);

                if let Some(Token::ParensClose) = self.peek() {
                    break;
                }

                match self.pop() {
                    Some(Token::Comma) => {}
                    _ => return Err(ErrorKind::ExpectedArgumentList.into()),
                }
            }
        }

        // ')'
        self.pop();
        Ok(Expr::Call(name, args))
    }

    fn current_precedence(&self) -> Result<Option<u8>> {
        match self.peek() {
            Some(Token::BinaryOperator(op)) => match precedence(op) {
                Some(p) => Ok(Some(p)),
                None => Err(ErrorKind::UndefinedOperator(op.clone()).into()),
            },
            _ => Ok(None),
        }
    }

    fn parse_binary_op(&mut self, mut lhs: Expr, min_precedence: u8) -> Result<Expr> {
        loop {
            let token_precedence = match self.current_precedence()? {
                Some(p) if p >= min_precedence => p,
                _ => return Ok(lhs),
            };

            let op = match self.pop() {
                Some(Token::BinaryOperator(op)) => op,
                _ => return Err(ErrorKind::UnexpectedToken.into()),
            };

            let mut rhs = self.parse_primary()?;
            if let Some(next_precedence) = self.current_precedence()? {
                if token_precedence < next_precedence {
                    rhs = self.parse_binary_op(rhs, token_precedence + 1)?;
                }
            }

            trace!("fold {} at precedence {}", op, token_precedence);
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }
}
