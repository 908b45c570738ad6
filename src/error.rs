use failure::{Backtrace, Context, Fail};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum ErrorKind {
    #[fail(display = "unexpected token")]
    UnexpectedToken,
    #[fail(display = "undefined operator '{}'", _0)]
    UndefinedOperator(String),
    #[fail(display = "expected character '{}'", _0)]
    ExpectedCharacter(char),
    #[fail(display = "expected expression")]
    ExpectedExpression,
    #[fail(display = "expected argument list")]
    ExpectedArgumentList,
    #[fail(display = "expected function name")]
    ExpectedFunctionName,
    #[fail(display = "invalid token pattern '{}'", _0)]
    InvalidPattern(String),
}

#[derive(Debug)]
pub struct Error {
    inner: Context<ErrorKind>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.inner.get_context()
    }
}

impl Fail for Error {
    fn cause(&self) -> Option<&dyn Fail> {
        self.inner.cause()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        self.inner.backtrace()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Context::new(kind),
        }
    }
}

impl From<Context<ErrorKind>> for Error {
    fn from(inner: Context<ErrorKind>) -> Error {
        Error { inner }
    }
}
