use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Binary(String, Box<Expr>, Box<Expr>),
    Call(String, Vec<Expr>),
}

impl Expr {
    pub fn binary(op: &str, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary(op.to_owned(), Box::new(lhs), Box::new(rhs))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub name: String,
    pub args: Vec<String>,
}

impl Prototype {
    pub fn new(name: &str, args: Vec<String>) -> Prototype {
        Prototype {
            name: name.to_owned(),
            args,
        }
    }

    /// The prototype a bare top-level expression is wrapped in.
    pub fn anonymous() -> Prototype {
        Prototype::new("", vec![])
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub prototype: Prototype,
    pub body: Expr,
}

impl Function {
    pub fn anonymous(body: Expr) -> Function {
        Function {
            prototype: Prototype::anonymous(),
            body,
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "Number({})", n),
            Expr::Variable(name) => write!(f, "Variable({})", name),
            Expr::Binary(op, lhs, rhs) => write!(f, "Binary({}, {}, {})", op, lhs, rhs),
            Expr::Call(callee, args) => {
                write!(f, "Call({}, ", callee)?;
                write_list(f, args)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Prototype({}, ", self.name)?;
        write_list(f, &self.args)?;
        f.write_str(")")
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Function({}, {})", self.prototype, self.body)
    }
}
