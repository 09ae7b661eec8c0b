// Expression fragments: generated source text tagged with operator precedence

use std::fmt;

// Precedence of calls, literals and parenthesized forms. Never needs wrapping.
pub const ATOMIC: i32 = i32::MAX;

// RUST CONCEPT: Operator table shared by every backend
// Higher numbers bind tighter. Both target languages agree on the relative order of
// the operators the built-ins emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Negative,
    Not,
    Times,
    DivideBy,
    Mod,
    Plus,
    Minus,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    Equal,
    NotEqual,
    And,
    Or,
    Conditional,
}

impl Operator {
    pub fn precedence(self) -> i32 {
        match self {
            Operator::Negative | Operator::Not => 8,
            Operator::Times | Operator::DivideBy | Operator::Mod => 7,
            Operator::Plus | Operator::Minus => 6,
            Operator::LessThan
            | Operator::GreaterThan
            | Operator::LessThanOrEqual
            | Operator::GreaterThanOrEqual => 5,
            Operator::Equal | Operator::NotEqual => 4,
            Operator::And => 3,
            Operator::Or => 2,
            Operator::Conditional => 1,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Operator::Negative => "-",
            Operator::Not => "!",
            Operator::Times => "*",
            Operator::DivideBy => "/",
            Operator::Mod => "%",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThanOrEqual => ">=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Conditional => "?:",
        }
    }

    pub fn is_binary(self) -> bool {
        !matches!(
            self,
            Operator::Negative | Operator::Not | Operator::Conditional
        )
    }
}

// RUST CONCEPT: Immutable value type with structural equality
// Two fragments are equal only when both the text and the precedence match
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SrcExpr {
    text: String,
    precedence: i32,
}

impl SrcExpr {
    pub fn new(text: impl Into<String>, precedence: i32) -> Self {
        Self {
            text: text.into(),
            precedence,
        }
    }

    pub fn atom(text: impl Into<String>) -> Self {
        Self::new(text, ATOMIC)
    }

    // Integer literal; negative values carry unary-minus precedence
    pub fn int_literal(value: i64) -> Self {
        if value < 0 {
            Self::new(value.to_string(), Operator::Negative.precedence())
        } else {
            Self::atom(value.to_string())
        }
    }

    // `callee(arg, arg, ...)`; arguments sit in comma position and are never wrapped
    pub fn call(callee: &str, args: &[&str]) -> Self {
        Self::atom(format!("{}({})", callee, args.join(", ")))
    }

    // `lhs op rhs` for a left-associative binary operator
    pub fn binary(op: Operator, lhs: &SrcExpr, rhs: &SrcExpr) -> Self {
        debug_assert!(op.is_binary());
        let prec = op.precedence();
        Self::new(
            format!(
                "{} {} {}",
                lhs.protected(prec),
                op.token(),
                rhs.protected(prec + 1)
            ),
            prec,
        )
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn precedence(&self) -> i32 {
        self.precedence
    }

    pub fn is_atomic(&self) -> bool {
        self.precedence == ATOMIC
    }

    // Text suitable for a position that requires `min_precedence`:
    // parenthesized iff this fragment binds strictly looser
    pub fn protected(&self, min_precedence: i32) -> String {
        if self.precedence < min_precedence {
            format!("({})", self.text)
        } else {
            self.text.clone()
        }
    }
}

impl fmt::Display for SrcExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
