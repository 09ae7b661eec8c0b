// Minimal expression nodes answering compile-time constant queries
//
// Hosts with their own AST implement `ConstantQuery` directly; this model covers
// the argument shapes built-in calls see in practice and backs the test suites.

use crate::expr::Operator;
use crate::literal::ConstantQuery;
use crate::value::ArgType;

#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Null,
    Var { name: String, ty: ArgType },
    Negate(Box<ExprNode>),
    Binary {
        op: Operator,
        lhs: Box<ExprNode>,
        rhs: Box<ExprNode>,
    },
}

impl ExprNode {
    pub fn var(name: impl Into<String>, ty: ArgType) -> Self {
        ExprNode::Var {
            name: name.into(),
            ty,
        }
    }

    pub fn negate(operand: ExprNode) -> Self {
        ExprNode::Negate(Box::new(operand))
    }

    pub fn binary(op: Operator, lhs: ExprNode, rhs: ExprNode) -> Self {
        ExprNode::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

// RUST CONCEPT: Result type of arithmetic on static types
// int op int stays int (except division), any float makes float,
// anything dynamic stays dynamic
fn arithmetic_type(op: Operator, lhs: ArgType, rhs: ArgType) -> ArgType {
    match (lhs, rhs) {
        (ArgType::Unknown, _) | (_, ArgType::Unknown) => ArgType::Unknown,
        _ if !lhs.is_numeric() || !rhs.is_numeric() => ArgType::Unknown,
        _ if op == Operator::DivideBy => ArgType::Float,
        (ArgType::Int, ArgType::Int) => ArgType::Int,
        (ArgType::Float, _) | (_, ArgType::Float) => ArgType::Float,
        _ => ArgType::Number,
    }
}

impl ConstantQuery for ExprNode {
    fn static_type(&self) -> ArgType {
        match self {
            ExprNode::Int(_) => ArgType::Int,
            ExprNode::Float(_) => ArgType::Float,
            ExprNode::Bool(_) => ArgType::Bool,
            ExprNode::Str(_) => ArgType::String,
            ExprNode::Null => ArgType::Null,
            ExprNode::Var { ty, .. } => *ty,
            ExprNode::Negate(operand) => operand.static_type(),
            ExprNode::Binary { op, lhs, rhs } => match op {
                Operator::Times
                | Operator::DivideBy
                | Operator::Mod
                | Operator::Plus
                | Operator::Minus => arithmetic_type(*op, lhs.static_type(), rhs.static_type()),
                Operator::And | Operator::Or | Operator::Conditional => ArgType::Unknown,
                _ => ArgType::Bool,
            },
        }
    }

    // Folds integer literals through negation and checked + - *.
    // Overflow means "not a compile-time integer", never a wrapped value.
    fn compile_time_integer(&self) -> Option<i64> {
        match self {
            ExprNode::Int(value) => Some(*value),
            ExprNode::Negate(operand) => operand.compile_time_integer()?.checked_neg(),
            ExprNode::Binary { op, lhs, rhs } => {
                let a = lhs.compile_time_integer()?;
                let b = rhs.compile_time_integer()?;
                match op {
                    Operator::Plus => a.checked_add(b),
                    Operator::Minus => a.checked_sub(b),
                    Operator::Times => a.checked_mul(b),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}
