// Built-in function contract shared by every function plugin

use crate::expr::SrcExpr;
use crate::literal::ConstantQuery;
use crate::value::{ArgType, CompileError, NumericValue};
use std::fmt;
use std::ops::RangeInclusive;

// RUST CONCEPT: An argument as seen by a source emitter
// `expr` is the argument already rendered for the target; `node` is the expression
// it came from, queried for static type and compile-time value.
#[derive(Clone, Copy)]
pub struct TargetArg<'a> {
    pub expr: &'a SrcExpr,
    pub node: &'a dyn ConstantQuery,
}

impl<'a> TargetArg<'a> {
    pub fn new(expr: &'a SrcExpr, node: &'a dyn ConstantQuery) -> Self {
        Self { expr, node }
    }
}

impl fmt::Debug for TargetArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetArg")
            .field("expr", &self.expr)
            .field("static_type", &self.node.static_type())
            .field("constant", &self.node.compile_time_integer())
            .finish()
    }
}

// RUST CONCEPT: One trait, three realizations
// Pure functions over immutable inputs, so implementations are shareable across
// compiler threads.
pub trait BuiltinFunction: Send + Sync {
    fn name(&self) -> &'static str;

    fn valid_arg_counts(&self) -> RangeInclusive<usize>;

    fn doc(&self) -> &'static str;

    fn compute_direct(&self, args: &[NumericValue]) -> Result<NumericValue, CompileError>;

    fn compute_for_js_src(&self, args: &[TargetArg<'_>]) -> Result<SrcExpr, CompileError>;

    fn compute_for_py_src(&self, args: &[TargetArg<'_>]) -> Result<SrcExpr, CompileError>;
}

pub fn arity_error(
    function: &'static str,
    valid: RangeInclusive<usize>,
    found: usize,
) -> CompileError {
    CompileError::Arity {
        function,
        found,
        min: *valid.start(),
        max: *valid.end(),
        pos: None,
    }
}

pub fn check_arity(
    function: &'static str,
    valid: RangeInclusive<usize>,
    found: usize,
) -> Result<(), CompileError> {
    if valid.contains(&found) {
        Ok(())
    } else {
        Err(arity_error(function, valid, found))
    }
}

pub fn require_numeric(
    function: &'static str,
    index: usize,
    ty: ArgType,
) -> Result<(), CompileError> {
    if ty.is_numeric() {
        Ok(())
    } else {
        Err(CompileError::type_error(
            function,
            format!("argument {} must be a number, found {}", index + 1, ty.name()),
        ))
    }
}

pub fn require_integer(
    function: &'static str,
    index: usize,
    ty: ArgType,
) -> Result<(), CompileError> {
    if ty.is_integer() {
        Ok(())
    } else {
        Err(CompileError::type_error(
            function,
            format!("argument {} must be an int, found {}", index + 1, ty.name()),
        ))
    }
}

// A statically known digit count: ints pass, floats only when integer-valued
pub fn integer_value(
    function: &'static str,
    index: usize,
    value: NumericValue,
) -> Result<i64, CompileError> {
    match value {
        NumericValue::Integer(i) => Ok(i),
        NumericValue::Float(n)
            if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.223_372_036_854_775_807e18 =>
        {
            Ok(n as i64)
        }
        NumericValue::Float(n) => Err(CompileError::type_error(
            function,
            format!("argument {} must be an integer value, found {}", index + 1, n),
        )),
    }
}
