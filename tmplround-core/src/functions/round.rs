// round(number) / round(number, digits)
//
// Rounds half away from zero to `digits` decimal places (0 when omitted).
// Zero or negative digit counts produce an int, positive ones a float.

use crate::config::EmitConfig;
use crate::expr::SrcExpr;
use crate::function::{
    BuiltinFunction, TargetArg, arity_error, integer_value, require_integer, require_numeric,
};
use crate::literal::classify_digits;
use crate::rounding;
use crate::targets::{js_src, py_src};
use crate::value::{CompileError, NumericValue};
use std::ops::RangeInclusive;

pub const NAME: &str = "round";

const ARITY: RangeInclusive<usize> = 1..=2;

// RUST CONCEPT: Arity dispatch as a tagged variant instead of overloads
enum RoundArgs<T> {
    Value(T),
    ValueAndDigits(T, T),
}

fn split_args<T>(args: &[T]) -> Result<RoundArgs<&T>, CompileError> {
    match args {
        [value] => Ok(RoundArgs::Value(value)),
        [value, digits] => Ok(RoundArgs::ValueAndDigits(value, digits)),
        _ => Err(arity_error(NAME, ARITY, args.len())),
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoundFunction {
    config: EmitConfig,
}

impl RoundFunction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EmitConfig) -> Self {
        Self { config }
    }

    // Checks both static types before any source is generated
    fn typed_args<'s, 'a>(
        &self,
        args: &'s [TargetArg<'a>],
    ) -> Result<(&'s TargetArg<'a>, Option<&'s TargetArg<'a>>), CompileError> {
        let (number, digits) = match split_args(args)? {
            RoundArgs::Value(number) => (number, None),
            RoundArgs::ValueAndDigits(number, digits) => (number, Some(digits)),
        };
        require_numeric(NAME, 0, number.node.static_type())?;
        if let Some(digits) = digits {
            require_integer(NAME, 1, digits.node.static_type())?;
        }
        Ok((number, digits))
    }
}

impl BuiltinFunction for RoundFunction {
    fn name(&self) -> &'static str {
        NAME
    }

    fn valid_arg_counts(&self) -> RangeInclusive<usize> {
        ARITY
    }

    fn doc(&self) -> &'static str {
        "Round a number to a given number of decimal digits (half away from zero).\n\
         Usage: round(number) or round(number, digits)\n\
         Examples: round(9753.14159) => 9753, round(9753.14159, 2) => 9753.14, \
         round(9753.14159, -2) => 9800"
    }

    fn compute_direct(&self, args: &[NumericValue]) -> Result<NumericValue, CompileError> {
        let (value, digits) = match split_args(args)? {
            RoundArgs::Value(value) => (*value, 0),
            RoundArgs::ValueAndDigits(value, digits) => (*value, integer_value(NAME, 1, *digits)?),
        };
        rounding::round_value(value, digits)
            .map_err(|err| CompileError::domain_error(NAME, err.message()))
    }

    fn compute_for_js_src(&self, args: &[TargetArg<'_>]) -> Result<SrcExpr, CompileError> {
        let (number, digits) = self.typed_args(args)?;
        let verdict = classify_digits(digits.map(|d| d.node));
        Ok(js_src::round_expr(
            &self.config.js,
            number.expr,
            digits.map(|d| d.expr),
            verdict,
        ))
    }

    fn compute_for_py_src(&self, args: &[TargetArg<'_>]) -> Result<SrcExpr, CompileError> {
        let (number, digits) = self.typed_args(args)?;
        Ok(py_src::round_expr(
            &self.config.py,
            number.expr,
            digits.map(|d| d.expr),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{ATOMIC, Operator};
    use crate::node::ExprNode;
    use crate::value::ArgType;

    #[test]
    fn test_compute_direct() {
        let round = RoundFunction::new();
        let float0 = NumericValue::Float(9753.141592653590);

        assert_eq!(round.compute_direct(&[float0]), Ok(NumericValue::Integer(9753)));
        assert_eq!(
            round.compute_direct(&[float0, NumericValue::Integer(0)]),
            Ok(NumericValue::Integer(9753))
        );
        assert_eq!(
            round.compute_direct(&[float0, NumericValue::Integer(4)]),
            Ok(NumericValue::Float(9753.1416))
        );
        assert_eq!(
            round.compute_direct(&[float0, NumericValue::Integer(-2)]),
            Ok(NumericValue::Integer(9800))
        );
    }

    #[test]
    fn test_compute_direct_errors() {
        let round = RoundFunction::new();

        let result = round.compute_direct(&[]);
        assert!(matches!(result, Err(CompileError::Arity { found: 0, .. })));

        let one = NumericValue::Integer(1);
        let result = round.compute_direct(&[one, one, one]);
        assert!(matches!(result, Err(CompileError::Arity { found: 3, .. })));

        let result = round.compute_direct(&[NumericValue::Float(1.5), NumericValue::Float(0.5)]);
        assert!(matches!(result, Err(CompileError::Type { function: "round", .. })));

        let result = round.compute_direct(&[NumericValue::Float(f64::NAN)]);
        assert!(matches!(result, Err(CompileError::Domain { .. })));
    }

    #[test]
    fn test_compute_for_js_src() {
        let round = RoundFunction::new();
        let float_expr = SrcExpr::atom("FLOAT_JS_CODE");
        let float_node = ExprNode::var("x", ArgType::Float);
        let number = TargetArg::new(&float_expr, &float_node);

        assert_eq!(
            round.compute_for_js_src(&[number]),
            Ok(SrcExpr::new("Math.round(FLOAT_JS_CODE)", ATOMIC))
        );

        let zero_expr = SrcExpr::atom("0");
        let zero_node = ExprNode::Int(0);
        assert_eq!(
            round.compute_for_js_src(&[number, TargetArg::new(&zero_expr, &zero_node)]),
            Ok(SrcExpr::new("Math.round(FLOAT_JS_CODE)", ATOMIC))
        );

        let four_expr = SrcExpr::atom("4");
        let four_node = ExprNode::Int(4);
        assert_eq!(
            round.compute_for_js_src(&[number, TargetArg::new(&four_expr, &four_node)]),
            Ok(SrcExpr::new(
                "Math.round(FLOAT_JS_CODE * 10000) / 10000",
                Operator::DivideBy.precedence()
            ))
        );

        let minus_two_expr = SrcExpr::new("-2", Operator::Negative.precedence());
        let minus_two_node = ExprNode::negate(ExprNode::Int(2));
        assert_eq!(
            round.compute_for_js_src(&[number, TargetArg::new(&minus_two_expr, &minus_two_node)]),
            Ok(SrcExpr::new(
                "Math.round(FLOAT_JS_CODE / 100) * 100",
                Operator::Times.precedence()
            ))
        );

        let digits_expr = SrcExpr::atom("NUM_DIGITS_JS_CODE");
        let digits_node = ExprNode::var("numDigits", ArgType::Int);
        assert_eq!(
            round.compute_for_js_src(&[number, TargetArg::new(&digits_expr, &digits_node)]),
            Ok(SrcExpr::new(
                "Math.round(FLOAT_JS_CODE * Math.pow(10, NUM_DIGITS_JS_CODE)) / \
                 Math.pow(10, NUM_DIGITS_JS_CODE)",
                Operator::DivideBy.precedence()
            ))
        );
    }

    #[test]
    fn test_compute_for_py_src() {
        let round = RoundFunction::new();
        let modified_number =
            "(math.frexp(number)[0] + sys.float_info.epsilon)*2**math.frexp(number)[1]";

        let float_expr = SrcExpr::atom("number");
        let float_node = ExprNode::var("number", ArgType::Float);
        let number = TargetArg::new(&float_expr, &float_node);

        let expected = |digits: &str| {
            SrcExpr::new(
                format!(
                    "runtime.simplify_num(round({}, {}), {})",
                    modified_number, digits, digits
                ),
                ATOMIC,
            )
        };

        assert_eq!(round.compute_for_py_src(&[number]), Ok(expected("0")));

        let zero_expr = SrcExpr::atom("0");
        let zero_node = ExprNode::Int(0);
        assert_eq!(
            round.compute_for_py_src(&[number, TargetArg::new(&zero_expr, &zero_node)]),
            Ok(expected("0"))
        );

        let four_expr = SrcExpr::atom("4");
        let four_node = ExprNode::Int(4);
        assert_eq!(
            round.compute_for_py_src(&[number, TargetArg::new(&four_expr, &four_node)]),
            Ok(expected("4"))
        );

        let minus_two_expr = SrcExpr::new("-2", Operator::Negative.precedence());
        let minus_two_node = ExprNode::negate(ExprNode::Int(2));
        assert_eq!(
            round.compute_for_py_src(&[number, TargetArg::new(&minus_two_expr, &minus_two_node)]),
            Ok(expected("-2"))
        );

        let digits_expr = SrcExpr::atom("digits");
        let digits_node = ExprNode::var("digits", ArgType::Int);
        assert_eq!(
            round.compute_for_py_src(&[number, TargetArg::new(&digits_expr, &digits_node)]),
            Ok(expected("digits"))
        );
    }

    #[test]
    fn test_source_emission_type_errors() {
        let round = RoundFunction::new();

        let str_expr = SrcExpr::atom("'abc'");
        let str_node = ExprNode::Str("abc".to_string());
        let result = round.compute_for_js_src(&[TargetArg::new(&str_expr, &str_node)]);
        assert!(matches!(result, Err(CompileError::Type { .. })));

        let number_expr = SrcExpr::atom("x");
        let number_node = ExprNode::var("x", ArgType::Number);
        let float_digits_expr = SrcExpr::atom("1.5");
        let float_digits_node = ExprNode::Float(1.5);
        let result = round.compute_for_py_src(&[
            TargetArg::new(&number_expr, &number_node),
            TargetArg::new(&float_digits_expr, &float_digits_node),
        ]);
        assert!(matches!(result, Err(CompileError::Type { .. })));

        let result = round.compute_for_js_src(&[]);
        assert!(matches!(result, Err(CompileError::Arity { .. })));
    }
}
