//! # tmplround core
//!
//! The `round` built-in of a template compiler's expression layer.
//!
//! One rounding semantics, three realizations:
//!
//! - **Direct evaluation** when both arguments are known at compile time
//!   ([`BuiltinFunction::compute_direct`])
//! - **JavaScript source** using power-of-ten scaling, constant-folded when the
//!   digit count is a literal ([`BuiltinFunction::compute_for_js_src`])
//! - **Python source** with an inline epsilon correction and a runtime helper that
//!   settles the int/float result kind ([`BuiltinFunction::compute_for_py_src`])
//!
//! Rounding is half away from zero at the targeted digit. Zero or negative digit
//! counts yield an int, positive ones a float.
//!
//! ## Example
//!
//! ```
//! use tmplround_core::{ArgType, ExprNode, FunctionRegistry, NumericValue, SrcExpr, TargetArg};
//!
//! let registry = FunctionRegistry::with_builtins();
//!
//! let value = registry
//!     .compute_direct(
//!         "round",
//!         &[NumericValue::Float(9753.14159), NumericValue::Integer(-2)],
//!         None,
//!     )
//!     .unwrap();
//! assert_eq!(value, NumericValue::Integer(9800));
//!
//! let number = SrcExpr::atom("price");
//! let number_node = ExprNode::var("price", ArgType::Float);
//! let digits = SrcExpr::atom("2");
//! let digits_node = ExprNode::Int(2);
//! let js = registry
//!     .compute_for_js_src(
//!         "round",
//!         &[TargetArg::new(&number, &number_node), TargetArg::new(&digits, &digits_node)],
//!         None,
//!     )
//!     .unwrap();
//! assert_eq!(js.text(), "Math.round(price * 100) / 100");
//! ```

// Public modules
pub mod builtins;
pub mod config;
pub mod expr;
pub mod function;
pub mod functions;
pub mod literal;
pub mod node;
pub mod rounding;
pub mod source;
pub mod targets;
pub mod value;

// Re-exports for convenience
pub use builtins::{FunctionRegistry, register_builtins, register_builtins_with_config};
pub use config::{EmitConfig, JsSrcConfig, PySrcConfig};
pub use expr::{ATOMIC, Operator, SrcExpr};
pub use function::{BuiltinFunction, TargetArg};
pub use functions::round::RoundFunction;
pub use literal::{ConstantQuery, DigitsVerdict, classify_digits};
pub use node::ExprNode;
pub use source::SourcePos;
pub use value::{ArgType, CompileError, NumericValue};
