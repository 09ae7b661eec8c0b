// Python lowering of round(): one epsilon-corrected shape for every digit count
//
// Python's round() works on the binary value, so the mantissa is nudged inline
// before rounding. The runtime helper receives the digit count again and collapses
// the result to an int when it is <= 0, which keeps dynamic digit counts correct.

use crate::config::PySrcConfig;
use crate::expr::SrcExpr;

// (frexp(n)[0] + epsilon)*2**frexp(n)[1]
pub fn epsilon_corrected_text(config: &PySrcConfig, number: &SrcExpr) -> String {
    let frexp = format!("{}({})", config.frexp_fn, number.text());
    format!("({}[0] + {})*2**{}[1]", frexp, config.epsilon, frexp)
}

pub fn round_expr(config: &PySrcConfig, number: &SrcExpr, digits: Option<&SrcExpr>) -> SrcExpr {
    let digits = digits.map_or("0", SrcExpr::text);
    tracing::trace!(digits, "lowering round for python");
    let corrected = epsilon_corrected_text(config, number);
    let rounded = SrcExpr::call(&config.round_fn, &[corrected.as_str(), digits]);
    SrcExpr::call(&config.simplify_num_fn, &[rounded.text(), digits])
}
