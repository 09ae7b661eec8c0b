// Decimal-digit rounding over binary floating point
//
// A plain `round(v * 10^d) / 10^d` misrounds values such as 1.005, which is stored
// as 1.00499999999999989... The value is first nudged by one machine epsilon scaled
// to its own binary exponent, then rounded half away from zero at the target digit.

use crate::value::NumericValue;
use num_traits::{Float, ToPrimitive};

pub const MACHINE_EPSILON: f64 = f64::EPSILON;

// Largest digit count whose power of ten is still a finite double
pub const MAX_POW10_DIGITS: u32 = 308;

// Powers of ten with an exact double representation
const EXACT_POW10: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

// Below 2^53 every whole number is an exact double
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, PartialEq)]
pub enum RoundError {
    NotFinite(f64),
    OutOfRange(f64),
    Overflow { value: i64, digits: i64 },
}

impl RoundError {
    pub fn message(&self) -> String {
        match self {
            RoundError::NotFinite(v) => format!("cannot round {} to an integer", v),
            RoundError::OutOfRange(v) => {
                format!("rounded value {} does not fit in a 64-bit integer", v)
            }
            RoundError::Overflow { value, digits } => format!(
                "rounding {} to {} digits overflows a 64-bit integer",
                value, digits
            ),
        }
    }
}

// RUST CONCEPT: Manual frexp on top of the IEEE-754 decomposition
// Returns (m, e) with value = m * 2^e and 0.5 <= |m| < 1.
// Zero, NaN and infinities come back unchanged with exponent 0.
pub fn frexp(value: f64) -> (f64, i32) {
    if value == 0.0 || !value.is_finite() {
        return (value, 0);
    }
    let (mantissa, exponent, sign) = Float::integer_decode(value);
    // Subnormals have fewer than 53 significant bits; shift the leading one to bit 52
    let shift = mantissa.leading_zeros() as i32 - 11;
    let mantissa = mantissa << shift;
    let exponent = exponent as i32 - shift;
    let fraction = ldexp(mantissa as f64, -53);
    (f64::from(sign) * fraction, exponent + 53)
}

// value * 2^exp, split in two steps so neither power of two leaves the normal range
pub fn ldexp(value: f64, exp: i32) -> f64 {
    let half = exp / 2;
    value * 2f64.powi(half) * 2f64.powi(exp - half)
}

// Adds one machine epsilon to the mantissa, in the direction of its sign, so that
// ties sitting just below a decimal boundary land on the far side for both signs.
pub fn epsilon_corrected(value: f64) -> f64 {
    let (mantissa, exponent) = frexp(value);
    if mantissa == 0.0 || !mantissa.is_finite() {
        return value;
    }
    ldexp(mantissa + MACHINE_EPSILON.copysign(mantissa), exponent)
}

fn whole_to_i64(value: f64) -> Result<i64, RoundError> {
    value.to_i64().ok_or(RoundError::OutOfRange(value))
}

// RUST CONCEPT: Result kind follows the digit count
// digits <= 0 always yields Integer, digits > 0 always yields Float
pub fn round_float(value: f64, digits: i64) -> Result<NumericValue, RoundError> {
    if digits > 0 {
        return Ok(NumericValue::Float(round_fractional(value, digits)));
    }
    if !value.is_finite() {
        return Err(RoundError::NotFinite(value));
    }

    let corrected = epsilon_corrected(value);
    if digits == 0 {
        return whole_to_i64(Float::round(corrected)).map(NumericValue::Integer);
    }

    let places = digits.unsigned_abs();
    if places > u64::from(MAX_POW10_DIGITS) {
        // Every finite double is smaller than half of 10^309
        return Ok(NumericValue::Integer(0));
    }
    let shift = 10f64.powi(places as i32);
    let rounded = Float::round(corrected / shift) * shift;
    whole_to_i64(rounded).map(NumericValue::Integer)
}

// Digits after the point in the shortest representation that round-trips
fn decimal_places(value: f64) -> usize {
    value
        .to_string()
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len())
}

// RUST CONCEPT: Exact arithmetic where it exists, decimal conversion elsewhere
// k / 10^d is correctly rounded while both k and 10^d are exact doubles, so the
// result is the double nearest the decimal k / 10^d. Past that range the decimal
// is produced by formatting and parsed back, which is correctly rounded too.
fn round_fractional(value: f64, digits: i64) -> f64 {
    if !value.is_finite() || decimal_places(value) as i64 <= digits {
        // Already within the requested precision
        return value;
    }
    let corrected = epsilon_corrected(value);
    if let Some(&shift) = EXACT_POW10.get(digits as usize) {
        let scaled = corrected * shift;
        if scaled.abs() < EXACT_INTEGER_LIMIT {
            return Float::round(scaled) / shift;
        }
    }
    // digits is bounded by decimal_places here, at most a few hundred
    format!("{:.*}", digits as usize, corrected)
        .parse()
        .unwrap_or(value)
}

// Integers round exactly: no float detour, so large values keep every digit
pub fn round_integer(value: i64, digits: i64) -> Result<NumericValue, RoundError> {
    if digits == 0 {
        return Ok(NumericValue::Integer(value));
    }
    if digits > 0 {
        return Ok(NumericValue::Float(value as f64));
    }

    let places = digits.unsigned_abs();
    if places > 38 {
        return Ok(NumericValue::Integer(0));
    }
    let shift = 10i128.pow(places as u32);
    let n = i128::from(value);
    let mut quotient = n / shift;
    let remainder = n % shift;
    if 2 * remainder.abs() >= shift {
        quotient += n.signum();
    }
    quotient
        .checked_mul(shift)
        .and_then(|rounded| i64::try_from(rounded).ok())
        .map(NumericValue::Integer)
        .ok_or(RoundError::Overflow { value, digits })
}

pub fn round_value(value: NumericValue, digits: i64) -> Result<NumericValue, RoundError> {
    match value {
        NumericValue::Integer(i) => round_integer(i, digits),
        NumericValue::Float(n) => round_float(n, digits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frexp_normal_values() {
        assert_eq!(frexp(1.0), (0.5, 1));
        assert_eq!(frexp(-8.0), (-0.5, 4));
        assert_eq!(frexp(0.75), (0.75, 0));
        assert_eq!(frexp(9753.14159265359).1, 14);
    }

    #[test]
    fn test_frexp_subnormal_and_special() {
        let tiny = f64::from_bits(1); // smallest positive subnormal
        assert_eq!(frexp(tiny), (0.5, -1073));
        assert_eq!(frexp(0.0), (0.0, 0));
        assert!(frexp(f64::NAN).0.is_nan());
        assert_eq!(frexp(f64::INFINITY), (f64::INFINITY, 0));
    }

    #[test]
    fn test_epsilon_scales_with_exponent() {
        assert_eq!(epsilon_corrected(1.0), 1.0 + 2.0 * f64::EPSILON);
        assert_eq!(epsilon_corrected(1024.0), 1024.0 + 2048.0 * f64::EPSILON);
        assert_eq!(epsilon_corrected(-1.0), -1.0 - 2.0 * f64::EPSILON);
        assert_eq!(epsilon_corrected(0.0), 0.0);
    }

    #[test]
    fn test_round_reference_values() {
        let v = 9753.141592653590;
        assert_eq!(round_float(v, 0), Ok(NumericValue::Integer(9753)));
        assert_eq!(round_float(v, 4), Ok(NumericValue::Float(9753.1416)));
        assert_eq!(round_float(v, -2), Ok(NumericValue::Integer(9800)));
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_float(2.5, 0), Ok(NumericValue::Integer(3)));
        assert_eq!(round_float(-2.5, 0), Ok(NumericValue::Integer(-3)));
        assert_eq!(round_float(0.5, 0), Ok(NumericValue::Integer(1)));
        assert_eq!(round_float(1.005, 2), Ok(NumericValue::Float(1.01)));
        assert_eq!(round_float(-1.005, 2), Ok(NumericValue::Float(-1.01)));
        assert_eq!(round_float(1250.0, -2), Ok(NumericValue::Integer(1300)));
        assert_eq!(round_float(-1250.0, -2), Ok(NumericValue::Integer(-1300)));
    }

    #[test]
    fn test_round_integer_exact() {
        assert_eq!(round_integer(1250, -2), Ok(NumericValue::Integer(1300)));
        assert_eq!(round_integer(-1249, -2), Ok(NumericValue::Integer(-1200)));
        assert_eq!(round_integer(-1250, -2), Ok(NumericValue::Integer(-1300)));
        assert_eq!(round_integer(42, 0), Ok(NumericValue::Integer(42)));
        assert_eq!(round_integer(42, 3), Ok(NumericValue::Float(42.0)));
        assert_eq!(round_integer(i64::MAX, -50), Ok(NumericValue::Integer(0)));
        assert!(matches!(
            round_integer(i64::MAX, -1),
            Err(RoundError::Overflow { .. })
        ));
    }

    #[test]
    fn test_non_finite_inputs() {
        assert!(matches!(round_float(f64::NAN, 0), Err(RoundError::NotFinite(_))));
        assert!(matches!(
            round_float(f64::INFINITY, -1),
            Err(RoundError::NotFinite(_))
        ));
        assert!(matches!(round_float(f64::NAN, 2), Ok(NumericValue::Float(n)) if n.is_nan()));
        assert_eq!(
            round_float(f64::NEG_INFINITY, 2),
            Ok(NumericValue::Float(f64::NEG_INFINITY))
        );
        assert!(matches!(round_float(1e300, 0), Err(RoundError::OutOfRange(_))));
    }

    #[test]
    fn test_extreme_digit_counts() {
        assert_eq!(round_float(1e300, -400), Ok(NumericValue::Integer(0)));
        assert_eq!(round_float(0.1, 400), Ok(NumericValue::Float(0.1)));
        assert_eq!(round_float(1e-10, 400), Ok(NumericValue::Float(1e-10)));
        assert_eq!(round_float(1e20, 3), Ok(NumericValue::Float(1e20)));
        let tiny = f64::from_bits(1);
        assert_eq!(round_float(tiny, 1000), Ok(NumericValue::Float(tiny)));
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(decimal_places(0.1), 1);
        assert_eq!(decimal_places(-2.675), 3);
        assert_eq!(decimal_places(1e20), 0);
        assert_eq!(decimal_places(1e-10), 10);
    }

    #[test]
    fn test_small_values_past_exact_powers_of_ten() {
        assert_eq!(
            round_float(1.1267893081999998e-8, 23),
            Ok(NumericValue::Float(1.1267893082e-8))
        );
        assert_eq!(
            round_float(-1.1267893081999998e-8, 23),
            Ok(NumericValue::Float(-1.1267893082e-8))
        );
        match round_float(1.01234567e-10, 23) {
            Ok(NumericValue::Float(r)) => assert!(decimal_places(r) <= 23, "got {}", r),
            other => panic!("expected a float, got {:?}", other),
        }
    }

    #[test]
    fn test_many_digits_is_idempotent_and_bounded() {
        for digits in [22, 23, 24, 30] {
            for i in 0..2000 {
                let v = i as f64 * 1.234567e-12 + 1e-10;
                let once = match round_float(v, digits) {
                    Ok(NumericValue::Float(r)) => r,
                    other => panic!("round({}, {}) gave {:?}", v, digits, other),
                };
                assert!(
                    decimal_places(once) as i64 <= digits,
                    "round({}, {}) = {}",
                    v,
                    digits,
                    once
                );
                assert_eq!(
                    round_float(once, digits),
                    Ok(NumericValue::Float(once)),
                    "round({}, {}) is not stable",
                    v,
                    digits
                );
            }
        }
    }

    #[test]
    fn test_scaled_values_beyond_exact_integers() {
        // 987654 * 10^10 is past 2^53, so these go through decimal conversion
        for i in 0..500 {
            let v = 987_654.0 + i as f64 * 0.012_345_678_9;
            let once = match round_float(v, 10) {
                Ok(NumericValue::Float(r)) => r,
                other => panic!("round({}, 10) gave {:?}", v, other),
            };
            assert!(decimal_places(once) <= 10, "round({}, 10) = {}", v, once);
            assert!((once - v).abs() <= 0.5e-10 + v * 4.0 * f64::EPSILON);
            assert_eq!(round_float(once, 10), Ok(NumericValue::Float(once)));
        }
    }
}
