//! Mode dispatch and string rendering.
//!
//! `double_to_ascii` turns a double into a digit run plus decimal point,
//! trying the fast generators first and falling back to the exact one.
//! The public `to_*_string` functions place the digits into ECMAScript-style
//! decimal or exponential notation.

use crate::bignum_dtoa::bignum_dtoa;
use crate::fixed::fast_fixed_dtoa;
use crate::grisu::{fast_dtoa, FastDtoaMode};
use crate::ieee::Double;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum DtoaMode {
    /// Fewest digits that parse back to the same double.
    Shortest,
    /// Fewest digits that parse back to the same single.
    ShortestSingle,
    /// A fixed number of digits after the decimal point.
    Fixed,
    /// A fixed number of significant digits.
    Precision,
}

/// Fixed notation accepts at most this many digits after the point.
const MAX_FIXED_DIGITS_AFTER_POINT: usize = 100;
/// Largest magnitude fixed notation will represent.
const MAX_FIXED_VALUE: f64 = 1e21;
/// Exponential notation accepts at most this many digits after the point.
const MAX_EXPONENTIAL_DIGITS: i32 = 120;
const MIN_PRECISION_DIGITS: usize = 1;
const MAX_PRECISION_DIGITS: usize = 120;

// Shortest mode uses plain decimal notation for exponents in
// [DECIMAL_IN_SHORTEST_LOW, DECIMAL_IN_SHORTEST_HIGH).
const DECIMAL_IN_SHORTEST_LOW: i32 = -6;
const DECIMAL_IN_SHORTEST_HIGH: i32 = 21;

// Precision mode switches to exponential notation rather than padding with
// more than 6 leading zeros, or any trailing zeros past the point.
const MAX_LEADING_PADDING_ZEROES_IN_PRECISION_MODE: i32 = 6;
const MAX_TRAILING_PADDING_ZEROES_IN_PRECISION_MODE: i32 = 0;

/// Digits-and-point core shared by every notation. Returns the sign and
/// the decimal point position for `0.digits * 10^point`.
pub(crate) fn double_to_ascii(
    value: f64,
    mode: DtoaMode,
    requested_digits: usize,
    buffer: &mut Vec<u8>,
) -> (bool, i32) {
    debug_assert!(!Double::new(value).is_special());
    let sign = Double::new(value).sign() < 0;
    let value = if sign { -value } else { value };

    buffer.clear();
    if mode == DtoaMode::Precision && requested_digits == 0 {
        return (sign, 0);
    }
    if value == 0.0 {
        buffer.push(b'0');
        return (sign, 1);
    }

    let fast = match mode {
        DtoaMode::Shortest => fast_dtoa(value, FastDtoaMode::Shortest, 0, buffer),
        DtoaMode::ShortestSingle => fast_dtoa(value, FastDtoaMode::ShortestSingle, 0, buffer),
        DtoaMode::Fixed => fast_fixed_dtoa(value, requested_digits, buffer),
        DtoaMode::Precision => fast_dtoa(value, FastDtoaMode::Precision, requested_digits, buffer),
    };
    let point = match fast {
        Some(point) => point,
        None => bignum_dtoa(value, mode, requested_digits, buffer),
    };
    (sign, point)
}

/// Rendering of NaN and the infinities, shared by every notation.
pub(crate) fn special_value_string(value: f64) -> String {
    let double = Double::new(value);
    if double.is_infinite() {
        if double.sign() < 0 { "-Infinity" } else { "Infinity" }.to_owned()
    } else {
        debug_assert!(double.is_nan());
        "NaN".to_owned()
    }
}

fn push_digits(result: &mut String, digits: &[u8]) {
    result.extend(digits.iter().map(|&digit| digit as char));
}

fn push_zeros(result: &mut String, count: i32) {
    for _ in 0..count {
        result.push('0');
    }
}

/// Place `digits` in plain decimal notation with exactly
/// `digits_after_point` digits after the point (none means no point).
fn create_decimal_representation(
    digits: &[u8],
    decimal_point: i32,
    digits_after_point: i32,
    result: &mut String,
) {
    let length = digits.len() as i32;
    if decimal_point <= 0 {
        // "0.00digits"
        result.push('0');
        if digits_after_point > 0 {
            result.push('.');
            push_zeros(result, -decimal_point);
            debug_assert!(length <= digits_after_point + decimal_point);
            push_digits(result, digits);
            push_zeros(result, digits_after_point + decimal_point - length);
        }
    } else if decimal_point >= length {
        // "digits00.00"
        push_digits(result, digits);
        push_zeros(result, decimal_point - length);
        if digits_after_point > 0 {
            result.push('.');
            push_zeros(result, digits_after_point);
        }
    } else {
        // "dig.its"
        debug_assert!(digits_after_point > 0);
        debug_assert!(length - decimal_point <= digits_after_point);
        let point = decimal_point as usize;
        push_digits(result, &digits[..point]);
        result.push('.');
        push_digits(result, &digits[point..]);
        push_zeros(result, digits_after_point - (length - decimal_point));
    }
}

/// Place `digits` in exponential notation, `d.igitse±exp`. The exponent
/// sign is always written; the exponent never reaches five digits.
fn create_exponential_representation(digits: &[u8], exponent: i32, result: &mut String) {
    debug_assert!(!digits.is_empty());
    result.push(digits[0] as char);
    if digits.len() != 1 {
        result.push('.');
        push_digits(result, &digits[1..]);
    }
    result.push('e');
    let mut exponent = exponent;
    if exponent < 0 {
        result.push('-');
        exponent = -exponent;
    } else {
        result.push('+');
    }
    debug_assert!(exponent < 10_000);
    let mut itoa_buffer = itoa::Buffer::new();
    result.push_str(itoa_buffer.format(exponent));
}

fn shortest_ieee_string(value: f64, mode: DtoaMode) -> String {
    if Double::new(value).is_special() {
        return special_value_string(value);
    }
    let mut digits = Vec::new();
    let (sign, decimal_point) = double_to_ascii(value, mode, 0, &mut digits);
    let mut result = String::new();
    // Shortest notation keeps the sign of zero so formatting round-trips
    // bit for bit.
    if sign {
        result.push('-');
    }
    let exponent = decimal_point - 1;
    if (DECIMAL_IN_SHORTEST_LOW..DECIMAL_IN_SHORTEST_HIGH).contains(&exponent) {
        create_decimal_representation(
            &digits,
            decimal_point,
            (digits.len() as i32 - decimal_point).max(0),
            &mut result,
        );
    } else {
        create_exponential_representation(&digits, exponent, &mut result);
    }
    result
}

/// Shortest string that parses back to exactly `value`. Decimal notation
/// for decimal exponents in [-6, 21), exponential outside.
pub fn to_shortest_string(value: f64) -> String {
    shortest_ieee_string(value, DtoaMode::Shortest)
}

/// Shortest string that parses back to exactly `value` as an `f32`.
pub fn to_shortest_single_string(value: f32) -> String {
    shortest_ieee_string(f64::from(value), DtoaMode::ShortestSingle)
}

/// Fixed notation with exactly `requested_digits` digits after the point.
/// `None` for more than 100 digits or magnitudes of 1e21 and above.
pub fn to_fixed_string(value: f64, requested_digits: usize) -> Option<String> {
    if Double::new(value).is_special() {
        return Some(special_value_string(value));
    }
    if requested_digits > MAX_FIXED_DIGITS_AFTER_POINT {
        return None;
    }
    if value >= MAX_FIXED_VALUE || value <= -MAX_FIXED_VALUE {
        return None;
    }
    let mut digits = Vec::new();
    let (sign, decimal_point) = double_to_ascii(value, DtoaMode::Fixed, requested_digits, &mut digits);
    let mut result = String::new();
    if sign && value != 0.0 {
        result.push('-');
    }
    create_decimal_representation(&digits, decimal_point, requested_digits as i32, &mut result);
    Some(result)
}

/// Exponential notation with `requested_digits` digits after the point;
/// `-1` means the shortest digit run. `None` outside -1..=120.
pub fn to_exponential_string(value: f64, requested_digits: i32) -> Option<String> {
    if Double::new(value).is_special() {
        return Some(special_value_string(value));
    }
    if !(-1..=MAX_EXPONENTIAL_DIGITS).contains(&requested_digits) {
        return None;
    }
    let mut digits = Vec::new();
    let (sign, decimal_point) = if requested_digits == -1 {
        double_to_ascii(value, DtoaMode::Shortest, 0, &mut digits)
    } else {
        let decomposed = double_to_ascii(
            value,
            DtoaMode::Precision,
            requested_digits as usize + 1,
            &mut digits,
        );
        debug_assert!(digits.len() <= requested_digits as usize + 1);
        digits.resize(requested_digits as usize + 1, b'0');
        decomposed
    };
    let mut result = String::new();
    if sign && value != 0.0 {
        result.push('-');
    }
    create_exponential_representation(&digits, decimal_point - 1, &mut result);
    Some(result)
}

/// `precision` significant digits, in decimal notation unless that would
/// need more than 6 leading zeros or any trailing padding, in which case
/// exponential. `None` outside 1..=120.
pub fn to_precision_string(value: f64, precision: usize) -> Option<String> {
    if Double::new(value).is_special() {
        return Some(special_value_string(value));
    }
    if !(MIN_PRECISION_DIGITS..=MAX_PRECISION_DIGITS).contains(&precision) {
        return None;
    }
    let mut digits = Vec::new();
    let (sign, decimal_point) = double_to_ascii(value, DtoaMode::Precision, precision, &mut digits);
    debug_assert!(digits.len() <= precision);

    let mut result = String::new();
    if sign && value != 0.0 {
        result.push('-');
    }
    let exponent = decimal_point - 1;
    let as_exponential = -decimal_point + 1 > MAX_LEADING_PADDING_ZEROES_IN_PRECISION_MODE
        || decimal_point - precision as i32 > MAX_TRAILING_PADDING_ZEROES_IN_PRECISION_MODE;
    if as_exponential {
        // Exponential form always shows all requested digits.
        digits.resize(precision, b'0');
        create_exponential_representation(&digits, exponent, &mut result);
    } else {
        create_decimal_representation(
            &digits,
            decimal_point,
            (precision as i32 - decimal_point).max(0),
            &mut result,
        );
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_to_ascii_modes() {
        fn check(v: f64, mode: DtoaMode, requested: usize, expected: &str, expected_point: i32) {
            let mut buffer = Vec::new();
            let (sign, point) = double_to_ascii(v, mode, requested, &mut buffer);
            assert_eq!(sign, v.is_sign_negative(), "value {v:?}");
            assert_eq!(point, expected_point, "value {v:?}");
            assert_eq!(buffer, expected.as_bytes(), "value {v:?}");
        }
        fn check_trimmed(v: f64, mode: DtoaMode, requested: usize, expected: &str, expected_point: i32) {
            let mut buffer = Vec::new();
            let (_, point) = double_to_ascii(v, mode, requested, &mut buffer);
            while buffer.last() == Some(&b'0') {
                buffer.pop();
            }
            assert_eq!(point, expected_point, "value {v:?}");
            assert_eq!(buffer, expected.as_bytes(), "value {v:?}");
        }

        check(0.0, DtoaMode::Shortest, 0, "0", 1);
        check(0.0, DtoaMode::ShortestSingle, 0, "0", 1);
        check(0.0, DtoaMode::Fixed, 2, "0", 1);
        check(0.0, DtoaMode::Precision, 3, "0", 1);
        check(1.0, DtoaMode::Shortest, 0, "1", 1);
        check_trimmed(1.0, DtoaMode::Fixed, 3, "1", 1);
        check_trimmed(1.0, DtoaMode::Precision, 3, "1", 1);
        check(1.5, DtoaMode::Shortest, 0, "15", 1);
        check(1.5, DtoaMode::ShortestSingle, 0, "15", 1);
        check(5e-324, DtoaMode::Shortest, 0, "5", -323);
        check(f64::from(1e-45f32), DtoaMode::ShortestSingle, 0, "1", -44);
        check(5e-324, DtoaMode::Fixed, 5, "", -5);
        check(5e-324, DtoaMode::Precision, 5, "49407", -323);
        check(-2147483648.0, DtoaMode::Shortest, 0, "2147483648", 10);
        check(-2147483648.0, DtoaMode::Precision, 5, "21475", 10);
        check(-3.5844466002796428e+298, DtoaMode::Shortest, 0, "35844466002796428", 299);
        check_trimmed(-3.5844466002796428e+298, DtoaMode::Precision, 10, "35844466", 299);
        check(4128420500802942e-24, DtoaMode::Shortest, 0, "4128420500802942", -8);
        check(-3.9292015898194142585311918e-10, DtoaMode::Shortest, 0, "39292015898194143", -9);
        check(4194304.0, DtoaMode::Fixed, 5, "4194304", 7);
        check(4.1855804968213567e298, DtoaMode::Precision, 20, "41855804968213567225", 299);
    }

    #[test]
    fn shortest_notation_selection() {
        assert_eq!(to_shortest_string(0.0), "0");
        assert_eq!(to_shortest_string(-0.0), "-0");
        assert_eq!(to_shortest_string(1.5), "1.5");
        assert_eq!(to_shortest_string(-1.5), "-1.5");
        assert_eq!(to_shortest_string(123456789.0), "123456789");
        assert_eq!(to_shortest_string(1e20), "100000000000000000000");
        assert_eq!(to_shortest_string(1e21), "1e+21");
        assert_eq!(to_shortest_string(0.000001), "0.000001");
        assert_eq!(to_shortest_string(0.0000001), "1e-7");
        assert_eq!(to_shortest_string(1.7976931348623157e308), "1.7976931348623157e+308");
        assert_eq!(to_shortest_string(5e-324), "5e-324");
        assert_eq!(to_shortest_string(f64::NAN), "NaN");
        assert_eq!(to_shortest_string(-f64::NAN), "NaN");
        assert_eq!(to_shortest_string(f64::INFINITY), "Infinity");
        assert_eq!(to_shortest_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(to_shortest_string(4294967272.0), "4294967272");
        assert_eq!(to_shortest_string(-3.5844466002796428e+298), "-3.5844466002796428e+298");
    }

    #[test]
    fn shortest_single_notation() {
        assert_eq!(to_shortest_single_string(0.0), "0");
        assert_eq!(to_shortest_single_string(-0.0), "-0");
        assert_eq!(to_shortest_single_string(1.5), "1.5");
        assert_eq!(to_shortest_single_string(3.4028235e38), "3.4028235e+38");
        assert_eq!(to_shortest_single_string(1e-45), "1e-45");
        assert_eq!(to_shortest_single_string(f32::NAN), "NaN");
        assert_eq!(to_shortest_single_string(f32::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn fixed_notation() {
        assert_eq!(to_fixed_string(0.0, 2).as_deref(), Some("0.00"));
        assert_eq!(to_fixed_string(-0.0, 2).as_deref(), Some("0.00"));
        assert_eq!(to_fixed_string(3.0, 0).as_deref(), Some("3"));
        assert_eq!(to_fixed_string(3.14159, 2).as_deref(), Some("3.14"));
        assert_eq!(to_fixed_string(-3.14159, 4).as_deref(), Some("-3.1416"));
        assert_eq!(to_fixed_string(0.5, 0).as_deref(), Some("1"));
        assert_eq!(to_fixed_string(1.45, 1).as_deref(), Some("1.4"));
        assert_eq!(to_fixed_string(5e-324, 5).as_deref(), Some("0.00000"));
        assert_eq!(to_fixed_string(1234.5678, 6).as_deref(), Some("1234.567800"));
        assert_eq!(to_fixed_string(f64::INFINITY, 2).as_deref(), Some("Infinity"));
        assert_eq!(to_fixed_string(f64::NAN, 2).as_deref(), Some("NaN"));
        // Out-of-range requests.
        assert_eq!(to_fixed_string(1.0, 101), None);
        assert_eq!(to_fixed_string(1e21, 2), None);
        assert_eq!(to_fixed_string(-1e21, 2), None);
        assert_eq!(to_fixed_string(999999999999999999999.0, 2), None);
        assert!(to_fixed_string(99999999999999999999.0, 2).is_some());
    }

    #[test]
    fn exponential_notation() {
        assert_eq!(to_exponential_string(0.0, 2).as_deref(), Some("0.00e+0"));
        assert_eq!(to_exponential_string(0.0, -1).as_deref(), Some("0e+0"));
        assert_eq!(to_exponential_string(1.0, -1).as_deref(), Some("1e+0"));
        assert_eq!(to_exponential_string(1.5, -1).as_deref(), Some("1.5e+0"));
        assert_eq!(to_exponential_string(123456.0, 2).as_deref(), Some("1.23e+5"));
        assert_eq!(to_exponential_string(-123456.0, 2).as_deref(), Some("-1.23e+5"));
        assert_eq!(to_exponential_string(0.00001, 1).as_deref(), Some("1.0e-5"));
        assert_eq!(to_exponential_string(1.95, 1).as_deref(), Some("2.0e+0"));
        assert_eq!(to_exponential_string(5e-324, 0).as_deref(), Some("5e-324"));
        assert_eq!(
            to_exponential_string(1.7976931348623157e308, -1).as_deref(),
            Some("1.7976931348623157e+308")
        );
        assert_eq!(to_exponential_string(f64::NEG_INFINITY, 2).as_deref(), Some("-Infinity"));
        assert_eq!(to_exponential_string(1.0, -2), None);
        assert_eq!(to_exponential_string(1.0, 121), None);
    }

    #[test]
    fn precision_notation() {
        assert_eq!(to_precision_string(0.0, 2).as_deref(), Some("0.0"));
        assert_eq!(to_precision_string(1.0, 3).as_deref(), Some("1.00"));
        assert_eq!(to_precision_string(100.0, 3).as_deref(), Some("100"));
        assert_eq!(to_precision_string(123.456, 4).as_deref(), Some("123.5"));
        assert_eq!(to_precision_string(-123.456, 2).as_deref(), Some("-1.2e+2"));
        assert_eq!(to_precision_string(0.000123456, 2).as_deref(), Some("0.00012"));
        // More than 6 leading zeros switches to exponential.
        assert_eq!(to_precision_string(0.0000001, 2).as_deref(), Some("1.0e-7"));
        assert_eq!(to_precision_string(0.000001, 2).as_deref(), Some("0.0000010"));
        // Any trailing padding before the point switches to exponential.
        assert_eq!(to_precision_string(123456.0, 3).as_deref(), Some("1.23e+5"));
        assert_eq!(to_precision_string(f64::NAN, 3).as_deref(), Some("NaN"));
        assert_eq!(to_precision_string(1.0, 0), None);
        assert_eq!(to_precision_string(1.0, 121), None);
    }
}
