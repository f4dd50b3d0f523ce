//! Fast path for fixed-notation requests: exact digit generation from the
//! raw significand using 64-bit (or 128-bit) fixed-point arithmetic.
//!
//! Works whenever the binary exponent is at most 20 and at most 20
//! fractional digits are requested; everything else falls back to the
//! exact big-integer generator.

use crate::ieee::Double;
use crate::uint128::UInt128;

const MAX_U32: u64 = 0xFFFF_FFFF;
const FIVE_17: u64 = 0xB1_A2BC_2EC5; // 5^17
const TEN_7: u32 = 10_000_000;

/// Produce the digits of `v` with up to `fractional_count` digits after
/// the decimal point. Digits land in `buffer` without leading or trailing
/// zeros; the return value is the decimal point position (`None` when the
/// input is out of this path's range).
pub(crate) fn fast_fixed_dtoa(
    v: f64,
    fractional_count: usize,
    buffer: &mut Vec<u8>,
) -> Option<i32> {
    let significand = Double::new(v).significand();
    let exponent = Double::new(v).exponent();
    // Above 2^73 (and for more than 20 fractional digits) the fixed-point
    // windows below stop fitting.
    if exponent > 20 {
        return None;
    }
    if fractional_count > 20 {
        return None;
    }

    buffer.clear();
    let mut decimal_point = 0i32;
    if exponent + Double::PHYSICAL_SIGNIFICAND_SIZE + 1 > 64 {
        // The value is significand * 2^exponent with exponent in (11, 20].
        // Divide by 5^17 (the largest power of five fitting 64 bits whose
        // quotient still fits 32 bits) to split into two digit groups.
        let divisor_power = 17;
        let quotient;
        let remainder;
        if exponent > divisor_power {
            let dividend = significand << (exponent - divisor_power);
            quotient = (dividend / FIVE_17) as u32;
            remainder = (dividend % FIVE_17) << divisor_power;
        } else {
            let divisor = FIVE_17 << (divisor_power - exponent);
            quotient = (significand / divisor) as u32;
            remainder = (significand % divisor) << exponent;
        }
        fill_digits_32(quotient, buffer);
        fill_digits_64_fixed_length(remainder, buffer);
        decimal_point = buffer.len() as i32;
    } else if exponent >= 0 {
        // Fits 64 bits whole.
        let integral = significand << exponent;
        fill_digits_64(integral, buffer);
        decimal_point = buffer.len() as i32;
    } else if exponent > -Double::SIGNIFICAND_SIZE {
        // Integral and fractional parts split inside the significand.
        let integrals = significand >> -exponent;
        let fractionals = significand - (integrals << -exponent);
        if integrals > MAX_U32 {
            fill_digits_64(integrals, buffer);
        } else {
            fill_digits_32(integrals as u32, buffer);
        }
        decimal_point = buffer.len() as i32;
        fill_fractionals(fractionals, exponent, fractional_count, buffer, &mut decimal_point);
    } else if exponent < -128 {
        // Every requested digit lies above the value's first significant
        // digit; the result is an empty digit run.
        decimal_point = -(fractional_count as i32);
    } else {
        decimal_point = 0;
        fill_fractionals(significand, exponent, fractional_count, buffer, &mut decimal_point);
    }

    trim_zeros(buffer, &mut decimal_point);
    if buffer.is_empty() {
        // Everything rounded away.
        decimal_point = -(fractional_count as i32);
    }
    Some(decimal_point)
}

/// Emit the fractional digits of `fractionals * 2^exponent` (a value in
/// [0, 1)), rounding the cut half-even.
fn fill_fractionals(
    fractionals: u64,
    exponent: i32,
    fractional_count: usize,
    buffer: &mut Vec<u8>,
    decimal_point: &mut i32,
) {
    debug_assert!((-128..=0).contains(&exponent));
    if -exponent <= 64 {
        debug_assert!(fractionals >> 56 == 0);
        let mut fractionals = fractionals;
        // point is the fixed-point position: fractionals < 2^point.
        let mut point = -exponent;
        for _ in 0..fractional_count {
            if fractionals == 0 {
                break;
            }
            // Multiply by 10 as (x * 5) / 2 folded into the point shift.
            fractionals *= 5;
            point -= 1;
            let digit = (fractionals >> point) as u8;
            debug_assert!(digit <= 9);
            buffer.push(b'0' + digit);
            fractionals -= u64::from(digit) << point;
        }
        if fractionals != 0 && point > 0 && (fractionals >> (point - 1)) & 1 == 1 {
            round_up(buffer, decimal_point);
        }
    } else {
        debug_assert!(64 < -exponent && -exponent <= 128);
        let mut fractionals128 = UInt128::new(fractionals, 0);
        fractionals128.shift(-exponent - 64);
        let mut point = 128;
        for _ in 0..fractional_count {
            if fractionals128.is_zero() {
                break;
            }
            fractionals128.mul_small(5);
            point -= 1;
            let digit = fractionals128.div_mod_pow2(point) as u8;
            debug_assert!(digit <= 9);
            buffer.push(b'0' + digit);
        }
        if fractionals128.bit_at(point - 1) == 1 {
            round_up(buffer, decimal_point);
        }
    }
}

/// Increment the last digit, carrying leftward; an all-nines buffer
/// becomes "1" with the decimal point shifted.
fn round_up(buffer: &mut Vec<u8>, decimal_point: &mut i32) {
    if buffer.is_empty() {
        buffer.push(b'1');
        *decimal_point = 1;
        return;
    }
    let last = buffer.len() - 1;
    buffer[last] += 1;
    for i in (1..buffer.len()).rev() {
        if buffer[i] != b'0' + 10 {
            return;
        }
        buffer[i] = b'0';
        buffer[i - 1] += 1;
    }
    if buffer[0] == b'0' + 10 {
        buffer[0] = b'1';
        *decimal_point += 1;
    }
}

fn fill_digits_32_fixed_length(number: u32, requested_length: usize, buffer: &mut Vec<u8>) {
    let start = buffer.len();
    buffer.resize(start + requested_length, b'0');
    let mut number = number;
    for i in (0..requested_length).rev() {
        buffer[start + i] = b'0' + (number % 10) as u8;
        number /= 10;
    }
    debug_assert!(number == 0);
}

fn fill_digits_32(number: u32, buffer: &mut Vec<u8>) {
    let start = buffer.len();
    let mut number = number;
    while number != 0 {
        buffer.push(b'0' + (number % 10) as u8);
        number /= 10;
    }
    buffer[start..].reverse();
}

fn fill_digits_64_fixed_length(number: u64, buffer: &mut Vec<u8>) {
    // Three 7-digit groups cover anything below 10^21.
    let part2 = (number % u64::from(TEN_7)) as u32;
    let number = number / u64::from(TEN_7);
    let part1 = (number % u64::from(TEN_7)) as u32;
    let part0 = (number / u64::from(TEN_7)) as u32;

    fill_digits_32_fixed_length(part0, 3, buffer);
    fill_digits_32_fixed_length(part1, 7, buffer);
    fill_digits_32_fixed_length(part2, 7, buffer);
}

fn fill_digits_64(number: u64, buffer: &mut Vec<u8>) {
    let part2 = (number % u64::from(TEN_7)) as u32;
    let number = number / u64::from(TEN_7);
    let part1 = (number % u64::from(TEN_7)) as u32;
    let part0 = (number / u64::from(TEN_7)) as u32;

    if part0 != 0 {
        fill_digits_32(part0, buffer);
        fill_digits_32_fixed_length(part1, 7, buffer);
        fill_digits_32_fixed_length(part2, 7, buffer);
    } else if part1 != 0 {
        fill_digits_32(part1, buffer);
        fill_digits_32_fixed_length(part2, 7, buffer);
    } else {
        fill_digits_32(part2, buffer);
    }
}

fn trim_zeros(buffer: &mut Vec<u8>, decimal_point: &mut i32) {
    while buffer.last() == Some(&b'0') {
        buffer.pop();
    }
    let leading_zeros = buffer.iter().take_while(|&&digit| digit == b'0').count();
    if leading_zeros != 0 {
        buffer.drain(..leading_zeros);
        *decimal_point -= leading_zeros as i32;
    }
}
