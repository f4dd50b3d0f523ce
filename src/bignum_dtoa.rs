//! Exact digit generation through big-integer arithmetic.
//!
//! The value `v = significand * 2^exponent` is represented as a fraction
//! `numerator / denominator`, pre-scaled by the estimated power of ten so
//! the first digit is either the one before or after the decimal point.
//! In shortest mode two more bignums track the distance to the neighboring
//! doubles. Slower than the fast path by orders of magnitude, but never
//! wrong, and the fallback target whenever the fast path gives up.

use core::cmp::Ordering;

use crate::bignum::Bignum;
use crate::dtoa::DtoaMode;
use crate::ieee::{Double, Single};

/// Generate digits for a strictly positive finite `v`. The buffer receives
/// ASCII digits and the return value is the decimal point position; unlike
/// the fast path this cannot fail.
pub(crate) fn bignum_dtoa(
    v: f64,
    mode: DtoaMode,
    requested_digits: usize,
    buffer: &mut Vec<u8>,
) -> i32 {
    debug_assert!(v > 0.0);
    debug_assert!(!Double::new(v).is_special());

    let (significand, exponent, lower_boundary_is_closer) = match mode {
        DtoaMode::ShortestSingle => {
            let single = Single::new(v as f32);
            (
                u64::from(single.significand()),
                single.exponent(),
                single.lower_boundary_is_closer(),
            )
        }
        _ => {
            let double = Double::new(v);
            (
                double.significand(),
                double.exponent(),
                double.lower_boundary_is_closer(),
            )
        }
    };
    let need_boundary_deltas = matches!(mode, DtoaMode::Shortest | DtoaMode::ShortestSingle);
    let is_even = significand & 1 == 0;
    let estimated_power = estimate_power(normalized_exponent(significand, exponent));

    buffer.clear();
    // Fixed mode can bail before any big arithmetic when every requested
    // digit lies above the first significant digit.
    if mode == DtoaMode::Fixed && -estimated_power - 1 > requested_digits as i32 {
        return -(requested_digits as i32);
    }

    let mut numerator = Bignum::new();
    let mut denominator = Bignum::new();
    let mut delta_minus = Bignum::new();
    let mut delta_plus = Bignum::new();
    initial_scaled_start_values(
        significand,
        exponent,
        lower_boundary_is_closer,
        estimated_power,
        need_boundary_deltas,
        &mut numerator,
        &mut denominator,
        &mut delta_minus,
        &mut delta_plus,
    );

    let mut decimal_point = 0;
    fixup_multiply10(
        estimated_power,
        is_even,
        &mut decimal_point,
        &mut numerator,
        &mut denominator,
        &mut delta_minus,
        &mut delta_plus,
    );

    match mode {
        DtoaMode::Shortest | DtoaMode::ShortestSingle => generate_shortest_digits(
            &mut numerator,
            &denominator,
            &mut delta_minus,
            &mut delta_plus,
            is_even,
            buffer,
        ),
        DtoaMode::Fixed => bignum_to_fixed(
            requested_digits,
            &mut decimal_point,
            &mut numerator,
            &mut denominator,
            buffer,
        ),
        DtoaMode::Precision => generate_counted_digits(
            requested_digits,
            &mut decimal_point,
            &mut numerator,
            &mut denominator,
            buffer,
        ),
    }
    decimal_point
}

/// Binary exponent of `v` with the significand normalized to the hidden
/// bit, so denormals estimate correctly too.
fn normalized_exponent(significand: u64, exponent: i32) -> i32 {
    debug_assert!(significand != 0);
    let mut significand = significand;
    let mut exponent = exponent;
    while significand & Double::HIDDEN_BIT == 0 {
        significand <<= 1;
        exponent -= 1;
    }
    exponent
}

/// Estimate of `floor(log10 v)`, possibly one too low but never too high.
fn estimate_power(exponent: i32) -> i32 {
    // log10(2). The small offset keeps exact powers of ten from landing a
    // unit too high through the ceiling.
    const K_1_LOG2_10: f64 = 0.30102999566398114;
    let estimate =
        ((exponent + Double::SIGNIFICAND_SIZE - 1) as f64 * K_1_LOG2_10 - 1e-10).ceil();
    estimate as i32
}

#[allow(clippy::too_many_arguments)]
fn initial_scaled_start_values(
    significand: u64,
    exponent: i32,
    lower_boundary_is_closer: bool,
    estimated_power: i32,
    need_boundary_deltas: bool,
    numerator: &mut Bignum,
    denominator: &mut Bignum,
    delta_minus: &mut Bignum,
    delta_plus: &mut Bignum,
) {
    if exponent >= 0 {
        // v = (significand * 2^exponent) / 10^estimated_power
        numerator.assign_u64(significand);
        numerator.shift_left(exponent as usize);
        denominator.assign_power(10, estimated_power as usize);
        if need_boundary_deltas {
            // Boundaries are at half a unit; scale everything by two so
            // the deltas stay integral.
            denominator.shift_left(1);
            numerator.shift_left(1);
            delta_plus.assign_u16(1);
            delta_plus.shift_left(exponent as usize);
            delta_minus.assign_u16(1);
            delta_minus.shift_left(exponent as usize);
        }
    } else if estimated_power >= 0 {
        // v = significand / (2^-exponent * 10^estimated_power)
        numerator.assign_u64(significand);
        denominator.assign_power(10, estimated_power as usize);
        denominator.shift_left(-exponent as usize);
        if need_boundary_deltas {
            denominator.shift_left(1);
            numerator.shift_left(1);
            delta_plus.assign_u16(1);
            delta_minus.assign_u16(1);
        }
    } else {
        // v = (significand * 10^-estimated_power) / 2^-exponent
        numerator.assign_power(10, -estimated_power as usize);
        if need_boundary_deltas {
            delta_plus.assign_bignum(numerator);
            delta_minus.assign_bignum(numerator);
        }
        numerator.multiply_by_u64(significand);
        denominator.assign_u16(1);
        denominator.shift_left(-exponent as usize);
        if need_boundary_deltas {
            denominator.shift_left(1);
            numerator.shift_left(1);
        }
    }

    // At a power of two the upper gap is twice the lower one.
    if need_boundary_deltas && lower_boundary_is_closer {
        denominator.shift_left(1);
        numerator.shift_left(1);
        delta_plus.shift_left(1);
    }
}

/// The estimate may be one too low; multiply the numerator (and deltas) by
/// ten if the first digit would otherwise land after the decimal point.
fn fixup_multiply10(
    estimated_power: i32,
    is_even: bool,
    decimal_point: &mut i32,
    numerator: &mut Bignum,
    denominator: &mut Bignum,
    delta_minus: &mut Bignum,
    delta_plus: &mut Bignum,
) {
    let in_range = if is_even {
        Bignum::plus_compare(numerator, delta_plus, denominator) != Ordering::Less
    } else {
        Bignum::plus_compare(numerator, delta_plus, denominator) == Ordering::Greater
    };
    if in_range {
        *decimal_point = estimated_power + 1;
    } else {
        *decimal_point = estimated_power;
        numerator.times10();
        if delta_minus.compare(delta_plus) == Ordering::Equal {
            delta_minus.times10();
            delta_plus.assign_bignum(delta_minus);
        } else {
            delta_minus.times10();
            delta_plus.times10();
        }
    }
}

/// Emit digits until the remainder is provably inside the rounding
/// interval, then round the last digit toward `v`.
fn generate_shortest_digits(
    numerator: &mut Bignum,
    denominator: &Bignum,
    delta_minus: &mut Bignum,
    delta_plus: &mut Bignum,
    is_even: bool,
    buffer: &mut Vec<u8>,
) {
    buffer.clear();
    loop {
        let digit = numerator.divide_modulo_int_bignum(denominator);
        debug_assert!(digit <= 9);
        buffer.push(b'0' + digit as u8);

        // Can we stop, and if so in which direction do we round? For even
        // significands the boundary itself still converts back to v.
        let in_delta_room_minus = if is_even {
            numerator.compare(delta_minus) != Ordering::Greater
        } else {
            numerator.compare(delta_minus) == Ordering::Less
        };
        let in_delta_room_plus = if is_even {
            Bignum::plus_compare(numerator, delta_plus, denominator) != Ordering::Less
        } else {
            Bignum::plus_compare(numerator, delta_plus, denominator) == Ordering::Greater
        };

        if !in_delta_room_minus && !in_delta_room_plus {
            numerator.times10();
            delta_minus.times10();
            delta_plus.times10();
            continue;
        }
        let last = buffer.len() - 1;
        if in_delta_room_minus && in_delta_room_plus {
            // Both candidates round-trip; take the closer one, ties to the
            // even digit.
            match Bignum::plus_compare(numerator, numerator, denominator) {
                Ordering::Less => {}
                Ordering::Greater => {
                    debug_assert!(buffer[last] != b'9');
                    buffer[last] += 1;
                }
                Ordering::Equal => {
                    if (buffer[last] - b'0') % 2 != 0 {
                        debug_assert!(buffer[last] != b'9');
                        buffer[last] += 1;
                    }
                }
            }
        } else if in_delta_room_plus && !in_delta_room_minus {
            debug_assert!(buffer[last] != b'9');
            buffer[last] += 1;
        }
        return;
    }
}

/// Emit exactly `count` digits, rounding the last one by the remainder.
fn generate_counted_digits(
    count: usize,
    decimal_point: &mut i32,
    numerator: &mut Bignum,
    denominator: &mut Bignum,
    buffer: &mut Vec<u8>,
) {
    debug_assert!(count >= 1);
    buffer.clear();
    buffer.resize(count, b'0');
    for i in 0..count - 1 {
        let digit = numerator.divide_modulo_int_bignum(denominator);
        debug_assert!(digit <= 9);
        buffer[i] = b'0' + digit as u8;
        numerator.times10();
    }

    let mut digit = numerator.divide_modulo_int_bignum(denominator);
    if Bignum::plus_compare(numerator, numerator, denominator) != Ordering::Less {
        digit += 1;
    }
    debug_assert!(digit <= 10);
    buffer[count - 1] = b'0' + digit as u8;

    // The rounded digit may be ten; carry leftward.
    for i in (1..count).rev() {
        if buffer[i] != b'0' + 10 {
            break;
        }
        buffer[i] = b'0';
        buffer[i - 1] += 1;
    }
    if buffer[0] == b'0' + 10 {
        buffer[0] = b'1';
        *decimal_point += 1;
    }
}

/// Fixed mode on top of counted digits: the digit count follows from the
/// decimal point, and a request entirely below the value rounds to either
/// nothing or a single leading one.
fn bignum_to_fixed(
    requested_digits: usize,
    decimal_point: &mut i32,
    numerator: &mut Bignum,
    denominator: &mut Bignum,
    buffer: &mut Vec<u8>,
) {
    if -(*decimal_point) > requested_digits as i32 {
        *decimal_point = -(requested_digits as i32);
        buffer.clear();
        return;
    }
    if -(*decimal_point) == requested_digits as i32 {
        // The first significant digit sits just past the cut: 0.5 of the
        // last requested digit decides between nothing and 1.
        denominator.times10();
        if Bignum::plus_compare(numerator, numerator, denominator) != Ordering::Less {
            buffer.clear();
            buffer.push(b'1');
            *decimal_point += 1;
        } else {
            buffer.clear();
        }
        return;
    }
    let needed_digits = (*decimal_point + requested_digits as i32) as usize;
    generate_counted_digits(needed_digits, decimal_point, numerator, denominator, buffer);
}
