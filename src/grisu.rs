//! Grisu-style fast digit generation.
//!
//! `fast_dtoa` produces either the shortest digit sequence that
//! round-trips, or a requested number of significant digits. It works in
//! 64-bit extended-float arithmetic with an explicit error bound;
//! when it cannot prove the digits correct it returns `None` and the
//! caller falls back to the exact big-integer generator. The fallback is
//! rare (well under one percent of inputs) but load-bearing.

use crate::cached;
use crate::diyfp::DiyFp;
use crate::ieee::{Double, Single};

// The scaled significand is kept in [2^alpha, 2^gamma]; the digit loops
// below rely on the integral part fitting in 32 bits.
const MINIMAL_TARGET_EXPONENT: i32 = -60;
const MAXIMAL_TARGET_EXPONENT: i32 = -32;

/// Shortest-mode output never exceeds 17 digits (9 for singles).
const FAST_DTOA_MAXIMAL_LENGTH: usize = 17;
const FAST_DTOA_MAXIMAL_SINGLE_LENGTH: usize = 9;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum FastDtoaMode {
    /// Shortest digit run that parses back to the same double.
    Shortest,
    /// Shortest digit run for the value interpreted as a single.
    ShortestSingle,
    /// Exactly `requested_digits` significant digits.
    Precision,
}

/// Generate digits for a strictly positive finite `v`. On success the
/// buffer holds ASCII digits (no dot, no trailing zeros in shortest modes)
/// and the returned value places the decimal point: `v ≈ 0.digits *
/// 10^point`. `None` means the result could not be proven correct.
pub(crate) fn fast_dtoa(
    v: f64,
    mode: FastDtoaMode,
    requested_digits: usize,
    buffer: &mut Vec<u8>,
) -> Option<i32> {
    debug_assert!(v > 0.0);
    debug_assert!(!Double::new(v).is_special());

    let decimal_exponent = match mode {
        FastDtoaMode::Shortest | FastDtoaMode::ShortestSingle => grisu3(v, mode, buffer)?,
        FastDtoaMode::Precision => grisu3_counted(v, requested_digits, buffer)?,
    };
    debug_assert!(match mode {
        FastDtoaMode::Shortest => buffer.len() <= FAST_DTOA_MAXIMAL_LENGTH,
        FastDtoaMode::ShortestSingle => buffer.len() <= FAST_DTOA_MAXIMAL_SINGLE_LENGTH,
        FastDtoaMode::Precision => true,
    });
    Some(buffer.len() as i32 + decimal_exponent)
}

/// Shortest-form core: scale `v` and its boundaries by a cached power of
/// ten so the exponent lands in the target window, then emit digits until
/// the value is pinned inside the rounding interval.
fn grisu3(v: f64, mode: FastDtoaMode, buffer: &mut Vec<u8>) -> Option<i32> {
    let w = Double::new(v).as_normalized_diy_fp();

    // The rounding interval belongs to the narrower type in single mode.
    let (boundary_minus, boundary_plus) = match mode {
        FastDtoaMode::Shortest => Double::new(v).normalized_boundaries(),
        FastDtoaMode::ShortestSingle => {
            let single = Single::new(v as f32);
            single.normalized_boundaries()
        }
        FastDtoaMode::Precision => unreachable!("counted digits use grisu3_counted"),
    };
    debug_assert!(boundary_plus.exp == w.exp);

    let ten_mk_minimal_binary_exponent =
        MINIMAL_TARGET_EXPONENT - (w.exp + DiyFp::SIGNIFICAND_SIZE);
    let ten_mk_maximal_binary_exponent =
        MAXIMAL_TARGET_EXPONENT - (w.exp + DiyFp::SIGNIFICAND_SIZE);
    let (ten_mk, mk) = cached::power_for_binary_exponent_range(
        ten_mk_minimal_binary_exponent,
        ten_mk_maximal_binary_exponent,
    );
    debug_assert!(
        MINIMAL_TARGET_EXPONENT <= w.exp + ten_mk.exp + DiyFp::SIGNIFICAND_SIZE
            && MAXIMAL_TARGET_EXPONENT >= w.exp + ten_mk.exp + DiyFp::SIGNIFICAND_SIZE
    );

    // The products are exact up to 1 ULP; digit_gen accounts for that
    // imprecision when weeding.
    let scaled_w = w.mul(ten_mk);
    debug_assert!(scaled_w.exp == boundary_plus.exp + ten_mk.exp + DiyFp::SIGNIFICAND_SIZE);
    let scaled_boundary_minus = boundary_minus.mul(ten_mk);
    let scaled_boundary_plus = boundary_plus.mul(ten_mk);

    let kappa = digit_gen(scaled_boundary_minus, scaled_w, scaled_boundary_plus, buffer)?;
    Some(kappa - mk)
}

/// Counted-digits core.
fn grisu3_counted(v: f64, requested_digits: usize, buffer: &mut Vec<u8>) -> Option<i32> {
    let w = Double::new(v).as_normalized_diy_fp();
    let ten_mk_minimal_binary_exponent =
        MINIMAL_TARGET_EXPONENT - (w.exp + DiyFp::SIGNIFICAND_SIZE);
    let ten_mk_maximal_binary_exponent =
        MAXIMAL_TARGET_EXPONENT - (w.exp + DiyFp::SIGNIFICAND_SIZE);
    let (ten_mk, mk) = cached::power_for_binary_exponent_range(
        ten_mk_minimal_binary_exponent,
        ten_mk_maximal_binary_exponent,
    );
    debug_assert!(
        MINIMAL_TARGET_EXPONENT <= w.exp + ten_mk.exp + DiyFp::SIGNIFICAND_SIZE
            && MAXIMAL_TARGET_EXPONENT >= w.exp + ten_mk.exp + DiyFp::SIGNIFICAND_SIZE
    );
    let scaled_w = w.mul(ten_mk);

    let kappa = digit_gen_counted(scaled_w, requested_digits, buffer)?;
    Some(kappa - mk)
}

/// Adjust the last digit downward while the result stays within the
/// rounding interval, then check the digits uniquely identify `w`.
fn round_weed(
    buffer: &mut [u8],
    distance_too_high_w: u64,
    unsafe_interval: u64,
    mut rest: u64,
    ten_kappa: u64,
    unit: u64,
) -> bool {
    let small_distance = distance_too_high_w - unit;
    let big_distance = distance_too_high_w + unit;
    // Invariant: too_low < small < w < big < too_high, all scaled.
    debug_assert!(rest <= unsafe_interval);
    let last = buffer.len() - 1;
    while rest < small_distance
        && unsafe_interval - rest >= ten_kappa
        && (rest + ten_kappa < small_distance
            || small_distance - rest >= rest + ten_kappa - small_distance)
    {
        buffer[last] -= 1;
        rest += ten_kappa;
    }

    // If the candidate closest to big_distance is equally good, the digits
    // are ambiguous and the fast path must give up.
    if rest < big_distance
        && unsafe_interval - rest >= ten_kappa
        && (rest + ten_kappa < big_distance || big_distance - rest > rest + ten_kappa - big_distance)
    {
        return false;
    }

    // Safe only when at least `unit` away from both interval ends.
    2 * unit <= rest && rest <= unsafe_interval - 4 * unit
}

/// Counted-mode rounding: round the last digit to nearest and verify the
/// uncertainty cannot flip it.
fn round_weed_counted(
    buffer: &mut [u8],
    rest: u64,
    ten_kappa: u64,
    unit: u64,
    kappa: &mut i32,
) -> bool {
    debug_assert!(rest < ten_kappa);
    if unit >= ten_kappa {
        return false;
    }
    if ten_kappa - unit <= unit {
        return false;
    }
    // Clearly rounds down.
    if ten_kappa - rest > rest && ten_kappa - 2 * rest >= 2 * unit {
        return true;
    }
    // Clearly rounds up: increment with carry, possibly gaining a digit.
    if rest > unit && ten_kappa - (rest - unit) <= rest - unit {
        let mut i = buffer.len() - 1;
        buffer[i] += 1;
        while i > 0 {
            if buffer[i] != b'0' + 10 {
                break;
            }
            buffer[i] = b'0';
            buffer[i - 1] += 1;
            i -= 1;
        }
        if buffer[0] == b'0' + 10 {
            buffer[0] = b'1';
            *kappa += 1;
        }
        return true;
    }
    false
}

const SMALL_POWERS_OF_TEN: [u32; 11] = [
    0, 1, 10, 100, 1_000, 10_000, 100_000, 1_000_000, 10_000_000, 100_000_000, 1_000_000_000,
];

/// Largest power of ten `<= number`, given `number < 2^(number_bits + 1)`.
/// Returns the power and its exponent plus one.
fn biggest_power_ten(number: u32, number_bits: i32) -> (u32, i32) {
    // 1233/4096 is log10(2) scaled by 2^12.
    let mut exponent_plus_one = ((number_bits + 1) * 1233 >> 12) + 1;
    if number < SMALL_POWERS_OF_TEN[exponent_plus_one as usize] {
        exponent_plus_one -= 1;
    }
    (SMALL_POWERS_OF_TEN[exponent_plus_one as usize], exponent_plus_one)
}

/// Emit digits of `w` until they fall inside the interval
/// `(low - 1ulp, high + 1ulp)`, then weed the last digit. Returns kappa,
/// the power of ten of the last emitted digit.
fn digit_gen(low: DiyFp, w: DiyFp, high: DiyFp, buffer: &mut Vec<u8>) -> Option<i32> {
    debug_assert!(low.exp == w.exp && w.exp == high.exp);
    debug_assert!(low.mant + 1 <= high.mant - 1);
    debug_assert!((MINIMAL_TARGET_EXPONENT..=MAXIMAL_TARGET_EXPONENT).contains(&w.exp));

    let mut unit: u64 = 1;
    let too_low = DiyFp::new(low.mant - unit, low.exp);
    let too_high = DiyFp::new(high.mant + unit, high.exp);
    // Anything in (too_low, too_high) rounds back to v; digits must land
    // well inside to be safe against the 1-ulp scaling imprecision.
    let mut unsafe_interval = too_high.sub(too_low);

    let one = DiyFp::new(1u64 << -w.exp, w.exp);
    let mut integrals = (too_high.mant >> -one.exp) as u32;
    let mut fractionals = too_high.mant & (one.mant - 1);

    let (mut divisor, divisor_exponent_plus_one) =
        biggest_power_ten(integrals, DiyFp::SIGNIFICAND_SIZE - (-one.exp));
    let mut kappa = divisor_exponent_plus_one;
    buffer.clear();

    // Integral digits.
    while kappa > 0 {
        let digit = integrals / divisor;
        debug_assert!(digit <= 9);
        buffer.push(b'0' + digit as u8);
        integrals %= divisor;
        kappa -= 1;
        let rest = (u64::from(integrals) << -one.exp) + fractionals;
        if rest < unsafe_interval.mant {
            let weeded = round_weed(
                buffer,
                too_high.sub(w).mant,
                unsafe_interval.mant,
                rest,
                u64::from(divisor) << -one.exp,
                unit,
            );
            return weeded.then_some(kappa);
        }
        divisor /= 10;
    }

    // Fractional digits: multiply everything by 10 and peel off the new
    // integral digit. unit tracks the growing uncertainty.
    debug_assert!(one.exp >= MINIMAL_TARGET_EXPONENT);
    debug_assert!(fractionals < one.mant);
    debug_assert!(u64::MAX / 10 >= one.mant);
    loop {
        fractionals *= 10;
        unit *= 10;
        unsafe_interval = DiyFp::new(unsafe_interval.mant * 10, unsafe_interval.exp);
        let digit = (fractionals >> -one.exp) as u8;
        debug_assert!(digit <= 9);
        buffer.push(b'0' + digit);
        fractionals &= one.mant - 1;
        kappa -= 1;
        if fractionals < unsafe_interval.mant {
            let weeded = round_weed(
                buffer,
                too_high.sub(w).mant * unit,
                unsafe_interval.mant,
                fractionals,
                one.mant,
                unit,
            );
            return weeded.then_some(kappa);
        }
    }
}

/// Emit exactly `requested_digits` digits of `w`, tracking the error bound
/// `w_error`; fails when the requested digits outrun the certainty.
fn digit_gen_counted(w: DiyFp, mut requested_digits: usize, buffer: &mut Vec<u8>) -> Option<i32> {
    debug_assert!((MINIMAL_TARGET_EXPONENT..=MAXIMAL_TARGET_EXPONENT).contains(&w.exp));
    debug_assert!(requested_digits > 0);

    let mut w_error: u64 = 1;
    let one = DiyFp::new(1u64 << -w.exp, w.exp);
    let mut integrals = (w.mant >> -one.exp) as u32;
    let mut fractionals = w.mant & (one.mant - 1);

    let (mut divisor, divisor_exponent_plus_one) =
        biggest_power_ten(integrals, DiyFp::SIGNIFICAND_SIZE - (-one.exp));
    let mut kappa = divisor_exponent_plus_one;
    buffer.clear();

    while kappa > 0 {
        let digit = integrals / divisor;
        debug_assert!(digit <= 9);
        buffer.push(b'0' + digit as u8);
        requested_digits -= 1;
        integrals %= divisor;
        kappa -= 1;
        if requested_digits == 0 {
            break;
        }
        divisor /= 10;
    }

    if requested_digits == 0 {
        let rest = (u64::from(integrals) << -one.exp) + fractionals;
        let weeded = round_weed_counted(
            buffer,
            rest,
            u64::from(divisor) << -one.exp,
            w_error,
            &mut kappa,
        );
        return weeded.then_some(kappa);
    }

    debug_assert!(one.exp >= MINIMAL_TARGET_EXPONENT);
    debug_assert!(fractionals < one.mant);
    debug_assert!(u64::MAX / 10 >= one.mant);
    while requested_digits > 0 && fractionals > w_error {
        fractionals *= 10;
        w_error *= 10;
        let digit = (fractionals >> -one.exp) as u8;
        debug_assert!(digit <= 9);
        buffer.push(b'0' + digit);
        requested_digits -= 1;
        fractionals &= one.mant - 1;
        kappa -= 1;
    }
    if requested_digits != 0 {
        return None;
    }
    let weeded = round_weed_counted(buffer, fractionals, one.mant, w_error, &mut kappa);
    weeded.then_some(kappa)
}
