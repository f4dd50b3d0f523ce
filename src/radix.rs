//! Non-decimal radix representation.
//!
//! Unlike the decimal pipeline this works in plain double arithmetic: an
//! error bound `delta` starts at half an ULP of the input and doubles with
//! every emitted fractional digit, and emission stops once the remaining
//! fraction is inside the bound. Digits past the bound would be noise, so
//! the output is correct to within `delta` but not the shortest exact
//! representation, and round-trips only approximately.

use crate::dtoa::special_value_string;
use crate::ieee::Double;

const RADIX_CHARS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// Worst case is radix 2: up to 1075 fractional digits and 1025 integral
// ones, written outward from the middle of one buffer.
const BUFFER_SIZE: usize = 2200;

/// Render `value` in the given radix (2..=36, not 10 — use the decimal
/// formatters for that). The radix bounds are a caller precondition.
pub fn to_radix_string(value: f64, radix: u32) -> String {
    assert!((2..=36).contains(&radix) && radix != 10, "unsupported radix {radix}");
    if Double::new(value).is_special() {
        return special_value_string(value);
    }

    let mut buffer = [b' '; BUFFER_SIZE];
    let mut integer_cursor = BUFFER_SIZE / 2;
    let mut fraction_cursor = integer_cursor;
    let negative = value < 0.0;
    let value = if negative { -value } else { value };
    let radix = radix as f64;

    let mut integer = value.floor();
    let mut fraction = value - integer;
    // Half the distance to the next double, clamped away from zero.
    let mut delta = (0.5 * (Double::new(value).next_double() - value))
        .max(Double::new(0.0).next_double());
    debug_assert!(delta > 0.0);

    if fraction >= delta {
        buffer[fraction_cursor] = b'.';
        fraction_cursor += 1;
        loop {
            fraction *= radix;
            delta *= radix;
            let digit = fraction as u32;
            buffer[fraction_cursor] = RADIX_CHARS[digit as usize];
            fraction_cursor += 1;
            fraction -= f64::from(digit);
            // Round half to even on the last digit, carrying backward.
            if fraction > 0.5 || (fraction == 0.5 && digit & 1 != 0) {
                if fraction + delta > 1.0 {
                    loop {
                        fraction_cursor -= 1;
                        if fraction_cursor == BUFFER_SIZE / 2 {
                            debug_assert!(buffer[fraction_cursor] == b'.');
                            integer += 1.0;
                            break;
                        }
                        let c = buffer[fraction_cursor];
                        let digit = if c > b'9' {
                            u32::from(c - b'a') + 10
                        } else {
                            u32::from(c - b'0')
                        };
                        if digit + 1 < radix as u32 {
                            buffer[fraction_cursor] = RADIX_CHARS[(digit + 1) as usize];
                            fraction_cursor += 1;
                            break;
                        }
                    }
                    break;
                }
            }
            if fraction < delta {
                break;
            }
        }
    }

    // Integral digits beyond 2^53 carry no information; back-fill zeros
    // until the quotient is exact again.
    while Double::new(integer / radix).exponent() > 0 {
        integer /= radix;
        integer_cursor -= 1;
        buffer[integer_cursor] = b'0';
    }
    loop {
        let remainder = integer % radix;
        debug_assert!(remainder.floor() == remainder);
        integer_cursor -= 1;
        buffer[integer_cursor] = RADIX_CHARS[remainder as usize];
        integer = (integer - remainder) / radix;
        if integer <= 0.0 {
            break;
        }
    }

    if negative {
        integer_cursor -= 1;
        buffer[integer_cursor] = b'-';
    }

    buffer[integer_cursor..fraction_cursor]
        .iter()
        .map(|&byte| byte as char)
        .collect()
}
