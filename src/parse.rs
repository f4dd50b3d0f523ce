//! Numeric literal parsing, the inverse of the formatting pipeline.
//!
//! Accepts optionally signed decimal literals (with dot and exponent),
//! `Infinity`, and `0b`/`0o`/`0x` integer literals in either prefix case.
//! Decimal text is validated here and then handed to the standard float
//! conversion; non-decimal digits build an exact [`Bignum`] that is
//! rounded to the nearest double.

use crate::bignum::Bignum;

/// Parse a trimmed numeric literal. Empty (or all-whitespace) input is
/// `0.0`; any malformed construct is `None`.
pub fn parse_numeric_literal(input: &str) -> Option<f64> {
    LiteralParser::new(input).parse()
}

struct LiteralParser<'a> {
    input: &'a [u8],
    cursor: usize,
    radix: u32,
}

impl<'a> LiteralParser<'a> {
    fn new(input: &'a str) -> Self {
        LiteralParser {
            input: input.trim().as_bytes(),
            cursor: 0,
            radix: 10,
        }
    }

    fn is_done(&self) -> bool {
        self.cursor >= self.input.len()
    }

    fn peek(&self) -> u8 {
        self.input[self.cursor]
    }

    fn parse(mut self) -> Option<f64> {
        if self.input.is_empty() {
            return Some(0.0);
        }

        let sign = match self.peek() {
            b'-' => {
                self.cursor += 1;
                -1.0
            }
            b'+' => {
                self.cursor += 1;
                1.0
            }
            _ => 1.0,
        };
        if self.is_done() {
            return None;
        }

        // "Infinity" must consume the entire remaining input.
        if &self.input[self.cursor..] == b"Infinity" {
            return Some(f64::INFINITY * sign);
        }

        if self.peek() == b'0' {
            self.cursor += 1;
            if self.is_done() {
                // Multiplying keeps the sign: "-0" is negative zero.
                return Some(0.0 * sign);
            }
            let radix = match self.peek() {
                b'b' | b'B' => Some(2),
                b'o' | b'O' => Some(8),
                b'x' | b'X' => Some(16),
                _ => None,
            };
            if let Some(radix) = radix {
                self.radix = radix;
                self.cursor += 1;
                if self.is_done() {
                    return None;
                }
            }
        }

        // Skip redundant leading zeros ("0x00ff", "00012").
        while !self.is_done() && self.peek() == b'0' {
            self.cursor += 1;
        }
        if self.is_done() {
            return Some(0.0 * sign);
        }

        // A literal like "0.5" or "0e5" needs its zero back so the decimal
        // text below stays well formed.
        let mut value_start = self.cursor;
        if (self.peek() == b'.' || self.peek() == b'e' || self.peek() == b'E')
            && self.cursor > 0
            && self.input[self.cursor - 1] == b'0'
        {
            value_start -= 1;
        }

        let mut seen_dot = false;
        let mut seen_exponent = false;
        while !self.is_done() {
            if self.parse_digit() {
                continue;
            }
            match self.peek() {
                b'.' => {
                    if self.radix != 10 || seen_dot || seen_exponent {
                        return None;
                    }
                    seen_dot = true;
                    self.cursor += 1;
                }
                b'e' | b'E' => {
                    if self.radix != 10 || seen_exponent {
                        return None;
                    }
                    seen_exponent = true;
                    self.cursor += 1;
                    if !self.is_done() && (self.peek() == b'+' || self.peek() == b'-') {
                        self.cursor += 1;
                    }
                    // Exponent digits are required; an empty exponent falls
                    // out of the decimal conversion below.
                }
                _ => return None,
            }
        }

        let text = &self.input[value_start..];
        if self.radix == 10 {
            let text = core::str::from_utf8(text).ok()?;
            let value: f64 = text.parse().ok()?;
            Some(value * sign)
        } else {
            debug_assert!(!seen_dot && !seen_exponent);
            let value = Bignum::from_radix_str(text, self.radix)?;
            Some(value.to_f64() * sign)
        }
    }

    /// Consume one digit of the current radix, reporting whether one was
    /// there.
    fn parse_digit(&mut self) -> bool {
        let valid = match self.radix {
            2 => matches!(self.peek(), b'0'..=b'1'),
            8 => matches!(self.peek(), b'0'..=b'7'),
            10 => self.peek().is_ascii_digit(),
            16 => self.peek().is_ascii_hexdigit(),
            _ => unreachable!("prefix parsing only yields radix 2, 8, 10, 16"),
        };
        if valid {
            self.cursor += 1;
        }
        valid
    }
}
