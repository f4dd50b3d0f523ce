//! Conversion between IEEE-754 doubles and strings.
//!
//! This crate implements the number/string boundary of an ECMAScript-style
//! runtime: shortest round-trip formatting, fixed/exponential/precision
//! notations, non-decimal radix output, and the inverse literal parser.
//!
//! ```
//! assert_eq!(fpconv::to_shortest_string(0.1), "0.1");
//! assert_eq!(fpconv::to_shortest_string(5e-324), "5e-324");
//! assert_eq!(fpconv::to_fixed_string(1.45, 1).as_deref(), Some("1.4"));
//! assert_eq!(fpconv::to_radix_string(255.0, 16), "ff");
//! assert_eq!(fpconv::parse_numeric_literal("0x1A"), Some(26.0));
//! ```
//!
//! Formatting uses a Grisu-style fast path that produces provably correct
//! shortest digits for the vast majority of inputs, a fixed-point fast
//! path for fixed notation, and an exact big-integer fallback for the
//! rest. `format` then `parse` is the identity on every finite double,
//! including the sign of zero.

mod bignum;
mod bignum_dtoa;
mod cached;
mod diyfp;
mod dtoa;
mod fixed;
mod grisu;
mod ieee;
mod parse;
mod radix;
mod uint128;

pub use crate::dtoa::{
    to_exponential_string, to_fixed_string, to_precision_string, to_shortest_single_string,
    to_shortest_string,
};
pub use crate::parse::parse_numeric_literal;
pub use crate::radix::to_radix_string;
