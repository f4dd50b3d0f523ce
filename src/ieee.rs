//! Raw-bit views of IEEE-754 binary64 and binary32 values.
//!
//! `Double` and `Single` expose the significand/exponent decomposition the
//! digit generators work with: the significand is an integer (hidden bit
//! included for normals) and the exponent is the power of two it is scaled
//! by, so `value = significand * 2^exponent` for all finite inputs.

use crate::diyfp::DiyFp;

#[derive(Clone, Copy)]
pub(crate) struct Double(u64);

impl Double {
    pub const SIGN_MASK: u64 = 0x8000_0000_0000_0000;
    pub const EXPONENT_MASK: u64 = 0x7FF0_0000_0000_0000;
    pub const SIGNIFICAND_MASK: u64 = 0x000F_FFFF_FFFF_FFFF;
    pub const HIDDEN_BIT: u64 = 0x0010_0000_0000_0000;
    pub const QUIET_NAN_BIT: u64 = 0x0008_0000_0000_0000;
    pub const PHYSICAL_SIGNIFICAND_SIZE: i32 = 52;
    pub const SIGNIFICAND_SIZE: i32 = 53;

    pub const EXPONENT_BIAS: i32 = 0x3FF + Self::PHYSICAL_SIGNIFICAND_SIZE;
    const DENORMAL_EXPONENT: i32 = -Self::EXPONENT_BIAS + 1;
    const INFINITY_BITS: u64 = 0x7FF0_0000_0000_0000;

    #[inline]
    pub fn new(value: f64) -> Self {
        Double(value.to_bits())
    }

    #[inline]
    pub fn from_bits(bits: u64) -> Self {
        Double(bits)
    }

    #[inline]
    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }

    /// The significand as an integer, hidden bit included for normals.
    pub fn significand(self) -> u64 {
        let significand = self.0 & Self::SIGNIFICAND_MASK;
        if self.is_denormal() {
            significand
        } else {
            significand + Self::HIDDEN_BIT
        }
    }

    /// The power of two scaling the integer significand.
    pub fn exponent(self) -> i32 {
        if self.is_denormal() {
            return Self::DENORMAL_EXPONENT;
        }
        let biased = ((self.0 & Self::EXPONENT_MASK) >> Self::PHYSICAL_SIGNIFICAND_SIZE) as i32;
        biased - Self::EXPONENT_BIAS
    }

    pub fn is_denormal(self) -> bool {
        self.0 & Self::EXPONENT_MASK == 0
    }

    /// NaN or infinity; these carry no significand/exponent decomposition.
    pub fn is_special(self) -> bool {
        self.0 & Self::EXPONENT_MASK == Self::EXPONENT_MASK
    }

    pub fn is_nan(self) -> bool {
        self.is_special() && self.0 & Self::SIGNIFICAND_MASK != 0
    }

    pub fn is_quiet_nan(self) -> bool {
        self.is_nan() && self.0 & Self::QUIET_NAN_BIT != 0
    }

    pub fn is_signaling_nan(self) -> bool {
        self.is_nan() && self.0 & Self::QUIET_NAN_BIT == 0
    }

    pub fn is_infinite(self) -> bool {
        self.is_special() && self.0 & Self::SIGNIFICAND_MASK == 0
    }

    pub fn sign(self) -> i32 {
        if self.0 & Self::SIGN_MASK == 0 {
            1
        } else {
            -1
        }
    }

    /// The value as a `DiyFp`, not normalized. Requires a positive finite
    /// value.
    pub fn as_diy_fp(self) -> DiyFp {
        debug_assert!(self.sign() > 0);
        debug_assert!(!self.is_special());
        DiyFp::new(self.significand(), self.exponent())
    }

    /// The value as a normalized `DiyFp` (most significant bit set).
    /// Requires a strictly positive finite value.
    pub fn as_normalized_diy_fp(self) -> DiyFp {
        debug_assert!(self.value() > 0.0);
        let mut mant = self.significand();
        let mut exp = self.exponent();
        // Denormals may have leading zeros inside the physical significand.
        while mant & Self::HIDDEN_BIT == 0 {
            mant <<= 1;
            exp -= 1;
        }
        mant <<= (DiyFp::SIGNIFICAND_SIZE - Self::SIGNIFICAND_SIZE) as u32;
        exp -= DiyFp::SIGNIFICAND_SIZE - Self::SIGNIFICAND_SIZE;
        DiyFp::new(mant, exp)
    }

    /// The least double greater than this one. `+inf` maps to itself and
    /// `-0` steps to `+0`.
    pub fn next_double(self) -> f64 {
        if self.0 == Self::INFINITY_BITS {
            return f64::INFINITY;
        }
        if self.sign() < 0 && self.significand() == 0 {
            return 0.0;
        }
        if self.sign() < 0 {
            Double(self.0 - 1).value()
        } else {
            Double(self.0 + 1).value()
        }
    }

    /// The greatest double less than this one. `-inf` maps to itself and
    /// `+0` steps to `-0`.
    pub fn previous_double(self) -> f64 {
        if self.0 == Self::INFINITY_BITS | Self::SIGN_MASK {
            return f64::NEG_INFINITY;
        }
        if self.sign() < 0 {
            return Double(self.0 + 1).value();
        }
        if self.significand() == 0 {
            return -0.0;
        }
        Double(self.0 - 1).value()
    }

    /// True when the boundary to the next-smaller double is closer than the
    /// one to the next-larger double. Happens at powers of two, where the
    /// gap below is half the gap above, except at the denormal border.
    pub fn lower_boundary_is_closer(self) -> bool {
        let physical_significand_is_zero = self.0 & Self::SIGNIFICAND_MASK == 0;
        physical_significand_is_zero && self.exponent() != Self::DENORMAL_EXPONENT
    }

    /// The normalized boundaries `(minus, plus)` of the rounding interval
    /// around this value, both with the exponent of `plus`. Requires a
    /// strictly positive finite value.
    pub fn normalized_boundaries(self) -> (DiyFp, DiyFp) {
        debug_assert!(self.value() > 0.0);
        let v = self.as_diy_fp();
        let mut plus = DiyFp::new((v.mant << 1) + 1, v.exp - 1);
        plus.normalize();
        let minus = if self.lower_boundary_is_closer() {
            DiyFp::new((v.mant << 2) - 1, v.exp - 2)
        } else {
            DiyFp::new((v.mant << 1) - 1, v.exp - 1)
        };
        let minus = DiyFp::new(minus.mant << (minus.exp - plus.exp), plus.exp);
        (minus, plus)
    }
}

#[derive(Clone, Copy)]
pub(crate) struct Single(u32);

impl Single {
    pub const SIGN_MASK: u32 = 0x8000_0000;
    pub const EXPONENT_MASK: u32 = 0x7F80_0000;
    pub const SIGNIFICAND_MASK: u32 = 0x007F_FFFF;
    pub const HIDDEN_BIT: u32 = 0x0080_0000;
    pub const QUIET_NAN_BIT: u32 = 0x0040_0000;
    pub const PHYSICAL_SIGNIFICAND_SIZE: i32 = 23;

    const EXPONENT_BIAS: i32 = 0x7F + Self::PHYSICAL_SIGNIFICAND_SIZE;
    const DENORMAL_EXPONENT: i32 = -Self::EXPONENT_BIAS + 1;

    #[inline]
    pub fn new(value: f32) -> Self {
        Single(value.to_bits())
    }

    #[inline]
    pub fn from_bits(bits: u32) -> Self {
        Single(bits)
    }

    #[inline]
    pub fn value(self) -> f32 {
        f32::from_bits(self.0)
    }

    pub fn significand(self) -> u32 {
        let significand = self.0 & Self::SIGNIFICAND_MASK;
        if self.is_denormal() {
            significand
        } else {
            significand + Self::HIDDEN_BIT
        }
    }

    pub fn exponent(self) -> i32 {
        if self.is_denormal() {
            return Self::DENORMAL_EXPONENT;
        }
        let biased = ((self.0 & Self::EXPONENT_MASK) >> Self::PHYSICAL_SIGNIFICAND_SIZE) as i32;
        biased - Self::EXPONENT_BIAS
    }

    pub fn is_denormal(self) -> bool {
        self.0 & Self::EXPONENT_MASK == 0
    }

    pub fn is_special(self) -> bool {
        self.0 & Self::EXPONENT_MASK == Self::EXPONENT_MASK
    }

    pub fn is_nan(self) -> bool {
        self.is_special() && self.0 & Self::SIGNIFICAND_MASK != 0
    }

    pub fn is_quiet_nan(self) -> bool {
        self.is_nan() && self.0 & Self::QUIET_NAN_BIT != 0
    }

    pub fn is_signaling_nan(self) -> bool {
        self.is_nan() && self.0 & Self::QUIET_NAN_BIT == 0
    }

    pub fn sign(self) -> i32 {
        if self.0 & Self::SIGN_MASK == 0 {
            1
        } else {
            -1
        }
    }

    pub fn as_diy_fp(self) -> DiyFp {
        debug_assert!(self.sign() > 0);
        debug_assert!(!self.is_special());
        DiyFp::new(u64::from(self.significand()), self.exponent())
    }

    pub fn lower_boundary_is_closer(self) -> bool {
        let physical_significand_is_zero = self.0 & Self::SIGNIFICAND_MASK == 0;
        physical_significand_is_zero && self.exponent() != Self::DENORMAL_EXPONENT
    }

    /// Same contract as [`Double::normalized_boundaries`], in the float's
    /// own (wider) rounding interval.
    pub fn normalized_boundaries(self) -> (DiyFp, DiyFp) {
        debug_assert!(self.value() > 0.0);
        let v = self.as_diy_fp();
        let mut plus = DiyFp::new((v.mant << 1) + 1, v.exp - 1);
        plus.normalize();
        let minus = if self.lower_boundary_is_closer() {
            DiyFp::new((v.mant << 2) - 1, v.exp - 2)
        } else {
            DiyFp::new((v.mant << 1) - 1, v.exp - 1)
        };
        let minus = DiyFp::new(minus.mant << (minus.exp - plus.exp), plus.exp);
        (minus, plus)
    }
}

#[cfg(test)]
mod tests {
    use super::{Double, Single};

    #[test]
    fn double_as_diy_fp() {
        let ordered = Double::from_bits(0x0123_4567_89AB_CDEF);
        let fp = ordered.as_diy_fp();
        assert_eq!(fp.exp, 0x12 - 0x3FF - 52);
        assert_eq!(fp.mant, 0x0013_4567_89AB_CDEF);

        let min_double = Double::from_bits(1);
        let fp = min_double.as_diy_fp();
        assert_eq!(fp.exp, -0x3FF - 52 + 1);
        assert_eq!(fp.mant, 1);

        let max_double = Double::from_bits(0x7FEF_FFFF_FFFF_FFFF);
        let fp = max_double.as_diy_fp();
        assert_eq!(fp.exp, 0x7FE - 0x3FF - 52);
        assert_eq!(fp.mant, 0x001F_FFFF_FFFF_FFFF);
    }

    #[test]
    fn double_as_normalized_diy_fp() {
        let ordered = Double::from_bits(0x0123_4567_89AB_CDEF);
        let fp = ordered.as_normalized_diy_fp();
        assert_eq!(fp.exp, 0x12 - 0x3FF - 52 - 11);
        assert_eq!(fp.mant, 0x0013_4567_89AB_CDEF << 11);

        let min_double = Double::from_bits(1);
        let fp = min_double.as_normalized_diy_fp();
        assert_eq!(fp.exp, -0x3FF - 52 + 1 - 63);
        assert_eq!(fp.mant, 0x8000_0000_0000_0000);

        let max_double = Double::from_bits(0x7FEF_FFFF_FFFF_FFFF);
        let fp = max_double.as_normalized_diy_fp();
        assert_eq!(fp.exp, 0x7FE - 0x3FF - 52 - 11);
        assert_eq!(fp.mant, 0x001F_FFFF_FFFF_FFFF << 11);
    }

    #[test]
    fn double_classification() {
        assert!(Double::new(f64::NAN).is_nan());
        assert!(Double::new(f64::NAN).is_quiet_nan());
        assert!(Double::from_bits(0x7FF0_0000_0000_0001).is_signaling_nan());
        assert!(!Double::from_bits(0x7FF0_0000_0000_0001).is_quiet_nan());
        assert!(Double::new(f64::INFINITY).is_special());
        assert!(Double::new(f64::NEG_INFINITY).is_infinite());
        assert!(!Double::new(f64::INFINITY).is_nan());
        assert!(Double::from_bits(1).is_denormal());
        assert!(Double::from_bits(0x000F_FFFF_FFFF_FFFF).is_denormal());
        assert!(!Double::from_bits(0x0010_0000_0000_0000).is_denormal());
        assert_eq!(Double::new(-1.5).sign(), -1);
        assert_eq!(Double::new(1.5).sign(), 1);
        assert_eq!(Double::new(-0.0).sign(), -1);
        assert_eq!(Double::new(0.0).sign(), 1);
    }

    #[test]
    fn double_next_previous() {
        assert_eq!(Double::new(0.0).next_double(), 5e-324);
        assert_eq!(Double::new(-0.0).next_double(), 0.0);
        assert_eq!(Double::new(-0.0).next_double().to_bits(), 0);
        assert_eq!(Double::new(-5e-324).next_double(), -0.0);
        assert_eq!(Double::new(f64::MAX).next_double(), f64::INFINITY);
        assert_eq!(Double::new(f64::INFINITY).next_double(), f64::INFINITY);

        assert_eq!(Double::new(0.0).previous_double().to_bits(), (-0.0f64).to_bits());
        assert_eq!(Double::new(-0.0).previous_double(), -5e-324);
        assert_eq!(Double::new(5e-324).previous_double(), 0.0);
        assert_eq!(Double::new(f64::NEG_INFINITY).previous_double(), f64::NEG_INFINITY);
        assert_eq!(Double::new(-f64::MAX).previous_double(), f64::NEG_INFINITY);

        // Stepping is the inverse of itself away from the edges.
        let v = 1.5e-10;
        assert_eq!(Double::new(Double::new(v).next_double()).previous_double(), v);
    }

    #[test]
    fn double_boundaries() {
        // Generic values have symmetric boundaries.
        let v = Double::new(1.5);
        let w = v.as_normalized_diy_fp();
        let (minus, plus) = v.normalized_boundaries();
        assert_eq!(plus.exp, w.exp);
        assert_eq!(minus.exp, w.exp);
        assert_eq!(plus.mant - w.mant, w.mant - minus.mant);

        // Powers of two are closer to their lower neighbor.
        let v = Double::new(1.0);
        let w = v.as_normalized_diy_fp();
        let (minus, plus) = v.normalized_boundaries();
        assert_eq!(plus.mant - w.mant, 2 * (w.mant - minus.mant));

        // The smallest normal borders denormals of the same spacing.
        let v = Double::from_bits(0x0010_0000_0000_0000);
        assert!(!v.lower_boundary_is_closer());
        let w = v.as_normalized_diy_fp();
        let (minus, plus) = v.normalized_boundaries();
        assert_eq!(plus.mant - w.mant, w.mant - minus.mant);

        let v = Double::from_bits(0x0020_0000_0000_0000);
        assert!(v.lower_boundary_is_closer());
    }

    #[test]
    fn single_as_diy_fp() {
        let ordered = Single::from_bits(0x0123_4567);
        let fp = ordered.as_diy_fp();
        assert_eq!(fp.exp, 0x2 - 0x7F - 23);
        assert_eq!(fp.mant, 0x00A3_4567);

        let min_float = Single::from_bits(1);
        let fp = min_float.as_diy_fp();
        assert_eq!(fp.exp, -0x7F - 23 + 1);
        assert_eq!(fp.mant, 1);

        let max_float = Single::from_bits(0x7F7F_FFFF);
        let fp = max_float.as_diy_fp();
        assert_eq!(fp.exp, 0xFE - 0x7F - 23);
        assert_eq!(fp.mant, 0x00FF_FFFF);
    }

    #[test]
    fn single_classification() {
        assert!(Single::new(f32::NAN).is_quiet_nan());
        assert!(Single::from_bits(0x7F80_0001).is_signaling_nan());
        assert!(Single::from_bits(1).is_denormal());
        assert!(!Single::from_bits(0x0080_0000).is_denormal());
        assert_eq!(Single::new(-1.5).sign(), -1);
    }

    #[test]
    fn single_boundaries() {
        let v = Single::new(1.5);
        let w = {
            let mut fp = v.as_diy_fp();
            fp.normalize();
            fp
        };
        let (minus, plus) = v.normalized_boundaries();
        assert_eq!(plus.exp, w.exp);
        assert_eq!(plus.mant - w.mant, w.mant - minus.mant);

        // Powers of two keep the asymmetric interval in float space too.
        let v = Single::new(4.0);
        let w = {
            let mut fp = v.as_diy_fp();
            fp.normalize();
            fp
        };
        let (minus, plus) = v.normalized_boundaries();
        assert_eq!(plus.mant - w.mant, 2 * (w.mant - minus.mant));
    }
}
