//! Extended floating point with a 64-bit significand and an explicit binary
//! exponent. The significand carries no hidden bit and the type does no
//! normalization on its own; callers keep track of which invariants hold.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DiyFp {
    pub mant: u64,
    pub exp: i32,
}

impl DiyFp {
    pub const SIGNIFICAND_SIZE: i32 = 64;

    #[inline]
    pub fn new(mant: u64, exp: i32) -> Self {
        DiyFp { mant, exp }
    }

    /// `self - other`. Both operands must share an exponent and the
    /// difference must be non-negative.
    #[inline]
    pub fn sub(self, other: DiyFp) -> DiyFp {
        debug_assert!(self.exp == other.exp);
        debug_assert!(self.mant >= other.mant);
        DiyFp::new(self.mant - other.mant, self.exp)
    }

    /// Rounded multiply: keeps the high 64 bits of the 128-bit product,
    /// rounding the discarded half up at its midpoint. The result is not
    /// normalized.
    #[inline]
    pub fn mul(self, other: DiyFp) -> DiyFp {
        let product = u128::from(self.mant) * u128::from(other.mant);
        let rounded = product + (1u128 << 63);
        DiyFp::new((rounded >> 64) as u64, self.exp + other.exp + Self::SIGNIFICAND_SIZE)
    }

    /// Shift left until the most significant bit is set.
    #[inline]
    pub fn normalize(&mut self) {
        debug_assert!(self.mant != 0);
        let shift = self.mant.leading_zeros() as i32;
        self.mant <<= shift;
        self.exp -= shift;
    }
}
