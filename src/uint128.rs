//! Small 128-bit accumulator for the fixed-point fractional scaler. Wraps
//! the native `u128` and exposes only the operations the digit loop needs.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct UInt128 {
    bits: u128,
}

impl UInt128 {
    #[inline]
    pub fn new(high: u64, low: u64) -> Self {
        UInt128 {
            bits: (u128::from(high) << 64) | u128::from(low),
        }
    }

    /// Multiply in place by a small factor. Must not overflow 128 bits.
    pub fn mul_small(&mut self, multiplicand: u32) {
        let (product, overflowed) = self.bits.overflowing_mul(u128::from(multiplicand));
        debug_assert!(!overflowed);
        self.bits = product;
    }

    /// Logical shift; positive amounts shift right, negative shift left.
    pub fn shift(&mut self, shift_amount: i32) {
        debug_assert!((-64..=64).contains(&shift_amount));
        if shift_amount >= 0 {
            self.bits >>= shift_amount;
        } else {
            self.bits <<= -shift_amount;
        }
    }

    /// Divide by `2^power`, keeping the remainder in place and returning
    /// the (small) quotient.
    pub fn div_mod_pow2(&mut self, power: i32) -> u32 {
        let quotient = (self.bits >> power) as u32;
        self.bits -= u128::from(quotient) << power;
        quotient
    }

    pub fn is_zero(&self) -> bool {
        self.bits == 0
    }

    pub fn bit_at(&self, position: i32) -> u32 {
        ((self.bits >> position) & 1) as u32
    }
}
