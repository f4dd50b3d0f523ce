//! Arbitrary-precision unsigned integer used by the exact digit generator
//! and the non-decimal literal path.
//!
//! The representation is a little-endian `Vec<u32>` of limbs with no
//! trailing zero limbs; zero is the empty vector. Quotients taken through
//! [`Bignum::divide_modulo_int_bignum`] are always small (single decimal
//! digits), so division is repeated subtraction rather than a general
//! schoolbook divide.

use core::cmp::Ordering;

use crate::ieee::Double;

const LIMB_BITS: usize = 32;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Bignum {
    limbs: Vec<u32>,
}

impl Bignum {
    pub fn new() -> Self {
        Bignum { limbs: Vec::new() }
    }

    pub fn from_u64(value: u64) -> Self {
        let mut bignum = Bignum::new();
        bignum.assign_u64(value);
        bignum
    }

    /// Parse an unsigned digit string in the given radix (2..=36, letters
    /// in either case). `None` on a byte that is not a digit of the radix.
    pub fn from_radix_str(digits: &[u8], radix: u32) -> Option<Self> {
        debug_assert!((2..=36).contains(&radix));
        let mut value = Bignum::new();
        for &byte in digits {
            let digit = (byte as char).to_digit(radix)?;
            value.multiply_by_u32(radix);
            value.add_u64(u64::from(digit));
        }
        Some(value)
    }

    pub fn from_decimal_str(digits: &str) -> Option<Self> {
        Self::from_radix_str(digits.as_bytes(), 10)
    }

    pub fn from_hex_str(digits: &str) -> Option<Self> {
        Self::from_radix_str(digits.as_bytes(), 16)
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    pub fn assign_u16(&mut self, value: u16) {
        self.limbs.clear();
        if value != 0 {
            self.limbs.push(u32::from(value));
        }
    }

    pub fn assign_u64(&mut self, value: u64) {
        self.limbs.clear();
        self.limbs.push(value as u32);
        self.limbs.push((value >> 32) as u32);
        self.clamp();
    }

    pub fn assign_bignum(&mut self, other: &Bignum) {
        self.limbs.clear();
        self.limbs.extend_from_slice(&other.limbs);
    }

    /// `self = base^exponent` by squaring over the exponent's bits.
    pub fn assign_power(&mut self, base: u32, exponent: usize) {
        debug_assert!(base != 0);
        self.limbs.clear();
        self.limbs.push(1);
        if exponent == 0 {
            return;
        }
        let mut mask = 1usize << (usize::BITS - 1 - exponent.leading_zeros());
        while mask != 0 {
            self.square();
            if exponent & mask != 0 {
                self.multiply_by_u32(base);
            }
            mask >>= 1;
        }
    }

    pub fn add_u64(&mut self, operand: u64) {
        self.add_limbs(&[operand as u32, (operand >> 32) as u32]);
    }

    pub fn add_bignum(&mut self, other: &Bignum) {
        self.add_limbs(&other.limbs);
    }

    fn add_limbs(&mut self, other: &[u32]) {
        if self.limbs.len() < other.len() {
            self.limbs.resize(other.len(), 0);
        }
        let mut carry = 0u64;
        for (i, limb) in self.limbs.iter_mut().enumerate() {
            let addend = other.get(i).copied().unwrap_or(0);
            let sum = u64::from(*limb) + u64::from(addend) + carry;
            *limb = sum as u32;
            carry = sum >> LIMB_BITS;
        }
        if carry != 0 {
            self.limbs.push(carry as u32);
        }
        self.clamp();
    }

    /// `self -= other`. Requires `self >= other`.
    pub fn subtract_bignum(&mut self, other: &Bignum) {
        debug_assert!(self.compare(other) != Ordering::Less);
        let mut borrow = 0i64;
        for (i, limb) in self.limbs.iter_mut().enumerate() {
            let other_limb = other.limbs.get(i).copied().unwrap_or(0);
            let diff = i64::from(*limb) - i64::from(other_limb) - borrow;
            if diff < 0 {
                *limb = (diff + (1i64 << LIMB_BITS)) as u32;
                borrow = 1;
            } else {
                *limb = diff as u32;
                borrow = 0;
            }
        }
        debug_assert!(borrow == 0);
        self.clamp();
    }

    pub fn shift_left(&mut self, shift: usize) {
        if self.is_zero() || shift == 0 {
            return;
        }
        let limb_shift = shift / LIMB_BITS;
        let bit_shift = shift % LIMB_BITS;
        if bit_shift != 0 {
            let mut carry = 0u32;
            for limb in &mut self.limbs {
                let shifted = (*limb << bit_shift) | carry;
                carry = *limb >> (LIMB_BITS - bit_shift);
                *limb = shifted;
            }
            if carry != 0 {
                self.limbs.push(carry);
            }
        }
        if limb_shift != 0 {
            let mut limbs = vec![0u32; limb_shift];
            limbs.extend_from_slice(&self.limbs);
            self.limbs = limbs;
        }
    }

    pub fn multiply_by_u32(&mut self, factor: u32) {
        if factor == 0 {
            self.limbs.clear();
            return;
        }
        let mut carry = 0u64;
        for limb in &mut self.limbs {
            let product = u64::from(*limb) * u64::from(factor) + carry;
            *limb = product as u32;
            carry = product >> LIMB_BITS;
        }
        while carry != 0 {
            self.limbs.push(carry as u32);
            carry >>= LIMB_BITS;
        }
    }

    pub fn multiply_by_u64(&mut self, factor: u64) {
        if factor == 0 {
            self.limbs.clear();
            return;
        }
        let mut carry = 0u128;
        for limb in &mut self.limbs {
            let product = u128::from(*limb) * u128::from(factor) + carry;
            *limb = product as u32;
            carry = product >> LIMB_BITS;
        }
        while carry != 0 {
            self.limbs.push(carry as u32);
            carry >>= LIMB_BITS;
        }
    }

    pub fn times10(&mut self) {
        self.multiply_by_u32(10);
    }

    pub fn multiply_by_power_of_ten(&mut self, exponent: usize) {
        // 10^9 is the largest power of ten in a limb.
        const BIG_CHUNK: u32 = 1_000_000_000;
        const SMALL_POWERS: [u32; 9] = [
            1,
            10,
            100,
            1_000,
            10_000,
            100_000,
            1_000_000,
            10_000_000,
            100_000_000,
        ];
        let mut remaining = exponent;
        while remaining >= 9 {
            self.multiply_by_u32(BIG_CHUNK);
            remaining -= 9;
        }
        if remaining > 0 {
            self.multiply_by_u32(SMALL_POWERS[remaining]);
        }
    }

    /// `self *= self`, by column sums accumulated in a `u128`.
    pub fn square(&mut self) {
        if self.is_zero() {
            return;
        }
        let len = self.limbs.len();
        let mut product = Vec::with_capacity(2 * len);
        let mut acc = 0u128;
        for column in 0..(2 * len - 1) {
            let low = column.saturating_sub(len - 1);
            let high = column.min(len - 1);
            for i in low..=high {
                acc += u128::from(self.limbs[i]) * u128::from(self.limbs[column - i]);
            }
            product.push(acc as u32);
            acc >>= LIMB_BITS;
        }
        while acc != 0 {
            product.push(acc as u32);
            acc >>= LIMB_BITS;
        }
        self.limbs = product;
        self.clamp();
    }

    /// `self %= other`, returning the quotient. The callers only ever have
    /// quotients below ten, so repeated subtraction is the whole division.
    pub fn divide_modulo_int_bignum(&mut self, other: &Bignum) -> u32 {
        debug_assert!(!other.is_zero());
        let mut quotient = 0u32;
        while self.compare(other) != Ordering::Less {
            self.subtract_bignum(other);
            quotient += 1;
        }
        quotient
    }

    pub fn compare(&self, other: &Bignum) -> Ordering {
        match self.limbs.len().cmp(&other.limbs.len()) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        for i in (0..self.limbs.len()).rev() {
            match self.limbs[i].cmp(&other.limbs[i]) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }

    /// The sign of `a + b - c`, without materializing `a + b`. One signed
    /// carry scan over the limbs.
    pub fn plus_compare(a: &Bignum, b: &Bignum, c: &Bignum) -> Ordering {
        let len = a.limbs.len().max(b.limbs.len()).max(c.limbs.len());
        let mut carry = 0i64;
        let mut low_bits_nonzero = false;
        for i in 0..len {
            let sum = carry + i64::from(a.limb(i)) + i64::from(b.limb(i)) - i64::from(c.limb(i));
            if sum as u32 != 0 {
                low_bits_nonzero = true;
            }
            carry = sum >> LIMB_BITS;
        }
        if carry > 0 {
            Ordering::Greater
        } else if carry < 0 {
            Ordering::Less
        } else if low_bits_nonzero {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    pub fn bit_length(&self) -> usize {
        match self.limbs.last() {
            None => 0,
            Some(&top) => self.limbs.len() * LIMB_BITS - top.leading_zeros() as usize,
        }
    }

    /// Round to the nearest double, ties to even. Values past the double
    /// range give infinity.
    pub fn to_f64(&self) -> f64 {
        let bits = self.bit_length();
        if bits <= 64 {
            // The cast already rounds nearest, ties to even.
            let value = u64::from(self.limb(0)) | u64::from(self.limb(1)) << LIMB_BITS;
            return value as f64;
        }

        // Take the top 64 bits plus a sticky flag for everything below.
        let shift = bits - 64;
        let limb_index = shift / LIMB_BITS;
        let bit_shift = shift % LIMB_BITS;
        let mut chunk = 0u128;
        for offset in (0..3).rev() {
            chunk = (chunk << LIMB_BITS) | u128::from(self.limb(limb_index + offset));
        }
        let top = (chunk >> bit_shift) as u64;
        let sticky = self.limbs[..limb_index].iter().any(|&limb| limb != 0)
            || self.limb(limb_index) & ((1u32 << bit_shift) - 1) != 0;

        const DROPPED_BITS: u32 = 64 - Double::SIGNIFICAND_SIZE as u32;
        let mut significand = top >> DROPPED_BITS;
        let remainder = top & ((1u64 << DROPPED_BITS) - 1);
        let halfway = 1u64 << (DROPPED_BITS - 1);
        let round_up =
            remainder > halfway || (remainder == halfway && (sticky || significand & 1 == 1));
        let mut exponent = shift as i32 + DROPPED_BITS as i32;
        if round_up {
            significand += 1;
            if significand >> Double::SIGNIFICAND_SIZE != 0 {
                significand >>= 1;
                exponent += 1;
            }
        }
        let biased = exponent + Double::EXPONENT_BIAS;
        if biased >= 0x7FF {
            return f64::INFINITY;
        }
        f64::from_bits(
            ((biased as u64) << Double::PHYSICAL_SIGNIFICAND_SIZE)
                | (significand & Double::SIGNIFICAND_MASK),
        )
    }

    #[inline]
    fn limb(&self, index: usize) -> u32 {
        self.limbs.get(index).copied().unwrap_or(0)
    }

    fn clamp(&mut self) {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }
    }
}
