//! Precomputed powers of ten as normalized 64-bit extended floats.
//!
//! The table spans 10^-348 to 10^340 in steps of 8 decimal exponents; each
//! entry is within one ULP of the exact power. Two lookups are provided:
//! one keyed on a binary exponent window (the fast dtoa path) and one keyed
//! on a decimal exponent.

use crate::diyfp::DiyFp;

pub(crate) const DECIMAL_EXPONENT_DISTANCE: i32 = 8;
pub(crate) const MIN_DECIMAL_EXPONENT: i32 = -348;
pub(crate) const MAX_DECIMAL_EXPONENT: i32 = 340;

const CACHED_POWERS_OFFSET: i32 = 348;

// 1 / log2(10), rounded up a hair so the ceiling below never lands short.
const D_1_LOG2_10: f64 = 0.30102999566398114;

struct CachedPower {
    significand: u64,
    binary_exponent: i16,
    decimal_exponent: i16,
}

const fn power(significand: u64, binary_exponent: i16, decimal_exponent: i16) -> CachedPower {
    CachedPower {
        significand,
        binary_exponent,
        decimal_exponent,
    }
}

#[rustfmt::skip]
const CACHED_POWERS: [CachedPower; 87] = [
    power(0xfa8fd5a0081c0288, -1220, -348),
    power(0xbaaee17fa23ebf76, -1193, -340),
    power(0x8b16fb203055ac76, -1166, -332),
    power(0xcf42894a5dce35ea, -1140, -324),
    power(0x9a6bb0aa55653b2d, -1113, -316),
    power(0xe61acf033d1a45df, -1087, -308),
    power(0xab70fe17c79ac6ca, -1060, -300),
    power(0xff77b1fcbebcdc4f, -1034, -292),
    power(0xbe5691ef416bd60c, -1007, -284),
    power(0x8dd01fad907ffc3c, -980, -276),
    power(0xd3515c2831559a83, -954, -268),
    power(0x9d71ac8fada6c9b5, -927, -260),
    power(0xea9c227723ee8bcb, -901, -252),
    power(0xaecc49914078536d, -874, -244),
    power(0x823c12795db6ce57, -847, -236),
    power(0xc21094364dfb5637, -821, -228),
    power(0x9096ea6f3848984f, -794, -220),
    power(0xd77485cb25823ac7, -768, -212),
    power(0xa086cfcd97bf97f4, -741, -204),
    power(0xef340a98172aace5, -715, -196),
    power(0xb23867fb2a35b28e, -688, -188),
    power(0x84c8d4dfd2c63f3b, -661, -180),
    power(0xc5dd44271ad3cdba, -635, -172),
    power(0x936b9fcebb25c996, -608, -164),
    power(0xdbac6c247d62a584, -582, -156),
    power(0xa3ab66580d5fdaf6, -555, -148),
    power(0xf3e2f893dec3f126, -529, -140),
    power(0xb5b5ada8aaff80b8, -502, -132),
    power(0x87625f056c7c4a8b, -475, -124),
    power(0xc9bcff6034c13053, -449, -116),
    power(0x964e858c91ba2655, -422, -108),
    power(0xdff9772470297ebd, -396, -100),
    power(0xa6dfbd9fb8e5b88f, -369, -92),
    power(0xf8a95fcf88747d94, -343, -84),
    power(0xb94470938fa89bcf, -316, -76),
    power(0x8a08f0f8bf0f156b, -289, -68),
    power(0xcdb02555653131b6, -263, -60),
    power(0x993fe2c6d07b7fac, -236, -52),
    power(0xe45c10c42a2b3b06, -210, -44),
    power(0xaa242499697392d3, -183, -36),
    power(0xfd87b5f28300ca0e, -157, -28),
    power(0xbce5086492111aeb, -130, -20),
    power(0x8cbccc096f5088cc, -103, -12),
    power(0xd1b71758e219652c, -77, -4),
    power(0x9c40000000000000, -50, 4),
    power(0xe8d4a51000000000, -24, 12),
    power(0xad78ebc5ac620000, 3, 20),
    power(0x813f3978f8940984, 30, 28),
    power(0xc097ce7bc90715b3, 56, 36),
    power(0x8f7e32ce7bea5c70, 83, 44),
    power(0xd5d238a4abe98068, 109, 52),
    power(0x9f4f2726179a2245, 136, 60),
    power(0xed63a231d4c4fb27, 162, 68),
    power(0xb0de65388cc8ada8, 189, 76),
    power(0x83c7088e1aab65db, 216, 84),
    power(0xc45d1df942711d9a, 242, 92),
    power(0x924d692ca61be758, 269, 100),
    power(0xda01ee641a708dea, 295, 108),
    power(0xa26da3999aef774a, 322, 116),
    power(0xf209787bb47d6b85, 348, 124),
    power(0xb454e4a179dd1877, 375, 132),
    power(0x865b86925b9bc5c2, 402, 140),
    power(0xc83553c5c8965d3d, 428, 148),
    power(0x952ab45cfa97a0b3, 455, 156),
    power(0xde469fbd99a05fe3, 481, 164),
    power(0xa59bc234db398c25, 508, 172),
    power(0xf6c69a72a3989f5c, 534, 180),
    power(0xb7dcbf5354e9bece, 561, 188),
    power(0x88fcf317f22241e2, 588, 196),
    power(0xcc20ce9bd35c78a5, 614, 204),
    power(0x98165af37b2153df, 641, 212),
    power(0xe2a0b5dc971f303a, 667, 220),
    power(0xa8d9d1535ce3b396, 694, 228),
    power(0xfb9b7cd9a4a7443c, 720, 236),
    power(0xbb764c4ca7a44410, 747, 244),
    power(0x8bab8eefb6409c1a, 774, 252),
    power(0xd01fef10a657842c, 800, 260),
    power(0x9b10a4e5e9913129, 827, 268),
    power(0xe7109bfba19c0c9d, 853, 276),
    power(0xac2820d9623bf429, 880, 284),
    power(0x80444b5e7aa7cf85, 907, 292),
    power(0xbf21e44003acdd2d, 933, 300),
    power(0x8e679c2f5e44ff8f, 960, 308),
    power(0xd433179d9c8cb841, 986, 316),
    power(0x9e19db92b4e31ba9, 1013, 324),
    power(0xeb96bf6ebadf77d9, 1039, 332),
    power(0xaf87023b9bf0ee6b, 1066, 340),
];

/// The unique cached power whose binary exponent falls inside
/// `min_exponent..=max_exponent` (the window must be at least as wide as
/// the table's step). Returns the power and its decimal exponent.
pub(crate) fn power_for_binary_exponent_range(
    min_exponent: i32,
    max_exponent: i32,
) -> (DiyFp, i32) {
    let k = ((min_exponent + DiyFp::SIGNIFICAND_SIZE - 1) as f64 * D_1_LOG2_10).ceil() as i32;
    let index = (CACHED_POWERS_OFFSET + k - 1) / DECIMAL_EXPONENT_DISTANCE + 1;
    let cached = &CACHED_POWERS[index as usize];
    debug_assert!(min_exponent <= i32::from(cached.binary_exponent));
    debug_assert!(i32::from(cached.binary_exponent) <= max_exponent);
    (
        DiyFp::new(cached.significand, i32::from(cached.binary_exponent)),
        i32::from(cached.decimal_exponent),
    )
}

/// The cached power with the largest decimal exponent not above
/// `requested_exponent`, which must lie in the table's span. The found
/// exponent is within `DECIMAL_EXPONENT_DISTANCE` below the request.
pub(crate) fn power_for_decimal_exponent(requested_exponent: i32) -> (DiyFp, i32) {
    debug_assert!(requested_exponent >= MIN_DECIMAL_EXPONENT);
    debug_assert!(requested_exponent < MAX_DECIMAL_EXPONENT + DECIMAL_EXPONENT_DISTANCE);
    let index = (requested_exponent + CACHED_POWERS_OFFSET) / DECIMAL_EXPONENT_DISTANCE;
    let cached = &CACHED_POWERS[index as usize];
    let found_exponent = i32::from(cached.decimal_exponent);
    debug_assert!(found_exponent <= requested_exponent);
    debug_assert!(requested_exponent < found_exponent + DECIMAL_EXPONENT_DISTANCE);
    (
        DiyFp::new(cached.significand, i32::from(cached.binary_exponent)),
        found_exponent,
    )
}
