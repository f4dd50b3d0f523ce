use fpconv::{
    parse_numeric_literal, to_exponential_string, to_fixed_string, to_precision_string,
    to_radix_string, to_shortest_single_string, to_shortest_string,
};

#[test]
fn shortest_round_trips_bit_for_bit() {
    let values = [
        0.0,
        -0.0,
        1.0,
        -1.0,
        0.1,
        1.0 / 3.0,
        2.0 / 3.0,
        1.5,
        123456.789,
        5e-324,
        -5e-324,
        f64::MAX,
        -f64::MAX,
        f64::MIN_POSITIVE,
        2.2250738585072011e-308, // largest denormal
        1e21,
        1e-7,
        4.1855804968213567e298,
        3.5844466002796428e+298, // exact-fallback value
        -3.9292015898194142585311918e-10,
    ];
    for value in values {
        let text = to_shortest_string(value);
        let parsed = parse_numeric_literal(&text).unwrap();
        assert_eq!(parsed.to_bits(), value.to_bits(), "{value:?} -> {text:?}");
        // The standard parser agrees on the same text.
        assert_eq!(text.parse::<f64>().unwrap().to_bits(), value.to_bits());
    }
}

#[test]
fn shortest_single_round_trips() {
    let values = [
        0.0f32,
        -0.0,
        1.0,
        0.1,
        1.5,
        f32::MAX,
        1e-45,
        1.1754942e-38, // largest denormal
        3.0 / 7.0,
    ];
    for value in values {
        let text = to_shortest_single_string(value);
        let parsed = parse_numeric_literal(&text).unwrap() as f32;
        assert_eq!(parsed.to_bits(), value.to_bits(), "{value:?} -> {text:?}");
    }
}

#[test]
fn boundary_scenarios() {
    assert_eq!(to_shortest_string(5e-324), "5e-324");
    assert_eq!(to_shortest_string(f64::MAX), "1.7976931348623157e+308");
    assert_eq!(to_shortest_string(1e21), "1e+21");
    assert_eq!(to_shortest_string(1e20), "100000000000000000000");
    assert_eq!(to_shortest_string(0.000001), "0.000001");
    assert_eq!(to_shortest_string(1e-7), "1e-7");
    assert_eq!(parse_numeric_literal(""), Some(0.0));
    assert_eq!(parse_numeric_literal("0x1A"), Some(26.0));
    assert_eq!(parse_numeric_literal("0b102"), None);
    assert_eq!(parse_numeric_literal("5.6234e 124"), None);
}

#[test]
fn counted_modes_match_runtime_output() {
    assert_eq!(to_fixed_string(0.0, 0).as_deref(), Some("0"));
    assert_eq!(to_fixed_string(1.0 / 3.0, 5).as_deref(), Some("0.33333"));
    assert_eq!(to_fixed_string(2.5, 0).as_deref(), Some("3"));
    assert_eq!(to_fixed_string(1.45, 1).as_deref(), Some("1.4"));
    assert_eq!(to_fixed_string(-1234.5678, 2).as_deref(), Some("-1234.57"));
    assert_eq!(to_fixed_string(0.0000001, 2).as_deref(), Some("0.00"));

    assert_eq!(to_exponential_string(123456.789, 3).as_deref(), Some("1.235e+5"));
    assert_eq!(to_exponential_string(0.0001, -1).as_deref(), Some("1e-4"));
    assert_eq!(to_exponential_string(-1.0 / 3.0, 4).as_deref(), Some("-3.3333e-1"));

    assert_eq!(to_precision_string(123456.789, 5).as_deref(), Some("1.2346e+5"));
    assert_eq!(to_precision_string(123456.789, 9).as_deref(), Some("123456.789"));
    assert_eq!(to_precision_string(0.5, 3).as_deref(), Some("0.500"));
}

#[test]
fn shortest_output_is_minimal() {
    let values = [
        0.1,
        1.0 / 3.0,
        123456.789,
        5e-324,
        f64::MAX,
        4.1855804968213567e298,
        3.5844466002796428e+298,
        6.62607015e-34,
        2.5e17,
    ];
    for value in values {
        let text = to_shortest_string(value);
        let count = significant_digits(&text);
        if count <= 1 {
            continue;
        }
        // Rounding to one digit fewer must lose the value.
        let shorter = to_precision_string(value, count - 1).unwrap();
        let reparsed = parse_numeric_literal(&shorter).unwrap();
        assert_ne!(reparsed.to_bits(), value.to_bits(), "{text:?} vs {shorter:?}");
    }
}

fn significant_digits(text: &str) -> usize {
    let mantissa = text.split(['e', 'E']).next().unwrap();
    let digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let leading = digits.iter().take_while(|&&d| d == b'0').count();
    let trailing = digits.iter().rev().take_while(|&&d| d == b'0').count();
    digits.len().saturating_sub(leading + trailing).max(1)
}

#[test]
fn radix_strings() {
    assert_eq!(to_radix_string(255.0, 16), "ff");
    assert_eq!(to_radix_string(-8.625, 8), "-10.5");
    assert_eq!(to_radix_string(1234567.0, 36), "qglj");
    assert!(to_radix_string(0.1, 2).starts_with("0.000110011001100110011"));

    // Integer output reads back exactly in any radix.
    for &value in &[0.0, 1.0, 255.0, 4096.0, 123456789.0, 9007199254740991.0] {
        for radix in [2u32, 8, 16, 36] {
            let text = to_radix_string(value, radix);
            let mut reparsed = 0.0f64;
            for byte in text.bytes() {
                let digit = (byte as char).to_digit(radix).unwrap();
                reparsed = reparsed * f64::from(radix) + f64::from(digit);
            }
            assert_eq!(reparsed, value, "{value} in base {radix} -> {text:?}");
        }
    }
}

#[test]
fn formatting_is_idempotent() {
    let values = [0.1, 1.45, 1.0 / 3.0, 1234.5678, 0.000001, 12345678901234.5];
    for value in values {
        for digits in 0..=10 {
            let first = to_fixed_string(value, digits).unwrap();
            let reparsed = parse_numeric_literal(&first).unwrap();
            let second = to_fixed_string(reparsed, digits).unwrap();
            assert_eq!(first, second, "fixed({value}, {digits})");
        }
        for digits in 0..=17 {
            let first = to_exponential_string(value, digits).unwrap();
            let reparsed = parse_numeric_literal(&first).unwrap();
            let second = to_exponential_string(reparsed, digits).unwrap();
            assert_eq!(first, second, "exponential({value}, {digits})");
        }
    }
}

#[test]
fn specials_render_everywhere() {
    assert_eq!(to_shortest_string(f64::NAN), "NaN");
    assert_eq!(to_fixed_string(f64::INFINITY, 3).as_deref(), Some("Infinity"));
    assert_eq!(to_exponential_string(f64::NEG_INFINITY, 3).as_deref(), Some("-Infinity"));
    assert_eq!(to_precision_string(f64::NAN, 3).as_deref(), Some("NaN"));
    assert_eq!(to_radix_string(f64::INFINITY, 16), "Infinity");
    assert_eq!(parse_numeric_literal("Infinity"), Some(f64::INFINITY));
    assert!(parse_numeric_literal("NaN").is_none());
}
