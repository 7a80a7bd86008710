// Seed validation: 0 < seed <= 2^order - 1, never clamped

use super::error::InvalidArgument;
use super::order::PrbsOrder;
use serde_json::Value;
use std::num::IntErrorKind;

/// Check a typed seed against the register width of `order`.
pub fn validate_seed(order: PrbsOrder, seed: i64) -> Result<u32, InvalidArgument> {
    if seed <= 0 {
        return Err(InvalidArgument::SeedNotPositive(seed.to_string()));
    }
    if seed > order.mask() as i64 {
        return Err(out_of_range(order, seed.to_string()));
    }
    Ok(seed as u32)
}

/// Parse and check a seed given as text.
///
/// Accepts an optional sign, `0x`/`0o`/`0b` radix prefixes and `_`
/// separators, so `"0x7F"`, `"127"` and `"0b111_1111"` are the same seed.
/// Anything that is not an integer literal (`"1.5"`, `"seven"`) is rejected
/// as non-integer rather than guessed at.
pub fn seed_from_text(order: PrbsOrder, text: &str) -> Result<u32, InvalidArgument> {
    let raw = text.trim();
    let (negative, body) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let (radix, digits) = match body.get(..2) {
        Some("0x") | Some("0X") => (16, &body[2..]),
        Some("0o") | Some("0O") => (8, &body[2..]),
        Some("0b") | Some("0B") => (2, &body[2..]),
        _ => (10, body),
    };

    let digits: String = digits
        .chars()
        .filter(|&c| c != '_')
        .collect();
    // from_str_radix takes its own sign, which would let "--5" through
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(InvalidArgument::SeedNotInteger(text.to_string()));
    }

    match u64::from_str_radix(&digits, radix) {
        Ok(magnitude) => {
            if negative || magnitude == 0 {
                Err(InvalidArgument::SeedNotPositive(raw.to_string()))
            } else if magnitude > order.mask() as u64 {
                Err(out_of_range(order, raw.to_string()))
            } else {
                Ok(magnitude as u32)
            }
        }
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => {
            if negative {
                Err(InvalidArgument::SeedNotPositive(raw.to_string()))
            } else {
                Err(out_of_range(order, raw.to_string()))
            }
        }
        Err(_) => Err(InvalidArgument::SeedNotInteger(text.to_string())),
    }
}

/// Check a seed coming from a JSON document.
///
/// Integer numbers and integer strings are accepted; floats (even `5.0`),
/// booleans, arrays, objects and null are not integers.
pub fn seed_from_value(order: PrbsOrder, value: &Value) -> Result<u32, InvalidArgument> {
    match value {
        Value::Number(n) => {
            if let Some(seed) = n.as_i64() {
                validate_seed(order, seed)
            } else if n.as_u64().is_some() {
                Err(out_of_range(order, n.to_string()))
            } else {
                Err(InvalidArgument::SeedNotInteger(n.to_string()))
            }
        }
        Value::String(text) => seed_from_text(order, text),
        other => Err(InvalidArgument::SeedNotInteger(other.to_string())),
    }
}

fn out_of_range(order: PrbsOrder, seed: String) -> InvalidArgument {
    InvalidArgument::SeedOutOfRange {
        order,
        seed,
        max: order.mask(),
    }
}
