//! Numeric literals with SI multiplier suffixes.

use crate::error::ValueError;

/// Look up the multiplier for a unit suffix character.
///
/// The table is case-sensitive: `M` is mega and `m` is milli. Lower-case
/// `k` is accepted as an alias of `K`.
pub fn multiplier(suffix: char) -> Option<f64> {
    match suffix {
        'T' => Some(1e12),
        'G' => Some(1e9),
        'M' => Some(1e6),
        'K' | 'k' => Some(1e3),
        'm' => Some(1e-3),
        'u' => Some(1e-6),
        'n' => Some(1e-9),
        'p' => Some(1e-12),
        _ => None,
    }
}

/// Parse a number string with an optional unit suffix.
///
/// The numeric prefix is every leading digit, `.` or `-`. The first other
/// character is the suffix; anything after it is ignored, so `"10kOhm"`
/// decodes like `"10k"`.
pub fn parse_value(text: &str) -> Result<f64, ValueError> {
    let split = text
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || c == '.' || c == '-'));

    let (number, suffix) = match split {
        Some((idx, c)) => (&text[..idx], Some(c)),
        None => (text, None),
    };

    let value: f64 = number
        .parse()
        .map_err(|_| ValueError::InvalidNumber(text.to_string()))?;

    match suffix {
        Some(c) => multiplier(c)
            .map(|m| value * m)
            .ok_or(ValueError::UnknownUnit(c)),
        None => Ok(value),
    }
}
