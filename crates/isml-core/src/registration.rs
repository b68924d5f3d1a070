//! Registration number formatting.
//!
//! A registration number has the shape `ISML<StateCode><CenterCode><Sequence>`:
//!
//! - `StateCode`: the first two letters of the state name, uppercased, or
//!   [`STATE_FALLBACK`] when the name cannot supply two letters.
//! - `CenterCode`: the same rule applied to the center name, with
//!   [`CENTER_FALLBACK`].
//! - `Sequence`: a value drawn from the record store's global counter,
//!   zero-padded to [`SEQUENCE_WIDTH`] digits.
//!
//! The counter is global, so uniqueness holds across every state/center
//! prefix. Values above 9999 are rendered with more digits rather than
//! wrapping back to 1000.
//!
//! Everything here is pure; the sequence value itself comes from the store.
//!
//! # Example
//!
//! ```
//! use isml_core::registration::registration_number;
//!
//! let number = registration_number(Some("Karnataka"), Some("Bangalore North"), 1042);
//! assert_eq!(number, "ISMLKABA1042");
//! ```

/// Fixed prefix of every registration number.
pub const PREFIX: &str = "ISML";
/// State code used when no usable state name is available.
pub const STATE_FALLBACK: &str = "XX";
/// Center code used when no usable center name is available.
pub const CENTER_FALLBACK: &str = "YY";
/// Minimum number of digits in the sequence part.
pub const SEQUENCE_WIDTH: usize = 4;
/// First value handed out by a fresh counter.
pub const SEQUENCE_START: i64 = 1000;

/// Two-letter uppercase code taken from the start of `name`.
///
/// Returns `fallback` when the name is missing, shorter than two characters
/// after trimming, or when either of its first two characters is not a letter
/// with a single-character uppercase form (so the result is always exactly two
/// uppercase characters).
pub fn region_code(name: Option<&str>, fallback: &str) -> String {
    let Some(name) = name.map(str::trim) else {
        return fallback.to_string();
    };

    let mut code = String::with_capacity(2);
    for ch in name.chars().take(2) {
        if !ch.is_alphabetic() {
            return fallback.to_string();
        }
        let mut upper = ch.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(u), None) if u.is_uppercase() => code.push(u),
            _ => return fallback.to_string(),
        }
    }

    if code.chars().count() == 2 {
        code
    } else {
        fallback.to_string()
    }
}

pub fn state_code(state_name: Option<&str>) -> String {
    region_code(state_name, STATE_FALLBACK)
}

pub fn center_code(center_name: Option<&str>) -> String {
    region_code(center_name, CENTER_FALLBACK)
}

/// Builds the registration number for a student from its resolved state and
/// center names and a freshly allocated sequence value.
pub fn registration_number(
    state_name: Option<&str>,
    center_name: Option<&str>,
    sequence: i64,
) -> String {
    format!(
        "{PREFIX}{}{}{:0width$}",
        state_code(state_name),
        center_code(center_name),
        sequence,
        width = SEQUENCE_WIDTH
    )
}

/// Checks that `value` has the registration number shape: the prefix, two
/// 2-character uppercase codes and at least four digits.
pub fn is_well_formed(value: &str) -> bool {
    let Some(rest) = value.strip_prefix(PREFIX) else {
        return false;
    };
    let chars: Vec<char> = rest.chars().collect();
    if chars.len() < 4 + SEQUENCE_WIDTH {
        return false;
    }
    let (codes, digits) = chars.split_at(4);
    codes.iter().all(|c| c.is_uppercase()) && digits.iter().all(|c| c.is_ascii_digit())
}
