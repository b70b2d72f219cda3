//! Lexical checks for typed literals
//!
//! A literal is only emitted when its lexical form is valid for the datatype
//! it is tagged with. Datatypes outside the XSD subset below are accepted
//! as-is.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use oxrdf::vocab::xsd;

/// Check `value` against the lexical space of `datatype`.
///
/// Returns a short description of the expected form on failure.
pub fn check_lexical_form(value: &str, datatype: &str) -> Result<(), &'static str> {
    let ok = match datatype {
        d if d == xsd::BOOLEAN.as_str() => matches!(value, "true" | "false" | "1" | "0"),
        d if is_integer_type(d) => is_integer(value),
        d if d == xsd::DECIMAL.as_str() => is_decimal(value),
        d if d == xsd::DOUBLE.as_str() || d == xsd::FLOAT.as_str() => is_double(value),
        d if d == xsd::DATE.as_str() => is_date(value),
        d if d == xsd::DATE_TIME.as_str() => is_date_time(value),
        _ => return Ok(()),
    };

    if ok {
        Ok(())
    } else {
        Err(expected_form(datatype))
    }
}

fn expected_form(datatype: &str) -> &'static str {
    match datatype {
        d if d == xsd::BOOLEAN.as_str() => "true, false, 1 or 0",
        d if is_integer_type(d) => "an optionally signed sequence of digits",
        d if d == xsd::DECIMAL.as_str() => "a decimal number",
        d if d == xsd::DATE.as_str() => "YYYY-MM-DD with an optional timezone",
        d if d == xsd::DATE_TIME.as_str() => "YYYY-MM-DDThh:mm:ss with an optional timezone",
        _ => "a floating point number",
    }
}

fn is_integer_type(datatype: &str) -> bool {
    [
        xsd::INTEGER,
        xsd::LONG,
        xsd::INT,
        xsd::SHORT,
        xsd::BYTE,
        xsd::NON_NEGATIVE_INTEGER,
        xsd::NON_POSITIVE_INTEGER,
        xsd::POSITIVE_INTEGER,
        xsd::NEGATIVE_INTEGER,
        xsd::UNSIGNED_LONG,
        xsd::UNSIGNED_INT,
        xsd::UNSIGNED_SHORT,
        xsd::UNSIGNED_BYTE,
    ]
    .iter()
    .any(|t| t.as_str() == datatype)
}

fn strip_sign(value: &str) -> &str {
    value
        .strip_prefix('+')
        .or_else(|| value.strip_prefix('-'))
        .unwrap_or(value)
}

fn is_integer(value: &str) -> bool {
    let digits = strip_sign(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal(value: &str) -> bool {
    let unsigned = strip_sign(value);
    let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    (!int.is_empty() || !frac.is_empty())
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.bytes().all(|b| b.is_ascii_digit())
}

fn is_double(value: &str) -> bool {
    if matches!(value, "INF" | "+INF" | "-INF" | "NaN") {
        return true;
    }
    // Rust also accepts "inf"/"infinity"/"nan", which XSD does not
    !value.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E')
        && value.parse::<f64>().is_ok()
}

/// Split an optional trailing timezone (`Z` or `±hh:mm`) off a lexical form.
fn split_timezone(value: &str) -> Option<(&str, Option<&str>)> {
    if let Some(rest) = value.strip_suffix('Z') {
        return Some((rest, Some("Z")));
    }
    let at = value.len().saturating_sub(6);
    if at > 0 && value.is_char_boundary(at) {
        let (head, tz) = value.split_at(at);
        let tz_bytes = tz.as_bytes();
        if (tz_bytes[0] == b'+' || tz_bytes[0] == b'-') && tz_bytes[3] == b':' {
            let valid = tz_bytes[1..3].iter().chain(&tz_bytes[4..]).all(u8::is_ascii_digit);
            return valid.then_some((head, Some(tz)));
        }
    }
    Some((value, None))
}

fn is_date(value: &str) -> bool {
    match split_timezone(value) {
        Some((date, _)) => NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok(),
        None => false,
    }
}

fn is_date_time(value: &str) -> bool {
    if DateTime::parse_from_rfc3339(value).is_ok() {
        return true;
    }
    match split_timezone(value) {
        Some((local, _)) => NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S%.f").is_ok(),
        None => false,
    }
}
