//! Minimal reader for the `key=value&...` query strings carried by
//! background links.

use std::borrow::Cow;

use memchr::memchr;

/// Parsed query parameters with form-style value decoding.
///
/// Keys and values are decoded the way browsers submit forms: `+` is a
/// space and `%XX` is a percent escape. Lookups return the first value
/// recorded for a key.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    args: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a query string, with or without its leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut args = Vec::new();
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = match memchr(b'=', pair.as_bytes()) {
                Some(pos) => (&pair[..pos], &pair[pos + 1..]),
                None => (pair, ""),
            };
            args.push((
                decode_form_value(key).into_owned(),
                decode_form_value(value).into_owned(),
            ));
        }
        Self { args }
    }

    /// First value recorded for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Decode a form-encoded component: `+` means space, `%XX` is a percent
/// escape. Undecodable input is kept as-is rather than rejected.
fn decode_form_value(value: &str) -> Cow<'_, str> {
    if memchr(b'+', value.as_bytes()).is_none() {
        return match urlencoding::decode(value) {
            Ok(decoded) => decoded,
            Err(_) => Cow::Borrowed(value),
        };
    }
    let spaced = value.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => Cow::Owned(spaced),
    }
}

/// Parse a loosely formatted integer: an optional minus sign followed by
/// leading decimal digits, ignoring any trailing junk. No digits yield 0;
/// values beyond the `i32` range saturate.
pub fn parse_loose_i32(text: &str) -> i32 {
    let bytes = text.as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        _ => (false, bytes),
    };
    let mut value: i64 = 0;
    for &b in digits {
        if !b.is_ascii_digit() || value > i64::from(i32::MAX) {
            break;
        }
        value = value * 10 + i64::from(b - b'0');
    }
    if negative {
        value = -value;
    }
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
