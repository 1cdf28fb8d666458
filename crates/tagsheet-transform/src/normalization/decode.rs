//! Percent-decoding of VAST wrapper tags.

use percent_encoding::percent_decode_str;

/// Literal marker that switches on percent-decoding.
pub const VAST_MARKER: &str = "_vast=";

/// Percent-decodes a tag carrying the [`VAST_MARKER`].
///
/// Returns `None` when the marker is absent. Decoding repeats until the text
/// stops changing, so decoding an already decoded tag is a no-op.
///
/// A `%` that directly follows another `%` never starts an escape. This keeps
/// `%CA`, `%DE` and `%AD` inside canonical `%%NAME%%` macros intact, including
/// chains of macros sharing a `%` and escapes that trail a macro.
///
/// ```
/// use tagsheet_transform::normalization::decode_vast;
///
/// assert_eq!(
///     decode_vast("https://a.com/ad?_vast=https%3A%2F%2Fb.com%2Fv%3Ford%3D1").as_deref(),
///     Some("https://a.com/ad?_vast=https://b.com/v?ord=1")
/// );
/// assert_eq!(decode_vast("https://a.com/ad%3F"), None);
/// ```
pub fn decode_vast(tag: &str) -> Option<String> {
    if !tag.contains(VAST_MARKER) {
        return None;
    }
    let mut current = tag.to_string();
    // Each pass that changes the text consumes at least one escape.
    loop {
        let next = decode_escapes(&current);
        if next == current {
            return Some(current);
        }
        current = next;
    }
}

fn decode_escapes(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut decoded = String::with_capacity(value.len());
    let mut last = 0;
    for index in 1..bytes.len() {
        if bytes[index] == b'%' && bytes[index - 1] == b'%' {
            decoded.push_str(&percent_decode_str(&value[last..index]).decode_utf8_lossy());
            decoded.push('%');
            last = index + 1;
        }
    }
    decoded.push_str(&percent_decode_str(&value[last..]).decode_utf8_lossy());
    decoded
}
