//! Pre-parse pass for permissive-JSON numeric tokens.
//!
//! The reference serialization writes non-finite floats as the bare tokens
//! `NaN`, `Infinity` and `-Infinity`. Strict parsers reject those, so the
//! loader first rewrites them into forms the strict parser and the quantity
//! value deserializers understand:
//!
//! - `NaN` -> `null`
//! - `Infinity` -> `"Infinity"`
//! - `-Infinity` -> `"-Infinity"`
//!
//! The scan is string-literal aware: tokens inside quoted strings are left
//! untouched. Input that contains none of the tokens is passed through
//! unchanged without allocating.

use std::borrow::Cow;

/// Rewrite bare non-finite tokens into strict JSON.
pub fn sanitize_nonfinite(input: &str) -> Cow<'_, str> {
    if !input.contains("NaN") && !input.contains("Infinity") {
        return Cow::Borrowed(input);
    }

    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len() + 16);
    let mut i = 0;
    let mut in_string = false;

    while i < bytes.len() {
        let b = bytes[i];

        if in_string {
            match b {
                b'\\' => {
                    // copy the escape and whatever follows it verbatim
                    out.push_str(&input[i..(i + 2).min(input.len())]);
                    i += 2;
                    continue;
                }
                b'"' => in_string = false,
                _ => {}
            }
            // safe: we only land on char boundaries outside escapes
            let ch_len = char_len(bytes[i]);
            out.push_str(&input[i..i + ch_len]);
            i += ch_len;
            continue;
        }

        match b {
            b'"' => {
                in_string = true;
                out.push('"');
                i += 1;
            }
            b'N' if bytes[i..].starts_with(b"NaN") => {
                out.push_str("null");
                i += 3;
            }
            b'I' if bytes[i..].starts_with(b"Infinity") => {
                out.push_str("\"Infinity\"");
                i += 8;
            }
            b'-' if bytes[i + 1..].starts_with(b"Infinity") => {
                out.push_str("\"-Infinity\"");
                i += 9;
            }
            _ => {
                let ch_len = char_len(b);
                out.push_str(&input[i..i + ch_len]);
                i += ch_len;
            }
        }
    }

    Cow::Owned(out)
}

fn char_len(first_byte: u8) -> usize {
    match first_byte {
        b if b < 0x80 => 1,
        b if b >= 0xF0 => 4,
        b if b >= 0xE0 => 3,
        _ => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_without_tokens() {
        let input = r#"{"value": [1.0, 2.0]}"#;
        assert!(matches!(sanitize_nonfinite(input), Cow::Borrowed(_)));
    }

    #[test]
    fn test_bare_nan_becomes_null() {
        assert_eq!(
            sanitize_nonfinite(r#"{"value": [NaN, 1.0]}"#),
            r#"{"value": [null, 1.0]}"#
        );
    }

    #[test]
    fn test_infinities_become_token_strings() {
        assert_eq!(
            sanitize_nonfinite(r#"{"a": Infinity, "b": -Infinity}"#),
            r#"{"a": "Infinity", "b": "-Infinity"}"#
        );
    }

    #[test]
    fn test_tokens_inside_strings_untouched() {
        let input = r#"{"name": "NaN says Infinity"}"#;
        assert_eq!(sanitize_nonfinite(input), input);
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let input = r#"{"name": "quote \" NaN still inside"}"#;
        assert_eq!(sanitize_nonfinite(input), input);
    }

    #[test]
    fn test_sanitized_output_parses() {
        let out = sanitize_nonfinite(r#"{"value": [NaN, Infinity, -Infinity]}"#);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(parsed["value"][0].is_null());
        assert_eq!(parsed["value"][1], "Infinity");
    }
}
