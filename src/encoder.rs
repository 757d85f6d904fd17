//! Turns text into a null-terminated C byte array literal.
//!
//! The pipeline is `sanitize` -> `encode` -> `write_output`. Sanitisation is
//! lossy: anything outside printable ASCII is dropped without a placeholder.

use crate::error::EncoderError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

const PRINTABLE_ASCII: std::ops::RangeInclusive<char> = ' '..='~';

/// Keep only characters in the printable ASCII range (0x20..=0x7E)
pub fn sanitize(input: &str) -> String {
    input.chars().filter(|c| PRINTABLE_ASCII.contains(c)).collect()
}

/// Format each character as an uppercase `0xHH` token, terminated by `0x00`
pub fn encode(sanitized: &str) -> String {
    let tokens: Vec<String> = sanitized
        .chars()
        .map(|c| format!("0x{:02X}", u32::from(c)))
        .chain(std::iter::once("0x00".to_string()))
        .collect();

    format!("{{ {} }}", tokens.join(", "))
}

/// Sanitize then encode in one step
pub fn encode_string(input: &str) -> String {
    encode(&sanitize(input))
}

/// Write the literal followed by the length and input comment lines.
///
/// The destination is created or truncated. Both comment lines describe the
/// original input, not the sanitized text.
pub fn write_output(
    array_literal: &str,
    original_input: &str,
    destination: &Path,
) -> Result<(), EncoderError> {
    let file = File::create(destination).map_err(|e| EncoderError::output(destination, e))?;
    let mut writer = BufWriter::new(file);

    let result = writeln!(writer, "{array_literal}")
        .and_then(|_| writeln!(writer, "// Length: {}", original_input.chars().count()))
        .and_then(|_| writeln!(writer, "// Input: {original_input}"))
        .and_then(|_| writer.flush());

    result.map_err(|e| EncoderError::output(destination, e))?;

    debug!("Wrote encoded string to {}", destination.display());
    Ok(())
}

/// An input string together with its encoded array literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedString {
    original: String,
    literal: String,
}

impl EncodedString {
    pub fn new(input: impl Into<String>) -> Self {
        let original = input.into();
        let sanitized = sanitize(&original);

        let dropped = original.chars().count() - sanitized.chars().count();
        if dropped > 0 {
            debug!("Sanitization dropped {} non-printable characters", dropped);
        }

        let literal = encode(&sanitized);
        Self { original, literal }
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Character count of the unsanitized input
    pub fn original_len(&self) -> usize {
        self.original.chars().count()
    }

    pub fn write_to(&self, destination: &Path) -> Result<(), EncoderError> {
        write_output(&self.literal, &self.original, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_printable_ascii() {
        let all_printable: String = (0x20u8..=0x7E).map(char::from).collect();
        assert_eq!(sanitize(&all_printable), all_printable);
    }

    #[test]
    fn test_sanitize_drops_control_and_non_ascii() {
        assert_eq!(sanitize("line1\nline2\ttab\r"), "line1line2tab");
        assert_eq!(sanitize("caf\u{e9} \u{65e5}\u{672c}"), "caf ");
        assert_eq!(sanitize("a\x00b\x1Fc\x7Fd"), "abcd");
        assert_eq!(sanitize("\u{1F600}"), "");
    }

    #[test]
    fn test_sanitize_boundaries() {
        assert_eq!(sanitize("\x1F \x7E\x7F"), " ~");
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("\n\t\r"), "");
    }

    #[test]
    fn test_sanitize_is_ordered_subsequence() {
        let input = "z\u{3b1}y\nx\u{7f}w";
        let sanitized = sanitize(input);
        assert_eq!(sanitized, "zyxw");

        let mut remaining = input.chars();
        for c in sanitized.chars() {
            assert!(remaining.any(|o| o == c));
        }
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(""), "{ 0x00 }");
    }

    #[test]
    fn test_encode_single_char() {
        assert_eq!(encode("A"), "{ 0x41, 0x00 }");
    }

    #[test]
    fn test_encode_uses_uppercase_padded_hex() {
        assert_eq!(encode(" ~o"), "{ 0x20, 0x7E, 0x6F, 0x00 }");
    }

    #[test]
    fn test_encode_one_token_per_char_plus_terminator() {
        let literal = encode("abcdef");
        let inner = literal
            .strip_prefix("{ ")
            .and_then(|rest| rest.strip_suffix(" }"))
            .unwrap();
        let tokens: Vec<&str> = inner.split(", ").collect();
        assert_eq!(tokens.len(), 7);
        assert_eq!(tokens.last(), Some(&"0x00"));
        assert!(tokens.iter().all(|t| t.len() == 4 && t.starts_with("0x")));
    }

    #[test]
    fn test_encode_hello_world() {
        assert_eq!(
            encode(&sanitize("Hello, World!")),
            "{ 0x48, 0x65, 0x6C, 0x6C, 0x6F, 0x2C, 0x20, 0x57, 0x6F, 0x72, 0x6C, 0x64, 0x21, 0x00 }"
        );
    }

    #[test]
    fn test_encode_string_sanitizes_first() {
        assert_eq!(encode_string("A\nB"), "{ 0x41, 0x42, 0x00 }");
        assert_eq!(encode_string("\u{e9}\t"), "{ 0x00 }");
    }

    #[test]
    fn test_encoded_string_keeps_original() {
        let encoded = EncodedString::new("Hi\u{e9}\n");
        assert_eq!(encoded.literal(), "{ 0x48, 0x69, 0x00 }");
        assert_eq!(encoded.original(), "Hi\u{e9}\n");
        assert_eq!(encoded.original_len(), 4);
    }

    #[test]
    fn test_write_output_format() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out.c");

        write_output("{ 0x41, 0x00 }", "A", &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{ 0x41, 0x00 }\n// Length: 1\n// Input: A\n");
    }

    #[test]
    fn test_write_output_reports_original_length() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out.c");

        let encoded = EncodedString::new("a\tb\u{e9}");
        encoded.write_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "{ 0x61, 0x62, 0x00 }");
        assert_eq!(lines[1], "// Length: 4");
        assert_eq!(lines[2], "// Input: a\tb\u{e9}");
    }

    #[test]
    fn test_write_output_truncates_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out.c");
        std::fs::write(&path, "stale content that is much longer than the new output\n").unwrap();

        write_output("{ 0x00 }", "", &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{ 0x00 }\n// Length: 0\n// Input: \n");
    }

    #[test]
    fn test_write_output_unwritable_destination() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing_dir").join("out.c");

        let result = write_output("{ 0x00 }", "", &path);
        match result {
            Err(EncoderError::Output { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected output error, got {other:?}"),
        }
        assert!(!path.exists());
    }
}
