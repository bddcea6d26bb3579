//! Control-byte stripping for captured command output.

/// Keep tab, newline, carriage return, and printable codepoints; drop every
/// other control character, DEL included.
pub fn sanitize_output(output: &str) -> String {
    output
        .chars()
        .filter(|&c| matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{7f}'))
        .collect()
}
