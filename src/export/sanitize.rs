//! Text cleanup for the base-14 fonts.

/// What: Reduce text to what the exported document can show.
///
/// Inputs:
/// - `text`: Raw content string
///
/// Output:
/// - Text with typographic punctuation folded to ASCII and every other
///   character outside printable ASCII (plus `\n`, `\r`, `\t`) removed
///
/// Details:
/// - Curly single quotes become `'`, curly double quotes `"`, en/em dashes `-`
///   and the ellipsis `...`
#[must_use]
pub fn sanitize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            ' '..='~' | '\n' | '\r' | '\t' => out.push(ch),
            _ => {}
        }
    }
    out
}
