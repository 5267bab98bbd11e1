//! Text <-> symbol sequence translation

use super::table::CodeTable;
use super::WORD_SEPARATOR;

/// Encode text into a space-delimited symbol sequence.
///
/// The input is uppercased first. Spaces become the `/` word separator,
/// known characters become their dot/dash string, and anything else is
/// emitted as-is so it survives a trip through `decode`.
///
/// ```
/// assert_eq!(morse_rs::encode("SOS"), "... --- ...");
/// ```
pub fn encode(text: &str) -> String {
    let table = CodeTable::global();
    let mut out = String::with_capacity(text.len() * 4);

    for (i, ch) in text.to_uppercase().chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if ch == ' ' {
            out.push_str(WORD_SEPARATOR);
        } else if let Some(code) = table.symbol(ch) {
            out.push_str(code);
        } else {
            out.push(ch);
        }
    }

    out
}

/// Decode a space-delimited symbol sequence back into text.
///
/// `/` becomes a space, known codes become their character, and any other
/// token is copied through verbatim.
pub fn decode(sequence: &str) -> String {
    let table = CodeTable::global();
    let mut out = String::with_capacity(sequence.len() / 2);

    for token in sequence.split(' ') {
        if token == WORD_SEPARATOR {
            out.push(' ');
        } else if let Some(ch) = table.character(token) {
            out.push(ch);
        } else {
            out.push_str(token);
        }
    }

    out
}
