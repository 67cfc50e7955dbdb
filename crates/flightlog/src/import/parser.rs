//! Delimited-text parser.
//!
//! A single-pass, character-level state machine in the spirit of RFC 4180.
//! It never fails: malformed quoting degrades into odd field contents rather
//! than an error.

use tracing::trace;

/// Parse comma-separated text into rows of fields.
///
/// - `""` inside a quoted field is a literal quote.
/// - Outside quotes, `\r`, `\n` and `\r\n` each end one row.
/// - Inside quotes, commas and line breaks are field content.
/// - The final field and row are flushed at end of input even without a
///   trailing line break.
/// - Rows whose fields are all empty or whitespace are dropped.
///
/// An unterminated quote swallows the rest of the input into one field.
#[must_use]
pub fn parse(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => row.push(std::mem::take(&mut field)),
            '\r' | '\n' if !in_quotes => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        trace!("Unterminated quote at end of input");
    }
    row.push(field);
    rows.push(row);

    rows.retain(|r| r.iter().any(|f| !f.trim().is_empty()));
    rows
}
