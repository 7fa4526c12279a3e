//! Numbered-list reply parser.
//!
//! Grammar, applied per line after trimming surrounding whitespace:
//!
//! ```text
//! candidate-line = 1*DIGIT "." text
//! ```
//!
//! `DIGIT` is ASCII `0-9`. The candidate is `text` trimmed, with at most one
//! leading and one trailing `"` removed, then trimmed again. Bullets, lettered
//! lists, `1)` and similar markers are not candidates. Lines that do not match
//! are skipped; parsing never fails.

/// Extract up to `max_count` non-empty candidates in reply order. Lines
/// after the cutoff are not inspected.
pub fn parse_ideation_reply(raw: &str, max_count: usize) -> Vec<String> {
    let mut candidates = Vec::new();
    if max_count == 0 {
        return candidates;
    }

    for line in raw.lines() {
        if let Some(text) = candidate_text(line) {
            candidates.push(text.to_string());
            if candidates.len() == max_count {
                break;
            }
        }
    }
    candidates
}

/// Candidate text of a single line, or `None` if the line is not a
/// candidate line or its text is empty.
pub fn candidate_text(line: &str) -> Option<&str> {
    let line = line.trim();
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    let text = strip_one_quote_layer(rest.trim()).trim();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

pub(crate) fn strip_one_quote_layer(text: &str) -> &str {
    let text = text.strip_prefix('"').unwrap_or(text);
    text.strip_suffix('"').unwrap_or(text)
}
