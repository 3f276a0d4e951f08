//! Line extraction: flatten a track's records into comparable lines.

use trackdiff_types::{Line, Record};

/// Speaker markers that may open a line, each followed by whitespace.
const SPEAKER_DASHES: [char; 2] = ['-', '\u{2013}'];

/// Split every record on hard line breaks, trim each piece, drop empty
/// pieces, and number the rest densely from zero in track order.
pub fn extract_lines<I>(records: I) -> Vec<Line>
where
    I: IntoIterator,
    I::Item: Record,
{
    let mut lines = Vec::new();
    for record in records {
        for piece in record.text().lines() {
            let raw = piece.trim();
            if raw.is_empty() {
                continue;
            }
            lines.push(Line::new(lines.len(), raw, normalize(raw)));
        }
    }
    lines
}

/// Comparison key for a line: drop an opening speaker dash, collapse
/// whitespace runs to one space, trim.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let body = strip_speaker_dash(trimmed).unwrap_or(trimmed);
    body.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_speaker_dash(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(&SPEAKER_DASHES[..])?;
    rest.starts_with(char::is_whitespace).then_some(rest)
}
