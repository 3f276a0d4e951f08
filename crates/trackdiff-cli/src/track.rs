//! Track loading: SubRip cues or plain text lines.

use std::path::Path;

use anyhow::Context;
use trackdiff_types::Record;

use crate::cli::TrackFormat;

/// One record of a track file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cue {
    /// SubRip sequence number, when present.
    pub index: Option<u32>,
    /// SubRip timing line, kept verbatim.
    pub timing: Option<String>,
    /// Cue text; may hold several lines.
    pub text: String,
}

impl Cue {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            index: None,
            timing: None,
            text: text.into(),
        }
    }
}

impl Cue {
    /// `#index timing` for SubRip cues; `None` for plain-text records.
    pub fn header(&self) -> Option<String> {
        match (self.index, self.timing.as_deref()) {
            (Some(index), Some(timing)) => Some(format!("#{index} {timing}")),
            (Some(index), None) => Some(format!("#{index}")),
            (None, Some(timing)) => Some(timing.to_string()),
            (None, None) => None,
        }
    }
}

impl Record for Cue {
    fn text(&self) -> &str {
        &self.text
    }
}

/// Read a track file, picking the parser from `format`.
pub fn load_track(path: &Path, format: TrackFormat) -> anyhow::Result<Vec<Cue>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read track {}", path.display()))?;
    let cues = match resolve_format(path, format) {
        TrackFormat::Srt => parse_srt(&content),
        _ => parse_plain(&content),
    };
    tracing::debug!(path = %path.display(), cues = cues.len(), "loaded track");
    Ok(cues)
}

fn resolve_format(path: &Path, format: TrackFormat) -> TrackFormat {
    match format {
        TrackFormat::Auto => {
            let is_srt = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("srt"));
            if is_srt {
                TrackFormat::Srt
            } else {
                TrackFormat::Plain
            }
        }
        other => other,
    }
}

/// Parse SubRip content: blank-line separated cues, each an optional
/// sequence number, a `-->` timing line, then the text lines.
pub fn parse_srt(content: &str) -> Vec<Cue> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut cues = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in content.lines().chain(std::iter::once("")) {
        if line.trim().is_empty() {
            if !block.is_empty() {
                cues.push(parse_srt_block(&block));
                block.clear();
            }
        } else {
            block.push(line);
        }
    }
    cues
}

fn parse_srt_block(block: &[&str]) -> Cue {
    let mut rest = block;
    let mut index = None;
    let mut timing = None;

    if let [first, second, ..] = rest {
        if let Ok(n) = first.trim().parse::<u32>() {
            if second.contains("-->") {
                index = Some(n);
                rest = &rest[1..];
            }
        }
    }
    if let [first, ..] = rest {
        if first.contains("-->") {
            timing = Some(first.trim().to_string());
            rest = &rest[1..];
        }
    }
    Cue {
        index,
        timing,
        text: rest.join("\n"),
    }
}

/// Parse plain text: every non-blank line is its own record.
pub fn parse_plain(content: &str) -> Vec<Cue> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(Cue::plain)
        .collect()
}
