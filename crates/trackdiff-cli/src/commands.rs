use std::process::ExitCode;

use colored::{ColoredString, Colorize};
use trackdiff_diff::{diff_tracks, extract_lines, DiffKind, LineDiff};

use crate::cli::*;
use crate::settings::resolve_config;
use crate::track::load_track;

/// How a command finished, mapped to the process exit status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to report.
    Clean,
    /// The tracks differ.
    Differences,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Clean => ExitCode::SUCCESS,
            Outcome::Differences => ExitCode::from(1),
        }
    }
}

pub fn run_command(cli: Cli) -> anyhow::Result<Outcome> {
    match cli.command {
        Command::Diff(args) => cmd_diff(args),
        Command::Lines(args) => cmd_lines(args),
    }
}

fn cmd_diff(args: DiffArgs) -> anyhow::Result<Outcome> {
    let config = resolve_config(&args)?;
    let one = load_track(&args.one, args.track_format)?;
    let two = load_track(&args.two, args.track_format)?;

    let diff = diff_tracks(&one, &two, &config)?;
    tracing::info!(entries = diff.len(), "diff finished");

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        OutputFormat::Text => print_text(&diff),
    }

    Ok(if diff.is_empty() {
        Outcome::Clean
    } else {
        Outcome::Differences
    })
}

fn print_text(diff: &LineDiff) {
    if diff.is_empty() {
        println!("{} Tracks match.", "✓".green().bold());
        return;
    }
    for entry in diff {
        println!("{}", paint(entry.kind(), entry.to_string()));
    }
    let summary: Vec<String> = diff
        .counts()
        .into_iter()
        .map(|(kind, n)| format!("{} {}", n, paint(kind, kind.to_string())))
        .collect();
    println!("\n{} differences: {}", diff.len().to_string().bold(), summary.join(", "));
}

fn paint(kind: DiffKind, text: String) -> ColoredString {
    match kind {
        DiffKind::Delete => text.red(),
        DiffKind::Insert => text.green(),
        DiffKind::Edit => text.yellow(),
        DiffKind::Merge | DiffKind::MergeEdit => text.cyan(),
        DiffKind::Split | DiffKind::SplitEdit => text.magenta(),
        DiffKind::Shift => text.blue(),
    }
}

fn cmd_lines(args: LinesArgs) -> anyhow::Result<Outcome> {
    let cues = load_track(&args.track, args.track_format)?;
    let mut offset = 0;
    for cue in &cues {
        if let Some(header) = cue.header() {
            println!("{}", header.dimmed());
        }
        // Positions run across the whole track, so number from `offset`.
        let lines = extract_lines([cue]);
        for line in &lines {
            let position = format!("{:>5}", offset + line.position + 1).dimmed();
            if args.normalized {
                let key = format!("[{}]", line.normalized).cyan();
                println!("{}  {}  {}", position, line.raw, key);
            } else {
                println!("{}  {}", position, line.raw);
            }
        }
        offset += lines.len();
    }
    Ok(Outcome::Clean)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn track_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn run(argv: &[&str]) -> anyhow::Result<Outcome> {
        use clap::Parser;
        run_command(Cli::try_parse_from(argv)?)
    }

    #[test]
    fn matching_tracks_are_clean() {
        let one = track_file("What?\nWho dared so?\n");
        let two = track_file("- What?\n- Who dared so?\n");
        let outcome = run(&[
            "trackdiff", "diff",
            one.path().to_str().unwrap(),
            two.path().to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(outcome, Outcome::Clean);
    }

    #[test]
    fn differing_tracks_report_differences() {
        let one = track_file("Hello world\n");
        let two = track_file("Hello World!\n");
        let outcome = run(&[
            "trackdiff", "diff", "--format", "json",
            one.path().to_str().unwrap(),
            two.path().to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(outcome, Outcome::Differences);
    }

    #[test]
    fn missing_track_is_an_error() {
        let one = track_file("a\n");
        let result = run(&["trackdiff", "diff", one.path().to_str().unwrap(), "/nonexistent.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn lines_command_is_clean() {
        let track = track_file("a\nb\n");
        let outcome =
            run(&["trackdiff", "lines", "--normalized", track.path().to_str().unwrap()]).unwrap();
        assert_eq!(outcome, Outcome::Clean);
    }

    #[test]
    fn lines_command_reads_srt_cues() {
        let mut track = tempfile::Builder::new().suffix(".srt").tempfile().unwrap();
        track
            .write_all(b"1\n00:00:01,000 --> 00:00:02,000\n- What?\n- Who dared so?\n")
            .unwrap();
        let outcome = run(&["trackdiff", "lines", track.path().to_str().unwrap()]).unwrap();
        assert_eq!(outcome, Outcome::Clean);
    }
}
