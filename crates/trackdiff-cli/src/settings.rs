//! Diff settings: an optional TOML file overridden by command-line flags.

use std::path::Path;

use anyhow::Context;
use trackdiff_diff::DiffConfig;

use crate::cli::DiffArgs;

/// Parse a TOML settings file. Missing keys keep their defaults.
pub fn load_config_file(path: &Path) -> anyhow::Result<DiffConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

/// Build the effective configuration for a diff run.
pub fn resolve_config(args: &DiffArgs) -> anyhow::Result<DiffConfig> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => DiffConfig::default(),
    };
    if let Some(label) = &args.label_one {
        config.label_one = label.clone();
    }
    if let Some(label) = &args.label_two {
        config.label_two = label.clone();
    }
    if let Some(cutoff) = args.cutoff {
        config.cutoff = cutoff;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Command};

    fn diff_args(argv: &[&str]) -> DiffArgs {
        let mut full = vec!["trackdiff", "diff", "a.txt", "b.txt"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Diff(args) => args,
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn defaults_without_file_or_flags() {
        let config = resolve_config(&diff_args(&[])).unwrap();
        assert_eq!(config, DiffConfig::default());
    }

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "label_one = \"OCR\"\nlabel_two = \"SRT\"\ncutoff = 0.5\nshift_cutoff = 0.9"
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = diff_args(&["--config", path.as_str(), "--label-two", "Subs"]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.label_one, "OCR");
        assert_eq!(config.label_two, "Subs");
        assert_eq!(config.cutoff, 0.5);
        assert_eq!(config.shift_cutoff, 0.9);
        assert_eq!(config.join_cutoff, 0.95);
    }

    #[test]
    fn out_of_range_cutoff_is_rejected() {
        let err = resolve_config(&diff_args(&["--cutoff", "2"])).unwrap_err();
        assert!(err.to_string().contains("cutoff"));
    }

    #[test]
    fn malformed_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cutoff = \"high\"").unwrap();
        let err = load_config_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }
}
