use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// Configuration for a diff run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Display label of the first track.
    pub label_one: String,
    /// Display label of the second track.
    pub label_two: String,
    /// Minimum similarity for edits, merges, and splits.
    pub cutoff: f64,
    /// Per-line similarity below which an equal-size block whose joined
    /// text still matches is reported as a shift.
    pub shift_cutoff: f64,
    /// Minimum similarity of a two-line join before a split is committed
    /// on trailing context alone.
    pub join_cutoff: f64,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            label_one: "one".into(),
            label_two: "two".into(),
            cutoff: 0.6,
            shift_cutoff: 0.85,
            join_cutoff: 0.95,
        }
    }
}

impl DiffConfig {
    pub fn with_labels(mut self, one: impl Into<String>, two: impl Into<String>) -> Self {
        self.label_one = one.into();
        self.label_two = two.into();
        self
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Check that every cutoff is a ratio.
    pub fn validate(&self) -> DiffResult<()> {
        for (name, value) in [
            ("cutoff", self.cutoff),
            ("shift_cutoff", self.shift_cutoff),
            ("join_cutoff", self.join_cutoff),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DiffError::InvalidCutoff { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = DiffConfig::default();
        assert_eq!(c.label_one, "one");
        assert_eq!(c.label_two, "two");
        assert_eq!(c.cutoff, 0.6);
        assert_eq!(c.shift_cutoff, 0.85);
        assert_eq!(c.join_cutoff, 0.95);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn builders_override_fields() {
        let c = DiffConfig::default().with_labels("OCR", "SRT").with_cutoff(0.7);
        assert_eq!(c.label_one, "OCR");
        assert_eq!(c.label_two, "SRT");
        assert_eq!(c.cutoff, 0.7);
    }

    #[test]
    fn out_of_range_cutoff_is_rejected() {
        let c = DiffConfig::default().with_cutoff(1.5);
        assert!(matches!(
            c.validate(),
            Err(DiffError::InvalidCutoff { name: "cutoff", .. })
        ));

        let c = DiffConfig {
            shift_cutoff: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            c.validate(),
            Err(DiffError::InvalidCutoff { name: "shift_cutoff", .. })
        ));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let c: DiffConfig = toml::from_str("label_one = \"OCR\"\ncutoff = 0.5\n").unwrap();
        assert_eq!(c.label_one, "OCR");
        assert_eq!(c.label_two, "two");
        assert_eq!(c.cutoff, 0.5);
        assert_eq!(c.join_cutoff, 0.95);
    }
}
