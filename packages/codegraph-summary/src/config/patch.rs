//! Patch types
//!
//! All-optional mirrors of config structs, applied on top of a preset.

use super::summary_config::SummaryConfig;
use serde::{Deserialize, Serialize};

/// Patch type for SummaryConfig (all fields optional)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_path_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_gap_references: Option<bool>,
}

impl SummaryConfigPatch {
    /// Full patch reproducing `config`
    pub fn from_config(config: &SummaryConfig) -> Self {
        Self {
            access_path_length: Some(config.access_path_length),
            strict_gap_references: Some(config.strict_gap_references),
        }
    }
}

impl SummaryConfig {
    /// Apply patch on top of the current values
    pub fn apply_patch(mut self, patch: &SummaryConfigPatch) -> Self {
        if let Some(v) = patch.access_path_length {
            self.access_path_length = v;
        }
        if let Some(v) = patch.strict_gap_references {
            self.strict_gap_references = v;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;

    #[test]
    fn test_partial_patch_keeps_preset_values() {
        let patch = SummaryConfigPatch {
            strict_gap_references: Some(false),
            ..Default::default()
        };
        let config = SummaryConfig::from_preset(Preset::Fast).apply_patch(&patch);
        assert_eq!(config.access_path_length, 3);
        assert!(!config.strict_gap_references);
    }

    #[test]
    fn test_full_patch_roundtrip() {
        let original = SummaryConfig::from_preset(Preset::Thorough).access_path_length(42);
        let patch = SummaryConfigPatch::from_config(&original);
        let rebuilt = SummaryConfig::from_preset(Preset::Thorough).apply_patch(&patch);
        assert_eq!(rebuilt, original);
    }
}
