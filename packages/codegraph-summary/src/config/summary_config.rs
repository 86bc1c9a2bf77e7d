//! Summary core configuration

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, ConfigOverrides};
use super::patch::SummaryConfigPatch;
use super::preset::Preset;
use super::validation::Validatable;

const MIN_ACCESS_PATH_LENGTH: usize = 1;
const MAX_ACCESS_PATH_LENGTH: usize = 100;
const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Summary core configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Maximum number of field dereferences kept on an endpoint (1..=100)
    pub access_path_length: usize,

    /// Reject stored flows whose gap id is not declared in the same document
    pub strict_gap_references: bool,

    /// Preset the values were derived from
    #[serde(skip)]
    preset: Preset,
}

impl SummaryConfig {
    /// Create from preset
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            access_path_length: preset.access_path_length(),
            strict_gap_references: true,
            preset,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.access_path_length < MIN_ACCESS_PATH_LENGTH
            || self.access_path_length > MAX_ACCESS_PATH_LENGTH
        {
            return Err(ConfigError::range_with_hint(
                "access_path_length",
                self.access_path_length,
                MIN_ACCESS_PATH_LENGTH,
                MAX_ACCESS_PATH_LENGTH,
                "Access paths need at least one field and must stay bounded",
            ));
        }
        Ok(())
    }

    /// Builder: Set access_path_length
    pub fn access_path_length(mut self, v: usize) -> Self {
        self.access_path_length = v;
        self
    }

    /// Builder: Set strict_gap_references
    pub fn strict_gap_references(mut self, v: bool) -> Self {
        self.strict_gap_references = v;
        self
    }

    /// Preset this configuration started from
    pub fn preset(&self) -> Preset {
        self.preset
    }

    /// Validate and freeze
    pub fn validated(self) -> ConfigResult<ValidatedConfig> {
        self.validate()?;
        Ok(ValidatedConfig(self))
    }

    /// Load from a YAML file (schema v1)
    pub fn from_yaml(path: &str) -> ConfigResult<ValidatedConfig> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load from YAML text (schema v1)
    pub fn from_yaml_str(content: &str) -> ConfigResult<ValidatedConfig> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = Preset::from_str(&export.preset)
            .map_err(|_| ConfigError::UnknownPreset(export.preset.clone()))?;

        let mut config = Self::from_preset(preset);
        if let Some(patch) = export.overrides.and_then(|o| o.summary) {
            config = config.apply_patch(&patch);
        }

        config.validated()
    }

    /// Export as YAML (schema v1)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            preset: self.preset.to_string(),
            overrides: Some(ConfigOverrides {
                summary: Some(SummaryConfigPatch::from_config(self)),
            }),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl Validatable for SummaryConfig {
    fn validate(&self) -> ConfigResult<()> {
        SummaryConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "SummaryConfig"
    }
}

/// Configuration that passed validation
///
/// Only a validated config hands out an [`AccessPathLimit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig(SummaryConfig);

impl ValidatedConfig {
    /// Access-path limit for endpoint construction
    pub fn access_path_limit(&self) -> AccessPathLimit {
        AccessPathLimit(self.0.access_path_length)
    }

    /// Whether readers reject undeclared gap ids
    pub fn strict_gap_references(&self) -> bool {
        self.0.strict_gap_references
    }

    pub fn as_inner(&self) -> &SummaryConfig {
        &self.0
    }

    pub fn into_inner(self) -> SummaryConfig {
        self.0
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        self.0.to_yaml()
    }
}

impl Default for ValidatedConfig {
    fn default() -> Self {
        ValidatedConfig(SummaryConfig::default())
    }
}

/// Maximum access-path length `K`
///
/// Fixed for the lifetime of an analysis run and threaded into every
/// endpoint construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessPathLimit(usize);

impl AccessPathLimit {
    /// Create a limit, checking the same range as [`SummaryConfig::validate`]
    pub fn new(max_len: usize) -> ConfigResult<Self> {
        SummaryConfig::default().access_path_length(max_len).validate()?;
        Ok(Self(max_len))
    }

    /// The limit `K`
    pub fn get(&self) -> usize {
        self.0
    }

    /// Truncate a field sequence to the first `K` entries.
    ///
    /// `None` and empty input both yield `None`. A truncated path stands for
    /// the kept prefix and everything reachable below it.
    pub fn truncate(&self, path: Option<Vec<String>>) -> Option<Vec<String>> {
        match path {
            None => None,
            Some(p) if p.is_empty() => None,
            Some(mut p) => {
                p.truncate(self.0);
                Some(p)
            }
        }
    }
}

impl Default for AccessPathLimit {
    fn default() -> Self {
        Self(Preset::Balanced.access_path_length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn path(fields: &[&str]) -> Option<Vec<String>> {
        Some(fields.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_summary_config_validation() {
        let mut config = SummaryConfig::from_preset(Preset::Fast);
        assert!(config.validate().is_ok());

        config.access_path_length = 0;
        assert!(config.validate().is_err());

        config.access_path_length = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_summary_config_builder() {
        let config = SummaryConfig::from_preset(Preset::Fast)
            .access_path_length(7)
            .strict_gap_references(false);

        assert_eq!(config.access_path_length, 7);
        assert!(!config.strict_gap_references);
        assert_eq!(config.preset(), Preset::Fast);
    }

    #[test]
    fn test_truncate_limits_length() {
        let limit = AccessPathLimit::new(2).unwrap();
        assert_eq!(limit.truncate(path(&["x", "y", "z"])), path(&["x", "y"]));
        assert_eq!(limit.truncate(path(&["x"])), path(&["x"]));
    }

    #[test]
    fn test_truncate_normalizes_empty() {
        let limit = AccessPathLimit::default();
        assert_eq!(limit.truncate(Some(Vec::new())), None);
        assert_eq!(limit.truncate(None), None);
    }

    #[test]
    fn test_limit_rejects_zero() {
        assert!(AccessPathLimit::new(0).is_err());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = SummaryConfig::from_preset(Preset::Thorough).access_path_length(12);
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("preset: thorough"));
        assert!(yaml.contains("access_path_length: 12"));

        let loaded = SummaryConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(loaded.access_path_limit().get(), 12);
        assert_eq!(loaded.as_inner().preset(), Preset::Thorough);
    }

    #[test]
    fn test_yaml_loading_from_file() {
        let yaml_content = r#"
version: 1
preset: fast
overrides:
  summary:
    access_path_length: 4
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();
        let path = temp_file.path().to_str().unwrap();

        let config = SummaryConfig::from_yaml(path).unwrap();
        assert_eq!(config.access_path_limit().get(), 4);
        assert!(config.strict_gap_references());
    }

    #[test]
    fn test_yaml_preset_only() {
        let config = SummaryConfig::from_yaml_str("version: 1\npreset: fast\n").unwrap();
        assert_eq!(config.access_path_limit().get(), 3);
    }

    #[test]
    fn test_yaml_missing_version() {
        let result = SummaryConfig::from_yaml_str("preset: fast\n");
        assert!(matches!(result, Err(ConfigError::MissingVersion)));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let result = SummaryConfig::from_yaml_str("version: 2\npreset: fast\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_yaml_unknown_preset() {
        let result = SummaryConfig::from_yaml_str("version: 1\npreset: turbo\n");
        assert!(matches!(result, Err(ConfigError::UnknownPreset(_))));
    }

    #[test]
    fn test_yaml_out_of_range_override() {
        let yaml = "version: 1\npreset: fast\noverrides:\n  summary:\n    access_path_length: 0\n";
        assert!(matches!(
            SummaryConfig::from_yaml_str(yaml),
            Err(ConfigError::Range { .. })
        ));
    }
}
