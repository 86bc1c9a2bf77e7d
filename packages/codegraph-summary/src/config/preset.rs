//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// CI/CD: short access paths, small summaries
    ///
    /// - access_path_length=3
    Fast,

    /// Development: the usual trade-off
    ///
    /// - access_path_length=5
    Balanced,

    /// Security Audit: deep field tracking
    ///
    /// - access_path_length=10
    Thorough,

    /// Custom: User-defined (YAML only)
    ///
    /// Starts from balanced values; users override via YAML or builder API.
    Custom,
}

impl Preset {
    /// Access-path limit `K` for this preset
    pub fn access_path_length(&self) -> usize {
        match self {
            Self::Fast => 3,
            Self::Balanced => 5,
            Self::Thorough => 10,
            Self::Custom => 5,
        }
    }

    /// Parse preset from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "thorough" => Ok(Self::Thorough),
            "custom" => Ok(Self::Custom),
            _ => Err(format!("Unknown preset: {}", s)),
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Balanced
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
            Self::Custom => "custom",
        };
        write!(f, "{}", name)
    }
}
