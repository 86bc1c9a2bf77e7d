//! Summary configuration
//!
//! Two levels of control:
//! - Preset: one-liner defaults (`Preset::Balanced`)
//! - YAML: versioned file with per-field overrides
//!
//! # Examples
//!
//! ```rust,ignore
//! use codegraph_summary::config::{Preset, SummaryConfig};
//!
//! let config = SummaryConfig::from_preset(Preset::Fast).access_path_length(4);
//! let limit = config.validated()?.access_path_limit();
//!
//! let config = SummaryConfig::from_yaml("summary.yaml")?;
//! ```
//!
//! The access-path limit is fixed once a config is validated and is then
//! passed by value into endpoint construction. Nothing here is global.

pub mod error;
pub mod io;
pub mod patch;
pub mod preset;
pub mod summary_config;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigExportV1, ConfigOverrides};
pub use patch::SummaryConfigPatch;
pub use preset::Preset;
pub use summary_config::{AccessPathLimit, SummaryConfig, ValidatedConfig};
pub use validation::Validatable;
