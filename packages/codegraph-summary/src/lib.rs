/*
 * Codegraph Summary - Method summaries for taint analysis
 *
 * Feature-First Hexagonal Architecture:
 * - config/   : Access-path limit, presets, YAML loading
 * - errors    : Crate error type
 * - features/ : method_summary (domain → ports → infrastructure → application)
 *
 * A summary records, per method, which inputs flow to which outputs.
 * Calls the analysis cannot resolve are kept as gaps and filled in once
 * the callee's own summary is available.
 */

// Crate-level lint configuration
#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

pub mod config;
pub mod errors;
pub mod features;

pub use config::{AccessPathLimit, Preset, SummaryConfig, ValidatedConfig};
pub use errors::{SummaryError, SummaryResult};
pub use features::method_summary::{
    Coarsening, FlowEndpoint, FlowSink, FlowSource, GapDefinition, MethodFlow, MethodSummaries,
    SourceSinkType,
};
