//! Summary data model
//!
//! - `SourceSinkType`, `GapDefinition`: leaves
//! - `FlowEndpoint`: one end of a flow, built through `EndpointBuilder`
//! - `Coarsening`: subsumption order used to prune facts
//! - `MethodFlow`, `MethodSummaries`: edges and their per-method aggregate

mod attributes;
mod endpoint;
mod gap;
mod method_flow;
mod method_summaries;
mod source_sink_type;
mod subsumption;

pub use attributes::EndpointAttributes;
pub use endpoint::{EndpointBuilder, FlowEndpoint, FlowSink, FlowSource};
pub use gap::GapDefinition;
pub use method_flow::MethodFlow;
pub use method_summaries::MethodSummaries;
pub use source_sink_type::SourceSinkType;
pub use subsumption::Coarsening;
