// Method summaries for summary-based taint analysis
//
// Hexagonal Architecture:
// - domain: Flow endpoints, coarsening order, per-method summaries
// - ports: Solver-facing traits and the call-site program model
// - infrastructure: Gap synthesis, JSON documents, in-memory repository
// - application: Summary generation and parallel merging

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{merge_by_method, merge_parallel, SummaryBuilder};
pub use domain::{
    Coarsening, EndpointAttributes, FlowEndpoint, FlowSink, FlowSource, GapDefinition,
    MethodFlow, MethodSummaries, SourceSinkType,
};
pub use infrastructure::{
    GapFlowSynthesizer, InMemorySummaryRepository, JsonSummaryReader, JsonSummaryWriter,
    SimpleCalleeResolver,
};
pub use ports::{
    CalleeResolver, InvokeExpr, Statement, StmtId, SummaryReader, SummaryRepository,
    SummaryWriter, TaintWrapper, TaintedLocation, Value,
};
