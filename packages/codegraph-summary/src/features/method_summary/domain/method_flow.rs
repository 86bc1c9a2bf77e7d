//! A single source → sink edge

use std::fmt;

use super::endpoint::{FlowSink, FlowSource};
use super::gap::GapDefinition;
use super::subsumption::Coarsening;

/// Taint entering at `source` may reach `sink`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodFlow {
    source: FlowSource,
    sink: FlowSink,
}

impl MethodFlow {
    pub fn new(source: FlowSource, sink: FlowSink) -> Self {
        Self { source, sink }
    }

    pub fn source(&self) -> &FlowSource {
        &self.source
    }

    pub fn sink(&self) -> &FlowSink {
        &self.sink
    }

    /// Gaps referenced by either endpoint
    pub fn gaps(&self) -> impl Iterator<Item = &GapDefinition> {
        self.source.gap().into_iter().chain(self.sink.gap())
    }

    pub fn into_parts(self) -> (FlowSource, FlowSink) {
        (self.source, self.sink)
    }
}

/// Pairwise: both ends must be coarser
impl Coarsening for MethodFlow {
    fn is_coarser_than(&self, other: &Self) -> bool {
        self.source.is_coarser_than(&other.source) && self.sink.is_coarser_than(&other.sink)
    }
}

impl fmt::Display for MethodFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.sink)
    }
}
