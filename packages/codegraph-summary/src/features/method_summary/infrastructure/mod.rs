//! Infrastructure layer - adapters for the method summary ports

pub mod callee_resolver;
pub mod gap_manager;
pub mod gap_synthesizer;
pub mod json_io;
pub mod memory_repository;

pub use callee_resolver::SimpleCalleeResolver;
pub use gap_manager::GapManager;
pub use gap_synthesizer::{GapFlowSynthesizer, WrapperStats};
pub use json_io::{
    from_json_str, to_json_string, FlowRecord, JsonSummaryReader, JsonSummaryWriter,
    SummaryDocument, SUMMARY_FORMAT_VERSION,
};
pub use memory_repository::InMemorySummaryRepository;
