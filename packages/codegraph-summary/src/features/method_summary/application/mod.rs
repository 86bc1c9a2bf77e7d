//! Application layer - summary generation use cases

pub mod parallel_merge;
pub mod summary_builder;

pub use parallel_merge::{merge_by_method, merge_parallel};
pub use summary_builder::{roles_at, GapRole, SummaryBuilder};
