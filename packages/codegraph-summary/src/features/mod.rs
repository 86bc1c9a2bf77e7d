//! Feature modules

pub mod method_summary;
