//! Test fixtures
//!
//! Endpoints and call sites shaped like a small Java program.

use codegraph_summary::config::AccessPathLimit;
use codegraph_summary::features::method_summary::ports::{InvokeExpr, Statement, StmtId, Value};
use codegraph_summary::{FlowEndpoint, GapDefinition, MethodFlow, MethodSummaries};

pub const METHOD: &str = "<com.example.Service: java.lang.Object handle(com.example.Request)>";

pub fn limit(k: usize) -> AccessPathLimit {
    AccessPathLimit::new(k).unwrap()
}

pub fn param(index: usize, path: &[&str]) -> FlowEndpoint {
    FlowEndpoint::parameter(index, "com.example.Request")
        .access_path(path.iter().copied())
        .build(AccessPathLimit::default())
}

pub fn param_k(index: usize, path: &[&str], k: usize) -> FlowEndpoint {
    FlowEndpoint::parameter(index, "com.example.Request")
        .access_path(path.iter().copied())
        .build(limit(k))
}

pub fn field(path: &[&str]) -> FlowEndpoint {
    FlowEndpoint::field("com.example.Service")
        .access_path(path.iter().copied())
        .build(AccessPathLimit::default())
}

pub fn ret(path: &[&str]) -> FlowEndpoint {
    FlowEndpoint::return_value("java.lang.Object")
        .access_path(path.iter().copied())
        .build(AccessPathLimit::default())
}

pub fn flow(source: FlowEndpoint, sink: FlowEndpoint) -> MethodFlow {
    MethodFlow::new(source, sink)
}

pub fn summary_of(flows: Vec<MethodFlow>) -> MethodSummaries {
    let mut summary = MethodSummaries::new(METHOD);
    for f in flows {
        summary.insert(f).unwrap();
    }
    summary
}

pub fn lookup_gap() -> GapDefinition {
    GapDefinition::new(0, "<com.example.Registry: java.lang.Object lookup(java.lang.String)>")
}

/// `r = registry.lookup(key)` with no known callee
pub fn lookup_call() -> Statement {
    Statement::assign_invoke(
        StmtId(12),
        Value::local("r", "java.lang.Object"),
        InvokeExpr::instance_call(
            "<com.example.Registry: java.lang.Object lookup(java.lang.String)>",
            Value::local("registry", "com.example.Registry"),
            vec![Value::local("key", "java.lang.String")],
        ),
    )
}
