//! Custom assertions for summary verification

use codegraph_summary::{Coarsening, MethodSummaries};

/// Assert that no stored flow is covered by another stored flow
pub fn assert_reduced(summary: &MethodSummaries) {
    let flows: Vec<_> = summary.flows().collect();
    for a in &flows {
        for b in &flows {
            assert!(
                a == b || !a.is_coarser_than(b),
                "redundant flow {} is covered by {}",
                b,
                a
            );
        }
    }
}

/// Assert that every gap referenced by a flow is registered
pub fn assert_gaps_registered(summary: &MethodSummaries) {
    for flow in summary.flows() {
        for gap in flow.gaps() {
            assert_eq!(
                summary.gap(gap.id()),
                Some(gap),
                "flow {} references unregistered {}",
                flow,
                gap
            );
        }
    }
}
