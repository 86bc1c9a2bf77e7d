//! Parallel merging of partial summaries
//!
//! Workers may summarize the same method independently (different entry
//! contexts, different shards). Merge is order independent, so the partial
//! results can be folded in any tree shape.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::errors::{SummaryError, SummaryResult};
use crate::features::method_summary::domain::MethodSummaries;

/// Fold partial summaries of one method into a single summary.
///
/// Returns `Ok(None)` for empty input. Fails with `MethodMismatch` if the
/// parts describe different methods.
pub fn merge_parallel(parts: Vec<MethodSummaries>) -> SummaryResult<Option<MethodSummaries>> {
    parts
        .into_par_iter()
        .map(Ok::<MethodSummaries, SummaryError>)
        .try_reduce_with(|mut acc, part| {
            acc.merge(&part)?;
            Ok(acc)
        })
        .transpose()
}

/// Group partial summaries by method and merge each group in parallel.
///
/// The output is sorted by method signature.
pub fn merge_by_method(parts: Vec<MethodSummaries>) -> SummaryResult<Vec<MethodSummaries>> {
    let mut groups: FxHashMap<String, Vec<MethodSummaries>> = FxHashMap::default();
    for part in parts {
        groups
            .entry(part.method().to_string())
            .or_default()
            .push(part);
    }
    debug!("merging {} method group(s)", groups.len());

    let mut merged = groups
        .into_par_iter()
        .map(|(_, group)| merge_parallel(group))
        .collect::<SummaryResult<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    merged.sort_by(|a, b| a.method().cmp(b.method()));
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessPathLimit;
    use crate::features::method_summary::domain::FlowEndpoint;

    fn part(method: &str, index: usize) -> MethodSummaries {
        let l = AccessPathLimit::default();
        let mut s = MethodSummaries::new(method);
        s.insert_flow(
            FlowEndpoint::parameter(index, "int").build(l),
            FlowEndpoint::return_value("int").build(l),
        )
        .unwrap();
        s
    }

    #[test]
    fn test_merge_parallel() {
        let parts = (0..16).map(|i| part("<A: int f(int)>", i % 4)).collect();
        let merged = merge_parallel(parts).unwrap().unwrap();
        assert_eq!(merged.flow_count(), 4);
    }

    #[test]
    fn test_merge_parallel_empty() {
        assert!(merge_parallel(Vec::new()).unwrap().is_none());
    }

    #[test]
    fn test_merge_parallel_mismatch() {
        let parts = vec![part("<A: int f(int)>", 0), part("<B: int g(int)>", 0)];
        assert!(matches!(
            merge_parallel(parts),
            Err(SummaryError::MethodMismatch { .. })
        ));
    }

    #[test]
    fn test_merge_by_method() {
        let parts = vec![
            part("<B: int g(int)>", 0),
            part("<A: int f(int)>", 0),
            part("<A: int f(int)>", 1),
        ];
        let merged = merge_by_method(parts).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].method(), "<A: int f(int)>");
        assert_eq!(merged[0].flow_count(), 2);
        assert_eq!(merged[1].flow_count(), 1);
    }
}
