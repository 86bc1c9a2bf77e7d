//! Concurrency tests for the summary repository
//!
//! Sealed summaries are shared across threads; publishing must never be
//! visible through a snapshot a reader already holds.

mod common;

use codegraph_summary::features::method_summary::application::merge_parallel;
use codegraph_summary::features::method_summary::infrastructure::InMemorySummaryRepository;
use codegraph_summary::features::method_summary::ports::SummaryRepository;
use codegraph_summary::MethodSummaries;
use common::*;
use rayon::prelude::*;
use std::sync::Arc;
use std::thread;

fn part(index: usize) -> MethodSummaries {
    summary_of(vec![flow(param(index % 8, &["payload"]), ret(&[]))])
}

#[test]
fn concurrent_publish_converges() {
    let repo = Arc::new(InMemorySummaryRepository::new());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let repo = Arc::clone(&repo);
            thread::spawn(move || {
                for i in 0..16 {
                    repo.publish(part(t * 16 + i)).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let summary = repo.get(METHOD).unwrap();
    assert_eq!(summary.flow_count(), 8);
    assert_reduced(&summary);
}

#[test]
fn snapshot_is_stable_while_publishing() {
    let repo = Arc::new(InMemorySummaryRepository::new());
    let snapshot = repo.publish(part(0)).unwrap();

    let writer = {
        let repo = Arc::clone(&repo);
        thread::spawn(move || {
            for i in 1..8 {
                repo.publish(part(i)).unwrap();
            }
        })
    };

    for _ in 0..100 {
        assert_eq!(snapshot.flow_count(), 1);
    }
    writer.join().unwrap();

    assert_eq!(snapshot.flow_count(), 1);
    assert_eq!(repo.get(METHOD).unwrap().flow_count(), 8);
}

#[test]
fn parallel_merge_matches_sequential() {
    let parts: Vec<_> = (0..64).map(part).collect();

    let mut sequential = MethodSummaries::new(METHOD);
    for p in &parts {
        sequential.merge(p).unwrap();
    }

    let parallel = merge_parallel(parts).unwrap().unwrap();
    assert_eq!(parallel, sequential);
}

#[test]
fn readers_share_sealed_summary() {
    let repo = InMemorySummaryRepository::new();
    repo.publish(part(3)).unwrap();
    let shared = repo.get(METHOD).unwrap();

    let total: usize = (0..32)
        .into_par_iter()
        .map(|_| shared.flows_from(&param(3, &["payload", "inner"])).count())
        .sum();
    assert_eq!(total, 32);
}
