//! Gap id allocation
//!
//! One manager per summarized method. Each unresolved call site gets a
//! sequential id the first time it is seen and keeps it afterwards.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::features::method_summary::domain::GapDefinition;
use crate::features::method_summary::ports::StmtId;

#[derive(Debug, Default)]
pub struct GapManager {
    gaps: FxHashMap<StmtId, GapDefinition>,
    next_id: u32,
}

impl GapManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gap for the call at `stmt`, created on first request
    pub fn gap_for(&mut self, stmt: StmtId, signature: &str) -> GapDefinition {
        if let Some(gap) = self.gaps.get(&stmt) {
            return gap.clone();
        }
        let gap = GapDefinition::new(self.next_id, signature);
        self.next_id += 1;
        debug!("created {} at {}", gap, stmt);
        self.gaps.insert(stmt, gap.clone());
        gap
    }

    /// Gap previously created for `stmt`
    pub fn gap_at(&self, stmt: StmtId) -> Option<&GapDefinition> {
        self.gaps.get(&stmt)
    }

    pub fn len(&self) -> usize {
        self.gaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }
}
