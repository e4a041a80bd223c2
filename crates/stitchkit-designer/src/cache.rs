//! Memoised derived geometry.
//!
//! Everything here can be recomputed from the document at any time. Entries
//! are keyed by the document's geometry version together with the config
//! they were computed under; any change to either clears the whole cache.

use std::cell::RefCell;
use std::collections::HashMap;
use stitchkit_core::SampledPoint;
use tracing::debug;

use crate::config::PatternConfig;
use crate::engine::RangePath;
use crate::stitching::RangeKind;

#[derive(Debug, Default)]
struct CacheState {
    key: Option<(u64, PatternConfig)>,
    merged: Option<Vec<SampledPoint>>,
    stitch_paths: HashMap<RangeKind, RangePath>,
    hits: u64,
    misses: u64,
}

/// Hit and miss counters since the cache was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Cache of the merged outline and the per-kind stitch paths.
///
/// Uses interior mutability so geometry queries can stay `&self`; the engine
/// is single threaded.
#[derive(Debug, Default)]
pub struct GeometryCache {
    state: RefCell<CacheState>,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every entry unless they were computed for `version` and
    /// `config`.
    pub fn sync(&self, version: u64, config: &PatternConfig) {
        let mut state = self.state.borrow_mut();
        let fresh = matches!(&state.key, Some((v, c)) if *v == version && c == config);
        if fresh {
            return;
        }
        if state.key.is_some() {
            debug!("Geometry cache invalidated at version {}", version);
        }
        state.merged = None;
        state.stitch_paths.clear();
        state.key = Some((version, config.clone()));
    }

    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.key = None;
        state.merged = None;
        state.stitch_paths.clear();
    }

    pub fn merged_or_insert_with(&self, compute: impl FnOnce() -> Vec<SampledPoint>) -> Vec<SampledPoint> {
        if let Some(merged) = self.lookup(|s| s.merged.clone()) {
            return merged;
        }
        let merged = compute();
        self.state.borrow_mut().merged = Some(merged.clone());
        merged
    }

    pub fn stitch_path_or_insert_with(
        &self,
        kind: RangeKind,
        compute: impl FnOnce() -> RangePath,
    ) -> RangePath {
        if let Some(path) = self.lookup(|s| s.stitch_paths.get(&kind).cloned()) {
            return path;
        }
        let path = compute();
        self.state
            .borrow_mut()
            .stitch_paths
            .insert(kind, path.clone());
        path
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.state.borrow();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
        }
    }

    // The borrow ends before the caller computes, so `compute` may query the
    // cache again.
    fn lookup<T>(&self, get: impl FnOnce(&CacheState) -> Option<T>) -> Option<T> {
        let mut state = self.state.borrow_mut();
        let found = get(&state);
        if found.is_some() {
            state.hits += 1;
        } else {
            state.misses += 1;
        }
        found
    }
}
