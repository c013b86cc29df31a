use std::collections::HashMap;

use tracing::trace;

use crate::core::{BallEvent, Inning, InningData, compute_inning_data};

/// Runtime metrics exposed by `InningCache`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InningCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Memoizes `compute_inning_data` per `(match id, inning)`.
///
/// The cache never touches the source events; a match whose dataset is
/// swapped must be invalidated with `invalidate_match`. Empty innings are
/// cached as `None` too.
#[derive(Debug, Default)]
pub struct InningCache {
    entries: HashMap<(u32, Inning), Option<InningData>>,
    hits: u64,
    misses: u64,
}

impl InningCache {
    const MAX_ENTRIES: usize = 256;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &mut self,
        match_id: u32,
        inning: Inning,
        all_balls: &[BallEvent],
    ) -> Option<&InningData> {
        let key = (match_id, inning);
        if self.entries.contains_key(&key) {
            self.hits = self.hits.saturating_add(1);
        } else {
            self.misses = self.misses.saturating_add(1);
            if self.entries.len() >= Self::MAX_ENTRIES {
                self.entries.clear();
            }
            trace!(match_id, inning = inning.number(), "inning cache miss");
            self.entries
                .insert(key, compute_inning_data(all_balls, inning));
        }
        self.entries.get(&key).and_then(Option::as_ref)
    }

    pub fn invalidate_match(&mut self, match_id: u32) {
        self.entries.retain(|(cached_match, _), _| *cached_match != match_id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn stats(&self) -> InningCacheStats {
        InningCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }
}
