//! Heading levels from the distinct sizes of accepted headings.

use std::collections::HashMap;

use crate::model::{FontSize, HeadingLevel};

use super::classify::HeadingCandidate;

/// Document-wide mapping from heading size to level: largest size is H1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelMap {
    ranks: HashMap<FontSize, u32>,
}

impl LevelMap {
    /// Rank the distinct sizes of all candidates, largest first.
    pub fn from_candidates(candidates: &[HeadingCandidate]) -> Self {
        let mut sizes: Vec<FontSize> = candidates.iter().map(|c| c.size).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes.dedup();

        let ranks = sizes
            .into_iter()
            .zip(1..)
            .collect::<HashMap<FontSize, u32>>();
        Self { ranks }
    }

    /// Level for a size; `Unknown` if the size was never ranked.
    pub fn level_for(&self, size: FontSize) -> HeadingLevel {
        self.ranks
            .get(&size)
            .map_or(HeadingLevel::Unknown, |r| HeadingLevel::Rank(*r))
    }

    /// Number of distinct levels.
    pub fn depth(&self) -> usize {
        self.ranks.len()
    }
}
