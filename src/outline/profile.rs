//! Per-page typography profile: the body size and body font.

use indexmap::IndexMap;
use std::hash::Hash;

use crate::model::{FontSize, Line};

/// Dominant typography of one page, the baseline headings are judged against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageProfile {
    /// Most frequent rounded run size
    pub body_size: FontSize,
    /// Most frequent font family
    pub body_font: String,
}

impl PageProfile {
    /// Profile a page from its non-table lines.
    ///
    /// Every run with visible text casts one vote for its size and one for
    /// its font. Returns `None` when there is nothing to count.
    pub fn from_lines<'a, I>(lines: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Line>,
    {
        let mut sizes = Tally::default();
        let mut fonts = Tally::default();

        for run in lines.into_iter().flat_map(|l| l.runs.iter()) {
            if run.trimmed().is_empty() {
                continue;
            }
            sizes.add(run.rounded_size());
            fonts.add(run.font.clone());
        }

        Some(Self {
            body_size: sizes.most_common()?,
            body_font: fonts.most_common()?,
        })
    }
}

/// Occurrence counter that remembers first-seen order.
#[derive(Debug)]
pub(crate) struct Tally<K> {
    counts: IndexMap<K, usize>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq + Clone> Tally<K> {
    pub(crate) fn add(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Highest count wins; ties go to the key seen first.
    pub(crate) fn most_common(&self) -> Option<K> {
        let mut best: Option<(&K, usize)> = None;
        for (key, &count) in &self.counts {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((key, count));
            }
        }
        best.map(|(k, _)| k.clone())
    }
}
