//! Merging split headings and dropping repeated ones.

use std::collections::{HashMap, HashSet};

use crate::model::{OutlineEntry, PageLayout};

use super::classify::HeadingCandidate;
use super::levels::LevelMap;

/// Page layouts indexed by page number, built once per document.
pub struct PageIndex<'a> {
    pages: HashMap<u32, &'a PageLayout>,
}

impl<'a> PageIndex<'a> {
    pub fn new(pages: &'a [PageLayout]) -> Self {
        Self {
            pages: pages.iter().map(|p| (p.number, p)).collect(),
        }
    }

    /// Check if any line strictly between two vertical positions on a page
    /// carries text. Table rows count too.
    pub fn has_text_between(&self, page: u32, top: f32, bottom: f32) -> bool {
        self.pages.get(&page).map_or(false, |layout| {
            layout
                .lines
                .iter()
                .any(|line| top < line.y() && line.y() < bottom && line.has_text())
        })
    }
}

/// Turn page-ordered candidates into outline entries.
///
/// Two neighbouring candidates on the same page with the same size are
/// fused when nothing is printed between them, unless both end with a
/// colon. Entries whose text is already in `seen` are dropped; every
/// emitted text is added to it.
pub fn merge_candidates(
    candidates: &[HeadingCandidate],
    levels: &LevelMap,
    pages: &PageIndex<'_>,
    seen: &mut HashSet<String>,
) -> Vec<OutlineEntry> {
    let mut entries = Vec::new();
    let mut i = 0;

    while i < candidates.len() {
        let current = &candidates[i];

        if let Some(next) = candidates.get(i + 1) {
            if can_merge(current, next) && !pages.has_text_between(current.page, current.y, next.y)
            {
                let text = format!("{} {}", current.text, next.text).trim().to_string();
                log::debug!("page {}: merged {:?} + {:?}", current.page, current.text, next.text);
                push_unseen(
                    &mut entries,
                    seen,
                    OutlineEntry::new(levels.level_for(current.size), text, current.page),
                );
                i += 2;
                continue;
            }
        }

        push_unseen(
            &mut entries,
            seen,
            OutlineEntry::new(
                levels.level_for(current.size),
                current.text.clone(),
                current.page,
            ),
        );
        i += 1;
    }

    entries
}

fn can_merge(current: &HeadingCandidate, next: &HeadingCandidate) -> bool {
    current.page == next.page
        && current.size == next.size
        && !(current.text.trim().ends_with(':') && next.text.trim().ends_with(':'))
}

fn push_unseen(entries: &mut Vec<OutlineEntry>, seen: &mut HashSet<String>, entry: OutlineEntry) {
    if seen.insert(entry.text.clone()) {
        entries.push(entry);
    } else {
        log::debug!("Dropping repeated heading {:?}", entry.text);
    }
}
