//! Heading inference from typography.
//!
//! The engine turns laid-out pages into a [`DocumentOutline`]:
//!
//! ```text
//! pages ─► drop table rows ─► profile page ─► classify lines ─┐
//!   │                                                         ├─► levels ─► merge/dedup ─► outline
//!   └──► title (first page) ──────────────────────────────────┘
//! ```
//!
//! Everything up to classification is page-local and runs in parallel when
//! enabled; levels and merging need the whole, page-ordered candidate list.

mod classify;
mod features;
mod levels;
mod merge;
mod profile;
mod rules;
mod table;
mod title;

pub use classify::{HeadingCandidate, HeadingClassifier, PageContext, Rejection, Rule, Verdict};
pub use features::LineFeatures;
pub use levels::LevelMap;
pub use merge::{merge_candidates, PageIndex};
pub use profile::PageProfile;
pub use rules::{
    FollowingBodyRule, LongParagraphRule, SanityRule, SizeTierRule, SubsectionRule,
    TitlePartRule,
};
pub use table::is_table_like;
pub use title::TitleInfo;

use std::cmp::Ordering;
use std::collections::HashSet;

use rayon::prelude::*;

use crate::model::{DocumentOutline, PageLayout};

/// What the engine found on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageReport {
    /// Page number (1-indexed)
    pub page: u32,
    /// Body typography, `None` for pages without text
    pub profile: Option<PageProfile>,
    /// Lines kept after table filtering
    pub lines: usize,
    /// Lines dropped as table rows
    pub table_lines: usize,
    /// Heading candidates accepted on the page
    pub candidates: usize,
}

/// Full result of an engine run, for diagnostics.
#[derive(Debug, Clone)]
pub struct OutlineAnalysis {
    /// The outline itself
    pub outline: DocumentOutline,
    /// Title and its parts
    pub title: TitleInfo,
    /// Per-page findings, in input order
    pub pages: Vec<PageReport>,
    /// Accepted candidates in (page, position) order, before merging
    pub candidates: Vec<HeadingCandidate>,
}

/// Infers a title and heading outline from page layouts.
#[derive(Debug)]
pub struct OutlineEngine {
    classifier: HeadingClassifier,
    parallel: bool,
}

impl OutlineEngine {
    /// Create an engine with the standard rules.
    pub fn new() -> Self {
        Self {
            classifier: HeadingClassifier::new(),
            parallel: true,
        }
    }

    /// Use a custom classifier.
    pub fn with_classifier(mut self, classifier: HeadingClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Enable or disable parallel page processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Infer the outline of a document.
    pub fn infer(&self, pages: &[PageLayout]) -> DocumentOutline {
        self.analyze(pages).outline
    }

    /// Infer the outline and keep the intermediate findings.
    ///
    /// The title is taken from the first page given.
    pub fn analyze(&self, pages: &[PageLayout]) -> OutlineAnalysis {
        let title = TitleInfo::extract(pages.first());

        let per_page = |page: &PageLayout| self.analyze_page(page, &title);
        let results: Vec<(PageReport, Vec<HeadingCandidate>)> = if self.parallel {
            pages.par_iter().map(per_page).collect()
        } else {
            pages.iter().map(per_page).collect()
        };

        let mut reports = Vec::with_capacity(results.len());
        let mut candidates = Vec::new();
        for (report, found) in results {
            reports.push(report);
            candidates.extend(found);
        }

        candidates.sort_by(|a, b| {
            a.page
                .cmp(&b.page)
                .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
        });

        let levels = LevelMap::from_candidates(&candidates);
        let index = PageIndex::new(pages);
        let mut seen = HashSet::new();
        let entries = merge_candidates(&candidates, &levels, &index, &mut seen);

        log::debug!(
            "{} candidates, {} levels, {} outline entries",
            candidates.len(),
            levels.depth(),
            entries.len()
        );

        OutlineAnalysis {
            outline: DocumentOutline::new(title.title.clone(), entries),
            title,
            pages: reports,
            candidates,
        }
    }

    fn analyze_page(
        &self,
        page: &PageLayout,
        title: &TitleInfo,
    ) -> (PageReport, Vec<HeadingCandidate>) {
        let (kept, tables): (Vec<_>, Vec<_>) =
            page.lines.iter().partition(|line| !is_table_like(line));

        let mut report = PageReport {
            page: page.number,
            profile: None,
            lines: kept.len(),
            table_lines: tables.len(),
            candidates: 0,
        };

        let Some(profile) = PageProfile::from_lines(kept.iter().copied()) else {
            log::debug!("page {}: no text, skipped", page.number);
            return (report, Vec::new());
        };
        log::debug!(
            "page {}: body {}pt {:?}, {} table rows dropped",
            page.number,
            profile.body_size,
            profile.body_font,
            tables.len()
        );

        let features: Vec<LineFeatures> = kept
            .iter()
            .filter_map(|line| LineFeatures::from_line(line))
            .collect();
        let ctx = PageContext {
            page: page.number,
            profile: &profile,
            lines: &features,
            title,
        };
        let candidates = self.classifier.classify_page(&ctx);

        report.candidates = candidates.len();
        report.profile = Some(profile);
        (report, candidates)
    }
}

impl Default for OutlineEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Infer an outline with the standard engine.
pub fn infer_outline(pages: &[PageLayout]) -> DocumentOutline {
    OutlineEngine::new().infer(pages)
}
