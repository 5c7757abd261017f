//! Heading classification as an ordered pipeline of rules.
//!
//! Each [`Rule`] looks at one line in the context of its page and either
//! accepts it, rejects it, or lets the next rule decide. A line that gets
//! through every rule is a heading candidate.

use std::fmt;

use crate::model::FontSize;

use super::features::LineFeatures;
use super::profile::PageProfile;
use super::rules::{
    FollowingBodyRule, LongParagraphRule, SanityRule, SizeTierRule, SubsectionRule,
    TitlePartRule,
};
use super::title::TitleInfo;

/// Outcome of a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The line is a heading; later rules are skipped
    Accept,
    /// The line is not a heading
    Reject(Rejection),
    /// No opinion, ask the next rule
    Continue,
}

/// Why a line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Text is part of the document title
    TitlePart,
    /// Explanatory sub-item rather than a heading
    SubsectionExplanation,
    /// Long run of unemphasised words
    LongParagraph,
    /// Slightly larger than body but otherwise plain
    PlainMidSize,
    /// Numbered body-size line without emphasis or with mixed weight
    NumberedNotEmphasised,
    /// Colon line without emphasis
    ColonNotEmphasised,
    /// Colon line mixing fonts, sizes or weights
    ColonMixedStyle,
    /// Contact or submission detail
    ContactLine,
    /// Body-size text without any heading cue
    BodyText,
    /// Too little body text follows on the page
    NoFollowingBody,
    /// Stray glyphs or numerals
    TooShort,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::TitlePart => "title part",
            Rejection::SubsectionExplanation => "subsection explanation",
            Rejection::LongParagraph => "long paragraph",
            Rejection::PlainMidSize => "plain mid-size text",
            Rejection::NumberedNotEmphasised => "numbered line without emphasis",
            Rejection::ColonNotEmphasised => "colon line without emphasis",
            Rejection::ColonMixedStyle => "colon line with mixed style",
            Rejection::ContactLine => "contact line",
            Rejection::BodyText => "body text",
            Rejection::NoFollowingBody => "no following body text",
            Rejection::TooShort => "too short",
        };
        f.write_str(reason)
    }
}

/// Everything a rule may consult about the page a line sits on.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Page number (1-indexed)
    pub page: u32,
    /// Body typography of the page
    pub profile: &'a PageProfile,
    /// All analysed lines of the page, top to bottom
    pub lines: &'a [LineFeatures],
    /// Document title
    pub title: &'a TitleInfo,
}

/// A single heading test.
pub trait Rule: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Judge one line.
    fn evaluate(&self, line: &LineFeatures, ctx: &PageContext<'_>) -> Verdict;
}

/// A line accepted as a heading, waiting for levels and merging.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    pub text: String,
    pub size: FontSize,
    pub bold: bool,
    pub page: u32,
    pub y: f32,
}

/// Ordered rule pipeline.
pub struct HeadingClassifier {
    rules: Vec<Box<dyn Rule>>,
}

impl HeadingClassifier {
    /// Create a classifier with the standard rules.
    pub fn new() -> Self {
        Self::empty()
            .with_rule(TitlePartRule)
            .with_rule(SubsectionRule::new())
            .with_rule(LongParagraphRule)
            .with_rule(SizeTierRule::new())
            .with_rule(FollowingBodyRule)
            .with_rule(SanityRule::new())
    }

    /// Create a classifier without rules (accepts every line).
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule.
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Insert a rule at a position. Positions past the end append.
    pub fn insert_rule(&mut self, index: usize, rule: impl Rule + 'static) {
        let index = index.min(self.rules.len());
        self.rules.insert(index, Box::new(rule));
    }

    /// Names of the rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run the pipeline on one line. Returns `Accept` or `Reject`.
    pub fn evaluate(&self, line: &LineFeatures, ctx: &PageContext<'_>) -> Verdict {
        for rule in &self.rules {
            match rule.evaluate(line, ctx) {
                Verdict::Continue => {}
                verdict => {
                    if let Verdict::Reject(reason) = verdict {
                        log::trace!(
                            "page {}: {:?} rejected by {} ({})",
                            ctx.page,
                            line.text,
                            rule.name(),
                            reason
                        );
                    }
                    return verdict;
                }
            }
        }
        Verdict::Accept
    }

    /// Classify every line of a page.
    pub fn classify_page(&self, ctx: &PageContext<'_>) -> Vec<HeadingCandidate> {
        ctx.lines
            .iter()
            .filter(|line| self.evaluate(line, ctx) == Verdict::Accept)
            .map(|line| HeadingCandidate {
                text: line.text.clone(),
                size: line.avg_size,
                bold: line.bold,
                page: ctx.page,
                y: line.y,
            })
            .collect()
    }
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HeadingClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadingClassifier")
            .field("rules", &self.rule_names())
            .finish()
    }
}
