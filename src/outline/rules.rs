//! The standard heading rules, in the order the classifier runs them.
//!
//! Sizes are compared in tenths of a point; see [`FontSize`](crate::model::FontSize).

use regex::Regex;

use super::classify::{PageContext, Rejection, Rule, Verdict};
use super::features::LineFeatures;

/// Phrases that mark an explanatory sub-item ("the role of ...").
const EXPLANATORY_PHRASES: &[&str] = &[
    "to appoint",
    "to name",
    "role of",
    "executive",
    "responsible for",
    "in consultation with",
];

/// Phrases that mark an explanatory parenthetical.
const PARENTHETICAL_PHRASES: &[&str] = &["to appoint", "to name", "executive", "role of"];

/// Decimal sub-items longer than this are explanations, not headings.
const MAX_SUBSECTION_HEADING_CHARS: usize = 50;

/// Longer unemphasised lines are paragraph text.
const MAX_PLAIN_HEADING_WORDS: usize = 15;

/// Fragments of contact and submission lines.
const CONTACT_MARKERS: &[&str] = &[
    "@", "email", "mail", "only by", "p.m.", "a.m.", "fax", "submit",
];

/// Body words that must follow a heading on its page.
const MIN_FOLLOWING_WORDS: usize = 25;

/// Rejects lines that repeat the document title.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitlePartRule;

impl Rule for TitlePartRule {
    fn name(&self) -> &'static str {
        "title-part"
    }

    fn evaluate(&self, line: &LineFeatures, ctx: &PageContext<'_>) -> Verdict {
        if ctx.title.is_part(&line.text) {
            Verdict::Reject(Rejection::TitlePart)
        } else {
            Verdict::Continue
        }
    }
}

/// Rejects explanatory sub-items such as "3.1 The role of the executive ...".
#[derive(Debug, Clone)]
pub struct SubsectionRule {
    decimal: Regex,
    parenthetical: Regex,
}

impl SubsectionRule {
    pub fn new() -> Self {
        Self {
            decimal: Regex::new(r"^\d+\.\d+").unwrap(),
            parenthetical: Regex::new(r"\([^)]+\)").unwrap(),
        }
    }

    /// Check if text reads as an explanation rather than a heading.
    pub fn is_explanation(&self, text: &str) -> bool {
        let text = text.trim();

        if text.contains('(') && text.contains(')') {
            let explained = self.parenthetical.find_iter(text).any(|m| {
                let content = m.as_str().to_lowercase();
                PARENTHETICAL_PHRASES.iter().any(|p| content.contains(p))
            });
            if explained {
                return true;
            }
        }

        if self.decimal.is_match(text) && text.chars().count() > MAX_SUBSECTION_HEADING_CHARS {
            return true;
        }

        let lower = text.to_lowercase();
        EXPLANATORY_PHRASES.iter().any(|p| lower.contains(p))
    }
}

impl Default for SubsectionRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for SubsectionRule {
    fn name(&self) -> &'static str {
        "subsection"
    }

    fn evaluate(&self, line: &LineFeatures, _ctx: &PageContext<'_>) -> Verdict {
        if self.is_explanation(&line.text) {
            Verdict::Reject(Rejection::SubsectionExplanation)
        } else {
            Verdict::Continue
        }
    }
}

/// Rejects long, unemphasised lines near body size.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongParagraphRule;

impl Rule for LongParagraphRule {
    fn name(&self) -> &'static str {
        "long-paragraph"
    }

    fn evaluate(&self, line: &LineFeatures, ctx: &PageContext<'_>) -> Verdict {
        let body = ctx.profile.body_size.tenths();
        if line.word_count > MAX_PLAIN_HEADING_WORDS
            && line.avg_size.tenths() <= body + 10
            && !line.bold
        {
            Verdict::Reject(Rejection::LongParagraph)
        } else {
            Verdict::Continue
        }
    }
}

/// Decides by size relative to body text, with style cues for smaller lines.
///
/// - two points or more above body: always a candidate
/// - half a point to two points above: needs bold, a different font, or numbering
/// - body size and numbered: needs bold or a different font, and uniform weight
/// - anything smaller containing a colon: needs emphasis and a uniform style,
///   and must not look like contact details
#[derive(Debug, Clone)]
pub struct SizeTierRule {
    numbered: Regex,
}

impl SizeTierRule {
    pub fn new() -> Self {
        Self {
            numbered: Regex::new(r"(?i)^(\d+(\.\d+)*|[a-z]\)|\([a-z]\))[\s.:]+.+").unwrap(),
        }
    }

    /// Check if text starts with a section number ("2.1", "a)", "(b)").
    pub fn is_numbered(&self, text: &str) -> bool {
        self.numbered.is_match(text.trim())
    }

    fn colon_tier(&self, line: &LineFeatures, ctx: &PageContext<'_>) -> Verdict {
        let body = ctx.profile.body_size.tenths();
        let emphasised = line.bold
            || font_differs(line, &ctx.profile.body_font)
            || line.avg_size.tenths() > body + 1;
        if !emphasised {
            return Verdict::Reject(Rejection::ColonNotEmphasised);
        }
        if !line.uniform_style() {
            return Verdict::Reject(Rejection::ColonMixedStyle);
        }
        let lower = line.text.to_lowercase();
        if CONTACT_MARKERS.iter().any(|m| lower.contains(m)) {
            return Verdict::Reject(Rejection::ContactLine);
        }
        Verdict::Continue
    }
}

impl Default for SizeTierRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for SizeTierRule {
    fn name(&self) -> &'static str {
        "size-tier"
    }

    fn evaluate(&self, line: &LineFeatures, ctx: &PageContext<'_>) -> Verdict {
        let body = ctx.profile.body_size.tenths();
        let size = line.avg_size.tenths();

        if size >= body + 20 {
            Verdict::Continue
        } else if size >= body + 5 {
            if line.bold || font_differs(line, &ctx.profile.body_font) || self.is_numbered(&line.text)
            {
                Verdict::Continue
            } else {
                Verdict::Reject(Rejection::PlainMidSize)
            }
        } else if size == body && self.is_numbered(&line.text) {
            let differs = line.fonts.iter().any(|f| *f != ctx.profile.body_font);
            if (line.bold || differs) && line.uniform_weight() {
                Verdict::Continue
            } else {
                Verdict::Reject(Rejection::NumberedNotEmphasised)
            }
        } else if line.text.contains(':') {
            self.colon_tier(line, ctx)
        } else {
            Verdict::Reject(Rejection::BodyText)
        }
    }
}

/// A run font "differs" when the body font name does not contain it.
fn font_differs(line: &LineFeatures, body_font: &str) -> bool {
    line.fonts.iter().any(|f| !body_font.contains(f.as_str()))
}

/// Rejects headings with fewer than 25 body-size words below them on the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct FollowingBodyRule;

impl FollowingBodyRule {
    /// Count body-size words below `y`, stopping once enough are found.
    pub fn words_below(y: f32, ctx: &PageContext<'_>) -> usize {
        let body = ctx.profile.body_size.tenths();
        let mut words = 0;
        for line in ctx.lines {
            if line.y > y && (line.avg_size.tenths() - body).abs() <= 2 {
                words += line.word_count;
            }
            if words >= MIN_FOLLOWING_WORDS {
                break;
            }
        }
        words
    }
}

impl Rule for FollowingBodyRule {
    fn name(&self) -> &'static str {
        "following-body"
    }

    fn evaluate(&self, line: &LineFeatures, ctx: &PageContext<'_>) -> Verdict {
        if Self::words_below(line.y, ctx) < MIN_FOLLOWING_WORDS {
            Verdict::Reject(Rejection::NoFollowingBody)
        } else {
            Verdict::Continue
        }
    }
}

/// Rejects stray glyphs: two characters or fewer, or one word without two
/// consecutive letters.
#[derive(Debug, Clone)]
pub struct SanityRule {
    letters: Regex,
}

impl SanityRule {
    pub fn new() -> Self {
        Self {
            letters: Regex::new(r"[a-zA-Z]{2,}").unwrap(),
        }
    }
}

impl Default for SanityRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for SanityRule {
    fn name(&self) -> &'static str {
        "sanity"
    }

    fn evaluate(&self, line: &LineFeatures, _ctx: &PageContext<'_>) -> Verdict {
        let text = line.text.trim();
        if text.chars().count() <= 2 || (line.word_count == 1 && !self.letters.is_match(text)) {
            Verdict::Reject(Rejection::TooShort)
        } else {
            Verdict::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, FontSize, Line, TextRun};
    use crate::outline::profile::PageProfile;
    use crate::outline::title::TitleInfo;

    fn features(runs: &[(&str, f32, &str)], y: f32) -> LineFeatures {
        let line = Line::from_runs(
            runs.iter()
                .map(|(t, s, f)| TextRun::new(*t, *s, f, BoundingBox::new(72.0, y, 300.0, y + s)))
                .collect(),
        );
        LineFeatures::from_line(&line).unwrap()
    }

    fn single(text: &str, size: f32, font: &str) -> LineFeatures {
        features(&[(text, size, font)], 100.0)
    }

    fn profile() -> PageProfile {
        PageProfile {
            body_size: FontSize::from_tenths(100),
            body_font: "arial".to_string(),
        }
    }

    fn check<R: Rule>(rule: &R, line: &LineFeatures, lines: &[LineFeatures]) -> Verdict {
        let profile = profile();
        let title = TitleInfo::untitled();
        let ctx = PageContext {
            page: 1,
            profile: &profile,
            lines,
            title: &title,
        };
        rule.evaluate(line, &ctx)
    }

    #[test]
    fn test_title_part_rule() {
        let line = single("Annual Report", 24.0, "Arial-Bold");
        let profile = profile();
        let mut title = TitleInfo::untitled();
        title.parts.insert("Annual Report".to_string());
        let ctx = PageContext {
            page: 2,
            profile: &profile,
            lines: &[],
            title: &title,
        };
        assert_eq!(
            TitlePartRule.evaluate(&line, &ctx),
            Verdict::Reject(Rejection::TitlePart)
        );
    }

    #[test]
    fn test_subsection_phrases() {
        let rule = SubsectionRule::new();
        assert!(rule.is_explanation("3.1 Appoint a coordinator to appoint the executive"));
        assert!(rule.is_explanation("Working with partners In Consultation With staff"));
        assert!(rule.is_explanation("Board (to name a chair)"));
        assert!(!rule.is_explanation("Board (appendix)"));
        assert!(!rule.is_explanation("2.3 Timeline"));
        assert!(rule.is_explanation(
            "2.3 Timeline for the delivery of services across all participating regions"
        ));
        assert!(!rule.is_explanation(
            "Timeline for the delivery of services across all participating regions"
        ));
    }

    #[test]
    fn test_long_paragraph_rule() {
        let long = "one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen sixteen";
        assert_eq!(
            check(&LongParagraphRule, &single(long, 10.0, "Arial"), &[]),
            Verdict::Reject(Rejection::LongParagraph)
        );
        assert_eq!(
            check(&LongParagraphRule, &single(long, 10.0, "Arial-Bold"), &[]),
            Verdict::Continue
        );
        assert_eq!(
            check(&LongParagraphRule, &single(long, 11.1, "Arial"), &[]),
            Verdict::Continue
        );
    }

    #[test]
    fn test_numbered_pattern() {
        let rule = SizeTierRule::new();
        assert!(rule.is_numbered("1. Introduction"));
        assert!(rule.is_numbered("2.4.1 Scope"));
        assert!(rule.is_numbered("a) Funding"));
        assert!(rule.is_numbered("(B) Goals"));
        assert!(rule.is_numbered("4: Summary"));
        assert!(!rule.is_numbered("Introduction"));
        assert!(!rule.is_numbered("1."));
        assert!(!rule.is_numbered("2021Report"));
    }

    #[test]
    fn test_size_tier_large_always_passes() {
        let rule = SizeTierRule::new();
        assert_eq!(
            check(&rule, &single("Overview", 12.0, "Arial"), &[]),
            Verdict::Continue
        );
    }

    #[test]
    fn test_size_tier_mid_needs_style() {
        let rule = SizeTierRule::new();
        assert_eq!(
            check(&rule, &single("Overview", 11.0, "Arial"), &[]),
            Verdict::Reject(Rejection::PlainMidSize)
        );
        assert_eq!(
            check(&rule, &single("Overview", 11.0, "Arial-Bold"), &[]),
            Verdict::Continue
        );
        assert_eq!(
            check(&rule, &single("Overview", 11.0, "Georgia"), &[]),
            Verdict::Continue
        );
        assert_eq!(
            check(&rule, &single("3. Overview", 11.0, "Arial"), &[]),
            Verdict::Continue
        );
    }

    #[test]
    fn test_size_tier_substring_font_is_not_different() {
        let rule = SizeTierRule::new();
        let profile = PageProfile {
            body_size: FontSize::from_tenths(100),
            body_font: "arial-regular".to_string(),
        };
        let title = TitleInfo::untitled();
        let ctx = PageContext {
            page: 1,
            profile: &profile,
            lines: &[],
            title: &title,
        };
        assert_eq!(
            rule.evaluate(&single("Overview", 11.0, "Arial"), &ctx),
            Verdict::Reject(Rejection::PlainMidSize)
        );
    }

    #[test]
    fn test_size_tier_numbered_font_compared_exactly() {
        let rule = SizeTierRule::new();
        let profile = PageProfile {
            body_size: FontSize::from_tenths(100),
            body_font: "arial-regular".to_string(),
        };
        let title = TitleInfo::untitled();
        let ctx = PageContext {
            page: 1,
            profile: &profile,
            lines: &[],
            title: &title,
        };
        assert_eq!(
            rule.evaluate(&single("2.1 Budget", 10.0, "Arial"), &ctx),
            Verdict::Continue
        );
        assert_eq!(
            rule.evaluate(&single("Eligibility:", 10.0, "Arial"), &ctx),
            Verdict::Reject(Rejection::ColonNotEmphasised)
        );
    }

    #[test]
    fn test_size_tier_colon_line_with_near_sizes() {
        let rule = SizeTierRule::new();
        let line = features(
            &[("Eligibility:", 10.0, "Arial-Bold"), ("Applicants", 10.1, "Arial-Bold")],
            100.0,
        );
        assert_eq!(check(&rule, &line, &[]), Verdict::Continue);
    }

    #[test]
    fn test_size_tier_numbered_body_size() {
        let rule = SizeTierRule::new();
        assert_eq!(
            check(&rule, &single("2.1 Budget", 10.0, "Arial-Bold"), &[]),
            Verdict::Continue
        );
        assert_eq!(
            check(&rule, &single("2.1 Budget", 10.0, "Arial"), &[]),
            Verdict::Reject(Rejection::NumberedNotEmphasised)
        );
        let mixed = features(&[("2.1", 10.0, "Arial-Bold"), ("Budget", 10.0, "Arial")], 100.0);
        assert_eq!(
            check(&rule, &mixed, &[]),
            Verdict::Reject(Rejection::NumberedNotEmphasised)
        );
    }

    #[test]
    fn test_size_tier_colon_lines() {
        let rule = SizeTierRule::new();
        assert_eq!(
            check(&rule, &single("Eligibility:", 10.0, "Arial-Bold"), &[]),
            Verdict::Continue
        );
        assert_eq!(
            check(&rule, &single("Eligibility:", 10.0, "Arial"), &[]),
            Verdict::Reject(Rejection::ColonNotEmphasised)
        );
        assert_eq!(
            check(&rule, &single("Eligibility:", 10.2, "Arial"), &[]),
            Verdict::Continue
        );
        let mixed = features(
            &[("Deadline:", 10.0, "Arial-Bold"), ("Friday", 10.0, "Times-Bold")],
            100.0,
        );
        assert_eq!(
            check(&rule, &mixed, &[]),
            Verdict::Reject(Rejection::ColonMixedStyle)
        );
        assert_eq!(
            check(&rule, &single("Email: info@example.org", 10.0, "Arial-Bold"), &[]),
            Verdict::Reject(Rejection::ContactLine)
        );
        assert_eq!(
            check(&rule, &single("Hours: 9 a.m. to 5", 10.0, "Arial-Bold"), &[]),
            Verdict::Reject(Rejection::ContactLine)
        );
    }

    #[test]
    fn test_size_tier_plain_body() {
        let rule = SizeTierRule::new();
        assert_eq!(
            check(&rule, &single("Just some text", 10.0, "Arial-Bold"), &[]),
            Verdict::Reject(Rejection::BodyText)
        );
        assert_eq!(
            check(&rule, &single("Small print", 8.0, "Arial"), &[]),
            Verdict::Reject(Rejection::BodyText)
        );
    }

    #[test]
    fn test_following_body_counts_only_lines_below() {
        let heading = features(&[("Scope", 14.0, "Arial-Bold")], 200.0);
        let above: Vec<LineFeatures> = (0..5)
            .map(|i| {
                features(
                    &[("one two three four five six seven eight nine ten", 10.0, "Arial")],
                    100.0 + i as f32 * 12.0,
                )
            })
            .collect();
        assert_eq!(
            check(&FollowingBodyRule, &heading, &above),
            Verdict::Reject(Rejection::NoFollowingBody)
        );

        let below: Vec<LineFeatures> = (0..3)
            .map(|i| {
                features(
                    &[("one two three four five six seven eight nine ten", 10.1, "Arial")],
                    220.0 + i as f32 * 12.0,
                )
            })
            .collect();
        assert_eq!(check(&FollowingBodyRule, &heading, &below), Verdict::Continue);
    }

    fn paragraph(size: f32, y: f32) -> Vec<LineFeatures> {
        (0..5)
            .map(|i| {
                features(
                    &[("one two three four five six seven eight nine ten", size, "Arial")],
                    y + i as f32 * 12.0,
                )
            })
            .collect()
    }

    #[test]
    fn test_following_body_tolerance_is_inclusive() {
        let heading = features(&[("Scope", 14.0, "Arial-Bold")], 200.0);
        assert_eq!(
            check(&FollowingBodyRule, &heading, &paragraph(10.2, 220.0)),
            Verdict::Continue
        );
        assert_eq!(
            check(&FollowingBodyRule, &heading, &paragraph(9.8, 220.0)),
            Verdict::Continue
        );
    }

    #[test]
    fn test_following_body_ignores_other_sizes() {
        let heading = features(&[("Scope", 14.0, "Arial-Bold")], 200.0);
        assert_eq!(
            check(&FollowingBodyRule, &heading, &paragraph(10.3, 220.0)),
            Verdict::Reject(Rejection::NoFollowingBody)
        );
        assert_eq!(
            check(&FollowingBodyRule, &heading, &paragraph(9.7, 220.0)),
            Verdict::Reject(Rejection::NoFollowingBody)
        );
    }

    #[test]
    fn test_sanity_rule() {
        let rule = SanityRule::new();
        assert_eq!(
            check(&rule, &single("IV", 14.0, "Arial"), &[]),
            Verdict::Reject(Rejection::TooShort)
        );
        assert_eq!(
            check(&rule, &single("2024", 14.0, "Arial"), &[]),
            Verdict::Reject(Rejection::TooShort)
        );
        assert_eq!(
            check(&rule, &single("Q3", 14.0, "Arial"), &[]),
            Verdict::Reject(Rejection::TooShort)
        );
        assert_eq!(
            check(&rule, &single("1 2 3", 14.0, "Arial"), &[]),
            Verdict::Continue
        );
        assert_eq!(
            check(&rule, &single("Goals", 14.0, "Arial"), &[]),
            Verdict::Continue
        );
    }
}
