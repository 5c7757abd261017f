//! Document title selection from the first page.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::model::{DocumentOutline, FontSize, PageLayout};

use super::table::is_table_like;

/// The chosen title and the run texts it was built from.
///
/// The parts are kept so the classifier can skip them wherever they recur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleInfo {
    /// Title text
    pub title: String,
    /// Run texts that make up the title
    pub parts: HashSet<String>,
}

struct TitleRun<'a> {
    text: &'a str,
    size: FontSize,
    bold: bool,
    y: f32,
}

impl TitleInfo {
    /// Pick the title from the most prominent runs of a page.
    ///
    /// Runs are ranked largest first, then topmost. The first run is the
    /// title; the second is appended when it has the same size and weight,
    /// which catches titles wrapped onto two lines.
    pub fn extract(page: Option<&PageLayout>) -> Self {
        let mut runs: Vec<TitleRun<'_>> = page
            .into_iter()
            .flat_map(|p| p.lines.iter())
            .filter(|line| !is_table_like(line))
            .flat_map(|line| line.runs.iter())
            .filter(|run| !run.trimmed().is_empty())
            .map(|run| TitleRun {
                text: run.trimmed(),
                size: run.rounded_size(),
                bold: run.bold,
                y: run.bbox.y0,
            })
            .collect();

        runs.sort_by(|a, b| {
            b.size
                .cmp(&a.size)
                .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
        });

        let Some(top) = runs.first() else {
            log::debug!("No text on the first page, using default title");
            return Self::untitled();
        };

        let mut title = top.text.to_string();
        let mut parts = HashSet::from([top.text.to_string()]);

        if let Some(second) = runs.get(1) {
            if second.size == top.size && second.bold == top.bold {
                title.push(' ');
                title.push_str(second.text);
                parts.insert(second.text.to_string());
            }
        }

        log::debug!("Title: {:?} ({}pt)", title, top.size);

        Self {
            title: title.trim().to_string(),
            parts,
        }
    }

    /// Fallback title for documents without first-page text.
    pub fn untitled() -> Self {
        Self {
            title: DocumentOutline::UNTITLED.to_string(),
            parts: HashSet::new(),
        }
    }

    /// Check if a line's text is one of the title's parts.
    pub fn is_part(&self, text: &str) -> bool {
        self.parts.contains(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, Line, TextRun};

    fn line(text: &str, size: f32, font: &str, y: f32) -> Line {
        Line::from_runs(vec![TextRun::new(
            text,
            size,
            font,
            BoundingBox::new(72.0, y, 72.0 + text.len() as f32 * size * 0.5, y + size),
        )])
    }

    #[test]
    fn test_single_top_run() {
        let page = PageLayout::new(1).with_lines(vec![
            line("Annual Report", 24.0, "Arial-Bold", 50.0),
            line("Prepared by the board", 14.0, "Arial", 90.0),
            line("Body text here", 10.0, "Arial", 120.0),
        ]);
        let info = TitleInfo::extract(Some(&page));
        assert_eq!(info.title, "Annual Report");
        assert!(info.is_part("Annual Report"));
        assert_eq!(info.parts.len(), 1);
    }

    #[test]
    fn test_wrapped_title_joins_two_runs() {
        let page = PageLayout::new(1).with_lines(vec![
            line("Overview", 24.0, "Arial-Bold", 80.0),
            line("RFP: Request for", 24.0, "Arial-Bold", 40.0),
            line("Body", 10.0, "Arial", 120.0),
        ]);
        let info = TitleInfo::extract(Some(&page));
        assert_eq!(info.title, "RFP: Request for Overview");
        assert!(info.is_part("RFP: Request for"));
        assert!(info.is_part("Overview"));
    }

    #[test]
    fn test_second_run_with_other_weight_not_joined() {
        let page = PageLayout::new(1).with_lines(vec![
            line("Main Title", 24.0, "Arial-Bold", 40.0),
            line("Subtitle", 24.0, "Arial", 80.0),
        ]);
        let info = TitleInfo::extract(Some(&page));
        assert_eq!(info.title, "Main Title");
        assert!(!info.is_part("Subtitle"));
    }

    #[test]
    fn test_table_rows_ignored() {
        let cells = (0..4)
            .map(|i| {
                TextRun::new(
                    "X",
                    8.0,
                    "Arial",
                    BoundingBox::new(i as f32 * 20.0, 10.0, i as f32 * 20.0 + 10.0, 18.0),
                )
            })
            .collect();
        let page = PageLayout::new(1).with_lines(vec![
            Line::from_runs(cells),
            line("Small Title", 9.0, "Arial", 40.0),
        ]);
        assert_eq!(TitleInfo::extract(Some(&page)).title, "Small Title");
    }

    #[test]
    fn test_untitled_without_text() {
        assert_eq!(TitleInfo::extract(None).title, "Untitled Document");
        let page = PageLayout::new(1);
        let info = TitleInfo::extract(Some(&page));
        assert_eq!(info.title, "Untitled Document");
        assert!(info.parts.is_empty());
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let page = PageLayout::new(1).with_lines(vec![
            line("Part One", 20.0, "Times-Bold", 30.0),
            line("Part Two", 20.0, "Times-Bold", 30.0),
        ]);
        let first = TitleInfo::extract(Some(&page));
        let second = TitleInfo::extract(Some(&page));
        assert_eq!(first, second);
        assert_eq!(first.title, "Part One Part Two");
    }
}
