//! Per-line features the classifier works from.

use indexmap::IndexSet;

use crate::model::{FontSize, Line};

/// A non-empty line reduced to the attributes heading rules look at.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFeatures {
    /// Run texts, trimmed and joined with single spaces
    pub text: String,
    /// Rounded size of each contributing run
    pub sizes: Vec<FontSize>,
    /// Distinct font families, in order of appearance
    pub fonts: IndexSet<String>,
    /// Boldness of each contributing run
    pub bold_flags: Vec<bool>,
    /// Mean run size, rounded to one decimal
    pub avg_size: FontSize,
    /// True when any run is bold
    pub bold: bool,
    /// Vertical position (top of the line)
    pub y: f32,
    /// Number of whitespace-separated words
    pub word_count: usize,
}

impl LineFeatures {
    /// Analyse a line. Blank runs are ignored; a line with no visible text
    /// yields `None`.
    pub fn from_line(line: &Line) -> Option<Self> {
        let mut texts = Vec::new();
        let mut sizes = Vec::new();
        let mut fonts = IndexSet::new();
        let mut bold_flags = Vec::new();

        for run in &line.runs {
            let text = run.trimmed();
            if text.is_empty() {
                continue;
            }
            texts.push(text);
            sizes.push(run.rounded_size());
            fonts.insert(run.font.clone());
            bold_flags.push(run.bold);
        }

        let avg_size = FontSize::mean(&sizes)?;
        let text = texts.join(" ");
        let word_count = text.split_whitespace().count();

        Some(Self {
            avg_size,
            bold: bold_flags.iter().any(|b| *b),
            text,
            sizes,
            fonts,
            bold_flags,
            y: line.y(),
            word_count,
        })
    }

    /// All runs agree on weight with the line as a whole.
    pub fn uniform_weight(&self) -> bool {
        self.bold_flags.iter().all(|b| *b == self.bold)
    }

    /// Single family, every run at the average size, uniform weight.
    pub fn uniform_style(&self) -> bool {
        let avg = self.avg_size.tenths();
        self.fonts.len() == 1
            && self.sizes.iter().all(|s| (s.tenths() - avg).abs() <= 1)
            && self.uniform_weight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, TextRun};

    fn run(text: &str, size: f32, font: &str) -> TextRun {
        TextRun::new(text, size, font, BoundingBox::new(0.0, 40.0, 50.0, 52.0))
    }

    #[test]
    fn test_features_join_and_average() {
        let line = Line::from_runs(vec![
            run("  1.  ", 12.0, "Arial-Bold"),
            run("   ", 30.0, "Other"),
            run("Scope of Work ", 11.0, "Arial"),
        ]);
        let f = LineFeatures::from_line(&line).unwrap();
        assert_eq!(f.text, "1. Scope of Work");
        assert_eq!(f.sizes.len(), 2);
        assert_eq!(f.avg_size, FontSize::from_tenths(115));
        assert!(f.bold);
        assert_eq!(f.word_count, 4);
        assert_eq!(f.fonts.len(), 2);
        assert_eq!(f.y, 40.0);
        assert!(!f.uniform_weight());
        assert!(!f.uniform_style());
    }

    #[test]
    fn test_uniform_style() {
        let line = Line::from_runs(vec![
            run("Deadline:", 10.0, "Arial"),
            run("Friday", 10.0, "Arial"),
        ]);
        let f = LineFeatures::from_line(&line).unwrap();
        assert!(f.uniform_style());

        let line = Line::from_runs(vec![
            run("Deadline:", 10.0, "Arial"),
            run("Friday", 10.1, "Arial"),
        ]);
        assert!(LineFeatures::from_line(&line).unwrap().uniform_style());

        let line = Line::from_runs(vec![
            run("Deadline:", 10.0, "Arial"),
            run("Friday", 10.4, "Arial"),
        ]);
        assert!(!LineFeatures::from_line(&line).unwrap().uniform_style());
    }

    #[test]
    fn test_blank_line_has_no_features() {
        let line = Line::from_runs(vec![run("  ", 10.0, "Arial")]);
        assert!(LineFeatures::from_line(&line).is_none());
        assert!(LineFeatures::from_line(&Line::default()).is_none());
    }
}
