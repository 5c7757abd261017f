//! Page layout types handed to the outline engine.
//!
//! These are the only shapes the engine sees. Whatever produced them (the
//! lopdf-backed extractor in [`crate::parser`], or a test) converts into
//! them once; nothing downstream touches backend structures.

use std::fmt;

/// A font size rounded to one decimal place, stored in tenths of a point.
///
/// Rounding once and comparing integers keeps the size thresholds exact:
/// `body + 2pt` is `body.tenths() + 20`, and two sizes that print the same
/// always compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FontSize(i32);

impl FontSize {
    /// Round a size in points to one decimal.
    pub fn from_points(points: f32) -> Self {
        Self((f64::from(points) * 10.0).round() as i32)
    }

    /// Build a size directly from tenths of a point.
    pub const fn from_tenths(tenths: i32) -> Self {
        Self(tenths)
    }

    /// Size in tenths of a point.
    pub const fn tenths(self) -> i32 {
        self.0
    }

    /// Size in points.
    pub fn points(self) -> f32 {
        self.0 as f32 / 10.0
    }

    /// Mean of several sizes, rounded to one decimal. `None` when empty.
    pub fn mean(sizes: &[FontSize]) -> Option<Self> {
        if sizes.is_empty() {
            return None;
        }
        let total: i64 = sizes.iter().map(|s| i64::from(s.0)).sum();
        Some(Self((total as f64 / sizes.len() as f64).round() as i32))
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.points())
    }
}

/// Axis-aligned box with a top-left origin (y grows down the page).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoundingBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// A contiguous piece of text in a single font, size and weight.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Raw text, untrimmed
    pub text: String,
    /// Font size in points, unrounded
    pub size: f32,
    /// Font family name, lower-cased
    pub font: String,
    /// Position on the page
    pub bbox: BoundingBox,
    /// Whether the family name marks a bold face
    pub bold: bool,
}

impl TextRun {
    /// Create a run. The font name is lower-cased and boldness is read
    /// from it.
    pub fn new(
        text: impl Into<String>,
        size: f32,
        font: impl AsRef<str>,
        bbox: BoundingBox,
    ) -> Self {
        let font = font.as_ref().to_lowercase();
        let bold = font.contains("bold");
        Self {
            text: text.into(),
            size,
            font,
            bbox,
            bold,
        }
    }

    /// Font size rounded to one decimal.
    pub fn rounded_size(&self) -> FontSize {
        FontSize::from_points(self.size)
    }

    /// Text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// A visual row of runs sharing a vertical position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    /// Runs in reading order (left to right)
    pub runs: Vec<TextRun>,
    /// Box covering all runs
    pub bbox: BoundingBox,
}

impl Line {
    /// Build a line whose box covers all of its runs.
    pub fn from_runs(runs: Vec<TextRun>) -> Self {
        let bbox = runs
            .iter()
            .map(|r| r.bbox)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
        Self { runs, bbox }
    }

    /// Vertical position of the line (top of its box).
    pub fn y(&self) -> f32 {
        self.bbox.y0
    }

    /// True when at least one run carries visible text.
    pub fn has_text(&self) -> bool {
        self.runs.iter().any(|r| !r.trimmed().is_empty())
    }
}

/// One page of laid-out text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    /// Page number (1-indexed)
    pub number: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Lines ordered top to bottom
    pub lines: Vec<Line>,
}

impl PageLayout {
    /// Create an empty US Letter page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            width: 612.0,
            height: 792.0,
            lines: Vec::new(),
        }
    }

    /// Builder-style helper to set lines.
    pub fn with_lines(mut self, lines: Vec<Line>) -> Self {
        self.lines = lines;
        self
    }

    /// Check if the page holds no visible text.
    pub fn is_empty(&self) -> bool {
        !self.lines.iter().any(Line::has_text)
    }
}
