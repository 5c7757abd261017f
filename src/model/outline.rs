//! Outline types: the result handed to serialisation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Hierarchy level of an outline entry.
///
/// Serialised as `"H1"`, `"H2"`, ... or `"Unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    /// Rank among the distinct heading sizes, 1 = largest
    Rank(u32),
    /// Size was never ranked
    Unknown,
}

impl HeadingLevel {
    /// Numeric rank, if known.
    pub fn rank(&self) -> Option<u32> {
        match self {
            HeadingLevel::Rank(r) => Some(*r),
            HeadingLevel::Unknown => None,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadingLevel::Rank(r) => write!(f, "H{}", r),
            HeadingLevel::Unknown => f.write_str("Unknown"),
        }
    }
}

impl FromStr for HeadingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Unknown" {
            return Ok(HeadingLevel::Unknown);
        }
        s.strip_prefix('H')
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .map(HeadingLevel::Rank)
            .ok_or_else(|| format!("invalid heading level: {}", s))
    }
}

impl Serialize for HeadingLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HeadingLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A single heading in the inferred outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Hierarchy level
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Page the heading starts on (1-indexed)
    pub page: u32,
}

impl OutlineEntry {
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title plus ordered headings of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title
    pub title: String,
    /// Headings in document order
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    /// Title used when the first page has no text.
    pub const UNTITLED: &'static str = "Untitled Document";

    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Check if no headings were found.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Headings found on a given page.
    pub fn entries_on_page(&self, page: u32) -> impl Iterator<Item = &OutlineEntry> {
        self.outline.iter().filter(move |e| e.page == page)
    }
}

impl Default for DocumentOutline {
    fn default() -> Self {
        Self::new(Self::UNTITLED, Vec::new())
    }
}
