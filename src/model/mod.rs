//! Document model types.
//!
//! Layout types describe what a page looks like (runs, lines, boxes);
//! outline types describe what the engine concluded (title and headings).

mod layout;
mod outline;

pub use layout::{BoundingBox, FontSize, Line, PageLayout, TextRun};
pub use outline::{DocumentOutline, HeadingLevel, OutlineEntry};
