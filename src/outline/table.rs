//! Table-row detection for single lines.
//!
//! Rows of a table come out of the layout as lines made of many short,
//! tightly packed runs. Such lines are dropped before profiling, title
//! selection and classification so cell text never competes with body text
//! or headings.

use crate::model::Line;

/// Fewer runs than this never count as a table row.
const MIN_RUNS: usize = 4;
/// A run is a "short cell" at or below this many characters (trimmed).
const SHORT_CELL_CHARS: usize = 15;
/// At least this many short cells are needed.
const MIN_SHORT_CELLS: usize = 3;
/// Tables are typically set in small type.
const MAX_TABLE_FONT_SIZE: f32 = 9.0;
/// Mean run width below which runs count as tightly packed.
const PACKED_RUN_WIDTH: f32 = 55.0;
/// Tightly packed runs must each be shorter than this (raw characters).
const PACKED_RUN_CHARS: usize = 20;

/// Check if a line looks like a row of a table.
///
/// A line with fewer than four runs is never a table row. Otherwise it is
/// one when three or more runs are short cells in small type, or when its
/// runs are narrow on average and all short.
pub fn is_table_like(line: &Line) -> bool {
    let runs = &line.runs;
    if runs.len() < MIN_RUNS {
        return false;
    }

    let short_cells = runs
        .iter()
        .filter(|r| r.trimmed().chars().count() <= SHORT_CELL_CHARS)
        .count();
    if short_cells >= MIN_SHORT_CELLS {
        let mean_size = runs.iter().map(|r| r.size).sum::<f32>() / runs.len() as f32;
        if mean_size <= MAX_TABLE_FONT_SIZE {
            return true;
        }
    }

    let mean_width = runs.iter().map(|r| r.bbox.width()).sum::<f32>() / runs.len() as f32;
    mean_width < PACKED_RUN_WIDTH
        && runs
            .iter()
            .all(|r| r.text.chars().count() < PACKED_RUN_CHARS)
}
