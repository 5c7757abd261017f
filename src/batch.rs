//! Folder-level processing: one JSON outline per PDF.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::Outliner;

/// Progress notifications emitted while a batch runs.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// The batch found `total` documents
    Started { total: usize },
    /// A document was written to `output`
    Succeeded {
        input: &'a Path,
        output: &'a Path,
        entries: usize,
    },
    /// A document could not be processed
    Failed { input: &'a Path, error: &'a Error },
}

/// Summary of a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Number of outlines written
    pub succeeded: usize,
    /// File names of documents that failed, in input order
    pub failed: Vec<String>,
    /// Where the outlines were written
    pub output_dir: PathBuf,
}

impl BatchReport {
    /// Total number of documents seen.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed.len()
    }
}

/// List the PDFs directly inside a directory, sorted by name.
pub fn collect_pdfs(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(input_dir)
        .map_err(|e| Error::Batch(format!("cannot read {}: {}", input_dir.display(), e)))?;

    let mut pdfs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_pdf_name(path))
        .collect();
    pdfs.sort();
    Ok(pdfs)
}

fn is_pdf_name(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Output path for an input document: `<output_dir>/<stem>.json`.
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "outline".to_string());
    output_dir.join(format!("{}.json", stem))
}

/// Process every PDF in `input_dir`, writing outlines to `output_dir`.
///
/// A failing document is reported and skipped; only an unusable input or
/// output directory fails the batch.
pub fn run_batch<F>(
    input_dir: &Path,
    output_dir: &Path,
    outliner: &Outliner,
    on_event: F,
) -> Result<BatchReport>
where
    F: Fn(BatchEvent<'_>) + Sync,
{
    fs::create_dir_all(output_dir).map_err(|e| {
        Error::Batch(format!("cannot create {}: {}", output_dir.display(), e))
    })?;
    let inputs = collect_pdfs(input_dir)?;

    log::info!(
        "Processing {} PDFs from {}",
        inputs.len(),
        input_dir.display()
    );
    on_event(BatchEvent::Started {
        total: inputs.len(),
    });

    let process = |input: &PathBuf| -> bool {
        let output = output_path(input, output_dir);
        match write_outline(input, &output, outliner) {
            Ok(entries) => {
                on_event(BatchEvent::Succeeded {
                    input,
                    output: &output,
                    entries,
                });
                true
            }
            Err(error) => {
                log::warn!("Failed to process {}: {}", input.display(), error);
                on_event(BatchEvent::Failed {
                    input,
                    error: &error,
                });
                false
            }
        }
    };

    let outcomes: Vec<bool> = if outliner.options().parallel {
        inputs.par_iter().map(process).collect()
    } else {
        inputs.iter().map(process).collect()
    };

    let mut report = BatchReport {
        output_dir: output_dir.to_path_buf(),
        ..BatchReport::default()
    };
    for (input, ok) in inputs.iter().zip(outcomes) {
        if ok {
            report.succeeded += 1;
        } else {
            report
                .failed
                .push(input.file_name().map_or_else(String::new, |n| n.to_string_lossy().to_string()));
        }
    }

    log::info!(
        "Batch finished: {} succeeded, {} failed",
        report.succeeded,
        report.failed.len()
    );
    Ok(report)
}

fn write_outline(input: &Path, output: &Path, outliner: &Outliner) -> Result<usize> {
    let outline = outliner.extract_file(input)?;
    let json = outliner.to_json(&outline)?;
    fs::write(output, json)?;
    Ok(outline.len())
}
