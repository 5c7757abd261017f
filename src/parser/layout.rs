//! Layout extraction for PDF documents.
//!
//! Interprets page content streams into positioned text spans, groups them
//! into lines by baseline and coalesces neighbouring spans of the same font
//! and size into runs. Output coordinates use a top-left origin.

use std::cmp::Ordering;
use std::collections::HashMap;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::{BoundingBox, FontSize, Line, PageLayout, TextRun};

use super::backend::{ContentOp, PageId, PdfBackend, PdfValue};
use super::options::{ErrorMode, ExtractOptions, PageSelection};

/// TJ adjustment (thousandths of an em) that reads as a word space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Baseline tolerance for grouping spans, as a fraction of span size.
const BASELINE_TOLERANCE: f32 = 0.3;

/// Estimated glyph advance, as a fraction of span size.
const CHAR_WIDTH_RATIO: f32 = 0.5;

const ASCENT_RATIO: f32 = 0.8;
const DESCENT_RATIO: f32 = 0.2;

/// A text fragment produced by one show operation, in PDF user space.
#[derive(Debug, Clone)]
struct TextSpan {
    text: String,
    /// Left edge
    x: f32,
    /// Baseline
    y: f32,
    width: f32,
    font_size: f32,
    /// Normalised font family name
    font_name: String,
}

impl TextSpan {
    fn new(text: String, x: f32, y: f32, font_size: f32, font_name: String) -> Self {
        let width = text.chars().count() as f32 * font_size * CHAR_WIDTH_RATIO;
        Self {
            text,
            x,
            y,
            width,
            font_size,
            font_name,
        }
    }

    fn right(&self) -> f32 {
        self.x + self.width
    }

    fn top(&self) -> f32 {
        self.y + self.font_size * ASCENT_RATIO
    }

    fn bottom(&self) -> f32 {
        self.y - self.font_size * DESCENT_RATIO
    }

    fn same_style(&self, other: &TextSpan) -> bool {
        self.font_name == other.font_name
            && FontSize::from_points(self.font_size) == FontSize::from_points(other.font_size)
    }
}

/// Turns the pages of a document into [`PageLayout`]s.
pub struct LayoutExtractor<'a, B: PdfBackend> {
    backend: &'a B,
    options: ExtractOptions,
}

impl<'a, B: PdfBackend> LayoutExtractor<'a, B> {
    /// Create an extractor over a loaded document.
    pub fn new(backend: &'a B, options: ExtractOptions) -> Self {
        Self { backend, options }
    }

    /// Extract every selected page, in page order.
    pub fn extract(&self) -> Result<Vec<PageLayout>> {
        let pages = self.backend.pages();
        self.check_selection(pages.len() as u32)?;

        let selected: Vec<(u32, PageId)> = pages
            .into_iter()
            .filter(|(number, _)| self.options.pages.includes(*number))
            .collect();

        log::debug!("Extracting {} pages", selected.len());

        let run = |&(number, id): &(u32, PageId)| self.extract_page_checked(number, id);
        let results: Vec<Result<PageLayout>> = if self.options.parallel {
            selected.par_iter().map(run).collect()
        } else {
            selected.iter().map(run).collect()
        };

        results.into_iter().collect()
    }

    /// Extract a single page by number.
    pub fn extract_page_number(&self, number: u32) -> Result<PageLayout> {
        let pages = self.backend.pages();
        let id = pages
            .get(&number)
            .ok_or(Error::PageOutOfRange(number, pages.len() as u32))?;
        self.extract_page(number, *id)
    }

    fn check_selection(&self, total: u32) -> Result<()> {
        let first = match &self.options.pages {
            PageSelection::All => return Ok(()),
            PageSelection::Range(range) => *range.start(),
            PageSelection::Pages(pages) => match pages.iter().max() {
                Some(max) => *max,
                None => return Ok(()),
            },
        };
        if first > total {
            return Err(Error::PageOutOfRange(first, total));
        }
        Ok(())
    }

    fn extract_page_checked(&self, number: u32, id: PageId) -> Result<PageLayout> {
        match self.extract_page(number, id) {
            Ok(layout) => Ok(layout),
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Skipping page {}: {}", number, e);
                let media = self.backend.media_box(id);
                Ok(PageLayout {
                    width: media.width(),
                    height: media.height(),
                    ..PageLayout::new(number)
                })
            }
            Err(e) => Err(e),
        }
    }

    fn extract_page(&self, number: u32, id: PageId) -> Result<PageLayout> {
        let media = self.backend.media_box(id);
        let fonts: HashMap<Vec<u8>, String> = self
            .backend
            .page_fonts(id)?
            .into_iter()
            .map(|f| (f.name, normalize_font_name(&f.base_font)))
            .collect();

        let content = self.backend.page_content(id)?;
        let ops = self.backend.decode_content(&content)?;
        let spans = self.interpret(id, &ops, &fonts);

        let lines = group_spans_into_lines(spans)
            .into_iter()
            .map(|spans| build_line(spans, &media))
            .collect::<Vec<_>>();

        log::trace!("page {}: {} lines", number, lines.len());

        Ok(PageLayout {
            number,
            width: media.width(),
            height: media.height(),
            lines,
        })
    }

    /// Run the text operators of a content stream.
    fn interpret(
        &self,
        page: PageId,
        ops: &[ContentOp],
        fonts: &HashMap<Vec<u8>, String>,
    ) -> Vec<TextSpan> {
        let mut spans = Vec::new();
        let mut font_resource: Vec<u8> = Vec::new();
        let mut font_name = String::new();
        let mut font_size: f32 = 12.0;
        let mut matrix = TextMatrix::default();
        let mut in_text_block = false;

        for op in ops {
            let num = |i: usize| op.operands.get(i).and_then(PdfValue::as_number);

            match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    matrix.reset();
                }
                "ET" => in_text_block = false,
                "Tf" => {
                    if let Some(PdfValue::Name(name)) = op.operands.first() {
                        font_resource = name.clone();
                        font_name = fonts.get(name).cloned().unwrap_or_else(|| {
                            normalize_font_name(&String::from_utf8_lossy(name))
                        });
                    }
                    font_size = num(1).map(f32::abs).unwrap_or(12.0);
                }
                "TL" => matrix.leading = num(0).unwrap_or(0.0),
                "Td" => matrix.translate(num(0).unwrap_or(0.0), num(1).unwrap_or(0.0)),
                "TD" => {
                    let ty = num(1).unwrap_or(0.0);
                    matrix.leading = -ty;
                    matrix.translate(num(0).unwrap_or(0.0), ty);
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        matrix.set(
                            num(0).unwrap_or(1.0),
                            num(1).unwrap_or(0.0),
                            num(2).unwrap_or(0.0),
                            num(3).unwrap_or(1.0),
                            num(4).unwrap_or(0.0),
                            num(5).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => matrix.next_line(),
                "Tj" | "TJ" | "'" | "\"" => {
                    if matches!(op.operator.as_str(), "'" | "\"") {
                        matrix.next_line();
                    }
                    if !in_text_block {
                        continue;
                    }

                    let text = match op.operator.as_str() {
                        "TJ" => match op.operands.first() {
                            Some(PdfValue::Array(items)) => {
                                self.decode_tj(page, &font_resource, items)
                            }
                            _ => String::new(),
                        },
                        operator => {
                            let index = if operator == "\"" { 2 } else { 0 };
                            match op.operands.get(index) {
                                Some(PdfValue::Str(bytes)) => {
                                    self.backend.decode_text(page, &font_resource, bytes)
                                }
                                _ => String::new(),
                            }
                        }
                    };

                    if !text.trim().is_empty() {
                        let (x, y) = matrix.position();
                        spans.push(TextSpan::new(
                            text,
                            x,
                            y,
                            font_size * matrix.vertical_scale(),
                            font_name.clone(),
                        ));
                    }
                }
                _ => {}
            }
        }

        spans
    }

    /// Decode a TJ array, turning wide negative adjustments into spaces.
    fn decode_tj(&self, page: PageId, font: &[u8], items: &[PdfValue]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                PdfValue::Str(bytes) => {
                    combined.push_str(&self.backend.decode_text(page, font, bytes));
                }
                other => {
                    let Some(n) = other.as_number() else { continue };
                    if -n > TJ_SPACE_THRESHOLD
                        && !combined.ends_with(' ')
                        && !combined.ends_with('\u{00A0}')
                    {
                        if let Some(last) = combined.chars().last() {
                            if !is_spaceless_script_char(last) {
                                combined.push(' ');
                            }
                        }
                    }
                }
            }
        }
        combined
    }
}

/// Group spans into lines by baseline, top to bottom, each sorted by X.
fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<Vec<TextSpan>> {
    // PDF Y grows upwards
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
    });

    let mut lines: Vec<Vec<TextSpan>> = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.font_size * BASELINE_TOLERANCE;
        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    for line in &mut lines {
        line.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
    }
    lines
}

/// Coalesce a line's spans into runs and flip to top-left coordinates.
fn build_line(spans: Vec<TextSpan>, media: &BoundingBox) -> Line {
    let mut groups: Vec<Vec<TextSpan>> = Vec::new();
    for span in spans {
        match groups.last_mut() {
            Some(group) if group[group.len() - 1].same_style(&span) => group.push(span),
            _ => groups.push(vec![span]),
        }
    }

    let runs = groups
        .into_iter()
        .map(|group| {
            let first = &group[0];
            let left = group.iter().map(|s| s.x).fold(f32::INFINITY, f32::min);
            let right = group.iter().map(TextSpan::right).fold(f32::NEG_INFINITY, f32::max);
            let top = group.iter().map(TextSpan::top).fold(f32::NEG_INFINITY, f32::max);
            let bottom = group.iter().map(TextSpan::bottom).fold(f32::INFINITY, f32::min);

            let bbox = BoundingBox::new(
                left - media.x0,
                media.y1 - top,
                right - media.x0,
                media.y1 - bottom,
            );
            TextRun::new(join_spans(&group), first.font_size, &first.font_name, bbox)
        })
        .collect();

    Line::from_runs(runs)
}

/// Join spans of one run, inserting a space where the horizontal gap reads
/// as a word break.
fn join_spans(spans: &[TextSpan]) -> String {
    let mut result = String::new();
    let mut prev: Option<&TextSpan> = None;

    for span in spans {
        if let Some(prev) = prev {
            let gap = span.x - prev.right();
            let threshold = span.font_size * CHAR_WIDTH_RATIO * 0.2;

            let boundary_is_spaceless = prev.text.chars().last().map_or(false, is_spaceless_script_char)
                && span.text.chars().next().map_or(false, is_spaceless_script_char);
            let has_space = prev.text.ends_with(char::is_whitespace)
                || span.text.starts_with(char::is_whitespace);

            if gap > threshold && !boundary_is_spaceless && !has_space {
                result.push(' ');
            }
        }
        result.push_str(&span.text);
        prev = Some(span);
    }

    result
}

/// Drop a subset tag such as `ABCDEF+` from a font name.
fn normalize_font_name(name: &str) -> String {
    match name.split_once('+') {
        Some((tag, family))
            if tag.len() == 6 && tag.chars().all(|c| c.is_ascii_uppercase()) =>
        {
            family.to_string()
        }
        _ => name.to_string(),
    }
}

/// Text matrix for tracking position in content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
    /// Set by TL and TD, persists across BT blocks
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            leading: 0.0,
        }
    }
}

impl TextMatrix {
    fn reset(&mut self) {
        *self = Self {
            leading: self.leading,
            ..Self::default()
        };
    }

    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        let leading = if self.leading != 0.0 { self.leading } else { 12.0 };
        self.translate(0.0, -leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and extensions
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}
