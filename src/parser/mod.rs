//! PDF parsing module: from bytes to page layouts.

mod backend;
mod layout;
mod options;

pub use backend::{
    decode_text_simple, has_pdf_header, BackendFontInfo, ContentOp, LopdfBackend, PageId,
    PdfBackend, PdfValue,
};
pub use layout::LayoutExtractor;
pub use options::{ErrorMode, ExtractOptions, PageSelection};
