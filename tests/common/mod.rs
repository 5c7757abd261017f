//! In-memory PDF fixtures built with lopdf.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

pub const BODY_TEXT: &str =
    "the committee reviewed every proposal received during the open call period";

/// One text show: font resource, size, x, baseline y, text.
pub type Show = (&'static str, i64, i64, i64, &'static str);

fn show_ops(ops: &mut Vec<Operation>, (font, size, x, y, text): Show) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    ops.push(Operation::new("ET", vec![]));
}

/// Body paragraph shows at 10pt, 14pt apart, going down from `y`.
pub fn body(y: i64, count: i64) -> Vec<Show> {
    (0..count).map(|i| ("F1", 10, 72, y - i * 14, BODY_TEXT)).collect()
}

/// Build a PDF with one page per entry. `F1` is a regular face and `F2` a
/// subset-tagged bold face; the page size is inherited from the page tree.
pub fn build_pdf(pages: &[Vec<Show>], extra_ops: &[Vec<Operation>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "ABCDEF+Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids = Vec::new();
    for (i, shows) in pages.iter().enumerate() {
        let mut operations = Vec::new();
        for show in shows {
            show_ops(&mut operations, *show);
        }
        if let Some(extra) = extra_ops.get(i) {
            operations.extend(extra.iter().cloned());
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A two-page report: title and one heading on page 1, a smaller heading
/// on page 2.
pub fn report_pdf() -> Vec<u8> {
    let mut page1 = vec![
        ("F2", 24, 72, 790, "Quarterly Review"),
        ("F2", 16, 72, 750, "Highlights"),
    ];
    page1.extend(body(720, 3));

    let mut page2 = vec![("F2", 14, 72, 790, "Outlook")];
    page2.extend(body(760, 3));

    build_pdf(&[page1, page2], &[])
}
