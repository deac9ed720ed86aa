//! PDF page extraction
//!
//! Builds one `Page` per source-document page. Only the string content of
//! the extractor output is consumed: each page's text tokens are re-joined
//! with single spaces, discarding the extractor's layout line breaks.

use lopdf::Document as PdfDocument;
use tracing::debug;

use crate::document::{DocumentError, DocumentResult, Page, SourceKind};

/// Parse PDF bytes into one page per source page
pub fn parse(bytes: &[u8]) -> DocumentResult<Vec<Page>> {
    let doc = PdfDocument::load_mem(bytes)?;

    if doc.is_encrypted() {
        return Err(DocumentError::Parse("document is encrypted".to_string()));
    }

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    debug!(pages = page_numbers.len(), "extracting PDF text");

    let mut pages = Vec::with_capacity(page_numbers.len());
    for (i, page_number) in page_numbers.iter().enumerate() {
        let raw = doc.extract_text(&[*page_number])?;
        pages.push(Page {
            number: i + 1,
            text: join_tokens(&raw),
            preview: None,
            kind: SourceKind::Pdf,
        });
    }

    Ok(pages)
}

/// Re-join extracted text tokens with single spaces
fn join_tokens(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for token in raw.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    fn sample_pdf(text: &str) -> Vec<u8> {
        let mut doc = PdfDocument::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("serialize pdf");
        bytes
    }

    #[test]
    fn join_tokens_collapses_whitespace() {
        assert_eq!(join_tokens("Hello \n  world\ttoday"), "Hello world today");
        assert_eq!(join_tokens(""), "");
        assert_eq!(join_tokens("   "), "");
    }

    #[test]
    fn parses_one_page_per_source_page() {
        let bytes = sample_pdf("Hello world.");
        let pages = parse(&bytes).expect("parse sample pdf");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[0].kind, SourceKind::Pdf);
        assert!(pages[0].text.contains("Hello world."));
    }

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        let result = parse(b"not a pdf at all");
        assert!(matches!(result, Err(DocumentError::Parse(_))));
    }
}
