//! Word (.docx) text extraction
//!
//! A `.docx` file is a ZIP container whose main body lives in
//! `word/document.xml`. The XML is streamed with `quick-xml`: text runs
//! (`<w:t>`) accumulate into paragraphs terminated at each `</w:p>`, with
//! tabs and explicit line breaks mapped to `\t` and `\n`. The resulting
//! paragraph stream is grouped into fixed-size pages.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use crate::config::PagingConfig;
use crate::document::{DocumentError, DocumentResult, Page, SourceKind};
use crate::paginate;

/// Path of the main document body inside the container
const DOCUMENT_PART: &str = "word/document.xml";

/// Parse docx bytes into paragraph-grouped pages
pub fn parse(bytes: &[u8], paging: PagingConfig) -> DocumentResult<Vec<Page>> {
    let text = extract_raw_text(bytes)?;
    let paragraphs = paginate::split_paragraphs(&text);
    debug!(paragraphs = paragraphs.len(), "paginating Word document");
    Ok(paginate::by_paragraphs(
        &paragraphs,
        paging.paragraphs_per_page,
        paging.preview_len,
        SourceKind::Word,
    ))
}

/// Extract the document body as a plain-text blob, paragraphs separated by
/// blank lines
pub fn extract_raw_text(bytes: &[u8]) -> DocumentResult<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| {
            DocumentError::InvalidContent(format!("missing {DOCUMENT_PART} in container"))
        })?
        .read_to_string(&mut xml)?;

    body_text(&xml)
}

/// Walk the document XML and flatten it to text
fn body_text(xml: &str) -> DocumentResult<String> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = true,
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    if !current.trim().is_empty() {
                        paragraphs.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                }
                _ => {}
            },
            Event::Text(t) => {
                if in_text_run {
                    let unescaped = t
                        .unescape()
                        .map_err(|e| DocumentError::Parse(e.to_string()))?;
                    current.push_str(&unescaped);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if !current.trim().is_empty() {
        paragraphs.push(current);
    }

    Ok(paragraphs.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn docx_with_body(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>{body}</w:body>
</w:document>"#
        );
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file(DOCUMENT_PART, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    fn paragraph(text: &str) -> String {
        format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
    }

    #[test]
    fn extracts_paragraphs_from_body() {
        let body = format!("{}{}", paragraph("First paragraph."), paragraph("Second."));
        let bytes = docx_with_body(&body);
        let text = extract_raw_text(&bytes).unwrap();
        assert_eq!(text, "First paragraph.\n\nSecond.");
    }

    #[test]
    fn split_runs_merge_within_a_paragraph() {
        let body = "<w:p><w:r><w:t>Hel</w:t></w:r><w:r><w:t>lo</w:t></w:r></w:p>";
        let bytes = docx_with_body(body);
        assert_eq!(extract_raw_text(&bytes).unwrap(), "Hello");
    }

    #[test]
    fn tabs_and_breaks_become_whitespace() {
        let body = "<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>";
        let bytes = docx_with_body(body);
        assert_eq!(extract_raw_text(&bytes).unwrap(), "a\tb\nc");
    }

    #[test]
    fn entities_are_unescaped() {
        let body = paragraph("Tom &amp; Jerry &lt;3");
        let bytes = docx_with_body(&body);
        assert_eq!(extract_raw_text(&bytes).unwrap(), "Tom & Jerry <3");
    }

    #[test]
    fn twenty_five_paragraphs_paginate_as_12_12_1() {
        let body: String = (0..25)
            .map(|i| paragraph(&format!("Paragraph number {i}.")))
            .collect();
        let bytes = docx_with_body(&body);
        let pages = parse(&bytes, PagingConfig::default()).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].text.split("\n\n").count(), 12);
        assert_eq!(pages[2].text.split("\n\n").count(), 1);
        assert!(pages[0]
            .preview
            .as_deref()
            .unwrap()
            .starts_with("Paragraph number 0."));
    }

    #[test]
    fn empty_body_yields_zero_pages() {
        let bytes = docx_with_body("");
        let pages = parse(&bytes, PagingConfig::default()).unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn not_a_zip_is_invalid_content() {
        let result = parse(b"plain bytes", PagingConfig::default());
        assert!(matches!(result, Err(DocumentError::InvalidContent(_))));
    }
}
