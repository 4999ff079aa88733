//! `.docx` text extraction.
//!
//! A `.docx` file is a zip archive of WordprocessingML parts. Text is read from
//! headers, the main document, then footers. Within a part, `<w:t>` runs are
//! emitted as-is, `<w:tab/>` becomes a tab, `<w:br/>` and `<w:cr/>` a newline,
//! and every closed paragraph ends with a blank line.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::extraction::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";
const HEADER_PREFIX: &str = "word/header";
const FOOTER_PREFIX: &str = "word/footer";

pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let names: Vec<String> = archive.file_names().map(str::to_owned).collect();

    if !names.iter().any(|n| n == DOCUMENT_PART) {
        return Err(ExtractionError::MissingPart(DOCUMENT_PART));
    }

    let mut parts = parts_with_prefix(&names, HEADER_PREFIX);
    parts.push(DOCUMENT_PART);
    parts.extend(parts_with_prefix(&names, FOOTER_PREFIX));

    let mut text = String::new();
    for name in parts {
        let mut xml = String::new();
        archive.by_name(name)?.read_to_string(&mut xml)?;
        text.push_str(&part_text(&xml)?);
    }
    Ok(text)
}

/// Sorted names of `word/<prefix>N.xml` parts.
fn parts_with_prefix<'a>(names: &'a [String], prefix: &str) -> Vec<&'a str> {
    let mut parts: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|n| n.starts_with(prefix) && n.ends_with(".xml"))
        .collect();
    parts.sort_unstable();
    parts
}

/// Plain text of a single WordprocessingML part.
pub fn part_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = true,
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push_str("\n\n"),
                _ => {}
            },
            Event::Text(t) if in_run_text => text.push_str(&t.unescape()?),
            Event::CData(t) if in_run_text => text.push_str(&String::from_utf8_lossy(&t)),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(text)
}

/// Builds a minimal `.docx` archive with one paragraph per entry.
#[cfg(test)]
pub(crate) fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!(r#"<w:p><w:r><w:t xml:space="preserve">{p}</w:t></w:r></w:p>"#))
        .collect();
    build_archive(&[(DOCUMENT_PART, &wrap_document(&body))])
}

#[cfg(test)]
fn wrap_document(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    )
}

#[cfg(test)]
fn build_archive(parts: &[(&str, &str)]) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in parts {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
