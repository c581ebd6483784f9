//! Text Extractor: best-effort plain text from a stored upload.
//!
//! Never fails: problems become a diagnostic string in the returned text so
//! the rest of the pipeline keeps going.

use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

pub const NO_TEXT: &str = "No text extracted.";
pub const ERROR_PREFIX: &str = "Error reading file:";

const DOCX_BODY: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Pdf(String),

    #[error("{0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    #[error("{0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Extracts text from `path` according to its lowercase `extension`.
/// Unsupported extensions yield "No text extracted.".
pub fn extract_text(path: &Path, extension: &str) -> String {
    let result = match extension {
        "pdf" => extract_pdf(path),
        "docx" => extract_docx(path),
        "txt" => extract_txt(path),
        _ => return NO_TEXT.to_string(),
    };

    match result {
        Ok(text) if text.is_empty() => NO_TEXT.to_string(),
        Ok(text) => text,
        Err(e) => format!("{ERROR_PREFIX} {e}"),
    }
}

fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
    // pdf-extract panics on some malformed documents
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text(path)));
    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractError::Pdf(e.to_string())),
        Err(_) => Err(ExtractError::Pdf("PDF parser aborted on this document".to_string())),
    }
}

fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path)?;
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCX_BODY)?.read_to_string(&mut xml)?;
    docx_xml_to_text(&xml)
}

fn extract_txt(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8(bytes)?)
}

/// Collects `w:t` runs; paragraphs end with a newline, `w:tab` becomes a tab.
fn docx_xml_to_text(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_run_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_run_text => text.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text.trim_end().to_string())
}
