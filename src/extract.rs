//! Plain-text extraction from uploaded document bytes.

use async_trait::async_trait;

use crate::error::{RagError, Result};

/// Turns uploaded file bytes into plain text.
///
/// An external capability consumed by the ingestion pipeline. Unrecognized
/// mime types fail with [`RagError::UnsupportedFormat`]; extraction
/// failures propagate and no partial text is used.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract plain text from `bytes` of the given mime type.
    async fn extract(&self, bytes: &[u8], mime_type: &str) -> Result<String>;
}

/// The built-in extractor.
///
/// Handles plain text and markdown unconditionally, PDF with the `pdf`
/// feature, and DOCX with the `docx` feature. Everything else is an
/// unsupported format.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardExtractor;

impl StandardExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for StandardExtractor {
    async fn extract(&self, bytes: &[u8], mime_type: &str) -> Result<String> {
        let mime = mime_type.to_ascii_lowercase();

        if mime.starts_with("text/") {
            return Ok(String::from_utf8_lossy(bytes).into_owned());
        }

        #[cfg(feature = "pdf")]
        if mime.contains("pdf") {
            return extract_pdf(bytes);
        }

        #[cfg(feature = "docx")]
        if mime.contains("officedocument.wordprocessingml") || mime.contains("msword") {
            return extract_docx(bytes);
        }

        Err(RagError::UnsupportedFormat { mime_type: mime_type.to_string() })
    }
}

#[cfg(feature = "pdf")]
fn extract_pdf(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| RagError::Extraction(format!("failed to extract PDF text: {e}")))
}

/// Extract paragraph text from the `word/document.xml` entry of a DOCX
/// archive by walking its `<w:t>` elements.
#[cfg(feature = "docx")]
fn extract_docx(bytes: &[u8]) -> Result<String> {
    use std::io::Read;

    let cursor = std::io::Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| RagError::Extraction(format!("failed to read DOCX as ZIP: {e}")))?;

    let mut doc_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| RagError::Extraction("invalid DOCX: missing word/document.xml".to_string()))?
        .read_to_string(&mut doc_xml)
        .map_err(|e| RagError::Extraction(format!("failed to read document.xml: {e}")))?;

    let mut reader = quick_xml::Reader::from_str(&doc_xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut paragraph = String::new();
    let mut in_text_element = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(ref e)) => {
                let local_name = e.local_name();
                match local_name.as_ref() {
                    b"p" => paragraph.clear(),
                    b"t" => in_text_element = true,
                    _ => {}
                }
            }
            Ok(quick_xml::events::Event::End(ref e)) => {
                let local_name = e.local_name();
                match local_name.as_ref() {
                    b"p" => {
                        if !paragraph.is_empty() {
                            paragraphs.push(std::mem::take(&mut paragraph));
                        }
                    }
                    b"t" => in_text_element = false,
                    _ => {}
                }
            }
            Ok(quick_xml::events::Event::Text(ref e)) => {
                if in_text_element {
                    if let Ok(text) = e.unescape() {
                        paragraph.push_str(&text);
                    }
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => {
                return Err(RagError::Extraction(format!("DOCX XML parse error: {e}")));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn plain_text_passes_through() {
        let extractor = StandardExtractor::new();
        let text = extractor.extract(b"hello world", "text/plain").await.unwrap();
        assert_eq!(text, "hello world");
    }

    #[tokio::test]
    async fn markdown_is_treated_as_text() {
        let extractor = StandardExtractor::new();
        let text = extractor.extract(b"# Title", "text/markdown").await.unwrap();
        assert_eq!(text, "# Title");
    }

    #[tokio::test]
    async fn unknown_mime_is_rejected() {
        let extractor = StandardExtractor::new();
        let err = extractor.extract(b"\x89PNG", "image/png").await.unwrap_err();
        assert!(matches!(err, RagError::UnsupportedFormat { .. }));
    }

    #[cfg(feature = "pdf")]
    #[tokio::test]
    async fn corrupt_pdf_is_an_extraction_error() {
        let extractor = StandardExtractor::new();
        let err = extractor.extract(b"not a pdf", "application/pdf").await.unwrap_err();
        assert!(matches!(err, RagError::Extraction(_)));
    }

    #[cfg(feature = "docx")]
    #[tokio::test]
    async fn corrupt_docx_is_an_extraction_error() {
        let extractor = StandardExtractor::new();
        let mime = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
        let err = extractor.extract(b"not a zip archive", mime).await.unwrap_err();
        assert!(matches!(err, RagError::Extraction(_)));
    }
}
