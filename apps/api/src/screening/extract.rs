//! Document extraction — converts an uploaded resume into raw text,
//! dispatched on the declared file extension.

use std::path::Path;

use crate::errors::AppError;

/// Extracts raw text from an uploaded document.
///
/// - `.txt` decodes the bytes as UTF-8, replacing undecodable sequences.
/// - `.pdf` extracts page text in page order.
/// - `.doc`/`.docx` concatenates paragraph texts joined by newlines.
/// - Anything else fails with `UnsupportedFormat` before any processing.
///
/// A corrupt document of a recognized extension fails with `Extraction`
/// carrying the underlying cause.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, AppError> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "txt" => Ok(String::from_utf8_lossy(bytes).into_owned()),
        "pdf" => extract_pdf(bytes),
        "doc" | "docx" => extract_docx(bytes),
        other => Err(AppError::UnsupportedFormat(other.to_string())),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(anyhow::anyhow!("unreadable PDF: {e}")))
}

fn extract_docx(bytes: &[u8]) -> Result<String, AppError> {
    let doc = docx_rs::read_docx(bytes)
        .map_err(|e| AppError::Extraction(anyhow::anyhow!("unreadable DOCX: {e}")))?;

    let mut paragraphs = Vec::new();
    for child in doc.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(text) = child {
                            line.push_str(&text.text);
                        }
                    }
                }
            }
            paragraphs.push(line);
        }
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_extraction_returns_content() {
        let text = extract_text("resume.txt", b"Experienced backend engineer.").unwrap();
        assert_eq!(text, "Experienced backend engineer.");
    }

    #[test]
    fn test_txt_extension_is_case_insensitive() {
        let text = extract_text("RESUME.TXT", b"hello").unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn test_txt_replaces_undecodable_bytes_instead_of_failing() {
        let text = extract_text("resume.txt", &[b'o', b'k', 0xff, 0xfe]).unwrap();
        assert!(text.starts_with("ok"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_empty_txt_yields_empty_text() {
        let text = extract_text("resume.txt", b"").unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = extract_text("resume.rtf", b"{\\rtf1}").unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(ref ext) if ext == "rtf"));
    }

    #[test]
    fn test_missing_extension_is_rejected() {
        let err = extract_text("resume", b"plain text").unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_corrupt_pdf_is_an_extraction_error() {
        let err = extract_text("resume.pdf", b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_corrupt_docx_is_an_extraction_error() {
        let err = extract_text("resume.docx", b"definitely not a zip archive").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
