//! PDF text extraction and text normalization.

use crate::errors::AppError;

/// Extracts the text layer from PDF bytes and normalizes it.
///
/// Fails with `UnreadableDocument` when the bytes do not parse as a PDF, and
/// with `EmptyDocument` when parsing succeeds but no extractable text remains
/// (image-only scans). The bytes are not retained or logged.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, AppError> {
    // pdf-extract panics on some malformed files; treat that the same as a
    // parse error rather than taking down the worker.
    let parsed = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| AppError::UnreadableDocument("malformed PDF".to_string()))?
        .map_err(|e| AppError::UnreadableDocument(e.to_string()))?;

    let text = normalize_text(&parsed);
    if text.is_empty() {
        return Err(AppError::EmptyDocument(
            "document contains no extractable text".to_string(),
        ));
    }
    Ok(text)
}

/// Collapses raw extracted text to a single normalized line: control
/// characters and page breaks become whitespace, and every whitespace run
/// collapses to one space.
pub fn normalize_text(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One-page PDF fixture, assembled with correct xref offsets so it parses
/// cleanly. With `text`, the page carries a Helvetica content stream showing
/// it; without, the page has no content stream at all (an image-only scan as
/// far as text extraction is concerned).
#[cfg(test)]
pub(crate) fn pdf_fixture(text: Option<&str>) -> Vec<u8> {
    let mut objects = vec![
        "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_string(),
        "2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n".to_string(),
    ];
    match text {
        Some(t) => {
            objects.push(
                "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>\nendobj\n"
                    .to_string(),
            );
            let stream = format!("BT /F1 12 Tf 72 720 Td ({t}) Tj ET");
            objects.push(format!(
                "4 0 obj\n<< /Length {} >>\nstream\n{stream}\nendstream\nendobj\n",
                stream.len()
            ));
            objects.push(
                "5 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n"
                    .to_string(),
            );
        }
        None => {
            objects.push(
                "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << >> >>\nendobj\n"
                    .to_string(),
            );
        }
    }

    let mut buf: Vec<u8> = Vec::new();
    buf.extend_from_slice(b"%PDF-1.4\n");
    let mut offsets = Vec::new();
    for obj in &objects {
        offsets.push(buf.len());
        buf.extend_from_slice(obj.as_bytes());
    }
    let xref_pos = buf.len();
    buf.extend_from_slice(
        format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes(),
    );
    for off in offsets {
        buf.extend_from_slice(format!("{off:010} 00000 n \n").as_bytes());
    }
    buf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_pos}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace_runs() {
        assert_eq!(normalize_text("a  b\t\tc\n\nd"), "a b c d");
    }

    #[test]
    fn test_normalize_strips_control_characters() {
        assert_eq!(normalize_text("page one\x0cpage two\x00!"), "page one page two !");
    }

    #[test]
    fn test_normalize_trims_ends() {
        assert_eq!(normalize_text("  text  "), "text");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \n \t "), "");
    }

    #[test]
    fn test_pdf_without_text_layer_is_empty_document() {
        let err = extract_pdf_text(&pdf_fixture(None)).unwrap_err();
        assert!(matches!(err, AppError::EmptyDocument(_)));
    }

    #[test]
    fn test_pdf_text_layer_is_extracted_and_normalized() {
        let text = extract_pdf_text(&pdf_fixture(Some("Python Go Docker"))).unwrap();
        assert!(text.contains("Python"));
        assert!(text.contains("Go"));
        assert!(text.contains("Docker"));
        // Already normalized: no control characters, no doubled whitespace.
        assert!(!text.contains('\n'));
        assert!(!text.contains("  "));
    }

    #[test]
    fn test_garbage_bytes_are_unreadable() {
        let err = extract_pdf_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, AppError::UnreadableDocument(_)));
    }

    #[test]
    fn test_truncated_pdf_header_is_unreadable() {
        let err = extract_pdf_text(b"%PDF-1.7\n\x01\x02\x03").unwrap_err();
        assert!(matches!(err, AppError::UnreadableDocument(_)));
    }
}
