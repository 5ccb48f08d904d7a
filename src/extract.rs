use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Extracts plain text from a source document.
///
/// `.pdf` files go through the PDF text layer; anything else is read as
/// UTF-8 text. A whitespace-only result is an error — there is nothing for
/// the pipeline to work with (typical for scanned or image-only PDFs).
///
/// # Errors
///
/// Returns [`Error::Extraction`] if the file cannot be read or has no text
/// layer, and [`Error::EmptyInput`] if extraction yields no usable text.
pub fn extract_text(path: &Path) -> Result<String> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    let text = if is_pdf {
        extract_pdf(path)?
    } else {
        fs::read_to_string(path).map_err(|e| Error::extraction(path, e.to_string()))?
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::empty_input(format!(
            "no text could be extracted from '{}'; the document may be scanned or image-based",
            path.display()
        )));
    }

    info!(
        "Extracted {} chars from {}",
        trimmed.len(),
        path.display()
    );

    Ok(trimmed.to_string())
}

fn extract_pdf(path: &Path) -> Result<String> {
    debug!("Extracting PDF text layer from {}", path.display());

    pdf_extract::extract_text(path).map_err(|e| Error::extraction(path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_extract_plain_text() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.txt");
        file.write_str("  Photosynthesis converts light into energy.  ")
            .unwrap();

        let text = extract_text(file.path()).unwrap();
        assert_eq!(text, "Photosynthesis converts light into energy.");
    }

    #[test]
    fn test_extract_missing_file() {
        let result = extract_text(Path::new("/nonexistent/doc.txt"));
        assert!(matches!(result, Err(Error::Extraction { .. })));
    }

    #[test]
    fn test_extract_whitespace_only_is_empty_input() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("blank.txt");
        file.write_str("   \n\n  \t ").unwrap();

        let result = extract_text(file.path());
        assert!(matches!(result, Err(Error::EmptyInput { .. })));
    }
}
