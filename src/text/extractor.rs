//! Text extraction from paged documents.

use std::path::{Path, PathBuf};

use lopdf::Document;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while pulling text out of a source document.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to open document {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("failed to extract text from page {page}: {source}")]
    Page {
        page: u32,
        #[source]
        source: lopdf::Error,
    },
}

/// A source of page texts.
///
/// Implementations return one string per page, in page order.
pub trait DocumentReader {
    fn read_pages(&self, path: &Path) -> Result<Vec<String>, ExtractionError>;
}

/// PDF reader backed by lopdf.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfReader;

impl DocumentReader for PdfReader {
    fn read_pages(&self, path: &Path) -> Result<Vec<String>, ExtractionError> {
        let doc = Document::load(path).map_err(|source| ExtractionError::Open { path: path.to_path_buf(), source })?;

        // get_pages() is keyed by 1-based page number, so iteration is already in page order
        let pages = doc.get_pages();
        debug!("Document has {} pages", pages.len());

        let mut texts = Vec::with_capacity(pages.len());
        for &page in pages.keys() {
            let text = doc.extract_text(&[page]).map_err(|source| ExtractionError::Page { page, source })?;
            texts.push(text);
        }

        Ok(texts)
    }
}

/// Extract the full text of a document, joining pages with a single newline.
///
/// Any page failure aborts the whole extraction.
///
/// # Errors
/// Returns [`ExtractionError::NotFound`] if `path` does not exist, or the
/// reader's error if the document cannot be opened or a page cannot be read.
pub fn extract(reader: &impl DocumentReader, path: &Path) -> Result<String, ExtractionError> {
    if !path.exists() {
        return Err(ExtractionError::NotFound(path.to_path_buf()));
    }

    let pages = reader.read_pages(path)?;
    info!("📄 Extracted text from {} pages", pages.len());

    Ok(pages.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    struct StubReader(Vec<&'static str>);

    impl DocumentReader for StubReader {
        fn read_pages(&self, _path: &Path) -> Result<Vec<String>, ExtractionError> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    /// Build a minimal PDF with one line of Courier text per page.
    fn write_pdf(path: &Path, pages: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_extract_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.pdf");
        let err = extract(&PdfReader, &path).unwrap_err();
        assert!(matches!(err, ExtractionError::NotFound(_)));
    }

    #[test]
    fn test_extract_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();
        let err = extract(&PdfReader, &path).unwrap_err();
        assert!(matches!(err, ExtractionError::Open { .. }));
    }

    #[test]
    fn test_extract_joins_pages_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"").unwrap();

        let reader = StubReader(vec!["Hello.\n\nWorld.\n", "Again."]);
        let text = extract(&reader, &path).unwrap();
        assert_eq!(text, "Hello.\n\nWorld.\n\nAgain.");
    }

    #[test]
    fn test_pdf_reader_keeps_page_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two_pages.pdf");
        write_pdf(&path, &["First page", "Second page"]);

        let pages = PdfReader.read_pages(&path).unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains("First"), "page 1 was {:?}", pages[0]);
        assert!(pages[1].contains("Second"), "page 2 was {:?}", pages[1]);

        let text = extract(&PdfReader, &path).unwrap();
        let first = text.find("First").unwrap();
        let second = text.find("Second").unwrap();
        assert!(first < second);
    }
}
