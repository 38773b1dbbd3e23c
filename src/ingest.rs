use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Please upload a .txt, .md, or .pdf file.")]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to read the file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse the PDF file {path}: PDF text extraction is not available")]
    PdfUnsupported { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Pdf,
}

impl DocumentKind {
    /// Decide by file extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" | "md" | "markdown" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Extract the text of an uploaded document.
pub fn extract_text(path: &Path) -> Result<String, IngestError> {
    let kind = DocumentKind::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    match kind {
        DocumentKind::Text => fs::read_to_string(path).map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        }),
        DocumentKind::Pdf => Err(IngestError::PdfUnsupported {
            path: path.to_path_buf(),
        }),
    }
}
