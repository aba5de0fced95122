use std::fs;
use std::path::Path;

use crate::errors::ContentError;

/// The document formats a student may upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
    Presentation,
}

impl DocumentKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "doc" | "docx" => Some(DocumentKind::Word),
            "ppt" | "pptx" => Some(DocumentKind::Presentation),
            _ => None,
        }
    }

    pub fn allowed_mime_types(self) -> &'static [&'static str] {
        match self {
            DocumentKind::Pdf => &["application/pdf"],
            DocumentKind::Word => &[
                "application/msword",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ],
            DocumentKind::Presentation => &[
                "application/vnd.ms-powerpoint",
                "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            ],
        }
    }

    /// Anything smaller is treated as empty or corrupted.
    pub fn min_size(self) -> u64 {
        match self {
            DocumentKind::Word => 100,
            DocumentKind::Pdf | DocumentKind::Presentation => 1000,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Word => "Word Document",
            DocumentKind::Presentation => "PowerPoint Presentation",
        }
    }
}

/// MIME type implied by a file extension.
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        "ppt" => Some("application/vnd.ms-powerpoint"),
        "pptx" => {
            Some("application/vnd.openxmlformats-officedocument.presentationml.presentation")
        }
        _ => None,
    }
}

/// A file the student picked, with only the metadata the generator looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub kind: DocumentKind,
    /// Best-effort text; only Word files are read this way.
    pub text: Option<String>,
}

impl UploadedDocument {
    /// Check type and size without touching the file system.
    pub fn describe(name: &str, mime: &str, size: u64) -> Result<Self, ContentError> {
        let kind = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(DocumentKind::from_extension)
            .ok_or_else(|| ContentError::UnsupportedType(name.to_string()))?;

        if !kind.allowed_mime_types().contains(&mime) {
            return Err(ContentError::UnsupportedType(name.to_string()));
        }
        if size < kind.min_size() {
            return Err(ContentError::TooSmall {
                name: name.to_string(),
                size,
            });
        }

        Ok(Self {
            name: name.to_string(),
            mime: mime.to_string(),
            size,
            kind,
            text: None,
        })
    }

    /// Inspect a file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(mime_for_extension)
            .ok_or_else(|| ContentError::UnsupportedType(name.clone()))?;

        let size = fs::metadata(path)?.len();
        let mut doc = Self::describe(&name, mime, size)?;

        if doc.kind == DocumentKind::Word {
            let bytes = fs::read(path)?;
            doc.text = Some(String::from_utf8_lossy(&bytes).into_owned());
        }

        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_describe_accepts_valid_pdf() {
        let doc = UploadedDocument::describe("CPU Notes.pdf", "application/pdf", 4096).unwrap();
        assert_eq!(doc.kind, DocumentKind::Pdf);
        assert!(doc.text.is_none());
    }

    #[test]
    fn test_describe_rejects_wrong_mime() {
        let err = UploadedDocument::describe("notes.pdf", "text/plain", 4096).unwrap_err();
        assert!(matches!(err, ContentError::UnsupportedType(_)));
    }

    #[test]
    fn test_size_thresholds_differ_per_kind() {
        assert!(matches!(
            UploadedDocument::describe("a.pdf", "application/pdf", 999),
            Err(ContentError::TooSmall { .. })
        ));
        assert!(UploadedDocument::describe("a.doc", "application/msword", 100).is_ok());
        assert!(matches!(
            UploadedDocument::describe("a.ppt", "application/vnd.ms-powerpoint", 500),
            Err(ContentError::TooSmall { .. })
        ));
    }

    #[test]
    fn test_from_path_reads_word_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("networking.doc");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "{}", "routers switches ".repeat(20)).unwrap();
        drop(file);

        let doc = UploadedDocument::from_path(&path).unwrap();
        assert_eq!(doc.name, "networking.doc");
        assert_eq!(doc.kind, DocumentKind::Word);
        assert!(doc.text.unwrap().contains("routers"));
    }

    #[test]
    fn test_mime_only_for_accepted_extensions() {
        assert_eq!(mime_for_extension("PDF"), Some("application/pdf"));
        assert_eq!(mime_for_extension("txt"), None);
        assert!(DocumentKind::from_extension("txt").is_none());
    }

    #[test]
    fn test_from_path_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.odt");
        fs::write(&path, [0u8; 2048]).unwrap();
        assert!(matches!(
            UploadedDocument::from_path(&path),
            Err(ContentError::UnsupportedType(_))
        ));
    }
}
