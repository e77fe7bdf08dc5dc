use bytes::Bytes;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Document formats the matching service can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Matches the declared MIME type exactly; anything else is not a resume.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            PDF_MIME => Some(DocumentKind::Pdf),
            DOCX_MIME => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            DocumentKind::Pdf => PDF_MIME,
            DocumentKind::Docx => DOCX_MIME,
        }
    }
}

/// A file the user picked or dropped, as received from the browser.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub name: String,
    /// Declared by the browser; empty when none was sent.
    pub content_type: String,
    pub data: Bytes,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_mime(&self.content_type)
    }
}

/// Keeps PDF and DOCX files in their original order and silently drops the rest.
pub fn accepted_resumes(files: Vec<ResumeFile>) -> Vec<ResumeFile> {
    files.into_iter().filter(|f| f.kind().is_some()).collect()
}
