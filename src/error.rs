use std::fmt;

// Variants carry owned strings, not source errors: an outcome must be
// handed unchanged to every caller that joined the in-flight export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    AccessDenied,
    CaptureUnavailable,
    WriterUnavailable,
    CaptureFailed(String),
    InvalidLayout(String),
    Save(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::AccessDenied => write!(f, "export requested without entitlement"),
            ExportError::CaptureUnavailable => write!(f, "no raster capture collaborator available"),
            ExportError::WriterUnavailable => write!(f, "no document writer collaborator available"),
            ExportError::CaptureFailed(message) => {
                write!(f, "raster capture failed: {}", message)
            }
            ExportError::InvalidLayout(message) => write!(f, "invalid layout: {}", message),
            ExportError::Save(message) => write!(f, "saving document failed: {}", message),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        ExportError::Save(value.to_string())
    }
}
