use thiserror::Error;

pub const MEDIA_TYPE_PDF: &str = "application/pdf";
pub const MEDIA_TYPE_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MEDIA_TYPE_TEXT: &str = "text/plain";
/// Declared for files whose extension is not recognized.
pub const MEDIA_TYPE_UNKNOWN: &str = "application/octet-stream";

/// Media types the backend accepts, matched exactly.
pub const ACCEPTED_MEDIA_TYPES: [&str; 3] = [MEDIA_TYPE_PDF, MEDIA_TYPE_DOCX, MEDIA_TYPE_TEXT];

pub const MIB: u64 = 1024 * 1024;
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 10;

/// Declared media type for a file name, decided by extension only.
pub fn media_type_for_file_name(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => MEDIA_TYPE_PDF,
        Some("docx") => MEDIA_TYPE_DOCX,
        Some("txt") => MEDIA_TYPE_TEXT,
        _ => MEDIA_TYPE_UNKNOWN,
    }
}

/// One document picked for submission.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl UploadRequest {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Builds a request whose media type is declared from the file extension.
    pub fn from_file_name(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let media_type = media_type_for_file_name(&file_name);
        Self::new(file_name, media_type, bytes)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

// File contents stay out of logs and test failure output.
impl std::fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadRequest")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("size", &self.size())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self::with_max_mb(DEFAULT_MAX_UPLOAD_MB)
    }
}

impl UploadLimits {
    pub fn with_max_mb(max_mb: u64) -> Self {
        Self {
            max_bytes: max_mb.saturating_mul(MIB),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a valid file type (PDF, DOCX, or TXT)")]
    UnsupportedType { media_type: String },
    #[error("File size exceeds {} limit", mb_label(.max_bytes))]
    TooLarge { size: u64, max_bytes: u64 },
}

fn mb_label(bytes: &u64) -> String {
    if bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{:.1}MB", *bytes as f64 / MIB as f64)
    }
}

/// Checks a request against the accepted types and the size limit.
///
/// The type is checked first, so an oversized image reports the type error.
pub fn validate(request: &UploadRequest, limits: &UploadLimits) -> Result<(), ValidationError> {
    if !ACCEPTED_MEDIA_TYPES.contains(&request.media_type.as_str()) {
        return Err(ValidationError::UnsupportedType {
            media_type: request.media_type.clone(),
        });
    }
    if request.size() > limits.max_bytes {
        return Err(ValidationError::TooLarge {
            size: request.size(),
            max_bytes: limits.max_bytes,
        });
    }
    Ok(())
}
