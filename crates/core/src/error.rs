#[derive(Debug, thiserror::Error)]
pub enum PagesError {
    #[error("Missing file path.")]
    MissingPath,
    #[error("Invalid file path: {0}")]
    InvalidPath(String),
    #[error("Only {0} files are allowed.")]
    InvalidFileType(String),
    #[error("Missing filename.")]
    MissingFilename,
    #[error("File too large (limit {limit} bytes).")]
    TooLarge { limit: u64 },
    #[error("File not found.")]
    NotFound,

    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to create pages root: {0}")]
    RootCreation(std::io::Error),
    #[error("failed to create directory: {0}")]
    DirCreation(std::io::Error),
    #[error("failed to canonicalise path: {0}")]
    Canonicalise(std::io::Error),
    #[error("failed to read file metadata: {0}")]
    Metadata(std::io::Error),
    #[error("failed to read file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to delete file: {0}")]
    FileDelete(std::io::Error),
    #[error("file is not valid UTF-8: {0}")]
    InvalidUtf8(std::string::FromUtf8Error),
}

impl PagesError {
    /// Machine-readable kind of this error, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            PagesError::MissingPath => "missing_path",
            PagesError::InvalidPath(_) => "invalid_path",
            PagesError::InvalidFileType(_) => "invalid_file_type",
            PagesError::MissingFilename => "missing_filename",
            PagesError::TooLarge { .. } => "too_large",
            PagesError::NotFound => "not_found",
            _ => "internal",
        }
    }

    /// Whether this error is a rejection of the caller's request rather than a failure of the
    /// underlying filesystem.
    pub fn is_rejection(&self) -> bool {
        self.code() != "internal"
    }
}

pub type PagesResult<T> = std::result::Result<T, PagesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_codes_are_distinct() {
        let errors = [
            PagesError::MissingPath,
            PagesError::InvalidPath("x".into()),
            PagesError::InvalidFileType(".html".into()),
            PagesError::MissingFilename,
            PagesError::TooLarge { limit: 1 },
            PagesError::NotFound,
        ];
        let mut codes: Vec<_> = errors.iter().map(PagesError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(errors.iter().all(PagesError::is_rejection));
    }

    #[test]
    fn io_failures_are_internal() {
        let err = PagesError::FileWrite(std::io::Error::other("disk full"));
        assert_eq!(err.code(), "internal");
        assert!(!err.is_rejection());
    }

    #[test]
    fn invalid_file_type_message_lists_extensions() {
        let err = PagesError::InvalidFileType(crate::FileKind::Page.allowed_description());
        assert_eq!(err.to_string(), "Only .html, .css, .js files are allowed.");
    }
}
