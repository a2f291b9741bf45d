use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Failed to load image '{source_name}': {message}")]
    ImageLoadError { source_name: String, message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Network error for '{url}': {message}")]
    NetworkError { url: String, message: String },

    #[error("Image decoding error for '{source_name}': {message}")]
    DecodingError { source_name: String, message: String },

    #[error("Image too large '{source_name}': {details}")]
    TooLarge { source_name: String, details: String },

    #[error("Invalid record '{path}': {message}")]
    InvalidRecord { path: PathBuf, message: String },

    #[error("Settings error: {message}")]
    SettingsError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ViewerError>;

impl ViewerError {
    /// Returns true if supplying the same source again might succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ViewerError::FileNotFound { .. }
                | ViewerError::NetworkError { .. }
                | ViewerError::IoError { .. }
        )
    }

    /// Returns a user-friendly error message with recovery suggestions
    pub fn user_message(&self) -> String {
        let base_message = self.to_string();
        let suggestion = match self {
            ViewerError::FileNotFound { .. } => "Check if the file exists and you have permission to access it.",
            ViewerError::NetworkError { .. } => "Check your connection or the asset base URL, then open the record again.",
            ViewerError::ImageLoadError { .. } | ViewerError::DecodingError { .. } => "The image may be corrupted or in an unsupported format.",
            ViewerError::TooLarge { .. } => "Use a smaller image or a preview rendition.",
            ViewerError::InvalidRecord { .. } | ViewerError::JsonError { .. } => "The record file does not match the expected image record layout.",
            ViewerError::SettingsError { .. } => "Delete the settings file to restore defaults.",
            ViewerError::IoError { .. } => "File system error occurred. Check disk space and permissions.",
        };

        format!("{}\n\n{}", base_message, suggestion)
    }

    /// Returns an error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ViewerError::ImageLoadError { .. } => "IMAGE_LOAD_ERROR",
            ViewerError::FileNotFound { .. } => "FILE_NOT_FOUND",
            ViewerError::NetworkError { .. } => "NETWORK_ERROR",
            ViewerError::DecodingError { .. } => "DECODING_ERROR",
            ViewerError::TooLarge { .. } => "TOO_LARGE",
            ViewerError::InvalidRecord { .. } => "INVALID_RECORD",
            ViewerError::SettingsError { .. } => "SETTINGS_ERROR",
            ViewerError::IoError { .. } => "IO_ERROR",
            ViewerError::JsonError { .. } => "JSON_ERROR",
        }
    }
}
