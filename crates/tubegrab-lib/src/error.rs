use std::path::PathBuf;
use thiserror::Error;

/// Exit status for a run where a media kind failed or input could not be read.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status for a run with nothing to download.
pub const EXIT_NO_URLS: u8 = 2;

#[derive(Error, Debug)]
pub enum TubeGrabError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Link file not found: {path}")]
    LinkFileNotFound { path: PathBuf },

    #[error("Failed to read link file {path}: {reason}")]
    LinkFileRead { path: PathBuf, reason: String },

    #[error(
        "No links given. Use -f path/to/links.txt or pass URL(s) on the command line."
    )]
    NoUrls,

    #[error("Failed to create output directory {path}: {reason}")]
    OutputDirectoryCreation { path: PathBuf, reason: String },

    #[error("Failed to start {tool}: {reason}")]
    ToolSpawn { tool: String, reason: String },

    #[error("yt-dlp auto-update error: {reason}")]
    Update { reason: String },

    #[error("Invalid command line argument: {details}")]
    CliArgumentValidation { details: String },

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}

impl TubeGrabError {
    /// Process exit status the binary reports for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            TubeGrabError::NoUrls => EXIT_NO_URLS,
            _ => EXIT_FAILURE,
        }
    }

    /// Whether usage help should accompany the error message.
    pub fn wants_usage(&self) -> bool {
        matches!(self, TubeGrabError::NoUrls)
    }
}
