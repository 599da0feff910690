use thiserror::Error;

/// Custom error types for clipstitch
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No regions to export; add at least one region")]
    NoRegions,

    #[error("Invalid region at index {index}: {detail}")]
    InvalidRegion { index: usize, detail: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("External dependency '{0}' not found in PATH")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("'{program}' exited with code {exit_code}\n{stderr}")]
    CommandFailed {
        program: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("Exporting segment {index} failed: {source}")]
    SegmentExport {
        index: usize,
        source: Box<CoreError>,
    },

    #[error("Concatenating segments failed: {0}")]
    Concat(#[source] Box<CoreError>),
}

/// Result type for clipstitch operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
