use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("invalid spreadsheet: {path} ({details})")]
    InvalidSheet { path: PathBuf, details: String },

    #[error("column \"{column}\" not found in {path} (available: {available})")]
    ColumnNotFound {
        path: PathBuf,
        column: String,
        available: String,
    },

    #[error("existing output {path} has no \"{column}\" column; delete it to start over")]
    OutputSchemaMismatch { path: PathBuf, column: String },

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid proxy URL \"{url}\": {details}")]
    InvalidProxy { url: String, details: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("failed to write spreadsheet: {path} ({details})")]
    SheetWrite { path: PathBuf, details: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::FileNotFound(_) => 1,
            Error::InvalidSheet { .. } => 2,
            Error::ColumnNotFound { .. } => 3,
            Error::OutputSchemaMismatch { .. } => 3,
            Error::UnsupportedFormat(_) => 3,
            Error::InvalidProxy { .. } => 3,
            Error::HttpClient(_) => 4,
            Error::SheetWrite { .. } => 4,
            Error::Csv(_) => 4,
            Error::Io(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
