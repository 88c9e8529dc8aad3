use thiserror::Error;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed contact in {path:?} at line {line}: {message}")]
    ContactParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Malformed matrix row at line {line}: {message}")]
    MatrixParse {
        line: usize,
        message: String,
    },

    #[error("Malformed cluster record at line {line}: {message}")]
    ClusterParse {
        line: usize,
        message: String,
    },

    #[error("Structure {0} is not in the name list")]
    UnknownStructure(usize),

    #[error("Contact generation error: {0}")]
    Contacts(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

// Type alias for Result
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error conversions
impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn contacts<S: Into<String>>(msg: S) -> Self {
        Error::Contacts(msg.into())
    }

    pub fn matrix_parse<S: Into<String>>(line: usize, msg: S) -> Self {
        Error::MatrixParse { line, message: msg.into() }
    }

    pub fn cluster_parse<S: Into<String>>(line: usize, msg: S) -> Self {
        Error::ClusterParse { line, message: msg.into() }
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Error::ThreadPool(format!("Thread pool build failed: {}", err))
    }
}
