use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshIoError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Line {line} exceeds the maximum length of {max} bytes")]
    LineTooLong { line: usize, max: usize },
    #[error("Line {line}: expected `{expected}`, found `{found}`")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },
    #[error("Line {line}: `{token}` is not a valid number")]
    InvalidFloat { line: usize, token: String },
    #[error("Unexpected end of file: {0}")]
    UnexpectedEndOfFile(String),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type StatusResult<T> = Result<T, MeshIoError>;

pub type Status = StatusResult<()>;

impl From<std::io::Error> for MeshIoError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => MeshIoError::NotFound(err.to_string()),
            std::io::ErrorKind::UnexpectedEof => MeshIoError::UnexpectedEndOfFile(err.to_string()),
            _ => MeshIoError::IoError(err.to_string()),
        }
    }
}
