use ns_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: unknown keyword {keyword:?}")]
    UnknownKeyword { line: usize, keyword: String },

    #[error("line {line}: missing parameter `{key}`")]
    MissingParameter { line: usize, key: &'static str },

    #[error("line {line}: invalid value {value:?} for `{key}`")]
    InvalidValue { line: usize, key: &'static str, value: String },

    #[error("line {line}: invalid node reference {value:?} for `{key}`")]
    InvalidNodeRef { line: usize, key: &'static str, value: String },

    #[error("line {line}: {source}")]
    Network {
        line:   usize,
        #[source]
        source: NetworkError,
    },
}

impl FormatError {
    /// 1-based line the error was detected on, if it came from parsing.
    pub fn line(&self) -> Option<usize> {
        match self {
            FormatError::Io(_) => None,
            FormatError::UnknownKeyword { line, .. }
            | FormatError::MissingParameter { line, .. }
            | FormatError::InvalidValue { line, .. }
            | FormatError::InvalidNodeRef { line, .. }
            | FormatError::Network { line, .. } => Some(*line),
        }
    }
}

pub type FormatResult<T> = Result<T, FormatError>;
