use thiserror::Error;

use crate::ntriples::Rule;

#[derive(Error, Debug)]
pub enum MetastateError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Parse error: {message}")]
    Parse { message: String, line: Option<usize>, col: Option<usize> },
    #[error("Invalid term: {0}")]
    Term(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Ingestion queue closed")]
    QueueClosed,
}

pub type Result<T> = std::result::Result<T, MetastateError>;

// Helper conversions
impl From<config::ConfigError> for MetastateError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}

impl From<std::io::Error> for MetastateError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}

impl From<serde_json::Error> for MetastateError {
    fn from(e: serde_json::Error) -> Self { Self::Serialization(e.to_string()) }
}

impl From<pest::error::Error<Rule>> for MetastateError {
    fn from(e: pest::error::Error<Rule>) -> Self {
        let (line, col) = match e.line_col {
            pest::error::LineColLocation::Pos((l, c)) => (l, c),
            pest::error::LineColLocation::Span((l, c), _) => (l, c),
        };
        Self::Parse { message: e.variant.message().to_string(), line: Some(line), col: Some(col) }
    }
}
