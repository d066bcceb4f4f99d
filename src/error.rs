use thiserror::Error;

use crate::models::Category;
use crate::services::analysis::Tier;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Invalid pattern `{pattern}` in {category}/{tier}: {source}")]
    Pattern {
        category: Category,
        tier: Tier,
        pattern: String,
        source: regex::Error,
    },

    #[error("Pattern table must define every category exactly once (problem with {0})")]
    IncompleteTable(Category),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Input {path} is not valid UTF-8 text")]
    InvalidUtf8 { path: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Analysis task failed: {0}")]
    Task(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
