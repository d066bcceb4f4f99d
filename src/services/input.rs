// Document Input
// Reads plain-text documents from files or stdin

use std::fmt;
use std::path::PathBuf;

use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use crate::error::{AnalyzerError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// "-" selects stdin, anything else is a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }

    pub fn label(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Read the raw bytes of `source` and decode them as UTF-8. The text is returned
/// as written; callers normalize it before analysis.
pub async fn read_document(source: &InputSource) -> Result<String> {
    let label = source.label();
    let bytes = match source {
        InputSource::Stdin => {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .map_err(|source| AnalyzerError::Io { path: label.clone(), source })?;
            buf
        }
        InputSource::File(path) => tokio::fs::read(path)
            .await
            .map_err(|source| AnalyzerError::Io { path: label.clone(), source })?,
    };

    info!("[INPUT] Read {} bytes from {}", bytes.len(), label);
    decode_document(bytes, &label)
}

/// Decode UTF-8 input. Anything else is rejected rather than guessed at.
pub fn decode_document(bytes: Vec<u8>, label: &str) -> Result<String> {
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!(
                "[INPUT] Rejected {}: invalid UTF-8 at byte {}",
                label,
                e.utf8_error().valid_up_to()
            );
            Err(AnalyzerError::InvalidUtf8 { path: label.to_string() })
        }
    }
}
