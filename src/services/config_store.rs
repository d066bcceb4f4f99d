// Configuration Storage Service
// Handles config file read/write and version backup

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AnalyzerError, Result};
use crate::services::text_processor::{DEFAULT_LONG_SENTENCE_WORDS, DEFAULT_TOP_TERMS};

const CONFIG_VERSION: &str = "1";
const MAX_BACKUPS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            analysis: AnalysisConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Evaluate categories on the rayon pool.
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    #[serde(default = "default_top_terms")]
    pub top_terms: usize,
    #[serde(default = "default_long_sentence_words")]
    pub long_sentence_words: f64,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_terms: DEFAULT_TOP_TERMS,
            long_sentence_words: DEFAULT_LONG_SENTENCE_WORDS,
            format: OutputFormat::default(),
        }
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" => Ok(OutputFormat::Text),
            other => Err(AnalyzerError::Config(format!("Unknown output format: {}", other))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Text => f.write_str("text"),
        }
    }
}

fn default_version() -> String { CONFIG_VERSION.to_string() }
fn default_true() -> bool { true }
fn default_top_terms() -> usize { DEFAULT_TOP_TERMS }
fn default_long_sentence_words() -> f64 { DEFAULT_LONG_SENTENCE_WORDS }

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tos-analyzer"))
    }

    /// Store rooted at the platform config directory.
    pub fn open_default() -> Result<Self> {
        Self::default_config_dir()
            .map(Self::new)
            .ok_or_else(|| AnalyzerError::Config("No platform config directory available".to_string()))
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.config_dir).map_err(|e| io_error(&self.config_dir, e))
    }

    /// Load configuration from file; a missing file yields the defaults
    pub fn load(&self) -> Result<AppConfig> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file).map_err(|e| io_error(&self.config_file, e))?;

        serde_json::from_str(&content)
            .map_err(|e| AnalyzerError::Config(format!("Failed to parse {}: {}", self.config_file.display(), e)))
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        self.ensure_dir()?;

        // Create backup if file exists
        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_file, content).map_err(|e| io_error(&self.config_file, e))
    }

    /// Create a backup of current config
    fn create_backup(&self) -> Result<()> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir).map_err(|e| io_error(&backup_dir, e))?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S%.3f");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file).map_err(|e| io_error(&backup_file, e))?;

        cleanup_old_backups(&backup_dir, MAX_BACKUPS)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> AnalyzerError {
    AnalyzerError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Remove old backups, keeping only the most recent `keep`
fn cleanup_old_backups(backup_dir: &Path, keep: usize) -> Result<()> {
    let mut entries: Vec<_> = fs::read_dir(backup_dir)
        .map_err(|e| io_error(backup_dir, e))?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .collect();

    if entries.len() <= keep {
        return Ok(());
    }

    // Oldest first; names embed the timestamp, so they break mtime ties
    entries.sort_by_key(|e| {
        let modified = e
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(std::time::SystemTime::UNIX_EPOCH);
        (modified, e.file_name())
    });

    for entry in entries.iter().take(entries.len() - keep) {
        let _ = fs::remove_file(entry.path());
    }

    Ok(())
}
