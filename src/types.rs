//! Core configuration and report types for wordforge

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{WordForgeError, Result};
use crate::wordlist::{generate, AlphabetOptions, FormatMask, WordGenerator, WriteStats};

/// Configuration for one wordlist run, validated once before generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub alphabet: AlphabetOptions,
    pub length: usize,
    /// Raw `L`/`U`/`D`/`S` mask, one code per position
    pub mask: Option<String>,
    pub output: PathBuf,
    pub workers: usize,
    /// Where to write the JSON run report, if anywhere
    pub report: Option<PathBuf>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            alphabet: AlphabetOptions::default(),
            length: 4,
            mask: None,
            output: PathBuf::from("wordlist.txt"),
            workers: 1,
            report: None,
        }
    }
}

impl GenerationConfig {
    pub fn format_mask(&self) -> Result<Option<FormatMask>> {
        self.mask.as_deref().map(str::parse::<FormatMask>).transpose()
    }

    /// Build the generator, failing on any invalid parameter
    pub fn generator(&self) -> Result<WordGenerator> {
        if self.workers == 0 {
            return Err(WordForgeError::config("workers must be at least 1"));
        }
        generate(self.alphabet.build(), self.length, self.format_mask()?)
    }

    pub fn validate(&self) -> Result<()> {
        self.generator().map(|_| ())
    }
}

/// Summary of a completed run, written as JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub alphabet: String,
    pub alphabet_size: usize,
    pub length: usize,
    pub mask: Option<String>,
    /// Kept as a string since the count can exceed JSON's integer range
    pub total_words: String,
    pub words_written: u64,
    pub bytes_written: u64,
    pub workers: usize,
    pub output: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_secs: f64,
}

impl GenerationReport {
    pub fn new(
        config: &GenerationConfig,
        generator: &WordGenerator,
        stats: WriteStats,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let elapsed = finished_at - started_at;
        Self {
            alphabet: generator.alphabet().to_string(),
            alphabet_size: generator.alphabet().len(),
            length: generator.length(),
            mask: generator.mask().map(|m| m.to_string()),
            total_words: generator.total().to_string(),
            words_written: stats.words,
            bytes_written: stats.bytes,
            workers: config.workers,
            output: config.output.clone(),
            started_at,
            finished_at,
            elapsed_secs: elapsed.num_milliseconds() as f64 / 1000.0,
        }
    }

    /// Words per second over the whole run
    pub fn rate(&self) -> f64 {
        if self.elapsed_secs > 0.0 {
            self.words_written as f64 / self.elapsed_secs
        } else {
            0.0
        }
    }

    /// Load report from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WordForgeError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            WordForgeError::parse(e.to_string(), Some(content))
        })
    }

    /// Save report to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    WordForgeError::io(e.to_string(), Some(parent.to_string_lossy().to_string()))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            WordForgeError::internal(format!("Failed to serialize report: {}", e))
        })?;

        std::fs::write(path, content).map_err(|e| {
            WordForgeError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })
    }
}
