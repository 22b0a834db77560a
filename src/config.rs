//! Configuration management for the ATS scorer

use crate::error::{AtsScorerError, Result};
use crate::scoring::analyzer::{MAX_KEYWORD_SUGGESTIONS, MAX_MISSING_REPORTED};
use crate::scoring::extractor::MAX_KEYWORDS;
use crate::scoring::weights::{Weights, AGGREGATION_WEIGHTS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

/// Aggregation weights for the four sub-scores. Defaults mirror the named
/// constants in `scoring::weights`; tune them here without touching the
/// algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub keyword_weight: f64,
    pub title_weight: f64,
    pub skills_weight: f64,
    pub format_weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub max_keywords: usize,
    pub max_missing_keywords: usize,
    pub max_keyword_suggestions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl ScoringConfig {
    pub fn weights(&self) -> Weights {
        Weights {
            keyword: self.keyword_weight,
            title: self.title_weight,
            skills: self.skills_weight,
            format: self.format_weight,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig {
                keyword_weight: AGGREGATION_WEIGHTS.keyword,
                title_weight: AGGREGATION_WEIGHTS.title,
                skills_weight: AGGREGATION_WEIGHTS.skills,
                format_weight: AGGREGATION_WEIGHTS.format,
            },
            extraction: ExtractionConfig {
                max_keywords: MAX_KEYWORDS,
                max_missing_keywords: MAX_MISSING_REPORTED,
                max_keyword_suggestions: MAX_KEYWORD_SUGGESTIONS,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                AtsScorerError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            AtsScorerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-scorer")
            .join("config.toml")
    }
}
