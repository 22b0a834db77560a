//! Input loading: structured resume JSON and job description text

use crate::error::{AtsScorerError, Result};
use crate::scoring::ResumeContent;
use log::info;
use std::collections::HashMap;
use std::path::Path;

/// Defensive upper bound on job description length. The scorer itself is
/// total over any input; this cap is enforced caller-side before invocation.
pub const MAX_DESCRIPTION_CHARS: usize = 50_000;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Load and validate a structured resume from a JSON file. Shape errors
    /// surface as `InvalidInput`; the scoring engine assumes well-typed
    /// input and does not re-validate.
    pub fn load_resume(&mut self, path: &Path) -> Result<ResumeContent> {
        let content = self.read_file(path)?;
        serde_json::from_str(&content).map_err(|e| {
            AtsScorerError::InvalidInput(format!("Malformed resume {}: {}", path.display(), e))
        })
    }

    /// Load a job description as plain text, enforcing the length cap.
    pub fn load_job_description(&mut self, path: &Path) -> Result<String> {
        let content = self.read_file(path)?;
        if content.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(AtsScorerError::InvalidInput(format!(
                "Job description {} exceeds {} characters",
                path.display(),
                MAX_DESCRIPTION_CHARS
            )));
        }
        Ok(content)
    }

    fn read_file(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                info!("Using cached content for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(AtsScorerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;

        if self.enable_cache {
            self.cache.insert(path_str, content.clone());
        }

        Ok(content)
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
