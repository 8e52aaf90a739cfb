// Configuration Storage Service
// Handles settings file read/write and version backup

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::services::rewrite::RewriteOptions;
use crate::services::scoring::{ConfigError, OrchestratorConfig, SimilarityWeights};

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_similarity_preset() -> String {
    "canonical".to_string()
}

fn default_marker_preset() -> String {
    "core".to_string()
}

/// Persisted analyzer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: String,
    /// Similarity weighting preset, "canonical" or "database".
    #[serde(default = "default_similarity_preset")]
    pub similarity_preset: String,
    /// Marker weighting preset, "core" or "extended".
    #[serde(default = "default_marker_preset")]
    pub marker_preset: String,
    #[serde(default)]
    pub scoring: OrchestratorConfig,
    #[serde(default)]
    pub rewrite: RewriteOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            similarity_preset: default_similarity_preset(),
            marker_preset: default_marker_preset(),
            scoring: OrchestratorConfig::default(),
            rewrite: RewriteOptions::default(),
        }
    }
}

impl AppConfig {
    /// Resolves the named similarity preset, defaulting unknown names
    /// to the canonical weighting.
    pub fn similarity_weights(&self) -> SimilarityWeights {
        match self.similarity_preset.as_str() {
            "database" => SimilarityWeights::database(),
            _ => SimilarityWeights::canonical(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate()?;
        self.rewrite.validate()
    }
}

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
        dirs::config_dir().map(|p| p.join("veritext"))
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<(), String> {
        fs::create_dir_all(&self.config_dir)
            .map_err(|e| format!("Failed to create config dir: {}", e))
    }

    /// Load configuration from file
    pub fn load(&self) -> Result<AppConfig, String> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file)
            .map_err(|e| format!("Failed to read config: {}", e))?;

        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Refusing to save invalid config: {}", e))?;
        self.ensure_dir()?;

        // Create backup if file exists
        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(&self.config_file, content)
            .map_err(|e| format!("Failed to write config: {}", e))
    }

    /// Update detection thresholds in the stored config
    pub fn set_thresholds(&self, plagiarism: f64, ai: f64) -> Result<(), String> {
        let mut config = self.load()?;
        config.scoring.plagiarism_threshold = plagiarism;
        config.scoring.ai_threshold = ai;
        self.save(&config)
    }

    /// Create a backup of current config
    fn create_backup(&self) -> Result<(), String> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir)
            .map_err(|e| format!("Failed to create backup dir: {}", e))?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file)
            .map_err(|e| format!("Failed to create backup: {}", e))?;

        // Keep only last 10 backups
        self.cleanup_old_backups(&backup_dir, 10)?;

        Ok(())
    }

    /// Remove old backups, keeping only the most recent N
    fn cleanup_old_backups(&self, backup_dir: &PathBuf, keep: usize) -> Result<(), String> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)
            .map_err(|e| format!("Failed to read backup dir: {}", e))?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Sort by modification time (oldest first)
        entries.sort_by_key(|e| {
            e.metadata()
                .and_then(|m| m.modified())
                .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
        });

        // Remove oldest entries
        for entry in entries.iter().take(entries.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }

        Ok(())
    }
}
