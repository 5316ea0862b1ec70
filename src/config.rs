//! Composer configuration
//!
//! Stores user preferences in `~/.config/draft-polish/config.yaml`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::document::DocumentKind;
use crate::polish::{CommandPolishService, PolishMode, PolishService, UnconfiguredService};

/// External program used as the polish service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolishCommandConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Composer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Document representation for new sessions
    #[serde(default)]
    pub document: DocumentKind,
    /// Mode used by the "polish entire draft" action
    #[serde(default)]
    pub default_mode: PolishMode,
    #[serde(default)]
    pub polish_command: Option<PolishCommandConfig>,
    /// JSON file replacing the bundled sample emails
    #[serde(default)]
    pub samples_file: Option<PathBuf>,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            document: DocumentKind::default(),
            default_mode: PolishMode::default(),
            polish_command: None,
            samples_file: None,
        }
    }
}

impl ComposerConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Service described by this config
    pub fn polish_service(&self) -> Arc<dyn PolishService> {
        match &self.polish_command {
            Some(command) => Arc::new(CommandPolishService::new(
                command.program.clone(),
                command.args.clone(),
            )),
            None => Arc::new(UnconfiguredService),
        }
    }
}
