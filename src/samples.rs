//! Sample emails a session can be reset to.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const BUNDLED_SAMPLES: &str = include_str!("../samples/sample-emails.json");

/// One loadable email: envelope fields plus body content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleEmail {
    pub subject: String,
    /// Recipient address shown in the "To" field
    #[serde(alias = "sender_address")]
    pub agent_email: String,
    pub content: String,
}

/// Samples compiled into the binary
pub fn bundled() -> Vec<SampleEmail> {
    match serde_json::from_str(BUNDLED_SAMPLES) {
        Ok(samples) => samples,
        Err(e) => {
            tracing::warn!("Bundled sample emails are malformed: {}", e);
            Vec::new()
        }
    }
}

/// Read samples from a JSON file holding an array of sample records
pub fn load_from_file(path: &Path) -> Result<Vec<SampleEmail>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read samples from {}", path.display()))?;
    let samples: Vec<SampleEmail> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse samples in {}", path.display()))?;
    tracing::info!("Loaded {} sample emails from {}", samples.len(), path.display());
    Ok(samples)
}
