//! Polish service client.
//!
//! The composer sees the text-generation service as a single blocking call,
//! [`PolishService::polish`]. The runtime runs it on a worker thread and
//! reports the result back as a message, so the update loop never waits.

mod command;

pub use command::{CommandPolishService, UnconfiguredService};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Rewrite style for a polish request. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolishMode {
    FixClean,
    #[default]
    Professional,
    Friendly,
    Concise,
}

impl PolishMode {
    pub const ALL: [PolishMode; 4] = [
        PolishMode::FixClean,
        PolishMode::Professional,
        PolishMode::Friendly,
        PolishMode::Concise,
    ];

    /// Stable identifier used in config files and passed to services
    pub fn id(self) -> &'static str {
        match self {
            PolishMode::FixClean => "fix-clean",
            PolishMode::Professional => "professional",
            PolishMode::Friendly => "friendly",
            PolishMode::Concise => "concise",
        }
    }

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            PolishMode::FixClean => "Fix & Clean",
            PolishMode::Professional => "Professional",
            PolishMode::Friendly => "Friendly",
            PolishMode::Concise => "Concise",
        }
    }

    /// Instruction handed to the generation backend along with the text
    pub fn instruction(self) -> &'static str {
        match self {
            PolishMode::FixClean => {
                "Fix spelling, grammar and punctuation. Keep the wording, tone and length otherwise unchanged."
            }
            PolishMode::Professional => {
                "Rewrite in a clear, courteous, professional tone suitable for business email."
            }
            PolishMode::Friendly => "Rewrite in a warm, friendly and approachable tone.",
            PolishMode::Concise => {
                "Rewrite to be as short as possible while keeping every fact and request."
            }
        }
    }
}

impl fmt::Display for PolishMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PolishMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        PolishMode::ALL
            .into_iter()
            .find(|mode| mode.id() == needle)
            .ok_or_else(|| {
                format!(
                    "unknown polish mode '{}' (expected one of: fix-clean, professional, friendly, concise)",
                    s
                )
            })
    }
}

/// Any failure reaching or using the polish service.
///
/// `Display` is the message shown to the user in place of the helper text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolishError {
    /// Could not reach the service at all
    #[error("{0}")]
    Transport(String),
    /// The service refused the credentials it was given
    #[error("Not authorized to use the polish service: {0}")]
    Unauthorized(String),
    /// The service answered with an error of its own
    #[error("{0}")]
    Service(String),
    /// Success status but nothing usable came back
    #[error("The polish service returned an empty response.")]
    EmptyResponse,
    /// No service has been configured for this session
    #[error("{0}")]
    NotConfigured(String),
}

/// Opaque text-generation collaborator: `(text, mode) -> polished text`.
///
/// Implementations may block; they are never called on the update loop.
/// No retries and no timeout are applied around the call.
pub trait PolishService: Send + Sync {
    fn polish(&self, text: &str, mode: PolishMode) -> Result<String, PolishError>;
}

impl<F> PolishService for F
where
    F: Fn(&str, PolishMode) -> Result<String, PolishError> + Send + Sync,
{
    fn polish(&self, text: &str, mode: PolishMode) -> Result<String, PolishError> {
        self(text, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_ids_round_trip_through_from_str() {
        for mode in PolishMode::ALL {
            assert_eq!(mode.id().parse::<PolishMode>(), Ok(mode));
        }
        assert_eq!(" Friendly ".parse::<PolishMode>(), Ok(PolishMode::Friendly));
        assert!("shouty".parse::<PolishMode>().is_err());
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(PolishMode::FixClean.label(), "Fix & Clean");
        assert_eq!(PolishMode::Concise.label(), "Concise");
    }

    #[test]
    fn test_mode_serde_uses_kebab_case() {
        let yaml = serde_yaml::to_string(&PolishMode::FixClean).unwrap();
        assert_eq!(yaml.trim(), "fix-clean");
        let mode: PolishMode = serde_yaml::from_str("friendly").unwrap();
        assert_eq!(mode, PolishMode::Friendly);
    }

    #[test]
    fn test_error_display_is_user_message() {
        assert_eq!(
            PolishError::Transport("network error".into()).to_string(),
            "network error"
        );
        assert_eq!(
            PolishError::EmptyResponse.to_string(),
            "The polish service returned an empty response."
        );
    }

    #[test]
    fn test_closure_is_a_service() {
        let service = |text: &str, _mode: PolishMode| -> Result<String, PolishError> {
            Ok(text.to_uppercase())
        };
        assert_eq!(
            service.polish("hi", PolishMode::Friendly),
            Ok("HI".to_string())
        );
    }
}
