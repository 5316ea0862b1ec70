//! Command-line argument parsing for the composer
//!
//! Supports:
//! - Choosing the document representation (plain or rich)
//! - Starting from a sample email (the first one unless told otherwise)
//! - Starting from an empty draft
//! - Alternate config file
//! - Overriding the polish command

use clap::Parser;
use std::path::PathBuf;

use crate::config::{ComposerConfig, PolishCommandConfig};
use crate::document::DocumentKind;

/// Compose emails and polish them with an AI rewrite service
#[derive(Parser, Debug)]
#[command(
    name = "draft-polish",
    version,
    about = "Compose emails and polish them with an AI rewrite service"
)]
pub struct CliArgs {
    /// Use the rich-text document
    #[arg(long, conflicts_with = "plain")]
    pub rich: bool,

    /// Use the plain-text document
    #[arg(long)]
    pub plain: bool,

    /// Start from sample email N (1-indexed) instead of the first one
    #[arg(long, value_name = "N")]
    pub sample: Option<usize>,

    /// Start with an empty draft
    #[arg(short = 'n', long, conflicts_with = "sample")]
    pub new: bool,

    /// Read config from PATH instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Program used as the polish service
    #[arg(long, value_name = "PROG")]
    pub command: Option<String>,

    /// Extra arguments passed to the polish program
    #[arg(value_name = "ARGS", last = true)]
    pub command_args: Vec<String>,
}

/// What the composer shows when it starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupDraft {
    /// The first sample, or an empty draft when there are no samples
    FirstSample,
    /// An empty draft
    Empty,
    /// A specific sample - 1-indexed from user, converted to 0-indexed
    Sample(usize),
}

impl StartupDraft {
    /// Sample to load given how many are available, if any
    pub fn sample_index(self, available: usize) -> Result<Option<usize>, String> {
        match self {
            StartupDraft::FirstSample => Ok((available > 0).then_some(0)),
            StartupDraft::Empty => Ok(None),
            StartupDraft::Sample(index) if index < available => Ok(Some(index)),
            StartupDraft::Sample(index) => Err(format!(
                "Sample {} does not exist ({} available)",
                index + 1,
                available
            )),
        }
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Config file overlaid with command-line overrides
    pub config: ComposerConfig,
    pub draft: StartupDraft,
}

impl CliArgs {
    /// Config file to read, if one was given explicitly
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.config.as_ref()
    }

    /// Apply CLI overrides on top of the loaded config
    pub fn into_config(self, mut config: ComposerConfig) -> Result<StartupConfig, String> {
        if self.rich {
            config.document = DocumentKind::Rich;
        } else if self.plain {
            config.document = DocumentKind::Plain;
        }

        if let Some(program) = self.command {
            config.polish_command = Some(PolishCommandConfig {
                program,
                args: self.command_args,
            });
        } else if !self.command_args.is_empty() {
            return Err("Polish arguments given without --command".to_string());
        }

        let draft = match self.sample {
            Some(0) => return Err("Samples are numbered from 1".to_string()),
            Some(n) => StartupDraft::Sample(n - 1),
            None if self.new => StartupDraft::Empty,
            None => StartupDraft::FirstSample,
        };

        Ok(StartupConfig { config, draft })
    }
}
