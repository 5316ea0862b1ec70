//! Draft Polish - Elm-style email composer with AI review
//!
//! This crate provides the core types and logic for composing an email,
//! sending a selection (or the whole draft) to a polish service, reviewing
//! the suggestion and undoing accepted rewrites.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod diff;
pub mod document;
pub mod messages;
pub mod model;
pub mod polish;
pub mod runtime;
pub mod samples;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::ComposerConfig;
pub use document::{DocumentHost, PlainTextDocument, RichDocument};
pub use messages::Msg;
pub use model::Composer;
pub use polish::{PolishError, PolishMode, PolishService};
