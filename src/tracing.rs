//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! review state transitions and undo history.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=review=debug,message=debug` - scoped filtering
//! - `RUST_LOG=draft_polish::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/draft-polish/logs/draft-polish.log` with
//! daily rotation. File logging uses debug level by default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::document::DocumentHost;
use crate::model::Composer;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and goes to stderr so it never mixes
/// with REPL output. File logging writes to the config directory's `logs/`
/// folder with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "draft-polish.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of composer state for diffing around an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub state: &'static str,
    pub history_len: usize,
    pub document_len: usize,
    pub selection: (usize, usize),
    pub captured: Option<(usize, usize)>,
}

impl StateSnapshot {
    pub fn from_composer<D: DocumentHost>(composer: &Composer<D>) -> Self {
        let selection = composer.document.selection();
        Self {
            state: composer.review.name(),
            history_len: composer.history.len(),
            document_len: composer.document.len(),
            selection: (selection.from, selection.to),
            captured: composer
                .review
                .captured_range()
                .map(|range| (range.from, range.to)),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &StateSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.state != other.state {
            changes.push(format!("state: {} → {}", self.state, other.state));
        }
        if self.history_len != other.history_len {
            changes.push(format!(
                "history: {} → {}",
                self.history_len, other.history_len
            ));
        }
        if self.document_len != other.document_len {
            changes.push(format!(
                "length: {} → {}",
                self.document_len, other.document_len
            ));
        }
        if self.selection != other.selection {
            changes.push(format!(
                "selection: {:?} → {:?}",
                self.selection, other.selection
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }

    /// Panic if the snapshot describes an impossible state
    pub fn assert_invariants(&self, context: &str) {
        let (from, to) = self.selection;
        assert!(
            from <= to && to <= self.document_len,
            "[{}] selection {:?} outside document of length {}",
            context,
            self.selection,
            self.document_len
        );
        let (cap_from, cap_to) = self.captured.unwrap_or((0, 0));
        assert!(
            cap_from <= cap_to,
            "[{}] captured range {:?} is reversed",
            context,
            self.captured
        );
    }
}
