//! Polish service backed by an external program.
//!
//! The program receives the mode id as its last argument, the mode and its
//! instruction in `POLISH_MODE` / `POLISH_INSTRUCTION`, and the text on
//! stdin. Whatever it prints on stdout is the polished text.

use std::io::Write;
use std::process::{Command, Stdio};

use super::{PolishError, PolishMode, PolishService};

/// Exit status a polish command uses to report rejected credentials
/// (`EX_NOPERM` from sysexits.h)
const EXIT_UNAUTHORIZED: i32 = 77;

#[derive(Debug, Clone)]
pub struct CommandPolishService {
    program: String,
    args: Vec<String>,
}

impl CommandPolishService {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = String>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl PolishService for CommandPolishService {
    fn polish(&self, text: &str, mode: PolishMode) -> Result<String, PolishError> {
        tracing::debug!(program = %self.program, %mode, chars = text.chars().count(), "running polish command");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(mode.id())
            .env("POLISH_MODE", mode.id())
            .env("POLISH_INSTRUCTION", mode.instruction())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                PolishError::Transport(format!(
                    "Failed to start polish command '{}': {}",
                    self.program, e
                ))
            })?;

        // stdin is written on its own thread while we drain stdout
        let writer = child.stdin.take().map(|mut stdin| {
            let input = text.to_string();
            std::thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output().map_err(|e| {
            PolishError::Transport(format!("Polish command '{}' failed: {}", self.program, e))
        })?;

        if let Some(Ok(Err(e))) = writer.map(|handle| handle.join()) {
            tracing::warn!("Could not write text to polish command: {}", e);
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("Polish command exited with {}", output.status)
            } else {
                stderr
            };
            return Err(match output.status.code() {
                Some(EXIT_UNAUTHORIZED) => PolishError::Unauthorized(message),
                _ => PolishError::Service(message),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let polished = stdout.trim_end_matches(['\n', '\r']);
        if polished.trim().is_empty() {
            return Err(PolishError::EmptyResponse);
        }
        Ok(polished.to_string())
    }
}

/// Stand-in used when no command is configured; every call fails with
/// instructions for configuring one.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredService;

impl PolishService for UnconfiguredService {
    fn polish(&self, _text: &str, _mode: PolishMode) -> Result<String, PolishError> {
        Err(PolishError::NotConfigured(
            "No polish command configured. Set `polish_command` in config.yaml or pass --command."
                .to_string(),
        ))
    }
}
