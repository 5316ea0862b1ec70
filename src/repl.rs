//! Line-oriented composer session over stdin/stdout
//!
//! Each input line is parsed into a [`ReplCommand`] and turned into one or
//! more messages for the runtime. Polish commands block until the worker
//! thread reports back, then print the review diff.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};

use draft_polish::document::{DocumentHost, PolishScope};
use draft_polish::messages::{DocumentMsg, Msg, PolishMsg};
use draft_polish::polish::PolishMode;
use draft_polish::runtime::Runtime;

const HELP: &str = "\
Commands:
  show                    print the envelope, draft and selection
  select FROM TO          select document positions FROM..TO
  select-all              select the entire draft
  type FROM TO TEXT       replace FROM..TO with TEXT (\\n for a newline)
  polish MODE             polish the selection
  polish-draft [MODE]     polish the entire draft
  diff                    show the pending review again
  accept                  apply the pending review
  cancel                  dismiss the pending review
  undo                    revert the last accepted polish
  samples                 list sample emails
  load N                  start over from sample N
  subject TEXT            set the subject
  to ADDR                 set the recipient
  help                    show this help
  quit                    exit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Show,
    Select { from: usize, to: usize },
    SelectAll,
    Type { from: usize, to: usize, text: String },
    Polish(PolishMode),
    PolishDraft(Option<PolishMode>),
    Diff,
    Accept,
    Cancel,
    Undo,
    Samples,
    /// Sample number as typed (1-indexed)
    Load(usize),
    Subject(String),
    To(String),
    Help,
    Quit,
}

fn parse_position(word: Option<&str>, name: &str) -> Result<usize, String> {
    let word = word.ok_or_else(|| format!("Missing {}", name))?;
    word.parse()
        .map_err(|_| format!("{} must be a number, got '{}'", name, word))
}

fn parse_mode(word: &str) -> Result<PolishMode, String> {
    word.parse().map_err(|_| {
        let ids: Vec<_> = PolishMode::ALL.iter().map(|m| m.id()).collect();
        format!("Unknown mode '{}' (expected one of: {})", word, ids.join(", "))
    })
}

fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
}

impl FromStr for ReplCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim_start();
        let mut words = rest.split_whitespace();

        match name {
            "show" => Ok(ReplCommand::Show),
            "select" => Ok(ReplCommand::Select {
                from: parse_position(words.next(), "FROM")?,
                to: parse_position(words.next(), "TO")?,
            }),
            "select-all" => Ok(ReplCommand::SelectAll),
            "type" => {
                let mut parts = rest.splitn(3, ' ');
                let from = parse_position(parts.next().filter(|s| !s.is_empty()), "FROM")?;
                let to = parse_position(parts.next(), "TO")?;
                let text = unescape(parts.next().unwrap_or(""));
                Ok(ReplCommand::Type { from, to, text })
            }
            "polish" => {
                let mode = words.next().ok_or("Missing MODE")?;
                Ok(ReplCommand::Polish(parse_mode(mode)?))
            }
            "polish-draft" => match words.next() {
                Some(mode) => Ok(ReplCommand::PolishDraft(Some(parse_mode(mode)?))),
                None => Ok(ReplCommand::PolishDraft(None)),
            },
            "diff" => Ok(ReplCommand::Diff),
            "accept" => Ok(ReplCommand::Accept),
            "cancel" => Ok(ReplCommand::Cancel),
            "undo" => Ok(ReplCommand::Undo),
            "samples" => Ok(ReplCommand::Samples),
            "load" => Ok(ReplCommand::Load(parse_position(words.next(), "N")?)),
            "subject" => Ok(ReplCommand::Subject(rest.to_string())),
            "to" => Ok(ReplCommand::To(rest.to_string())),
            "help" | "?" => Ok(ReplCommand::Help),
            "quit" | "exit" => Ok(ReplCommand::Quit),
            other => Err(format!("Unknown command '{}'. Type 'help'.", other)),
        }
    }
}

/// Whether the session keeps reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Read commands from `input` until EOF or `quit`
pub fn run<D, R, W>(
    runtime: &mut Runtime<D>,
    default_mode: PolishMode,
    input: R,
    out: &mut W,
) -> Result<()>
where
    D: DocumentHost,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", runtime.model().helper_text())?;
    write_prompt(out)?;

    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        if !line.trim().is_empty() {
            match line.parse::<ReplCommand>() {
                Ok(command) => {
                    if execute(runtime, default_mode, command, out)? == Flow::Quit {
                        return Ok(());
                    }
                }
                Err(message) => writeln!(out, "{}", message)?,
            }
        }
        write_prompt(out)?;
    }
    Ok(())
}

fn write_prompt<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "> ")?;
    out.flush().context("Failed to flush output")
}

/// Apply one command to the runtime and print its outcome
pub fn execute<D: DocumentHost, W: Write>(
    runtime: &mut Runtime<D>,
    default_mode: PolishMode,
    command: ReplCommand,
    out: &mut W,
) -> Result<Flow> {
    match command {
        ReplCommand::Show => show(runtime, out)?,
        ReplCommand::Select { from, to } => {
            runtime.dispatch(Msg::Document(DocumentMsg::SetSelection {
                anchor: from,
                head: to,
            }));
            let selection = runtime.model().document.selection();
            writeln!(
                out,
                "Selected {}..{}: {:?}",
                selection.from,
                selection.to,
                runtime.model().document.text_in_range(selection)
            )?;
        }
        ReplCommand::SelectAll => {
            runtime.dispatch(Msg::Document(DocumentMsg::SelectAll));
            let selection = runtime.model().document.selection();
            writeln!(out, "Selected {}..{}", selection.from, selection.to)?;
        }
        ReplCommand::Type { from, to, text } => {
            let before = runtime.model().document.full_text();
            runtime.dispatch(Msg::Document(DocumentMsg::Edit { from, to, text }));
            if runtime.model().document.full_text() == before && runtime.model().review.is_reviewing()
            {
                writeln!(out, "Accept or cancel the pending review first.")?;
            } else {
                show(runtime, out)?;
            }
        }
        ReplCommand::Polish(mode) => polish(runtime, mode, PolishScope::Selection, out)?,
        ReplCommand::PolishDraft(mode) => polish(
            runtime,
            mode.unwrap_or(default_mode),
            PolishScope::FullDraft,
            out,
        )?,
        ReplCommand::Diff => match runtime.model().review_diff() {
            Some(_) => print_review(runtime, out)?,
            None => writeln!(out, "No pending review.")?,
        },
        ReplCommand::Accept => {
            if runtime.model().pending_review().is_none() {
                writeln!(out, "No pending review.")?;
            } else {
                runtime.dispatch(Msg::Polish(PolishMsg::Accept));
                match runtime.model().review.error() {
                    Some(error) => writeln!(out, "{}", error)?,
                    None => show(runtime, out)?,
                }
            }
        }
        ReplCommand::Cancel => {
            if runtime.model().pending_review().is_none() {
                writeln!(out, "No pending review.")?;
            } else {
                runtime.dispatch(Msg::Polish(PolishMsg::Cancel));
                writeln!(out, "Review dismissed.")?;
            }
        }
        ReplCommand::Undo => {
            if runtime.model().can_undo() {
                runtime.dispatch(Msg::Polish(PolishMsg::Undo));
                show(runtime, out)?;
            } else {
                writeln!(out, "Nothing to undo.")?;
            }
        }
        ReplCommand::Samples => {
            let samples = &runtime.model().samples;
            if samples.is_empty() {
                writeln!(out, "No samples available.")?;
            }
            for (i, sample) in samples.iter().enumerate() {
                let marker = if runtime.model().selected_sample == Some(i) {
                    "*"
                } else {
                    " "
                };
                writeln!(
                    out,
                    "{}{:>2}. {} <{}>",
                    marker,
                    i + 1,
                    sample.subject,
                    sample.agent_email
                )?;
            }
        }
        ReplCommand::Load(n) => {
            let index = n.wrapping_sub(1);
            if index >= runtime.model().samples.len() {
                writeln!(out, "No sample {}. Type 'samples' to list them.", n)?;
            } else {
                runtime.dispatch(Msg::Document(DocumentMsg::LoadSample(index)));
                show(runtime, out)?;
            }
        }
        ReplCommand::Subject(subject) => {
            runtime.dispatch(Msg::Document(DocumentMsg::SetSubject(subject)));
        }
        ReplCommand::To(recipient) => {
            runtime.dispatch(Msg::Document(DocumentMsg::SetRecipient(recipient)));
        }
        ReplCommand::Help => writeln!(out, "{}", HELP)?,
        ReplCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn polish<D: DocumentHost, W: Write>(
    runtime: &mut Runtime<D>,
    mode: PolishMode,
    scope: PolishScope,
    out: &mut W,
) -> Result<()> {
    if !runtime.model().review.accepts_new_request() {
        writeln!(out, "Accept or cancel the pending review first.")?;
        return Ok(());
    }

    runtime.dispatch(Msg::Polish(PolishMsg::Request { mode, scope }));
    if !runtime.model().review.is_requesting() {
        writeln!(out, "Nothing to polish. Select some text first.")?;
        return Ok(());
    }

    writeln!(out, "{}", runtime.model().helper_text())?;
    out.flush().context("Failed to flush output")?;
    runtime.wait_for_polish();

    match runtime.model().review.error() {
        Some(error) => writeln!(out, "{}", error)?,
        None => print_review(runtime, out)?,
    }
    Ok(())
}

fn print_review<D: DocumentHost, W: Write>(runtime: &Runtime<D>, out: &mut W) -> Result<()> {
    let model = runtime.model();
    let (Some(review), Some(diff)) = (model.pending_review(), model.review_diff()) else {
        return Ok(());
    };

    writeln!(out, "{}", review.title())?;
    if diff.is_unchanged() {
        writeln!(out, "  (no changes suggested)")?;
    } else {
        let (removed, added) = diff.change_count();
        writeln!(out, "  {}", diff.render_inline())?;
        writeln!(out, "  {} removed, {} added", removed, added)?;
        writeln!(out)?;
        writeln!(out, "{}", diff.render_side_by_side())?;
    }
    writeln!(out, "Type 'accept' to apply or 'cancel' to dismiss.")?;
    Ok(())
}

fn show<D: DocumentHost, W: Write>(runtime: &Runtime<D>, out: &mut W) -> Result<()> {
    let model = runtime.model();
    let selection = model.document.selection();

    writeln!(out, "To: {}", model.envelope.recipient)?;
    writeln!(out, "Subject: {}", model.envelope.subject)?;
    writeln!(out, "---")?;
    writeln!(out, "{}", model.document.full_text())?;
    writeln!(out, "---")?;
    writeln!(
        out,
        "Selection {}..{} of {}  |  undo: {}",
        selection.from,
        selection.to,
        model.document.len(),
        model.history.len()
    )?;
    writeln!(out, "{}", model.helper_text())?;
    Ok(())
}
