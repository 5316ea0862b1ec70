use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use draft_polish::cli::{CliArgs, StartupConfig};
use draft_polish::config::ComposerConfig;
use draft_polish::document::{DocumentHost, DocumentKind, PlainTextDocument, RichDocument};
use draft_polish::messages::{DocumentMsg, Msg};
use draft_polish::model::Composer;
use draft_polish::polish::PolishService;
use draft_polish::runtime::Runtime;
use draft_polish::samples::{self, SampleEmail};

mod repl;

fn load_samples(config: &ComposerConfig) -> Result<Vec<SampleEmail>> {
    match &config.samples_file {
        Some(path) => samples::load_from_file(path),
        None => Ok(samples::bundled()),
    }
}

fn run_session<D: DocumentHost>(
    document: D,
    startup: &StartupConfig,
    samples: Vec<SampleEmail>,
    service: Arc<dyn PolishService>,
) -> Result<()> {
    let composer = Composer::new(document).with_samples(samples);
    let mut runtime = Runtime::new(composer, service);

    let available = runtime.model().samples.len();
    if let Some(index) = startup
        .draft
        .sample_index(available)
        .map_err(anyhow::Error::msg)?
    {
        runtime.dispatch(Msg::Document(DocumentMsg::LoadSample(index)));
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(
        &mut runtime,
        startup.config.default_mode,
        stdin.lock(),
        &mut stdout.lock(),
    )
}

fn main() -> Result<()> {
    draft_polish::tracing::init();

    let args = CliArgs::parse();
    let file_config = match args.config_path() {
        Some(path) => ComposerConfig::load_from(path),
        None => ComposerConfig::load(),
    };
    let startup = args
        .into_config(file_config)
        .map_err(anyhow::Error::msg)
        .context("Invalid command-line arguments")?;

    let samples = load_samples(&startup.config)?;
    let service = startup.config.polish_service();
    tracing::info!(document = %startup.config.document, "starting composer");

    match startup.config.document {
        DocumentKind::Plain => run_session(PlainTextDocument::new(), &startup, samples, service),
        DocumentKind::Rich => run_session(RichDocument::new(), &startup, samples, service),
    }
}
