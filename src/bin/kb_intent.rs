//! Interactive keyword assistant
//!
//! Reads utterances from stdin, one per line, and prints the matched reply
//! with its suggestions and action. Mostly useful for curating the knowledge
//! base: `--explain` prints every scored candidate.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kb_intent::config::{CONFIG_PATH_ENV, SEED_ENV};
use kb_intent::{EngineConfig, FileSource, IntentEngine};

#[derive(Debug, Parser)]
#[command(name = "kb-intent", about = "Match utterances against the keyword knowledge base")]
struct Args {
    /// YAML engine configuration
    #[arg(long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Knowledge batch (JSON or YAML) applied on top of the built-in defaults
    #[arg(long)]
    knowledge: Option<PathBuf>,

    /// Seed for reply selection
    #[arg(long, env = SEED_ENV)]
    seed: Option<u64>,

    /// Print every scored candidate before the reply
    #[arg(long)]
    explain: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kb_intent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() {
        config.rng_seed = args.seed;
    }
    if args.knowledge.is_some() {
        config.knowledge_file = args.knowledge.clone();
    }

    let engine = IntentEngine::with_config(&config);

    if let Some(path) = &config.knowledge_file {
        tracing::info!(path = %path.display(), "Loading knowledge batch");
        engine
            .reload_from(&FileSource::new(path))
            .with_context(|| format!("loading knowledge {}", path.display()))?;
    }

    tracing::info!(
        entries = engine.snapshot().len(),
        threshold = engine.threshold(),
        "Knowledge base ready"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let utterance = line.trim();
        if utterance.is_empty() {
            continue;
        }

        if args.explain {
            for candidate in engine.explain(utterance) {
                writeln!(stdout, "  {:>8.3}  {}", candidate.score, candidate.keyword)?;
            }
        }

        match engine.respond(utterance) {
            Some(reply) => {
                writeln!(stdout, "[{}] {}", reply.keyword, reply.text)?;
                for suggestion in reply.suggestions.iter().flatten() {
                    writeln!(stdout, "  > {} ({})", suggestion.label, suggestion.action_id)?;
                }
                if let Some(action) = &reply.action {
                    writeln!(stdout, "  action: {action}")?;
                }
            }
            None => writeln!(stdout, "{}", config.fallback_reply)?,
        }
        stdout.flush()?;
    }

    Ok(())
}
