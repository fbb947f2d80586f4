mod demo;
mod dlq;
mod domain;
mod engine;
mod ingestion;
mod registry;

use std::{env, fs::File, io, path::Path};

use tracing_subscriber::EnvFilter;

use crate::{dlq::StdErrDLQ, engine::Engine, registry::Registry};

#[tokio::main] // using Tokio runtime for async
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr, stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut args = env::args();

    let Some(file_path) = args.nth(1) else {
        demo::run(io::stdout().lock())?;
        return Ok(());
    };
    let file = File::open(Path::new(&file_path))?;

    let ingestion = ingestion::CsvReader::new(file);
    let mut engine = Engine::new(ingestion, Registry::new(), StdErrDLQ::default());

    engine.process().await?;
    engine.flush(io::stdout().lock())?;

    Ok(())
}
