//! Kanagi CLI - JSON-lines front end for the reasoning core.
//!
//! ```text
//! kanagi [FILE | -]
//! ```
//!
//! Each non-blank input line is one turn:
//!
//! ```json
//! {"message":"火と水","sessionId":"s1","turnCount":3,"previousAxis":"observational"}
//! ```
//!
//! Each output line is the provisional `CorePlan` for that turn. Session
//! state lives for the life of the process. Logs go to stderr (`RUST_LOG`,
//! default `info`) so stdout stays machine-readable.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use anyhow::{Context, Result, bail};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use kanagi_engine::{CorePlanBuilder, InMemorySessionStore, TurnInput};
use kanagi_types::CoreSettings;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn load_settings() -> Result<CoreSettings> {
    let settings = kanagi_config::load_settings().context("loading kanagi config")?;
    tracing::debug!(
        threshold = settings.loop_policy.threshold(),
        fallback_law_limit = settings.evidence.fallback_law_limit(),
        "settings resolved"
    );
    Ok(settings)
}

fn open_input(arg: Option<String>) -> Result<Box<dyn BufRead>> {
    match arg.as_deref() {
        None | Some("-") => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {path}"))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Plan every turn in `input`, writing one JSON plan per line to `output`.
///
/// Stops at the first malformed line; a bad law id is never coerced.
fn run(input: impl BufRead, mut output: impl Write, settings: &CoreSettings) -> Result<usize> {
    let mut builder = CorePlanBuilder::new(InMemorySessionStore::new(), settings);
    let mut planned = 0;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("reading line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let turn: TurnInput = serde_json::from_str(&line)
            .with_context(|| format!("parsing turn on line {line_no}"))?;
        let plan = builder.build(turn);
        serde_json::to_writer(&mut output, &plan)
            .with_context(|| format!("writing plan for line {line_no}"))?;
        output.write_all(b"\n")?;
        planned += 1;
    }

    output.flush()?;
    Ok(planned)
}

fn main() -> Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let input_arg = args.next();
    if args.next().is_some() {
        bail!("usage: kanagi [FILE | -]");
    }

    let settings = load_settings()?;
    let input = open_input(input_arg)?;
    let stdout = io::stdout();
    let planned = run(input, BufWriter::new(stdout.lock()), &settings)?;
    tracing::info!(planned, "done");
    Ok(())
}
