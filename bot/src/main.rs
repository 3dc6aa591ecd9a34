//! Quantum Reversi match bot.
//!
//! A stdin/stdout process driven by the match host:
//!
//! 1. Receives `init` with our player index and the board glyphs
//! 2. Answers each `play` with a pair of cells and each `select` with the
//!    endpoint to collapse, rebuilding the position from the transcript
//!    every turn
//! 3. Exits cleanly on `quit`
//!
//! The host is trusted: malformed input is a fatal error, not something to
//! recover from.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

mod config;
mod protocol;
mod session;

use crate::config::Config;
use crate::protocol::Request;
use crate::session::{Reply, Session};

/// Log to stderr; stdout belongs to the protocol.
fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;
    init_tracing(&config.log_level);

    match config.seed {
        Some(seed) => mcts::rng::set_seed(seed),
        None => mcts::rng::seed_from_entropy(),
    }

    let search = mcts::SearchConfig::default().with_time_limit(config.time_limit());
    run(search)
}

/// The dialog loop: one request line in, one reply line out.
fn run(search: mcts::SearchConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut lines = stdin.lock().lines();

    let first = lines
        .next()
        .context("dialog closed before init")?
        .context("failed to read from the host")?;
    let request: Request =
        serde_json::from_str(&first).with_context(|| format!("malformed message: {first}"))?;
    let Request::Init(init) = request else {
        bail!("expected init as the first message");
    };
    let mut session = Session::new(init, search)?;
    writeln!(stdout)?;
    stdout.flush()?;

    for line in lines {
        let line = line.context("failed to read from the host")?;
        let request: Request =
            serde_json::from_str(&line).with_context(|| format!("malformed message: {line}"))?;
        match session.handle(request)? {
            Reply::Line(reply) => {
                writeln!(stdout, "{reply}")?;
                stdout.flush()?;
            }
            Reply::Quit => {
                writeln!(stdout)?;
                stdout.flush()?;
                break;
            }
        }
    }

    info!("session finished");
    Ok(())
}
