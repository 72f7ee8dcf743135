//! Terminal Connect 4 against the negamax engine, or between two people.
mod session;

use std::io;

use connect4::SearchEngine;
use session::Session;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), SearchEngine::default());
    session.run()
}

/// Engine diagnostics go to stderr and stay quiet unless `RUST_LOG` asks.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
