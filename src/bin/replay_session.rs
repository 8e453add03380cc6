//! CLI: Replay a scripted attribute-editing session.
//!
//! Reads a session JSON (starting node + input events), runs it through a fresh
//! editor and prints every node update the graph model would receive.
//!
//! Usage: `replay_session [OPTIONS] <path-to-session-json>`
//!
//! Set RUST_LOG=attribute_editor=trace for span enter/exit and ignored-event logs.

use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::process;

use attribute_editor::{replay, session_io};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Replay a scripted attribute-editing session.
#[derive(Parser, Debug)]
#[command(name = "replay_session")]
#[command(after_help = r#"Environment variables (override flags when set):
  ATTRIBUTE_EDITOR_PRETTY   Set to 1/true to pretty-print the update list.

Examples:
  replay_session tests/integration/ratio_binding.json
  replay_session --pretty --output /tmp/updates.json session.json"#)]
struct Args {
  /// Pretty-print the JSON output. Overridden by ATTRIBUTE_EDITOR_PRETTY if set.
  #[arg(long)]
  pretty: bool,

  /// Write updates here instead of stdout.
  #[arg(long, value_name = "FILE")]
  output: Option<PathBuf>,

  /// Path to the session JSON file
  #[arg(value_name = "path-to-session-json")]
  session: PathBuf,
}

fn env_flag(name: &str) -> Option<bool> {
  env::var(name)
    .ok()
    .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  let pretty = env_flag("ATTRIBUTE_EDITOR_PRETTY").unwrap_or(args.pretty);
  info!(session = %args.session.display(), pretty, "replay_session starting");

  let script = match session_io::load_session(&args.session) {
    Ok(s) => s,
    Err(e) => {
      eprintln!("Error loading {}: {}", args.session.display(), e);
      process::exit(1);
    }
  };

  let updates = match replay(&script) {
    Ok(u) => u,
    Err(e) => {
      eprintln!("Replay error: {}", e);
      process::exit(1);
    }
  };

  let result = match &args.output {
    Some(path) => session_io::save_updates(path, &updates, pretty),
    None => session_io::render_updates(&updates, pretty).map(|json| println!("{json}")),
  };
  if let Err(e) = result {
    eprintln!("Error writing updates: {}", e);
    process::exit(1);
  }
  info!(updates = updates.len(), "session replayed");
}
