//! `voxlog` — replay a voice session against the join logger.
//!
//! # Usage
//!
//! ```
//! voxlog --config voxlog.toml --script session.jsonl
//! voxlog --config voxlog.toml --dump-json < session.jsonl
//! ```

mod app;
mod host;
mod script;
mod settings;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::{App, Exit};
use clap::Parser;
use host::ReplayHost;
use script::Step;
use settings::ReplayConfig;
use tokio::{
  io::{AsyncBufRead, AsyncBufReadExt, BufReader},
  sync::mpsc,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use voxlog_core::{export, ids::SubjectId};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "voxlog", about = "Replay a voice session through the join logger")]
struct Args {
  /// Path to a TOML config file (roster, local user, plugin settings).
  #[arg(short, long, value_name = "FILE", default_value = "voxlog.toml")]
  config: PathBuf,

  /// Session script, one JSON step per line. Reads stdin when omitted.
  #[arg(short, long, value_name = "FILE")]
  script: Option<PathBuf>,

  /// Override the local user's id from the config file.
  #[arg(long, env = "VOXLOG_LOCAL_SUBJECT")]
  local_subject: Option<String>,

  /// Print the final log as JSON before shutting down.
  #[arg(long)]
  dump_json: bool,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let mut config = ReplayConfig::load(&args.config)?;
  if let Some(local) = args.local_subject {
    config.local_subject = SubjectId::from(local);
  }

  let input: Box<dyn AsyncBufRead + Unpin + Send> = match &args.script {
    Some(path) => {
      let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("opening script {}", path.display()))?;
      Box::new(BufReader::new(file))
    }
    None => Box::new(BufReader::new(tokio::io::stdin())),
  };

  let (tx, mut rx) = mpsc::channel(64);
  let reader = tokio::spawn(read_steps(input, tx));

  let mut app = App::new(ReplayHost::new(&config), &config.plugin)?;
  let run_result = app.run(&mut rx).await;

  if matches!(run_result, Ok(Exit::Finished)) {
    match reader.await {
      Ok(result) => result?,
      Err(e) => tracing::warn!(error = %e, "script reader task failed"),
    }
  } else {
    reader.abort();
  }

  let dump = if args.dump_json {
    Some(export::to_json(app.plugin.log().snapshot()).context("serialising log")?)
  } else {
    None
  };

  // Release the subscription and surfaces whatever happened above.
  app.plugin.stop();

  if let Some(json) = dump {
    println!("{json}");
  }
  run_result.map(|_| ())
}

// ─── Script reader ────────────────────────────────────────────────────────────

/// Feed parsed steps into the bus. Malformed lines are reported and skipped.
async fn read_steps(
  input: Box<dyn AsyncBufRead + Unpin + Send>,
  tx: mpsc::Sender<Step>,
) -> Result<()> {
  let mut lines = input.lines();
  let mut line_no = 0usize;
  while let Some(line) = lines.next_line().await.context("reading script")? {
    line_no += 1;
    match Step::parse(&line) {
      Ok(Some(step)) => {
        if tx.send(step).await.is_err() {
          break;
        }
      }
      Ok(None) => {}
      Err(e) => tracing::warn!(line = line_no, error = %e, "skipping malformed step"),
    }
  }
  Ok(())
}
