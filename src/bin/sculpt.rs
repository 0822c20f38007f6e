//! CLI: run the generation pipeline over a node graph.
//!
//! Builds a canvas (the starter nodes, or a JSON node list from `--graph`), then presses the
//! primary action `--steps` times through a session and prints the resulting artifacts.
//! With no model command the offline describe model is used, so every artifact is the
//! prompt that would have been sent.
//!
//! Logs go to stderr; stdout carries only the results.
//!
//! Usage: `sculpt [OPTIONS]`
//!
//! Set RUST_LOG=latent_sculptor=trace for TRACE-level span enter/exit and events.

use clap::Parser;
use latent_sculptor::config::{CONFIG_PATH_ENV, MODEL_CMD_ENV};
use latent_sculptor::{
  Canvas, CommandImageModel, DescribeModel, GenerationBackend, Node, NodeStore, SculptorConfig,
  Session, StagedFlow,
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Run the staged image-generation pipeline over a node graph.
#[derive(Parser, Debug)]
#[command(name = "sculpt")]
#[command(
  after_help = r#"Environment variables (override --model-cmd and --config when set):
  SCULPTOR_MODEL_CMD    Image model command. Receives {"prompt","inputImage"} as JSON on stdin
                        and prints the artifact reference (URL or data URI) on stdout.
  SCULPTOR_CONFIG       JSON config file (spawn_min, spawn_max, group_width, model_cmd).

Examples:
  sculpt --steps 3
  sculpt --graph canvas.json --model-cmd ./render.sh --json"#
)]
struct Args {
  /// Image model command. Overridden by SCULPTOR_MODEL_CMD if set.
  #[arg(long, value_name = "CMD")]
  model_cmd: Option<String>,

  /// JSON config file. Overridden by SCULPTOR_CONFIG if set.
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// JSON array of nodes to load instead of the starter canvas.
  #[arg(long, value_name = "FILE")]
  graph: Option<PathBuf>,

  /// Number of primary-action presses (3 runs the full pipeline).
  #[arg(long, default_value_t = 3)]
  steps: usize,

  /// Print the final pipeline state as JSON; stdout then carries nothing else.
  #[arg(long)]
  json: bool,
}

fn load_canvas(path: &Path, config: &SculptorConfig) -> Result<Canvas, String> {
  let text = fs::read_to_string(path).map_err(|e| format!("reading {}: {}", path.display(), e))?;
  let nodes: Vec<Node> =
    serde_json::from_str(&text).map_err(|e| format!("parsing {}: {}", path.display(), e))?;
  let store = NodeStore::from_nodes(config, nodes).map_err(|e| e.to_string())?;
  Ok(Canvas::new(store))
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  // Env vars override flags.
  let config_path = env::var(CONFIG_PATH_ENV)
    .ok()
    .map(PathBuf::from)
    .or_else(|| args.config.clone());
  let config = match &config_path {
    Some(path) => match SculptorConfig::load(path) {
      Ok(c) => c,
      Err(e) => {
        eprintln!("Error: {}", e);
        process::exit(1);
      }
    },
    None => SculptorConfig::default(),
  };
  let model_cmd = env::var(MODEL_CMD_ENV)
    .ok()
    .or_else(|| args.model_cmd.clone())
    .or_else(|| config.model_cmd.clone());

  info!(model_cmd = ?model_cmd, config = ?config_path, steps = args.steps, "sculpt starting");

  let canvas = match &args.graph {
    Some(path) => match load_canvas(path, &config) {
      Ok(c) => c,
      Err(e) => {
        eprintln!("Error loading graph: {}", e);
        process::exit(1);
      }
    },
    None => Canvas::with_starter_nodes(&config),
  };

  let backend: Arc<dyn GenerationBackend> = match model_cmd {
    Some(cmd) => Arc::new(StagedFlow::new(CommandImageModel::new(cmd))),
    None => Arc::new(StagedFlow::new(DescribeModel)),
  };
  let session = Session::spawn(canvas, backend);

  for _ in 0..args.steps {
    let label = match session.pipeline().await {
      Ok(view) => view.action_label(),
      Err(e) => {
        eprintln!("Error: {}", e);
        process::exit(1);
      }
    };
    match session.primary_action().await {
      Ok(stage) if args.json => eprintln!("{} -> stage {}", label, stage),
      Ok(stage) => println!("{} -> stage {}", label, stage),
      Err(e) => {
        eprintln!("{} failed: {}", label, e);
        process::exit(1);
      }
    }
  }

  let view = match session.pipeline().await {
    Ok(v) => v,
    Err(e) => {
      eprintln!("Error: {}", e);
      process::exit(1);
    }
  };
  if args.json {
    match serde_json::to_string_pretty(&view) {
      Ok(s) => println!("{}", s),
      Err(e) => {
        eprintln!("Error encoding state: {}", e);
        process::exit(1);
      }
    }
  } else {
    println!("Stage: {}", view.stage);
    for key in view.result.keys() {
      let artifact = view.result.get(key).unwrap_or_default();
      match DescribeModel::decode(artifact) {
        Some(prompt) => println!("  {}: {}", key, prompt),
        None => println!("  {}: {}", key, artifact),
      }
    }
  }
  let _ = session.shutdown().await;
}
