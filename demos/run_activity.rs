//! Run any exported activity the way a chaos host would.
//!
//! Configuration and secrets are read from JSON files holding the `cf_*` keys:
//!
//! ```sh
//! cargo run --example run_activity -- get_app_stats '{"app_name": "my-app"}' \
//!     --configuration configuration.json --secrets secrets.json
//! ```
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_json::{Map, Value};

#[derive(Parser)]
struct Args {
    /// Name of the action or probe
    name: String,
    /// Arguments as a JSON object
    #[arg(default_value = "{}")]
    arguments: String,
    #[arg(long)]
    configuration: PathBuf,
    #[arg(long)]
    secrets: Option<PathBuf>,
}

fn read_map(path: &PathBuf) -> anyhow::Result<Map<String, Value>> {
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("{} is not a JSON object", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let configuration = read_map(&args.configuration)?;
    let secrets = match &args.secrets {
        Some(path) => read_map(path)?,
        None => Map::new(),
    };
    let arguments: Value = serde_json::from_str(&args.arguments).context("arguments are not JSON")?;

    let output = chaoscf::run_activity(&args.name, arguments, &configuration, &secrets).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
