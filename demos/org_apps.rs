//! Stop or start every application of an organization.
use chaoscf::{actions, Client, Config};
use clap::{Parser, Subcommand};
use tracing::*;

#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,
    /// Organization owning the apps
    #[arg(long, short, global = true, default_value = "pcfdev-org")]
    org: String,
}

#[derive(Subcommand)]
enum Command {
    Stop,
    Start,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let client = Client::connect(Config::from_cf_home()?).await?;

    let apps = match args.command {
        Command::Stop => actions::stop_all_apps(&client, &args.org).await?,
        Command::Start => actions::start_all_apps(&client, &args.org).await?,
    };
    for app in &apps {
        info!("{} ({}) is {:?}", app.entity.name, app.guid(), app.entity.state);
    }
    info!("{} apps updated in {}", apps.len(), args.org);
    Ok(())
}
