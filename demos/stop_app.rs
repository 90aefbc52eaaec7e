//! Stop an application, then start it again after a pause.
//!
//! Reuses the session of `cf login` and defaults to the org and space it targets.
use std::time::Duration;

use chaoscf::{actions, api::Scope, config::CfConfig, Client, Config};
use clap::Parser;
use tracing::*;

#[derive(Parser)]
struct Args {
    /// Name of the app to stop
    app: String,
    #[arg(long, short)]
    org: Option<String>,
    #[arg(long, short)]
    space: Option<String>,
    /// Seconds to wait before starting the app again, it stays stopped when not given
    #[arg(long)]
    restart_after: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let cf = CfConfig::from_cf_home()?;
    let scope = Scope::from_names(
        args.org.as_deref().or(cf.targeted_org()),
        args.space.as_deref().or(cf.targeted_space()),
    );
    let client = Client::connect(Config::from_cf_home()?).await?;

    let app = actions::stop_app(&client, &args.app, &scope).await?;
    info!("{} is now {:?}", app.entity.name, app.entity.state);

    if let Some(secs) = args.restart_after {
        tokio::time::sleep(Duration::from_secs(secs)).await;
        let app = actions::start_app(&client, &args.app, &scope).await?;
        info!("{} is now {:?}", app.entity.name, app.entity.state);
    }
    Ok(())
}
