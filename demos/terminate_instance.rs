//! Terminate one instance of an application, a random one unless an index is given.
use chaoscf::{actions, api::Scope, probes, Client, Config};
use clap::Parser;
use tracing::*;

#[derive(Parser)]
struct Args {
    app: String,
    #[arg(long, short)]
    index: Option<u32>,
    #[arg(long, short)]
    org: Option<String>,
    #[arg(long, short)]
    space: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let client = Client::connect(Config::from_cf_home()?).await?;
    let scope = Scope::from_names(args.org.as_deref(), args.space.as_deref());

    let instances = probes::get_app_instances(&client, &args.app, &scope).await?;
    for (index, instance) in &instances {
        info!("instance {}: {} (up {:?}s)", index, instance.state, instance.uptime);
    }

    let index = match args.index {
        Some(index) => {
            actions::terminate_app_instance(&client, &args.app, index, &scope).await?;
            index
        }
        None => actions::terminate_some_random_instance(&client, &args.app, &scope).await?,
    };
    warn!("terminated instance {} of {}", index, args.app);
    Ok(())
}
