//! Map, unmap or remove the routes of a host for an application.
//!
//! ```sh
//! cargo run --example route_mapping -- unmap my-app my-host --org pcfdev-org
//! ```
use chaoscf::{actions, api::Scope, config::CfConfig, Client, Config};
use clap::{Parser, Subcommand};
use tracing::*;

#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,
    #[arg(long, short, global = true)]
    org: Option<String>,
    #[arg(long, short, global = true)]
    space: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Map the routes of the host to the app
    Map { app: String, host: String },
    /// Unmap the routes of the host from the app
    Unmap { app: String, host: String },
    /// Remove the routes of the host bound to the app
    Remove { app: String, host: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let cf = CfConfig::from_cf_home()?;
    let scope = Scope::from_names(args.org.as_deref().or(cf.targeted_org()), args.space.as_deref());
    let client = Client::connect(Config::from_cf_home()?).await?;

    match &args.command {
        Command::Map { app, host } => {
            let mapped = actions::map_route_to_app(&client, app, host, &scope).await?;
            info!("mapped {} route(s) of {} to {}", mapped.len(), host, app);
        }
        Command::Unmap { app, host } => {
            for route in actions::unmap_route_from_app(&client, app, host, &scope).await? {
                info!("unmapped route {} from {}", route.guid(), app);
            }
        }
        Command::Remove { app, host } => {
            for route in actions::remove_routes_from_app(&client, app, host, &scope).await? {
                info!("removed route {} from {}", route.guid(), app);
            }
        }
    }
    Ok(())
}
