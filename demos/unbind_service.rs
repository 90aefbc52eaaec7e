//! Unbind a service from an application.
use chaoscf::{actions, api::Scope, Client, Config};
use clap::Parser;

#[derive(Parser)]
struct Args {
    app: String,
    /// Name of the service binding
    bind: String,
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
    actions::unbind_service_from_app(&client, &args.app, &args.bind, &scope).await?;
    tracing::info!("unbound {} from {}", args.bind, args.app);
    Ok(())
}
