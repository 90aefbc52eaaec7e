//! Print the discovery document of the extension.
//!
//! Needs no Cloud Foundry access.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let discovery = chaoscf::discover();
    println!("{}", serde_json::to_string_pretty(&discovery)?);
    Ok(())
}
