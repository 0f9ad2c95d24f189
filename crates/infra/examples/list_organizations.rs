//! Example: Listing organizations and cleaning up a registry module
//!
//! Loads configuration from `TFE_*` environment variables (or a `tfe.json` /
//! `tfe.toml` file), prints every organization visible to the token, and
//! optionally deletes one registry module.
//!
//! # Setup
//!
//! 1. Export a token: ```bash export TFE_TOKEN=... ```
//!
//! 2. Optionally point at a private install: ```bash export
//!    TFE_ADDRESS=https://tfe.example.com ```
//!
//! 3. Run this example: ```bash cargo run -p tfe-infra --example
//!    list_organizations [org module provider] ```

use anyhow::Context;
use tfe_infra::{config, TfeClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = config::load().context("failed to load TFE configuration")?;
    let tfe = TfeClient::from_config(config).context("failed to build TFE client")?;

    println!("Organizations at {}", tfe.api().base_url());
    for org in tfe.organizations().list_sorted().await? {
        println!(
            "  {:<30} plan={:<8} email={}",
            org.name,
            org.enterprise_plan.as_deref().unwrap_or("-"),
            org.email.as_deref().unwrap_or("-")
        );
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [organization, module, provider] = args.as_slice() {
        tfe.registry_modules().delete(organization, module, provider).await?;
        println!("Registry module {}/{}/{} is gone", organization, module, provider);
    }

    Ok(())
}
