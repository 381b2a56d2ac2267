//! Superchain Records CLI
//!
//! Read-side inspection tool: resolver checks, record fetches and changeset
//! previews. Write flows (migration, publish) go through a host wallet and
//! live in the `superrecords-flows` library.

mod cmd;
mod errors;
mod settings;

use cmd::{Commands, TopLevel};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let TopLevel { cmd } = argh::from_env();

    let config = settings::load().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });

    let result = match cmd {
        Commands::Check(args) => cmd::check::check(args, config).await,
        Commands::Fetch(args) => cmd::fetch::fetch(args, config).await,
        Commands::Diff(args) => cmd::diff::diff(args, config).await,
    };

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
