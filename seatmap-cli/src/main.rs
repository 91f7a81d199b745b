use anyhow::Context;
use seatmap_cli::{Config, Menu};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they stay out of the menu on stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seatmap_cli=info,seatmap_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::load().context("Failed to load config")?;
    let mut inventory = config
        .build_inventory()
        .context("Invalid seat map configuration")?;
    tracing::info!(
        rows = inventory.rows(),
        policy = ?config.references,
        "Starting seat booking menu"
    );

    let stdin = io::stdin();
    let mut menu = Menu::new(stdin.lock(), io::stdout(), &config);
    menu.run(&mut inventory)
}
