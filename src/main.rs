use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rss_exporter::cli::{Cli, DescribeFormat, LogFormat};
use rss_exporter::config;
use rss_exporter::Exporter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli);

    info!("Using configuration file: {:?}", cli.config_file);
    let config = match config::load_config(&cli.config_file) {
        Ok(cfg) => {
            info!(
                "Configuration loaded successfully: {} service(s)",
                cfg.services.len()
            );
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(anyhow::anyhow!("Configuration error: {}", e));
        }
    };

    let mut exporter = Exporter::new(&config).context("Failed to build exporter")?;

    if cli.describe {
        let descriptions = exporter.describe();
        match cli.describe_format {
            DescribeFormat::Markdown => print!("{}", descriptions.to_markdown()),
            DescribeFormat::Jira => print!("{}", descriptions.to_jira_markup()),
        }
        return Ok(());
    }

    let addr = cli
        .listen_addr()
        .context("--web.listen-port is required")?;

    // First scrapes should already see every feed that answers
    let published = exporter.run_all_once().await;
    info!("Initial poll published {} feed(s)", published);

    let server = exporter
        .spawn_server(addr, &cli.telemetry_path)
        .await
        .context("Failed to start HTTP server")?;
    let has_feeds = exporter.feed_count() > 0;
    exporter.start();

    tokio::select! {
        result = server => {
            match result {
                Ok(Ok(())) => info!("HTTP server stopped"),
                Ok(Err(e)) => error!("HTTP server failed: {}", e),
                Err(e) => error!("HTTP server task ended unexpectedly: {}", e),
            }
        }
        _ = exporter.wait(), if has_feeds => {
            error!("All feed tasks stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    exporter.shutdown();
    Ok(())
}

fn init_logging(cli: &Cli) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.as_str().into());

    match cli.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}
