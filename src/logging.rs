use anyhow::Context;
use chrono::Utc;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::{fmt, layer::SubscriberExt, Layer, Registry};

pub fn setup_logging(log_dir: &Path, json: bool) -> Result<(), anyhow::Error> {
    fs::create_dir_all(log_dir).context("Failed to create logs directory")?;

    // Daily rotating file appender
    let file_appender = rolling::daily(log_dir, "audit.log");

    // Only the audit target reaches the file
    let target_filter = Targets::new().with_target("audit", LevelFilter::TRACE);

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(target_filter);

    // RUST_LOG uses the `target=level` directive syntax
    let stdout_filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|directives| directives.parse::<Targets>().ok())
        .unwrap_or_else(|| Targets::new().with_default(LevelFilter::INFO));

    let stdout_layer = if json {
        fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .with_filter(stdout_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_filter(stdout_filter)
            .boxed()
    };

    let subscriber = Registry::default().with(stdout_layer).with(file_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set global default subscriber")?;

    Ok(())
}

pub fn log_to_file(method: &str, path: &str, body: Option<&Value>) {
    let timestamp = Utc::now().to_rfc3339();

    match body {
        Some(b) => {
            info!(
                target: "audit",
                method = method,
                uri = path,
                body = %b,
                "{} {} {} {}", timestamp, method, path, b
            );
        }
        None => {
            info!(
                target: "audit",
                method = method,
                uri = path,
                "{} {} {}", timestamp, method, path
            );
        }
    }
}
