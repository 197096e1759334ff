//! ALITECS ADR plugin — Main Entry Point
//!
//! The network server spawns this process and exchanges length-prefixed
//! frames with it over stdin/stdout. stderr carries the log.
//!
//! ```text
//! ┌──────────────────┐  stdin   ┌──────────────────────────────┐
//! │  Network server  │ ───────▶ │ PluginServer ─▶ AlitecsHandler│
//! │  (host)          │ ◀─────── │              ◀─ adr::decide   │
//! └──────────────────┘  stdout  └──────────────────────────────┘
//! ```
//!
//! Usage: `alitecs-adr [config.json]`
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::info;

use alitecs_adr::config::PluginConfig;
use alitecs_adr::handler::AlitecsHandler;
use alitecs_adr::plugin::server::PluginServer;

fn load_config() -> Result<PluginConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(PluginConfig::default());
    };

    let bytes = std::fs::read(&path).with_context(|| format!("reading config {path}"))?;
    PluginConfig::from_json(&bytes).with_context(|| format!("loading config {path}"))
}

fn main() -> Result<()> {
    // ── 1. Config (before logging, it carries the default level) ──
    let config = load_config()?;

    // ── 2. Logging to stderr; RUST_LOG overrides the config level ──
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    info!("Starting ADR plugin v{}", env!("CARGO_PKG_VERSION"));

    // ── 3. Serve until the host closes stdin ──
    let handler = AlitecsHandler::new(&config);
    let mut server = PluginServer::new(handler, &config);

    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    let stats = server.serve(stdin, stdout).context("plugin transport failed")?;

    info!(
        "ADR plugin exiting after {} decisions ({} errors)",
        stats.decisions, stats.errors
    );
    Ok(())
}
