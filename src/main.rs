// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use tracing::info;

use groundwork::config::ClusterConfig;
use groundwork::preview::PreviewEngine;
use groundwork::stack::Stack;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting groundwork preview");

    // Load and validate configuration
    let config = ClusterConfig::load()?;
    info!(
        "Configuration loaded: cluster={} project={} location={}",
        config.name, config.project, config.location
    );

    // Declare the stack against the dry-run engine
    let engine = PreviewEngine::new(&config.project);
    let stack = Stack::new(config);
    let exports = stack.provision(&engine, &engine).await?;

    print!("{}", engine.render_plan()?);
    println!();
    print!("{}", exports.render());

    Ok(())
}
