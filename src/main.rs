// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Context;
use getres::config::load_and_validate_config;
use getres::{Getres, ProgressEvent, ProgressKind};
use std::env;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <manifest.yaml>", args[0]);
        eprintln!("Example: {} configs/assets.yaml > assets.json", args[0]);
        std::process::exit(1);
    }

    if let Err(e) = run(&args[1]).await {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(manifest: &str) -> anyhow::Result<()> {
    let config = load_and_validate_config(manifest)
        .with_context(|| format!("Failed to load manifest {}", manifest))?;
    let tree = config.resource_tree()?;
    let getres = Getres::from_config(&config)?;

    eprintln!("📦 Loading resources from {}", manifest);
    let start = Instant::now();
    let resources = getres
        .load_with_progress(tree, |event: &ProgressEvent| report(event))
        .await?;

    println!("{}", serde_json::to_string_pretty(&resources)?);
    eprintln!("✅ Done in {:?}", start.elapsed());
    Ok(())
}

/// One progress line per event on stderr, so stdout stays pure JSON
fn report(event: &ProgressEvent) {
    match event.kind {
        ProgressKind::Started => eprintln!("🚀 {} resources queued", event.total),
        ProgressKind::Loaded => eprintln!(
            "   [{:>3}/{}] {:>5.1}% {}",
            event.processed,
            event.total,
            event.percent,
            event.src.as_ref().map(ToString::to_string).unwrap_or_default()
        ),
        ProgressKind::Done => eprintln!("🏁 {} of {} loaded", event.processed, event.total),
    }
}
