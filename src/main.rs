// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
mod cli;
mod terminal;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use docchat_api::{AssistantBackend, HttpBackend, VectorStore};
use docchat_config::{Config, Variant};
use docchat_frontend::{App, Field, UiEvent};
use docchat_render::Role;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Some(Commands::Completions { shell }) = &cli.command {
        cli::print_completions(*shell);
        return Ok(());
    }

    let config = effective_config(&cli)?;

    match cli.command {
        Some(Commands::ShowConfig) => {
            print!("{}", toml::to_string_pretty(&config).context("serializing config")?);
            Ok(())
        }
        Some(Commands::Stores { json }) => list_stores(&config, json).await,
        Some(Commands::Ask { message, html }) => ask(&config, &message, html).await,
        Some(Commands::Search { query, max_results, rewrite_query, html }) => {
            search(config, &query, max_results, rewrite_query, html).await
        }
        Some(Commands::Completions { .. }) => Ok(()),
        None => {
            let app = App::new(backend(&config)?, &config);
            terminal::run(app, config.ui.wrap_width).await
        }
    }
}

/// Config file layers plus command-line overrides.
fn effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = docchat_config::load(cli.config.as_deref())?;
    if let Some(url) = &cli.base_url {
        config.backend.base_url = url.clone();
    }
    if let Some(variant) = cli.variant {
        config.ui.variant = variant;
    }
    if cli.simple {
        config.ui.variant = Variant::Simple;
    }
    Ok(config)
}

fn backend(config: &Config) -> anyhow::Result<Arc<dyn AssistantBackend>> {
    let backend = HttpBackend::from_config(&config.backend)
        .with_context(|| format!("creating client for {}", config.backend.base_url))?;
    Ok(Arc::new(backend))
}

fn render(html: &str, as_html: bool, width: usize) -> String {
    if as_html {
        html.to_string()
    } else {
        terminal::html_to_text(html, width)
    }
}

async fn ask(config: &Config, message: &str, as_html: bool) -> anyhow::Result<()> {
    let mut app = App::new(backend(config)?, config);
    app.boot().await;
    if !app.state.session.is_ready() {
        let reason = app.page.transcript.last().map(|n| n.body.clone()).unwrap_or_default();
        anyhow::bail!("{}", terminal::html_to_text(&reason, config.ui.wrap_width).trim_end());
    }
    app.dispatch(UiEvent::Input { field: Field::MessageInput, value: message.to_string() })
        .await;
    app.send_message().await;

    let last = app.page.transcript.last().context("empty transcript")?;
    let text = render(&last.body, as_html, config.ui.wrap_width);
    if last.role == Role::Error {
        anyhow::bail!("{}", text.trim_end());
    }
    print!("{text}");
    Ok(())
}

async fn search(
    mut config: Config,
    query: &str,
    max_results: Option<u32>,
    rewrite_query: bool,
    as_html: bool,
) -> anyhow::Result<()> {
    config.ui.variant = Variant::Tabbed;
    let mut app = App::new(backend(&config)?, &config);
    app.page.search_input.set(query);
    if let Some(n) = max_results {
        app.page.max_results.set(n.to_string());
    }
    app.page.rewrite_query = rewrite_query || config.search.rewrite_query;
    app.perform_search().await;

    if let Some(alert) = app.page.take_alerts().into_iter().next() {
        anyhow::bail!(alert);
    }
    print!("{}", render(app.page.results.html(), as_html, config.ui.wrap_width));
    Ok(())
}

async fn list_stores(config: &Config, json: bool) -> anyhow::Result<()> {
    let listing = backend(config)?
        .list_vector_stores()
        .await
        .context("listing vector stores")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }
    if listing.vector_stores.is_empty() {
        println!("No vector stores found");
        return Ok(());
    }
    let current = listing.current_vector_store_id.as_deref();
    for store in &listing.vector_stores {
        let mark = if Some(store.id.as_str()) == current { '*' } else { ' ' };
        println!("{mark} {:<24} {:<32} {}", store.id, store.label(), store_details(store));
    }
    Ok(())
}

fn store_details(store: &VectorStore) -> String {
    let mut parts = Vec::new();
    if let Some(counts) = &store.file_counts {
        parts.push(format!("{}/{} files", counts.completed, counts.total));
        if counts.in_progress > 0 {
            parts.push(format!("{} indexing", counts.in_progress));
        }
        if counts.failed > 0 {
            parts.push(format!("{} failed", counts.failed));
        }
    }
    if let Some(bytes) = store.bytes {
        parts.push(format!("{:.1} KiB", bytes as f64 / 1024.0));
    }
    parts.join(", ")
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
