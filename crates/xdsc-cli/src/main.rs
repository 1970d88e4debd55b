//! `xdsc` — standalone binary that wires the ambient crates (config,
//! logging, metrics) to the xDS client core.
//!
//! The policy SDK's own execution model is out of scope for this
//! workspace (§1 "Out of scope"), so this binary drives the client against
//! [`xdsc_test::FakePolicyRegistry`] seeded with a trivial logging policy —
//! enough to exercise the full connect/dispatch/reconnect loop end to end
//! without a real policy catalog.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use xdsc_apikeys::{ApiKeyResourceHandler, InMemoryApiKeyStore};
use xdsc_client::{Dispatcher, XdsClient};
use xdsc_kernel::{Kernel, PolicyChainResourceHandler};
use xdsc_lazy::{InMemoryLazyResourceStore, LazyResourceHandler};
use xdsc_policy::BodyMode;
use xdsc_telemetry::{LogConfig, LogFormat, Metrics};
use xdsc_test::{FakePolicyRegistry, TestPolicy};

/// The policy-engine xDS data-plane client.
#[derive(Parser)]
#[command(name = "xdsc")]
#[command(author, version, about = "Policy-engine xDS data-plane client")]
struct Args {
    /// Path to an optional TOML config file, overlaid onto the embedded
    /// defaults and overridden by `XDSC_*` environment variables.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    let log_config = LogConfig::new(level).with_format(LogFormat::Compact);
    if let Err(err) = xdsc_telemetry::setup_logging(&log_config) {
        eprintln!("failed to initialize logging: {err}");
    }

    let resolved = xdsc_config::load(args.config.as_deref()).context("loading configuration")?;
    for (field, source) in &resolved.provenance {
        tracing::debug!(field, source = ?source, "config field resolved");
    }

    let registry = prometheus::Registry::new();
    let metrics = Metrics::new(&registry).context("registering metrics")?;

    let policy_registry: Arc<dyn xdsc_policy::PolicyRegistry> = Arc::new(
        FakePolicyRegistry::new().register(
            "log",
            "1.0.0",
            HashMap::new(),
            Box::new(|| Box::new(TestPolicy::new(BodyMode::None, BodyMode::None))),
        ),
    );

    let kernel = Arc::new(Kernel::new());
    let policy_handler = Arc::new(PolicyChainResourceHandler::new(
        Arc::clone(&kernel),
        policy_registry,
        metrics.clone(),
    ));
    let api_key_store: Arc<dyn xdsc_apikeys::ApiKeyStore> = Arc::new(InMemoryApiKeyStore::new());
    let api_keys_handler = Arc::new(ApiKeyResourceHandler::new(api_key_store));
    let lazy_store: Arc<dyn xdsc_lazy::LazyResourceStore> = Arc::new(InMemoryLazyResourceStore::new());
    let lazy_handler = Arc::new(LazyResourceHandler::new(lazy_store));

    let dispatcher = Dispatcher::new(policy_handler, api_keys_handler, lazy_handler);
    let client = Arc::new(
        XdsClient::new(resolved.connection, dispatcher, metrics).context("building xDS client")?,
    );

    let run_handle = tokio::spawn({
        let client = Arc::clone(&client);
        async move { client.run().await }
    });

    tokio::signal::ctrl_c().await.context("waiting for ctrl-c")?;
    tracing::info!("shutdown signal received, stopping client");
    client.stop();

    run_handle
        .await
        .context("client task panicked")?
        .context("client run loop failed")?;

    Ok(())
}
