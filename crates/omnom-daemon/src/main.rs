//! omnom-daemon entry point.
//!
//! This file is intentionally thin: it loads config and secrets, sets up
//! tracing, picks the SMS gateway, wires middleware, and starts the HTTP
//! server. Handlers live in `routes.rs`; shared state lives in `state.rs`.

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use omnom_config::{DaemonSettings, LoadedConfig, SmsMode};
use omnom_daemon::{routes, state};
use omnom_orders::NotificationGateway;
use omnom_sms::{MessageBirdGateway, PaperGateway};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "omnom-daemon")]
#[command(about = "OmNomNom Foods order desk", long_about = None)]
struct Cli {
    /// Layered config paths in merge order (base -> local overrides)
    #[arg(long = "config")]
    config_paths: Vec<String>,

    /// Listen address; overrides config and OMNOM_DAEMON_ADDR
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env.local if present (dev convenience). Silent if missing.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    let loaded = if cli.config_paths.is_empty() {
        LoadedConfig::empty()
    } else {
        let paths: Vec<&str> = cli.config_paths.iter().map(String::as_str).collect();
        omnom_config::load_layered_yaml(&paths)?
    };
    let settings = DaemonSettings::from_config_json(&loaded.config_json)?;
    let secrets = omnom_config::resolve_secrets(&loaded.config_json, settings.sms_mode)?;

    info!(
        config_hash = %loaded.config_hash,
        sms_mode = settings.sms_mode.as_str(),
        originator = %settings.originator,
        "config loaded"
    );

    let gateway = build_gateway(&settings, secrets.messagebird_access_key)?;
    let shared = Arc::new(state::AppState::seeded(gateway, settings.originator.clone()));

    let app: Router = routes::with_static_assets(routes::build_router(shared), &settings.static_dir)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let addr = cli
        .addr
        .or_else(bind_addr_from_env)
        .unwrap_or(settings.addr);
    info!("omnom-daemon listening on http://{}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server crashed")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn bind_addr_from_env() -> Option<SocketAddr> {
    std::env::var("OMNOM_DAEMON_ADDR").ok()?.parse().ok()
}

fn build_gateway(
    settings: &DaemonSettings,
    access_key: Option<String>,
) -> Result<Arc<dyn NotificationGateway>> {
    match settings.sms_mode {
        SmsMode::Live => {
            // resolve_secrets already enforced presence in LIVE.
            let key = access_key.context("MessageBird access key missing in LIVE mode")?;
            let gw = match &settings.messagebird_base_url {
                Some(url) => MessageBirdGateway::new_with_base_url(key, url.clone()),
                None => MessageBirdGateway::new(key),
            };
            info!(base_url = gw.base_url(), "sms gateway: messagebird");
            Ok(Arc::new(gw))
        }
        SmsMode::Paper => {
            warn!("sms gateway: paper (messages are logged, not sent)");
            Ok(Arc::new(PaperGateway::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl-c handler failed; shutting down");
    }
    info!("shutdown requested");
}
