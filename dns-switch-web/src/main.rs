//! DNS Switch web server
//!
//! Serves the status page and the toggle API for the configured Alidns records.

mod config;
mod error;
mod handlers;
mod logging;
mod view;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;

use dns_switch_core::{ServiceContext, StatusService};
use dns_switch_provider::{AliyunProvider, NoopNotifier, Notifier, WebhookNotifier};

use crate::config::{AppConfig, Credentials};
use crate::handlers::AppState;

/// 配置文件路径环境变量
const CONFIG_PATH_ENV: &str = "DNS_SWITCH_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> ExitCode {
    let path = std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    let config = match AppConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // guard 必须存活到进程结束，否则文件日志丢失
    let _guard = match logging::init(&config.log) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Loaded config from {}", path.display());

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Server error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let credentials = Credentials::from_env()?;
    tracing::info!("Using access key {:?}", credentials);

    let catalog = config.catalog()?;

    let provider = AliyunProvider::builder(credentials.access_key_id, credentials.access_key_secret)
        .endpoint(config.provider.endpoint.clone())
        .connect_timeout(Duration::from_secs(config.provider.connect_timeout_secs))
        .request_timeout(Duration::from_secs(config.provider.request_timeout_secs))
        .build()
        .context("failed to create Alidns client")?;

    let notifier: Arc<dyn Notifier> = match &config.notifier.webhook_url {
        Some(url) => Arc::new(
            WebhookNotifier::builder(url.clone())
                .request_timeout(Duration::from_secs(config.notifier.timeout_secs))
                .build()
                .context("failed to create webhook notifier")?,
        ),
        None => {
            tracing::warn!("No notifier.webhook_url configured, notifications disabled");
            Arc::new(NoopNotifier)
        }
    };

    let ctx = Arc::new(
        ServiceContext::new(catalog, Arc::new(provider), notifier)
            .with_settings(config.service_settings()),
    );

    // 启动时打印一次全部记录状态
    let snapshot = StatusService::new(Arc::clone(&ctx)).snapshot().await;
    for (group, results) in snapshot.groups() {
        for r in results {
            tracing::info!("[{group}] {} ({}) -> {}", r.name, r.record_id, r.status);
        }
    }

    let state = web::Data::new(AppState::new(ctx));
    let bind = (config.server.host.clone(), config.server.port);
    let workers = config.server.workers();

    tracing::info!(
        "Starting server on {}:{} with {workers} workers",
        bind.0,
        bind.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(handlers::configure)
    })
    .workers(workers)
    .bind(bind)
    .context("failed to bind server address")?
    .run()
    .await
    .context("server stopped unexpectedly")
}
