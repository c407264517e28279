//! draft-annotations-api - Draft Annotations Microservice
//!
//! Serves draft annotations for content: stored drafts when they exist,
//! otherwise UPP's published annotations mapped to the canonical predicate
//! vocabulary. Either way the annotations are augmented with concept data.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use draft_annotations_api::config::{CliArgs, ServiceConfig};
use draft_annotations_api::services::{AnnotationsRwClient, ConceptReadClient, UppAnnotationsClient};
use draft_annotations_api::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    let (toml_config, config_source) =
        draft_common::config::load_or_default(args.config.as_deref())?;
    let config = ServiceConfig::resolve(&args, toml_config)?;

    draft_common::logging::init_tracing("draft_annotations_api", &config.logging)?;
    config_source.log();

    info!("Starting draft-annotations-api");
    info!("Port: {}", config.port);
    info!(
        "Version: {} ({}, built {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP")
    );

    let annotations_rw = AnnotationsRwClient::new(
        config.annotations_rw_endpoint.clone(),
        config.request_timeout,
    )
    .context("Failed to create annotations RW client")?;
    info!("Annotations RW: {}", config.annotations_rw_endpoint);

    let upp_annotations = UppAnnotationsClient::new(
        config.upp_annotations_endpoint.clone(),
        config.upp_api_key.clone(),
        config.request_timeout,
    )
    .context("Failed to create UPP annotations client")?;
    info!("UPP annotations: {}", config.upp_annotations_endpoint);

    let concept_read = ConceptReadClient::new(
        config.concept_read_endpoint.clone(),
        config.concept_read_api_key.clone(),
        config.request_timeout,
    )
    .context("Failed to create concept read client")?;
    info!("Concept read: {}", config.concept_read_endpoint);

    let state = AppState::new(
        Arc::new(annotations_rw),
        Arc::new(upp_annotations),
        Arc::new(concept_read),
        config.request_timeout,
    );
    let shutdown = state.shutdown.clone();

    let app = draft_annotations_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Listening on http://0.0.0.0:{}", config.port);
    info!("Health check: http://0.0.0.0:{}/__health", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if tokio::signal::ctrl_c().await.is_err() {
                // No signal handler available: run until killed
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received");
            shutdown.cancel();
        })
        .await?;

    Ok(())
}
