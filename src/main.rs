// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::clock::SystemClock;
use crate::application::dashboard_service::{DashboardCollaborators, DashboardService};
use crate::infrastructure::config::load_loader_config;
use crate::infrastructure::http_repository::HttpDashboardRepository;
use crate::infrastructure::location::InMemoryLocation;
use crate::infrastructure::scene_transformer::JsonSceneTransformer;
use crate::infrastructure::session_context::SessionContext;
use crate::presentation::app_state::{AppState, CurrentLoad};
use crate::presentation::handlers::{
    cache_stats, clear_definitions, clear_scenes, clear_state, close_panel_editor,
    get_definition, get_nav, get_scene, get_state, health_check, load_dashboard, load_embedded,
    load_home, load_new, open_panel_editor, put_definition, remove_definition, remove_scene,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_loader_config().context("Failed to load dashboard loader configuration")?;

    // Create adapters (infrastructure layer)
    let repository = Arc::new(HttpDashboardRepository::new(&config.backend));
    let location = Arc::new(InMemoryLocation::new());
    let session = Arc::new(SessionContext::new());

    // Create the load service (application layer)
    let collaborators = DashboardCollaborators {
        repository: repository.clone(),
        folders: repository,
        location: location.clone(),
        transformer: Arc::new(JsonSceneTransformer),
        url_sync: session.clone(),
        registry: session.clone(),
        navigation: session.clone(),
    };
    let dashboard_service = Arc::new(DashboardService::new(
        collaborators,
        config.loader_settings(),
        Arc::new(SystemClock),
    ));

    // Trace lifecycle transitions
    let mut lifecycle = dashboard_service.subscribe();
    tokio::spawn(async move {
        while lifecycle.changed().await.is_ok() {
            let phase = lifecycle.borrow_and_update().phase();
            tracing::debug!("Dashboard lifecycle: {:?}", phase);
        }
    });

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        location,
        session,
        current_load: CurrentLoad::default(),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboards/home", get(load_home))
        .route("/dashboards/new", get(load_new))
        .route("/d/:uid", get(load_dashboard))
        .route("/d-embed/:uid", get(load_embedded))
        .route("/state", get(get_state).delete(clear_state))
        .route("/cache", get(cache_stats))
        .route("/definitions", delete(clear_definitions))
        .route(
            "/definitions/:uid",
            get(get_definition)
                .put(put_definition)
                .delete(remove_definition),
        )
        .route("/scenes", delete(clear_scenes))
        .route("/scenes/:uid", get(get_scene).delete(remove_scene))
        .route("/panel-editor", delete(close_panel_editor))
        .route("/panel-editor/:panel_id", post(open_panel_editor))
        .route("/nav", get(get_nav))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.server.listen_addr))?;
    tracing::info!("Starting dashboard-loader on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
