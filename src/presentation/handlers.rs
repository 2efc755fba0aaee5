// HTTP request handlers
use crate::application::dashboard_service::CacheStats;
use crate::application::error::LoadError;
use crate::domain::dashboard::{DashboardDefinition, DashboardScene};
use crate::domain::lifecycle::{LifecyclePhase, LifecycleState, PanelEditorSession};
use crate::domain::location::Location;
use crate::domain::navigation::NavModel;
use crate::domain::route::{CacheKey, LoadOptions};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDashboardQuery {
    pub folder_uid: Option<String>,
}

/// Lifecycle state as served to the page
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub phase: LifecyclePhase,
    pub active_dashboard: Option<String>,
    #[serde(flatten)]
    pub state: LifecycleState,
}

impl PageState {
    fn snapshot(app: &AppState) -> Self {
        let state = app.dashboard_service.state();
        Self {
            phase: state.phase(),
            active_dashboard: app.session.active_uid(),
            state,
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Navigate to `uri` and run a full page load for it.
///
/// A newer navigation aborts the fetch of this one.
async fn navigate_and_load(state: &AppState, uri: &Uri, options: LoadOptions) -> Json<PageState> {
    let registration = state.current_load.supersede();
    state
        .location
        .push(Location::new(uri.path(), uri.query().unwrap_or_default()));
    state
        .dashboard_service
        .load_dashboard(options.with_abort(registration))
        .await;
    Json(PageState::snapshot(state))
}

pub async fn load_home(uri: Uri, State(state): State<Arc<AppState>>) -> Json<PageState> {
    navigate_and_load(&state, &uri, LoadOptions::home()).await
}

pub async fn load_new(
    uri: Uri,
    Query(query): Query<NewDashboardQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<PageState> {
    navigate_and_load(&state, &uri, LoadOptions::new_dashboard(query.folder_uid)).await
}

pub async fn load_dashboard(
    Path(uid): Path<String>,
    uri: Uri,
    State(state): State<Arc<AppState>>,
) -> Json<PageState> {
    navigate_and_load(&state, &uri, LoadOptions::normal(uid)).await
}

pub async fn load_embedded(
    Path(uid): Path<String>,
    uri: Uri,
    State(state): State<Arc<AppState>>,
) -> Json<PageState> {
    navigate_and_load(&state, &uri, LoadOptions::embedded(uid)).await
}

pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<PageState> {
    Json(PageState::snapshot(&state))
}

pub async fn clear_state(State(state): State<Arc<AppState>>) -> StatusCode {
    state.dashboard_service.clear_state();
    StatusCode::NO_CONTENT
}

/// Raw definition, served from the definition cache when fresh
pub async fn get_definition(
    Path(uid): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Arc<DashboardDefinition>>, StatusCode> {
    match state
        .dashboard_service
        .fetch_definition(LoadOptions::normal(uid))
        .await
    {
        Ok(Some(definition)) => Ok(Json(definition)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(load_error_status(&e)),
    }
}

/// Seed the definition cache, e.g. right after the dashboard was saved
pub async fn put_definition(
    Path(uid): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(definition): Json<DashboardDefinition>,
) -> StatusCode {
    state
        .dashboard_service
        .set_definition_cache(CacheKey::from(uid.as_str()), definition);
    StatusCode::NO_CONTENT
}

pub async fn get_scene(
    Path(uid): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Arc<DashboardScene>>, StatusCode> {
    state
        .dashboard_service
        .get_from_cache(&uid)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn remove_scene(
    Path(uid): Path<String>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    if state.dashboard_service.remove_scene_cache(&uid) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

pub async fn clear_scenes(State(state): State<Arc<AppState>>) -> StatusCode {
    state.dashboard_service.clear_scene_cache();
    StatusCode::NO_CONTENT
}

pub async fn remove_definition(
    Path(uid): Path<String>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    if state
        .dashboard_service
        .remove_definition_cache(&CacheKey::from(uid.as_str()))
    {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

pub async fn clear_definitions(State(state): State<Arc<AppState>>) -> StatusCode {
    state.dashboard_service.clear_definition_cache();
    StatusCode::NO_CONTENT
}

pub async fn cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStats> {
    Json(state.dashboard_service.cache_stats())
}

pub async fn open_panel_editor(
    Path(panel_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<PanelEditorSession>, (StatusCode, String)> {
    state
        .dashboard_service
        .open_panel_editor(panel_id)
        .map(Json)
        .map_err(|e| (StatusCode::CONFLICT, e.to_string()))
}

pub async fn close_panel_editor(State(state): State<Arc<AppState>>) -> StatusCode {
    state.dashboard_service.close_panel_editor();
    StatusCode::NO_CONTENT
}

pub async fn get_nav(State(state): State<Arc<AppState>>) -> Json<NavModel> {
    Json(state.session.nav())
}

fn load_error_status(err: &LoadError) -> StatusCode {
    match err {
        LoadError::NotFound => StatusCode::NOT_FOUND,
        LoadError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        LoadError::Transport(detail) => {
            tracing::error!("Error fetching definition: {}", detail);
            StatusCode::BAD_GATEWAY
        }
    }
}
