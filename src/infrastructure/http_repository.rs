// HTTP repository implementation against a Grafana-compatible API
use crate::application::dashboard_repository::{
    DashboardRepository, FolderRepository, HomeDashboard,
};
use crate::application::error::FetchError;
use crate::domain::dashboard::{DashboardDefinition, DashboardMeta};
use crate::domain::navigation::FolderCrumb;
use crate::infrastructure::config::{BackendSettings, prepare_path};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct HttpDashboardRepository {
    client: reqwest::Client,
    host: String,
    token: Option<String>,
    home_path: String,
    dashboard_path: String,
    folder_path: String,
}

#[derive(Debug, Deserialize)]
struct HomeResponse {
    #[serde(default, rename = "redirectUri")]
    redirect_uri: Option<String>,
    #[serde(default)]
    dashboard: Option<serde_json::Value>,
    #[serde(default)]
    meta: DashboardMeta,
}

#[derive(Debug, Deserialize)]
struct FolderResponse {
    uid: String,
    title: String,
    #[serde(default)]
    parents: Vec<FolderCrumb>,
}

impl HttpDashboardRepository {
    pub fn new(settings: &BackendSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: settings.host.trim_end_matches('/').to_string(),
            token: settings.token.clone().filter(|token| !token.is_empty()),
            home_path: settings.home_path.clone(),
            dashboard_path: settings.dashboard_path.clone(),
            folder_path: settings.folder_path.clone(),
        }
    }

    fn build_url(&self, template: &str, uid: Option<&str>) -> String {
        let mut vars = HashMap::new();
        if let Some(uid) = uid {
            vars.insert("uid".to_string(), uid.to_string());
        }
        format!("{}{}", self.host, prepare_path(template, &vars))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        tracing::debug!("GET {}", url);

        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Transport(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Transport(format!(
                "{} returned {}: {}",
                url, status, body
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::InvalidResponse(format!("{}: {}", url, e)))
    }
}

#[async_trait]
impl DashboardRepository for HttpDashboardRepository {
    async fn home_dashboard(&self) -> Result<HomeDashboard, FetchError> {
        let url = self.build_url(&self.home_path, None);
        let response: HomeResponse = self.get_json(&url).await?;
        home_from_response(response)
    }

    async fn dashboard_by_uid(&self, uid: &str) -> Result<DashboardDefinition, FetchError> {
        let url = self.build_url(&self.dashboard_path, Some(uid));
        self.get_json(&url).await
    }
}

#[async_trait]
impl FolderRepository for HttpDashboardRepository {
    async fn folder_ancestry(&self, folder_uid: &str) -> Result<Vec<FolderCrumb>, FetchError> {
        let url = self.build_url(&self.folder_path, Some(folder_uid));
        let folder: FolderResponse = self.get_json(&url).await?;
        Ok(folder_ancestry(folder))
    }
}

fn home_from_response(response: HomeResponse) -> Result<HomeDashboard, FetchError> {
    if let Some(target) = response.redirect_uri.filter(|uri| !uri.is_empty()) {
        return Ok(HomeDashboard::Redirect(target));
    }

    match response.dashboard {
        Some(dashboard) => Ok(HomeDashboard::Dashboard(DashboardDefinition::new(
            dashboard,
            response.meta,
        ))),
        None => Err(FetchError::InvalidResponse(
            "home response has neither dashboard nor redirectUri".to_string(),
        )),
    }
}

/// Parents come back root first; the folder itself closes the chain
fn folder_ancestry(folder: FolderResponse) -> Vec<FolderCrumb> {
    let mut ancestry = folder.parents;
    ancestry.push(FolderCrumb {
        uid: folder.uid,
        title: folder.title,
    });
    ancestry
}
