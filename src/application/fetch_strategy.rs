// Route fetch strategy - decides where a raw definition comes from
use crate::application::dashboard_repository::{DashboardRepository, HomeDashboard};
use crate::application::error::FetchError;
use crate::domain::dashboard::DashboardDefinition;
use crate::domain::location::Location;
use crate::domain::route::DashboardRoute;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Definition(DashboardDefinition),
    /// Navigate to this app-relative URL; nothing to render here
    Redirect(String),
}

#[derive(Clone)]
pub struct RouteFetchStrategy {
    repository: Arc<dyn DashboardRepository>,
    base_path: String,
}

impl RouteFetchStrategy {
    pub fn new(repository: Arc<dyn DashboardRepository>, base_path: impl Into<String>) -> Self {
        Self {
            repository,
            base_path: base_path.into(),
        }
    }

    pub async fn fetch(
        &self,
        uid: Option<&str>,
        route: DashboardRoute,
        folder_uid: Option<&str>,
    ) -> Result<FetchOutcome, FetchError> {
        match route {
            DashboardRoute::New => {
                tracing::debug!("Building new dashboard (folder: {:?})", folder_uid);
                Ok(FetchOutcome::Definition(
                    self.repository.new_dashboard(folder_uid),
                ))
            }
            DashboardRoute::Home => match self.repository.home_dashboard().await? {
                HomeDashboard::Redirect(target) => Ok(FetchOutcome::Redirect(strip_base_path(
                    &self.base_path,
                    &target,
                ))),
                HomeDashboard::Dashboard(mut definition) => {
                    definition.meta.make_read_only();
                    Ok(FetchOutcome::Definition(definition))
                }
            },
            DashboardRoute::Normal | DashboardRoute::Embedded => {
                let uid = uid.ok_or_else(|| FetchError::NotFound("missing dashboard uid".to_string()))?;
                let mut definition = self.repository.dashboard_by_uid(uid).await?;
                if route == DashboardRoute::Embedded {
                    definition.meta.is_embedded = true;
                }
                Ok(FetchOutcome::Definition(definition))
            }
        }
    }
}

/// Make a URL relative to the application root.
///
/// "/grafana/d/abc" with base "/grafana" becomes "/d/abc"; URLs outside the
/// base are only normalised to start with '/'.
pub fn strip_base_path(base_path: &str, url: &str) -> String {
    let base = base_path.trim_end_matches('/');
    let stripped = match url.strip_prefix(base) {
        Some(rest) if !base.is_empty() && (rest.is_empty() || rest.starts_with(['/', '?'])) => rest,
        _ => url,
    };

    if stripped.starts_with('/') {
        stripped.to_string()
    } else {
        format!("/{}", stripped)
    }
}

/// Location to switch to when a dashboard's canonical URL differs from the
/// current path. Query parameters of the current location are kept.
pub fn canonical_location(
    base_path: &str,
    canonical_url: &str,
    current: &Location,
) -> Option<Location> {
    let canonical = Location::parse(&strip_base_path(base_path, canonical_url));
    if canonical.path == current.path {
        None
    } else {
        Some(current.with_path(canonical.path))
    }
}
