// Repository traits for dashboard and folder data access
use crate::application::error::FetchError;
use crate::domain::dashboard::DashboardDefinition;
use crate::domain::navigation::FolderCrumb;
use async_trait::async_trait;

/// Response of the home dashboard endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum HomeDashboard {
    Dashboard(DashboardDefinition),
    /// The home dashboard lives elsewhere; navigate to this URL instead
    Redirect(String),
}

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Build an unsaved dashboard locally, no network involved
    fn new_dashboard(&self, folder_uid: Option<&str>) -> DashboardDefinition {
        DashboardDefinition::blank(folder_uid)
    }

    /// Fetch the configured home dashboard
    async fn home_dashboard(&self) -> Result<HomeDashboard, FetchError>;

    /// Fetch a dashboard by uid
    async fn dashboard_by_uid(&self, uid: &str) -> Result<DashboardDefinition, FetchError>;
}

#[async_trait]
pub trait FolderRepository: Send + Sync {
    /// Folder ancestry, root first, ending with the folder itself
    async fn folder_ancestry(&self, folder_uid: &str) -> Result<Vec<FolderCrumb>, FetchError>;
}
