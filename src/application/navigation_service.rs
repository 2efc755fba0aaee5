// Navigation service - Keeps breadcrumbs in sync with the loaded dashboard
use crate::application::collaborators::NavigationState;
use crate::application::dashboard_repository::FolderRepository;
use crate::domain::dashboard::DashboardDefinition;
use crate::domain::navigation::build_nav_model;
use std::sync::Arc;

#[derive(Clone)]
pub struct NavigationService {
    folders: Arc<dyn FolderRepository>,
    state: Arc<dyn NavigationState>,
    base_path: String,
}

impl NavigationService {
    pub fn new(
        folders: Arc<dyn FolderRepository>,
        state: Arc<dyn NavigationState>,
        base_path: impl Into<String>,
    ) -> Self {
        Self {
            folders,
            state,
            base_path: base_path.into(),
        }
    }

    /// Best effort: a failed folder lookup is logged and otherwise ignored
    pub async fn update_nav_model(&self, definition: &DashboardDefinition) {
        let Some(folder_uid) = definition.meta.folder_uid.as_deref() else {
            return;
        };

        match self.folders.folder_ancestry(folder_uid).await {
            Ok(ancestry) => {
                tracing::debug!(
                    "Updating nav model for folder {} ({} levels)",
                    folder_uid,
                    ancestry.len()
                );
                self.state
                    .update(build_nav_model(&self.base_path, definition, &ancestry));
            }
            Err(e) => {
                tracing::warn!("Failed to load folder {} for nav model: {}", folder_uid, e);
            }
        }
    }
}
