// Process-wide page context: active dashboard, URL sync and breadcrumbs
use crate::application::collaborators::{DashboardRegistry, NavigationState, UrlSync};
use crate::domain::dashboard::DashboardScene;
use crate::domain::navigation::NavModel;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct SessionContext {
    active: RwLock<Option<Arc<DashboardScene>>>,
    synced_uid: RwLock<Option<String>>,
    nav: RwLock<NavModel>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// uid of the active dashboard, if any
    pub fn active_uid(&self) -> Option<String> {
        self.active.read().as_ref().and_then(|scene| scene.uid.clone())
    }

    pub fn nav(&self) -> NavModel {
        self.nav.read().clone()
    }
}

impl DashboardRegistry for SessionContext {
    fn set_active(&self, scene: Arc<DashboardScene>) {
        *self.active.write() = Some(scene);
    }

    fn clear(&self) {
        *self.active.write() = None;
        *self.synced_uid.write() = None;
    }
}

impl UrlSync for SessionContext {
    fn init_sync(&self, scene: &Arc<DashboardScene>) {
        tracing::debug!("URL sync started for {:?}", scene.uid);
        *self.synced_uid.write() = scene.uid.clone();
    }
}

impl NavigationState for SessionContext {
    fn update(&self, model: NavModel) {
        *self.nav.write() = model;
    }
}
