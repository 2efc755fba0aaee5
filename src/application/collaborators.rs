// Seams to the page environment the load service drives
use crate::domain::dashboard::{DashboardDefinition, DashboardScene};
use crate::domain::location::Location;
use crate::domain::navigation::NavModel;
use std::sync::Arc;

pub trait LocationService: Send + Sync {
    fn location(&self) -> Location;

    /// Swap the current location without adding a history entry
    fn replace(&self, location: Location);
}

/// Turns a definition into a render-ready scene; must be deterministic
pub trait SceneTransformer: Send + Sync {
    fn transform(&self, definition: &DashboardDefinition) -> DashboardScene;
}

pub trait UrlSync: Send + Sync {
    fn init_sync(&self, scene: &Arc<DashboardScene>);
}

/// Process-wide "current dashboard" registry
pub trait DashboardRegistry: Send + Sync {
    fn set_active(&self, scene: Arc<DashboardScene>);
    fn clear(&self);
}

pub trait NavigationState: Send + Sync {
    fn update(&self, model: NavModel);
}
