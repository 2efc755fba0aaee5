// Observable load state of the dashboard page
use super::dashboard::DashboardScene;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelEditorSession {
    pub dashboard_uid: Option<String>,
    pub panel_id: i64,
    pub opened_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecyclePhase {
    Idle,
    Loading,
    Loaded,
    Errored,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleState {
    pub scene: Option<Arc<DashboardScene>>,
    pub panel_editor: Option<PanelEditorSession>,
    pub is_loading: bool,
    pub load_error: Option<String>,
}

impl LifecycleState {
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    pub fn loaded(scene: Arc<DashboardScene>) -> Self {
        Self {
            scene: Some(scene),
            ..Self::default()
        }
    }

    pub fn errored(message: impl Into<String>) -> Self {
        Self {
            load_error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        if self.is_loading {
            LifecyclePhase::Loading
        } else if self.load_error.is_some() {
            LifecyclePhase::Errored
        } else if self.scene.is_some() {
            LifecyclePhase::Loaded
        } else {
            LifecyclePhase::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::DashboardMeta;

    fn scene() -> Arc<DashboardScene> {
        Arc::new(DashboardScene {
            uid: Some("abc".to_string()),
            title: "Latency".to_string(),
            version: None,
            panels: Vec::new(),
            meta: DashboardMeta::default(),
        })
    }

    #[test]
    fn test_phases() {
        assert_eq!(LifecycleState::default().phase(), LifecyclePhase::Idle);
        assert_eq!(LifecycleState::loading().phase(), LifecyclePhase::Loading);
        assert_eq!(LifecycleState::loaded(scene()).phase(), LifecyclePhase::Loaded);
        assert_eq!(LifecycleState::errored("boom").phase(), LifecyclePhase::Errored);
    }

    #[test]
    fn test_states_are_exclusive() {
        let loading = LifecycleState::loading();
        assert!(loading.scene.is_none() && loading.load_error.is_none());

        let loaded = LifecycleState::loaded(scene());
        assert!(!loaded.is_loading && loaded.load_error.is_none());

        let errored = LifecycleState::errored("Dashboard not found");
        assert!(!errored.is_loading && errored.scene.is_none());
    }
}
