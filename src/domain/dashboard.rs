// Dashboard domain models
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Server-side metadata that travels with a dashboard definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMeta {
    #[serde(default)]
    pub folder_uid: Option<String>,
    #[serde(default)]
    pub folder_title: Option<String>,
    /// Canonical URL of the dashboard (may include the application base path)
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub can_save: bool,
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub can_share: bool,
    #[serde(default)]
    pub can_star: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_embedded: bool,
}

impl DashboardMeta {
    /// Strip every capability that would let a viewer modify or publish the dashboard
    pub fn make_read_only(&mut self) {
        self.can_save = false;
        self.can_share = false;
        self.can_star = false;
    }
}

/// Raw dashboard as received from the backend: content plus metadata.
///
/// Definitions are never patched after they have been stored; a newer
/// fetch replaces the whole value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDefinition {
    #[serde(default)]
    pub dashboard: Value,
    #[serde(default)]
    pub meta: DashboardMeta,
}

impl DashboardDefinition {
    pub fn new(dashboard: Value, meta: DashboardMeta) -> Self {
        Self { dashboard, meta }
    }

    /// An unsaved dashboard, optionally placed in a folder
    pub fn blank(folder_uid: Option<&str>) -> Self {
        let meta = DashboardMeta {
            folder_uid: folder_uid.map(str::to_string),
            can_save: true,
            can_edit: true,
            can_share: false,
            can_star: false,
            is_new: true,
            ..DashboardMeta::default()
        };

        Self::new(
            json!({
                "title": "New dashboard",
                "panels": [],
                "schemaVersion": 39,
            }),
            meta,
        )
    }

    pub fn uid(&self) -> Option<&str> {
        self.dashboard
            .get("uid")
            .and_then(Value::as_str)
            .filter(|uid| !uid.is_empty())
    }

    pub fn title(&self) -> Option<&str> {
        self.dashboard.get("title").and_then(Value::as_str)
    }

    pub fn version(&self) -> Option<i64> {
        self.dashboard.get("version").and_then(Value::as_i64)
    }

    /// A response without a dashboard object carries nothing to render
    pub fn has_content(&self) -> bool {
        self.dashboard.is_object()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenePanel {
    pub id: i64,
    pub title: String,
    pub kind: String,
}

/// Render-ready dashboard built from exactly one definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardScene {
    pub uid: Option<String>,
    pub title: String,
    pub version: Option<i64>,
    pub panels: Vec<ScenePanel>,
    pub meta: DashboardMeta,
}

impl DashboardScene {
    pub fn panel(&self, id: i64) -> Option<&ScenePanel> {
        self.panels.iter().find(|panel| panel.id == id)
    }
}
