// Mapper to convert dashboard definitions into scenes
use crate::application::collaborators::SceneTransformer;
use crate::domain::dashboard::{DashboardDefinition, DashboardScene, ScenePanel};
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSceneTransformer;

impl SceneTransformer for JsonSceneTransformer {
    fn transform(&self, definition: &DashboardDefinition) -> DashboardScene {
        let raw_panels = flatten_panels(definition.dashboard.get("panels"));

        let mut ids = PanelIds::new(
            raw_panels
                .iter()
                .filter_map(|panel| panel.get("id").and_then(Value::as_i64)),
        );

        let panels = raw_panels
            .into_iter()
            .map(|panel| {
                let id = match panel.get("id").and_then(Value::as_i64) {
                    Some(id) => id,
                    None => ids.allocate(),
                };
                panel_to_scene(panel, id)
            })
            .collect();

        DashboardScene {
            uid: definition.uid().map(str::to_string),
            title: definition.title().unwrap_or("New dashboard").to_string(),
            version: definition.version(),
            panels,
            meta: definition.meta.clone(),
        }
    }
}

/// Hands out ids to panels that arrive without one
struct PanelIds {
    used: HashSet<i64>,
    next: Option<i64>,
}

impl PanelIds {
    fn new(explicit: impl Iterator<Item = i64>) -> Self {
        let used: HashSet<i64> = explicit.collect();
        let next = used.iter().copied().max().unwrap_or(0).checked_add(1);
        Self { used, next }
    }

    /// Counts up from the highest explicit id, then reuses the lowest free positive id
    fn allocate(&mut self) -> i64 {
        let id = match self.next {
            Some(id) => {
                self.next = id.checked_add(1);
                id
            }
            None => (1..=i64::MAX)
                .find(|id| !self.used.contains(id))
                .unwrap_or(0),
        };
        self.used.insert(id);
        id
    }
}

/// Rows contribute their collapsed children; the row itself is not a panel
fn flatten_panels(panels: Option<&Value>) -> Vec<&Value> {
    let Some(panels) = panels.and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut flat = Vec::with_capacity(panels.len());
    for panel in panels {
        if panel.get("type").and_then(Value::as_str) == Some("row") {
            flat.extend(flatten_panels(panel.get("panels")));
        } else {
            flat.push(panel);
        }
    }
    flat
}

fn panel_to_scene(panel: &Value, id: i64) -> ScenePanel {
    ScenePanel {
        id,
        title: panel
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        kind: panel
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::DashboardMeta;
    use serde_json::json;

    #[test]
    fn test_transform_flattens_rows_and_assigns_ids() {
        let definition = DashboardDefinition::new(
            json!({
                "uid": "abc",
                "title": "Latency",
                "version": 3,
                "panels": [
                    { "id": 4, "title": "p99", "type": "timeseries" },
                    { "type": "row", "title": "Details", "panels": [
                        { "id": 7, "title": "Errors", "type": "stat" },
                        { "title": "Logs", "type": "logs" }
                    ]},
                    { "title": "Notes" }
                ]
            }),
            DashboardMeta::default(),
        );

        let scene = JsonSceneTransformer.transform(&definition);

        assert_eq!(scene.uid.as_deref(), Some("abc"));
        assert_eq!(scene.version, Some(3));
        let ids: Vec<i64> = scene.panels.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 7, 8, 9]);
        assert_eq!(scene.panels[3].kind, "unknown");
        assert_eq!(scene.panel(8).map(|p| p.title.as_str()), Some("Logs"));
    }

    #[test]
    fn test_ids_after_max_explicit_id() {
        let definition = DashboardDefinition::new(
            json!({
                "panels": [
                    { "id": i64::MAX, "title": "last" },
                    { "title": "no id" },
                    { "id": 1, "title": "first" },
                    { "title": "also no id" }
                ]
            }),
            DashboardMeta::default(),
        );

        let scene = JsonSceneTransformer.transform(&definition);

        let ids: Vec<i64> = scene.panels.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![i64::MAX, 2, 1, 3]);
    }

    #[test]
    fn test_transform_is_deterministic() {
        let definition = DashboardDefinition::blank(None);
        assert_eq!(
            JsonSceneTransformer.transform(&definition),
            JsonSceneTransformer.transform(&definition)
        );
        assert_eq!(JsonSceneTransformer.transform(&definition).title, "New dashboard");
    }
}
