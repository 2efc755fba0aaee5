// Unbounded cache of built dashboard scenes
use crate::domain::dashboard::DashboardScene;
use dashmap::DashMap;
use std::sync::Arc;

/// Scenes are handed out by reference, so repeated reads of the same uid
/// return the same object until the cache is cleared.
#[derive(Default)]
pub struct SceneCache {
    scenes: DashMap<String, Arc<DashboardScene>>,
}

impl SceneCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, uid: &str) -> Option<Arc<DashboardScene>> {
        self.scenes.get(uid).map(|scene| scene.clone())
    }

    pub fn set(&self, uid: impl Into<String>, scene: Arc<DashboardScene>) {
        self.scenes.insert(uid.into(), scene);
    }

    pub fn remove(&self, uid: &str) -> Option<Arc<DashboardScene>> {
        self.scenes.remove(uid).map(|(_, scene)| scene)
    }

    pub fn clear(&self) {
        self.scenes.clear();
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::DashboardMeta;

    fn scene(title: &str) -> Arc<DashboardScene> {
        Arc::new(DashboardScene {
            uid: Some(title.to_string()),
            title: title.to_string(),
            version: Some(1),
            panels: Vec::new(),
            meta: DashboardMeta::default(),
        })
    }

    #[test]
    fn test_get_returns_same_reference() {
        let cache = SceneCache::new();
        let stored = scene("abc");
        cache.set("abc", stored.clone());

        let first = cache.get("abc").unwrap();
        let second = cache.get("abc").unwrap();
        assert!(Arc::ptr_eq(&first, &stored));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_remove_and_clear() {
        let cache = SceneCache::new();
        cache.set("a", scene("a"));
        cache.set("b", scene("b"));

        assert!(cache.remove("a").is_some());
        assert!(cache.get("a").is_none());
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert_eq!(cache.len(), 0);
    }
}
