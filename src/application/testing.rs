// In-memory collaborators for service tests
use crate::application::collaborators::{
    DashboardRegistry, LocationService, NavigationState, SceneTransformer, UrlSync,
};
use crate::application::dashboard_repository::{
    DashboardRepository, FolderRepository, HomeDashboard,
};
use crate::application::error::FetchError;
use crate::domain::dashboard::{DashboardDefinition, DashboardMeta, DashboardScene};
use crate::domain::location::Location;
use crate::domain::navigation::{FolderCrumb, NavModel};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn definition(uid: &str, title: &str) -> DashboardDefinition {
    DashboardDefinition::new(
        json!({
            "uid": uid,
            "title": title,
            "version": 1,
            "panels": [{ "id": 1, "title": "Requests", "type": "timeseries" }],
        }),
        DashboardMeta {
            url: Some(format!("/d/{}/{}", uid, title.to_lowercase())),
            can_save: true,
            can_edit: true,
            can_share: true,
            can_star: true,
            ..DashboardMeta::default()
        },
    )
}

pub struct MockRepository {
    home: Mutex<Result<HomeDashboard, FetchError>>,
    dashboards: Mutex<HashMap<String, Result<DashboardDefinition, FetchError>>>,
    pending: Mutex<HashSet<String>>,
    yield_before_reply: bool,
    pub home_calls: AtomicUsize,
    pub uid_calls: AtomicUsize,
}

impl MockRepository {
    pub fn new() -> Self {
        Self {
            home: Mutex::new(Err(FetchError::NotFound("home".to_string()))),
            dashboards: Mutex::new(HashMap::new()),
            pending: Mutex::new(HashSet::new()),
            yield_before_reply: false,
            home_calls: AtomicUsize::new(0),
            uid_calls: AtomicUsize::new(0),
        }
    }

    /// Suspend once inside every fetch so overlapping loads interleave
    pub fn yielding(mut self) -> Self {
        self.yield_before_reply = true;
        self
    }

    pub fn with_dashboard(self, definition: DashboardDefinition) -> Self {
        let uid = definition.uid().unwrap_or_default().to_string();
        self.dashboards.lock().insert(uid, Ok(definition));
        self
    }

    pub fn with_failure(self, uid: &str, err: FetchError) -> Self {
        self.dashboards.lock().insert(uid.to_string(), Err(err));
        self
    }

    /// Fetches of `uid` never complete
    pub fn with_pending(self, uid: &str) -> Self {
        self.pending.lock().insert(uid.to_string());
        self
    }

    pub fn with_home(self, home: Result<HomeDashboard, FetchError>) -> Self {
        *self.home.lock() = home;
        self
    }

    pub fn fetches(&self) -> usize {
        self.home_calls.load(Ordering::SeqCst) + self.uid_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DashboardRepository for MockRepository {
    async fn home_dashboard(&self) -> Result<HomeDashboard, FetchError> {
        self.home_calls.fetch_add(1, Ordering::SeqCst);
        if self.yield_before_reply {
            tokio::task::yield_now().await;
        }
        self.home.lock().clone()
    }

    async fn dashboard_by_uid(&self, uid: &str) -> Result<DashboardDefinition, FetchError> {
        self.uid_calls.fetch_add(1, Ordering::SeqCst);
        let hangs = self.pending.lock().contains(uid);
        if hangs {
            futures::future::pending::<()>().await;
        }
        if self.yield_before_reply {
            tokio::task::yield_now().await;
        }
        self.dashboards
            .lock()
            .get(uid)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::NotFound(uid.to_string())))
    }
}

#[derive(Default)]
pub struct MockFolders {
    folders: HashMap<String, Vec<FolderCrumb>>,
    pub calls: AtomicUsize,
}

impl MockFolders {
    pub fn with_folder(mut self, uid: &str, ancestry: &[(&str, &str)]) -> Self {
        let crumbs = ancestry
            .iter()
            .map(|(uid, title)| FolderCrumb {
                uid: uid.to_string(),
                title: title.to_string(),
            })
            .collect();
        self.folders.insert(uid.to_string(), crumbs);
        self
    }
}

#[async_trait]
impl FolderRepository for MockFolders {
    async fn folder_ancestry(&self, folder_uid: &str) -> Result<Vec<FolderCrumb>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.folders
            .get(folder_uid)
            .cloned()
            .ok_or_else(|| FetchError::Transport(format!("folder {} unavailable", folder_uid)))
    }
}

pub struct RecordingLocation {
    current: Mutex<Location>,
    pub replaced: Mutex<Vec<Location>>,
}

impl RecordingLocation {
    pub fn at(url: &str) -> Self {
        Self {
            current: Mutex::new(Location::parse(url)),
            replaced: Mutex::new(Vec::new()),
        }
    }
}

impl LocationService for RecordingLocation {
    fn location(&self) -> Location {
        self.current.lock().clone()
    }

    fn replace(&self, location: Location) {
        *self.current.lock() = location.clone();
        self.replaced.lock().push(location);
    }
}

#[derive(Default)]
pub struct RecordingContext {
    pub active: Mutex<Option<Arc<DashboardScene>>>,
    pub synced: Mutex<Vec<Option<String>>>,
    pub nav: Mutex<Option<NavModel>>,
    pub clears: AtomicUsize,
}

impl DashboardRegistry for RecordingContext {
    fn set_active(&self, scene: Arc<DashboardScene>) {
        *self.active.lock() = Some(scene);
    }

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        *self.active.lock() = None;
    }
}

impl UrlSync for RecordingContext {
    fn init_sync(&self, scene: &Arc<DashboardScene>) {
        self.synced.lock().push(scene.uid.clone());
    }
}

impl NavigationState for RecordingContext {
    fn update(&self, model: NavModel) {
        *self.nav.lock() = Some(model);
    }
}

/// Minimal transformer that counts how many scenes it built
#[derive(Default)]
pub struct CountingTransformer {
    pub builds: AtomicUsize,
}

impl SceneTransformer for CountingTransformer {
    fn transform(&self, definition: &DashboardDefinition) -> DashboardScene {
        self.builds.fetch_add(1, Ordering::SeqCst);
        DashboardScene {
            uid: definition.uid().map(str::to_string),
            title: definition.title().unwrap_or_default().to_string(),
            version: definition.version(),
            panels: vec![crate::domain::dashboard::ScenePanel {
                id: 1,
                title: "Requests".to_string(),
                kind: "timeseries".to_string(),
            }],
            meta: definition.meta.clone(),
        }
    }
}
