// Dashboard service - Resolves a dashboard request into a render-ready scene
use crate::application::clock::Clock;
use crate::application::collaborators::{
    DashboardRegistry, LocationService, NavigationState, SceneTransformer, UrlSync,
};
use crate::application::dashboard_repository::{DashboardRepository, FolderRepository};
use crate::application::definition_cache::{DEFAULT_DEFINITION_TTL, DefinitionCache};
use crate::application::error::{FetchError, LoadError, PanelEditError};
use crate::application::fetch_strategy::{FetchOutcome, RouteFetchStrategy, canonical_location};
use crate::application::navigation_service::NavigationService;
use crate::application::scene_cache::SceneCache;
use crate::domain::dashboard::{DashboardDefinition, DashboardScene};
use crate::domain::lifecycle::{LifecycleState, PanelEditorSession};
use crate::domain::location::Location;
use crate::domain::route::{CacheKey, DashboardRoute, LoadOptions};
use futures::future::Abortable;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Everything outside this service that a load touches
#[derive(Clone)]
pub struct DashboardCollaborators {
    pub repository: Arc<dyn DashboardRepository>,
    pub folders: Arc<dyn FolderRepository>,
    pub location: Arc<dyn LocationService>,
    pub transformer: Arc<dyn SceneTransformer>,
    pub url_sync: Arc<dyn UrlSync>,
    pub registry: Arc<dyn DashboardRegistry>,
    pub navigation: Arc<dyn NavigationState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Stored definitions, expired ones included
    pub definitions: usize,
    pub scenes: usize,
    pub definition_ttl_ms: u64,
}

#[derive(Debug, Clone)]
pub struct LoaderSettings {
    /// Application base path used to resolve redirects and canonical URLs
    pub base_path: String,
    pub definition_ttl: Duration,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            definition_ttl: DEFAULT_DEFINITION_TTL,
        }
    }
}

/// Bookkeeping for overlapping page loads
#[derive(Default)]
struct LoadTracker {
    last_generation: u64,
    in_flight: Vec<u64>,
    /// Load whose `Loading` state is currently published
    owner: Option<u64>,
    /// Published before the first of the current run of loads began
    settled: LifecycleState,
}

/// Settles a page load; a load dropped mid-flight counts as cancelled
struct LoadGuard<'a> {
    service: &'a DashboardService,
    generation: u64,
    done: bool,
}

impl LoadGuard<'_> {
    fn finish(mut self, outcome: Option<LifecycleState>) {
        self.done = true;
        self.service.finish_load(self.generation, outcome);
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.service.finish_load(self.generation, None);
        }
    }
}

/// Owns both caches and the observable lifecycle state.
///
/// Construct one per process and share it through application state.
/// Concurrent loads of the same uncached key are not deduplicated; each
/// issues its own fetch and the last to finish wins the cache slot.
pub struct DashboardService {
    strategy: RouteFetchStrategy,
    navigation: NavigationService,
    location: Arc<dyn LocationService>,
    transformer: Arc<dyn SceneTransformer>,
    url_sync: Arc<dyn UrlSync>,
    registry: Arc<dyn DashboardRegistry>,
    definition_cache: DefinitionCache,
    scene_cache: SceneCache,
    base_path: String,
    state: watch::Sender<LifecycleState>,
    loads: Mutex<LoadTracker>,
}

impl DashboardService {
    pub fn new(
        collaborators: DashboardCollaborators,
        settings: LoaderSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (state, _) = watch::channel(LifecycleState::default());

        Self {
            strategy: RouteFetchStrategy::new(collaborators.repository, settings.base_path.clone()),
            navigation: NavigationService::new(
                collaborators.folders,
                collaborators.navigation,
                settings.base_path.clone(),
            ),
            location: collaborators.location,
            transformer: collaborators.transformer,
            url_sync: collaborators.url_sync,
            registry: collaborators.registry,
            definition_cache: DefinitionCache::new(settings.definition_ttl, clock),
            scene_cache: SceneCache::new(),
            base_path: settings.base_path,
            state,
            loads: Mutex::new(LoadTracker::default()),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    /// Resolve the raw definition for a request.
    ///
    /// Returns `Ok(None)` when the fetch was cancelled or ended in a redirect.
    pub async fn fetch_definition(
        &self,
        options: LoadOptions,
    ) -> Result<Option<Arc<DashboardDefinition>>, LoadError> {
        match self.resolve_definition(options).await {
            Err(LoadError::Cancelled) => Ok(None),
            other => other,
        }
    }

    /// Build (or reuse) the scene for a request
    pub async fn load_scene(&self, options: LoadOptions) -> Result<Arc<DashboardScene>, LoadError> {
        let scene_key = scene_cache_key(&options);

        if let Some(uid) = scene_key.as_deref() {
            if let Some(scene) = self.scene_cache.get(uid) {
                tracing::debug!("Scene cache hit for {}", uid);
                return Ok(scene);
            }
        }

        match self.resolve_definition(options).await? {
            Some(definition) if definition.has_content() => {
                let scene = Arc::new(self.transformer.transform(&definition));
                if let Some(uid) = scene_key {
                    self.scene_cache.set(uid, scene.clone());
                }
                Ok(scene)
            }
            _ => Err(LoadError::NotFound),
        }
    }

    /// Page entry point: every outcome ends up in the lifecycle state.
    ///
    /// A cancelled or dropped load only puts back the earlier state while its
    /// own `Loading` is still the one published and no other load is running.
    pub async fn load_dashboard(&self, options: LoadOptions) {
        let route = options.route;
        let guard = self.begin_load();

        let outcome = match self.load_scene(options).await {
            Ok(scene) => {
                self.url_sync.init_sync(&scene);
                self.registry.set_active(scene.clone());
                Some(LifecycleState::loaded(scene))
            }
            Err(LoadError::Cancelled) => {
                tracing::debug!("Dashboard load ({:?}) cancelled", route);
                None
            }
            Err(e) => {
                tracing::debug!("Dashboard load ({:?}) failed: {}", route, e);
                Some(LifecycleState::errored(e.to_string()))
            }
        };
        guard.finish(outcome);
    }

    /// Reset the page state; both caches are kept
    pub fn clear_state(&self) {
        {
            let mut loads = self.loads.lock();
            loads.owner = None;
            self.state.send_replace(LifecycleState::default());
        }
        self.registry.clear();
    }

    /// Seed the definition cache without a fetch (e.g. right after a save)
    pub fn set_definition_cache(&self, key: CacheKey, definition: DashboardDefinition) {
        self.definition_cache.set(key, Arc::new(definition));
    }

    pub fn get_from_cache(&self, uid: &str) -> Option<Arc<DashboardScene>> {
        self.scene_cache.get(uid)
    }

    pub fn remove_scene_cache(&self, uid: &str) -> bool {
        self.scene_cache.remove(uid).is_some()
    }

    pub fn clear_scene_cache(&self) {
        self.scene_cache.clear();
    }

    pub fn remove_definition_cache(&self, key: &CacheKey) -> bool {
        self.definition_cache.remove(key)
    }

    pub fn clear_definition_cache(&self) {
        self.definition_cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            definitions: self.definition_cache.len(),
            scenes: self.scene_cache.len(),
            definition_ttl_ms: u64::try_from(self.definition_cache.ttl().as_millis())
                .unwrap_or(u64::MAX),
        }
    }

    pub fn open_panel_editor(&self, panel_id: i64) -> Result<PanelEditorSession, PanelEditError> {
        let scene = self.state().scene.ok_or(PanelEditError::NoDashboard)?;
        if scene.panel(panel_id).is_none() {
            return Err(PanelEditError::PanelNotFound(panel_id));
        }

        let session = PanelEditorSession {
            dashboard_uid: scene.uid.clone(),
            panel_id,
            opened_at: chrono::Utc::now(),
        };
        self.state
            .send_modify(|state| state.panel_editor = Some(session.clone()));
        Ok(session)
    }

    pub fn close_panel_editor(&self) {
        self.state.send_if_modified(|state| state.panel_editor.take().is_some());
    }

    fn begin_load(&self) -> LoadGuard<'_> {
        let mut loads = self.loads.lock();
        loads.last_generation += 1;
        let generation = loads.last_generation;
        loads.in_flight.push(generation);

        let previous = self.state.send_replace(LifecycleState::loading());
        if loads.owner.replace(generation).is_none() {
            loads.settled = previous;
        }

        LoadGuard {
            service: self,
            generation,
            done: false,
        }
    }

    /// `None` marks a load that was cancelled or dropped
    fn finish_load(&self, generation: u64, outcome: Option<LifecycleState>) {
        let mut loads = self.loads.lock();
        loads.in_flight.retain(|g| *g != generation);

        match outcome {
            Some(state) => {
                loads.owner = None;
                self.state.send_replace(state);
            }
            None if loads.owner == Some(generation) => match loads.in_flight.last().copied() {
                // A still running load keeps the page in Loading
                Some(latest) => loads.owner = Some(latest),
                None => {
                    loads.owner = None;
                    let settled = std::mem::take(&mut loads.settled);
                    self.state.send_replace(settled);
                }
            },
            None => {}
        }
    }

    async fn resolve_definition(
        &self,
        mut options: LoadOptions,
    ) -> Result<Option<Arc<DashboardDefinition>>, LoadError> {
        let route = options.route;

        if let Some(key) = CacheKey::for_read(options.uid(), route) {
            if let Some(cached) = self.definition_cache.get(&key) {
                tracing::debug!("Definition cache hit for {}", key);
                return Ok(Some(cached));
            }
        }

        let abort = options.take_abort();
        let fetch = self
            .strategy
            .fetch(options.uid(), route, options.folder_uid());
        let fetched = match abort {
            Some(registration) => Abortable::new(fetch, registration)
                .await
                .unwrap_or(Err(FetchError::Cancelled)),
            None => fetch.await,
        };

        let definition = match fetched {
            Ok(FetchOutcome::Definition(definition)) => definition,
            Ok(FetchOutcome::Redirect(url)) => {
                tracing::info!("Home dashboard redirects to {}", url);
                self.location.replace(Location::parse(&url));
                return Ok(None);
            }
            Err(FetchError::Cancelled) => return Err(LoadError::Cancelled),
            Err(e) => {
                tracing::error!(
                    "Failed to fetch dashboard {:?} ({:?}): {}",
                    options.uid(),
                    route,
                    e
                );
                return Err(e.into());
            }
        };

        if !definition.meta.is_embedded {
            self.sync_canonical_location(&definition);
        }

        self.navigation.update_nav_model(&definition).await;

        let definition = Arc::new(definition);
        if let Some(key) = CacheKey::for_write(options.uid(), route) {
            self.definition_cache.set(key, definition.clone());
        }

        Ok(Some(definition))
    }

    fn sync_canonical_location(&self, definition: &DashboardDefinition) {
        let Some(url) = definition.meta.url.as_deref() else {
            return;
        };

        let current = self.location.location();
        if let Some(next) = canonical_location(&self.base_path, url, &current) {
            tracing::info!("Replacing location {} with {}", current, next);
            self.location.replace(next);
        }
    }
}

/// Scenes are only cached for requests carrying a uid, never for new dashboards
fn scene_cache_key(options: &LoadOptions) -> Option<String> {
    match options.route {
        DashboardRoute::New => None,
        _ => options.uid().map(str::to_string),
    }
}
