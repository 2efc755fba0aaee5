// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::location::InMemoryLocation;
use crate::infrastructure::session_context::SessionContext;
use futures::future::{AbortHandle, AbortRegistration};
use parking_lot::Mutex;
use std::sync::Arc;

pub struct AppState {
    pub dashboard_service: Arc<DashboardService>,
    pub location: Arc<InMemoryLocation>,
    pub session: Arc<SessionContext>,
    pub current_load: CurrentLoad,
}

/// The page load started by the most recent navigation
#[derive(Default)]
pub struct CurrentLoad {
    handle: Mutex<Option<AbortHandle>>,
}

impl CurrentLoad {
    /// Abort the previous navigation's fetch and register the next one
    pub fn supersede(&self) -> AbortRegistration {
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self.handle.lock().replace(handle) {
            previous.abort();
        }
        registration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::{Abortable, Aborted};

    #[tokio::test]
    async fn test_new_navigation_aborts_previous_load() {
        let current = CurrentLoad::default();
        let first = current.supersede();
        let second = current.supersede();

        assert_eq!(Abortable::new(async { 1 }, first).await, Err(Aborted));
        assert_eq!(Abortable::new(async { 2 }, second).await, Ok(2));
    }
}
