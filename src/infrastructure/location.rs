// In-memory location service
use crate::application::collaborators::LocationService;
use crate::domain::location::Location;
use parking_lot::RwLock;

/// Current page location and the history entries pushed so far
#[derive(Debug, Default)]
pub struct InMemoryLocation {
    current: RwLock<Location>,
    history: RwLock<Vec<Location>>,
}

impl InMemoryLocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regular navigation: adds a history entry
    pub fn push(&self, location: Location) {
        let mut history = self.history.write();
        history.push(location.clone());
        tracing::debug!("Navigated to {} ({} history entries)", location, history.len());
        *self.current.write() = location;
    }
}

impl LocationService for InMemoryLocation {
    fn location(&self) -> Location {
        self.current.read().clone()
    }

    fn replace(&self, location: Location) {
        tracing::debug!("Location replaced with {}", location);
        if let Some(last) = self.history.write().last_mut() {
            *last = location.clone();
        }
        *self.current.write() = location;
    }
}
