// Load routes, cache keys and load options
use futures::future::AbortRegistration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed slot shared by every request for the configured home dashboard
pub const HOME_DASHBOARD_CACHE_KEY: &str = "__home_dashboard__";

/// The kind of navigation that triggered a load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardRoute {
    New,
    Home,
    Normal,
    Embedded,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Home,
    Uid(String),
}

impl CacheKey {
    /// Definition cache slot consulted before fetching.
    ///
    /// Home requests always read the sentinel slot. New dashboards are never
    /// looked up so that every "new" request yields a fresh object.
    pub fn for_read(uid: Option<&str>, route: DashboardRoute) -> Option<CacheKey> {
        match route {
            DashboardRoute::New => None,
            DashboardRoute::Home => Some(CacheKey::Home),
            DashboardRoute::Normal | DashboardRoute::Embedded => uid.map(CacheKey::from),
        }
    }

    /// Definition cache slot written after a successful fetch.
    ///
    /// An explicit uid wins; a home fetch without one lands in the sentinel
    /// slot; new dashboards are never stored.
    pub fn for_write(uid: Option<&str>, route: DashboardRoute) -> Option<CacheKey> {
        match (route, uid) {
            (DashboardRoute::New, _) => None,
            (_, Some(uid)) => Some(CacheKey::from(uid)),
            (DashboardRoute::Home, None) => Some(CacheKey::Home),
            _ => None,
        }
    }
}

impl From<&str> for CacheKey {
    fn from(uid: &str) -> Self {
        if uid == HOME_DASHBOARD_CACHE_KEY {
            CacheKey::Home
        } else {
            CacheKey::Uid(uid.to_string())
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Home => f.write_str(HOME_DASHBOARD_CACHE_KEY),
            CacheKey::Uid(uid) => f.write_str(uid),
        }
    }
}

/// Parameters of a single load request
#[derive(Debug)]
pub struct LoadOptions {
    uid: Option<String>,
    pub route: DashboardRoute,
    folder_uid: Option<String>,
    abort: Option<AbortRegistration>,
}

impl LoadOptions {
    pub fn new(uid: Option<String>, route: DashboardRoute, folder_uid: Option<String>) -> Self {
        Self {
            uid: uid.filter(|uid| !uid.is_empty()),
            route,
            folder_uid: folder_uid.filter(|uid| !uid.is_empty()),
            abort: None,
        }
    }

    pub fn normal(uid: impl Into<String>) -> Self {
        Self::new(Some(uid.into()), DashboardRoute::Normal, None)
    }

    pub fn embedded(uid: impl Into<String>) -> Self {
        Self::new(Some(uid.into()), DashboardRoute::Embedded, None)
    }

    pub fn home() -> Self {
        Self::new(None, DashboardRoute::Home, None)
    }

    pub fn new_dashboard(folder_uid: Option<String>) -> Self {
        Self::new(None, DashboardRoute::New, folder_uid)
    }

    /// Let the caller abandon the remote fetch through the paired `AbortHandle`
    pub fn with_abort(mut self, registration: AbortRegistration) -> Self {
        self.abort = Some(registration);
        self
    }

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn folder_uid(&self) -> Option<&str> {
        self.folder_uid.as_deref()
    }

    pub(crate) fn take_abort(&mut self) -> Option<AbortRegistration> {
        self.abort.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_key_per_route() {
        assert_eq!(CacheKey::for_read(None, DashboardRoute::Home), Some(CacheKey::Home));
        assert_eq!(
            CacheKey::for_read(Some("abc"), DashboardRoute::Home),
            Some(CacheKey::Home)
        );
        assert_eq!(
            CacheKey::for_read(Some("abc"), DashboardRoute::Normal),
            Some(CacheKey::Uid("abc".to_string()))
        );
        assert_eq!(
            CacheKey::for_read(Some("abc"), DashboardRoute::Embedded),
            Some(CacheKey::Uid("abc".to_string()))
        );
        assert_eq!(CacheKey::for_read(None, DashboardRoute::Normal), None);
        assert_eq!(CacheKey::for_read(Some("abc"), DashboardRoute::New), None);
    }

    #[test]
    fn test_write_key_per_route() {
        assert_eq!(
            CacheKey::for_write(Some("abc"), DashboardRoute::Normal),
            Some(CacheKey::Uid("abc".to_string()))
        );
        assert_eq!(
            CacheKey::for_write(Some("abc"), DashboardRoute::Home),
            Some(CacheKey::Uid("abc".to_string()))
        );
        assert_eq!(CacheKey::for_write(None, DashboardRoute::Home), Some(CacheKey::Home));
        assert_eq!(CacheKey::for_write(None, DashboardRoute::Normal), None);
        assert_eq!(CacheKey::for_write(None, DashboardRoute::New), None);
        assert_eq!(CacheKey::for_write(Some("abc"), DashboardRoute::New), None);
    }

    #[test]
    fn test_sentinel_string_maps_to_home_key() {
        assert_eq!(CacheKey::from(HOME_DASHBOARD_CACHE_KEY), CacheKey::Home);
        assert_eq!(CacheKey::Home.to_string(), HOME_DASHBOARD_CACHE_KEY);
    }

    #[test]
    fn test_empty_uid_is_dropped() {
        let options = LoadOptions::new(Some(String::new()), DashboardRoute::Normal, Some(String::new()));
        assert!(options.uid().is_none());
        assert!(options.folder_uid().is_none());
    }
}
