// Browser-style location (path + query string)
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    /// Query string without the leading '?'
    pub query: String,
}

impl Location {
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: query.into(),
        }
    }

    /// Split "path?query" into its parts
    pub fn parse(url: &str) -> Self {
        match url.split_once('?') {
            Some((path, query)) => Self::new(path, query),
            None => Self::new(url, ""),
        }
    }

    /// Same query parameters, different path
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self::new(path, self.query.clone())
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.query.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let location = Location::parse("/d/abc/latency?orgId=1&from=now-6h");
        assert_eq!(location.path, "/d/abc/latency");
        assert_eq!(location.query, "orgId=1&from=now-6h");
        assert_eq!(location.to_string(), "/d/abc/latency?orgId=1&from=now-6h");

        let bare = Location::parse("/dashboards");
        assert_eq!(bare.query, "");
        assert_eq!(bare.to_string(), "/dashboards");
    }

    #[test]
    fn test_with_path_keeps_query() {
        let location = Location::new("/d/abc", "orgId=1");
        assert_eq!(location.with_path("/d/abc/slug").to_string(), "/d/abc/slug?orgId=1");
    }
}
