use crate::application::dashboard_service::LoaderSettings;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoaderConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub cache: CacheSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    #[serde(default = "default_backend_host")]
    pub host: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_home_path")]
    pub home_path: String,
    #[serde(default = "default_dashboard_path")]
    pub dashboard_path: String,
    #[serde(default = "default_folder_path")]
    pub folder_path: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppSettings {
    #[serde(default)]
    pub base_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheSettings {
    #[serde(default = "default_definition_ttl_ms")]
    pub definition_ttl_ms: u64,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_backend_host() -> String {
    "http://localhost:3000".to_string()
}

fn default_home_path() -> String {
    "/api/dashboards/home".to_string()
}

fn default_dashboard_path() -> String {
    "/api/dashboards/uid/${uid}".to_string()
}

fn default_folder_path() -> String {
    "/api/folders/${uid}".to_string()
}

fn default_definition_ttl_ms() -> u64 {
    2000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            host: default_backend_host(),
            token: None,
            home_path: default_home_path(),
            dashboard_path: default_dashboard_path(),
            folder_path: default_folder_path(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            definition_ttl_ms: default_definition_ttl_ms(),
        }
    }
}

impl LoaderConfig {
    pub fn loader_settings(&self) -> LoaderSettings {
        LoaderSettings {
            base_path: self.app.base_path.trim_end_matches('/').to_string(),
            definition_ttl: Duration::from_millis(self.cache.definition_ttl_ms),
        }
    }
}

/// Load `config/dashboards.*` (optional) with `DASHBOARDS__SECTION__KEY` overrides
pub fn load_loader_config() -> anyhow::Result<LoaderConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboards").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARDS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Replace `${name}` placeholders in an endpoint template with URL-encoded values
pub fn prepare_path(template: &str, vars: &HashMap<String, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }
    result
}
