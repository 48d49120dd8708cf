use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub appdir: Option<String>,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub appwrite: Option<AppwriteConfig>,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(skip)]
    pub debug_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: ListenConfig::default(),
            appdir: None,
            tmdb: TmdbConfig::default(),
            appwrite: None,
            search: SearchConfig::default(),
            debug_logs: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TmdbConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub baseurl: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppwriteConfig {
    #[serde(default = "default_appwrite_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub database_id: Option<String>,
    #[serde(default)]
    pub collection_id: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for AppwriteConfig {
    fn default() -> Self {
        Self {
            endpoint: default_appwrite_endpoint(),
            project_id: None,
            database_id: None,
            collection_id: None,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_trending_limit")]
    pub trending_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            trending_limit: default_trending_limit(),
        }
    }
}

fn default_port() -> String {
    "8100".to_string()
}

fn default_appwrite_endpoint() -> String {
    "https://nyc.cloud.appwrite.io/v1".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_trending_limit() -> u32 {
    5
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;

        config.apply_env();
        Ok(config)
    }

    /// Environment variables take precedence over the config file for the
    /// API key and document-store identifiers.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("TMDB_API_KEY") {
            self.tmdb.api_key = Some(key);
        }

        let project = lookup("APPWRITE_PROJECT_ID");
        let database = lookup("APPWRITE_DATABASE_ID");
        let collection = lookup("APPWRITE_COLLECTION_ID");
        let api_key = lookup("APPWRITE_API_KEY");

        if project.is_some() || database.is_some() || collection.is_some() || api_key.is_some() {
            let appwrite = self.appwrite.get_or_insert_with(AppwriteConfig::default);
            if project.is_some() {
                appwrite.project_id = project;
            }
            if database.is_some() {
                appwrite.database_id = database;
            }
            if collection.is_some() {
                appwrite.collection_id = collection;
            }
            if api_key.is_some() {
                appwrite.api_key = api_key;
            }
        }

        if let Some(endpoint) = lookup("APPWRITE_ENDPOINT") {
            let appwrite = self.appwrite.get_or_insert_with(AppwriteConfig::default);
            appwrite.endpoint = endpoint;
        }
    }

    pub fn tmdb_api_key(&self) -> Result<&str, ConfigError> {
        self.tmdb
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingTmdbKey)
    }
}

impl AppwriteConfig {
    /// A store config is usable only when all three identifiers are present.
    pub fn is_complete(&self) -> bool {
        self.project_id.is_some() && self.database_id.is_some() && self.collection_id.is_some()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("No TMDB API key configured (set tmdb.api_key or TMDB_API_KEY)")]
    MissingTmdbKey,
}
