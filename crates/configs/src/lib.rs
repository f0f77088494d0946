use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dynamodb: DynamoDbConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8000 }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DynamoDbConfig {
    #[serde(default = "default_region")]
    pub region: String,
    /// Local endpoint override (docker / localstack). Unset in AWS.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_menu_items_table")]
    pub menu_items_table: String,
    #[serde(default = "default_categories_table")]
    pub categories_table: String,
}

impl Default for DynamoDbConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: None,
            menu_items_table: default_menu_items_table(),
            categories_table: default_categories_table(),
        }
    }
}

/// API key settings. `api_keys` is the basic authentication set;
/// `api_key_permissions` is the optional restaurant scoping map in
/// `key1:r1,r2;key2:*` form. Empty/absent permissions means legacy
/// unrestricted mode.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_api_keys")]
    pub api_keys: String,
    #[serde(default)]
    pub api_key_permissions: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { api_keys: default_api_keys(), api_key_permissions: None }
    }
}

fn default_region() -> String { "us-east-1".into() }
fn default_menu_items_table() -> String { "menu_items".into() }
fn default_categories_table() -> String { "categories".into() }
fn default_api_keys() -> String { "dev-key-123,test-key-456".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load config.toml if present, otherwise defaults; then overlay env vars
    /// and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.validate()?;
        self.dynamodb.normalize_from_env();
        self.dynamodb.validate()?;
        self.auth.normalize_from_env();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
    }

    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        Ok(())
    }
}

impl DynamoDbConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(region) = std::env::var("AWS_REGION") {
            self.region = region;
        }
        if let Ok(endpoint) = std::env::var("DYNAMODB_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                self.endpoint = Some(endpoint);
            }
        }
        if let Ok(table) = std::env::var("MENU_ITEMS_TABLE") {
            self.menu_items_table = table;
        }
        if let Ok(table) = std::env::var("CATEGORIES_TABLE") {
            self.categories_table = table;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.menu_items_table.trim().is_empty() || self.categories_table.trim().is_empty() {
            return Err(anyhow!("dynamodb table names must not be empty"));
        }
        Ok(())
    }
}

impl AuthConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(keys) = std::env::var("API_KEYS") {
            self.api_keys = keys;
        }
        if let Ok(perms) = std::env::var("API_KEY_PERMISSIONS") {
            self.api_key_permissions = Some(perms);
        }
    }
}
