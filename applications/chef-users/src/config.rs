/// CLI configuration
use chef_api::ChefConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// Chef server API root, e.g. `https://chef.example.com/organizations/acme`
    #[serde(default)]
    pub server_url: String,

    #[serde(default)]
    pub client_name: Option<String>,

    #[serde(default = "default_chef_version")]
    pub chef_version: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl CliConfig {
    /// Load configuration from file and environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("chef.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (CHEF_SERVER_URL, CHEF_CLIENT_NAME, ...)
        settings = settings.add_source(config::Environment::with_prefix("CHEF").try_parsing(true));

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server_url.is_empty() {
            return Err(ConfigError::Invalid(
                "server URL is required (set CHEF_SERVER_URL or pass --server)".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn to_chef_config(&self) -> ChefConfig {
        let mut chef = ChefConfig::new(self.server_url.clone())
            .with_chef_version(self.chef_version.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(client_name) = &self.client_name {
            chef = chef.with_client_name(client_name.clone());
        }
        chef
    }
}

fn default_chef_version() -> String {
    chef_api::DEFAULT_CHEF_VERSION.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server_url: String::new(),
            client_name: None,
            chef_version: default_chef_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
