//! API configuration

use serde::Deserialize;

use infra_mail::{DispatcherConfig, SmtpConfig};

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// JWT secret for authentication
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// JWT expiration in seconds
    #[serde(default = "default_jwt_expiration_secs")]
    pub jwt_expiration_secs: u64,
    /// Database URL
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// SMTP relay settings; when absent, notifications accumulate in the
    /// outbox and no dispatcher is started
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,
    /// Outbox drain loop settings
    #[serde(default)]
    pub outbox: DispatcherConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_jwt_secret() -> String {
    "dev-secret-change-in-production".to_string()
}

fn default_jwt_expiration_secs() -> u64 {
    3600
}

fn default_database_url() -> String {
    "postgres://localhost/lostfound".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            jwt_secret: default_jwt_secret(),
            jwt_expiration_secs: default_jwt_expiration_secs(),
            database_url: default_database_url(),
            log_level: default_log_level(),
            smtp: None,
            outbox: DispatcherConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the environment.
    ///
    /// Variables use the `APP` prefix with `__` as the nesting separator,
    /// e.g. `APP__PORT=8080`, `APP__SMTP__HOST=smtp.campus.edu`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
