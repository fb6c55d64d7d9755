use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    pub event: EventConfig,
    pub admin: AdminConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Largest accepted request body. Character uploads arrive as base64
    /// data URLs, so this must leave room for a 2 MiB image.
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl From<&DatabaseConfig> for persistence::db::DatabaseConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections,
            min_connections: config.min_connections,
            connect_timeout_secs: config.connect_timeout_secs,
            idle_timeout_secs: config.idle_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// The single event this deployment serves.
#[derive(Debug, Clone, Deserialize)]
pub struct EventConfig {
    pub id: Uuid,

    /// Name used when the event row is created at startup.
    #[serde(default = "default_event_name")]
    pub default_name: String,

    /// Offset from UTC, in minutes, for local date/time input and labels.
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset_minutes: i32,

    /// Public site URL, used to build shareable invite links.
    #[serde(default)]
    pub public_base_url: String,
}

impl EventConfig {
    /// Link a guest opens to see their invitation.
    pub fn invite_link(&self, short_code: &str) -> String {
        format!(
            "{}/convite/{}",
            self.public_base_url.trim_end_matches('/'),
            short_code
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// HS256 secret for admin session tokens.
    #[serde(default)]
    pub session_secret: String,

    #[serde(default = "default_session_expiry")]
    pub session_expiry_secs: i64,

    #[serde(default = "default_admin_username")]
    pub default_username: String,

    /// Password for the account created at first start. Empty skips it.
    #[serde(default)]
    pub default_password: String,

    #[serde(default = "default_admin_name")]
    pub default_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadsConfig {
    #[serde(default = "default_uploads_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_upload_max_bytes")]
    pub max_bytes: usize,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: default_uploads_dir(),
            max_bytes: default_upload_max_bytes(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_body_size() -> usize {
    4 * 1_048_576
}
fn default_max_connections() -> u32 {
    10
}
fn default_min_connections() -> u32 {
    2
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_event_name() -> String {
    "Meu Evento".to_string()
}
fn default_timezone_offset() -> i32 {
    -180
}
fn default_session_expiry() -> i64 {
    43_200 // 12 hours
}
fn default_admin_username() -> String {
    "admin".to_string()
}
fn default_admin_name() -> String {
    "Administrador".to_string()
}
fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}
fn default_upload_max_bytes() -> usize {
    domain::models::upload::MAX_CHARACTER_IMAGE_BYTES
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with RSVP__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("RSVP").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration from embedded defaults plus overrides.
    ///
    /// Does not read config files and skips validation, so tests can build
    /// partial configs.
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            request_timeout_secs = 30
            max_body_size = 4194304

            [database]
            url = ""
            max_connections = 10
            min_connections = 2
            connect_timeout_secs = 10
            idle_timeout_secs = 600

            [logging]
            level = "info"
            format = "json"

            [security]
            cors_origins = []

            [event]
            id = "00000000-0000-0000-0000-000000000001"
            default_name = "Meu Evento"
            timezone_offset_minutes = -180
            public_base_url = "http://localhost:3000"

            [admin]
            session_secret = ""
            session_expiry_secs = 43200
            default_username = "admin"
            default_password = ""
            default_name = "Administrador"

            [uploads]
            dir = "uploads"
            max_bytes = 2097152
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.database.url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "RSVP__DATABASE__URL environment variable must be set".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigValidationError::InvalidValue(
                "min_connections cannot exceed max_connections".to_string(),
            ));
        }

        if self.admin.session_secret.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "RSVP__ADMIN__SESSION_SECRET environment variable must be set".to_string(),
            ));
        }

        if self.admin.session_expiry_secs <= 0 {
            return Err(ConfigValidationError::InvalidValue(
                "session_expiry_secs must be positive".to_string(),
            ));
        }

        if self.uploads.max_bytes == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "uploads.max_bytes cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}
