use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the leasing service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub email: EmailConfig,
    pub site: SiteConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let sender_label =
            env::var("EMAIL_SENDER_LABEL").unwrap_or_else(|_| "Parkview Apartments".to_string());
        let sender_address = env::var("EMAIL_SENDER_ADDRESS")
            .unwrap_or_else(|_| "no-reply@parkview.example".to_string());
        let admin_address = env::var("EMAIL_ADMIN_ADDRESS")
            .unwrap_or_else(|_| "leasing@parkview.example".to_string());
        let brevo_api_key = env::var("BREVO_API_KEY").ok().filter(|key| !key.is_empty());

        let base_url = env::var("SITE_BASE_URL")
            .unwrap_or_else(|_| "https://parkview.example".to_string());
        let base_url = base_url.trim_end_matches('/').to_string();
        let default_application_fee = env::var("DEFAULT_APPLICATION_FEE")
            .unwrap_or_else(|_| "85".to_string())
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidFeeAmount)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            email: EmailConfig {
                sender_label,
                sender_address,
                admin_address,
                brevo_api_key,
            },
            site: SiteConfig {
                base_url,
                default_application_fee,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Outbound email identities and the optional Brevo credential.
///
/// When `brevo_api_key` is absent the server falls back to a log-only
/// gateway, so local runs never hit the provider.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub sender_label: String,
    pub sender_address: String,
    pub admin_address: String,
    pub brevo_api_key: Option<String>,
}

/// Public-facing site settings referenced by the workflows.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Base URL used for tracking deep links in outbound email.
    pub base_url: String,
    /// Fee charged when an apartment carries no override.
    pub default_application_fee: u32,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidFeeAmount,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidFeeAmount => {
                write!(f, "DEFAULT_APPLICATION_FEE must be a whole dollar amount")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidFeeAmount => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
