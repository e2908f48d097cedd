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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub access: AccessConfig,
    pub listings: ListingSourceConfig,
    pub maps: MapsConfig,
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

        let allowed_email_domain = env::var("APP_ALLOWED_EMAIL_DOMAIN")
            .unwrap_or_else(|_| "uwo.ca".to_string())
            .trim()
            .to_ascii_lowercase();
        let restrict_unapproved_browsing = match env::var("APP_RESTRICT_UNAPPROVED") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                name: "APP_RESTRICT_UNAPPROVED",
            })?,
            Err(_) => false,
        };
        let session_ttl_minutes = env::var("APP_SESSION_TTL_MINUTES")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u32>()
            .ok()
            .filter(|minutes| *minutes > 0)
            .ok_or(ConfigError::InvalidSessionTtl)?;

        let listings = match env::var("APP_LISTING_SOURCE")
            .unwrap_or_else(|_| "static".to_string())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "static" => ListingSourceConfig::Static,
            "remote" => {
                let base_url = env::var("APP_DOCUMENT_STORE_URL")
                    .map_err(|_| ConfigError::MissingDocumentStoreUrl)?;
                ListingSourceConfig::Remote { base_url }
            }
            other => {
                return Err(ConfigError::UnknownListingSource {
                    value: other.to_string(),
                })
            }
        };

        let maps = MapsConfig {
            api_key: env::var("APP_MAPS_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            base_url: env::var("APP_MAPS_BASE_URL")
                .unwrap_or_else(|_| MapsConfig::DEFAULT_BASE_URL.to_string()),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            access: AccessConfig {
                allowed_email_domain,
                restrict_unapproved_browsing,
                session_ttl_minutes,
            },
            listings,
            maps,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Sign-up restrictions and session lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessConfig {
    pub allowed_email_domain: String,
    /// When set, pending and rejected accounts cannot browse listings.
    pub restrict_unapproved_browsing: bool,
    pub session_ttl_minutes: u32,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            allowed_email_domain: "uwo.ca".to_string(),
            restrict_unapproved_browsing: false,
            session_ttl_minutes: 60,
        }
    }
}

/// Where browsable listings come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingSourceConfig {
    Static,
    Remote { base_url: String },
}

/// Directions provider settings. Routing is disabled without an API key.
#[derive(Debug, Clone)]
pub struct MapsConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl MapsConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://maps.googleapis.com/maps/api";
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidFlag { name: &'static str },
    InvalidSessionTtl,
    UnknownListingSource { value: String },
    MissingDocumentStoreUrl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidFlag { name } => {
                write!(f, "{name} must be one of true/false/1/0/yes/no/on/off")
            }
            ConfigError::InvalidSessionTtl => {
                write!(f, "APP_SESSION_TTL_MINUTES must be a positive integer")
            }
            ConfigError::UnknownListingSource { value } => write!(
                f,
                "APP_LISTING_SOURCE must be 'static' or 'remote' (got '{value}')"
            ),
            ConfigError::MissingDocumentStoreUrl => write!(
                f,
                "APP_DOCUMENT_STORE_URL is required when APP_LISTING_SOURCE=remote"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
