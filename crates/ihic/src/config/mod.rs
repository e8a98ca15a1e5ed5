use crate::site::SiteSettings;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
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

/// Top-level configuration for the generator and its preview server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub site: SiteConfig,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let input_csv = env::var("APP_INPUT_CSV").unwrap_or_else(|_| "Halal_Info_2.csv".to_string());
        let output_dir = env::var("APP_OUTPUT_DIR").unwrap_or_else(|_| "generated".to_string());
        let site_title = env::var("APP_SITE_TITLE").unwrap_or_else(|_| "i-HIC".to_string());
        let contact_email =
            env::var("APP_CONTACT_EMAIL").unwrap_or_else(|_| "pic@example.com".to_string());
        if !is_plausible_email(&contact_email) {
            return Err(ConfigError::InvalidContactEmail {
                value: contact_email,
            });
        }

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            site: SiteConfig {
                input_csv: PathBuf::from(input_csv),
                output_dir: PathBuf::from(output_dir),
                site_title,
                contact_email: contact_email.trim().to_string(),
            },
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the inventory sheet is read from and where pages are written.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub input_csv: PathBuf,
    pub output_dir: PathBuf,
    pub site_title: String,
    pub contact_email: String,
}

impl SiteConfig {
    pub fn settings(&self) -> SiteSettings {
        SiteSettings {
            site_title: self.site_title.clone(),
            contact_email: self.contact_email.clone(),
        }
    }
}

/// Settings controlling the preview server binding.
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

fn is_plausible_email(value: &str) -> bool {
    let trimmed = value.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !trimmed.contains(char::is_whitespace)
                && !trimmed.contains(['?', '&', '"', '<', '>'])
        }
        None => false,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidContactEmail { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidContactEmail { value } => {
                write!(f, "APP_CONTACT_EMAIL '{value}' is not an e-mail address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidContactEmail { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
