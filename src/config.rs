use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    /// Courses requested per `/universities/search` page
    pub results_page_size: u32,
    pub toast_duration_ms: u32,
    pub persist_filters: bool,
}

const DEFAULT_BACKEND_URL_DEVELOPMENT: &str = "http://localhost:8080/course-tracker-api";
const DEFAULT_BACKEND_URL_PRODUCTION: &str = "https://api.coursetracker.app/course-tracker-api";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: DEFAULT_BACKEND_URL_DEVELOPMENT.to_string(),
            backend_url_production: DEFAULT_BACKEND_URL_PRODUCTION.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            results_page_size: 10,
            toast_duration_ms: 4000,
            persist_filters: true,
        }
    }
}

impl AppConfig {
    /// Loads configuration from compile-time environment variables (see build.rs)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_development),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_production),
            environment: option_env!("ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: parse_or(option_env!("ENABLE_LOGGING"), defaults.enable_logging),
            results_page_size: parse_or(option_env!("RESULTS_PAGE_SIZE"), defaults.results_page_size),
            toast_duration_ms: parse_or(option_env!("TOAST_DURATION_MS"), defaults.toast_duration_ms),
            persist_filters: parse_or(option_env!("PERSIST_FILTERS"), defaults.persist_filters),
        }
    }

    /// Backend base URL for the current environment
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Info
        } else {
            log::Level::Error
        }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(default)
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
