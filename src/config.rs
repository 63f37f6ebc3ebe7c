//! Runtime configuration.
//!
//! Values come from the environment (a `.env` file is honored) with code
//! defaults, so the crate runs without any configuration in development.

use std::env;
use std::path::PathBuf;

/// Default public endpoint when no external validation URL is configured.
const DEFAULT_PUBLIC_URL: &str = "http://localhost:8080";
const DEFAULT_DATABASE_PATH: &str = "data/certificates.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Externally configured base validation URL, if any.
    pub validation_url: Option<String>,
    /// The service's own public validation endpoint, used when no external
    /// validation URL is set.
    pub public_url: String,
    /// Location of the JSON certificate snapshot for [`crate::store::FileStore`].
    pub database_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            validation_url: None,
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

impl AppConfig {
    /// Reads `VALIDATION_URL`, `PUBLIC_URL` and `DATABASE_PATH` from the
    /// environment, loading a `.env` file first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            validation_url: env::var("VALIDATION_URL").ok().filter(|v| !v.is_empty()),
            public_url: env::var("PUBLIC_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string()),
            database_path: env::var("DATABASE_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
        }
    }

    /// Full verification link for a validation code: the configured base URL
    /// (trailing slash trimmed) or the own public endpoint, plus the code as
    /// a query parameter.
    pub fn validation_link(&self, code: &str) -> String {
        let base = self
            .validation_url
            .as_deref()
            .unwrap_or(&self.public_url)
            .trim_end_matches('/');
        format!("{base}?code={code}")
    }
}
