//! Environment-based server configuration

use std::env;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Gemini API key
    pub gemini_api_key: Option<String>,
    /// OpenAI API key
    pub openai_api_key: Option<String>,
    /// CORS origin allow-list
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            gemini_api_key: None,
            openai_api_key: None,
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl ServerConfig {
    /// Load the configuration from environment variables
    ///
    /// Reads `HOST`, `PORT`, `GEMINI_API_KEY`, `OPENAI_API_KEY` and
    /// `ALLOWED_ORIGINS` (comma-separated), falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map_or(defaults.allowed_origins, |v| parse_origins(&v)),
        }
    }
}

/// Split a comma-separated origin list, dropping empty entries
fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
