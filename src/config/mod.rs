//! Configuration module for the Chronicle backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret for the cron/notify endpoints (required in production)
    pub cron_secret: Option<String>,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Public site URL used for notification links
    pub site_url: String,
    /// Base URL of the content record API
    pub content_api_base: String,
    /// Content base identifier
    pub content_base: String,
    /// API key for the content record API
    pub content_api_key: Option<String>,
    /// Table holding blog posts
    pub posts_table: String,
    /// Table holding guides
    pub guides_table: String,
    /// URL of the push delivery relay
    pub push_api_url: String,
    /// Credential for the push delivery relay
    pub push_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let cron_secret = env::var("CHRONICLE_CRON_SECRET").ok();

        let bind_addr = env::var("CHRONICLE_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid CHRONICLE_BIND_ADDR format");

        let log_level = env::var("CHRONICLE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let site_url =
            env::var("CHRONICLE_SITE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let content_api_base = env::var("CHRONICLE_CONTENT_API_BASE")
            .unwrap_or_else(|_| "https://api.airtable.com/v0".to_string());

        let content_base = env::var("CHRONICLE_CONTENT_BASE").unwrap_or_default();

        let content_api_key = env::var("CHRONICLE_CONTENT_API_KEY").ok();

        let posts_table = env::var("CHRONICLE_POSTS_TABLE").unwrap_or_else(|_| "Posts".to_string());

        let guides_table =
            env::var("CHRONICLE_GUIDES_TABLE").unwrap_or_else(|_| "Guides".to_string());

        let push_api_url = env::var("CHRONICLE_PUSH_API_URL")
            .unwrap_or_else(|_| "https://push.chronicle.example/v1/send".to_string());

        let push_api_key = env::var("CHRONICLE_PUSH_API_KEY").ok();

        Self {
            cron_secret,
            bind_addr,
            log_level,
            site_url,
            content_api_base,
            content_base,
            content_api_key,
            posts_table,
            guides_table,
            push_api_url,
            push_api_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("CHRONICLE_CRON_SECRET");
        env::remove_var("CHRONICLE_BIND_ADDR");
        env::remove_var("CHRONICLE_LOG_LEVEL");
        env::remove_var("CHRONICLE_SITE_URL");
        env::remove_var("CHRONICLE_CONTENT_API_BASE");
        env::remove_var("CHRONICLE_CONTENT_BASE");
        env::remove_var("CHRONICLE_CONTENT_API_KEY");
        env::remove_var("CHRONICLE_POSTS_TABLE");
        env::remove_var("CHRONICLE_GUIDES_TABLE");
        env::remove_var("CHRONICLE_PUSH_API_URL");
        env::remove_var("CHRONICLE_PUSH_API_KEY");

        let config = Config::from_env();

        assert!(config.cron_secret.is_none());
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.site_url, "http://localhost:3000");
        assert_eq!(config.content_api_base, "https://api.airtable.com/v0");
        assert_eq!(config.posts_table, "Posts");
        assert_eq!(config.guides_table, "Guides");
        assert!(config.content_api_key.is_none());
        assert!(config.push_api_key.is_none());
    }
}
