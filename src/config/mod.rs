//! Configuration module for the leads backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Development fallback for the token signing secret.
pub const DEV_JWT_SECRET: &str = "leads-dev-secret";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used to sign and verify bearer tokens
    pub jwt_secret: String,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Directory where uploads are staged until ingested
    pub upload_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Email of the bootstrap admin login
    pub admin_email: String,
    /// Password of the bootstrap admin login
    pub admin_password: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret =
            env::var("LEADS_JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string());

        let db_path = env::var("LEADS_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let upload_dir = env::var("LEADS_UPLOAD_DIR")
            .unwrap_or_else(|_| "./uploads".to_string())
            .into();

        let bind_addr = env::var("LEADS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5000".to_string())
            .parse()
            .expect("Invalid LEADS_BIND_ADDR format");

        let log_level = env::var("LEADS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let admin_email =
            env::var("LEADS_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
        let admin_password =
            env::var("LEADS_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

        Self {
            jwt_secret,
            db_path,
            upload_dir,
            bind_addr,
            log_level,
            admin_email,
            admin_password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("LEADS_JWT_SECRET");
        env::remove_var("LEADS_DB_PATH");
        env::remove_var("LEADS_UPLOAD_DIR");
        env::remove_var("LEADS_BIND_ADDR");
        env::remove_var("LEADS_LOG_LEVEL");
        env::remove_var("LEADS_ADMIN_EMAIL");
        env::remove_var("LEADS_ADMIN_PASSWORD");

        let config = Config::from_env();

        assert_eq!(config.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(config.db_path, PathBuf::from("./data/app.sqlite"));
        assert_eq!(config.upload_dir, PathBuf::from("./uploads"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:5000");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.admin_email, "admin@example.com");
        assert_eq!(config.admin_password, "admin123");
    }
}
