//! Typed application settings built from a [`ConfigStore`].

use std::path::PathBuf;
use std::time::Duration;

use super::constants::{
    CONFIG_KEYS, DEFAULT_CONFIG_PATH, DEFAULT_CONFIRM_URL, DEFAULT_DATABASE_URL,
    DEFAULT_EMAIL_FROM, DEFAULT_EMAIL_PORT, DEFAULT_EMAIL_SECURE, DEFAULT_LOG_LEVEL,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_TEMPLATES_DIR, KEY_CONFIRM_URL, KEY_DATABASE_URL, KEY_EMAIL_FROM, KEY_EMAIL_HOST,
    KEY_EMAIL_PASSWORD, KEY_EMAIL_PORT, KEY_EMAIL_SECURE, KEY_EMAIL_USERNAME, KEY_LOGGER_LEVEL,
    KEY_REQUEST_TIMEOUT_SECS, KEY_SERVER_HOST, KEY_SERVER_PORT, KEY_TEMPLATES_DIR,
};
use super::store::ConfigStore;

/// SMTP settings. `host` unset means mails are only logged.
#[derive(Clone)]
pub struct EmailSettings {
    pub host: Option<String>,
    pub port: u16,
    pub secure: bool,
    pub username: String,
    password: String,
    pub from: String,
}

impl EmailSettings {
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from", &self.from)
            .finish()
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub email: EmailSettings,
    pub templates_dir: PathBuf,
    pub confirm_url: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .field("email", &self.email)
            .field("templates_dir", &self.templates_dir)
            .field("confirm_url", &self.confirm_url)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_store(&ConfigStore::new())
    }
}

impl Config {
    /// Load `.env`, the JSON config file and environment overrides.
    pub fn load(path: Option<&str>) -> Self {
        dotenvy::dotenv().ok();

        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let store = ConfigStore::from_json_file(path).with_env_overrides(CONFIG_KEYS);
        Self::from_store(&store)
    }

    /// Build settings, falling back to the default of each missing key.
    pub fn from_store(store: &ConfigStore) -> Self {
        let email_host = store
            .get_string(KEY_EMAIL_HOST)
            .ok()
            .filter(|host| !host.trim().is_empty());

        Self {
            database_url: store.get_string_or(KEY_DATABASE_URL, DEFAULT_DATABASE_URL),
            server_host: store.get_string_or(KEY_SERVER_HOST, DEFAULT_SERVER_HOST),
            server_port: store.get_number_or(KEY_SERVER_PORT, DEFAULT_SERVER_PORT),
            request_timeout_secs: store
                .get_number_or(KEY_REQUEST_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS),
            log_level: store.get_string_or(KEY_LOGGER_LEVEL, DEFAULT_LOG_LEVEL),
            email: EmailSettings {
                host: email_host,
                port: store.get_number_or(KEY_EMAIL_PORT, DEFAULT_EMAIL_PORT),
                secure: store.get_bool_or(KEY_EMAIL_SECURE, DEFAULT_EMAIL_SECURE),
                username: store.get_string_or(KEY_EMAIL_USERNAME, ""),
                password: store.get_string_or(KEY_EMAIL_PASSWORD, ""),
                from: store.get_string_or(KEY_EMAIL_FROM, DEFAULT_EMAIL_FROM),
            },
            templates_dir: PathBuf::from(store.get_string_or(KEY_TEMPLATES_DIR, DEFAULT_TEMPLATES_DIR)),
            confirm_url: store.get_string_or(KEY_CONFIRM_URL, DEFAULT_CONFIRM_URL),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert!(config.email.host.is_none());
        assert_eq!(config.email.port, 587);
        assert!(!config.email.secure);
        assert_eq!(config.email.from, "noreply@example.com");
        assert_eq!(config.templates_dir, PathBuf::from("templates"));
        assert_eq!(config.confirm_url, "http://localhost:3000/confirm");
    }

    #[test]
    fn test_values_from_store() {
        let mut store = ConfigStore::new();
        store.set("server.port", "8080");
        store.set("email.host", "smtp.mail.com");
        store.set("email.secure", "true");
        store.set("email.password", "hunter22");

        let config = Config::from_store(&store);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.email.host.as_deref(), Some("smtp.mail.com"));
        assert!(config.email.secure);
        assert_eq!(config.email.password(), "hunter22");
    }

    #[test]
    fn test_example_config_file() {
        let store = ConfigStore::from_json_file("config/config.example.json");
        let config = Config::from_store(&store);

        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.email.host, None);
        assert_eq!(config.email.port, 587);
        assert!(!config.email.secure);
        assert_eq!(config.confirm_url, "http://localhost:3000/confirm");
    }

    #[test]
    fn test_blank_email_host_means_unset() {
        let mut store = ConfigStore::new();
        store.set("email.host", "  ");
        assert!(Config::from_store(&store).email.host.is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut store = ConfigStore::new();
        store.set("database.url", "postgres://admin:topsecret@db/admin_panel");
        store.set("email.password", "hunter22");

        let debug = format!("{:?}", Config::from_store(&store));
        assert!(!debug.contains("topsecret"));
        assert!(!debug.contains("hunter22"));
    }
}
