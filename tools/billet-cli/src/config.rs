//! CLI configuration.

use anyhow::{Context, Result};
use billet_api::{DEFAULT_API_URL, DEFAULT_WEBHOOK_URL};
use billet_observability::LoggingConfig;
use serde::{Deserialize, Serialize};

/// File names looked up, in order, in each directory from the working
/// directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["billet.toml", ".billet.toml", "billet.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront REST API.
    #[serde(default)]
    pub api: ApiConfig,

    /// Order confirmation webhook.
    #[serde(default)]
    pub notifications: NotificationsConfig,

    /// Local storage for the cart and the admin session.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Back-office credentials.
    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Endpoint receiving the confirmation payload.
    #[serde(default = "default_webhook_url")]
    pub webhook_url: String,
}

fn default_webhook_url() -> String {
    DEFAULT_WEBHOOK_URL.to_string()
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            webhook_url: default_webhook_url(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage directory. Defaults to `~/.local/share/billet/storage`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,

    /// Argon2 PHC string, as printed by `billet admin hash-password`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

fn default_admin_username() -> String {
    "admin".to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password_hash: None,
        }
    }
}

/// Generate a default billet.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Billetterie configuration

[api]
base_url = "{api}"

[notifications]
webhook_url = "{webhook}"

[storage]
# dir = ".billet/storage"

[admin]
username = "admin"
# Generate with: billet admin hash-password
# password_hash = "$argon2id$v=19$..."

[logging]
level = "info"
format = "human"
"#,
        api = DEFAULT_API_URL,
        webhook = DEFAULT_WEBHOOK_URL,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use billet_observability::{LogFormat, LogLevel};

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.admin.username, "admin");
        assert!(config.admin.password_hash.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config: CliConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:3000"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.notifications.webhook_url, DEFAULT_WEBHOOK_URL);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_generated_template_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("billet.json");
        let path = path.to_str().unwrap();

        let mut config = CliConfig::default();
        config.storage.dir = Some("/tmp/billet".to_string());
        config.save(path).unwrap();

        assert_eq!(CliConfig::load(path).unwrap(), config);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("billet.toml");
        std::fs::write(&path, "[api\nbase_url = 1").unwrap();

        let err = CliConfig::load(path.to_str().unwrap()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }
}
