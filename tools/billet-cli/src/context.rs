//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use billet_api::{MockApiClient, WebhookNotifier};
use billet_auth::{AdminSession, StaticCredentials};
use billet_cache::Cache;
use billet_commerce::cart::CartStore;
use billet_commerce::checkout::Checkout;
use billet_commerce::{ConfirmationNotifier, StorefrontApi};

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration was read from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    storage: Cache,
    api: Arc<dyn StorefrontApi>,
    notifier: Arc<dyn ConfirmationNotifier>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        let storage_dir = match config.storage.dir.as_deref() {
            Some(dir) if Path::new(dir).is_absolute() => PathBuf::from(dir),
            Some(dir) => cwd.join(dir),
            None => dirs_path().join("billet").join("storage"),
        };
        // An unusable storage directory degrades to an in-process cart.
        let storage = Cache::open_dir(storage_dir.clone()).unwrap_or_else(|e| {
            output.warn(&format!(
                "Storage unavailable at {}: {}",
                storage_dir.display(),
                e
            ));
            Cache::unavailable()
        });

        let api: Arc<dyn StorefrontApi> = Arc::new(MockApiClient::new(&config.api.base_url));
        let notifier: Arc<dyn ConfirmationNotifier> =
            Arc::new(WebhookNotifier::new(&config.notifications.webhook_url));

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            storage,
            api,
            notifier,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    pub fn api(&self) -> &dyn StorefrontApi {
        self.api.as_ref()
    }

    /// The persisted cart.
    pub fn cart(&self) -> CartStore {
        CartStore::load(self.storage.clone())
    }

    pub fn checkout(&self) -> Checkout {
        Checkout::new(self.api.clone(), self.notifier.clone())
    }

    pub fn admin_session(&self) -> AdminSession {
        AdminSession::new(self.storage.clone())
    }

    pub fn credentials(&self) -> StaticCredentials {
        StaticCredentials::new(
            self.config.admin.username.clone(),
            self.config.admin.password_hash.clone(),
        )
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}
