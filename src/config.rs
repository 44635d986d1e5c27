// src/config.rs
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use xdg::BaseDirectories;

pub const APP_NAME: &str = "price-verifier";
pub const DEFAULT_CONFIG_FILENAME: &str = "config.toml";
pub const API_URL_ENV: &str = "PRICE_VERIFIER_API_URL";

// Main configuration structure, mapping to config.toml
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default)]
    pub interface: InterfaceConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub keybindings: KeyBindingsConfig,
    // Where the file was read from; not part of config.toml itself
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}
fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Credentials for one-shot CLI commands. The TUI always asks.
#[derive(Deserialize, Serialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct InterfaceConfig {
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
    #[serde(default = "default_max_log_entries")]
    pub max_log_entries: usize,
}

fn default_refresh_interval_ms() -> u64 {
    30_000
}
fn default_toast_duration_ms() -> u64 {
    3000
}
fn default_max_log_entries() -> usize {
    1000
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        InterfaceConfig {
            refresh_interval_ms: default_refresh_interval_ms(),
            toast_duration_ms: default_toast_duration_ms(),
            max_log_entries: default_max_log_entries(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ListConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_reset_page_on_change")]
    pub reset_page_on_change: bool,
}

fn default_page_size() -> usize {
    5
}
fn default_reset_page_on_change() -> bool {
    true
}

impl Default for ListConfig {
    fn default() -> Self {
        ListConfig {
            page_size: default_page_size(),
            reset_page_on_change: default_reset_page_on_change(),
        }
    }
}

impl ListConfig {
    pub fn page_size(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.page_size).context("list.page_size must be at least 1")
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String, // "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_dir")]
    pub log_dir: String, // Path, can use ~
    #[serde(default = "default_rotate_daily")]
    pub rotate_daily: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    "~/.price-verifier/logs".to_string()
}
fn default_rotate_daily() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            log_dir: default_log_dir(),
            rotate_daily: default_rotate_daily(),
        }
    }
}

impl LoggingConfig {
    pub fn log_dir_path(&self) -> Result<PathBuf> {
        let expanded = shellexpand::full(&self.log_dir)
            .with_context(|| format!("Failed to expand log_dir '{}'", self.log_dir))?;
        Ok(PathBuf::from(expanded.as_ref()))
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct KeyBindingsConfig {
    #[serde(default = "default_quit")] pub quit: String,
    #[serde(default = "default_help")] pub help: String,
    #[serde(default = "default_logs")] pub logs: String,
    #[serde(default = "default_next_focus")] pub next_focus: String,
    #[serde(default = "default_prev_focus")] pub prev_focus: String,
    #[serde(default = "default_up")] pub up: String,
    #[serde(default = "default_down")] pub down: String,
    #[serde(default = "default_prev_page")] pub prev_page: String,
    #[serde(default = "default_next_page")] pub next_page: String,
    #[serde(default = "default_go_to_page")] pub go_to_page: String,
    #[serde(default = "default_edit")] pub edit: String,
    #[serde(default = "default_delete")] pub delete: String,
    #[serde(default = "default_refresh")] pub refresh: String,
    #[serde(default = "default_logout")] pub logout: String,
    #[serde(default = "default_register")] pub register: String,
}

fn default_quit() -> String { "q".to_string() }
fn default_help() -> String { "?".to_string() }
fn default_logs() -> String { "Ctrl+l".to_string() }
fn default_next_focus() -> String { "Tab".to_string() }
fn default_prev_focus() -> String { "BackTab".to_string() }
fn default_up() -> String { "Up".to_string() }
fn default_down() -> String { "Down".to_string() }
fn default_prev_page() -> String { "Left".to_string() }
fn default_next_page() -> String { "Right".to_string() }
fn default_go_to_page() -> String { "g".to_string() }
fn default_edit() -> String { "e".to_string() }
fn default_delete() -> String { "d".to_string() }
fn default_refresh() -> String { "r".to_string() }
fn default_logout() -> String { "L".to_string() }
fn default_register() -> String { "Ctrl+r".to_string() }

impl Default for KeyBindingsConfig {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            help: default_help(),
            logs: default_logs(),
            next_focus: default_next_focus(),
            prev_focus: default_prev_focus(),
            up: default_up(),
            down: default_down(),
            prev_page: default_prev_page(),
            next_page: default_next_page(),
            go_to_page: default_go_to_page(),
            edit: default_edit(),
            delete: default_delete(),
            refresh: default_refresh(),
            logout: default_logout(),
            register: default_register(),
        }
    }
}

impl KeyBindingsConfig {
    /// `(action, binding)` pairs in help-screen order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("quit", self.quit.as_str()),
            ("help", self.help.as_str()),
            ("logs", self.logs.as_str()),
            ("next_focus", self.next_focus.as_str()),
            ("prev_focus", self.prev_focus.as_str()),
            ("up", self.up.as_str()),
            ("down", self.down.as_str()),
            ("prev_page", self.prev_page.as_str()),
            ("next_page", self.next_page.as_str()),
            ("go_to_page", self.go_to_page.as_str()),
            ("edit", self.edit.as_str()),
            ("delete", self.delete.as_str()),
            ("refresh", self.refresh.as_str()),
            ("logout", self.logout.as_str()),
            ("register", self.register.as_str()),
        ]
    }
}

impl Config {
    /// Loads the configuration file.
    ///
    /// An explicit path must exist and parse. Without one, the XDG config
    /// directory is searched and defaults are used when nothing is there.
    pub fn load(config_path_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_path_override {
            Some(path) => {
                debug!("Using provided config path override: {}", path.display());
                Some(path.to_path_buf())
            }
            None => {
                let xdg_dirs = BaseDirectories::with_prefix(APP_NAME)?;
                xdg_dirs.find_config_file(DEFAULT_CONFIG_FILENAME)
            }
        };

        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => {
                info!("No config file found, using defaults");
                Config::default()
            }
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from {}", path.display());
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse TOML configuration in {}", path.display()))?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// The API URL from the environment wins over the file.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            self.set_api_url(&url);
        }
    }

    pub fn set_api_url(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            debug!("API base URL overridden to {}", url);
            self.api.base_url = url.to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.list.page_size()?;
        if self.api.timeout_ms == 0 {
            bail!("api.timeout_ms must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config("[list]\npage_size = 10\n");
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.list.page_size, 10);
        assert!(config.list.reset_page_on_change);
        assert_eq!(config.api.base_url, "http://localhost:3001");
        assert_eq!(config.keybindings.quit, "q");
        assert_eq!(config.source_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("[list]\nrows = 3\n");
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn zero_page_size_is_invalid() {
        let file = write_config("[list]\npage_size = 0\n");
        let config = Config::from_file(file.path()).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        assert!(Config::load(Some(Path::new("/definitely/not/here.toml"))).is_err());
    }

    #[test]
    fn blank_url_override_is_ignored() {
        let mut config = Config::default();
        config.set_api_url("   ");
        assert_eq!(config.api.base_url, "http://localhost:3001");
        config.set_api_url(" https://api.example.com ");
        assert_eq!(config.api.base_url, "https://api.example.com");
    }

    #[test]
    fn auth_debug_hides_password() {
        let auth = AuthConfig { email: Some("a@b.c".into()), password: Some("secret".into()) };
        let rendered = format!("{:?}", auth);
        assert!(!rendered.contains("secret"));
    }
}
