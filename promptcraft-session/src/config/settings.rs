use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Where the user is sent when the session cannot be recovered.
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Overrides the directory holding the session file.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    promptcraft_api::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_login_path() -> String {
    "/login".to_string()
}

/// `PROMPTCRAFT_BASE_URL` -> `base_url`. Settings are flat, so there is no
/// nesting separator.
fn environment() -> Environment {
    Environment::with_prefix("PROMPTCRAFT")
        .prefix_separator("_")
        .try_parsing(true)
}

impl Settings {
    /// Optional TOML file (`PROMPTCRAFT_CONFIG`, default `promptcraft.toml`)
    /// overridden by `PROMPTCRAFT_*` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("PROMPTCRAFT_CONFIG").unwrap_or_else(|_| "promptcraft.toml".to_string());
        Self::load(&config_path, environment())
    }

    fn load(config_path: &str, env: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(env)
            .build()?;

        Self::from_config(settings)
    }

    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        config.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url is required".to_string());
        }
        if !self.base_url.starts_with("http") {
            return Err("base_url must be a valid HTTP(S) URL".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            login_path: default_login_path(),
            storage_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let settings = Settings::from_config(Config::builder().build().unwrap()).unwrap();
        assert_eq!(settings.base_url, "http://localhost:5000/api/v1");
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert_eq!(settings.login_path, "/login");
        assert!(settings.storage_dir.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::builder()
            .set_override("base_url", "https://api.promptcraft.dev/api/v1")
            .unwrap()
            .set_override("timeout_ms", 5000)
            .unwrap()
            .build()
            .unwrap();
        let settings = Settings::from_config(config).unwrap();
        assert_eq!(settings.base_url, "https://api.promptcraft.dev/api/v1");
        assert_eq!(settings.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn single_underscore_variables_are_read() {
        let vars = config::Map::from([
            ("PROMPTCRAFT_BASE_URL".to_string(), "https://single.example/api".to_string()),
            ("PROMPTCRAFT_TIMEOUT_MS".to_string(), "1234".to_string()),
            ("PROMPTCRAFT_LOGIN_PATH".to_string(), "/signin".to_string()),
            ("PROMPTCRAFT_STORAGE_DIR".to_string(), "/tmp/pc".to_string()),
            ("OTHER_BASE_URL".to_string(), "https://ignored.example".to_string()),
        ]);
        let settings =
            Settings::load("missing-promptcraft.toml", environment().source(Some(vars))).unwrap();
        assert_eq!(settings.base_url, "https://single.example/api");
        assert_eq!(settings.timeout_ms, 1234);
        assert_eq!(settings.login_path, "/signin");
        assert_eq!(settings.storage_dir, Some(PathBuf::from("/tmp/pc")));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut settings = Settings {
            base_url: "localhost:5000".into(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        settings.base_url = "http://localhost:5000/api/v1".into();
        settings.timeout_ms = 0;
        assert!(settings.validate().is_err());
    }
}
