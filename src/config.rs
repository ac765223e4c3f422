//! Monitor configuration.
//!
//! Values are layered, later sources winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`--config`)
//! 3. `SIMWATCH_*` environment variables (a `.env` file is honoured by the binary)
//! 4. command-line overrides
//!
//! | Key              | Env var                   | Default                    |
//! |------------------|---------------------------|----------------------------|
//! | `device_url`     | `SIMWATCH_DEVICE_URL`     | required for HTTP polling  |
//! | `username`       | `SIMWATCH_USERNAME`       | empty                      |
//! | `password`       | `SIMWATCH_PASSWORD`       | empty                      |
//! | `status_path`    | `SIMWATCH_STATUS_PATH`    | `/status.html`             |
//! | `bot_token`      | `SIMWATCH_BOT_TOKEN`      | required unless dry-run    |
//! | `chat_id`        | `SIMWATCH_CHAT_ID`        | required unless dry-run    |
//! | `port`           | `SIMWATCH_PORT`           | `1`                        |
//! | `grace_period`   | `SIMWATCH_GRACE_PERIOD`   | `2m`                       |
//! | `state_path`     | `SIMWATCH_STATE_PATH`     | `statuses.json`            |
//! | `log_path`       | `SIMWATCH_LOG_PATH`       | `status.log` (empty: off)  |
//! | `fetch_timeout`  | `SIMWATCH_FETCH_TIMEOUT`  | `15s`                      |
//! | `notify_timeout` | `SIMWATCH_NOTIFY_TIMEOUT` | `10s`                      |
//! | `telegram_api`   | `SIMWATCH_TELEGRAM_API`   | `https://api.telegram.org` |

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::data::DebouncePolicy;

/// Prefix of environment variables read by [`MonitorConfig::load`].
pub const ENV_PREFIX: &str = "SIMWATCH";

/// Fully resolved configuration, passed to the monitor at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub device_url: String,
    pub username: String,
    pub password: String,
    pub status_path: String,
    pub bot_token: String,
    pub chat_id: String,
    pub telegram_api: String,
    pub port: u16,
    pub grace_period: Duration,
    pub state_path: PathBuf,
    pub log_path: Option<PathBuf>,
    pub fetch_timeout: Duration,
    pub notify_timeout: Duration,
}

impl std::fmt::Debug for MonitorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorConfig")
            .field("device_url", &self.device_url)
            .field("username", &self.username)
            .field("status_path", &self.status_path)
            .field("chat_id", &self.chat_id)
            .field("telegram_api", &self.telegram_api)
            .field("port", &self.port)
            .field("grace_period", &self.grace_period)
            .field("state_path", &self.state_path)
            .field("log_path", &self.log_path)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("notify_timeout", &self.notify_timeout)
            .finish_non_exhaustive()
    }
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub grace_period: Option<String>,
    pub state_path: Option<PathBuf>,
}

/// Shape of the merged sources before validation.
#[derive(Debug, Deserialize)]
struct RawConfig {
    device_url: String,
    username: String,
    password: String,
    status_path: String,
    bot_token: String,
    chat_id: String,
    telegram_api: String,
    port: u16,
    grace_period: String,
    state_path: PathBuf,
    log_path: String,
    fetch_timeout: String,
    notify_timeout: String,
}

impl MonitorConfig {
    /// Builder pre-populated with the defaults.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("device_url", "")?
            .set_default("username", "")?
            .set_default("password", "")?
            .set_default("status_path", "/status.html")?
            .set_default("bot_token", "")?
            .set_default("chat_id", "")?
            .set_default("telegram_api", "https://api.telegram.org")?
            .set_default("port", 1)?
            .set_default("grace_period", "2m")?
            .set_default("state_path", "statuses.json")?
            .set_default("log_path", "status.log")?
            .set_default("fetch_timeout", "15s")?
            .set_default("notify_timeout", "10s")?)
    }

    /// Load from defaults, an optional file, the environment and overrides.
    pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut builder = Self::defaults()?;
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));
        Self::from_builder(apply_overrides(builder, overrides)?)
    }

    /// Resolve an assembled builder into a validated configuration.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let raw: RawConfig = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        let duration = |name: &str, value: &str| {
            parse_duration(value).with_context(|| format!("Invalid {}: {:?}", name, value))
        };

        let grace_period = duration("grace_period", &raw.grace_period)?;
        let fetch_timeout = duration("fetch_timeout", &raw.fetch_timeout)?;
        let notify_timeout = duration("notify_timeout", &raw.notify_timeout)?;
        if fetch_timeout.is_zero() || notify_timeout.is_zero() {
            bail!("Network timeouts must be greater than zero");
        }

        Ok(Self {
            device_url: raw.device_url.trim().to_string(),
            username: raw.username,
            password: raw.password,
            status_path: raw.status_path,
            bot_token: raw.bot_token.trim().to_string(),
            chat_id: raw.chat_id.trim().to_string(),
            telegram_api: raw.telegram_api,
            port: raw.port,
            grace_period,
            state_path: raw.state_path,
            log_path: Some(PathBuf::from(raw.log_path.trim())).filter(|p| !p.as_os_str().is_empty()),
            fetch_timeout,
            notify_timeout,
        })
    }

    /// Debounce policy derived from the grace period.
    pub fn policy(&self) -> DebouncePolicy {
        DebouncePolicy::new(self.grace_period)
    }

    /// Fail unless the device can be polled over HTTP.
    pub fn ensure_device(&self) -> Result<()> {
        if self.device_url.is_empty() {
            bail!("device_url is not set (SIMWATCH_DEVICE_URL)");
        }
        Ok(())
    }

    /// Fail unless Telegram delivery is configured.
    pub fn ensure_telegram(&self) -> Result<()> {
        if self.bot_token.is_empty() {
            bail!("bot_token is not set (SIMWATCH_BOT_TOKEN)");
        }
        if self.chat_id.is_empty() {
            bail!("chat_id is not set (SIMWATCH_CHAT_ID)");
        }
        Ok(())
    }
}

fn apply_overrides(
    builder: ConfigBuilder<DefaultState>,
    overrides: &Overrides,
) -> Result<ConfigBuilder<DefaultState>> {
    Ok(builder
        .set_override_option("port", overrides.port.map(i64::from))?
        .set_override_option("grace_period", overrides.grace_period.clone())?
        .set_override_option(
            "state_path",
            overrides
                .state_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
        )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str, overrides: &Overrides) -> Result<MonitorConfig> {
        let builder = MonitorConfig::defaults()?.add_source(File::from_str(toml, FileFormat::Toml));
        MonitorConfig::from_builder(apply_overrides(builder, overrides)?)
    }

    #[test]
    fn test_defaults() {
        let config = from_toml("", &Overrides::default()).unwrap();

        assert_eq!(config.port, 1);
        assert_eq!(config.grace_period, Duration::from_secs(120));
        assert_eq!(config.state_path, PathBuf::from("statuses.json"));
        assert_eq!(config.log_path, Some(PathBuf::from("status.log")));
        assert_eq!(config.status_path, "/status.html");
        assert_eq!(config.fetch_timeout, Duration::from_secs(15));
        assert_eq!(config.notify_timeout, Duration::from_secs(10));
        assert!(config.ensure_device().is_err());
        assert!(config.ensure_telegram().is_err());
    }

    #[test]
    fn test_file_values() {
        let config = from_toml(
            r#"
            device_url = "http://10.0.0.5/default/en_US"
            username = "admin"
            password = "0123"
            bot_token = "42:abc"
            chat_id = "-100777"
            port = 7
            grace_period = "90s"
            log_path = ""
            "#,
            &Overrides::default(),
        )
        .unwrap();

        assert_eq!(config.device_url, "http://10.0.0.5/default/en_US");
        assert_eq!(config.password, "0123");
        assert_eq!(config.port, 7);
        assert_eq!(config.grace_period, Duration::from_secs(90));
        assert_eq!(config.log_path, None);
        assert_eq!(config.policy().grace_period, Duration::from_secs(90));
        assert!(config.ensure_device().is_ok());
        assert!(config.ensure_telegram().is_ok());
    }

    #[test]
    fn test_overrides_win() {
        let overrides = Overrides {
            port: Some(3),
            grace_period: Some("5m".to_string()),
            state_path: Some(PathBuf::from("/var/lib/simwatch/state.json")),
        };

        let config = from_toml("port = 7\ngrace_period = \"90s\"", &overrides).unwrap();

        assert_eq!(config.port, 3);
        assert_eq!(config.grace_period, Duration::from_secs(300));
        assert_eq!(config.state_path, PathBuf::from("/var/lib/simwatch/state.json"));
    }

    #[test]
    fn test_invalid_grace_period() {
        let err = from_toml("grace_period = \"soon\"", &Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("grace_period"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(from_toml("fetch_timeout = \"0s\"", &Overrides::default()).is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = from_toml(
            "password = \"hunter2\"\nbot_token = \"42:abc\"",
            &Overrides::default(),
        )
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("42:abc"));
    }
}
