//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{num::NonZeroUsize, path::PathBuf, str::FromStr, time::Duration};

use clap::{Args, builder::BoolishValueParser};
use config::{Config, Environment, File};
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const LOCAL_CONFIG_BASENAME: &str = "homeservice";
const ENV_PREFIX: &str = "HOMESERVICE";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_ENTRIES: usize = 256;
const DEFAULT_STALE_TIME_MS: u64 = 0;
const DEFAULT_QUERY_RETRIES: u32 = 0;
const DEFAULT_DASHBOARD_REFETCH_MS: u64 = 5000;
const DEFAULT_COOKIE_FILE: &str = ".homeservice/cookies.json";
const DEFAULT_SIGN_IN_PATH: &str = "/sign-in";
const MAX_QUERY_RETRIES: u32 = 10;

/// Command-line overrides shared by every binary that loads settings.
#[derive(Debug, Args, Default, Clone)]
pub struct ConfigOverrides {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "HOMESERVICE_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    /// Base URL of the admin API (e.g. https://admin.example.com).
    #[arg(long = "site", env = "HOMESERVICE_SITE", value_name = "URL", global = true)]
    pub site: Option<String>,

    /// Override the request timeout.
    #[arg(long = "timeout-seconds", value_name = "SECONDS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Override the cookie jar location.
    #[arg(
        long = "cookie-file",
        env = "HOMESERVICE_COOKIE_FILE",
        value_name = "PATH",
        global = true
    )]
    pub cookie_file: Option<PathBuf>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub cache: CacheSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Absent until configured; commands that talk to the API require it.
    pub base_url: Option<Url>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub max_entries: NonZeroUsize,
    pub stale_time_ms: u64,
    pub query_retries: u32,
    /// Zero disables dashboard polling.
    pub dashboard_refetch_ms: u64,
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub cookie_file: PathBuf,
    pub sign_in_path: String,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(overrides: &ConfigOverrides) -> Result<Settings, LoadError> {
    let mut builder =
        Config::builder().add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = overrides.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(overrides);
    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    cache: RawCacheSettings,
    auth: RawAuthSettings,
    logging: RawLoggingSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(site) = overrides.site.as_ref() {
            self.api.base_url = Some(site.clone());
        }
        if let Some(seconds) = overrides.timeout_secs {
            self.api.timeout_secs = Some(seconds);
        }
        if let Some(path) = overrides.cookie_file.as_ref() {
            self.auth.cookie_file = Some(path.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            cache,
            auth,
            logging,
        } = raw;

        Ok(Self {
            api: build_api_settings(api)?,
            cache: build_cache_settings(cache)?,
            auth: build_auth_settings(auth)?,
            logging: build_logging_settings(logging)?,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let base_url = match api.base_url.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => {
            let url = Url::parse(value)
                .map_err(|err| LoadError::invalid("api.base_url", format!("invalid URL: {err}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(LoadError::invalid(
                    "api.base_url",
                    "scheme must be http or https",
                ));
            }
            Some(url)
        }
    };

    let timeout_secs = api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(LoadError::invalid(
            "api.timeout_secs",
            "must be greater than zero",
        ));
    }

    Ok(ApiSettings {
        base_url,
        timeout: Duration::from_secs(timeout_secs),
    })
}

fn build_cache_settings(cache: RawCacheSettings) -> Result<CacheSettings, LoadError> {
    let max_entries = NonZeroUsize::new(cache.max_entries.unwrap_or(DEFAULT_MAX_ENTRIES))
        .ok_or_else(|| LoadError::invalid("cache.max_entries", "must be greater than zero"))?;

    let query_retries = cache.query_retries.unwrap_or(DEFAULT_QUERY_RETRIES);
    if query_retries > MAX_QUERY_RETRIES {
        return Err(LoadError::invalid(
            "cache.query_retries",
            format!("must be at most {MAX_QUERY_RETRIES}"),
        ));
    }

    Ok(CacheSettings {
        max_entries,
        stale_time_ms: cache.stale_time_ms.unwrap_or(DEFAULT_STALE_TIME_MS),
        query_retries,
        dashboard_refetch_ms: cache
            .dashboard_refetch_ms
            .unwrap_or(DEFAULT_DASHBOARD_REFETCH_MS),
    })
}

fn build_auth_settings(auth: RawAuthSettings) -> Result<AuthSettings, LoadError> {
    let cookie_file = auth
        .cookie_file
        .unwrap_or_else(|| PathBuf::from(DEFAULT_COOKIE_FILE));
    if cookie_file.as_os_str().is_empty() {
        return Err(LoadError::invalid("auth.cookie_file", "must not be empty"));
    }

    let sign_in_path = auth
        .sign_in_path
        .unwrap_or_else(|| DEFAULT_SIGN_IN_PATH.to_string());
    if !sign_in_path.starts_with('/') {
        return Err(LoadError::invalid(
            "auth.sign_in_path",
            "must be an absolute path starting with `/`",
        ));
    }

    Ok(AuthSettings {
        cookie_file,
        sign_in_path,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::WARN,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    max_entries: Option<usize>,
    stale_time_ms: Option<u64>,
    query_retries: Option<u32>,
    dashboard_refetch_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawAuthSettings {
    cookie_file: Option<PathBuf>,
    sign_in_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}
