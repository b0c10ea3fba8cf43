#![deny(clippy::all, clippy::pedantic)]

use std::sync::Arc;

use homeservice_admin::ApiError;
use homeservice_admin::api::{ApiClient, FileCookieStore};
use homeservice_admin::auth::GuardDecision;
use homeservice_admin::cache::{CacheConfig, Notifier, QueryCache, Toast, ToastKind};
use homeservice_admin::config::{LoadError, Settings};
use homeservice_admin::resources::AdminApi;
use homeservice_admin::telemetry::TelemetryError;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("site URL is required (use --site, HOMESERVICE_SITE or api.base_url)")]
    MissingSite,
    #[error("access token is required (use --token-file or HOMESERVICE_ACCESS_TOKEN)")]
    MissingToken,
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not signed in; sign in at {location}")]
    Redirect { location: String },
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to render output: {0}")]
    Output(String),
}

/// Writes toasts to stderr so stdout carries only command output.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Success => eprintln!("ok: {}", toast.text),
            ToastKind::Error => eprintln!("error: {}", toast.text),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Ctx {
    pub api: AdminApi,
    pub summary: bool,
}

impl Ctx {
    pub fn new(settings: &Settings, summary: bool) -> Result<Self, CliError> {
        let base = settings.api.base_url.clone().ok_or(CliError::MissingSite)?;
        let cookies = Arc::new(FileCookieStore::new(settings.auth.cookie_file.clone()));
        let client = ApiClient::new(base, settings.api.timeout, cookies)?;
        let cache = QueryCache::new(CacheConfig::from(&settings.cache));
        let api = AdminApi::new(
            client,
            cache,
            Arc::new(ConsoleNotifier),
            settings.auth.sign_in_path.clone(),
        );
        Ok(Self { api, summary })
    }

    /// Runs the route guard; a redirect becomes an error so the process exits
    /// non-zero without touching the API.
    pub fn guard(&self, route: &str) -> Result<(), CliError> {
        match self.api.gate().guard(route) {
            GuardDecision::Allow => {
                debug!(route, "route guard passed");
                Ok(())
            }
            GuardDecision::Redirect { location } => Err(CliError::Redirect { location }),
        }
    }
}
