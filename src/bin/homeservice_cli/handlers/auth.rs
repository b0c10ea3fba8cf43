#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;
use std::sync::Arc;

use homeservice_admin::api::FileCookieStore;
use homeservice_admin::api::cookies::{ACCESS_TOKEN_COOKIE, CookieStore};
use homeservice_admin::auth::{AuthGate, GuardDecision};
use homeservice_admin::config::Settings;
use serde_json::json;

use crate::args::AuthCmd;
use crate::client::{CliError, Ctx};
use crate::io::read_opt_value;
use crate::print::print_json;

/// Auth commands run unguarded and, apart from `logout`, without a site URL.
pub async fn handle(settings: &Settings, summary: bool, cmd: AuthCmd) -> Result<(), CliError> {
    let cookies = Arc::new(FileCookieStore::new(settings.auth.cookie_file.clone()));
    let gate = AuthGate::new(cookies.clone(), settings.auth.sign_in_path.clone());
    match cmd {
        AuthCmd::Status => {
            let state = gate.check();
            if summary {
                println!("{state}");
                Ok(())
            } else {
                print_json(&json!({ "state": state.as_str() }))
            }
        }
        AuthCmd::Guard { path } => {
            let value = match gate.guard(&path) {
                GuardDecision::Allow => json!({ "decision": "allow", "path": path }),
                GuardDecision::Redirect { location } => {
                    json!({ "decision": "redirect", "path": path, "location": location })
                }
            };
            if summary {
                println!("{}", value["location"].as_str().unwrap_or("allow"));
                Ok(())
            } else {
                print_json(&value)
            }
        }
        AuthCmd::SetToken {
            token_file,
            token_env,
        } => set_token(cookies.as_ref(), token_file, token_env),
        AuthCmd::Logout => {
            let ctx = Ctx::new(settings, summary)?;
            ctx.api.sign_out().await?;
            eprintln!("ok: signed out");
            Ok(())
        }
    }
}

fn set_token(
    cookies: &dyn CookieStore,
    token_file: Option<PathBuf>,
    token_env: Option<String>,
) -> Result<(), CliError> {
    let token = read_opt_value(token_env, token_file)?
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(CliError::MissingToken)?;
    cookies.set(ACCESS_TOKEN_COOKIE, &token);
    eprintln!("ok: access token stored");
    Ok(())
}
