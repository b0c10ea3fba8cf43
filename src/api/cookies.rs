//! Auth cookie storage.
//!
//! The remote API authenticates with two cookies issued at sign-in. The
//! transport reads them for every request and writes back rotations; the
//! auth gate reads the access token on every check.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use tracing::{debug, warn};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// The cookies the transport forwards and accepts rotations for.
pub const AUTH_COOKIES: [&str; 2] = [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE];

pub trait CookieStore: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&self, name: &str, value: &str);
    fn remove(&self, name: &str);

    fn clear_auth(&self) {
        for name in AUTH_COOKIES {
            self.remove(name);
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    values: DashMap<String, String>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_access_token(token: &str) -> Self {
        let store = Self::new();
        store.set(ACCESS_TOKEN_COOKIE, token);
        store
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).map(|value| value.clone())
    }

    fn set(&self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    fn remove(&self, name: &str) {
        self.values.remove(name);
    }
}

/// Cookie jar persisted as a JSON object of `name → value`.
///
/// The file is re-read on every lookup so a sign-in performed by another
/// process is picked up without restarting.
#[derive(Debug, Clone)]
pub struct FileCookieStore {
    path: PathBuf,
}

impl FileCookieStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read cookie file");
                return BTreeMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring malformed cookie file");
                BTreeMap::new()
            }
        }
    }

    fn store(&self, values: &BTreeMap<String, String>) {
        let body = match serde_json::to_string_pretty(values) {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "failed to encode cookies");
                return;
            }
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(err) = fs::create_dir_all(parent)
        {
            warn!(path = %parent.display(), error = %err, "failed to create cookie directory");
            return;
        }
        match fs::write(&self.path, body) {
            Ok(()) => debug!(path = %self.path.display(), "cookie file updated"),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to write cookie file");
            }
        }
    }
}

impl CookieStore for FileCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        self.load().remove(name)
    }

    fn set(&self, name: &str, value: &str) {
        let mut values = self.load();
        values.insert(name.to_string(), value.to_string());
        self.store(&values);
    }

    fn remove(&self, name: &str) {
        let mut values = self.load();
        if values.remove(name).is_some() {
            self.store(&values);
        }
    }
}

/// Parses a `Set-Cookie` header into `(name, value, expired)`.
///
/// A cookie counts as expired when its value is empty or it carries
/// `Max-Age=0` (or a negative max-age), which is how the API clears tokens.
pub(crate) fn parse_set_cookie(header: &str) -> Option<(String, String, bool)> {
    let mut parts = header.split(';');
    let (name, value) = parts.next()?.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let value = value.trim().trim_matches('"').to_string();

    let max_age_expired = parts.any(|attr| {
        attr.split_once('=').is_some_and(|(key, raw)| {
            key.trim().eq_ignore_ascii_case("max-age")
                && raw.trim().parse::<i64>().is_ok_and(|age| age <= 0)
        })
    });

    let expired = value.is_empty() || max_age_expired;
    Some((name.to_string(), value, expired))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryCookieStore::with_access_token("abc");
        store.set(REFRESH_TOKEN_COOKIE, "def");
        assert_eq!(store.get(ACCESS_TOKEN_COOKIE).as_deref(), Some("abc"));

        store.clear_auth();
        assert!(store.get(ACCESS_TOKEN_COOKIE).is_none());
        assert!(store.get(REFRESH_TOKEN_COOKIE).is_none());
    }

    #[test]
    fn file_store_persists_between_instances() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("cookies.json");

        FileCookieStore::new(&path).set(ACCESS_TOKEN_COOKIE, "tok");
        let reopened = FileCookieStore::new(&path);
        assert_eq!(reopened.get(ACCESS_TOKEN_COOKIE).as_deref(), Some("tok"));

        reopened.remove(ACCESS_TOKEN_COOKIE);
        assert!(FileCookieStore::new(&path).get(ACCESS_TOKEN_COOKIE).is_none());
    }

    #[test]
    fn missing_or_malformed_file_reads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cookies.json");
        assert!(FileCookieStore::new(&path).get(ACCESS_TOKEN_COOKIE).is_none());

        fs::write(&path, "not json").expect("write");
        assert!(FileCookieStore::new(&path).get(ACCESS_TOKEN_COOKIE).is_none());
    }

    #[test]
    fn parses_set_cookie_headers() {
        assert_eq!(
            parse_set_cookie("access_token=new; Path=/; HttpOnly"),
            Some(("access_token".into(), "new".into(), false))
        );
        assert_eq!(
            parse_set_cookie("refresh_token=gone; Max-Age=0; Path=/"),
            Some(("refresh_token".into(), "gone".into(), true))
        );
        assert_eq!(
            parse_set_cookie("access_token=; Path=/"),
            Some(("access_token".into(), String::new(), true))
        );
        assert_eq!(parse_set_cookie("garbage"), None);
    }
}
