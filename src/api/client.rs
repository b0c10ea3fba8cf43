use std::sync::Arc;
use std::time::{Duration, Instant};

use homeservice_api_types::Page;
use metrics::histogram;
use reqwest::header::{self, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, warn};

use super::cookies::{AUTH_COOKIES, CookieStore, parse_set_cookie};
use super::envelope::RawEnvelope;
use crate::error::ApiError;
use crate::telemetry::METRIC_API_REQUEST_MS;

/// HTTP transport for the admin API.
///
/// Forwards the auth cookies on every request, applies `Set-Cookie`
/// rotations from responses, and unwraps the response envelope.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    cookies: Arc<dyn CookieStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        base: Url,
        timeout: Duration,
        cookies: Arc<dyn CookieStore>,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()?;
        Ok(Self::with_http(http, base, cookies))
    }

    pub fn with_http(http: Client, mut base: Url, cookies: Arc<dyn CookieStore>) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self {
            http,
            base,
            cookies,
        }
    }

    pub fn user_agent() -> &'static str {
        concat!("homeservice-admin/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn cookies(&self) -> &Arc<dyn CookieStore> {
        &self.cookies
    }

    /// Resolves `/api/...` (with optional query string) against the base URL.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::Transport(format!("invalid request path {path}: {err}")))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, None).await?.into_data()
    }

    pub async fn get_page<T: DeserializeOwned>(&self, path: &str) -> Result<Page<T>, ApiError> {
        self.send(Method::GET, path, None).await?.into_page()
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, Some(body)).await?.into_data()
    }

    /// `POST` without a body whose response payload is ignored.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::POST, path, None)
            .await?
            .into_data::<IgnoredAny>()
            .map(|_| ())
    }

    /// `POST` whose response payload is ignored.
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.post::<B, IgnoredAny>(path, body).await.map(|_| ())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<RawEnvelope, ApiError> {
        let url = self.url(path)?;
        let started = Instant::now();
        let method_label = method.as_str().to_string();

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(header::ACCEPT, "application/json");
        if let Some(cookie) = self.cookie_header() {
            request = request.header(header::COOKIE, cookie);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let result = self.dispatch(request).await;
        let outcome = match &result {
            Ok(_) => "ok",
            Err(err) => err.kind(),
        };
        histogram!(METRIC_API_REQUEST_MS, "method" => method_label, "outcome" => outcome)
            .record(started.elapsed().as_secs_f64() * 1000.0);
        debug!(
            %method,
            path,
            outcome,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "api request finished"
        );
        result
    }

    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<RawEnvelope, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        self.apply_set_cookies(response.headers());

        let bytes = response.bytes().await?;
        decode_envelope(status, &bytes)
    }

    fn cookie_header(&self) -> Option<HeaderValue> {
        let pairs: Vec<String> = AUTH_COOKIES
            .iter()
            .filter_map(|name| self.cookies.get(name).map(|value| format!("{name}={value}")))
            .collect();
        if pairs.is_empty() {
            return None;
        }
        match HeaderValue::from_str(&pairs.join("; ")) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(error = %err, "stored cookie is not a valid header value");
                None
            }
        }
    }

    fn apply_set_cookies(&self, headers: &header::HeaderMap) {
        for raw in headers.get_all(header::SET_COOKIE) {
            let Ok(raw) = raw.to_str() else {
                continue;
            };
            let Some((name, value, expired)) = parse_set_cookie(raw) else {
                continue;
            };
            if !AUTH_COOKIES.contains(&name.as_str()) {
                continue;
            }
            if expired {
                debug!(cookie = %name, "auth cookie cleared by server");
                self.cookies.remove(&name);
            } else {
                debug!(cookie = %name, "auth cookie rotated");
                self.cookies.set(&name, &value);
            }
        }
    }
}

fn decode_envelope(status: StatusCode, bytes: &[u8]) -> Result<RawEnvelope, ApiError> {
    if !status.is_success() {
        let envelope: RawEnvelope = serde_json::from_slice(bytes).unwrap_or_default();
        return Err(envelope.status_error(status.as_u16(), status.canonical_reason()));
    }
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(RawEnvelope::default());
    }
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::cookies::{ACCESS_TOKEN_COOKIE, MemoryCookieStore, REFRESH_TOKEN_COOKIE};
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer, cookies: Arc<dyn CookieStore>) -> ApiClient {
        let base = Url::parse(&server.base_url()).expect("base url");
        ApiClient::new(base, Duration::from_secs(5), cookies).expect("client")
    }

    #[tokio::test]
    async fn forwards_auth_cookies_and_unwraps_data() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/admin/icons/list")
                    .header("cookie", "access_token=a; refresh_token=r");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({"success": true, "data": ["x"]}));
            })
            .await;

        let cookies = Arc::new(MemoryCookieStore::with_access_token("a"));
        cookies.set(REFRESH_TOKEN_COOKIE, "r");
        let api = client(&server, cookies);

        let names: Vec<String> = api.get("/api/admin/icons/list").await.expect("get");
        assert_eq!(names, vec!["x"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_maps_envelope_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/admin/services");
                then.status(422).json_body(json!({
                    "success": false,
                    "error": {
                        "code": "INVALID",
                        "message": "bad service",
                        "details": [{"field": "title", "message": "taken"}]
                    }
                }));
            })
            .await;

        let api = client(&server, Arc::new(MemoryCookieStore::new()));
        let err = api
            .post_unit("/api/admin/services", &json!({"title": "x"}))
            .await
            .expect_err("422");

        assert_eq!(err.status(), Some(422));
        assert_eq!(err.user_message(), "bad service");
        assert_eq!(err.field_errors().and_then(|f| f.get("title")), Some("taken"));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn non_json_error_body_uses_reason_phrase() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/admin/customers/1");
                then.status(502).body("<html>bad gateway</html>");
            })
            .await;

        let api = client(&server, Arc::new(MemoryCookieStore::new()));
        let err = api
            .get::<serde_json::Value>("/api/admin/customers/1")
            .await
            .expect_err("502");
        assert_eq!(err.user_message(), "Bad Gateway");
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn applies_cookie_rotation_and_expiry() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/admin/reviews/3/toggle");
                then.status(200)
                    .header("set-cookie", "access_token=rotated; Path=/; HttpOnly")
                    .json_body(json!({"success": true}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/admin/reviews/3/delete");
                then.status(200)
                    .header("set-cookie", "refresh_token=; Max-Age=0; Path=/")
                    .json_body(json!({"success": true}));
            })
            .await;

        let cookies = Arc::new(MemoryCookieStore::with_access_token("old"));
        cookies.set(REFRESH_TOKEN_COOKIE, "r");
        let api = client(&server, cookies.clone());

        api.post_empty("/api/admin/reviews/3/toggle").await.expect("toggle");
        assert_eq!(cookies.get(ACCESS_TOKEN_COOKIE).as_deref(), Some("rotated"));

        api.post_empty("/api/admin/reviews/3/delete").await.expect("delete");
        assert!(cookies.get(REFRESH_TOKEN_COOKIE).is_none());
    }

    #[test]
    fn base_path_is_preserved() {
        let api = ApiClient::with_http(
            Client::new(),
            Url::parse("https://admin.example.com/backend").expect("url"),
            Arc::new(MemoryCookieStore::new()),
        );
        assert_eq!(
            api.url("/api/admin/icons/list?type=FILL").expect("url").as_str(),
            "https://admin.example.com/backend/api/admin/icons/list?type=FILL"
        );
    }

    #[test]
    fn empty_success_body_is_an_empty_envelope() {
        let envelope = decode_envelope(StatusCode::NO_CONTENT, b"").expect("envelope");
        assert!(envelope.data.is_none());
    }
}
