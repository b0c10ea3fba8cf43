#![deny(clippy::all, clippy::pedantic)]

use std::sync::Arc;
use std::time::Duration;

use homeservice_admin::api::cookies::{ACCESS_TOKEN_COOKIE, CookieStore};
use homeservice_admin::api::{ApiClient, FileCookieStore, MemoryCookieStore};
use homeservice_admin::cache::{MemoryNotifier, QueryCache};
use homeservice_admin::config::{ConfigOverrides, load};
use homeservice_admin::resources::AdminApi;
use httpmock::prelude::*;
use reqwest::Url;
use serde_json::json;
use tempfile::{NamedTempFile, TempDir};

use crate::args::{
    AuthCmd, CatalogueCmd, IconTypeArg, IconsCmd, JsonInput, ReservationStatusArg,
    ReservationsCmd,
};
use crate::client::{CliError, Ctx};
use crate::handlers::{auth, icons, reservations, services};

fn ctx(server: &MockServer) -> (Ctx, Arc<MemoryNotifier>) {
    let cookies = Arc::new(MemoryCookieStore::with_access_token("token"));
    let client = ApiClient::new(
        Url::parse(&server.base_url()).expect("url"),
        Duration::from_secs(5),
        cookies,
    )
    .expect("client");
    let notifier = Arc::new(MemoryNotifier::new());
    let api = AdminApi::new(client, QueryCache::default(), notifier.clone(), "/sign-in");
    (
        Ctx {
            api,
            summary: false,
        },
        notifier,
    )
}

fn tmp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tmp file");
    std::io::Write::write_all(&mut file, contents.as_bytes()).expect("write tmp");
    file
}

#[test]
fn read_json_prefers_file_over_inline() -> Result<(), CliError> {
    let file = tmp_file(r#"{"days": []}"#);
    let hours: homeservice_admin::types::OperatingHours = crate::io::read_json(JsonInput {
        data: Some("not json".into()),
        data_file: Some(file.path().to_path_buf()),
    })?;
    assert!(hours.days.is_empty());
    Ok(())
}

#[test]
fn parse_date_rejects_invalid() {
    let err = crate::io::parse_date("2024/05/01").expect_err("invalid date");
    assert!(matches!(err, CliError::InvalidInput(_)));
}

#[test]
fn guard_without_token_redirects_with_route() {
    let server = MockServer::start();
    let (ctx, _) = ctx(&server);
    ctx.api.client().cookies().clear_auth();

    let err = ctx.guard("/reservations").expect_err("redirect");
    match err {
        CliError::Redirect { location } => {
            assert_eq!(location, "/sign-in?redirect=%2Freservations");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn reservations_list_sends_filters() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/admin/reservations/list")
                .query_param("status", "confirmed")
                .query_param("startDate", "2024-05-01")
                .query_param("limit", "10")
                .header("cookie", "access_token=token");
            then.status(200).json_body(json!({"success": true, "data": []}));
        })
        .await;

    let (ctx, _) = ctx(&server);
    reservations::handle(
        &ctx,
        ReservationsCmd::List {
            status: Some(ReservationStatusArg::Confirmed),
            search: None,
            start_date: Some("2024-05-01".into()),
            end_date: None,
            page: None,
            limit: Some(10),
        },
    )
    .await?;
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn reservation_status_change_reports_success() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/admin/reservations/9/status")
                .json_body(json!({"status": "completed"}));
            then.status(200).json_body(json!({"success": true}));
        })
        .await;

    let (ctx, notifier) = ctx(&server);
    reservations::handle(
        &ctx,
        ReservationsCmd::Status {
            id: "9".into(),
            status: ReservationStatusArg::Completed,
        },
    )
    .await?;
    mock.assert_async().await;
    assert_eq!(notifier.toasts()[0].text, "reservation marked completed");
    Ok(())
}

#[tokio::test]
async fn services_create_reads_data_file() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/admin/services")
                .json_body_includes(r#"{"title":"Tint","estimatedDuration":60}"#);
            then.status(201).json_body(json!({"data": {
                "id": 3, "title": "Tint", "description": "Film",
                "iconName": null, "iconColor": null,
                "estimatedDuration": 60, "isActive": true
            }}));
        })
        .await;

    let file = tmp_file(r#"{"title":"Tint","description":"Film","estimatedDuration":60}"#);
    let (ctx, _) = ctx(&server);
    services::handle(
        &ctx,
        CatalogueCmd::Create {
            input: JsonInput {
                data: None,
                data_file: Some(file.path().to_path_buf()),
            },
        },
    )
    .await?;
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn server_error_surfaces_envelope_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/admin/icons/4/delete");
            then.status(409).json_body(json!({
                "success": false,
                "error": {"code": "IN_USE", "message": "icon is used by a service"}
            }));
        })
        .await;

    let (ctx, notifier) = ctx(&server);
    let err = icons::handle(&ctx, IconsCmd::Delete { id: "4".into() })
        .await
        .expect_err("conflict");
    assert_eq!(err.to_string(), "icon is used by a service");
    assert_eq!(notifier.toasts()[0].text, "icon is used by a service");
}

#[tokio::test]
async fn icon_create_reads_svg_file() -> Result<(), CliError> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/admin/icons")
                .json_body(json!({"name": "brush", "type": "FILL", "svg": "<svg></svg>"}));
            then.status(201).json_body(json!({"data": {
                "id": 1, "name": "brush", "type": "FILL", "svg": "<svg></svg>",
                "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"
            }}));
        })
        .await;

    let svg = tmp_file("<svg></svg>");
    let (ctx, _) = ctx(&server);
    icons::handle(
        &ctx,
        IconsCmd::Create {
            name: "brush".into(),
            icon_type: IconTypeArg::Fill,
            svg: None,
            svg_file: Some(svg.path().to_path_buf()),
        },
    )
    .await?;
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn set_token_writes_cookie_jar() -> Result<(), CliError> {
    let dir = TempDir::new().expect("tmp dir");
    let jar = dir.path().join("cookies.json");
    let token = tmp_file("  secret-token\n");
    let settings = load(&ConfigOverrides {
        cookie_file: Some(jar.clone()),
        ..ConfigOverrides::default()
    })?;

    auth::handle(
        &settings,
        false,
        AuthCmd::SetToken {
            token_file: Some(token.path().to_path_buf()),
            token_env: Some("ignored".into()),
        },
    )
    .await?;

    let stored = FileCookieStore::new(jar).get(ACCESS_TOKEN_COOKIE);
    assert_eq!(stored.as_deref(), Some("secret-token"));
    Ok(())
}
