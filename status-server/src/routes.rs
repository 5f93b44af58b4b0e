use crate::config::ServerConfig;
use crate::template;
use axum::{
    extract::State,
    http::{
        header::{CONTENT_TYPE, COOKIE},
        HeaderMap, StatusCode, Uri,
    },
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use status_core::client::CONFIG_PATH;
use status_schema::RemoteConfig;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Logo the dashboard falls back to; served even without a UI build.
pub const DEFAULT_LOGO_PATH: &str = "img/logo.svg";
const DEFAULT_LOGO_SVG: &str = include_str!("../../status-ui/img/logo.svg");

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub index: Arc<String>,
}

impl AppState {
    pub fn new(config: ServerConfig, template_source: &str) -> Self {
        let index = template::render_index(template_source, &config.ui);
        Self {
            config: Arc::new(config),
            index: Arc::new(index),
        }
    }
}

pub fn status_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route(CONFIG_PATH, get(handle_config))
        .fallback(handle_asset)
        .with_state(state)
}

async fn handle_index(State(state): State<AppState>) -> Html<String> {
    Html(state.index.as_str().to_owned())
}

async fn handle_config(State(state): State<AppState>, headers: HeaderMap) -> Json<RemoteConfig> {
    Json(remote_config_for(&state.config, &headers))
}

async fn handle_asset(State(state): State<AppState>, uri: Uri) -> Response {
    let Some(relative) = asset_path(uri.path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let content_type = content_type(&relative);

    match tokio::fs::read(state.config.assets_dir.join(&relative)).await {
        Ok(bytes) => ([(CONTENT_TYPE, content_type)], bytes).into_response(),
        Err(_) if relative == Path::new(DEFAULT_LOGO_PATH) => {
            ([(CONTENT_TYPE, content_type)], DEFAULT_LOGO_SVG).into_response()
        }
        Err(e) => {
            tracing::debug!(path = %relative.display(), "asset not served: {e}");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Maps a request path onto a file below the assets directory. Paths that
/// could leave it are refused.
pub fn asset_path(request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    if trimmed.is_empty() || trimmed.contains('\\') {
        return None;
    }
    let path = PathBuf::from(trimmed);
    let contained = path.components().all(|c| matches!(c, Component::Normal(_)));
    contained.then_some(path)
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("js") => "text/javascript",
        Some("wasm") => "application/wasm",
        Some("css") => "text/css",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("json") => "application/json",
        Some("html") => "text/html; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// With gating on, only a request carrying the session cookie counts as
/// authenticated. The session itself is checked by the identity layer.
pub fn remote_config_for(config: &ServerConfig, headers: &HeaderMap) -> RemoteConfig {
    let authenticated = !config.oidc || session_cookie(headers, &config.session_cookie).is_some();
    RemoteConfig {
        oidc: config.oidc,
        authenticated,
        ..RemoteConfig::default()
    }
}

fn session_cookie<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn gated() -> ServerConfig {
        ServerConfig {
            oidc: true,
            ..ServerConfig::default()
        }
    }

    fn with_cookie(raw: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static(raw));
        headers
    }

    #[test]
    fn open_mode_is_always_authenticated() {
        let cfg = remote_config_for(&ServerConfig::default(), &HeaderMap::new());
        assert_eq!(cfg, RemoteConfig::default());
    }

    #[test]
    fn gated_mode_requires_session_cookie() {
        let anonymous = remote_config_for(&gated(), &HeaderMap::new());
        assert!(anonymous.requires_login());

        let signed_in = remote_config_for(&gated(), &with_cookie("theme=dark; session=abc123"));
        assert!(signed_in.oidc);
        assert!(signed_in.authenticated);
    }

    #[test]
    fn empty_or_foreign_cookie_is_not_a_session() {
        assert!(remote_config_for(&gated(), &with_cookie("session=")).requires_login());
        assert!(remote_config_for(&gated(), &with_cookie("other_session=abc")).requires_login());
    }

    #[test]
    fn body_matches_wire_shape() {
        let body = serde_json::to_value(remote_config_for(&gated(), &HeaderMap::new()))
            .expect("encode");
        assert_eq!(body, serde_json::json!({"oidc": true, "authenticated": false}));
    }

    #[test]
    fn asset_paths_stay_inside_the_assets_dir() {
        assert_eq!(
            asset_path("/status-ui_bg.wasm"),
            Some(PathBuf::from("status-ui_bg.wasm"))
        );
        assert_eq!(asset_path("/img/logo.svg"), Some(PathBuf::from("img/logo.svg")));
        assert_eq!(asset_path("/"), None);
        assert_eq!(asset_path("/../secret"), None);
        assert_eq!(asset_path("/img/../../secret"), None);
        assert_eq!(asset_path("/img\\..\\secret"), None);
    }

    fn state_with_assets(dir: PathBuf) -> AppState {
        AppState::new(
            ServerConfig {
                assets_dir: dir,
                ..ServerConfig::default()
            },
            template::DEFAULT_INDEX,
        )
    }

    #[tokio::test]
    async fn serves_built_bundle_with_wasm_mime() {
        let dir = std::env::temp_dir().join(format!("status-assets-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.expect("mkdir");
        tokio::fs::write(dir.join(template::BUNDLE_WASM), b"\0asm")
            .await
            .expect("write");

        let uri: Uri = format!("/{}", template::BUNDLE_WASM).parse().expect("uri");
        let response = handle_asset(State(state_with_assets(dir.clone())), uri).await;
        let _ = tokio::fs::remove_dir_all(&dir).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/wasm");
    }

    #[tokio::test]
    async fn default_logo_is_served_without_a_build() {
        let state = state_with_assets(PathBuf::from("/nonexistent/status-ui/dist"));

        let logo = handle_asset(State(state.clone()), Uri::from_static("/img/logo.svg")).await;
        assert_eq!(logo.status(), StatusCode::OK);
        assert_eq!(logo.headers()[CONTENT_TYPE], "image/svg+xml");

        let missing = handle_asset(State(state), Uri::from_static("/status-ui.js")).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn index_is_rendered_once_at_startup() {
        let state = AppState::new(
            ServerConfig {
                ui: status_schema::InjectedConfig {
                    header: Some("Ops".into()),
                    ..Default::default()
                },
                ..ServerConfig::default()
            },
            template::DEFAULT_INDEX,
        );
        assert!(state.index.contains(r#"header: "Ops""#));
    }
}
