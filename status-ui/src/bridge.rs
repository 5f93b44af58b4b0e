//! Browser access: the injected `window.config`, the page query string and
//! the credentialed fetch.

use futures::future::{FutureExt, LocalBoxFuture};
use gloo_net::http::Request;
use js_sys::{Array, Reflect};
use status_core::client::{ConfigTransport, HttpResponse, TransportError};
use status_schema::{Button, InjectedConfig};
use wasm_bindgen::JsValue;
use web_sys::RequestCredentials;

fn field(obj: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// Reads the branding the server templated into the page. Fields that are
/// missing or of the wrong shape come back as `None`.
pub fn injected_config() -> InjectedConfig {
    let Some(config) = web_sys::window().and_then(|w| field(&w, "config")) else {
        tracing::debug!("window.config not present, using built-in branding");
        return InjectedConfig::default();
    };

    let text = |key: &str| field(&config, key).and_then(|v| v.as_string());

    // An unrendered template leaves a string here instead of an array.
    let buttons = field(&config, "buttons")
        .filter(Array::is_array)
        .and_then(|v| match serde_wasm_bindgen::from_value::<Vec<Button>>(v) {
            Ok(buttons) => Some(buttons),
            Err(e) => {
                tracing::warn!("ignoring malformed window.config.buttons: {e}");
                None
            }
        });

    InjectedConfig {
        logo: text("logo"),
        header: text("header"),
        link: text("link"),
        buttons,
    }
}

/// The current `location.search`, e.g. `?error=access_denied`.
pub fn location_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

pub struct BrowserTransport;

impl ConfigTransport for BrowserTransport {
    fn get<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<HttpResponse, TransportError>> {
        async move {
            let response = Request::get(url)
                .credentials(RequestCredentials::Include)
                .send()
                .await
                .map_err(|e| TransportError(e.to_string()))?;

            let status = response.status();
            let body = if status == 200 {
                response
                    .text()
                    .await
                    .map_err(|e| TransportError(e.to_string()))?
            } else {
                String::new()
            };
            Ok(HttpResponse { status, body })
        }
        .boxed_local()
    }
}
