use crate::bridge::{self, BrowserTransport};
use crate::tooltip::Tooltip;
use gloo_timers::future::TimeoutFuture;
use leptos::*;
use status_core::branding::Branding;
use status_core::client::FetchError;
use status_core::controller::{bootstrap, Controller, ControllerHandle};
use status_core::gate::ViewGate;
use status_core::login::LoginPrompt;
use status_core::sink::Change;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

const DEFAULT_LOGO: &str = "/img/logo.svg";
const DEFAULT_TIMEOUT_MS: u32 = 10_000;

fn base_url() -> &'static str {
    option_env!("STATUS_BASE_URL").unwrap_or("")
}

fn config_timeout_ms() -> u32 {
    option_env!("STATUS_CONFIG_TIMEOUT_MS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_MS)
}

/// Dashboard root. `children` is the routed page content; it is only mounted
/// once the config allows it.
#[component]
pub fn App(children: ChildrenFn) -> impl IntoView {
    let revision = create_rw_signal(0u64);
    let sink = move |change: Change| {
        tracing::trace!(?change, "controller changed");
        let _ = revision.try_update(|r| *r += 1);
    };

    let handle = ControllerHandle::new(Controller::with_sink(
        bridge::injected_config(),
        base_url(),
        Rc::new(sink),
    ));
    provide_context(handle.publisher());

    let weak = handle.downgrade();
    spawn_local(async move {
        let deadline = TimeoutFuture::new(config_timeout_ms());
        let outcome = bootstrap(weak, &BrowserTransport, deadline).await;
        tracing::debug!(?outcome, "bootstrap finished");
    });

    let disposer = handle.clone();
    on_cleanup(move || disposer.dispose());

    let gated = handle.clone();
    let gate = create_memo(move |_| {
        revision.with(|_| ());
        let gate = gated.view_gate();
        if gate.is_terminal() {
            tracing::debug!(?gate, "dashboard gate settled");
        }
        gate
    });

    let body = {
        let handle = handle.clone();
        move || match gate.get() {
            open if open.allows_content() => view! {
              <div id="global" class="container">
                <BrandHeader branding=handle.branding()/>
                {children()}
              </div>
            }
            .into_view(),
            ViewGate::UnauthenticatedLoginPrompt => view! {
              <LoginView
                prompt=handle.login_prompt(&bridge::location_search())
                header=handle.branding().header
              />
            }
            .into_view(),
            ViewGate::FetchFailed => handle
                .fetch_error()
                .map(|error| view! { <FetchFailedView error=error/> })
                .into_view(),
            _ => view! { <Loading/> }.into_view(),
        }
    };

    view! {
      {body}
      <Tooltip handle=handle revision=revision/>
    }
}

#[component]
fn Loading() -> impl IntoView {
    view! {
      <div class="loading" role="status" aria-live="polite">
        <span class="spinner"></span>
      </div>
    }
}

#[component]
fn BrandHeader(branding: Branding) -> impl IntoView {
    let logo_src = branding
        .custom_logo()
        .unwrap_or(DEFAULT_LOGO)
        .to_string();
    let logo = view! { <img src=logo_src alt="logo" class="logo"/> };

    let logo_block = match branding.link {
        Some(href) => view! { <a href=href target="_blank" class="logo-link">{logo}</a> }.into_view(),
        None => view! { <div class="logo-link">{logo}</div> }.into_view(),
    };

    let buttons = branding
        .buttons
        .into_iter()
        .map(|b| view! { <a href=b.link target="_blank" class="nav-button">{b.name}</a> })
        .collect_view();

    view! {
      <header class="header">
        <div class="title">{branding.header}</div>
        {logo_block}
      </header>
      <nav class="buttons">{buttons}</nav>
    }
}

/// The error line is interpolated as text, so provider-supplied markup is
/// escaped by the renderer.
#[component]
fn LoginView(prompt: LoginPrompt, header: String) -> impl IntoView {
    let error = prompt.error.map(|e| {
        view! {
          <div class="login-error">
            <span>{e.message().to_string()}</span>
          </div>
        }
    });

    view! {
      <div class="login">
        <img src=DEFAULT_LOGO alt="logo" class="logo"/>
        <h2>{header}</h2>
        {error}
        <a href=prompt.login_url class="login-button">"Login with OIDC"</a>
      </div>
    }
}

#[component]
fn FetchFailedView(error: FetchError) -> impl IntoView {
    view! {
      <div class="fetch-error" role="alert">
        <p>"The status page configuration could not be loaded."</p>
        <pre class="error">{error.to_string()}</pre>
        <p class="meta">"Reload the page to try again."</p>
      </div>
    }
}
