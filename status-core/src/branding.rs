use status_schema::{
    is_placeholder, validate_button, Button, InjectedConfig, HEADER_PLACEHOLDER,
    LINK_PLACEHOLDER, LOGO_PLACEHOLDER,
};

pub const DEFAULT_HEADER: &str = "Health Status";

fn rendered<'a>(value: Option<&'a String>, token: &str) -> Option<&'a str> {
    value
        .map(String::as_str)
        .filter(|v| !v.is_empty() && *v != token && !is_placeholder(v))
}

/// Custom logo URL, or `""` when the built-in logo should be shown.
pub fn logo(injected: &InjectedConfig) -> String {
    rendered(injected.logo.as_ref(), LOGO_PLACEHOLDER)
        .unwrap_or_default()
        .to_string()
}

pub fn header(injected: &InjectedConfig) -> String {
    rendered(injected.header.as_ref(), HEADER_PLACEHOLDER)
        .unwrap_or(DEFAULT_HEADER)
        .to_string()
}

/// `None` renders the logo in a plain container instead of an anchor.
pub fn link(injected: &InjectedConfig) -> Option<String> {
    rendered(injected.link.as_ref(), LINK_PLACEHOLDER).map(ToString::to_string)
}

pub fn buttons(injected: &InjectedConfig) -> Vec<Button> {
    injected
        .buttons
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter(|b| match validate_button(b) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("dropping injected button: {e}");
                false
            }
        })
        .cloned()
        .collect()
}

/// Display values for one render, derived from the injected configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Branding {
    pub header: String,
    pub logo: String,
    pub link: Option<String>,
    pub buttons: Vec<Button>,
}

impl Branding {
    pub fn resolve(injected: &InjectedConfig) -> Self {
        Self {
            header: header(injected),
            logo: logo(injected),
            link: link(injected),
            buttons: buttons(injected),
        }
    }

    pub fn custom_logo(&self) -> Option<&str> {
        if self.logo.is_empty() {
            None
        } else {
            Some(&self.logo)
        }
    }
}
