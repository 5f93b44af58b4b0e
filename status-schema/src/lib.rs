use serde::{Deserialize, Serialize};

pub const LOGO_PLACEHOLDER: &str = "{{ .UI.Logo }}";
pub const HEADER_PLACEHOLDER: &str = "{{ .UI.Header }}";
pub const LINK_PLACEHOLDER: &str = "{{ .UI.Link }}";
pub const BUTTONS_PLACEHOLDER: &str = "{{ .UI.Buttons }}";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub name: String,
    pub link: String,
}

/// Runtime configuration served by `GET /api/v1/config`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub oidc: bool,
    #[serde(default = "default_authenticated")]
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<Button>>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            oidc: false,
            authenticated: true,
            logo: None,
            header: None,
            link: None,
            buttons: None,
        }
    }
}

impl RemoteConfig {
    /// Identity-provider gating is on and the caller has no session.
    pub fn requires_login(&self) -> bool {
        self.oidc && !self.authenticated
    }
}

fn default_authenticated() -> bool {
    true
}

/// Branding embedded into the page at serve time. Any field may still hold
/// its unrendered template token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectedConfig {
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub buttons: Option<Vec<Button>>,
}

/// True for any template marker the server left unsubstituted.
pub fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.starts_with("{{") && trimmed.ends_with("}}")
}

pub fn validate_button(button: &Button) -> Result<(), String> {
    if button.name.trim().is_empty() {
        return Err("button name is required".into());
    }
    if button.link.trim().is_empty() {
        return Err(format!("button '{}' has no link", button.name));
    }
    if is_placeholder(&button.name) || is_placeholder(&button.link) {
        return Err(format!("button '{}' holds an unrendered placeholder", button.name));
    }
    Ok(())
}
