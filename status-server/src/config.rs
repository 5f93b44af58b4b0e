use status_schema::{validate_button, Button, InjectedConfig};
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind: String,
    pub oidc: bool,
    pub session_cookie: String,
    pub ui: InjectedConfig,
    pub index_template: Option<PathBuf>,
    /// `trunk build` output of `status-ui`, served under `/`.
    pub assets_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".into(),
            oidc: false,
            session_cookie: "session".into(),
            ui: InjectedConfig::default(),
            index_template: None,
            assets_dir: PathBuf::from("status-ui/dist"),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let defaults = Self::default();
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let buttons = non_empty("STATUS_UI_BUTTONS")
            .map(|raw| parse_buttons(&raw))
            .transpose()?;

        Ok(Self {
            bind: non_empty("STATUS_BIND").unwrap_or(defaults.bind),
            oidc: non_empty("STATUS_OIDC")
                .map(|v| parse_flag(&v))
                .transpose()?
                .unwrap_or(defaults.oidc),
            session_cookie: non_empty("STATUS_SESSION_COOKIE").unwrap_or(defaults.session_cookie),
            ui: InjectedConfig {
                logo: non_empty("STATUS_UI_LOGO"),
                header: non_empty("STATUS_UI_HEADER"),
                link: non_empty("STATUS_UI_LINK"),
                buttons,
            },
            index_template: non_empty("STATUS_INDEX_TEMPLATE").map(PathBuf::from),
            assets_dir: non_empty("STATUS_ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir),
        })
    }
}

fn parse_flag(value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("invalid boolean '{other}'")),
    }
}

fn parse_buttons(raw: &str) -> Result<Vec<Button>, String> {
    let buttons: Vec<Button> =
        serde_json::from_str(raw).map_err(|e| format!("STATUS_UI_BUTTONS: {e}"))?;
    for button in &buttons {
        validate_button(button).map_err(|e| format!("STATUS_UI_BUTTONS: {e}"))?;
    }
    Ok(buttons)
}
