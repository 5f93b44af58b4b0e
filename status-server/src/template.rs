use status_core::branding::DEFAULT_HEADER;
use status_core::html::{escape_html, escape_js_string};
use status_schema::{
    InjectedConfig, BUTTONS_PLACEHOLDER, HEADER_PLACEHOLDER, LINK_PLACEHOLDER, LOGO_PLACEHOLDER,
};

pub const TITLE_PLACEHOLDER: &str = "{{ .UI.Title }}";

pub const DEFAULT_INDEX: &str = include_str!("../assets/index.html");

/// Names of the `status-ui` build output (`trunk build` with `filehash = false`).
pub const BUNDLE_JS: &str = "status-ui.js";
pub const BUNDLE_WASM: &str = "status-ui_bg.wasm";

/// Substitutes the configured branding into the index page. Unset values keep
/// their placeholder so the dashboard falls back to its defaults.
///
/// All tokens are replaced in one pass, so configured text that happens to
/// contain a token is emitted as written.
pub fn render_index(template: &str, ui: &InjectedConfig) -> String {
    let substitutions = substitutions(ui);
    let mut page = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let next = substitutions
            .iter()
            .filter_map(|(token, value)| rest.find(token.as_str()).map(|at| (at, token, value)))
            .min_by_key(|(at, _, _)| *at);
        match next {
            Some((at, token, value)) => {
                page.push_str(&rest[..at]);
                page.push_str(value);
                rest = &rest[at + token.len()..];
            }
            None => {
                page.push_str(rest);
                return page;
            }
        }
    }
}

fn substitutions(ui: &InjectedConfig) -> Vec<(String, String)> {
    let title = ui
        .header
        .as_deref()
        .filter(|h| !h.is_empty())
        .unwrap_or(DEFAULT_HEADER);
    let mut subs = vec![(TITLE_PLACEHOLDER.to_string(), escape_html(title))];

    for (token, value) in [
        (LOGO_PLACEHOLDER, &ui.logo),
        (HEADER_PLACEHOLDER, &ui.header),
        (LINK_PLACEHOLDER, &ui.link),
    ] {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            subs.push((token.to_string(), escape_js_string(value)));
        }
    }

    if let Some(buttons) = &ui.buttons {
        match serde_json::to_string(buttons) {
            // The quotes go too: the token sits inside a string literal.
            Ok(json) => subs.push((format!("\"{BUTTONS_PLACEHOLDER}\""), script_safe(&json))),
            Err(e) => tracing::warn!("failed to encode buttons: {e}"),
        }
    }
    subs
}

/// JSON stays valid JS, but must not be able to close the script element.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

#[cfg(test)]
mod tests {
    use super::*;
    use status_schema::Button;

    #[test]
    fn unset_values_keep_placeholders() {
        let page = render_index(DEFAULT_INDEX, &InjectedConfig::default());
        assert!(page.contains(LOGO_PLACEHOLDER));
        assert!(page.contains(HEADER_PLACEHOLDER));
        assert!(page.contains(LINK_PLACEHOLDER));
        assert!(page.contains(BUTTONS_PLACEHOLDER));
        assert!(page.contains("<title>Health Status</title>"));
    }

    #[test]
    fn substitutes_configured_branding() {
        let ui = InjectedConfig {
            logo: Some("https://example.org/logo.svg".into()),
            header: Some("Ops".into()),
            link: Some("https://example.org".into()),
            buttons: Some(vec![Button {
                name: "Docs".into(),
                link: "https://example.org/docs".into(),
            }]),
        };
        let page = render_index(DEFAULT_INDEX, &ui);
        assert!(page.contains(r#"logo: "https://example.org/logo.svg""#));
        assert!(page.contains(r#"header: "Ops""#));
        assert!(page.contains(r#"buttons: [{"name":"Docs","link":"https://example.org/docs"}]"#));
        assert!(page.contains("<title>Ops</title>"));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn hostile_values_cannot_break_out() {
        let ui = InjectedConfig {
            header: Some(r#"</script><script>alert("x")</script>"#.into()),
            buttons: Some(vec![Button {
                name: "</script>".into(),
                link: "https://example.org".into(),
            }]),
            ..InjectedConfig::default()
        };
        let page = render_index(DEFAULT_INDEX, &ui);
        assert_eq!(
            page.matches("</script>").count(),
            DEFAULT_INDEX.matches("</script>").count()
        );
        assert!(page.contains("<title>&lt;/script&gt;"));
    }

    #[test]
    fn tokens_inside_configured_text_are_left_alone() {
        let ui = InjectedConfig {
            header: Some(format!("Ops {LINK_PLACEHOLDER}")),
            link: Some("https://example.org".into()),
            ..InjectedConfig::default()
        };
        let page = render_index(DEFAULT_INDEX, &ui);
        assert!(page.contains(r#"header: "Ops {{ .UI.Link }}""#));
        assert!(page.contains(r#"link: "https://example.org""#));
        assert!(page.contains("<title>Ops {{ .UI.Link }}</title>"));
    }

    #[test]
    fn page_boots_the_wasm_bundle_after_config() {
        let page = render_index(DEFAULT_INDEX, &InjectedConfig::default());
        let config_at = page.find("window.config").expect("config script");
        let module_at = page.find(r#"<script type="module">"#).expect("module script");
        assert!(config_at < module_at);
        assert!(page.contains(&format!(r#"import init from "/{BUNDLE_JS}""#)));
        assert!(page.contains(&format!(r#"init("/{BUNDLE_WASM}")"#)));
    }
}
