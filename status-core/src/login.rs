use crate::client::join_url;

pub const LOGIN_PATH: &str = "/oidc/login";
pub const ACCESS_DENIED: &str = "access_denied";
pub const ACCESS_DENIED_MESSAGE: &str = "You do not have access to this status page";

pub fn login_url(base_url: &str) -> String {
    join_url(base_url, LOGIN_PATH)
}

/// Reads the `error` parameter from a query string such as `?error=x&y=z`.
/// An empty value counts as absent.
pub fn query_error(search: &str) -> Option<String> {
    let query = search.trim_start_matches('?');
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "error")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginError {
    AccessDenied,
    /// Whatever the identity provider sent back. Untrusted.
    Other(String),
}

impl LoginError {
    pub fn from_query(raw: Option<&str>) -> Option<Self> {
        match raw {
            None | Some("") => None,
            Some(ACCESS_DENIED) => Some(LoginError::AccessDenied),
            Some(other) => Some(LoginError::Other(other.to_string())),
        }
    }

    /// Plain text for the user. Render it as a text node, never as markup.
    pub fn message(&self) -> &str {
        match self {
            LoginError::AccessDenied => ACCESS_DENIED_MESSAGE,
            LoginError::Other(raw) => raw,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginPrompt {
    pub login_url: String,
    pub error: Option<LoginError>,
}

impl LoginPrompt {
    pub fn new(base_url: &str, search: &str) -> Self {
        Self {
            login_url: login_url(base_url),
            error: LoginError::from_query(query_error(search).as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_link_targets_oidc_entry_point() {
        assert_eq!(
            login_url("https://status.example.org"),
            "https://status.example.org/oidc/login"
        );
        assert_eq!(login_url(""), "/oidc/login");
    }

    #[test]
    fn reads_error_parameter() {
        assert_eq!(query_error("?error=access_denied").as_deref(), Some("access_denied"));
        assert_eq!(
            query_error("?state=abc&error=server%20timeout").as_deref(),
            Some("server timeout")
        );
        assert_eq!(query_error("?error="), None);
        assert_eq!(query_error(""), None);
        assert_eq!(query_error("?other=1"), None);
    }

    #[test]
    fn access_denied_uses_fixed_message() {
        let prompt = LoginPrompt::new("", "?error=access_denied");
        let err = prompt.error.expect("error block");
        assert_eq!(err, LoginError::AccessDenied);
        assert_eq!(err.message(), ACCESS_DENIED_MESSAGE);
        assert!(!err.message().contains("access_denied"));
    }

    #[test]
    fn other_errors_are_shown_literally() {
        let prompt = LoginPrompt::new("", "?error=server_timeout");
        assert_eq!(
            prompt.error.as_ref().map(LoginError::message),
            Some("server_timeout")
        );
    }

    #[test]
    fn no_error_block_without_parameter() {
        assert_eq!(LoginPrompt::new("", "").error, None);
    }

    #[test]
    fn markup_in_error_is_kept_as_plain_text() {
        let prompt = LoginPrompt::new("", "?error=%3Cscript%3Ealert(1)%3C%2Fscript%3E");
        let err = prompt.error.expect("error block");
        assert_eq!(err, LoginError::Other("<script>alert(1)</script>".into()));
        assert_eq!(err.message(), "<script>alert(1)</script>");
    }
}
