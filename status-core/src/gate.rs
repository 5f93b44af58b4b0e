use crate::client::FetchError;
use status_schema::RemoteConfig;

/// Where the one-shot config fetch stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Pending,
    Ready(RemoteConfig),
    Failed(FetchError),
}

impl LoadPhase {
    /// A response (or a definitive failure) has arrived.
    pub fn retrieved(&self) -> bool {
        !matches!(self, LoadPhase::Pending)
    }
}

/// Which top-level view is shown. Derived on every render, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewGate {
    Loading,
    OpenOrAuthenticatedContent,
    UnauthenticatedLoginPrompt,
    FetchFailed,
}

impl ViewGate {
    pub fn evaluate(phase: &LoadPhase) -> Self {
        match phase {
            LoadPhase::Pending => ViewGate::Loading,
            LoadPhase::Ready(cfg) if cfg.requires_login() => ViewGate::UnauthenticatedLoginPrompt,
            LoadPhase::Ready(_) => ViewGate::OpenOrAuthenticatedContent,
            LoadPhase::Failed(_) => ViewGate::FetchFailed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ViewGate::Loading)
    }

    /// Routed content may only be mounted behind this gate.
    pub fn allows_content(&self) -> bool {
        matches!(self, ViewGate::OpenOrAuthenticatedContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(oidc: bool, authenticated: bool) -> LoadPhase {
        LoadPhase::Ready(RemoteConfig {
            oidc,
            authenticated,
            ..RemoteConfig::default()
        })
    }

    #[test]
    fn pending_is_loading() {
        assert_eq!(ViewGate::evaluate(&LoadPhase::Pending), ViewGate::Loading);
        assert!(!LoadPhase::Pending.retrieved());
        assert!(!ViewGate::Loading.is_terminal());
    }

    #[test]
    fn only_oidc_without_session_prompts_login() {
        assert_eq!(
            ViewGate::evaluate(&ready(true, false)),
            ViewGate::UnauthenticatedLoginPrompt
        );
        assert_eq!(
            ViewGate::evaluate(&ready(true, true)),
            ViewGate::OpenOrAuthenticatedContent
        );
        assert_eq!(
            ViewGate::evaluate(&ready(false, false)),
            ViewGate::OpenOrAuthenticatedContent
        );
        assert_eq!(
            ViewGate::evaluate(&ready(false, true)),
            ViewGate::OpenOrAuthenticatedContent
        );
    }

    #[test]
    fn failure_has_its_own_gate() {
        let phase = LoadPhase::Failed(FetchError::Timeout);
        assert!(phase.retrieved());
        let gate = ViewGate::evaluate(&phase);
        assert_eq!(gate, ViewGate::FetchFailed);
        assert!(gate.is_terminal());
        assert!(!gate.allows_content());
    }

    #[test]
    fn content_only_behind_open_gate() {
        assert!(ViewGate::OpenOrAuthenticatedContent.allows_content());
        assert!(!ViewGate::UnauthenticatedLoginPrompt.allows_content());
        assert!(!ViewGate::Loading.allows_content());
        assert!(!ViewGate::FetchFailed.allows_content());
    }
}
