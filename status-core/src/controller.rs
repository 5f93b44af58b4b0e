use crate::branding::Branding;
use crate::client::{self, ConfigTransport, FetchError};
use crate::gate::{LoadPhase, ViewGate};
use crate::login::LoginPrompt;
use crate::sink::{Change, ChangeSink, NoopSink};
use crate::tooltip::{PointerEvent, TooltipPublisher, TooltipRelay, TooltipState};
use status_schema::{InjectedConfig, RemoteConfig};
use std::cell::RefCell;
use std::future::Future;
use std::rc::{Rc, Weak};

/// Root dashboard state: the fetched config, the derived gate and the
/// tooltip slot shared with every result item below it.
pub struct Controller {
    base_url: String,
    injected: InjectedConfig,
    phase: LoadPhase,
    fetch_started: bool,
    disposed: bool,
    tooltip: TooltipRelay,
    sink: Rc<dyn ChangeSink>,
}

impl Controller {
    pub fn new(injected: InjectedConfig, base_url: impl Into<String>) -> Self {
        Self::with_sink(injected, base_url, Rc::new(NoopSink))
    }

    pub fn with_sink(
        injected: InjectedConfig,
        base_url: impl Into<String>,
        sink: Rc<dyn ChangeSink>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            injected,
            phase: LoadPhase::Pending,
            fetch_started: false,
            disposed: false,
            tooltip: TooltipRelay::new(sink.clone()),
            sink,
        }
    }

    pub fn retrieved_config(&self) -> bool {
        self.phase.retrieved()
    }

    /// The fetched config, or the open defaults until one has arrived.
    pub fn remote_config(&self) -> RemoteConfig {
        match &self.phase {
            LoadPhase::Ready(cfg) => cfg.clone(),
            _ => RemoteConfig::default(),
        }
    }

    pub fn fetch_error(&self) -> Option<&FetchError> {
        match &self.phase {
            LoadPhase::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn view_gate(&self) -> ViewGate {
        ViewGate::evaluate(&self.phase)
    }

    pub fn branding(&self) -> Branding {
        Branding::resolve(&self.injected)
    }

    pub fn login_prompt(&self, search: &str) -> LoginPrompt {
        LoginPrompt::new(&self.base_url, search)
    }

    pub fn tooltip(&self) -> TooltipState {
        self.tooltip.snapshot()
    }

    pub fn publisher(&self) -> TooltipPublisher {
        self.tooltip.publisher()
    }

    /// Claims the one fetch this controller will ever make.
    fn start_fetch(&mut self) -> bool {
        if self.fetch_started || self.disposed {
            return false;
        }
        self.fetch_started = true;
        true
    }

    /// Applies the fetch outcome. Returns the new gate, or `None` when the
    /// outcome must be dropped.
    fn complete_fetch(&mut self, outcome: Result<RemoteConfig, FetchError>) -> Option<ViewGate> {
        if self.disposed {
            tracing::warn!("config fetch finished after dispose, dropping result");
            return None;
        }
        if self.retrieved_config() {
            tracing::warn!("config fetch completed twice, keeping first result");
            return None;
        }
        self.phase = match outcome {
            Ok(cfg) => LoadPhase::Ready(cfg),
            Err(e) => {
                tracing::warn!("config fetch failed: {e}");
                LoadPhase::Failed(e)
            }
        };
        let gate = self.view_gate();
        tracing::debug!(?gate, "view gate resolved");
        Some(gate)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Resolved(ViewGate),
    AlreadyStarted,
    /// The controller was dropped or disposed before the fetch finished.
    Discarded,
}

/// Shared owner of a [`Controller`]. The view layer keeps one of these for
/// as long as the dashboard is mounted.
#[derive(Clone)]
pub struct ControllerHandle {
    inner: Rc<RefCell<Controller>>,
}

impl ControllerHandle {
    pub fn new(controller: Controller) -> Self {
        Self {
            inner: Rc::new(RefCell::new(controller)),
        }
    }

    pub fn view_gate(&self) -> ViewGate {
        self.inner.borrow().view_gate()
    }

    pub fn remote_config(&self) -> RemoteConfig {
        self.inner.borrow().remote_config()
    }

    pub fn fetch_error(&self) -> Option<FetchError> {
        self.inner.borrow().fetch_error().cloned()
    }

    pub fn branding(&self) -> Branding {
        self.inner.borrow().branding()
    }

    pub fn login_prompt(&self, search: &str) -> LoginPrompt {
        self.inner.borrow().login_prompt(search)
    }

    pub fn tooltip(&self) -> TooltipState {
        self.inner.borrow().tooltip()
    }

    pub fn publisher(&self) -> TooltipPublisher {
        self.inner.borrow().publisher()
    }

    pub fn show_tooltip(&self, result: Option<serde_json::Value>, event: Option<PointerEvent>) {
        // Clone out so the sink can read the controller while it runs.
        let relay = self.inner.borrow().tooltip.clone();
        relay.publish(result, event);
    }

    /// Marks the controller torn down; a fetch still in flight is ignored.
    pub fn dispose(&self) {
        self.inner.borrow_mut().disposed = true;
    }

    pub fn downgrade(&self) -> WeakController {
        WeakController {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Mount-time entry point: runs the config fetch once.
    pub async fn mount<T, D>(&self, transport: &T, deadline: D) -> BootstrapOutcome
    where
        T: ConfigTransport + ?Sized,
        D: Future<Output = ()>,
    {
        bootstrap(self.downgrade(), transport, deadline).await
    }
}

/// Non-owning reference held by the in-flight fetch.
#[derive(Clone)]
pub struct WeakController {
    inner: Weak<RefCell<Controller>>,
}

impl WeakController {
    pub fn upgrade(&self) -> Option<ControllerHandle> {
        self.inner.upgrade().map(|inner| ControllerHandle { inner })
    }
}

/// Fetches the remote config once and applies it, unless the controller is
/// gone by the time the response arrives.
pub async fn bootstrap<T, D>(
    controller: WeakController,
    transport: &T,
    deadline: D,
) -> BootstrapOutcome
where
    T: ConfigTransport + ?Sized,
    D: Future<Output = ()>,
{
    let base_url = {
        let Some(handle) = controller.upgrade() else {
            return BootstrapOutcome::Discarded;
        };
        let mut ctl = handle.inner.borrow_mut();
        if !ctl.start_fetch() {
            return if ctl.disposed {
                BootstrapOutcome::Discarded
            } else {
                BootstrapOutcome::AlreadyStarted
            };
        }
        ctl.base_url.clone()
    };

    let outcome = client::fetch_config(transport, &base_url, deadline).await;

    let Some(handle) = controller.upgrade() else {
        tracing::warn!("controller dropped before config fetch finished");
        return BootstrapOutcome::Discarded;
    };
    let (gate, sink) = {
        let mut ctl = handle.inner.borrow_mut();
        match ctl.complete_fetch(outcome) {
            Some(gate) => (gate, ctl.sink.clone()),
            None => return BootstrapOutcome::Discarded,
        }
    };
    sink.emit(Change::Gate(gate));
    BootstrapOutcome::Resolved(gate)
}
