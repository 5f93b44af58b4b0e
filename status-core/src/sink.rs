use crate::gate::ViewGate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    Gate(ViewGate),
    Tooltip,
}

/// Notified after controller state changes, once all internal borrows are
/// released. Renderers use it to schedule the next frame.
pub trait ChangeSink: 'static {
    fn emit(&self, change: Change);
}

pub struct NoopSink;

impl ChangeSink for NoopSink {
    fn emit(&self, _change: Change) {}
}

impl<F> ChangeSink for F
where
    F: Fn(Change) + 'static,
{
    fn emit(&self, change: Change) {
        self(change)
    }
}
