use crate::sink::{Change, ChangeSink, NoopSink};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Where the pointer was when a result item asked for the tooltip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
}

/// `result` is whatever the emitting item handed over; it is not inspected
/// here, only passed to the overlay.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub result: Option<serde_json::Value>,
    pub event: Option<PointerEvent>,
}

impl TooltipState {
    pub fn is_visible(&self) -> bool {
        self.result.is_some()
    }
}

/// The single shared tooltip slot. Last write wins.
#[derive(Clone)]
pub struct TooltipRelay {
    slot: Rc<RefCell<TooltipState>>,
    sink: Rc<dyn ChangeSink>,
}

impl Default for TooltipRelay {
    fn default() -> Self {
        Self::new(Rc::new(NoopSink))
    }
}

impl TooltipRelay {
    pub fn new(sink: Rc<dyn ChangeSink>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(TooltipState::default())),
            sink,
        }
    }

    pub fn publish(&self, result: Option<serde_json::Value>, event: Option<PointerEvent>) {
        *self.slot.borrow_mut() = TooltipState { result, event };
        self.sink.emit(Change::Tooltip);
    }

    pub fn snapshot(&self) -> TooltipState {
        self.slot.borrow().clone()
    }

    /// Narrow handle for descendants: they can write the slot but not read it.
    pub fn publisher(&self) -> TooltipPublisher {
        TooltipPublisher {
            relay: self.clone(),
        }
    }
}

#[derive(Clone)]
pub struct TooltipPublisher {
    relay: TooltipRelay,
}

impl TooltipPublisher {
    pub fn publish(&self, result: serde_json::Value, event: PointerEvent) {
        self.relay.publish(Some(result), Some(event));
    }

    pub fn clear(&self, event: Option<PointerEvent>) {
        self.relay.publish(None, event);
    }
}
