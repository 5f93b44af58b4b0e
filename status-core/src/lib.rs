//! Bootstrap logic for the status dashboard: branding fallback, the one-shot
//! config fetch, the view gate it drives and the shared tooltip slot.

pub mod branding;
pub mod client;
pub mod controller;
pub mod gate;
pub mod html;
pub mod login;
pub mod sink;
pub mod tooltip;

pub use status_schema::{Button, InjectedConfig, RemoteConfig};
