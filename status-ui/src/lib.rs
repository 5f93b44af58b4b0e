pub mod app;
pub mod bridge;
pub mod tooltip;

pub use app::App;
pub use tooltip::TooltipTarget;
