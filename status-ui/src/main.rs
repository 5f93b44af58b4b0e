use leptos::*;
use status_ui::App;
use tracing::Level;
use tracing_wasm::WASMLayerConfigBuilder;

fn main() {
    console_error_panic_hook::set_once();

    let level = option_env!("STATUS_LOG")
        .and_then(|v| v.parse().ok())
        .unwrap_or(Level::INFO);
    tracing_wasm::set_as_global_default_with_config(
        WASMLayerConfigBuilder::default()
            .set_max_level(level)
            .build(),
    );
    tracing::debug!("mounting status dashboard (log level {level})");

    // Routed pages mount into #content.
    mount_to_body(|| view! { <App><main id="content"></main></App> });
}
