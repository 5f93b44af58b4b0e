use leptos::ev::MouseEvent;
use leptos::*;
use status_core::controller::ControllerHandle;
use status_core::tooltip::{PointerEvent, TooltipPublisher, TooltipState};

const OFFSET_PX: f64 = 12.0;

fn pointer(ev: &MouseEvent) -> PointerEvent {
    PointerEvent {
        client_x: f64::from(ev.client_x()),
        client_y: f64::from(ev.client_y()),
    }
}

fn body_text(state: &TooltipState) -> String {
    match &state.result {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(value) => serde_json::to_string_pretty(value).unwrap_or_default(),
        None => String::new(),
    }
}

/// The single overlay shared by every result item on the page.
#[component]
pub fn Tooltip(handle: ControllerHandle, revision: RwSignal<u64>) -> impl IntoView {
    let state = move || {
        revision.with(|_| ());
        handle.tooltip()
    };
    let current = create_memo(move |_| state());

    let style = move || {
        let s = current.get();
        match (s.is_visible(), s.event) {
            (true, Some(at)) => format!(
                "position: fixed; top: {}px; left: {}px;",
                at.client_y + OFFSET_PX,
                at.client_x + OFFSET_PX
            ),
            _ => "display: none;".to_string(),
        }
    };

    view! {
      <div id="tooltip" class="tooltip" style=style>
        <pre>{move || body_text(&current.get())}</pre>
      </div>
    }
}

/// Wraps a result item so hovering it fills the shared tooltip.
#[component]
pub fn TooltipTarget(#[prop(into)] result: serde_json::Value, children: Children) -> impl IntoView {
    let publisher = use_context::<TooltipPublisher>();
    if publisher.is_none() {
        tracing::warn!("TooltipTarget rendered outside App; hover is disabled");
    }

    let on_enter = {
        let publisher = publisher.clone();
        move |ev: MouseEvent| {
            if let Some(p) = &publisher {
                p.publish(result.clone(), pointer(&ev));
            }
        }
    };
    let on_leave = move |ev: MouseEvent| {
        if let Some(p) = &publisher {
            p.clear(Some(pointer(&ev)));
        }
    };

    view! {
      <span class="tooltip-target" on:mouseenter=on_enter on:mouseleave=on_leave>
        {children()}
      </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_are_shown_bare() {
        let state = TooltipState {
            result: Some(json!("200 OK")),
            event: None,
        };
        assert_eq!(body_text(&state), "200 OK");
    }

    #[test]
    fn structured_results_are_pretty_printed() {
        let state = TooltipState {
            result: Some(json!({"status": 500})),
            event: None,
        };
        assert_eq!(body_text(&state), "{\n  \"status\": 500\n}");
        assert_eq!(body_text(&TooltipState::default()), "");
    }
}
