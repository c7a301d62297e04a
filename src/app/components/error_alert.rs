//! Inline error alert for data that failed to load.

use dioxus::prelude::*;

use crate::app::feedback::use_feedback;
use crate::error::ApiError;

/// Alert text, optionally prefixed with what was being loaded.
pub fn alert_message(error: &ApiError, context: Option<&str>) -> String {
    match context {
        Some(context) => format!("{}: {}", context, error),
        None => error.to_string(),
    }
}

/// An error alert with a retry button, shown in place of a list or card.
///
/// A load that failed because the session is gone logs out like any other
/// call would.
#[component]
pub fn ErrorAlert(
    /// The failed load
    error: ApiError,
    /// Prefix such as "Error cargando datos"
    #[props(default)]
    context: Option<&'static str>,
    /// Called when the retry button is clicked
    on_retry: EventHandler<()>,
) -> Element {
    let feedback = use_feedback();
    let expired = error.requires_login();
    use_effect(move || {
        if expired {
            tracing::info!("Session rejected while loading, logging out");
            feedback.expire_session();
        }
    });

    let message = alert_message(&error, context);
    rsx! {
        div { class: "card", style: "border-left:4px solid var(--danger);",
            p { "{message}" }
            button {
                class: "btn",
                onclick: move |_| on_retry.call(()),
                "Reintentar"
            }
        }
    }
}

/// Placeholder while a resource is pending.
#[component]
pub fn Loading(#[props(default = "Cargando...")] label: &'static str) -> Element {
    rsx! {
        p { class: "text-muted", "{label}" }
    }
}
