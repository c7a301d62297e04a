//! Modal dialogs.

use dioxus::prelude::*;

/// Generic modal: backdrop click or the close button dismiss it.
#[component]
pub fn Modal(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div { class: "modal-backdrop", onclick: move |_| on_close.call(()),
            div { class: "modal", onclick: move |e| e.stop_propagation(),
                div { style: "display:flex;justify-content:space-between;align-items:center;",
                    h3 { "{title}" }
                    button { class: "btn btn-link", onclick: move |_| on_close.call(()), "×" }
                }
                {children}
            }
        }
    }
}

/// What a rider must bring, shown before confirming an event registration.
pub const CHECKLIST_ITEMS: &[&str] = &[
    "Casco",
    "Guantes",
    "Agua o hidratante",
    "Documento de identidad",
    "Kit de reparación básica",
    "Energía (snacks o frutas)",
];

#[component]
pub fn ChecklistModal(on_confirm: EventHandler<()>, on_close: EventHandler<()>) -> Element {
    rsx! {
        Modal { title: "⚠️ Recuerda llevar".to_string(), on_close,
            ul {
                for item in CHECKLIST_ITEMS {
                    li { key: "{item}", "{item}" }
                }
            }
            div { class: "form-buttons",
                button { class: "btn btn-primary", onclick: move |_| on_confirm.call(()), "¡Entendido!" }
            }
        }
    }
}
