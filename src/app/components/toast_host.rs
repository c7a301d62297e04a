use dioxus::prelude::*;

use crate::app::toast::use_toast;

/// Renders the toast queue in the top-right corner.
#[component]
pub fn ToastHost() -> Element {
    let toast = use_toast();

    rsx! {
        div { class: "toast-host", role: "status",
            for item in toast.items() {
                div { key: "{item.id}", class: "toast {item.kind.css_class()}",
                    span { "{item.message}" }
                    button {
                        "aria-label": "Cerrar",
                        onclick: move |_| toast.dismiss(item.id),
                        "×"
                    }
                }
            }
        }
    }
}
