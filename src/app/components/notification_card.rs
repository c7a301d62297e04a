use dioxus::prelude::*;

use crate::models::notification::Badge;
use crate::models::Notification;

/// One notification with its keyword badge and read/dismiss actions.
#[component]
pub fn NotificationCard(
    notification: Notification,
    on_mark_read: EventHandler<i64>,
    on_dismiss: EventHandler<i64>,
) -> Element {
    let badge = Badge::for_title(&notification.title);
    let id = notification.id;
    let class = if notification.is_read {
        "card notification-card"
    } else {
        "card notification-card unread"
    };
    let date = notification
        .created_at
        .split('T')
        .next()
        .unwrap_or_default()
        .to_string();

    rsx! {
        div { class,
            div { style: "display:flex;justify-content:space-between;gap:1rem;",
                span { class: "badge {badge.css_class()}", "{notification.title}" }
                small { class: "text-muted", "{date}" }
            }
            p { "{notification.message}" }
            div { class: "form-buttons",
                if !notification.is_read {
                    button { class: "btn btn-primary", onclick: move |_| on_mark_read.call(id), "Marcar como leída" }
                }
                button { class: "btn", onclick: move |_| on_dismiss.call(id), "Descartar" }
            }
        }
    }
}
