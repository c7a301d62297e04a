use std::collections::BTreeSet;

use dioxus::prelude::*;

use crate::app::api_context::{use_api, use_config};
use crate::app::browser;
use crate::app::components::{ErrorAlert, Loading, NotificationCard};
use crate::app::feedback::use_feedback;
use crate::app::storage_sync::{notify_changed, use_notification_sync};
use crate::notifications;
use crate::services;
use crate::storage::BrowserStore;

#[component]
pub fn Notifications() -> Element {
    let api = use_api();
    let config = use_config();
    let feedback = use_feedback();
    let sync = use_notification_sync();
    let mut dismissed = use_signal(|| notifications::dismissed_ids(&BrowserStore::local()));

    let mut list = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let _ = sync();
            async move { services::notifications::fetch_notifications(&api).await }
        }
    });

    // Dismissals from other tabs are also picked up by polling
    let poll_ms = config.notification_poll_ms.max(250);
    use_future(move || async move {
        loop {
            browser::sleep_ms(poll_ms).await;
            let stored = notifications::dismissed_ids(&BrowserStore::local());
            if *dismissed.peek() != stored {
                dismissed.set(stored);
            }
        }
    });

    let mark_read = move |id: i64| {
        let api = api.clone();
        spawn(async move {
            let store = BrowserStore::local();
            match services::notifications::mark_as_read(&api, id, &store, browser::now_ms()).await {
                // Bumping the counter refetches the list and the bell badge
                Ok(()) => notify_changed(sync),
                Err(e) => feedback.api(&e),
            }
        });
    };

    let dismiss = move |id: i64| {
        let ids: BTreeSet<i64> = notifications::dismiss(&BrowserStore::local(), id, browser::now_ms());
        dismissed.set(ids);
    };

    let content = match list.read().clone() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! {
            ErrorAlert { error: e, on_retry: move |_| list.restart() }
        },
        Some(Ok(items)) => {
            let shown = notifications::visible(&items, &dismissed.read());
            if shown.is_empty() {
                rsx! {
                    div { class: "card empty-state",
                        div { style: "font-size:4rem;", "🔔" }
                        h3 { "No hay notificaciones nuevas" }
                        p { "¡Listo! Ya no quedan mensajes por revisar." }
                    }
                }
            } else {
                rsx! {
                    for notification in shown {
                        NotificationCard {
                            key: "{notification.id}",
                            notification,
                            on_mark_read: mark_read.clone(),
                            on_dismiss: dismiss,
                        }
                    }
                }
            }
        }
    };

    rsx! {
        h2 { "Notificaciones" }
        {content}
    }
}
