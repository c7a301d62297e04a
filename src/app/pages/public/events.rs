use dioxus::prelude::*;

use crate::app::api_context::use_api;
use crate::app::components::{ErrorAlert, Loading};
use crate::models::event::upcoming;
use crate::services;

use super::home::{EventHighlight, EventSummary};

/// Public calendar: the soonest event featured, the rest as cards.
#[component]
pub fn PublicEvents() -> Element {
    let api = use_api();

    let mut events = use_resource(move || {
        let api = api.clone();
        async move {
            let all = services::events::fetch_public_upcoming(&api).await?;
            Ok::<_, crate::error::ApiError>(upcoming(&all, chrono::Local::now().naive_local()))
        }
    });

    let content = match events.read().clone() {
        None => rsx! { Loading { label: "Cargando eventos..." } },
        Some(Err(e)) => rsx! {
            ErrorAlert {
                error: e,
                on_retry: move |_| events.restart(),
            }
        },
        Some(Ok(list)) if list.is_empty() => rsx! {
            p { class: "text-muted", "No hay eventos programados por ahora." }
        },
        Some(Ok(list)) => {
            let mut iter = list.into_iter();
            let first = iter.next();
            let rest: Vec<_> = iter.collect();
            rsx! {
                if let Some(event) = first {
                    EventHighlight { event }
                }
                div { class: "grid",
                    for event in rest {
                        EventSummary { key: "{event.id}", event }
                    }
                }
            }
        }
    };

    rsx! {
        h1 { "Eventos" }
        p { "Rodadas y entrenamientos abiertos a la comunidad. Regístrate en el club para inscribirte." }
        {content}
    }
}
