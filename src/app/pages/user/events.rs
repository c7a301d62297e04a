use dioxus::prelude::*;

use crate::app::api_context::{use_api, use_config};
use crate::app::components::{ChecklistModal, ErrorAlert, Loading};
use crate::app::feedback::use_feedback;
use crate::app::pages::format;
use crate::models::event::upcoming;
use crate::models::Event;
use crate::services;

/// Upcoming rides the member can join or leave.
#[component]
pub fn AvailableEvents() -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let mut registered = use_signal(Vec::<i64>::new);
    // Event waiting for the checklist confirmation
    let mut pending = use_signal(|| None::<i64>);

    let mut events = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                let all = services::events::fetch_events(&api).await?;
                match services::events::fetch_my_events(&api).await {
                    Ok(ids) => registered.set(ids),
                    Err(e) => {
                        tracing::warn!("Could not load registrations: {}", e);
                        registered.set(Vec::new());
                    }
                }
                Ok::<_, crate::error::ApiError>(upcoming(&all, chrono::Local::now().naive_local()))
            }
        }
    });

    let join = {
        let api = api.clone();
        move |_: ()| {
            let api = api.clone();
            spawn(async move {
                let Some(id) = pending() else { return };
                pending.set(None);
                match services::events::register_to_event(&api, id).await {
                    Ok(()) => {
                        registered.write().push(id);
                        feedback.success("¡Inscripción confirmada! Nos vemos en la ruta.");
                    }
                    Err(e) => feedback.api(&e),
                }
            });
        }
    };

    let leave = move |id: i64| {
        let api = api.clone();
        spawn(async move {
            match services::events::unregister_from_event(&api, id).await {
                Ok(()) => {
                    registered.write().retain(|r| *r != id);
                    feedback.info("Inscripción cancelada");
                }
                Err(e) => feedback.api(&e),
            }
        });
    };

    let content = match events.read().clone() {
        None => rsx! { Loading { label: "Cargando eventos..." } },
        Some(Err(e)) => rsx! {
            ErrorAlert { error: e, on_retry: move |_| events.restart() }
        },
        Some(Ok(list)) if list.is_empty() => rsx! {
            div { class: "card",
                h3 { "📭 No hay eventos próximos disponibles" }
                p { "Pronto se publicarán nuevas rutas y rodadas. ¡Mantente atento!" }
            }
        },
        Some(Ok(list)) => rsx! {
            div { class: "grid",
                for event in list {
                    EventCard {
                        key: "{event.id}",
                        registered: registered.read().contains(&event.id),
                        event,
                        on_join: move |id: i64| pending.set(Some(id)),
                        on_leave: leave.clone(),
                    }
                }
            }
        },
    };

    rsx! {
        h2 { "🚴 Eventos Disponibles" }
        p { class: "text-muted", "Aplica a estas rutas y rodadas planificadas" }
        {content}
        if pending().is_some() {
            ChecklistModal {
                on_confirm: join,
                on_close: move |_| pending.set(None),
            }
        }
    }
}

#[component]
fn EventCard(
    event: Event,
    registered: bool,
    on_join: EventHandler<i64>,
    on_leave: EventHandler<i64>,
) -> Element {
    let config = use_config();
    let mut show_map = use_signal(|| false);
    let id = event.id;
    let open = event.registration_open(chrono::Local::now().naive_local());
    let map = show_map()
        .then(|| config.maps_embed_url(&event.meeting_point))
        .flatten();

    rsx! {
        div { class: "card event-card",
            if registered {
                span { class: "badge badge-success", "✓ Inscrito" }
            }
            if let Some(src) = event.image_src() {
                img { src: "{src}", alt: "Evento", width: "100%" }
            }
            span { class: "badge", "{event.event_type}" }
            h3 { "{event.route_label()}" }
            p { strong { "Fecha: " } "{format::event_date(&event.creation_date)}" }
            p { strong { "Nivel de dificultad: " } {event.event_level.clone().unwrap_or_default()} }
            p { strong { "Modalidad: " } {event.event_mode.clone().unwrap_or_default()} }
            p { strong { "Punto de encuentro: " } "{event.meeting_point}" }
            div { class: "form-buttons",
                button { class: "btn btn-link", onclick: move |_| show_map.toggle(), "📍 Ver punto de encuentro" }
                if !open {
                    button { class: "btn", disabled: true, "Inscripción cerrada" }
                } else if registered {
                    button { class: "btn btn-danger", onclick: move |_| on_leave.call(id), "Cancelar inscripción" }
                } else {
                    button { class: "btn btn-primary", onclick: move |_| on_join.call(id), "Unirme al evento" }
                }
            }
            if let Some(url) = map {
                iframe { src: "{url}", width: "100%", height: "240", style: "border:0;", "loading": "lazy" }
            }
        }
    }
}
