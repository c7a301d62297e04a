use dioxus::prelude::*;

use crate::app::api_context::{use_api, use_config};
use crate::app::components::Loading;
use crate::app::pages::format;
use crate::app::Route;
use crate::models::event::upcoming;
use crate::models::Event;
use crate::services;

/// Membership tiers shown on the landing page.
const MEMBERSHIPS: &[(&str, &str)] = &[
    ("Entrenador", "Guía los entrenamientos y acompaña al grupo en ruta."),
    ("Equipo EPN", "Representa a la Politécnica en competencias."),
    ("Ciclista", "Participa en rodadas y entrenamientos del club."),
];

#[component]
pub fn Home() -> Element {
    rsx! {
        section { class: "hero",
            h1 { "Club de Ciclismo EPN" }
            p { "Pedaleamos juntos por Quito y sus montañas. Únete a nuestras rodadas, entrenamientos y competencias." }
            div { class: "form-buttons",
                Link { to: Route::Register {}, class: "btn btn-primary", "Únete al club" }
                Link { to: Route::PublicEvents {}, class: "btn", "Ver eventos" }
            }
        }
        h2 { "Próximo evento" }
        NextEvent {}
        h2 { "Nuestras membresías" }
        div { class: "grid",
            for (title, text) in MEMBERSHIPS {
                div { key: "{title}", class: "card",
                    h3 { "{title}" }
                    p { "{text}" }
                }
            }
        }
        div { class: "card",
            h3 { "Tienda del club" }
            p { "Jerseys, licras, buffs y más con los colores del equipo." }
            Link { to: Route::Products {}, class: "btn btn-primary", "Ver productos" }
        }
    }
}

/// Featured next event plus the rest of the public calendar.
#[component]
fn NextEvent() -> Element {
    let api = use_api();
    let mut show_all = use_signal(|| false);

    let events = use_resource(move || {
        let api = api.clone();
        async move {
            let next = services::events::fetch_next_event(&api, true).await?;
            let all = services::events::fetch_public_upcoming(&api).await?;
            let now = chrono::Local::now().naive_local();
            let others: Vec<Event> = upcoming(&all, now)
                .into_iter()
                .filter(|e| Some(e.id) != next.as_ref().map(|n| n.id))
                .collect();
            Ok::<_, crate::error::ApiError>((next, others))
        }
    });

    let state = events.read().clone();
    match state {
        None => rsx! { Loading { label: "Cargando evento más próximo..." } },
        Some(Err(e)) => {
            tracing::warn!("Could not load events: {}", e);
            rsx! { p { class: "text-muted", "No hay eventos disponibles por el momento." } }
        }
        Some(Ok((None, _))) => rsx! {
            p { class: "text-muted", "No hay eventos próximos. ¡Vuelve pronto!" }
        },
        Some(Ok((Some(next), others))) => {
            let visible: Vec<Event> = if show_all() {
                others.clone()
            } else {
                others.iter().take(3).cloned().collect()
            };
            let has_more = others.len() > 3;
            rsx! {
                EventHighlight { event: next }
                if !visible.is_empty() {
                    div { class: "grid",
                        for event in visible {
                            EventSummary { key: "{event.id}", event }
                        }
                    }
                }
                if has_more {
                    button {
                        class: "btn btn-link",
                        onclick: move |_| show_all.toggle(),
                        if show_all() { "Ver menos" } else { "Ver todos" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn EventHighlight(event: Event) -> Element {
    let config = use_config();
    let mut show_map = use_signal(|| false);
    let date = format::event_date(&event.creation_date);
    let route = event.route_label();
    let map_url = event
        .route
        .as_ref()
        .and_then(|r| config.maps_embed_url(&format!("{}, Quito", r.start_point)));

    rsx! {
        div { class: "card event-card",
            if let Some(src) = event.image_src() {
                img { src: "{src}", alt: "{route}" }
            }
            p { class: "text-muted", "EVENTO DESTACADO" }
            h3 { "{event.event_type} · {route}" }
            p { "{date}" }
            p { "Punto de encuentro: {event.meeting_point}" }
            if let Some(route) = event.route.as_ref() {
                p { "Recorrido: {route.start_point} → {route.end_point} ({route.duration} min)" }
            }
            if let Some(url) = map_url {
                button { class: "btn", onclick: move |_| show_map.toggle(), "🗺️ Ver ruta" }
                if show_map() {
                    iframe {
                        src: "{url}",
                        width: "100%",
                        height: "300",
                        style: "border:0;",
                        "loading": "lazy",
                    }
                }
            }
        }
    }
}

#[component]
pub fn EventSummary(event: Event) -> Element {
    let date = format::event_date(&event.creation_date);
    let route = event.route_label();
    let level = event.event_level.clone().unwrap_or_default();
    let mode = event.event_mode.clone().unwrap_or_default();

    rsx! {
        div { class: "card event-card",
            if let Some(src) = event.image_src() {
                img { src: "{src}", alt: "{route}" }
            }
            h3 { "{route}" }
            p { "{date}" }
            small { class: "text-muted", "{event.event_type} · {level} · {mode}" }
        }
    }
}
