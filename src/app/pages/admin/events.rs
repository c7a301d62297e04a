//! Event administration and participant lists.

use dioxus::prelude::*;

use crate::app::api_context::use_api;
use crate::app::browser;
use crate::app::components::{
    ErrorAlert, FileField, Loading, SelectField, TextArea, TextField, plain_options,
};
use crate::app::feedback::use_feedback;
use crate::app::pages::format;
use crate::app::Route;
use crate::models::event::{EVENT_LEVELS, EVENT_MODES, EVENT_TYPES};
use crate::models::Event;
use crate::services::{self, UploadFile};
use crate::validation::{event_image_base64, EventDraft};

fn availability(event: &Event) -> &'static str {
    match event.is_available {
        Some(false) => "No disponible",
        _ => "Disponible",
    }
}

#[component]
pub fn EventList() -> Element {
    let api = use_api();
    let feedback = use_feedback();

    let mut events = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { services::events::fetch_events(&api).await }
        }
    });

    let delete = move |id: i64| {
        let api = api.clone();
        spawn(async move {
            if !browser::confirm("¿Estás seguro? Se borrará este evento permanentemente") {
                return;
            }
            match services::events::delete_event(&api, id).await {
                Ok(()) => {
                    feedback.success("Evento eliminado correctamente");
                    events.restart();
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
        Some(Ok(list)) => rsx! {
            table { class: "table",
                thead {
                    tr {
                        th { "Tipo de Evento" }
                        th { "Ruta Asociada" }
                        th { "Fecha del Evento" }
                        th { "Nivel" }
                        th { "Modalidad" }
                        th { "Disponibilidad" }
                        th { "Punto de Encuentro" }
                        th { "Acciones" }
                    }
                }
                tbody {
                    for event in list {
                        {
                            let id = event.id;
                            let delete = delete.clone();
                            rsx! {
                                tr { key: "{id}",
                                    td { "{event.event_type}" }
                                    td { "{event.route_label()}" }
                                    td { "{format::event_date(&event.creation_date)}" }
                                    td { {event.event_level.clone().unwrap_or_default()} }
                                    td { {event.event_mode.clone().unwrap_or_default()} }
                                    td { "{availability(&event)}" }
                                    td { "{event.meeting_point}" }
                                    td {
                                        Link { to: Route::EditEvent { id }, class: "btn", "Editar" }
                                        button { class: "btn btn-danger", onclick: move |_| delete(id), "Eliminar" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        h2 { "Lista de Eventos" }
        Link { to: Route::CreateEvent {}, class: "btn btn-primary", "Crear Evento" }
        {content}
    }
}

/// Fields shared by the create and edit screens. Routes come from the
/// backend; the parent performs the request.
#[component]
fn EventForm(
    initial: EventDraft,
    submit_label: &'static str,
    busy: bool,
    on_submit: EventHandler<EventDraft>,
    /// Image the event already has, shown until a new one is picked
    #[props(default)]
    current_image: Option<String>,
) -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let mut draft = use_signal(|| initial.clone());
    let mut picked = use_signal(|| None::<String>);

    let routes = use_resource(move || {
        let api = api.clone();
        async move { services::routes::fetch_routes(&api).await }
    });
    let route_options: Vec<(String, String)> = match &*routes.read() {
        Some(Ok(list)) => list
            .iter()
            .map(|r| (r.id.to_string(), r.name.clone()))
            .collect(),
        Some(Err(e)) => {
            tracing::warn!("Could not load routes: {}", e);
            Vec::new()
        }
        None => Vec::new(),
    };

    let pick_image = move |file: UploadFile| match event_image_base64(&file) {
        Ok(encoded) => {
            picked.set(Some(file.name.clone()));
            draft.write().image = Some(encoded);
        }
        Err(e) => feedback.invalid(&e),
    };

    let d = draft();
    rsx! {
        div { class: "card",
            if let Some(src) = current_image.filter(|_| d.image.is_none()) {
                img { src: "{src}", alt: "Imagen del evento", width: "240" }
            }
            div { class: "form-grid",
                SelectField {
                    label: "Tipo de evento *",
                    value: d.event_type,
                    options: plain_options(EVENT_TYPES),
                    on_change: move |v| draft.write().event_type = v,
                }
                SelectField {
                    label: "Ruta *",
                    value: d.route_id,
                    options: route_options,
                    placeholder: "Seleccione una ruta",
                    on_change: move |v| draft.write().route_id = v,
                }
                TextField {
                    label: "Fecha y hora *",
                    kind: "datetime-local",
                    value: d.creation_date,
                    on_input: move |v| draft.write().creation_date = v,
                }
                SelectField {
                    label: "Nivel *",
                    value: d.event_level,
                    options: plain_options(EVENT_LEVELS),
                    on_change: move |v| draft.write().event_level = v,
                }
                SelectField {
                    label: "Modalidad *",
                    value: d.event_mode,
                    options: plain_options(EVENT_MODES),
                    on_change: move |v| draft.write().event_mode = v,
                }
                FileField {
                    label: "Imagen (máx. 2MB)",
                    accept: "image/*",
                    on_file: pick_image,
                    current: picked(),
                }
            }
            TextArea {
                label: "Punto de encuentro *",
                value: d.meeting_point,
                on_input: move |v| draft.write().meeting_point = v,
            }
            div { class: "form-buttons",
                button {
                    class: "btn btn-primary",
                    disabled: busy,
                    onclick: move |_| on_submit.call(draft()),
                    "{submit_label}"
                }
                Link { to: Route::EventList {}, class: "btn", "Cancelar" }
            }
        }
    }
}

#[component]
pub fn CreateEvent() -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let mut busy = use_signal(|| false);
    // Remounts the form with empty fields after a successful save
    let mut generation = use_signal(|| 0u32);

    let submit = move |draft: EventDraft| {
        let api = api.clone();
        spawn(async move {
            let payload = match draft.validate(chrono::Local::now().naive_local()) {
                Ok(payload) => payload,
                Err(e) => {
                    feedback.invalid(&e);
                    return;
                }
            };
            busy.set(true);
            match services::events::create_event(&api, &payload).await {
                Ok(()) => {
                    feedback.success("Evento creado correctamente");
                    generation += 1;
                }
                Err(e) => feedback.api(&e),
            }
            busy.set(false);
        });
    };

    rsx! {
        h2 { "Crear Evento" }
        EventForm {
            key: "{generation}",
            initial: EventDraft::default(),
            submit_label: "Crear Evento",
            busy: busy(),
            on_submit: submit,
        }
    }
}

#[component]
pub fn EditEvent(id: i64) -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let mut busy = use_signal(|| false);

    // No single-event endpoint; pick it out of the admin list
    let mut event = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                services::events::fetch_events(&api)
                    .await
                    .map(|list| list.into_iter().find(|e| e.id == id))
            }
        }
    });

    let submit = move |draft: EventDraft| {
        let api = api.clone();
        spawn(async move {
            let payload = match draft.validate(chrono::Local::now().naive_local()) {
                Ok(payload) => payload,
                Err(e) => {
                    feedback.invalid(&e);
                    return;
                }
            };
            busy.set(true);
            match services::events::update_event(&api, id, &payload).await {
                Ok(()) => {
                    feedback.success("Evento actualizado correctamente");
                    feedback.navigate(&Route::EventList {}.to_string());
                }
                Err(e) => feedback.api(&e),
            }
            busy.set(false);
        });
    };

    let content = match event.read().clone() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! {
            ErrorAlert { error: e, on_retry: move |_| event.restart() }
        },
        Some(Ok(None)) => rsx! {
            p { "Evento no encontrado." }
            Link { to: Route::EventList {}, class: "btn", "Volver" }
        },
        Some(Ok(Some(found))) => rsx! {
            EventForm {
                initial: EventDraft::from(&found),
                submit_label: "Guardar cambios",
                busy: busy(),
                on_submit: submit,
                current_image: found.image_src().map(str::to_string),
            }
        },
    };

    rsx! {
        h2 { "Editar Evento" }
        {content}
    }
}

#[component]
pub fn ParticipantList() -> Element {
    let api = use_api();
    let mut selected = use_signal(String::new);

    let events = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { services::events::fetch_events(&api).await }
        }
    });

    let participants = use_resource(move || {
        let api = api.clone();
        let chosen = selected().parse::<i64>().ok();
        async move {
            match chosen {
                Some(id) => services::events::fetch_participants(&api, id).await.map(Some),
                None => Ok(None),
            }
        }
    });

    let event_options: Vec<(String, String)> = match &*events.read() {
        Some(Ok(list)) => list
            .iter()
            .map(|e| {
                (
                    e.id.to_string(),
                    format!("{} · {} · {}", e.event_type, e.route_label(), format::short_date(&e.creation_date)),
                )
            })
            .collect(),
        _ => Vec::new(),
    };

    let table = match participants.read().clone() {
        None => rsx! { Loading {} },
        Some(Ok(None)) => rsx! {
            p { class: "text-muted", "Selecciona un evento para ver sus participantes." }
        },
        Some(Ok(Some(list))) if list.is_empty() => rsx! {
            p { class: "text-muted", "Este evento aún no tiene participantes." }
        },
        Some(Ok(Some(list))) => rsx! {
            p { "Total inscritos: {list.len()}" }
            table { class: "table",
                thead {
                    tr {
                        th { "Nombre" }
                        th { "Teléfono" }
                        th { "Barrio" }
                        th { "Tipo de Sangre" }
                        th { "Habilidad" }
                        th { "Fecha Registro" }
                    }
                }
                tbody {
                    for participant in list {
                        {
                            let person = participant.person().cloned().unwrap_or_default();
                            rsx! {
                                tr { key: "{participant.id}",
                                    td { "{person.full_name()}" }
                                    td { "{person.phone_number}" }
                                    td { "{person.neighborhood}" }
                                    td { "{person.blood_type}" }
                                    td { "{person.skill_level}" }
                                    td { "{format::short_date(&participant.registered_at)}" }
                                }
                            }
                        }
                    }
                }
            }
        },
        Some(Err(e)) => rsx! {
            p { class: "text-muted", "{e}" }
        },
    };

    rsx! {
        h2 { "Lista de participantes" }
        SelectField {
            label: "Evento",
            value: selected(),
            options: event_options,
            placeholder: "Seleccione un evento",
            on_change: move |v| selected.set(v),
        }
        {table}
    }
}
