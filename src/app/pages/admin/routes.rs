use dioxus::prelude::*;

use crate::app::api_context::{use_api, use_config};
use crate::app::browser;
use crate::app::components::{ErrorAlert, Loading, TextField};
use crate::app::feedback::use_feedback;
use crate::app::Route;
use crate::error::ApiError;
use crate::models::RouteRecord;
use crate::services;
use crate::validation::RouteDraft;

#[component]
pub fn RouteList() -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let mut preview = use_signal(|| None::<i64>);

    let mut routes = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { services::routes::fetch_routes(&api).await }
        }
    });

    let delete = move |id: i64| {
        let api = api.clone();
        spawn(async move {
            if !browser::confirm("¿Estás seguro? Se borrará esta ruta permanentemente") {
                return;
            }
            match services::routes::delete_route(&api, id).await {
                Ok(()) => {
                    feedback.success("Ruta eliminada correctamente");
                    routes.restart();
                }
                // The backend refuses while events still reference the route
                Err(ApiError::Server { .. }) => feedback.error(
                    "No se puede eliminar la ruta porque está asociada a uno o más eventos.",
                ),
                Err(e) => feedback.api(&e),
            }
        });
    };

    let content = match routes.read().clone() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! {
            ErrorAlert { error: e, on_retry: move |_| routes.restart() }
        },
        Some(Ok(list)) if list.is_empty() => rsx! {
            p { class: "text-muted", "No hay rutas registradas." }
            Link { to: Route::CreateRoute {}, class: "btn btn-primary", "Crear Ruta" }
        },
        Some(Ok(list)) => rsx! {
            table { class: "table",
                thead {
                    tr {
                        th { "Nombre de la ruta" }
                        th { "Punto de Inicio" }
                        th { "Punto de Fin" }
                        th { "Duración (min)" }
                        th { "Ruta del evento" }
                        th { "Acciones" }
                    }
                }
                tbody {
                    for route in list {
                        RouteRow {
                            key: "{route.id}",
                            route,
                            on_preview: move |id: i64| preview.set(if preview() == Some(id) { None } else { Some(id) }),
                            on_delete: delete.clone(),
                            previewing: preview(),
                        }
                    }
                }
            }
        },
    };

    rsx! {
        h2 { "Lista de Rutas" }
        {content}
    }
}

#[component]
fn RouteRow(
    route: RouteRecord,
    previewing: Option<i64>,
    on_preview: EventHandler<i64>,
    on_delete: EventHandler<i64>,
) -> Element {
    let config = use_config();
    let id = route.id;
    let map = (previewing == Some(id))
        .then(|| config.maps_embed_url(&format!("{}, Quito", route.start_point)))
        .flatten();

    rsx! {
        tr {
            td { "{route.name}" }
            td { "{route.start_point}" }
            td { "{route.end_point}" }
            td { "{route.duration}" }
            td {
                button { class: "btn btn-link", onclick: move |_| on_preview.call(id), "🗺️ Ver" }
            }
            td {
                button { class: "btn btn-danger", onclick: move |_| on_delete.call(id), "Eliminar" }
            }
        }
        if let Some(url) = map {
            tr {
                td { colspan: "6",
                    iframe { src: "{url}", width: "100%", height: "280", style: "border:0;", "loading": "lazy" }
                }
            }
        }
    }
}

#[component]
pub fn CreateRoute() -> Element {
    let api = use_api();
    let config = use_config();
    let feedback = use_feedback();
    let mut draft = use_signal(RouteDraft::default);
    let mut saving = use_signal(|| false);

    let submit = move |_| {
        let api = api.clone();
        async move {
            let payload = match draft.read().validate() {
                Ok(payload) => payload,
                Err(e) => {
                    feedback.invalid(&e);
                    return;
                }
            };
            saving.set(true);
            match services::routes::create_route(&api, &payload).await {
                Ok(()) => {
                    feedback.success("Ruta creada con éxito.");
                    draft.set(RouteDraft::default());
                }
                Err(e) => feedback.api(&e),
            }
            saving.set(false);
        }
    };

    let d = draft();
    let start_map = (!d.start_point.trim().is_empty())
        .then(|| config.maps_embed_url(&format!("{}, Quito", d.start_point.trim())))
        .flatten();

    rsx! {
        h2 { "Crear Ruta" }
        div { class: "card",
            div { class: "form-grid",
                TextField {
                    label: "Nombre de la ruta *",
                    value: d.name,
                    placeholder: "Ingrese el nombre de la ruta",
                    on_input: move |v| draft.write().name = v,
                }
                TextField {
                    label: "Duración (min) *",
                    kind: "number",
                    value: d.duration,
                    placeholder: "Ingrese la duración de la ruta",
                    on_input: move |v| draft.write().duration = v,
                }
                TextField {
                    label: "Punto de inicio *",
                    value: d.start_point,
                    placeholder: "Buscar punto de inicio",
                    on_input: move |v| draft.write().start_point = v,
                }
                TextField {
                    label: "Punto de fin *",
                    value: d.end_point,
                    placeholder: "Buscar punto de fin",
                    on_input: move |v| draft.write().end_point = v,
                }
            }
            if let Some(url) = start_map {
                iframe { src: "{url}", width: "100%", height: "280", style: "border:0;", "loading": "lazy" }
            }
            div { class: "form-buttons",
                button { class: "btn btn-primary", disabled: saving(), onclick: submit, "Crear Ruta" }
                Link { to: Route::RouteList {}, class: "btn", "Ver rutas" }
            }
        }
    }
}
