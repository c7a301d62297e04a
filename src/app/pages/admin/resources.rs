//! Inventory: commercial products and operational assets.

use dioxus::prelude::*;

use crate::app::api_context::use_api;
use crate::app::browser;
use crate::app::components::{ErrorAlert, Loading, Modal, SelectField, TextArea, TextField};
use crate::app::feedback::use_feedback;
use crate::app::pages::format;
use crate::models::resource::AssetState;
use crate::models::Resource;
use crate::services;
use crate::validation::{ResourceDraft, ResourceKind};

fn kind_options() -> Vec<(String, String)> {
    vec![
        ("COMERCIAL".to_string(), "Comercial (venta)".to_string()),
        ("OPERATIVO".to_string(), "Operativo (activo del club)".to_string()),
    ]
}

fn kind_value(kind: Option<ResourceKind>) -> String {
    match kind {
        Some(ResourceKind::Commercial) => "COMERCIAL".to_string(),
        Some(ResourceKind::Operational) => "OPERATIVO".to_string(),
        None => String::new(),
    }
}

fn parse_kind(value: &str) -> Option<ResourceKind> {
    match value {
        "COMERCIAL" => Some(ResourceKind::Commercial),
        "OPERATIVO" => Some(ResourceKind::Operational),
        _ => None,
    }
}

fn state_options() -> Vec<(String, String)> {
    AssetState::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect()
}

/// Field set for both creating and editing. The kind is fixed when editing.
#[component]
fn ResourceForm(
    initial: ResourceDraft,
    submit_label: &'static str,
    busy: bool,
    on_submit: EventHandler<ResourceDraft>,
    #[props(default)] lock_kind: bool,
) -> Element {
    let mut draft = use_signal(|| initial.clone());
    let d = draft();
    let kind = d.kind;

    rsx! {
        div { class: "form-grid",
            if lock_kind {
                p { class: "text-muted",
                    "Tipo: "
                    strong { {kind_options().into_iter().find(|(v, _)| *v == kind_value(kind)).map(|(_, l)| l).unwrap_or_default()} }
                }
            } else {
                SelectField {
                    label: "Tipo de recurso *",
                    value: kind_value(kind),
                    options: kind_options(),
                    on_change: move |v: String| draft.write().kind = parse_kind(&v),
                }
            }
            TextField {
                label: "Nombre *",
                value: d.nombre,
                on_input: move |v| draft.write().nombre = v,
            }
            TextField {
                label: "Categoría",
                value: d.categoria,
                on_input: move |v| draft.write().categoria = v,
            }
            TextField {
                label: "Fecha de adquisición *",
                kind: "date",
                value: d.fecha_adquisicion,
                on_input: move |v| draft.write().fecha_adquisicion = v,
            }
            TextField {
                label: "Costo de adquisición *",
                kind: "number",
                value: d.costo_adquisicion,
                on_input: move |v| draft.write().costo_adquisicion = v,
            }
            TextField {
                label: "URL de imagen",
                value: d.imagen_url,
                on_input: move |v| draft.write().imagen_url = v,
            }
            TextField {
                label: "Tallas disponibles",
                value: d.tallas_disponibles,
                placeholder: "S, M, L",
                on_input: move |v| draft.write().tallas_disponibles = v,
            }
        }
        TextArea {
            label: "Descripción *",
            value: d.descripcion,
            on_input: move |v| draft.write().descripcion = v,
        }
        TextArea {
            label: "Observación",
            value: d.observacion,
            on_input: move |v| draft.write().observacion = v,
        }
        match kind {
            Some(ResourceKind::Commercial) => rsx! {
                h4 { "Datos comerciales" }
                div { class: "form-grid",
                    TextField {
                        label: "Precio de venta *",
                        kind: "number",
                        value: d.precio_venta,
                        on_input: move |v| draft.write().precio_venta = v,
                    }
                    TextField {
                        label: "Stock *",
                        kind: "number",
                        value: d.stock_inicial,
                        on_input: move |v| draft.write().stock_inicial = v,
                    }
                    TextField {
                        label: "SKU",
                        value: d.sku,
                        on_input: move |v| draft.write().sku = v,
                    }
                }
            },
            Some(ResourceKind::Operational) => rsx! {
                h4 { "Datos del activo" }
                div { class: "form-grid",
                    TextField {
                        label: "Código de activo *",
                        value: d.codigo_activo,
                        placeholder: "ACT-001",
                        on_input: move |v| draft.write().codigo_activo = v,
                    }
                    SelectField {
                        label: "Estado *",
                        value: d.estado,
                        options: state_options(),
                        on_change: move |v| draft.write().estado = v,
                    }
                    TextField {
                        label: "Ubicación *",
                        value: d.ubicacion,
                        on_input: move |v| draft.write().ubicacion = v,
                    }
                }
            },
            None => rsx! {},
        }
        div { class: "form-buttons",
            button {
                class: "btn btn-primary",
                disabled: busy,
                onclick: move |_| on_submit.call(draft()),
                "{submit_label}"
            }
        }
    }
}

#[component]
pub fn ResourceList() -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let mut editing = use_signal(|| None::<Resource>);
    let mut saving = use_signal(|| false);

    let mut resources = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { services::resources::fetch_resources(&api).await }
        }
    });

    let delete = {
        let api = api.clone();
        move |id: i64| {
            let api = api.clone();
            spawn(async move {
                if !browser::confirm("¿Estás seguro? El recurso se borrará de forma permanente") {
                    return;
                }
                match services::resources::delete_resource(&api, id).await {
                    Ok(()) => {
                        feedback.success("Recurso eliminado correctamente");
                        resources.restart();
                    }
                    Err(e) => feedback.api(&e),
                }
            });
        }
    };

    let save = move |draft: ResourceDraft| {
        let api = api.clone();
        spawn(async move {
            let Some(target) = editing() else { return };
            let payload = match draft.validate(chrono::Local::now().date_naive()) {
                Ok(payload) => payload,
                Err(e) => {
                    feedback.invalid(&e);
                    return;
                }
            };
            saving.set(true);
            match services::resources::update_resource(&api, target.id(), &payload).await {
                Ok(()) => {
                    feedback.success(&format!("✅ Recurso \"{}\" actualizado", draft.nombre.trim()));
                    editing.set(None);
                    resources.restart();
                }
                Err(e) => feedback.api(&e),
            }
            saving.set(false);
        });
    };

    let content = match resources.read().clone() {
        None => rsx! { Loading { label: "Cargando inventario..." } },
        Some(Err(e)) => rsx! {
            ErrorAlert { error: e, on_retry: move |_| resources.restart() }
        },
        Some(Ok(list)) if list.is_empty() => rsx! {
            p { class: "text-muted", "No hay recursos registrados." }
        },
        Some(Ok(list)) => rsx! {
            table { class: "table",
                thead {
                    tr {
                        th { "Tipo" }
                        th { "Nombre" }
                        th { "Categoría" }
                        th { "Fecha Ingreso" }
                        th { "Costo Adq." }
                        th { "Acciones" }
                    }
                }
                tbody {
                    for resource in list {
                        {
                            let id = resource.id();
                            let base = resource.base().clone();
                            let delete = delete.clone();
                            let target = resource.clone();
                            rsx! {
                                tr { key: "{id}",
                                    td { "{resource.kind_label()}" }
                                    td { "{base.nombre}" }
                                    td { {base.categoria.clone().unwrap_or_else(|| "-".to_string())} }
                                    td { {base.fecha_adquisicion.map(format::long_date).unwrap_or_else(|| "-".to_string())} }
                                    td { "{format::money(base.costo_adquisicion)}" }
                                    td {
                                        button { class: "btn", onclick: move |_| editing.set(Some(target.clone())), "Editar" }
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
        h2 { "Inventario de Recursos" }
        {content}
        if let Some(target) = editing() {
            Modal {
                title: format!("Editar · {}", target.base().nombre),
                on_close: move |_| editing.set(None),
                ResourceForm {
                    key: "{target.id()}",
                    initial: ResourceDraft::from(&target),
                    submit_label: "Guardar cambios",
                    busy: saving(),
                    on_submit: save,
                    lock_kind: true,
                }
            }
        }
    }
}

#[component]
pub fn CreateResource() -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let mut busy = use_signal(|| false);
    let mut generation = use_signal(|| 0u32);

    let submit = move |draft: ResourceDraft| {
        let api = api.clone();
        spawn(async move {
            let payload = match draft.validate(chrono::Local::now().date_naive()) {
                Ok(payload) => payload,
                Err(e) => {
                    feedback.invalid(&e);
                    return;
                }
            };
            busy.set(true);
            match services::resources::create_resource(&api, &payload).await {
                Ok(()) => {
                    feedback.success(&format!(
                        "✅ Recurso \"{}\" creado correctamente",
                        draft.nombre.trim()
                    ));
                    generation += 1;
                }
                Err(e) => feedback.api(&e),
            }
            busy.set(false);
        });
    };

    rsx! {
        h2 { "Registrar Recurso" }
        div { class: "card",
            ResourceForm {
                key: "{generation}",
                initial: ResourceDraft::default(),
                submit_label: "Guardar recurso",
                busy: busy(),
                on_submit: submit,
            }
        }
    }
}
