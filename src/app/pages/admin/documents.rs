//! Club document archive.

use dioxus::prelude::*;

use crate::app::api_context::use_api;
use crate::app::browser;
use crate::app::components::{
    ErrorAlert, FileField, Loading, Modal, SelectField, TextArea, TextField,
};
use crate::app::feedback::use_feedback;
use crate::app::pages::format;
use crate::app::Route;
use crate::models::document::format_file_size;
use crate::models::{Document, DocumentType};
use crate::services::{self, UploadFile};
use crate::validation::{check_document_file, DocumentDraft};

const DOCUMENT_ACCEPT: &str = ".pdf,.doc,.docx,.txt,.odt";

fn type_options() -> Vec<(String, String)> {
    DocumentType::ALL
        .iter()
        .map(|t| (t.as_str().to_string(), t.label().to_string()))
        .collect()
}

fn type_label(raw: &str) -> String {
    DocumentType::parse(raw)
        .map(|t| t.label().to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[component]
fn DocumentFields(
    initial: DocumentDraft,
    submit_label: &'static str,
    busy: bool,
    on_submit: EventHandler<DocumentDraft>,
    /// Stored file name when editing
    #[props(default)]
    existing_file: Option<String>,
) -> Element {
    let feedback = use_feedback();
    let mut draft = use_signal(|| initial.clone());

    let pick = move |file: UploadFile| match check_document_file(&file) {
        Ok(()) => draft.write().file = Some(file),
        Err(e) => feedback.invalid(&e),
    };

    let d = draft();
    let current = d.file.as_ref().map(|f| f.name.clone()).or(existing_file);
    rsx! {
        div { class: "form-grid",
            TextField {
                label: "Nombre del documento *",
                value: d.name,
                on_input: move |v| draft.write().name = v,
            }
            TextField {
                label: "Fecha de ingreso *",
                kind: "date",
                value: d.entry_date,
                on_input: move |v| draft.write().entry_date = v,
            }
            TextField {
                label: "Responsable *",
                value: d.responsible,
                on_input: move |v| draft.write().responsible = v,
            }
            SelectField {
                label: "Tipo de documento *",
                value: d.document_type,
                options: type_options(),
                on_change: move |v| draft.write().document_type = v,
            }
            FileField {
                label: "Archivo (PDF, Word, TXT u ODT; máx. 50MB)",
                accept: DOCUMENT_ACCEPT,
                on_file: pick,
                current,
            }
        }
        TextArea {
            label: "Descripción *",
            value: d.description,
            on_input: move |v| draft.write().description = v,
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
pub fn Documents() -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let mut editing = use_signal(|| None::<Document>);
    let mut saving = use_signal(|| false);

    let mut documents = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { services::documents::fetch_documents(&api).await }
        }
    });

    let delete = {
        let api = api.clone();
        move |id: i64| {
            let api = api.clone();
            spawn(async move {
                if !browser::confirm("¿Estás seguro? El documento se eliminará permanentemente") {
                    return;
                }
                match services::documents::delete_document(&api, id).await {
                    Ok(()) => {
                        feedback.success("Documento eliminado correctamente");
                        documents.restart();
                    }
                    Err(e) => feedback.api(&e),
                }
            });
        }
    };

    let save = {
        let api = api.clone();
        move |draft: DocumentDraft| {
            let api = api.clone();
            spawn(async move {
                let Some(target) = editing() else { return };
                let (form, file) = match draft.validate(chrono::Local::now().date_naive(), false) {
                    Ok(valid) => valid,
                    Err(e) => {
                        feedback.invalid(&e);
                        return;
                    }
                };
                saving.set(true);
                match services::documents::update_document(&api, target.id, &form, file).await {
                    Ok(()) => {
                        feedback.success("✅ Documento actualizado correctamente");
                        editing.set(None);
                        documents.restart();
                    }
                    Err(e) => feedback.api(&e),
                }
                saving.set(false);
            });
        }
    };

    let content = match documents.read().clone() {
        None => rsx! { Loading { label: "Cargando documentos..." } },
        Some(Err(e)) => rsx! {
            ErrorAlert { error: e, on_retry: move |_| documents.restart() }
        },
        Some(Ok(list)) if list.documents.is_empty() => rsx! {
            p { class: "text-muted", "No hay documentos registrados." }
            Link { to: Route::CreateDocument {}, class: "btn btn-primary", "Subir documento" }
        },
        Some(Ok(list)) => rsx! {
            p { class: "text-muted", "{list.total.max(list.documents.len())} documento(s)" }
            div { class: "grid",
                for doc in list.documents {
                    {
                        let id = doc.id;
                        let href = services::documents::download_url(&api, id);
                        let size = doc.file_size.map(format_file_size).unwrap_or_default();
                        let delete = delete.clone();
                        let target = doc.clone();
                        rsx! {
                            div { key: "{id}", class: "card",
                                h3 { "{doc.name}" }
                                p { class: "text-muted", "{type_label(&doc.document_type)} · {format::short_date(&doc.entry_date)}" }
                                p { "Responsable: {doc.responsible}" }
                                if let Some(description) = doc.description.clone() {
                                    p { "{description}" }
                                }
                                p { class: "text-muted", "📎 {doc.file_name} {size}" }
                                div { class: "form-buttons",
                                    a { class: "btn", href: "{href}", target: "_blank", rel: "noopener", "Descargar" }
                                    button { class: "btn", onclick: move |_| editing.set(Some(target.clone())), "Editar" }
                                    button { class: "btn btn-danger", onclick: move |_| delete(id), "Eliminar" }
                                }
                            }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        h2 { "Documentos del Club" }
        {content}
        if let Some(target) = editing() {
            Modal {
                title: format!("Editar · {}", target.name),
                on_close: move |_| editing.set(None),
                DocumentFields {
                    key: "{target.id}",
                    initial: DocumentDraft::from(&target),
                    submit_label: "Guardar cambios",
                    busy: saving(),
                    on_submit: save.clone(),
                    existing_file: Some(target.file_name.clone()),
                }
            }
        }
    }
}

#[component]
pub fn CreateDocument() -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let mut busy = use_signal(|| false);
    let mut generation = use_signal(|| 0u32);

    let submit = move |draft: DocumentDraft| {
        let api = api.clone();
        spawn(async move {
            let (form, file) = match draft.validate(chrono::Local::now().date_naive(), true) {
                Ok((form, Some(file))) => (form, file),
                Ok((_, None)) => return,
                Err(e) => {
                    feedback.invalid(&e);
                    return;
                }
            };
            busy.set(true);
            match services::documents::create_document(&api, &form, file).await {
                Ok(()) => {
                    feedback.success("Documento creado correctamente");
                    generation += 1;
                }
                Err(e) => feedback.api(&e),
            }
            busy.set(false);
        });
    };

    rsx! {
        h2 { "Subir Documento" }
        div { class: "card",
            DocumentFields {
                key: "{generation}",
                initial: DocumentDraft::default(),
                submit_label: "Guardar documento",
                busy: busy(),
                on_submit: submit,
            }
            Link { to: Route::Documents {}, class: "btn", "Ver documentos" }
        }
    }
}
