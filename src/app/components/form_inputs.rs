//! Reusable form input components.

use dioxus::prelude::*;

use crate::services::UploadFile;

/// A labeled text-like input (`text`, `email`, `password`, `date`, ...).
#[component]
pub fn TextField(
    /// Input label
    label: &'static str,
    /// Current value
    value: String,
    /// Called with the new value on every keystroke
    on_input: EventHandler<String>,
    /// HTML input type
    #[props(default = "text")]
    kind: &'static str,
    #[props(default)] placeholder: &'static str,
    #[props(default)] disabled: bool,
) -> Element {
    rsx! {
        div { class: "field",
            label { "{label}" }
            input {
                r#type: kind,
                placeholder,
                disabled,
                value: "{value}",
                oninput: move |e| on_input.call(e.value()),
            }
        }
    }
}

/// Password input with a show/hide toggle.
#[component]
pub fn PasswordField(
    label: &'static str,
    value: String,
    on_input: EventHandler<String>,
    #[props(default)] placeholder: &'static str,
) -> Element {
    let mut visible = use_signal(|| false);
    let kind = if visible() { "text" } else { "password" };

    rsx! {
        div { class: "field",
            label { "{label}" }
            div { style: "display:flex;gap:0.5rem;",
                input {
                    style: "flex:1;",
                    r#type: kind,
                    placeholder,
                    value: "{value}",
                    oninput: move |e| on_input.call(e.value()),
                }
                button {
                    r#type: "button",
                    class: "btn btn-link",
                    onclick: move |_| visible.toggle(),
                    if visible() { "Ocultar" } else { "Mostrar" }
                }
            }
        }
    }
}

#[component]
pub fn TextArea(
    label: &'static str,
    value: String,
    on_input: EventHandler<String>,
    #[props(default)] placeholder: &'static str,
) -> Element {
    rsx! {
        div { class: "field",
            label { "{label}" }
            textarea {
                placeholder,
                value: "{value}",
                oninput: move |e| on_input.call(e.value()),
            }
        }
    }
}

/// A labeled select. `options` are `(value, label)` pairs; an empty
/// placeholder option comes first.
#[component]
pub fn SelectField(
    label: &'static str,
    value: String,
    options: Vec<(String, String)>,
    on_change: EventHandler<String>,
    #[props(default = "Seleccione...")]
    placeholder: &'static str,
) -> Element {
    rsx! {
        div { class: "field",
            label { "{label}" }
            select {
                value: "{value}",
                onchange: move |e| on_change.call(e.value()),
                option { value: "", "{placeholder}" }
                for (option_value, option_label) in options {
                    option {
                        key: "{option_value}",
                        value: "{option_value}",
                        selected: option_value == value,
                        "{option_label}"
                    }
                }
            }
        }
    }
}

/// `(value, label)` pairs for a select whose values are their own labels.
pub fn plain_options(values: &[&str]) -> Vec<(String, String)> {
    values
        .iter()
        .map(|v| (v.to_string(), v.to_string()))
        .collect()
}

/// File picker handing the first selected file over as bytes.
#[component]
pub fn FileField(
    label: &'static str,
    /// `accept` attribute, e.g. `image/*` or `.pdf,.docx`
    accept: &'static str,
    on_file: EventHandler<UploadFile>,
    /// Name of the currently attached file, if any
    #[props(default)]
    current: Option<String>,
) -> Element {
    rsx! {
        div { class: "field",
            label { "{label}" }
            input {
                r#type: "file",
                accept,
                onchange: move |e: FormEvent| async move {
                    if let Some(file) = read_first_file(&e).await {
                        on_file.call(file);
                    }
                },
            }
            if let Some(name) = current {
                small { class: "text-muted", "Archivo: {name}" }
            }
        }
    }
}

async fn read_first_file(e: &FormEvent) -> Option<UploadFile> {
    let file = e.files().into_iter().next()?;
    let name = file.name();
    match file.read_bytes().await {
        Ok(bytes) => Some(UploadFile {
            content_type: file
                .content_type()
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            name,
            bytes: bytes.to_vec(),
        }),
        Err(err) => {
            tracing::warn!("Could not read {}: {}", name, err);
            None
        }
    }
}
