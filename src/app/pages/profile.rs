//! Profile editor shared by both dashboards.

use dioxus::prelude::*;

use crate::app::api_context::use_api;
use crate::app::components::{ErrorAlert, FileField, Loading, SelectField, TextField, plain_options};
use crate::app::feedback::use_feedback;
use crate::app::user_context::use_user;
use crate::models::user::{BLOOD_TYPES, SKILL_LEVELS};
use crate::models::UserAccount;
use crate::services::{self, UploadFile};
use crate::validation::{digits_only, profile_picture_data_url, ProfileDraft, PHONE_MAX};

/// Loads a fresh profile, then hands it to the form. `home` is where
/// saving or cancelling leads.
#[component]
pub fn EditProfile(home: &'static str) -> Element {
    let api = use_api();

    let mut profile = use_resource(move || {
        let api = api.clone();
        async move { services::users::fetch_my_profile(&api).await }
    });

    let state = profile.read().clone();
    match state {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! {
            ErrorAlert { error: e, on_retry: move |_| profile.restart() }
        },
        Some(Ok(account)) => rsx! {
            ProfileForm { account, home }
        },
    }
}

#[component]
fn ProfileForm(account: UserAccount, home: &'static str) -> Element {
    let api = use_api();
    let user = use_user();
    let feedback = use_feedback();
    let persona = account.person.clone();
    let mut draft = use_signal(|| persona.as_ref().map(ProfileDraft::from).unwrap_or_default());
    let mut saving = use_signal(|| false);

    let persona_id = persona.as_ref().map(|p| p.id);
    let save = move |_| {
        let api = api.clone();
        async move {
            let Some(id) = persona_id else {
                feedback.error("Error cargando perfil");
                return;
            };
            let update = match draft.read().validate() {
                Ok(update) => update,
                Err(e) => {
                    feedback.invalid(&e);
                    return;
                }
            };
            saving.set(true);
            match services::users::update_persona(&api, id, &update).await {
                Ok(()) => {
                    user.refresh(&api).await;
                    feedback.success("Perfil actualizado");
                    feedback.navigate(home);
                }
                Err(e) => feedback.api(&e),
            }
            saving.set(false);
        }
    };

    let d = draft();
    let picture = d
        .profile_picture
        .clone()
        .or_else(|| persona.as_ref().and_then(|p| p.profile_picture.clone()));
    let email = account.email.clone().unwrap_or_default();

    rsx! {
        h2 { "Editar Perfil" }
        div { class: "card",
            if let Some(src) = picture {
                img { class: "avatar", src: "{src}", alt: "Foto de perfil", width: "120" }
            }
            FileField {
                label: "Foto de perfil",
                accept: "image/*",
                on_file: move |file: UploadFile| match profile_picture_data_url(&file) {
                    Ok(url) => draft.write().profile_picture = Some(url),
                    Err(e) => feedback.invalid(&e),
                },
            }
            if !email.is_empty() {
                p { class: "text-muted", "{email}" }
            }
            div { class: "form-grid",
                TextField {
                    label: "Nombre",
                    value: d.first_name,
                    on_input: move |v| draft.write().first_name = v,
                }
                TextField {
                    label: "Apellido",
                    value: d.last_name,
                    on_input: move |v| draft.write().last_name = v,
                }
                TextField {
                    label: "Teléfono",
                    kind: "tel",
                    value: d.phone_number,
                    on_input: move |v: String| draft.write().phone_number = digits_only(&v, PHONE_MAX),
                }
                SelectField {
                    label: "Tipo de Sangre",
                    value: d.blood_type,
                    options: plain_options(BLOOD_TYPES),
                    on_change: move |v| draft.write().blood_type = v,
                }
                SelectField {
                    label: "Nivel",
                    value: d.skill_level,
                    options: plain_options(SKILL_LEVELS),
                    on_change: move |v| draft.write().skill_level = v,
                }
                TextField {
                    label: "Ciudad",
                    value: d.city,
                    on_input: move |v| draft.write().city = v,
                }
                TextField {
                    label: "Barrio",
                    value: d.neighborhood,
                    on_input: move |v| draft.write().neighborhood = v,
                }
            }
            div { class: "form-buttons",
                button { class: "btn btn-primary", disabled: saving(), onclick: save, "Guardar" }
                button { class: "btn", onclick: move |_| feedback.navigate(home), "Cancelar" }
            }
        }
    }
}
