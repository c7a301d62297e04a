//! The member's digital card and membership application.

use chrono::Months;
use dioxus::prelude::*;

use crate::app::api_context::use_api;
use crate::app::components::{ErrorAlert, Loading, Modal, SelectField, TextArea, TextField};
use crate::app::feedback::use_feedback;
use crate::app::pages::format;
use crate::app::user_context::use_user;
use crate::app::Route;
use crate::models::membership::{MembershipState, MEMBERSHIP_TYPES, PARTICIPATION_LEVELS};
use crate::models::{Membership, MembershipForm};
use crate::services;
use crate::services::memberships::DEFAULT_REACTIVATION_REASON;
use crate::validation::{digits_only, PHONE_MAX};

fn pairs(values: &[(&str, &str)]) -> Vec<(String, String)> {
    values
        .iter()
        .map(|(v, l)| (v.to_string(), l.to_string()))
        .collect()
}

fn level_label(raw: &str) -> String {
    PARTICIPATION_LEVELS
        .iter()
        .find(|(v, _)| *v == raw)
        .map(|(_, l)| l.to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[component]
fn MembershipFields(
    initial: MembershipForm,
    submit_label: &'static str,
    busy: bool,
    on_submit: EventHandler<MembershipForm>,
    /// The membership type cannot change once granted
    #[props(default)]
    lock_type: bool,
) -> Element {
    let mut form = use_signal(|| initial.clone());
    let f = form();

    rsx! {
        div { class: "form-grid",
            if lock_type {
                TextField {
                    label: "Tipo de Membresía",
                    value: f.membership_type.replacen('_', " ", 1),
                    on_input: move |_| {},
                    disabled: true,
                }
            } else {
                SelectField {
                    label: "Tipo de Membresía *",
                    value: f.membership_type,
                    options: pairs(MEMBERSHIP_TYPES),
                    on_change: move |v| form.write().membership_type = v,
                }
            }
            SelectField {
                label: "Nivel de Experiencia *",
                value: f.participation_level,
                options: pairs(PARTICIPATION_LEVELS),
                on_change: move |v| form.write().participation_level = v,
            }
        }
        h4 { "Datos de Emergencia" }
        div { class: "form-grid",
            TextField {
                label: "Contacto de Emergencia",
                value: f.emergency_contact,
                placeholder: "Solo letras",
                on_input: move |v| form.write().emergency_contact = v,
            }
            TextField {
                label: "Teléfono de Emergencia",
                kind: "tel",
                value: f.emergency_phone,
                placeholder: "Ej: 0991234567",
                on_input: move |v: String| form.write().emergency_phone = digits_only(&v, PHONE_MAX),
            }
        }
        TextArea {
            label: "Condiciones Médicas",
            value: f.medical_conditions,
            on_input: move |v| form.write().medical_conditions = v,
        }
        div { class: "form-buttons",
            button {
                class: "btn btn-primary",
                disabled: busy,
                onclick: move |_| on_submit.call(form()),
                "{submit_label}"
            }
        }
    }
}

#[component]
pub fn MyMembership() -> Element {
    let api = use_api();

    let mut membership = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { services::memberships::my_status(&api).await }
        }
    });

    let state = membership.read().clone();
    match state {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! {
            ErrorAlert { error: e, on_retry: move |_| membership.restart() }
        },
        Some(Ok(None)) => rsx! { JoinInvitation {} },
        Some(Ok(Some(current))) => rsx! {
            MembershipCard { membership: current, on_changed: move |_| membership.restart() }
        },
    }
}

#[component]
fn JoinInvitation() -> Element {
    rsx! {
        div { class: "card welcome-card",
            div { style: "font-size:3rem;", "🚴" }
            h2 { "¡Bienvenido al Club!" }
            p { class: "text-muted", "Tu aventura sobre ruedas comienza aquí" }
            ul {
                li { "Acceso a rutas exclusivas" }
                li { "Comunidad activa de ciclistas" }
                li { "Eventos y competencias" }
            }
            Link { to: Route::CreateMembership {}, class: "btn btn-primary", "Inscribirme Ahora →" }
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Dialog {
    Edit,
    Renew,
}

#[component]
fn MembershipCard(membership: Membership, on_changed: EventHandler<()>) -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let user = use_user();
    let mut dialog = use_signal(|| None::<Dialog>);
    let mut busy = use_signal(|| false);

    let today = chrono::Local::now().date_naive();
    let account = user.account();
    let user_id = membership
        .user_id
        .or_else(|| account.as_ref().map(|a| a.id))
        .unwrap_or_default();
    let name = user.display_name();
    let picture = account
        .as_ref()
        .and_then(|a| a.person.as_ref())
        .and_then(|p| p.profile_picture.clone())
        .filter(|p| !p.is_empty());

    let stats = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { services::memberships::participation_stats(&api, user_id).await }
        }
    });

    let save = {
        let api = api.clone();
        move |form: MembershipForm| {
            let api = api.clone();
            spawn(async move {
                let form = match form.validated_update() {
                    Ok(form) => form,
                    Err(e) => {
                        feedback.invalid(&e);
                        return;
                    }
                };
                busy.set(true);
                match services::memberships::update_membership(&api, user_id, &form).await {
                    Ok(()) => {
                        feedback.success("✅ Datos actualizados correctamente");
                        dialog.set(None);
                        on_changed.call(());
                    }
                    Err(e) => feedback.api(&e),
                }
                busy.set(false);
            });
        }
    };

    let renew = {
        let api = api.clone();
        move |_: MouseEvent| {
            let api = api.clone();
            async move {
                busy.set(true);
                match services::memberships::renew_membership(&api, user_id).await {
                    Ok(_) => {
                        feedback.success("✅ Membresía renovada exitosamente");
                        dialog.set(None);
                        on_changed.call(());
                    }
                    Err(e) => feedback.api(&e),
                }
                busy.set(false);
            }
        }
    };

    let reactivate = move |_: MouseEvent| {
        let api = api.clone();
        async move {
            match services::memberships::request_reactivation(
                &api,
                user_id,
                chrono::Local::now().date_naive(),
                DEFAULT_REACTIVATION_REASON,
            )
            .await
            {
                Ok(_) => feedback.success("✅ Solicitud enviada al administrador"),
                Err(e) => feedback.api(&e),
            }
        }
    };

    let state = membership.state();
    let state_class = match state {
        MembershipState::Active => "card-active",
        MembershipState::Inactive => "card-inactive",
        MembershipState::Pending | MembershipState::Other => "card-pending",
    };
    let days_left = membership
        .days_remaining(today)
        .filter(|d| state == MembershipState::Active && *d > 0);
    let level = level_label(membership.participation_level.as_deref().unwrap_or_default());
    let start = membership.start_date.map(format::long_date).unwrap_or_else(|| "---".to_string());
    let end = membership.end_date.map(format::long_date).unwrap_or_else(|| "---".to_string());
    let new_end = today
        .checked_add_months(Months::new(12))
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default();
    let participation = match &*stats.read() {
        Some(Ok(s)) => Some((
            s.attended_events,
            s.total_events,
            format!("{:.0}%", s.participation_rate),
        )),
        Some(Err(e)) => {
            tracing::debug!("Participation stats unavailable: {}", e);
            None
        }
        None => None,
    };
    let days_class = match days_left {
        Some(d) if d <= 30 => "text-danger",
        _ => "text-success",
    };
    let emergency_contact = membership.emergency_contact.clone().unwrap_or_default();
    let emergency_phone = membership.emergency_phone.clone().unwrap_or_default();

    rsx! {
        h2 { "Mi Carnet Digital" }
        div { class: "card digital-id-card {state_class}",
            div { class: "card-photo-section",
                div { class: "club-logo-small", "CLUB DE CICLISMO EPN" }
                if let Some(src) = picture {
                    img { class: "photo-frame", src: "{src}", alt: "Foto" }
                } else {
                    div { class: "photo-frame", "👤" }
                }
                strong { "NIVEL: {level.to_uppercase()}" }
            }
            div { class: "card-data-section",
                div { style: "display:flex;justify-content:space-between;align-items:center;",
                    h1 { class: "member-name", "{name}" }
                    if state == MembershipState::Active {
                        button { class: "btn", onclick: move |_| dialog.set(Some(Dialog::Edit)), "✏️ Editar" }
                    }
                }
                span { class: "badge", "{membership.type_label()}" }
                div { class: "grid",
                    div {
                        h4 { "Miembro Desde" }
                        p { "{start}" }
                    }
                    div {
                        h4 { "Válido Hasta" }
                        p { "{end}" }
                        if let Some(days) = days_left {
                            small { class: days_class,
                                "({days} días restantes)"
                            }
                        }
                    }
                }
                p {
                    "Contacto de emergencia: "
                    strong { "{emergency_contact}" }
                    if !emergency_phone.is_empty() {
                        " ({emergency_phone})"
                    }
                }
                div { class: "form-buttons",
                    match state {
                        MembershipState::Active => rsx! {
                            span { class: "status-text", "✅ MEMBRESÍA ACTIVA" }
                        },
                        MembershipState::Pending => rsx! {
                            button { class: "btn btn-primary", onclick: reactivate, "✉️ Solicitar Reactivación" }
                        },
                        MembershipState::Inactive => rsx! {
                            button { class: "btn btn-primary", onclick: move |_| dialog.set(Some(Dialog::Renew)), "🔄 Renovar" }
                        },
                        MembershipState::Other => rsx! {
                            span { class: "status-text", "{membership.status}" }
                        },
                    }
                }
            }
        }

        if let Some((attended, total, rate)) = participation {
            div { class: "card",
                h3 { "Mi participación" }
                p { "Eventos asistidos: {attended} de {total}" }
                p { "Tasa de participación: {rate}" }
            }
        }

        match dialog() {
            Some(Dialog::Edit) => rsx! {
                Modal {
                    title: "Actualizar Datos de Membresía".to_string(),
                    on_close: move |_| dialog.set(None),
                    MembershipFields {
                        initial: MembershipForm::from(&membership),
                        submit_label: "Actualizar",
                        busy: busy(),
                        on_submit: save.clone(),
                        lock_type: true,
                    }
                }
            },
            Some(Dialog::Renew) => rsx! {
                Modal {
                    title: "Renovar Membresía".to_string(),
                    on_close: move |_| dialog.set(None),
                    h4 { "Tu membresía actual:" }
                    p { strong { "Estado: " } span { class: "text-danger", "Vencida" } }
                    p { strong { "Vencimiento actual: " } "{end}" }
                    p { strong { "Tipo: " } "{membership.type_label()}" }
                    p { strong { "Nivel: " } "{level}" }
                    h4 { "📋 Detalles de Renovación" }
                    p { strong { "Nuevo vencimiento: " } "{new_end}" }
                    p { strong { "Duración: " } "1 año adicional" }
                    p { strong { "Estado después: " } span { class: "text-success", "ACTIVA" } }
                    div { class: "form-buttons",
                        button {
                            class: "btn btn-primary",
                            disabled: busy(),
                            onclick: renew.clone(),
                            if busy() { "Procesando..." } else { "Confirmar Renovación" }
                        }
                        button { class: "btn", disabled: busy(), onclick: move |_| dialog.set(None), "Cancelar" }
                    }
                }
            },
            None => rsx! {},
        }
    }
}

#[component]
pub fn CreateMembership() -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let mut busy = use_signal(|| false);

    let existing = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { services::memberships::my_status(&api).await }
        }
    });

    let submit = move |form: MembershipForm| {
        let api = api.clone();
        spawn(async move {
            let form = match form.validated() {
                Ok(form) => form,
                Err(e) => {
                    feedback.invalid(&e);
                    return;
                }
            };
            busy.set(true);
            match services::memberships::create_membership(&api, &form).await {
                Ok(()) => {
                    feedback.success("🎉 Solicitud de membresía enviada");
                    feedback.navigate(&Route::MyMembership {}.to_string());
                }
                Err(e) => feedback.api(&e),
            }
            busy.set(false);
        });
    };

    let initial = MembershipForm {
        membership_type: MEMBERSHIP_TYPES[0].0.to_string(),
        participation_level: PARTICIPATION_LEVELS[0].0.to_string(),
        ..MembershipForm::default()
    };

    let content = match &*existing.read() {
        None => rsx! { Loading {} },
        Some(Ok(Some(_))) => rsx! {
            p { "Ya tienes una membresía registrada." }
            Link { to: Route::MyMembership {}, class: "btn btn-primary", "Ver mi carnet" }
        },
        // A failed lookup should not block applying
        Some(_) => rsx! {
            div { class: "card",
                MembershipFields {
                    initial,
                    submit_label: "Enviar solicitud",
                    busy: busy(),
                    on_submit: submit,
                }
            }
        },
    };

    rsx! {
        h2 { "Solicitar Membresía" }
        {content}
    }
}
