//! Password recovery (email, code, new password) and student email
//! verification.

use dioxus::prelude::*;

use crate::app::api_context::use_api;
use crate::app::components::{PasswordField, TextField};
use crate::app::feedback::use_feedback;
use crate::app::Route;
use crate::models::MessageResponse;
use crate::services;
use crate::storage::{BrowserStore, KeyValueStore, RECOVERY_EMAIL_KEY};
use crate::validation::{clamp_len, digits_only, ResetPasswordDraft, RESET_PASSWORD_MAX};

const CODE_LEN: usize = 6;

fn message_or(response: &MessageResponse, fallback: &str) -> String {
    response
        .message
        .clone()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[component]
pub fn SendEmail() -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let mut email = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let submit = move |_| {
        let api = api.clone();
        async move {
            let address = email.read().trim().to_string();
            if address.is_empty() {
                feedback.error("Por favor, ingresa tu correo electrónico.");
                return;
            }
            busy.set(true);
            match services::auth::send_password_reset_email(&api, &address).await {
                Ok(response) => {
                    BrowserStore::local().set(RECOVERY_EMAIL_KEY, &address);
                    feedback.success(message_or(&response, "Código enviado a tu correo."));
                    feedback.navigate(&Route::VerifyCode {}.to_string());
                }
                Err(e) => feedback.api(&e),
            }
            busy.set(false);
        }
    };

    rsx! {
        h2 { class: "form-title", "Recuperar contraseña" }
        TextField {
            label: "Correo electrónico",
            kind: "email",
            value: email(),
            placeholder: "Ingresa tu correo electrónico",
            on_input: move |v| email.set(v),
        }
        div { class: "form-buttons",
            button { class: "btn btn-primary", disabled: busy(), onclick: submit, "Enviar código" }
            Link { to: Route::Login {}, class: "btn", "Cancelar" }
        }
    }
}

#[component]
pub fn VerifyCode() -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let nav = navigator();
    let mut code = use_signal(String::new);

    let submit = {
        let api = api.clone();
        move |_| {
            let api = api.clone();
            async move {
                let entered = code();
                if entered.len() != CODE_LEN {
                    feedback.error("Ingresa los 6 dígitos del código.");
                    return;
                }
                match services::auth::verify_reset_code(&api, &entered).await {
                    Ok(response) => {
                        feedback.success(message_or(&response, "Código verificado."));
                        nav.push(Route::ResetPassword { code: entered });
                    }
                    Err(e) => {
                        code.set(String::new());
                        feedback.api(&e);
                    }
                }
            }
        }
    };

    let resend = move |_| {
        let api = api.clone();
        async move {
            let Some(address) = BrowserStore::local().get(RECOVERY_EMAIL_KEY) else {
                feedback.error("No se encontró el correo en memoria.");
                return;
            };
            match services::auth::send_password_reset_email(&api, &address).await {
                Ok(_) => {
                    code.set(String::new());
                    feedback.success("Código reenviado correctamente.");
                }
                Err(e) => feedback.api(&e),
            }
        }
    };

    rsx! {
        h2 { class: "form-title", "Verificación de Código" }
        p { "Ingresa el código de 6 dígitos que enviamos a tu correo." }
        TextField {
            label: "Código",
            value: code(),
            placeholder: "123456",
            on_input: move |v: String| code.set(digits_only(&v, CODE_LEN)),
        }
        div { class: "form-buttons",
            button { class: "btn btn-primary", onclick: submit, "Verificar" }
            button { class: "btn", onclick: resend, "Reenviar código" }
        }
    }
}

/// New password form; `code` comes from the `?code=` query.
#[component]
pub fn ResetPassword(code: String) -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let mut draft = use_signal(ResetPasswordDraft::default);

    if code.is_empty() {
        return rsx! {
            p { "El enlace de recuperación no es válido." }
            Link { to: Route::SendEmail {}, class: "btn btn-primary", "Solicitar un nuevo código" }
        };
    }

    let submit = move |_| {
        let api = api.clone();
        let code = code.clone();
        async move {
            let password = match draft.read().validate() {
                Ok(password) => password,
                Err(e) => {
                    feedback.invalid(&e);
                    return;
                }
            };
            match services::auth::reset_password(&api, &code, &password).await {
                Ok(_) => {
                    BrowserStore::local().remove(RECOVERY_EMAIL_KEY);
                    feedback.success("Contraseña restablecida correctamente.");
                    feedback.navigate(&Route::Login {}.to_string());
                }
                Err(e) => feedback.api(&e),
            }
        }
    };

    let d = draft();
    rsx! {
        h2 { class: "form-title", "Restablecer Contraseña" }
        p { class: "text-muted", "Ingresa tu nueva contraseña segura." }
        PasswordField {
            label: "Nueva Contraseña",
            value: d.new_password,
            on_input: move |v: String| draft.write().new_password = clamp_len(&v, RESET_PASSWORD_MAX),
        }
        PasswordField {
            label: "Confirmar Contraseña",
            value: d.confirm_password,
            on_input: move |v: String| draft.write().confirm_password = clamp_len(&v, RESET_PASSWORD_MAX),
        }
        div { class: "form-buttons",
            button { class: "btn btn-primary", onclick: submit, "Actualizar" }
            Link { to: Route::Login {}, class: "btn", "Cancelar" }
        }
    }
}

/// Code sent to `@epn.edu.ec` addresses at registration.
#[component]
pub fn VerifyEmail() -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let mut code = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let submit = move |_| {
        let api = api.clone();
        async move {
            let entered = code();
            let parsed = (entered.len() == CODE_LEN)
                .then(|| entered.parse::<u32>().ok())
                .flatten();
            let Some(value) = parsed else {
                feedback.error("Por favor ingresa un código válido.");
                return;
            };
            busy.set(true);
            match services::auth::verify_student_email(&api, value).await {
                Ok(_) => {
                    feedback.success("✅ ¡Cuenta verificada! Iniciando sesión...");
                    feedback.navigate(&Route::Login {}.to_string());
                }
                Err(e) => feedback.api(&e),
            }
            busy.set(false);
        }
    };

    rsx! {
        h2 { class: "form-title", "Verificación Estudiantil" }
        p { "Ingresa el código que enviamos a tu correo institucional." }
        TextField {
            label: "Código de verificación",
            value: code(),
            placeholder: "123456",
            on_input: move |v: String| code.set(digits_only(&v, CODE_LEN)),
        }
        div { class: "form-buttons",
            button { class: "btn btn-primary", disabled: busy(), onclick: submit, "Verificar" }
        }
    }
}
