use dioxus::prelude::*;

use crate::app::api_context::use_api;
use crate::app::components::{PasswordField, SelectField, TextField, plain_options};
use crate::app::feedback::use_feedback;
use crate::app::user_context::use_user;
use crate::app::Route;
use crate::auth::guard::GUARD_TOAST;
use crate::models::user::{BLOOD_TYPES, SKILL_LEVELS};
use crate::services;
use crate::validation::{digits_only, is_epn_email, LoginDraft, RegisterDraft, PHONE_MAX};

#[component]
pub fn Login() -> Element {
    let api = use_api();
    let user = use_user();
    let feedback = use_feedback();
    let mut draft = use_signal(LoginDraft::default);
    let mut busy = use_signal(|| false);

    // A later denied visit should toast again
    use_hook(|| GUARD_TOAST.rearm());

    let submit = move |_| {
        let api = api.clone();
        async move {
            let (email, password) = match draft.read().validate() {
                Ok(credentials) => credentials,
                Err(_) => {
                    feedback.error("Todos los campos son obligatorios");
                    return;
                }
            };
            busy.set(true);
            if let Err(e) = services::auth::login(&api, &email, &password).await {
                busy.set(false);
                feedback.api(&e);
                return;
            }
            match services::users::fetch_my_profile(&api).await {
                Ok(account) => {
                    let home = account.role.home_path();
                    user.set(Some(account));
                    feedback.success("Inicio de sesión exitoso");
                    feedback.navigate(home);
                }
                Err(e) => {
                    tracing::error!("Profile after login failed: {}", e);
                    services::auth::logout(&api);
                    feedback.error("Tu cuenta no tiene un rol válido.");
                }
            }
            busy.set(false);
        }
    };

    let d = draft();
    rsx! {
        h2 { class: "form-title", "Iniciar sesión" }
        TextField {
            label: "Correo electrónico",
            kind: "email",
            value: d.email,
            placeholder: "Ingresa tu correo electrónico",
            on_input: move |v| draft.write().email = v,
        }
        PasswordField {
            label: "Contraseña",
            value: d.password,
            placeholder: "Ingresa tu contraseña",
            on_input: move |v| draft.write().password = v,
        }
        Link { to: Route::SendEmail {}, class: "btn btn-link", "¿Olvidaste tu contraseña?" }
        div { class: "form-buttons",
            button { class: "btn btn-primary", disabled: busy(), onclick: submit, "Ingresar" }
            Link { to: Route::Register {}, class: "btn", "Registrarse" }
        }
    }
}

#[component]
pub fn Register() -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let mut draft = use_signal(RegisterDraft::default);
    let mut busy = use_signal(|| false);

    let submit = move |_| {
        let api = api.clone();
        async move {
            let request = match draft.read().validate() {
                Ok(request) => request,
                Err(e) => {
                    feedback.invalid(&e);
                    return;
                }
            };
            let student = is_epn_email(&request.email);
            busy.set(true);
            feedback.info("Registrando usuario...");
            match services::auth::register(&api, &request).await {
                Ok(()) => {
                    draft.set(RegisterDraft::default());
                    if student {
                        feedback.success("¡Registro exitoso! Procesando...");
                        feedback.info("Por favor ingresa el código enviado a tu correo.");
                        feedback.navigate(&Route::VerifyEmail {}.to_string());
                    } else {
                        feedback.success("Usuario registrado correctamente.");
                        feedback.navigate(&Route::Login {}.to_string());
                    }
                }
                Err(e) => feedback.api(&e),
            }
            busy.set(false);
        }
    };

    let d = draft();
    let student = is_epn_email(&d.email);
    rsx! {
        h2 { class: "form-title", "Regístrate" }
        div { class: "form-grid",
            TextField {
                label: "Nombre",
                value: d.first_name,
                placeholder: "Ingrese su nombre",
                on_input: move |v| draft.write().first_name = v,
            }
            TextField {
                label: "Apellido",
                value: d.last_name,
                placeholder: "Ingrese su apellido",
                on_input: move |v| draft.write().last_name = v,
            }
            TextField {
                label: "Correo",
                kind: "email",
                value: d.email,
                placeholder: "Ingrese su correo electrónico",
                on_input: move |v| draft.write().email = v,
            }
            PasswordField {
                label: "Contraseña",
                value: d.password,
                placeholder: "Ingrese su contraseña",
                on_input: move |v| draft.write().password = v,
            }
            TextField {
                label: "Número telefónico",
                kind: "tel",
                value: d.phone_number,
                placeholder: "Ingrese su número",
                on_input: move |v: String| draft.write().phone_number = digits_only(&v, PHONE_MAX),
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
            SelectField {
                label: "Tipo de sangre",
                value: d.blood_type,
                options: plain_options(BLOOD_TYPES),
                on_change: move |v| draft.write().blood_type = v,
            }
            SelectField {
                label: "Nivel de habilidad",
                value: d.skill_level,
                options: plain_options(SKILL_LEVELS),
                on_change: move |v| draft.write().skill_level = v,
            }
        }
        if student {
            small { class: "text-muted", "Recibirás un código en tu correo institucional para verificar tu cuenta." }
        }
        div { class: "form-buttons",
            button { class: "btn btn-primary", disabled: busy(), onclick: submit, "Registrarse" }
            Link { to: Route::Login {}, class: "btn", "Ya tengo cuenta" }
        }
    }
}

#[component]
pub fn Unauthorized() -> Element {
    let api = use_api();
    let user = use_user();
    let nav = navigator();

    rsx! {
        h2 { "¡Lo sentimos!" }
        p { "No tienes autorización para acceder a esta sección." }
        button {
            class: "btn btn-danger",
            onclick: move |_| {
                user.logout(api.session());
                nav.push(Route::Login {});
            },
            "Cerrar sesión"
        }
    }
}
