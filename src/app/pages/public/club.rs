//! Static club pages and the sponsorship contact form.

use dioxus::prelude::*;

use crate::app::api_context::use_api;
use crate::app::components::{TextArea, TextField};
use crate::app::feedback::use_feedback;
use crate::app::Route;
use crate::services;
use crate::validation::{digits_only, SponsorDraft, PHONE_MAX};

const ACHIEVEMENTS: &[&str] = &[
    "Giro d'Italia Ride Like a Pro, Ecuador - I Edición",
    "Giro d'Italia Ride Like a Pro, Ecuador - II Edición",
    "Ruta del Plátano, Ecuador - XII Edición",
    "Ruta de la Selva, Misahualli - V Edición",
    "La Terca, El Carmen-Manabí - X Edición",
    "SW de Ambato - VII Edición",
    "Crono Escalada al Guagua Pichincha, Ecuador",
    "Chimborazo Extremo, Ecuador - XX Edición",
    "Crono Escalada Pedregal - Machachi, Ecuador",
];

#[component]
pub fn AboutUs() -> Element {
    rsx! {
        h1 { "¿Quiénes Somos?" }
        div { class: "grid",
            div { class: "card",
                h2 { "Misión" }
                p {
                    "Promover y ofrecer práctica formativa, competitiva y recreativa de ciclismo de montaña "
                    "con los máximos criterios de seguridad y calidad, contribuyendo a una sociedad más activa "
                    "y comprometida con la comunidad."
                }
            }
            div { class: "card",
                h2 { "Visión" }
                p {
                    "Ser el club de ciclismo de montaña y ruta referente de la Escuela Politécnica Nacional, "
                    "integrando a estudiantes, exestudiantes y profesores mediante actividades seguras y de "
                    "calidad que promuevan el deporte, la formación integral y el sentido de comunidad universitaria."
                }
            }
        }
        div { class: "card",
            h2 { "Nuestra Historia" }
            p {
                "Lo que comenzó como un grupo de amigos y profesores que compartían su pasión por el ciclismo "
                "en la EPN tomó forma en febrero de 2022, cuando nació oficialmente el Club de Ciclismo."
            }
        }
        h2 { "Nuestros logros" }
        ul {
            for achievement in ACHIEVEMENTS {
                li { key: "{achievement}", "{achievement}" }
            }
        }
    }
}

#[component]
pub fn Sponsors() -> Element {
    rsx! {
        h1 { "¡ AUSPICIANOS !" }
        p {
            "¡Pedaleamos con propósito, y tú puedes ser parte de esta ruta! Al auspiciar nuestro club, "
            "tu empresa o institución apoya el deporte universitario y se alinea con valores que "
            "transforman vidas."
        }
        div { class: "card",
            h2 { "¿Por qué auspiciarnos?" }
            ul {
                li {
                    strong { "Visibilidad de marca: " }
                    "tu logo en nuestras camisetas, redes sociales, eventos y competencias."
                }
                li {
                    strong { "Alianza con una institución de prestigio: " }
                    "la EPN es reconocida por su excelencia académica y compromiso social."
                }
                li {
                    strong { "Responsabilidad social: " }
                    "apoyar el deporte es apoyar la salud física y mental de los jóvenes."
                }
                li {
                    strong { "Proyección nacional: " }
                    "acompáñanos en competencias a lo largo del país."
                }
            }
            Link { to: Route::Contact {}, class: "btn btn-primary", "Quiero auspiciar" }
        }
    }
}

/// Sponsorship proposal form posted to the backend.
#[component]
pub fn Contact() -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let mut draft = use_signal(SponsorDraft::default);
    let mut sending = use_signal(|| false);

    let submit = move |_| {
        let api = api.clone();
        async move {
            let application = match draft.read().validate() {
                Ok(application) => application,
                Err(e) => {
                    feedback.invalid(&e);
                    return;
                }
            };
            sending.set(true);
            feedback.info("Enviando tu propuesta...");
            match services::sponsors::apply(&api, &application).await {
                Ok(_) => {
                    feedback.success(
                        "🎉 ¡Propuesta Enviada! Hemos recibido tu solicitud. Nos pondremos en contacto pronto.",
                    );
                    draft.set(SponsorDraft::default());
                }
                Err(e) => feedback.api(&e),
            }
            sending.set(false);
        }
    };

    let d = draft();
    rsx! {
        h1 { "Sé parte de nuestra ruta" }
        p {
            "No buscamos solo fondos, buscamos socios estratégicos que crean en el poder del deporte. "
            "Completa el formulario y conversemos sobre la ruta ideal para tu patrocinio."
        }
        div { class: "card",
            div { class: "form-grid",
                TextField {
                    label: "Nombre de la empresa / marca *",
                    value: d.company_name,
                    placeholder: "Ingresa el nombre de la marca o empresa",
                    disabled: sending(),
                    on_input: move |v| draft.write().company_name = v,
                }
                TextField {
                    label: "Nombre del contacto *",
                    value: d.contact_name,
                    placeholder: "Ingresa el nombre del contacto",
                    disabled: sending(),
                    on_input: move |v| draft.write().contact_name = v,
                }
                TextField {
                    label: "Cargo *",
                    value: d.position,
                    placeholder: "Ingresa el cargo",
                    disabled: sending(),
                    on_input: move |v| draft.write().position = v,
                }
                TextField {
                    label: "Correo electrónico *",
                    kind: "email",
                    value: d.contact_email,
                    placeholder: "Ingresa el correo electrónico",
                    disabled: sending(),
                    on_input: move |v| draft.write().contact_email = v,
                }
                TextField {
                    label: "Teléfono *",
                    kind: "tel",
                    value: d.contact_phone,
                    placeholder: "Ingresa un teléfono de contacto",
                    disabled: sending(),
                    on_input: move |v: String| draft.write().contact_phone = digits_only(&v, PHONE_MAX),
                }
            }
            TextArea {
                label: "Descripción de la propuesta *",
                value: d.proposal_description,
                placeholder: "Ingresa la descripción de la propuesta",
                on_input: move |v| draft.write().proposal_description = v,
            }
            button {
                class: "btn btn-primary",
                disabled: sending(),
                onclick: submit,
                if sending() { "Enviando..." } else { "Enviar propuesta" }
            }
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    tracing::debug!("No route for /{}", path);

    rsx! {
        div { class: "card",
            h1 { "404" }
            p { "La página /{path} no existe." }
            Link { to: Route::Home {}, class: "btn btn-primary", "Volver al inicio" }
        }
    }
}
