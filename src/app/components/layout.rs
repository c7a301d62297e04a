//! Layouts for the public site and the auth screens.

use dioxus::prelude::*;

use super::nav::PublicNav;
use crate::app::Route;

/// Public marketing pages: header with cart badge, content, footer.
#[component]
pub fn PublicLayout() -> Element {
    rsx! {
        PublicNav {}
        main { class: "public-main",
            Outlet::<Route> {}
        }
        Footer {}
    }
}

/// Centered card over the brand gradient (login, register, password reset).
#[component]
pub fn AuthLayout() -> Element {
    rsx! {
        div { class: "auth-layout",
            div { class: "card",
                Link { to: Route::Home {}, class: "btn-link", "← Volver al inicio" }
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
pub fn Footer() -> Element {
    let version = env!("CLUB_VERSION");
    let git_sha = env!("CLUB_GIT_SHA");

    rsx! {
        footer { class: "public-footer",
            p { "Club de Ciclismo EPN · Escuela Politécnica Nacional, Quito" }
            small { class: "text-muted", "v{version} ({git_sha})" }
        }
    }
}
