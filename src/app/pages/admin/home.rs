use dioxus::prelude::*;

use crate::app::pages::profile::EditProfile;
use crate::app::user_context::use_user;
use crate::auth::permissions::{self, Category};
use crate::models::Role;

#[component]
pub fn AdminWelcome() -> Element {
    let user = use_user();
    let name = user.display_name();

    rsx! {
        h2 { class: "dashboard-title", "Bienvenido al panel de administración" }
        if !name.is_empty() {
            p { "Hola, {name}. Elige una sección para comenzar." }
        }
        div { class: "grid",
            for category in permissions::categories(Role::Admin).into_iter().filter(|c| *c != Category::Personal) {
                div { key: "{category.label()}", class: "card",
                    h3 { "{category.label()}" }
                    ul {
                        for link in permissions::links_in(Role::Admin, category) {
                            li { key: "{link.path}",
                                Link { to: link.href(Role::Admin), "{link.label}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn AdminEditProfile() -> Element {
    rsx! {
        EditProfile { home: Role::Admin.home_path() }
    }
}
