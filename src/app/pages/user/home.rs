use dioxus::prelude::*;

use crate::app::pages::profile::EditProfile;
use crate::app::user_context::use_user;
use crate::auth::permissions::{self, Category};
use crate::models::Role;

#[component]
pub fn UserWelcome() -> Element {
    let user = use_user();
    let name = user.display_name();

    rsx! {
        h2 { class: "dashboard-title", "¡Bienvenido al Club de Ciclismo EPN!" }
        if !name.is_empty() {
            p { "Hola, {name}. ¿Listo para rodar?" }
        }
        div { class: "grid",
            for category in permissions::categories(Role::Normal).into_iter().filter(|c| *c != Category::Personal) {
                div { key: "{category.label()}", class: "card",
                    h3 { "{category.label()}" }
                    ul {
                        for link in permissions::links_in(Role::Normal, category) {
                            li { key: "{link.path}",
                                Link { to: link.href(Role::Normal), "{link.label}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn UserEditProfile() -> Element {
    rsx! {
        EditProfile { home: Role::Normal.home_path() }
    }
}
