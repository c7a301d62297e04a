//! Navigation bar of the public site.

use dioxus::prelude::*;

use crate::app::api_context::use_api;
use crate::app::cart_context::use_cart;
use crate::app::user_context::use_user;
use crate::app::Route;
use crate::auth::now_timestamp;

#[component]
pub fn PublicNav() -> Element {
    let cart = use_cart();
    let user = use_user();
    let api = use_api();
    let count = cart.count();

    // Signed-in visitors get a shortcut back to their dashboard
    let dashboard = user
        .role()
        .or_else(|| {
            let session = api.session();
            session
                .is_authenticated(now_timestamp())
                .then(|| session.role())
                .flatten()
        })
        .map(|role| role.home_path());

    rsx! {
        header { class: "public-header",
            Link { to: Route::Home {}, strong { "Club de Ciclismo EPN" } }
            nav {
                Link { to: Route::Home {}, "Inicio" }
                Link { to: Route::AboutUs {}, "Quiénes somos" }
                Link { to: Route::PublicEvents {}, "Eventos" }
                Link { to: Route::Products {}, "Productos" }
                Link { to: Route::Sponsors {}, "Auspiciantes" }
                Link { to: Route::Contact {}, "Contacto" }
            }
            div {
                Link { to: Route::CartPage {}, class: "cart-link",
                    "🛒"
                    if count > 0 {
                        span { class: "cart-badge", "{count}" }
                    }
                }
                match dashboard {
                    Some(path) => rsx! { Link { to: path, "Mi panel" } },
                    None => rsx! { Link { to: Route::Login {}, "Iniciar sesión" } },
                }
            }
        }
    }
}
