//! Role-gated dashboard layouts for `/admin/*` and `/user/*`.
//!
//! The guard runs on every navigation inside the subtree. A denied visit
//! renders nothing and replaces the location; the toast goes through the
//! process-wide latch so a redirect chain shows it once.

use dioxus::prelude::*;

use crate::app::api_context::use_api;
use crate::app::feedback::use_feedback;
use crate::app::sidebar_context::use_sidebar;
use crate::app::storage_sync::use_notification_sync;
use crate::app::toast::use_toast;
use crate::app::user_context::use_user;
use crate::app::Route;
use crate::auth::guard::{self, GuardDecision, LoginReason, GUARD_TOAST};
use crate::auth::now_timestamp;
use crate::models::Role;
use crate::services;

use super::sidebar::Sidebar;

#[component]
pub fn AdminShell() -> Element {
    rsx! {
        GuardedShell { role: Role::Admin }
    }
}

#[component]
pub fn UserShell() -> Element {
    rsx! {
        GuardedShell { role: Role::Normal }
    }
}

#[component]
fn GuardedShell(role: Role) -> Element {
    // Re-render (and re-check) on every route change below this layout
    let _route = use_route::<Route>();
    let api = use_api();

    let outcome = guard::check(api.session(), &[role], now_timestamp(), &GUARD_TOAST);
    match outcome.decision {
        GuardDecision::Allow => rsx! {
            DashboardFrame { role }
        },
        decision => rsx! {
            GuardRedirect {
                to: decision.redirect_path().unwrap_or(guard::LOGIN_PATH),
                message: outcome.toast,
                expired: decision == GuardDecision::RedirectLogin(LoginReason::Expired),
            }
        },
    }
}

#[component]
fn GuardRedirect(to: &'static str, message: Option<&'static str>, expired: bool) -> Element {
    let toast = use_toast();
    let user = use_user();
    let nav = navigator();

    use_effect(move || {
        if let Some(message) = message {
            toast.clear();
            if expired {
                toast.info(message);
            } else {
                toast.error(message);
            }
        }
        if to == guard::LOGIN_PATH {
            user.set(None);
        }
        nav.replace(to);
    });

    rsx! {}
}

#[component]
fn DashboardFrame(role: Role) -> Element {
    let sidebar = use_sidebar();
    let container_class = if sidebar.is_collapsed() {
        "main-container expanded"
    } else {
        "main-container"
    };

    rsx! {
        div { class: "dashboard-layout",
            Sidebar { role }
            div { class: container_class,
                DashboardHeader { role }
                main { class: "main-content",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
fn DashboardHeader(role: Role) -> Element {
    let sidebar = use_sidebar();
    let user = use_user();
    let api = use_api();
    let feedback = use_feedback();
    let name = user.display_name();

    let logout = {
        let api = api.clone();
        move |_| {
            services::auth::logout(&api);
            user.set(None);
            feedback.info("Sesión cerrada");
            feedback.navigate(guard::LOGIN_PATH);
        }
    };

    rsx! {
        header { class: "dashboard-header",
            button {
                class: "btn",
                "aria-label": "Mostrar u ocultar menú",
                onclick: move |_| sidebar.toggle_collapsed(),
                "☰"
            }
            div { style: "display:flex;align-items:center;gap:1rem;",
                if role == Role::Normal {
                    NotificationBell {}
                }
                span { "Hola, {name}" }
                button { class: "btn btn-danger", onclick: logout, "Cerrar sesión" }
            }
        }
    }
}

/// Unread badge; refreshes on mount and whenever another tab marks or
/// dismisses a notification.
#[component]
fn NotificationBell() -> Element {
    let api = use_api();
    let sync = use_notification_sync();

    let unread = use_resource(move || {
        let api = api.clone();
        let _ = sync();
        async move {
            services::notifications::fetch_notifications(&api)
                .await
                .map(|list| crate::notifications::unread_count(&list))
                .unwrap_or(0)
        }
    });
    let count = unread.read().as_ref().copied().unwrap_or(0);

    rsx! {
        Link { to: Route::Notifications {}, class: "bell",
            "🔔"
            if count > 0 {
                span { class: "count", "{count}" }
            }
        }
    }
}
