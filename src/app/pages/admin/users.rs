//! Account administration: roles, deletion and membership overview.

use dioxus::prelude::*;

use crate::app::api_context::use_api;
use crate::app::browser;
use crate::app::components::{ErrorAlert, Loading, Modal, SelectField};
use crate::app::feedback::use_feedback;
use crate::app::pages::format;
use crate::app::user_context::use_user;
use crate::auth::guard::LOGIN_PATH;
use crate::models::membership::MembershipState;
use crate::models::{Membership, Role, UserAccount};
use crate::services;

fn role_options() -> Vec<(String, String)> {
    [Role::Admin, Role::Normal]
        .iter()
        .map(|r| (r.as_str().to_string(), r.label().to_string()))
        .collect()
}

#[component]
pub fn UserList() -> Element {
    let api = use_api();
    let feedback = use_feedback();
    let user = use_user();
    let mut editing = use_signal(|| None::<UserAccount>);
    let mut new_role = use_signal(String::new);

    let mut users = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { services::users::fetch_users(&api).await }
        }
    });

    let delete = {
        let api = api.clone();
        move |id: i64| {
            let api = api.clone();
            spawn(async move {
                if !browser::confirm("¿Estás seguro? Se borrará de forma permanente") {
                    return;
                }
                match services::users::delete_user(&api, id).await {
                    Ok(()) => {
                        feedback.success("Usuario eliminado correctamente");
                        users.restart();
                    }
                    Err(e) => feedback.api(&e),
                }
            });
        }
    };

    let save_role = move |_| {
        let api = api.clone();
        async move {
            let Some(target) = editing() else { return };
            let Some(role) = Role::parse(&new_role.read()) else {
                feedback.error("Debe seleccionar un rol.");
                return;
            };
            match services::users::update_role(&api, target.id, role).await {
                Ok(()) => {
                    feedback.success("Rol actualizado correctamente");
                    editing.set(None);
                    let me = user.account();
                    let own_role_changed = me
                        .as_ref()
                        .is_some_and(|me| me.id == target.id && me.role != role);
                    if own_role_changed {
                        feedback.info("Tu rol ha cambiado. Cerrando sesión...");
                        user.logout(api.session());
                        feedback.navigate(LOGIN_PATH);
                        return;
                    }
                    users.restart();
                }
                Err(e) => feedback.api(&e),
            }
        }
    };

    let content = match users.read().clone() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! {
            ErrorAlert { error: e, on_retry: move |_| users.restart() }
        },
        Some(Ok(list)) => rsx! {
            table { class: "table",
                thead {
                    tr {
                        th { "Nombre" }
                        th { "Correo electrónico" }
                        th { "Teléfono" }
                        th { "Ciudad" }
                        th { "Rol" }
                        th { "Acciones" }
                    }
                }
                tbody {
                    for account in list {
                        {
                            let id = account.id;
                            let phone = account.person.as_ref().map(|p| p.phone_number.clone()).unwrap_or_default();
                            let city = account.person.as_ref().map(|p| p.city.clone()).unwrap_or_default();
                            let email = account.email.clone().unwrap_or_default();
                            let delete = delete.clone();
                            let target = account.clone();
                            rsx! {
                                tr { key: "{id}",
                                    td { "{account.display_name()}" }
                                    td { "{email}" }
                                    td { "{phone}" }
                                    td { "{city}" }
                                    td { "{account.role.label()}" }
                                    td {
                                        button {
                                            class: "btn",
                                            onclick: move |_| {
                                                new_role.set(target.role.as_str().to_string());
                                                editing.set(Some(target.clone()));
                                            },
                                            "Cambiar rol"
                                        }
                                        button { class: "btn btn-danger", onclick: move |_| delete(id), "Eliminar" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        h2 { "Lista de Usuarios" }
        {content}
        if let Some(target) = editing() {
            Modal {
                title: format!("Actualizar Rol · {}", target.display_name()),
                on_close: move |_| editing.set(None),
                SelectField {
                    label: "Rol",
                    value: new_role(),
                    options: role_options(),
                    on_change: move |v| new_role.set(v),
                }
                div { class: "form-buttons",
                    button { class: "btn btn-primary", onclick: save_role, "Guardar" }
                    button { class: "btn", onclick: move |_| editing.set(None), "Cancelar" }
                }
            }
        }
    }
}

fn status_label(membership: &Membership) -> String {
    match membership.state() {
        MembershipState::Active => "Activa".to_string(),
        MembershipState::Pending => "Pendiente".to_string(),
        MembershipState::Inactive => "Inactiva".to_string(),
        MembershipState::Other => membership.status.clone(),
    }
}

/// Members with their membership details.
#[component]
pub fn MemberList() -> Element {
    let api = use_api();
    let mut filter = use_signal(String::new);

    let mut users = use_resource(move || {
        let api = api.clone();
        async move { services::users::fetch_users(&api).await }
    });

    let today = chrono::Local::now().date_naive();
    let content = match users.read().clone() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! {
            ErrorAlert { error: e, on_retry: move |_| users.restart() }
        },
        Some(Ok(list)) => {
            let wanted = filter();
            let members: Vec<(UserAccount, Membership)> = list
                .into_iter()
                .filter_map(|u| u.membership.clone().map(|m| (u, m)))
                .filter(|(_, m)| wanted.is_empty() || m.status.eq_ignore_ascii_case(&wanted))
                .collect();
            rsx! {
                if members.is_empty() {
                    p { class: "text-muted", "No hay miembros registrados." }
                }
                table { class: "table",
                    thead {
                        tr {
                            th { "Nombre" }
                            th { "Correo electrónico" }
                            th { "Tipo" }
                            th { "Nivel" }
                            th { "Inicio" }
                            th { "Fin" }
                            th { "Días restantes" }
                            th { "Estado" }
                        }
                    }
                    tbody {
                        for (account, membership) in members {
                            tr { key: "{account.id}",
                                td { "{account.display_name()}" }
                                td { {account.email.clone().unwrap_or_default()} }
                                td { "{membership.type_label()}" }
                                td { {membership.participation_level.clone().unwrap_or_default()} }
                                td { {membership.start_date.map(format::long_date).unwrap_or_default()} }
                                td { {membership.end_date.map(format::long_date).unwrap_or_default()} }
                                td {
                                    {membership.days_remaining(today).map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())}
                                }
                                td { "{status_label(&membership)}" }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        h2 { "Lista de Miembros" }
        div { class: "filters",
            select {
                value: "{filter}",
                onchange: move |e| filter.set(e.value()),
                option { value: "", "Todos" }
                option { value: "ACTIVE", "Activas" }
                option { value: "PENDING", "Pendientes" }
                option { value: "INACTIVE", "Inactivas" }
            }
        }
        {content}
    }
}
