//! Account administration and the signed-in user's profile.

use serde::Serialize;

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::{PersonaUpdate, Role, UserAccount};

pub async fn fetch_users(api: &ApiClient) -> ApiResult<Vec<UserAccount>> {
    api.get("auth/users", "Error al obtener usuarios")
        .authorized()
        .fetch()
        .await
}

pub async fn delete_user(api: &ApiClient, user_id: i64) -> ApiResult<()> {
    api.delete(&format!("auth/delete/{}", user_id), "Error al eliminar usuario")
        .authorized()
        .execute()
        .await
}

#[derive(Serialize)]
struct RoleUpdate {
    role: Role,
}

pub async fn update_role(api: &ApiClient, user_id: i64, role: Role) -> ApiResult<()> {
    api.put(
        &format!("auth/update/role/{}", user_id),
        "Error al actualizar el rol",
    )
    .authorized()
    .json(&RoleUpdate { role })?
    .execute()
    .await
}

pub async fn update_persona(
    api: &ApiClient,
    persona_id: i64,
    update: &PersonaUpdate,
) -> ApiResult<()> {
    api.put(
        &format!("auth/update/basic_information/{}", persona_id),
        "Error al actualizar la información",
    )
    .authorized()
    .json(update)?
    .execute()
    .await
}

pub async fn fetch_my_profile(api: &ApiClient) -> ApiResult<UserAccount> {
    api.get("auth/my_profile", "Error al obtener perfil del usuario")
        .authorized()
        .fetch()
        .await
}
