//! Registration, login and password recovery.

use serde::Serialize;

use super::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{MessageResponse, RegisterRequest, TokenResponse};

pub async fn register(api: &ApiClient, request: &RegisterRequest) -> ApiResult<()> {
    api.post("auth/register", "Error en el registro")
        .json(request)?
        .execute()
        .await
}

/// Exchange credentials for a token and keep it in the session.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> ApiResult<TokenResponse> {
    let token: TokenResponse = api
        .post("auth/token", "Error al iniciar sesión")
        .form(vec![
            ("username".to_string(), email.to_string()),
            ("password".to_string(), password.to_string()),
        ])
        .fetch()
        .await?;
    api.session().set_token(&token.access_token);
    tracing::info!("Logged in as {}", email);
    Ok(token)
}

pub fn logout(api: &ApiClient) {
    api.session().clear();
}

pub async fn send_password_reset_email(api: &ApiClient, email: &str) -> ApiResult<MessageResponse> {
    let result = api
        .post("auth/reset_password/send", "Error al enviar el código.")
        .form(vec![("email".to_string(), email.to_string())])
        .fetch()
        .await;
    // pydantic's email validation message is not meant for users
    match result {
        Err(ApiError::Server { status, message }) if message.to_lowercase().contains("email") => {
            Err(ApiError::Server {
                status,
                message: "Correo electrónico no válido.".to_string(),
            })
        }
        other => other,
    }
}

pub async fn verify_reset_code(api: &ApiClient, code: &str) -> ApiResult<MessageResponse> {
    api.post("auth/reset_password/verify", "Error al verificar el código.")
        .query(&[("code", code.to_string())])
        .fetch()
        .await
}

pub async fn reset_password(
    api: &ApiClient,
    code: &str,
    new_password: &str,
) -> ApiResult<MessageResponse> {
    api.post("auth/reset_password/reset", "Error al restablecer la contraseña.")
        .query(&[
            ("code", code.to_string()),
            ("new_password", new_password.to_string()),
        ])
        .fetch()
        .await
}

#[derive(Serialize)]
struct VerifyEmail {
    code: u32,
}

/// Confirm an `@epn.edu.ec` address with the code mailed at registration.
pub async fn verify_student_email(api: &ApiClient, code: u32) -> ApiResult<MessageResponse> {
    api.post("auth/verify-email", "Código incorrecto.")
        .json(&VerifyEmail { code })?
        .fetch()
        .await
}
