//! Errors surfaced by backend calls.
//!
//! `Display` is what the UI shows in its toast, so variants carry the
//! backend's own `detail` text whenever it sends one.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never produced a response (offline, CORS, DNS).
    #[error("No se pudo conectar con el servidor: {0}")]
    Network(String),

    /// Non-2xx response with the backend's message.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// 401 from the backend; the stored token is no longer accepted.
    #[error("Tu sesión ha expirado.")]
    Unauthorized,

    #[error("No encontrado")]
    NotFound,

    /// 2xx response whose body did not match the expected shape.
    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),

    /// Authorized call attempted without a session token.
    #[error("Debes iniciar sesión.")]
    NotAuthenticated,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            ApiError::NotFound => Some(404),
            _ => None,
        }
    }

    /// True when the UI should drop the session and go to `/login`.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::NotAuthenticated)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_displays_backend_message() {
        let err = ApiError::Server {
            status: 400,
            message: "El correo ya está registrado".to_string(),
        };
        assert_eq!(err.to_string(), "El correo ya está registrado");
        assert_eq!(err.status(), Some(400));
        assert!(!err.requires_login());
    }

    #[test]
    fn unauthorized_requires_login() {
        assert!(ApiError::Unauthorized.requires_login());
        assert!(ApiError::NotAuthenticated.requires_login());
        assert!(!ApiError::NotFound.requires_login());
    }
}
