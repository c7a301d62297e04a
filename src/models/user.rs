use serde::{Deserialize, Serialize};

use super::membership::Membership;

/// Account role as the backend spells it (`"Admin"`, `"Normal"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Normal,
}

impl Role {
    /// Lower-case form used by the route guard and the sidebar table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Normal => "normal",
        }
    }

    /// Case-insensitive parse of a token claim or select value.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "normal" => Some(Role::Normal),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Normal => "Miembro",
        }
    }

    /// Landing page after login.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Normal => "/user",
        }
    }
}

pub const BLOOD_TYPES: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];
pub const SKILL_LEVELS: &[&str] = &["Bajo", "Medio", "Alto"];

/// Personal data attached to an account.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Persona {
    #[serde(default)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub city: String,
    pub neighborhood: String,
    pub blood_type: String,
    pub skill_level: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl Persona {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Partial update for `PUT /auth/update/basic_information/{id}`.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct PersonaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// Body of `POST /auth/register`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub persona: Persona,
}

/// Row of `GET /auth/users`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserAccount {
    pub id: i64,
    pub role: Role,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub person: Option<Persona>,
    #[serde(default)]
    pub membership: Option<Membership>,
}

impl UserAccount {
    pub fn display_name(&self) -> String {
        self.person
            .as_ref()
            .map(Persona::full_name)
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| format!("Usuario #{}", self.id))
    }
}

/// Response of `POST /auth/token`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}
