//! Client-side form checks and input sanitization.
//!
//! Each draft mirrors one form as the user typed it (all strings) and
//! `validate` turns it into the payload the backend expects. The error's
//! `Display` text is shown to the user as-is.

use std::str::FromStr;
use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::event::parse_event_datetime;
use crate::models::{
    AssetState, Document, DocumentForm, DocumentType, Event, EventPayload, MembershipForm, Persona,
    PersonaUpdate, RegisterRequest, Resource, ResourceBase, ResourcePayload, Role, RoutePayload,
    SponsorApplication, TransactionForm, TransactionKind,
};
use crate::services::UploadFile;

pub const NAME_MAX: usize = 50;
pub const EMAIL_MAX: usize = 100;
pub const PASSWORD_MAX: usize = 128;
/// The reset form caps its inputs.
pub const RESET_PASSWORD_MAX: usize = 50;
pub const PHONE_MAX: usize = 10;
pub const OBSERVATION_MAX: usize = 500;
pub const DESCRIPTION_MIN: usize = 10;

pub const EVENT_IMAGE_MAX_BYTES: u64 = 2 * 1024 * 1024;
pub const PROFILE_PICTURE_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub const DOCUMENT_MAX_BYTES: u64 = 50 * 1024 * 1024;
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "odt"];

/// Institutional domain; these accounts verify their student email.
pub const EPN_DOMAIN: &str = "@epn.edu.ec";

const PASSWORD_SPECIALS: &str = "@$!%*?&";
const RESET_PASSWORD_SPECIALS: &str = "!@#$%^&*.,+";

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());
static PHONE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\d{7,10}$").ok());
static EMERGENCY_PHONE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^09\d{8}$").ok());
static CONTACT_NAME_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑüÜ\s]+$").ok());
static ASSET_CODE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9-]+$").ok());

fn is_match(re: &LazyLock<Option<Regex>>, s: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(s))
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Todos los campos marcados con * son obligatorios.")]
    MissingFields,
    #[error("Debe seleccionar {0}.")]
    NotSelected(&'static str),
    #[error("El correo electrónico no es válido.")]
    InvalidEmail,
    #[error("La contraseña debe tener al menos 8 caracteres, una mayúscula, un número y un carácter especial (@$!%*?&).")]
    WeakPassword,
    #[error("La contraseña debe tener al menos 8 caracteres, una mayúscula, un número y un carácter especial.")]
    WeakResetPassword,
    #[error("Las contraseñas no coinciden.")]
    PasswordMismatch,
    #[error("Número de teléfono inválido (7-10 dígitos).")]
    InvalidPhone,
    #[error("El teléfono de emergencia debe tener el formato 09XXXXXXXX.")]
    InvalidEmergencyPhone,
    #[error("El contacto de emergencia solo admite letras y debe tener al menos 3 caracteres.")]
    InvalidContactName,
    #[error("El código del activo solo puede contener letras, números y guiones.")]
    InvalidAssetCode,
    #[error("La {0} no puede ser futura.")]
    FutureDate(&'static str),
    #[error("La fecha del evento no puede ser anterior a la actual.")]
    PastEventDate,
    #[error("La {0} no es una fecha válida.")]
    InvalidDate(&'static str),
    #[error("{field} debe tener al menos {min} caracteres.")]
    TooShort { field: &'static str, min: usize },
    #[error("{field} no puede exceder los {max} caracteres.")]
    TooLong { field: &'static str, max: usize },
    #[error("{0} debe ser un número válido.")]
    InvalidNumber(&'static str),
    #[error("{0} debe ser mayor a 0.")]
    NotPositive(&'static str),
    #[error("{0} no puede ser negativo.")]
    Negative(&'static str),
    #[error("Tipo de archivo no permitido. Formatos aceptados: .pdf, .doc, .docx, .txt, .odt")]
    UnsupportedFileType,
    #[error("El archivo es demasiado grande. Máximo {0}MB")]
    FileTooLarge(u64),
    #[error("Debe seleccionar un archivo.")]
    MissingFile,
}

// ============ Sanitizers ============

/// Strip characters that could smuggle markup into stored text.
pub fn sanitize_input(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '<' | '>' | '&' | '"' | '\'' | '/' | '`'))
        .collect()
}

/// Free-text notes keep backticks but drop markup characters.
pub fn sanitize_notes(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '<' | '>' | '&' | '"' | '\'' | '/'))
        .collect()
}

/// Keep at most `max` characters.
pub fn clamp_len(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Phone inputs: digits only, at most `max` of them.
pub fn digits_only(s: &str, max: usize) -> String {
    s.chars().filter(char::is_ascii_digit).take(max).collect()
}

// ============ Field predicates ============

pub fn is_valid_email(s: &str) -> bool {
    is_match(&EMAIL_RE, s)
}

pub fn is_epn_email(s: &str) -> bool {
    s.trim().to_lowercase().ends_with(EPN_DOMAIN)
}

/// At least 8 characters from `[A-Za-z0-9@$!%*?&]` with an uppercase
/// letter, a digit and one of `@$!%*?&`.
pub fn is_strong_password(s: &str) -> bool {
    s.chars().count() >= 8
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c))
        && s.chars().any(|c| c.is_ascii_uppercase())
        && s.chars().any(|c| c.is_ascii_digit())
        && s.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Rule of the password reset form: any characters, at least 8 of them,
/// with an uppercase letter, a digit and one of `!@#$%^&*.,+`.
pub fn is_valid_reset_password(s: &str) -> bool {
    s.chars().count() >= 8
        && !s.contains(['\n', '\r'])
        && s.chars().any(|c| c.is_ascii_uppercase())
        && s.chars().any(|c| c.is_ascii_digit())
        && s.chars().any(|c| RESET_PASSWORD_SPECIALS.contains(c))
}

pub fn is_valid_phone(s: &str) -> bool {
    is_match(&PHONE_RE, s)
}

pub fn is_valid_emergency_phone(s: &str) -> bool {
    is_match(&EMERGENCY_PHONE_RE, s)
}

pub fn is_valid_contact_name(s: &str) -> bool {
    s.trim().chars().count() >= 3 && is_match(&CONTACT_NAME_RE, s)
}

pub fn is_valid_asset_code(s: &str) -> bool {
    is_match(&ASSET_CODE_RE, s)
}

fn required(values: &[&str]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

fn parse_date(s: &str, field: &'static str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate(field))
}

fn not_future(date: NaiveDate, today: NaiveDate, field: &'static str) -> Result<(), ValidationError> {
    if date > today {
        return Err(ValidationError::FutureDate(field));
    }
    Ok(())
}

fn parse_decimal(s: &str, field: &'static str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(s.trim().replace(',', ".").as_str())
        .map_err(|_| ValidationError::InvalidNumber(field))
}

fn min_description(s: &str) -> Result<(), ValidationError> {
    if s.trim().chars().count() < DESCRIPTION_MIN {
        return Err(ValidationError::TooShort {
            field: "La descripción",
            min: DESCRIPTION_MIN,
        });
    }
    Ok(())
}

fn optional(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

// ============ Auth forms ============

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

impl LoginDraft {
    /// `(username, password)` for the token endpoint.
    pub fn validate(&self) -> Result<(String, String), ValidationError> {
        required(&[&self.email, &self.password])?;
        Ok((self.email.trim().to_string(), self.password.clone()))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub city: String,
    pub neighborhood: String,
    pub blood_type: String,
    pub skill_level: String,
}

impl RegisterDraft {
    pub fn validate(&self) -> Result<RegisterRequest, ValidationError> {
        let first_name = clamp_len(&sanitize_input(self.first_name.trim()), NAME_MAX);
        let last_name = clamp_len(&sanitize_input(self.last_name.trim()), NAME_MAX);
        let email = clamp_len(self.email.trim(), EMAIL_MAX);
        let city = sanitize_input(self.city.trim());
        let neighborhood = sanitize_input(self.neighborhood.trim());
        let phone = digits_only(&self.phone_number, PHONE_MAX);

        required(&[&first_name, &last_name, &email, &self.password, &city, &neighborhood])?;
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.chars().count() > PASSWORD_MAX || !is_strong_password(&self.password) {
            return Err(ValidationError::WeakPassword);
        }
        if !is_valid_phone(&phone) {
            return Err(ValidationError::InvalidPhone);
        }
        if self.blood_type.is_empty() {
            return Err(ValidationError::NotSelected("un tipo de sangre"));
        }
        if self.skill_level.is_empty() {
            return Err(ValidationError::NotSelected("un nivel de habilidad"));
        }

        Ok(RegisterRequest {
            email,
            password: self.password.clone(),
            role: Role::Normal,
            persona: Persona {
                id: 0,
                first_name,
                last_name,
                phone_number: phone,
                city,
                neighborhood,
                blood_type: self.blood_type.clone(),
                skill_level: self.skill_level.clone(),
                profile_picture: None,
            },
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResetPasswordDraft {
    pub new_password: String,
    pub confirm_password: String,
}

impl ResetPasswordDraft {
    pub fn validate(&self) -> Result<String, ValidationError> {
        let new_password = self.new_password.trim();
        let confirm = self.confirm_password.trim();
        required(&[new_password, confirm])?;
        if !is_valid_reset_password(new_password) {
            return Err(ValidationError::WeakResetPassword);
        }
        if new_password != confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(new_password.to_string())
    }
}

/// Editable profile fields (`EditarPerfil`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileDraft {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub city: String,
    pub neighborhood: String,
    pub blood_type: String,
    pub skill_level: String,
    /// Data URL of a newly chosen picture.
    pub profile_picture: Option<String>,
}

impl From<&Persona> for ProfileDraft {
    fn from(p: &Persona) -> Self {
        Self {
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            phone_number: p.phone_number.clone(),
            city: p.city.clone(),
            neighborhood: p.neighborhood.clone(),
            blood_type: p.blood_type.clone(),
            skill_level: p.skill_level.clone(),
            profile_picture: None,
        }
    }
}

impl ProfileDraft {
    pub fn validate(&self) -> Result<PersonaUpdate, ValidationError> {
        let first_name = clamp_len(&sanitize_input(self.first_name.trim()), NAME_MAX);
        required(&[&first_name])?;
        let phone = digits_only(&self.phone_number, PHONE_MAX);
        if !phone.is_empty() && !is_valid_phone(&phone) {
            return Err(ValidationError::InvalidPhone);
        }
        Ok(PersonaUpdate {
            first_name: Some(first_name),
            last_name: optional(&clamp_len(&sanitize_input(&self.last_name), NAME_MAX)),
            phone_number: optional(&phone),
            city: optional(&sanitize_input(&self.city)),
            neighborhood: optional(&sanitize_input(&self.neighborhood)),
            blood_type: optional(&self.blood_type),
            skill_level: optional(&self.skill_level),
            profile_picture: self.profile_picture.clone(),
        })
    }
}

/// Profile pictures travel inline as data URLs.
pub fn profile_picture_data_url(file: &UploadFile) -> Result<String, ValidationError> {
    if file.size() > PROFILE_PICTURE_MAX_BYTES {
        return Err(ValidationError::FileTooLarge(PROFILE_PICTURE_MAX_BYTES / 1024 / 1024));
    }
    let mime = if file.content_type.starts_with("image/") {
        file.content_type.as_str()
    } else {
        "image/png"
    };
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(&file.bytes)))
}

// ============ Club forms ============

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteDraft {
    pub name: String,
    pub start_point: String,
    pub end_point: String,
    pub duration: String,
}

impl RouteDraft {
    pub fn validate(&self) -> Result<RoutePayload, ValidationError> {
        required(&[&self.name, &self.start_point, &self.end_point, &self.duration])?;
        let duration: u32 = self
            .duration
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidNumber("La duración"))?;
        if duration == 0 {
            return Err(ValidationError::NotPositive("La duración"));
        }
        Ok(RoutePayload {
            name: sanitize_input(self.name.trim()),
            start_point: self.start_point.trim().to_string(),
            end_point: self.end_point.trim().to_string(),
            duration,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventDraft {
    pub event_type: String,
    pub route_id: String,
    pub meeting_point: String,
    /// `datetime-local` value.
    pub creation_date: String,
    pub event_level: String,
    pub event_mode: String,
    /// Raw base64 of the picked image.
    pub image: Option<String>,
}

impl From<&Event> for EventDraft {
    fn from(e: &Event) -> Self {
        let route_id = e.route_id.or_else(|| e.route.as_ref().map(|r| r.id));
        Self {
            event_type: e.event_type.clone(),
            route_id: route_id.map(|id| id.to_string()).unwrap_or_default(),
            meeting_point: e.meeting_point.clone(),
            // datetime-local wants minutes precision
            creation_date: e.creation_date.chars().take(16).collect(),
            event_level: e.event_level.clone().unwrap_or_default(),
            event_mode: e.event_mode.clone().unwrap_or_default(),
            image: None,
        }
    }
}

impl EventDraft {
    pub fn validate(&self, now: NaiveDateTime) -> Result<EventPayload, ValidationError> {
        required(&[
            &self.event_type,
            &self.route_id,
            &self.meeting_point,
            &self.creation_date,
            &self.event_level,
            &self.event_mode,
        ])?;
        let route_id: i64 = self
            .route_id
            .trim()
            .parse()
            .map_err(|_| ValidationError::NotSelected("una ruta"))?;
        let starts = parse_event_datetime(&self.creation_date)
            .ok_or(ValidationError::InvalidDate("fecha del evento"))?;
        if starts < now {
            return Err(ValidationError::PastEventDate);
        }
        Ok(EventPayload {
            event_type: self.event_type.clone(),
            route_id,
            meeting_point: sanitize_notes(self.meeting_point.trim()),
            creation_date: self.creation_date.trim().to_string(),
            event_level: self.event_level.clone(),
            event_mode: self.event_mode.clone(),
            image: self.image.clone(),
        })
    }
}

/// Event pictures are sent as raw base64 and capped at 2MB.
pub fn event_image_base64(file: &UploadFile) -> Result<String, ValidationError> {
    if file.size() > EVENT_IMAGE_MAX_BYTES {
        return Err(ValidationError::FileTooLarge(EVENT_IMAGE_MAX_BYTES / 1024 / 1024));
    }
    Ok(STANDARD.encode(&file.bytes))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Commercial,
    Operational,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceDraft {
    pub kind: Option<ResourceKind>,
    pub nombre: String,
    pub descripcion: String,
    pub categoria: String,
    pub imagen_url: String,
    pub fecha_adquisicion: String,
    pub costo_adquisicion: String,
    pub observacion: String,
    pub tallas_disponibles: String,
    // commercial
    pub precio_venta: String,
    pub stock_inicial: String,
    pub sku: String,
    // operational
    pub codigo_activo: String,
    pub estado: String,
    pub ubicacion: String,
}

impl From<&Resource> for ResourceDraft {
    fn from(r: &Resource) -> Self {
        let base = r.base();
        let mut draft = Self {
            nombre: base.nombre.clone(),
            descripcion: base.descripcion.clone().unwrap_or_default(),
            categoria: base.categoria.clone().unwrap_or_default(),
            imagen_url: base.imagen_url.clone().unwrap_or_default(),
            fecha_adquisicion: base
                .fecha_adquisicion
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            costo_adquisicion: base.costo_adquisicion.to_string(),
            observacion: base.observacion.clone().unwrap_or_default(),
            tallas_disponibles: base.tallas_disponibles.clone().unwrap_or_default(),
            ..Self::default()
        };
        match r {
            Resource::Commercial(c) => {
                draft.kind = Some(ResourceKind::Commercial);
                draft.precio_venta = c.precio_venta.to_string();
                draft.stock_inicial = c.stock_actual.max(0).to_string();
                draft.sku = c.sku.clone().unwrap_or_default();
            }
            Resource::Operational(o) => {
                draft.kind = Some(ResourceKind::Operational);
                draft.codigo_activo = o.codigo_activo.clone();
                draft.estado = o.estado.as_str().to_string();
                draft.ubicacion = o.ubicacion.clone().unwrap_or_default();
            }
        }
        draft
    }
}

impl ResourceDraft {
    pub fn validate(&self, today: NaiveDate) -> Result<ResourcePayload, ValidationError> {
        let kind = self
            .kind
            .ok_or(ValidationError::NotSelected("el tipo de recurso"))?;
        required(&[
            &self.nombre,
            &self.fecha_adquisicion,
            &self.descripcion,
            &self.costo_adquisicion,
        ])?;

        let fecha = parse_date(&self.fecha_adquisicion, "fecha de adquisición")?;
        not_future(fecha, today, "fecha de adquisición")?;
        min_description(&self.descripcion)?;
        if self.observacion.chars().count() > OBSERVATION_MAX {
            return Err(ValidationError::TooLong {
                field: "La observación",
                max: OBSERVATION_MAX,
            });
        }
        let costo = parse_decimal(&self.costo_adquisicion, "El costo de adquisición")?;
        if costo.is_sign_negative() {
            return Err(ValidationError::Negative("El costo de adquisición"));
        }

        let base = ResourceBase {
            nombre: sanitize_input(self.nombre.trim()),
            descripcion: optional(&sanitize_notes(&self.descripcion)),
            imagen_url: optional(&self.imagen_url),
            categoria: optional(&sanitize_input(&self.categoria)),
            fecha_adquisicion: Some(fecha),
            costo_adquisicion: costo,
            observacion: optional(&sanitize_notes(&self.observacion)),
            tallas_disponibles: optional(&sanitize_input(&self.tallas_disponibles)),
        };

        match kind {
            ResourceKind::Commercial => {
                required(&[&self.precio_venta, &self.stock_inicial])?;
                let precio = parse_decimal(&self.precio_venta, "El precio de venta")?;
                if precio <= Decimal::ZERO {
                    return Err(ValidationError::NotPositive("El precio de venta"));
                }
                let stock: i64 = self
                    .stock_inicial
                    .trim()
                    .parse()
                    .map_err(|_| ValidationError::InvalidNumber("El stock inicial"))?;
                let stock_inicial =
                    u32::try_from(stock).map_err(|_| ValidationError::Negative("El stock inicial"))?;
                Ok(ResourcePayload::Commercial {
                    base,
                    precio_venta: precio,
                    stock_inicial,
                    sku: optional(&self.sku),
                })
            }
            ResourceKind::Operational => {
                required(&[&self.codigo_activo, &self.estado, &self.ubicacion])?;
                let code = self.codigo_activo.trim();
                if !is_valid_asset_code(code) {
                    return Err(ValidationError::InvalidAssetCode);
                }
                let estado = AssetState::parse(&self.estado)
                    .ok_or(ValidationError::NotSelected("un estado"))?;
                Ok(ResourcePayload::Operational {
                    base,
                    codigo_activo: code.to_string(),
                    estado,
                    ubicacion: optional(&sanitize_input(&self.ubicacion)),
                    id_usuario_responsable: None,
                })
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentDraft {
    pub name: String,
    pub entry_date: String,
    pub responsible: String,
    pub document_type: String,
    pub description: String,
    pub file: Option<UploadFile>,
}

impl From<&Document> for DocumentDraft {
    fn from(d: &Document) -> Self {
        Self {
            name: d.name.clone(),
            entry_date: d.entry_date.chars().take(10).collect(),
            responsible: d.responsible.clone(),
            document_type: d.document_type.clone(),
            description: d.description.clone().unwrap_or_default(),
            file: None,
        }
    }
}

/// Extension and size checks for a document upload.
pub fn check_document_file(file: &UploadFile) -> Result<(), ValidationError> {
    let ext = file
        .name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if !DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ValidationError::UnsupportedFileType);
    }
    if file.size() > DOCUMENT_MAX_BYTES {
        return Err(ValidationError::FileTooLarge(DOCUMENT_MAX_BYTES / 1024 / 1024));
    }
    Ok(())
}

impl DocumentDraft {
    /// Metadata plus the file; editing may omit the file (`file_required = false`).
    pub fn validate(
        &self,
        today: NaiveDate,
        file_required: bool,
    ) -> Result<(DocumentForm, Option<UploadFile>), ValidationError> {
        required(&[
            &self.name,
            &self.entry_date,
            &self.responsible,
            &self.document_type,
            &self.description,
        ])?;
        let document_type = DocumentType::parse(&self.document_type)
            .ok_or(ValidationError::NotSelected("un tipo de documento"))?;
        match &self.file {
            Some(file) => check_document_file(file)?,
            None if file_required => return Err(ValidationError::MissingFile),
            None => {}
        }
        let entry = parse_date(&self.entry_date, "fecha de ingreso")?;
        not_future(entry, today, "fecha de ingreso")?;
        min_description(&self.description)?;

        Ok((
            DocumentForm {
                name: sanitize_input(self.name.trim()),
                entry_date: entry.format("%Y-%m-%d").to_string(),
                responsible: sanitize_input(self.responsible.trim()),
                document_type,
                description: sanitize_notes(self.description.trim()),
            },
            self.file.clone(),
        ))
    }
}

impl MembershipForm {
    /// Checks the emergency contact block and sanitizes free text.
    pub fn validated(&self) -> Result<MembershipForm, ValidationError> {
        required(&[&self.membership_type, &self.participation_level])?;
        let phone = digits_only(&self.emergency_phone, PHONE_MAX);
        if !phone.is_empty() && !is_valid_emergency_phone(&phone) {
            return Err(ValidationError::InvalidEmergencyPhone);
        }
        let contact = self.emergency_contact.trim();
        if !contact.is_empty() && !is_valid_contact_name(contact) {
            return Err(ValidationError::InvalidContactName);
        }
        Ok(MembershipForm {
            membership_type: self.membership_type.clone(),
            participation_level: self.participation_level.clone(),
            emergency_contact: contact.to_string(),
            emergency_phone: phone,
            medical_conditions: sanitize_notes(self.medical_conditions.trim()),
        })
    }

    /// Editing an existing membership requires the emergency contact block.
    pub fn validated_update(&self) -> Result<MembershipForm, ValidationError> {
        required(&[&self.emergency_contact, &self.emergency_phone])?;
        self.validated()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SponsorDraft {
    pub company_name: String,
    pub contact_name: String,
    pub position: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub proposal_description: String,
}

impl SponsorDraft {
    pub fn validate(&self) -> Result<SponsorApplication, ValidationError> {
        required(&[
            &self.company_name,
            &self.contact_name,
            &self.position,
            &self.contact_email,
            &self.contact_phone,
            &self.proposal_description,
        ])?;
        if !is_valid_email(self.contact_email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        let phone = digits_only(&self.contact_phone, PHONE_MAX);
        if !is_valid_phone(&phone) {
            return Err(ValidationError::InvalidPhone);
        }
        min_description(&self.proposal_description)?;
        Ok(SponsorApplication {
            company_name: sanitize_input(self.company_name.trim()),
            contact_name: sanitize_input(self.contact_name.trim()),
            position: sanitize_input(self.position.trim()),
            contact_email: self.contact_email.trim().to_string(),
            contact_phone: phone,
            proposal_description: sanitize_notes(self.proposal_description.trim()),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransactionDraft {
    pub tipo: TransactionKind,
    pub categoria: String,
    pub monto: String,
    pub descripcion: String,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self {
            tipo: TransactionKind::Egreso,
            categoria: "OPERATIVO".to_string(),
            monto: String::new(),
            descripcion: String::new(),
        }
    }
}

impl TransactionDraft {
    pub fn validate(&self) -> Result<TransactionForm, ValidationError> {
        required(&[&self.categoria, &self.monto])?;
        let monto = parse_decimal(&self.monto, "El monto")?;
        if monto <= Decimal::ZERO {
            return Err(ValidationError::NotPositive("El monto"));
        }
        Ok(TransactionForm {
            tipo: self.tipo,
            categoria: sanitize_input(self.categoria.trim()),
            monto,
            descripcion: optional(&sanitize_notes(&self.descripcion)),
        })
    }
}

/// Customer block of the cart checkout. Phone is optional.
pub fn validate_customer(name: &str, phone: &str) -> Result<(String, String), ValidationError> {
    let name = sanitize_input(name.trim());
    required(&[&name])?;
    let phone = digits_only(phone, PHONE_MAX);
    if !phone.is_empty() && !is_valid_phone(&phone) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok((name, phone))
}
