//! Configuration management

use anyhow::Result;
use serde::Deserialize;

/// Backend used when neither the build nor the environment names one.
const FALLBACK_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Base URL of the club REST backend (no trailing slash)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_club_name")]
    pub club_name: String,

    /// Club WhatsApp number that receives store orders
    #[serde(default)]
    pub whatsapp_phone: Option<String>,

    /// Google Maps embed key for route previews
    #[serde(default)]
    pub maps_api_key: Option<String>,

    /// How often the notifications page re-reads dismissed ids
    #[serde(default = "default_notification_poll_ms")]
    pub notification_poll_ms: u64,
}

fn default_api_url() -> String {
    option_env!("CLUB_API_URL")
        .unwrap_or(FALLBACK_API_URL)
        .trim_end_matches('/')
        .to_string()
}

fn default_club_name() -> String {
    "Club de Ciclismo EPN".to_string()
}

fn default_notification_poll_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            club_name: default_club_name(),
            whatsapp_phone: option_env!("CLUB_WHATSAPP_PHONE").map(str::to_string),
            maps_api_key: option_env!("CLUB_MAPS_API_KEY").map(str::to_string),
            notification_poll_ms: default_notification_poll_ms(),
        }
    }
}

impl Config {
    /// Absolute URL for a backend path such as `/event`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Google Maps embed URL for a free-form place, when a key is configured.
    pub fn maps_embed_url(&self, place: &str) -> Option<String> {
        self.maps_api_key.as_ref().map(|key| {
            format!(
                "https://www.google.com/maps/embed/v1/place?key={}&q={}",
                urlencoding::encode(key),
                urlencoding::encode(place)
            )
        })
    }
}

/// Load configuration: compiled-in defaults overridden by `CLUB_*` variables.
///
/// Values are read as strings so phone numbers keep their leading zero.
pub fn load_config() -> Result<Config> {
    let defaults = Config::default();

    let mut builder = ::config::Config::builder()
        .set_default("api_url", defaults.api_url)?
        .set_default("club_name", defaults.club_name)?
        .set_default("notification_poll_ms", defaults.notification_poll_ms as i64)?
        // CLUB_API_URL, CLUB_WHATSAPP_PHONE, CLUB_MAPS_API_KEY, ...
        .add_source(
            ::config::Environment::with_prefix("CLUB")
                .prefix_separator("_")
                .separator("__"),
        );

    if let Some(phone) = defaults.whatsapp_phone {
        builder = builder.set_default("whatsapp_phone", phone)?;
    }
    if let Some(key) = defaults.maps_api_key {
        builder = builder.set_default("maps_api_key", key)?;
    }

    let mut config: Config = builder.build()?.try_deserialize()?;
    config.api_url = config.api_url.trim_end_matches('/').to_string();
    Ok(config)
}

/// Load configuration, falling back to defaults on malformed overrides.
pub fn load_or_default() -> Config {
    match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid configuration, using defaults: {}", e);
            Config::default()
        }
    }
}
