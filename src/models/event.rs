use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::user::Persona;

pub const EVENT_TYPES: &[&str] = &["Entrenamiento", "Rodada"];
pub const EVENT_LEVELS: &[&str] = &["Básico", "Intermedio", "Avanzado"];
pub const EVENT_MODES: &[&str] = &["Montaña", "Carretera"];

/// Cycling route (`/route`). Duration is in minutes.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RouteRecord {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub start_point: String,
    pub end_point: String,
    pub duration: u32,
}

/// Body of `POST /route/create`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RoutePayload {
    pub name: String,
    pub start_point: String,
    pub end_point: String,
    pub duration: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: i64,
    pub event_type: String,
    #[serde(default)]
    pub route_id: Option<i64>,
    #[serde(default)]
    pub route_name: Option<String>,
    #[serde(default)]
    pub route: Option<RouteRecord>,
    #[serde(default)]
    pub meeting_point: String,
    /// Start of the ride; the backend calls it `creation_date`.
    pub creation_date: String,
    #[serde(default)]
    pub event_level: Option<String>,
    #[serde(default)]
    pub event_mode: Option<String>,
    /// `data:image/...` URL when the event has a picture.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

impl Event {
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        parse_event_datetime(&self.creation_date)
    }

    pub fn route_label(&self) -> String {
        self.route_name
            .clone()
            .or_else(|| self.route.as_ref().map(|r| r.name.clone()))
            .unwrap_or_else(|| "Ruta sin nombre".to_string())
    }

    /// Image only when it is an inline data URL the browser can render.
    pub fn image_src(&self) -> Option<&str> {
        self.image
            .as_deref()
            .filter(|img| img.starts_with("data:image/"))
    }

    /// Sign-ups close at the end of the day before the ride.
    pub fn registration_open(&self, now: NaiveDateTime) -> bool {
        self.starts_at()
            .and_then(|at| at.date().pred_opt())
            .and_then(|eve| eve.and_hms_opt(23, 59, 59))
            .is_some_and(|deadline| now <= deadline)
    }
}

/// Accepts both the `datetime-local` input format and the backend's.
pub fn parse_event_datetime(s: &str) -> Option<NaiveDateTime> {
    const FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];
    let s = s.trim().trim_end_matches('Z');
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Events starting after `now`, soonest first.
pub fn upcoming(events: &[Event], now: NaiveDateTime) -> Vec<Event> {
    let mut future: Vec<(NaiveDateTime, Event)> = events
        .iter()
        .filter_map(|e| e.starts_at().map(|at| (at, e.clone())))
        .filter(|(at, _)| *at > now)
        .collect();
    future.sort_by_key(|(at, _)| *at);
    future.into_iter().map(|(_, e)| e).collect()
}

/// Body of `POST /event/create` and `PUT /event/update/{id}`.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct EventPayload {
    pub event_type: String,
    pub route_id: i64,
    pub meeting_point: String,
    pub creation_date: String,
    pub event_level: String,
    pub event_mode: String,
    /// Raw base64 (no data-URL prefix).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ParticipantUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub person: Option<Persona>,
}

/// Row of `GET /participants/event/{id}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    pub id: i64,
    #[serde(default)]
    pub registered_at: String,
    #[serde(default)]
    pub user: Option<ParticipantUser>,
}

impl Participant {
    pub fn person(&self) -> Option<&Persona> {
        self.user.as_ref().and_then(|u| u.person.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: i64, date: &str) -> Event {
        Event {
            id,
            event_type: "Rodada".to_string(),
            creation_date: date.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn parses_input_and_backend_formats() {
        assert!(parse_event_datetime("2026-05-01T07:30").is_some());
        assert!(parse_event_datetime("2026-05-01T07:30:00").is_some());
        assert!(parse_event_datetime("2026-05-01T07:30:00.123Z").is_some());
        assert!(parse_event_datetime("mañana").is_none());
    }

    #[test]
    fn upcoming_filters_past_and_sorts_ascending() {
        let now = parse_event_datetime("2026-05-01T00:00").unwrap();
        let events = vec![
            event(1, "2026-06-01T08:00:00"),
            event(2, "2026-04-01T08:00:00"),
            event(3, "2026-05-02T08:00:00"),
            event(4, "not a date"),
        ];
        let ids: Vec<i64> = upcoming(&events, now).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn registration_closes_the_day_before() {
        let e = event(1, "2026-06-10T07:00:00");
        let at = |s: &str| parse_event_datetime(s).unwrap();
        assert!(e.registration_open(at("2026-06-09T23:59:00")));
        assert!(!e.registration_open(at("2026-06-10T00:00:00")));
        assert!(!event(2, "someday").registration_open(at("2026-06-01T00:00")));
    }

    #[test]
    fn image_src_requires_data_url() {
        let mut e = event(1, "2026-06-01T08:00:00");
        e.image = Some("aGVsbG8=".to_string());
        assert_eq!(e.image_src(), None);
        e.image = Some("data:image/png;base64,aGVsbG8=".to_string());
        assert!(e.image_src().is_some());
    }
}
