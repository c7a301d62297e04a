use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: String,
}

/// Visual badge derived from keywords in the notification title.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Badge {
    New,
    Update,
    Cancel,
    Reminder,
    Default,
}

impl Badge {
    pub fn for_title(title: &str) -> Self {
        let title = title.to_lowercase();
        if title.contains("nuevo") {
            Badge::New
        } else if title.contains("actualizado") {
            Badge::Update
        } else if title.contains("cancelado") {
            Badge::Cancel
        } else if title.contains("recordatorio") {
            Badge::Reminder
        } else {
            Badge::Default
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Badge::New => "badge-new",
            Badge::Update => "badge-update",
            Badge::Cancel => "badge-cancel",
            Badge::Reminder => "badge-recording",
            Badge::Default => "badge-default",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_from_title_keywords() {
        assert_eq!(Badge::for_title("Nuevo evento: Rodada"), Badge::New);
        assert_eq!(Badge::for_title("Evento ACTUALIZADO"), Badge::Update);
        assert_eq!(Badge::for_title("Evento cancelado"), Badge::Cancel);
        assert_eq!(Badge::for_title("Recordatorio de pago"), Badge::Reminder);
        assert_eq!(Badge::for_title("Hola").css_class(), "badge-default");
    }
}
