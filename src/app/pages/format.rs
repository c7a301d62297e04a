//! Display formatting shared by the pages (Spanish, Ecuador).

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use rust_decimal::Decimal;

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

fn weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Lunes",
        Weekday::Tue => "Martes",
        Weekday::Wed => "Miércoles",
        Weekday::Thu => "Jueves",
        Weekday::Fri => "Viernes",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

/// `Sábado, 14 de junio de 2025`
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{}, {:02} de {} de {}",
        weekday(date.weekday()),
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// `Sábado, 14 de junio de 2025 · 07:30`
pub fn long_datetime(at: NaiveDateTime) -> String {
    format!("{} · {}", long_date(at.date()), at.format("%H:%M"))
}

/// Backend timestamp or date string rendered as a long date; unparseable
/// input is shown as-is.
pub fn event_date(raw: &str) -> String {
    crate::models::event::parse_event_datetime(raw)
        .map(long_datetime)
        .or_else(|| {
            NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d")
                .ok()
                .map(long_date)
        })
        .unwrap_or_else(|| raw.to_string())
}

/// `$12.50`
pub fn money(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

pub fn money_f64(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// `DD/MM/YYYY` from the first ten chars of an ISO date.
pub fn short_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d")
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_dates_are_spanish() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        assert_eq!(long_date(date), "Sábado, 14 de junio de 2025");
        assert_eq!(
            event_date("2025-06-14T07:30:00"),
            "Sábado, 14 de junio de 2025 · 07:30"
        );
    }

    #[test]
    fn unparseable_dates_pass_through() {
        assert_eq!(event_date("pronto"), "pronto");
        assert_eq!(short_date("2025-01-09T10:00:00"), "09/01/2025");
        assert_eq!(short_date("ayer"), "ayer");
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(money(Decimal::new(125, 1)), "$12.50");
        assert_eq!(money_f64(3.0), "$3.00");
    }
}
