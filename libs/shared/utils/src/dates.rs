use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// "dd/MM/yyyy a las HH:mm", the display format used across the client.
pub fn format_date_time(value: &NaiveDateTime) -> String {
    format!(
        "{} a las {}",
        value.format("%d/%m/%Y"),
        value.format("%H:%M")
    )
}

pub fn format_date(value: &NaiveDate) -> String {
    value.format("%d/%m/%Y").to_string()
}

/// ISO date, the shape date inputs and the by-date endpoint expect.
pub fn format_date_for_input(value: &NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// Whole years between `birth_date` and `today`.
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name)
}
