use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{Appointment, AppointmentStatus};

/// Per-criterion filter over an appointment list. Inactive criteria (empty
/// text, `None` status, `None` date) always match; an appointment must
/// satisfy every active one.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub search: String,
    pub status: Option<AppointmentStatus>,
    pub date: Option<NaiveDate>,
}

impl AppointmentFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        let search = self.search.to_lowercase();
        let matches_search = search.is_empty()
            || appointment.patient.first_name.to_lowercase().contains(&search)
            || appointment.patient.last_name.to_lowercase().contains(&search)
            || appointment.doctor_name.to_lowercase().contains(&search)
            || appointment.specialty.to_lowercase().contains(&search);

        let matches_status = self
            .status
            .map_or(true, |status| appointment.status == status);

        let matches_date = self
            .date
            .map_or(true, |date| appointment.appointment_date.date() == date);

        matches_search && matches_status && matches_date
    }
}

pub fn filter_appointments(
    appointments: &[Appointment],
    filter: &AppointmentFilter,
) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|appointment| filter.matches(appointment))
        .cloned()
        .collect()
}

/// Soonest first; equal timestamps keep their input order.
pub fn sort_by_date(mut appointments: Vec<Appointment>) -> Vec<Appointment> {
    appointments.sort_by_key(|appointment| appointment.appointment_date);
    appointments
}

/// Appointment count per calendar day (the time of day is ignored). Days
/// without appointments do not appear.
pub fn appointments_per_day(appointments: &[Appointment]) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for appointment in appointments {
        *counts
            .entry(appointment.appointment_date.date())
            .or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub appointment_count: usize,
    pub selectable: bool,
    pub is_today: bool,
}

/// Day grid for one month. Days strictly before `today` cannot be selected,
/// whatever their appointment count. `today` is an explicit argument so the
/// view stays deterministic.
pub fn month_view(
    year: i32,
    month: u32,
    today: NaiveDate,
    appointments: &[Appointment],
) -> Vec<CalendarDay> {
    let counts = appointments_per_day(appointments);

    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let mut days = Vec::new();
    let mut day = first;
    while day.month() == month {
        days.push(CalendarDay {
            date: day,
            appointment_count: counts.get(&day).copied().unwrap_or(0),
            selectable: day >= today,
            is_today: day == today,
        });
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    days
}
