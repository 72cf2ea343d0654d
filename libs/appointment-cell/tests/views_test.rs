use chrono::{NaiveDate, NaiveDateTime};

use appointment_cell::models::{Appointment, AppointmentStatus};
use appointment_cell::views::{
    appointments_per_day, filter_appointments, month_view, sort_by_date, AppointmentFilter,
};
use patient_cell::models::{BloodType, Gender, Patient};

fn datetime(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").unwrap()
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

fn patient(id: i64, first_name: &str, last_name: &str) -> Patient {
    Patient {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        identification_number: format!("10{:06}", id),
        date_of_birth: date("1990-05-12"),
        gender: Gender::Female,
        phone_number: "555-0100".to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        address: "Av. Siempre Viva 123".to_string(),
        blood_type: BloodType::OPositive,
        allergies: "Ninguna".to_string(),
        medical_conditions: "Ninguna".to_string(),
        created_at: datetime("2024-01-01T08:00:00"),
        updated_at: datetime("2024-01-01T08:00:00"),
    }
}

fn appointment(
    id: i64,
    patient_first_name: &str,
    when: &str,
    status: AppointmentStatus,
    doctor_name: &str,
) -> Appointment {
    Appointment {
        id,
        patient: patient(id, patient_first_name, "González"),
        appointment_date: datetime(when),
        reason: "Control general".to_string(),
        status,
        doctor_name: doctor_name.to_string(),
        specialty: "Medicina General".to_string(),
        observations: None,
        created_by: "admin".to_string(),
    }
}

#[test]
fn groups_appointments_by_day_and_omits_empty_days() {
    let appointments = vec![
        appointment(1, "Ana", "2025-03-10T09:00:00", AppointmentStatus::Pendiente, "Dr. Ramírez"),
        appointment(2, "Luis", "2025-03-10T15:30:00", AppointmentStatus::Confirmada, "Dr. Ramírez"),
        appointment(3, "Eva", "2025-03-12T11:00:00", AppointmentStatus::Pendiente, "Dra. Soto"),
    ];

    let counts = appointments_per_day(&appointments);

    assert_eq!(counts.len(), 2);
    assert_eq!(counts[&date("2025-03-10")], 2);
    assert_eq!(counts[&date("2025-03-12")], 1);
    assert!(!counts.contains_key(&date("2025-03-11")));
}

#[test]
fn filter_requires_every_active_criterion() {
    let appointments = vec![
        appointment(1, "Ana", "2025-03-10T09:00:00", AppointmentStatus::Confirmada, "Dr. Ramírez"),
        appointment(2, "Ana", "2025-03-11T09:00:00", AppointmentStatus::Pendiente, "Dr. Ramírez"),
        appointment(3, "Luis", "2025-03-10T10:00:00", AppointmentStatus::Confirmada, "Dra. Soto"),
    ];

    let filter = AppointmentFilter {
        search: "ana".to_string(),
        status: Some(AppointmentStatus::Confirmada),
        date: None,
    };
    let matched = filter_appointments(&appointments, &filter);

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, 1);
}

#[test]
fn inactive_criteria_always_match() {
    let appointments = vec![
        appointment(1, "Ana", "2025-03-10T09:00:00", AppointmentStatus::Confirmada, "Dr. Ramírez"),
        appointment(2, "Luis", "2025-03-11T09:00:00", AppointmentStatus::Cancelada, "Dra. Soto"),
    ];

    let matched = filter_appointments(&appointments, &AppointmentFilter::default());

    assert_eq!(matched.len(), 2);
}

#[test]
fn date_criterion_matches_the_calendar_day_ignoring_time() {
    let appointments = vec![
        appointment(1, "Ana", "2025-03-10T09:00:00", AppointmentStatus::Pendiente, "Dr. Ramírez"),
        appointment(2, "Luis", "2025-03-10T18:45:00", AppointmentStatus::Pendiente, "Dra. Soto"),
        appointment(3, "Eva", "2025-03-11T09:00:00", AppointmentStatus::Pendiente, "Dr. Ramírez"),
    ];

    let filter = AppointmentFilter {
        date: Some(date("2025-03-10")),
        ..Default::default()
    };
    let matched = filter_appointments(&appointments, &filter);

    assert_eq!(matched.len(), 2);
}

#[test]
fn search_covers_doctor_and_specialty() {
    let appointments = vec![
        appointment(1, "Ana", "2025-03-10T09:00:00", AppointmentStatus::Pendiente, "Dr. Ramírez"),
        appointment(2, "Luis", "2025-03-11T09:00:00", AppointmentStatus::Pendiente, "Dra. Soto"),
    ];

    let by_doctor = filter_appointments(
        &appointments,
        &AppointmentFilter {
            search: "ramírez".to_string(),
            ..Default::default()
        },
    );
    assert_eq!(by_doctor.len(), 1);
    assert_eq!(by_doctor[0].id, 1);

    let by_specialty = filter_appointments(
        &appointments,
        &AppointmentFilter {
            search: "medicina".to_string(),
            ..Default::default()
        },
    );
    assert_eq!(by_specialty.len(), 2);
}

#[test]
fn days_before_today_are_never_selectable() {
    let today = date("2025-03-15");
    let appointments = vec![
        appointment(1, "Ana", "2025-03-14T09:00:00", AppointmentStatus::Completada, "Dr. Ramírez"),
        appointment(2, "Luis", "2025-03-20T09:00:00", AppointmentStatus::Pendiente, "Dra. Soto"),
    ];

    let days = month_view(2025, 3, today, &appointments);

    assert_eq!(days.len(), 31);
    let day_14 = &days[13];
    assert_eq!(day_14.appointment_count, 1);
    assert!(!day_14.selectable);
    let day_15 = &days[14];
    assert!(day_15.selectable);
    assert!(day_15.is_today);
    let day_20 = &days[19];
    assert!(day_20.selectable);
    assert_eq!(day_20.appointment_count, 1);
}

#[test]
fn sort_by_date_puts_the_soonest_first_and_is_stable() {
    let appointments = vec![
        appointment(1, "Ana", "2025-03-20T09:00:00", AppointmentStatus::Pendiente, "Dr. Ramírez"),
        appointment(2, "Luis", "2025-03-10T09:00:00", AppointmentStatus::Pendiente, "Dra. Soto"),
        appointment(3, "Eva", "2025-03-10T09:00:00", AppointmentStatus::Pendiente, "Dr. Ramírez"),
    ];

    let sorted = sort_by_date(appointments);

    assert_eq!(
        sorted.iter().map(|a| a.id).collect::<Vec<_>>(),
        vec![2, 3, 1]
    );
}
