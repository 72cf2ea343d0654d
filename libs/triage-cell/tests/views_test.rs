use chrono::{NaiveDate, NaiveDateTime};

use patient_cell::models::{BloodType, Gender, Patient};
use triage_cell::models::{Priority, Triage};
use triage_cell::views::{filter_triages, sort_by_priority, TriageFilter};

fn datetime(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").unwrap()
}

fn patient(id: i64, first_name: &str, last_name: &str) -> Patient {
    Patient {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        identification_number: format!("20{:06}", id),
        date_of_birth: NaiveDate::from_ymd_opt(1985, 9, 30).unwrap(),
        gender: Gender::Male,
        phone_number: "555-0200".to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        address: "Carrera 7 #45".to_string(),
        blood_type: BloodType::AbNegative,
        allergies: "Ninguna".to_string(),
        medical_conditions: "Hipertensión".to_string(),
        created_at: datetime("2024-01-01T08:00:00"),
        updated_at: datetime("2024-01-01T08:00:00"),
    }
}

fn triage(id: i64, patient_first_name: &str, priority: Priority) -> Triage {
    Triage {
        id,
        patient: patient(id, patient_first_name, "Mendoza"),
        triage_date: datetime("2025-03-10T08:15:00"),
        symptoms: "Dolor torácico".to_string(),
        temperature: 37.2,
        blood_pressure: "120/80".to_string(),
        heart_rate: 82,
        respiratory_rate: 16,
        oxygen_saturation: 97,
        priority,
        observations: None,
        attended_by: "Enf. Paredes".to_string(),
    }
}

#[test]
fn sorts_most_urgent_first() {
    let triages = vec![
        triage(1, "Raúl", Priority::NoUrgente),
        triage(2, "Sara", Priority::Emergencia),
        triage(3, "Iván", Priority::Urgente),
    ];

    let sorted = sort_by_priority(triages);

    assert_eq!(
        sorted.iter().map(|t| t.priority).collect::<Vec<_>>(),
        vec![Priority::Emergencia, Priority::Urgente, Priority::NoUrgente]
    );
}

#[test]
fn equal_priorities_keep_their_arrival_order() {
    let triages = vec![
        triage(1, "Raúl", Priority::Urgente),
        triage(2, "Sara", Priority::Urgente),
        triage(3, "Iván", Priority::Emergencia),
        triage(4, "Nora", Priority::Urgente),
    ];

    let sorted = sort_by_priority(triages);

    assert_eq!(
        sorted.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![3, 1, 2, 4]
    );
}

#[test]
fn covers_the_whole_priority_scale() {
    let triages = vec![
        triage(1, "Raúl", Priority::MenosUrgente),
        triage(2, "Sara", Priority::NoUrgente),
        triage(3, "Iván", Priority::Emergencia),
        triage(4, "Nora", Priority::Urgente),
    ];

    let sorted = sort_by_priority(triages);

    assert_eq!(
        sorted.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![3, 4, 1, 2]
    );
}

#[test]
fn filters_by_patient_name_and_priority_together() {
    let triages = vec![
        triage(1, "Sara", Priority::Urgente),
        triage(2, "Sara", Priority::NoUrgente),
        triage(3, "Raúl", Priority::Urgente),
    ];

    let filter = TriageFilter {
        search: "sara".to_string(),
        priority: Some(Priority::Urgente),
    };
    let matched = filter_triages(&triages, &filter);

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, 1);
}

#[test]
fn search_matches_the_identification_number_verbatim() {
    let triages = vec![
        triage(1, "Sara", Priority::Urgente),
        triage(2, "Raúl", Priority::Urgente),
    ];

    let filter = TriageFilter {
        search: "20000002".to_string(),
        priority: None,
    };
    let matched = filter_triages(&triages, &filter);

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, 2);
}

#[test]
fn empty_filter_matches_everything() {
    let triages = vec![
        triage(1, "Sara", Priority::Urgente),
        triage(2, "Raúl", Priority::NoUrgente),
    ];

    let matched = filter_triages(&triages, &TriageFilter::default());

    assert_eq!(matched.len(), 2);
}
