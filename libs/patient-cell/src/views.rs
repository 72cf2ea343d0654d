use crate::models::{Gender, Patient};

/// Client-side patient filter. Inactive criteria (empty text, `None`
/// gender) always match.
#[derive(Debug, Clone, Default)]
pub struct PatientFilter {
    pub search: String,
    pub gender: Option<Gender>,
}

impl PatientFilter {
    pub fn matches(&self, patient: &Patient) -> bool {
        let search = self.search.to_lowercase();
        let matches_search = search.is_empty()
            || patient.first_name.to_lowercase().contains(&search)
            || patient.last_name.to_lowercase().contains(&search)
            || patient.identification_number.contains(&self.search);

        let matches_gender = self.gender.map_or(true, |gender| patient.gender == gender);

        matches_search && matches_gender
    }
}

pub fn filter_patients(patients: &[Patient], filter: &PatientFilter) -> Vec<Patient> {
    patients
        .iter()
        .filter(|patient| filter.matches(patient))
        .cloned()
        .collect()
}
