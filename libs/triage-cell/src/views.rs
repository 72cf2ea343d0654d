use crate::models::{Priority, Triage};

/// Client-side triage filter. The text criterion matches the patient's name
/// case-insensitively and the identification number verbatim.
#[derive(Debug, Clone, Default)]
pub struct TriageFilter {
    pub search: String,
    pub priority: Option<Priority>,
}

impl TriageFilter {
    pub fn matches(&self, triage: &Triage) -> bool {
        let search = self.search.to_lowercase();
        let matches_search = search.is_empty()
            || triage.patient.full_name().to_lowercase().contains(&search)
            || triage.patient.identification_number.contains(&self.search);

        let matches_priority = self
            .priority
            .map_or(true, |priority| triage.priority == priority);

        matches_search && matches_priority
    }
}

pub fn filter_triages(triages: &[Triage], filter: &TriageFilter) -> Vec<Triage> {
    triages
        .iter()
        .filter(|triage| filter.matches(triage))
        .cloned()
        .collect()
}

/// Most urgent first; equal priorities keep their arrival order.
pub fn sort_by_priority(mut triages: Vec<Triage>) -> Vec<Triage> {
    triages.sort_by_key(|triage| triage.priority.rank());
    triages
}
