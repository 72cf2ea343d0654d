pub mod triages;

pub use triages::TriageService;
