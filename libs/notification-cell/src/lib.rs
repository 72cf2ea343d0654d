pub mod models;
pub mod services;
pub mod views;

pub use models::*;
