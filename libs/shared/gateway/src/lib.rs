pub mod client;

pub use client::{ApiGateway, RefreshState};
