use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Datelike;
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use appointment_cell::services::AppointmentService;
use appointment_cell::views as appointment_views;
use assistant_cell::models::ChatInput;
use assistant_cell::services::AssistantService;
use auth_cell::services::AuthService;
use notification_cell::services::NotificationService;
use notification_cell::views as notification_views;
use patient_cell::models::PatientQuery;
use patient_cell::services::PatientService;
use shared_config::AppConfig;
use shared_gateway::ApiGateway;
use shared_models::auth::LoginRequest;
use shared_query::QueryCache;
use shared_session::{FileStorage, SessionPhase, SessionStore, SessionStorage};
use triage_cell::services::TriageService;
use triage_cell::views as triage_views;

/// Smoke console: logs in (or restores a persisted session), pulls each
/// collection once and prints the derived views. Useful to exercise the
/// whole client stack against a running backend.
#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting consultorio console");

    let config = AppConfig::from_env();
    let storage: Arc<dyn SessionStorage> =
        Arc::new(FileStorage::new(config.session_storage_path.clone()));
    let session = Arc::new(SessionStore::restore(storage).await);
    let gateway = Arc::new(ApiGateway::new(&config, Arc::clone(&session)));
    let cache = Arc::new(QueryCache::new());

    // Route back to login whenever the session becomes unusable.
    let mut phases = session.watch_phase();
    tokio::spawn(async move {
        while phases.changed().await.is_ok() {
            if *phases.borrow() == SessionPhase::Expired {
                warn!("Session expired, please log in again");
            }
        }
    });

    let auth = AuthService::new(
        Arc::clone(&gateway),
        Arc::clone(&session),
        Arc::clone(&cache),
    );

    if session.is_authenticated() {
        info!("Restored persisted session");
    } else {
        let username = std::env::var("CONSOLE_USERNAME").ok();
        let password = std::env::var("CONSOLE_PASSWORD").ok();
        let (Some(username), Some(password)) = (username, password) else {
            bail!("No persisted session; set CONSOLE_USERNAME and CONSOLE_PASSWORD to log in");
        };
        let user = auth.login(&LoginRequest { username, password }).await?;
        info!("Logged in as {} ({})", user.username, user.email);
    }

    let appointments = AppointmentService::new(Arc::clone(&gateway), Arc::clone(&cache))
        .get_all()
        .await?;
    let today = chrono::Local::now().date_naive();
    let per_day = appointment_views::appointments_per_day(&appointments);
    info!(
        "{} appointments across {} days",
        appointments.len(),
        per_day.len()
    );
    for day in appointment_views::month_view(today.year(), today.month(), today, &appointments) {
        if day.appointment_count > 0 {
            info!(
                "  {}: {} appointment(s){}",
                day.date,
                day.appointment_count,
                if day.selectable { "" } else { " (past)" }
            );
        }
    }

    let triages = triage_views::sort_by_priority(
        TriageService::new(Arc::clone(&gateway), Arc::clone(&cache))
            .get_all()
            .await?,
    );
    if let Some(next) = triages.first() {
        info!(
            "Most urgent triage: {} ({})",
            next.patient.full_name(),
            next.priority
        );
    }

    let patients = PatientService::new(Arc::clone(&gateway), Arc::clone(&cache))
        .get_all(&PatientQuery {
            size: Some(5),
            ..Default::default()
        })
        .await?;
    info!(
        "{} patients registered ({} on first page)",
        patients.total_elements,
        patients.content.len()
    );

    let notifications = NotificationService::new(Arc::clone(&gateway), Arc::clone(&cache))
        .get_all()
        .await?;
    info!(
        "{} notifications, {} unread",
        notifications.len(),
        notification_views::unread_count(&notifications)
    );

    if let Ok(prompt) = std::env::var("ASSISTANT_PROMPT") {
        let assistant = AssistantService::new(Arc::clone(&gateway));
        let reply = assistant.chat(&ChatInput { prompt }).await?;
        info!("Assistant: {}", reply.data);
    }

    Ok(())
}
