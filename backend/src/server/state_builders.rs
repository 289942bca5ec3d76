//! Builders wiring the JSON-file adapters into the HTTP state.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use mockable::Clock;
use tracing::info;

use campus_security::config::AppSettings;
use campus_security::domain::{
    DashboardService, IdentityService, ImagePolicy, IncidentIntakeService, UserDirectoryService,
};
use campus_security::inbound::http::state::{HttpState, HttpStatePorts};
use campus_security::outbound::matcher::RegisteredStudentsMatcher;
use campus_security::outbound::media::FsMediaStore;
use campus_security::outbound::persistence::{
    JsonAlertRepository, JsonIncidentRepository, JsonStore, JsonUserRepository, initialise_store,
};
use campus_security::outbound::security::Argon2PasswordHasher;
use campus_security::outbound::sessions::{DEFAULT_SESSION_TTL, InMemorySessionRegistry};

/// Opened storage plus the shared collaborators every service needs.
pub struct StateInputs {
    pub store: Arc<JsonStore>,
    pub media: Arc<FsMediaStore>,
    pub hasher: Arc<Argon2PasswordHasher>,
    pub clock: Arc<dyn Clock>,
    pub image_policy: ImagePolicy,
}

/// Open the data and upload directories and create missing collections.
///
/// # Errors
/// Fails when a directory cannot be created or opened, or the initial
/// collections cannot be written.
pub async fn prepare_state_inputs(
    settings: &AppSettings,
    hasher: Argon2PasswordHasher,
    clock: Arc<dyn Clock>,
) -> Result<StateInputs> {
    let data_dir = settings.data_dir();
    let store = Arc::new(
        JsonStore::open(&data_dir)
            .wrap_err_with(|| format!("failed to open data directory {data_dir}"))?,
    );
    let upload_dir = settings.upload_dir();
    let media = Arc::new(
        FsMediaStore::open(&upload_dir)
            .wrap_err_with(|| format!("failed to open upload directory {upload_dir}"))?,
    );
    initialise_store(&store, &hasher, clock.as_ref(), settings.seed_demo_users)
        .await
        .wrap_err("failed to initialise the record store")?;
    info!(data_dir = %data_dir, upload_dir = %upload_dir, "storage ready");

    Ok(StateInputs {
        store,
        media,
        hasher: Arc::new(hasher),
        clock,
        image_policy: settings.image_policy(),
    })
}

/// Compose domain services over the JSON-file adapters.
pub fn build_http_state(inputs: StateInputs) -> HttpState {
    let StateInputs {
        store,
        media,
        hasher,
        clock,
        image_policy,
    } = inputs;

    let users = Arc::new(JsonUserRepository::new(Arc::clone(&store)));
    let incidents = Arc::new(JsonIncidentRepository::new(Arc::clone(&store)));
    let alerts = Arc::new(JsonAlertRepository::new(store));
    let registry = Arc::new(InMemorySessionRegistry::new(
        Arc::clone(&clock),
        DEFAULT_SESSION_TTL,
    ));
    let identity = Arc::new(IdentityService::new(
        Arc::clone(&users),
        Arc::clone(&hasher),
        registry,
    ));
    let matcher = Arc::new(RegisteredStudentsMatcher::new(Arc::clone(&users)));
    let intake = IncidentIntakeService::new(
        Arc::clone(&incidents),
        Arc::clone(&media),
        matcher,
        Arc::clone(&clock),
    );
    let directory = UserDirectoryService::new(users, hasher, Arc::clone(&media), clock);
    let dashboard = DashboardService::new(incidents, alerts);

    HttpState::new(
        HttpStatePorts {
            login: Arc::clone(&identity) as _,
            sessions: identity,
            incidents: Arc::new(intake),
            users: Arc::new(directory),
            dashboard: Arc::new(dashboard),
            media,
        },
        image_policy,
    )
}
