use crate::cli::ServeArgs;
use crate::infra::{
    seed_administrator, AppState, ConfiguredSource, InMemoryIdentityProvider,
    InMemoryProfileRepository,
};
use crate::routes::{with_application_routes, Services};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use student_housing::accounts::{
    AccessPolicy, AccountService, AuthService, CredentialPolicy, SessionEvent, SessionRegistry,
};
use student_housing::config::AppConfig;
use student_housing::directions::{GoogleDirectionsClient, RoutePlanner};
use student_housing::error::AppError;
use student_housing::listings::{ListingService, ListingSource};
use student_housing::telemetry;
use tracing::{debug, info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let source = ConfiguredSource::from_config(&config.listings);
    info!(source = source.source_name(), "listing source configured");
    let listings = ListingService::new(Arc::new(source));

    if config.maps.api_key.is_none() {
        warn!("APP_MAPS_API_KEY not set; route requests will fail");
    }
    let directions =
        GoogleDirectionsClient::new(config.maps.base_url.clone(), config.maps.api_key.clone());
    let planner = RoutePlanner::new(Arc::new(directions));

    let identity = InMemoryIdentityProvider::default();
    let profiles = InMemoryProfileRepository::default();
    if let (Some(email), Some(password)) = (args.admin_email.take(), args.admin_password.take()) {
        if let Err(err) = seed_administrator(&identity, &profiles, &email, &password).await {
            warn!(error = %err, "administrator seeding skipped");
        }
    }

    let sessions = Arc::new(SessionRegistry::new(config.access.session_ttl_minutes));
    spawn_session_log(&sessions);

    let accounts = AccountService::new(
        Arc::new(profiles),
        AccessPolicy::from_config(&config.access),
    );
    let auth = Arc::new(AuthService::new(
        Arc::new(identity),
        accounts,
        CredentialPolicy::new(config.access.allowed_email_domain.clone()),
        sessions,
    ));

    let app = with_application_routes(Services {
        listings,
        planner,
        auth,
    })
    .layer(Extension(app_state))
    .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "student housing service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn spawn_session_log(sessions: &SessionRegistry) {
    let mut events = sessions.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                SessionEvent::SignedIn(uid) => debug!(uid = %uid.0, "session opened"),
                SessionEvent::SignedOut(uid) => debug!(uid = %uid.0, "session closed"),
            }
        }
    });
}
