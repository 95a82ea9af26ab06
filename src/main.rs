use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use hotel_scout::config::Settings;
use hotel_scout::routes::{self, AppState};
use hotel_scout::services::{load_catalog, IpGeolocationClient, SessionStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration; logging falls back to defaults if it fails
    let loaded = Settings::load();
    let logging = loaded
        .as_ref()
        .map(|settings| settings.logging.clone())
        .unwrap_or_default();

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }

    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    info!("Starting Hotel Scout discovery service...");

    let catalog = match load_catalog(&settings.catalog.path, settings.catalog.granularity).await {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            error!("Failed to load catalog: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()));
        }
    };

    let options = settings.session_options();
    let sessions = Arc::new(SessionStore::new(
        Arc::clone(&catalog),
        options,
        settings.sessions.max_sessions,
        Duration::from_secs(settings.sessions.idle_secs),
    ));

    info!(
        "Session store initialized (max: {}, idle: {}s, default radius: {} km)",
        settings.sessions.max_sessions, settings.sessions.idle_secs, options.default_radius_km
    );

    // IP lookup is optional; without it "near me" relies on the browser alone
    let ip_lookup = match &settings.geolocation.ip_lookup_url {
        Some(url) => match IpGeolocationClient::new(url.clone(), Duration::from_secs(settings.geolocation.timeout_secs)) {
            Ok(client) => {
                info!("IP geolocation fallback enabled: {}", url);
                Some(Arc::new(client))
            }
            Err(e) => {
                warn!("Failed to build IP geolocation client ({}), fallback disabled", e);
                None
            }
        },
        None => None,
    };

    // Build application state
    let app_state = AppState {
        catalog,
        sessions,
        ip_lookup,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(routes::configure_payloads)
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
