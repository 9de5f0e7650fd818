//! ITAM Server - IT asset management
//!
//! Serves the REST API by default. The `depreciate` and `create-admin`
//! subcommands run one-off maintenance jobs against the same database.

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use clap::{Parser, Subcommand};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use itam_server::{
    api,
    config::{AppConfig, LoggingConfig},
    repository::Repository,
    services::{depreciation, Services},
    AppState,
};

/// IT asset management server
#[derive(Parser, Debug)]
#[command(name = "itam-server", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Recalculate the book value of every eligible asset once and exit
    Depreciate,
    /// Create an administrator, or promote an existing account
    CreateAdmin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging);

    tracing::info!("Starting ITAM Server v{}", env!("CARGO_PKG_VERSION"));

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    let repository = Repository::new(pool.clone());
    let services = Services::new(repository, &config)
        .await
        .context("Failed to create services")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, services, pool).await,
        Command::Depreciate => {
            let report = services.depreciation.run_now().await?;
            println!(
                "eligible={} updated={} failed={}",
                report.eligible, report.updated, report.failed
            );
            Ok(())
        }
        Command::CreateAdmin { email, name, password } => {
            let user = services.users.create_admin(&email, &name, &password).await?;
            println!("Administrator {} (id {}) is ready", user.email, user.id);
            Ok(())
        }
    }
}

/// Console output in the configured format, plus an optional daily log file.
///
/// The returned guard flushes the file writer and must live until exit.
fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("itam_server={},tower_http=info", logging.level).into());

    let console = if logging.format == "json" {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    let (file, guard) = match logging.directory.as_deref() {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "itam-server.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();

    guard
}

async fn serve(config: AppConfig, services: Services, pool: PgPool) -> anyhow::Result<()> {
    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let scheduler = config.depreciation.schedule_enabled.then(|| {
        depreciation::spawn_scheduler(
            services.depreciation.clone(),
            config.depreciation.interval_hours,
        )
    });

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
        pool,
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    if let Some(handle) = scheduler {
        handle.abort();
    }
    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/login", post(api::auth::login))
        .route("/logout", post(api::auth::logout))
        .route("/me", get(api::auth::me))
        // Assets; the static checkout/checkin paths win over `/assets/:id`
        .route(
            "/assets",
            get(api::assets::list_assets).post(api::assets::create_asset),
        )
        .route("/assets/checkout", post(api::transactions::checkout))
        .route("/assets/checkin", post(api::transactions::checkin))
        .route(
            "/assets/checkout/:history_id/handover",
            get(api::transactions::handover),
        )
        // Legacy path of the handover form
        .route(
            "/assets/checkout/:history_id/pdf",
            get(api::transactions::handover),
        )
        .route(
            "/assets/:id",
            get(api::assets::get_asset)
                .put(api::assets::update_asset)
                .delete(api::assets::delete_asset),
        )
        .route("/assets/:id/history", get(api::assets::asset_history))
        // Maintenance
        .route(
            "/maintenances",
            get(api::maintenances::list_maintenances).post(api::maintenances::create_maintenance),
        )
        .route(
            "/maintenances/:id",
            get(api::maintenances::get_maintenance)
                .put(api::maintenances::update_maintenance)
                .delete(api::maintenances::delete_maintenance),
        )
        // Master data
        .route(
            "/categories",
            get(api::categories::list_categories).post(api::categories::create_category),
        )
        .route(
            "/categories/:id",
            get(api::categories::get_category)
                .put(api::categories::update_category)
                .delete(api::categories::delete_category),
        )
        .route(
            "/manufacturers",
            get(api::manufacturers::list_manufacturers).post(api::manufacturers::create_manufacturer),
        )
        .route(
            "/manufacturers/:id",
            get(api::manufacturers::get_manufacturer)
                .put(api::manufacturers::update_manufacturer)
                .delete(api::manufacturers::delete_manufacturer),
        )
        .route(
            "/device-models",
            get(api::device_models::list_models).post(api::device_models::create_device_model),
        )
        .route(
            "/device-models/:id",
            get(api::device_models::get_device_model)
                .put(api::device_models::update_device_model)
                .delete(api::device_models::delete_device_model),
        )
        .route(
            "/status-labels",
            get(api::status_labels::list_labels).post(api::status_labels::create_status_label),
        )
        .route(
            "/status-labels/:id",
            get(api::status_labels::get_status_label)
                .put(api::status_labels::update_status_label)
                .delete(api::status_labels::delete_status_label),
        )
        // Organization
        .route(
            "/suppliers",
            get(api::suppliers::list_suppliers).post(api::suppliers::create_supplier),
        )
        .route(
            "/suppliers/:id",
            get(api::suppliers::get_supplier)
                .put(api::suppliers::update_supplier)
                .delete(api::suppliers::delete_supplier),
        )
        .route(
            "/locations",
            get(api::locations::list_locations).post(api::locations::create_location),
        )
        .route(
            "/locations/:id",
            get(api::locations::get_location)
                .put(api::locations::update_location)
                .delete(api::locations::delete_location),
        )
        .route(
            "/departments",
            get(api::departments::list_departments).post(api::departments::create_department),
        )
        .route(
            "/departments/:id",
            get(api::departments::get_department)
                .put(api::departments::update_department)
                .delete(api::departments::delete_department),
        )
        // Users
        .route(
            "/users",
            get(api::users::list_users).post(api::users::create_user),
        )
        .route(
            "/users/:id",
            get(api::users::get_user)
                .put(api::users::update_user)
                .delete(api::users::delete_user),
        )
        // Reporting
        .route("/dashboard-stats", get(api::dashboard::get_stats))
        .route("/depreciation/run", post(api::depreciation::run_depreciation))
        .with_state(state);

    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
