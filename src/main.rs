// src/main.rs
use actix_web::{
    middleware::{Compress, DefaultHeaders, Logger},
    web, App, HttpServer,
};
use actix_files::Files;
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api_client;
mod assist_handlers;
mod config;
mod dashboard;
mod error;
mod forms;
mod inventory;
mod inventory_handlers;
mod models;
mod monitoring;
mod order_handlers;
mod orders;
mod session;
mod views;

#[cfg(test)]
mod test_support;

use api_client::BackendClient;
use config::{load_config, Config};
use inventory_handlers::{dashboard_page, delete_entity, detail_panel, form_page, submit_form, table_fragment};
use models::{Chemical, Equipment};
use monitoring::{Metrics, RequestLogger};
use orders::SubmissionGuard;
use session::SessionContext;

pub struct AppState {
    pub session: SessionContext,
    pub config: Config,
    /// One-time tokens for order creation.
    pub order_guard: SubmissionGuard,
}

impl AppState {
    pub fn new(client: BackendClient, config: Config) -> Self {
        Self {
            session: SessionContext::new(client),
            config,
            order_guard: SubmissionGuard::default(),
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check and metrics
        .service(
            web::scope("/health")
                .route("", web::get().to(monitoring::health_check))
                .route("/live", web::get().to(monitoring::liveness_check))
                .route("/ready", web::get().to(monitoring::readiness_check))
                .route("/metrics", web::get().to(monitoring::metrics_endpoint)),
        )

        // Chemicals
        .route("/", web::get().to(dashboard_page::<Chemical>))
        .route("/chemicals", web::get().to(dashboard_page::<Chemical>))
        .route("/form.html", web::get().to(form_page::<Chemical>))
        .route("/form.html", web::post().to(submit_form::<Chemical>))
        .route("/chemicals/{id}/delete", web::post().to(delete_entity::<Chemical>))
        .route("/fragments/chemicals/table", web::get().to(table_fragment::<Chemical>))
        .route("/fragments/chemicals/{id}", web::get().to(detail_panel::<Chemical>))

        // Equipment
        .route("/equipment", web::get().to(dashboard_page::<Equipment>))
        .route("/equipment/form", web::get().to(form_page::<Equipment>))
        .route("/equipment/form", web::post().to(submit_form::<Equipment>))
        .route("/equipment/{id}/delete", web::post().to(delete_entity::<Equipment>))
        .route("/fragments/equipment/table", web::get().to(table_fragment::<Equipment>))
        .route("/fragments/equipment/{id}", web::get().to(detail_panel::<Equipment>))

        // Orders
        .route("/orders", web::get().to(order_handlers::orders_page))
        .route("/orders", web::post().to(order_handlers::submit_order))
        .route("/orders/new", web::get().to(order_handlers::new_order_page))
        .route("/orders/{id}/edit", web::get().to(order_handlers::edit_order_page))
        .route("/orders/{id}/delete", web::post().to(order_handlers::delete_order))

        // Assisted features
        .route("/fragments/ai-search", web::post().to(assist_handlers::ai_search_fragment))
        .route("/fragments/hazards", web::get().to(assist_handlers::hazard_fragment))
        .route("/fragments/ai-lookup", web::post().to(assist_handlers::lookup_fragment))

        .service(Files::new("/static", "static"));
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (this calls load_env_file internally)
    let config = load_config()?;

    setup_logging(&config)?;
    config.print_startup_info();

    let client = BackendClient::new(&config.backend)
        .context("Failed to build backend client")?;
    let app_state = Arc::new(AppState::new(client, config.clone()));

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    log::info!("Starting server at http://{}", bind_address);

    let metrics_arc = Arc::new(Metrics::new());
    let metrics = web::Data::from(metrics_arc.clone());
    let security = config.security.clone();

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(setup_security_headers(&security))
            .wrap(Logger::default())
            .wrap(Compress::default())
            .wrap(RequestLogger::new(metrics_arc.clone()))
            .app_data(web::Data::new(app_state.clone()))
            .app_data(metrics.clone())
            .configure(configure_routes)
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive));

    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server failed to run")?;

    Ok(())
}

fn setup_logging(config: &Config) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let level = config.logging.level.as_str();
            tracing_subscriber::EnvFilter::new(level)
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

fn setup_security_headers(config: &config::SecurityConfig) -> DefaultHeaders {
    let mut headers = DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
        .add(("X-XSS-Protection", "1; mode=block"))
        .add(("Referrer-Policy", "strict-origin-when-cross-origin"));

    if config.require_https {
        headers = headers.add((
            "Strict-Transport-Security",
            "max-age=31536000; includeSubDomains; preload"
        ));
    }

    headers
}
