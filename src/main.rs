use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use std::sync::Arc;

use attendance_dashboard::{
    config::Config,
    docs::ApiDoc,
    routes,
    services::{poller::Poller, reconcile::IdentityMap},
    source::{backend::BackendClient, sheets::SheetsSource},
};

use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()?;
    let source = SheetsSource::new(client.clone(), &config);
    // Not polled; available to handlers that proxy an external backend
    let backend = BackendClient::from_config(client, &config);
    let poller = Arc::new(Poller::new(
        Arc::new(source),
        IdentityMap::new(config.identity_policy),
        config.overlap_policy,
    ));
    info!(
        identity_policy = %config.identity_policy,
        overlap_policy = %config.overlap_policy,
        "Poller configured"
    );

    // Timer lives as long as the server; dropped (and cancelled) on every exit path
    let poll_task = poller.start(config.poll_interval);

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::from(poller.clone()))
            .app_data(Data::new(config.clone()))
            .app_data(Data::new(backend.clone()))
            .configure(|cfg| routes::configure(cfg, &config_data))
    })
    .bind(server_addr)?
    .run()
    .await?;

    poll_task.cancel();
    info!("Server stopped");
    Ok(())
}
