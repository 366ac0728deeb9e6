//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use tokio::signal;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use address_api::Trace;
use address_api::doc::ApiDoc;
use address_api::inbound::http::addresses;
use address_api::inbound::http::error::unmatched_route;
use address_api::inbound::http::health::{HealthState, live, ready};
use address_api::inbound::http::state::HttpState;
use address_api::middleware::{ErrorMapping, RequestLogging};
use address_api::settings::{CorsOrigins, RuntimeMode};

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    mode: RuntimeMode,
    cors: CorsOrigins,
}

const CORS_MAX_AGE_SECS: usize = 3600;

fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
        .add(("Referrer-Policy", "no-referrer"))
}

fn cors_policy(origins: &CorsOrigins) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(CORS_MAX_AGE_SECS);
    match origins {
        CorsOrigins::Any => cors.allow_any_origin(),
        CorsOrigins::Listed(origins) => origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin)),
    }
}

// Actix runs the last `wrap` first: Trace scopes the id for everything
// below it and ErrorMapping sits closest to the handlers.
fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        mode,
        cors,
    } = deps;

    let api = web::scope("/api").configure(addresses::configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(ErrorMapping::new(mode))
        .wrap(security_headers())
        .wrap(Compress::default())
        .wrap(cors_policy(&cors))
        .wrap(RequestLogging)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    let app = if mode.is_development() {
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()))
    } else {
        app
    };

    app.default_service(web::to(unmatched_route))
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        bind_addr,
        mode,
        db_pool: _,
        cors,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            mode,
            cors: cors.clone(),
        })
    })
    .bind(bind_addr)?
    .disable_signals()
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Fail liveness checks, then stop the server once in-flight requests
/// complete.
pub async fn drain(health_state: &HealthState, handle: ServerHandle) {
    health_state.mark_unhealthy();
    info!("draining: liveness now fails, waiting for in-flight requests");
    handle.stop(true).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(%error, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C"),
        () = terminate => info!("received SIGTERM"),
    }
}

/// Drain the server when the process is asked to stop.
pub async fn drain_on_shutdown(health_state: web::Data<HealthState>, handle: ServerHandle) {
    shutdown_signal().await;
    drain(&health_state, handle).await;
}
