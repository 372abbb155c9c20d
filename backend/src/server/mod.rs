//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use migo_api::inbound::http::health::{HealthState, live, ready};
use migo_api::inbound::http::state::HttpState;
use migo_api::inbound::http::versioning::configure_api;
use migo_api::middleware::{BasicAuth, Trace};
use state_builders::build_http_state;
#[cfg(debug_assertions)]
use {
    migo_api::doc::{ApiDocV1, ApiDocV2},
    utoipa::OpenApi,
    utoipa_swagger_ui::SwaggerUi,
};

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    auth: BasicAuth,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        auth,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(|cfg| configure_api(cfg, auth))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}")
            .url("/api-docs/v1/openapi.json", ApiDocV1::openapi())
            .url("/api-docs/v2/openapi.json", ApiDocV2::openapi()),
    );

    app
}

/// Bind the HTTP server and mark the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        db_pool,
        auth,
    } = config;
    if !auth.is_enabled() {
        warn!("basic auth credentials not configured; /api is unauthenticated");
    }
    let http_state = build_http_state(db_pool.as_ref());
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            auth: auth.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;

    fn deps() -> AppDependencies {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: build_http_state(None),
            auth: BasicAuth::new("admin", "secret"),
        }
    }

    #[rstest]
    #[case("/health/ready", StatusCode::OK)]
    #[case("/health/live", StatusCode::OK)]
    #[case("/api/users", StatusCode::UNAUTHORIZED)]
    #[case("/api/v2/users", StatusCode::UNAUTHORIZED)]
    #[actix_web::test]
    async fn health_checks_bypass_auth_but_api_does_not(#[case] path: &str, #[case] expected: StatusCode) {
        let app = actix_test::init_service(build_app(deps())).await;
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(res.status(), expected);
        assert!(res.headers().contains_key("trace-id"));
    }
}
