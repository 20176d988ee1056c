pub mod intake;

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::post;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

use crate::config::Config;
use crate::site;
use crate::state::SharedState;

pub fn intake_routes(config: &Config) -> Router<SharedState> {
    let origin = match config.cors_origin.as_str() {
        "*" => AllowOrigin::any(),
        origin => match HeaderValue::from_str(origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{origin}': {e}");
                AllowOrigin::any()
            }
        },
    };

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    Router::new()
        .route(
            &config.intake_path,
            post(intake::submit).get_service(site::index_service(&config.site_root)),
        )
        .layer(RequestBodyLimitLayer::new(config.max_body_size))
        .layer(cors)
}
