pub mod config;
pub mod error;
pub mod state;
pub mod routes;
pub mod site;
pub mod sheets;
pub mod email;
pub mod submission;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::email::{Notifier, SmtpMailer};
use crate::sheets::google::GoogleSheet;
use crate::sheets::SheetStore;
use crate::state::{AppState, SharedState};

/// Wire the production collaborators from config. Missing pieces are logged and left
/// empty; the intake pipeline reports them per request.
pub fn build_state(config: Config) -> SharedState {
    let sheet = config.sheet.clone().and_then(|sheet_config| {
        match GoogleSheet::new(sheet_config) {
            Ok(sheet) => {
                tracing::info!("Spreadsheet {} configured", sheet.id());
                Some(Arc::new(sheet) as Arc<dyn SheetStore>)
            }
            Err(e) => {
                tracing::warn!("Spreadsheet not available: {e}");
                None
            }
        }
    });
    if config.sheet.is_none() {
        tracing::warn!("SHEET_ID not set; submissions will be rejected");
    }

    let notifier = config.smtp.as_ref().and_then(|smtp| match SmtpMailer::new(smtp) {
        Ok(mailer) => {
            tracing::info!("SMTP configured");
            Some(Arc::new(mailer) as Arc<dyn Notifier>)
        }
        Err(e) => {
            tracing::warn!("SMTP not available: {e}");
            None
        }
    });

    Arc::new(AppState {
        config,
        sheet,
        notifier,
    })
}

pub fn build_app(state: SharedState) -> Router {
    let site = site::router(&state.config.site_root);

    Router::new()
        .merge(routes::intake_routes(&state.config))
        .route("/health", axum::routing::get(health))
        .merge(site)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(site::handle_panic))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-xss-protection"),
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
