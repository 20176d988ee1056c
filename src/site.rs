use std::any::Any;
use std::path::Path;

use axum::body::Body;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::{SetResponseHeader, SetResponseHeaderLayer};

use crate::error::SiteError;

pub const HTML_CACHE: &str = "public, max-age=300";
pub const ASSET_CACHE: &str = "public, max-age=86400";
pub const DEFAULT_CACHE: &str = "public, max-age=3600";

/// Static files under `root`; unmatched paths get `root/index.html` with 200.
pub fn router<S>(root: &Path) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let files = ServeDir::new(root)
        .append_index_html_on_directories(true)
        .fallback(index_service(root));

    Router::new()
        .fallback_service(files)
        .layer(axum::middleware::from_fn(finish_response))
}

/// `root/index.html` with the HTML cache policy, for paths owned by other routers.
pub fn index_service(root: &Path) -> SetResponseHeader<ServeFile, HeaderValue> {
    ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(HTML_CACHE),
        ))
        .service(ServeFile::new(root.join("index.html")))
}

/// Cache policy for a request path, chosen by its extension. Directory paths resolve
/// to an `index.html`.
pub fn cache_control_for(path: &str) -> &'static str {
    if path.ends_with('/') {
        return HTML_CACHE;
    }

    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some("html") => HTML_CACHE,
        Some("css") | Some("js") => ASSET_CACHE,
        _ => DEFAULT_CACHE,
    }
}

async fn finish_response(req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path().to_string();

    let mut response = next.run(req).await;
    let status = response.status();

    if status.is_server_error() {
        return SiteError::Internal(format!("site: {status} while serving {path}")).into_response();
    }

    if status.is_success() || status == StatusCode::NOT_MODIFIED {
        response
            .headers_mut()
            .entry(header::CACHE_CONTROL)
            .or_insert_with(|| HeaderValue::from_static(cache_control_for(&path)));
    } else {
        response.headers_mut().remove(header::CACHE_CONTROL);
    }

    response
}

/// Panic handler for `CatchPanicLayer`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    SiteError::Panic(detail).into_response()
}
