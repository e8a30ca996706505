use std::net::SocketAddr;
use std::path::Path;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Json, Response},
    routing::{any, get},
    Router,
};
use serde_json::json;
use time::OffsetDateTime;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::state::AppState;
use crate::{auth, catalog, reviews, watchlater};

pub fn build_app(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth::router())
        .merge(catalog::router())
        .merge(reviews::router())
        .merge(watchlater::router())
        .route("/ping", get(ping))
        .fallback(api_not_found);

    // Static assets are served straight from the public dir; whatever the
    // file system misses lands in the SPA fallback.
    let static_files = ServeDir::new(&state.config.public_dir)
        .not_found_service(any(spa_entry).with_state(state.clone()));

    Router::new()
        .nest("/api", api)
        .fallback_service(static_files)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

async fn ping() -> Json<serde_json::Value> {
    let ts = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
    Json(json!({ "ok": true, "ts": ts }))
}

async fn api_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Ruta API no encontrada" })),
    )
        .into_response()
}

/// Unmatched `.html` paths are a hard 404 (the file was already looked for);
/// anything else falls back to the single-page entry document.
async fn spa_entry(State(state): State<AppState>, uri: Uri) -> Response {
    if uri.path().ends_with(".html") {
        return (StatusCode::NOT_FOUND, "Página no encontrada").into_response();
    }

    let index = Path::new(&state.config.public_dir).join("index.html");
    match tokio::fs::read_to_string(&index).await {
        Ok(html) => Html(html).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Página no encontrada").into_response(),
    }
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "3000".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn body_string(res: Response) -> String {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn ping_answers_ok() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(Request::builder().uri("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_string(res).await;
        assert!(body.contains("\"ok\":true"));
    }

    #[tokio::test]
    async fn unknown_api_route_is_json_404() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/api/no-existe")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = body_string(res).await;
        assert!(body.contains("Ruta API no encontrada"));
    }

    #[tokio::test]
    async fn missing_html_page_is_plain_404() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/no-existe.html")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = body_string(res).await;
        assert!(body.contains("Página no encontrada"));
    }

    #[tokio::test]
    async fn spa_fallback_404s_without_an_index() {
        // The fake state points at a public dir that does not exist, so the
        // entry document cannot be served either.
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(Request::builder().uri("/peliculas").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
