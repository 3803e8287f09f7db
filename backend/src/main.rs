use std::net::SocketAddr;

use axum::http::{header::HeaderName, HeaderValue, Method};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

use crate::rooms::{create_router as create_roulette_router, RoomRegistry};

mod logging;
mod rooms;

pub async fn health_check() -> impl IntoResponse {
    "OK"
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::setup();
    dotenvy::from_path(".env").ok();

    let registry = RoomRegistry::new();

    let cors = CorsLayer::new()
        .allow_origin(vec![
            "http://127.0.0.1:8080".parse::<HeaderValue>()?,
            "http://127.0.0.1:3000".parse::<HeaderValue>()?,
        ])
        .allow_methods(vec![Method::GET, Method::POST])
        .allow_headers(vec![HeaderName::from_static("content-type")]);

    // Built frontend bundle; the Activity iframe loads everything from here.
    let dist_dir = std::env::var("FRONTEND_DIST")
        .unwrap_or_else(|_| "../frontend/dist".to_string());
    let static_service = ServeDir::new(&dist_dir)
        .not_found_service(ServeFile::new(format!("{}/index.html", dist_dir)));

    let app = Router::new()
        .route("/api/health_check", get(health_check))
        .nest(
            "/roulette",
            create_roulette_router()
                .with_state(registry)
                .layer(cors),
        )
        .fallback_service(static_service);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;
    info!("listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
