use std::net::SocketAddr;

use anyhow::Result;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Router};
use msk_discovery::SdClient;
use tracing::{info, warn};

/// Serve http_sd on `0.0.0.0:<port>`. Every request performs its own full
/// fresh discovery; there is no cache or lock shared between requests.
pub async fn exec(client: SdClient, port: u16) -> Result<()> {
    let app = Router::new()
        .route("/", get(discover))
        .layer(Extension(client));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("http service discovery listening on {addr}");

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

/// handler for HTTP-based service discovery for prometheus
async fn discover(Extension(client): Extension<SdClient>) -> Response {
    let entries = match client.discover_all_regions().await {
        Ok(entries) => entries,
        Err(err) => {
            warn!(region = %err.region, error = %err, "discovery failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        },
    };

    match serde_yaml::to_string(&entries) {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(err) => {
            warn!(error = %err, "failed to serialize discovery output");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        },
    }
}
