use crate::utility::shutdown::shutdown_signal;
use axum::Router;
use eyre::{Report, WrapErr};
use std::net::SocketAddr;

pub async fn serve(router: Router) -> Result<(), Report> {
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".into());

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| eyre::eyre!("Invalid bind address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("failed to bind {addr}"))?;

    tracing::info!("AgriTrack server listening on http://{}", addr);
    tracing::info!("API base URL: http://{}/api", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);

    // peer addresses feed the per-IP rate limiter
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}
