use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::routing::get;
use whereami::Resolver;

use crate::payload::Payload;

/// Router exposing `GET /geo/{address}` over a shared resolver.
pub fn router(resolver: Arc<Resolver>) -> Router {
    Router::new()
        .route("/geo/{address}", get(geo))
        .with_state(resolver)
}

async fn geo(State(resolver): State<Arc<Resolver>>, Path(address): Path<String>) -> Payload {
    let outcome = resolver.resolve(&address).await;
    match &outcome {
        Ok(hit) => tracing::info!(provider = %hit.provider, "resolved"),
        Err(e) => tracing::warn!(code = e.code(), error = %e, "resolution failed"),
    }
    Payload::from_outcome(&outcome)
}

/// Bind `addr` and serve until ctrl-c.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, resolver: Arc<Resolver>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("whereami listening on http://{local_addr}");
    axum::serve(listener, router(resolver))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
