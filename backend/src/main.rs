use std::{error::Error, net::SocketAddr, sync::Arc};

use backend::{
    AppState,
    config::{RoutingConfig, bind_addr},
    create_router,
    routing::OpenRouteServiceClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RoutingConfig::from_env()?;
    tracing::info!("routing through {}", config.directions_url());
    let client = OpenRouteServiceClient::new(config)?;

    let state = AppState {
        router: Arc::new(client),
    };
    let app = create_router(state);

    let addr: SocketAddr = bind_addr().parse()?;
    tracing::info!("starting backend on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
