pub mod config;
pub mod error;
pub mod models;
pub mod routing;

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::RoutingError;
use crate::models::{ApiError, RouteRequest, RouteResponse};
use crate::routing::RoutingService;

pub struct AppState<R> {
    pub router: Arc<R>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
        }
    }
}

pub fn create_router<R: RoutingService>(state: AppState<R>) -> Router {
    Router::new()
        .route("/api/route", post(route_handler::<R>))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_handler<R: RoutingService>(
    State(state): State<AppState<R>>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, (StatusCode, Json<ApiError>)> {
    if !req.start.is_valid() || !req.end.is_valid() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!(
                "coordinates out of range: start={:?} end={:?}",
                req.start, req.end
            ),
        ));
    }

    tracing::info!("Route request: {:?} -> {:?}", req.start, req.end);
    let path = state
        .router
        .route(req.start, req.end)
        .await
        .map_err(routing_error)?;

    Ok(Json(RouteResponse { path }))
}

fn routing_error(err: RoutingError) -> (StatusCode, Json<ApiError>) {
    tracing::error!("Routing API error: {err}");
    api_error(StatusCode::BAD_GATEWAY, err.to_string())
}

fn api_error(status: StatusCode, message: String) -> (StatusCode, Json<ApiError>) {
    (status, Json(ApiError { message }))
}
