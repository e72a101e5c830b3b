use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::{RwLock, watch};
use tracing::{info, warn};

use crate::{
    DashboardError,
    dashboard::{Dashboard, DashboardSnapshot},
    geocode::{GeocodingClient, LocationInput},
    models::AddressContext,
};

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<RwLock<Dashboard>>,
    pub address_tx: watch::Sender<AddressContext>,
    pub geocoder: Arc<GeocodingClient>,
}

/// Body of `POST /api/address`: a city name or a coordinate pair
#[derive(Debug, Serialize, Deserialize)]
pub struct AddressRequest {
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl AddressRequest {
    fn into_input(self) -> Result<LocationInput, DashboardError> {
        match (self.latitude, self.longitude, self.city) {
            (Some(lat), Some(lon), _) => Ok(LocationInput::Coordinates(lat, lon)),
            (None, None, Some(city)) => Ok(LocationInput::Name(city)),
            _ => Err(DashboardError::validation(
                "Provide either a city or both latitude and longitude",
            )),
        }
    }
}

pub struct ApiError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(error: E) -> Self {
        Self(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let domain = self.0.downcast_ref::<DashboardError>();
        let status = match domain {
            Some(DashboardError::Validation { .. }) => StatusCode::BAD_REQUEST,
            Some(DashboardError::Api { .. }) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = domain.map_or_else(|| format!("{:#}", self.0), DashboardError::user_message);
        if status.is_server_error() {
            warn!("Request failed: {:#}", self.0);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/address", post(set_address))
        .route("/days/{index}/select", post(select_day))
        .route("/days/toggle", post(toggle_days))
        .route("/health", get(health))
        .with_state(state)
}

async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(state.dashboard.read().await.snapshot(Utc::now()))
}

async fn set_address(
    State(state): State<AppState>,
    Json(request): Json<AddressRequest>,
) -> Result<(StatusCode, Json<AddressContext>), ApiError> {
    let input = request.into_input()?;
    let address = state.geocoder.resolve(input).await?;
    info!(
        city = address.city_name().unwrap_or_default(),
        "Address changed"
    );
    state.address_tx.send_replace(address.clone());
    Ok((StatusCode::ACCEPTED, Json(address)))
}

async fn select_day(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    let mut dashboard = state.dashboard.write().await;
    dashboard.select_day(index)?;
    Ok(Json(dashboard.snapshot(Utc::now())))
}

async fn toggle_days(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    let mut dashboard = state.dashboard.write().await;
    dashboard.toggle_days_visibility();
    Json(dashboard.snapshot(Utc::now()))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": crate::VERSION }))
}
