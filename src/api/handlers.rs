use axum::extract::{OriginalUri, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::api::json::ListingBody;
use crate::api::AppState;
use crate::error::AppError;
use crate::models::{NewProperty, Property, PropertyId, PropertyUpdate};

pub const HEALTH_MESSAGE: &str = "Real Estate API is running!";
pub const DELETED_MESSAGE: &str = "Property deleted successfully";

/// Plain `{"message": ...}` response body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

fn parse_id(raw: &str) -> Result<PropertyId, AppError> {
    raw.parse::<PropertyId>().map_err(AppError::from)
}

pub async fn health() -> Json<MessageResponse> {
    MessageResponse::new(HEALTH_MESSAGE)
}

#[instrument(skip(state))]
pub async fn list_properties(
    State(state): State<AppState>,
) -> Result<Json<Vec<Property>>, AppError> {
    let properties = state.store.list().await?;
    Ok(Json(properties))
}

#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_property(
    State(state): State<AppState>,
    ListingBody(payload): ListingBody<NewProperty>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let property = state.store.create(payload).await?;
    info!("Property saved: {} ({})", property.title, property.id);

    Ok((StatusCode::CREATED, Json(property)))
}

#[instrument(skip(state, payload))]
pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ListingBody(payload): ListingBody<PropertyUpdate>,
) -> Result<Json<Property>, AppError> {
    let id = parse_id(&id)?;
    payload.validate()?;

    let property = state.store.update(id, payload).await?;
    Ok(Json(property))
}

#[instrument(skip(state))]
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;

    if state.store.delete(id).await? {
        info!("Property {} deleted", id);
    } else {
        info!("Property {} was already absent", id);
    }

    Ok(MessageResponse::new(DELETED_MESSAGE))
}

/// Unknown paths under `/api` answer with a JSON 404, never the web client
pub async fn api_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("No API route for {}", uri.path()))
}
