use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::server::error::{ApiError, ApiErrorResponse};
use crate::server::ServerState;
use crate::service::DrawingSnapshot;

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiDrawingState {
    /// Drawn entities, oldest first.
    #[schema(value_type = Vec<Object>)]
    pub entities: Vec<serde_json::Value>,
    pub current_layer: String,
    pub last_command: String,
    pub last_result: String,
    pub entity_count: usize,
}

impl TryFrom<DrawingSnapshot> for ApiDrawingState {
    type Error = ApiError;

    fn try_from(snapshot: DrawingSnapshot) -> Result<Self, Self::Error> {
        let entities = snapshot
            .state
            .entities
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| ApiError::internal(error.to_string()))?;
        Ok(Self {
            entities,
            current_layer: snapshot.state.current_layer,
            last_command: snapshot.state.last_command,
            last_result: snapshot.state.last_result,
            entity_count: snapshot.entity_count,
        })
    }
}

#[utoipa::path(
    get,
    path = "/state",
    tag = "drawing",
    responses(
        (status = 200, body = ApiDrawingState),
        (status = 500, body = ApiErrorResponse),
    ),
    description = "Snapshot of everything drawn through this server."
)]
pub(crate) async fn drawing_state(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<ApiDrawingState>, ApiError> {
    let snapshot = state.service.state().map_err(ApiError::from)?;
    Ok(Json(ApiDrawingState::try_from(snapshot)?))
}
