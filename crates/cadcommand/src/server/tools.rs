use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::server::error::{ApiError, ApiErrorResponse};
use crate::server::ServerState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    #[schema(value_type = Object)]
    pub input_schema: serde_json::Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToolListResponse {
    pub tools: Vec<ToolInfo>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CallToolRequest {
    pub name: String,
    #[serde(default = "empty_arguments")]
    #[schema(value_type = Object)]
    pub arguments: serde_json::Value,
}

fn empty_arguments() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}

#[utoipa::path(
    get,
    path = "/tools",
    tag = "tools",
    responses((status = 200, body = ToolListResponse)),
    description = "List every tool with its input schema, in registration order."
)]
pub(crate) async fn list_tools(State(state): State<Arc<ServerState>>) -> Json<ToolListResponse> {
    let tools = state
        .registry
        .tools()
        .iter()
        .map(|tool| ToolInfo {
            name: tool.name.clone(),
            description: tool.description.clone(),
            input_schema: tool.input_schema.clone(),
        })
        .collect();
    Json(ToolListResponse { tools })
}

#[utoipa::path(
    post,
    path = "/tools/call",
    tag = "tools",
    request_body = CallToolRequest,
    responses(
        (
            status = 200,
            description = "Tool result: `{success: true, ...}` or `{success: false, error}`"
        ),
        (status = 400, body = ApiErrorResponse),
        (status = 500, body = ApiErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub(crate) async fn call_tool(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<CallToolRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(payload) = payload?;
    let result = tokio::task::spawn_blocking(move || {
        crate::tools::call_tool(&state.registry, &state.service, &payload.name, &payload.arguments)
    })
    .await
    .map_err(|error| ApiError::internal(format!("tool call failed: {error}")))?;
    Ok(Json(result))
}
