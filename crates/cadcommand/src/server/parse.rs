use axum::extract::rejection::JsonRejection;
use axum::Json;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use cadcommand_nlp::{parse_command as parse_text, ParsedCommand};

use crate::server::error::{ApiError, ApiErrorResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ParseRequest {
    pub command: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchParseRequest {
    pub commands: Vec<String>,
}

/// Wire form of a parsed command.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiParsedCommand {
    pub action: String,
    pub shape: Option<String>,
    /// Shape parameters; points are `[x, y]` arrays.
    #[schema(value_type = Object)]
    pub parameters: serde_json::Value,
    pub raw_text: String,
    pub confidence: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BatchParseResponse {
    pub results: Vec<ApiParsedCommand>,
}

impl From<ParsedCommand> for ApiParsedCommand {
    fn from(parsed: ParsedCommand) -> Self {
        let parameters = serde_json::to_value(&parsed.parameters)
            .unwrap_or_else(|_| serde_json::Value::Object(Default::default()));
        Self {
            action: parsed.action.to_string(),
            shape: parsed.shape.map(|shape| shape.to_string()),
            parameters,
            raw_text: parsed.raw_text,
            confidence: parsed.confidence,
        }
    }
}

#[utoipa::path(
    post,
    path = "/parse",
    tag = "parse",
    request_body = ParseRequest,
    responses(
        (status = 200, body = ApiParsedCommand),
        (status = 400, body = ApiErrorResponse),
    ),
    description = "Parse one freeform command without drawing it."
)]
pub(crate) async fn parse_command(
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> Result<Json<ApiParsedCommand>, ApiError> {
    let Json(payload) = payload?;
    Ok(Json(parse_text(&payload.command).into()))
}

#[utoipa::path(
    post,
    path = "/parse/batch",
    tag = "parse",
    request_body = BatchParseRequest,
    responses(
        (status = 200, body = BatchParseResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 500, body = ApiErrorResponse),
    ),
    description = "Parse many commands in parallel; results keep input order."
)]
#[tracing::instrument(skip_all)]
pub(crate) async fn parse_batch(
    payload: Result<Json<BatchParseRequest>, JsonRejection>,
) -> Result<Json<BatchParseResponse>, ApiError> {
    let Json(payload) = payload?;
    let results = tokio::task::spawn_blocking(move || {
        payload
            .commands
            .par_iter()
            .map(|command| ApiParsedCommand::from(parse_text(command)))
            .collect::<Vec<_>>()
    })
    .await
    .map_err(|error| ApiError::internal(format!("batch parse failed: {error}")))?;

    Ok(Json(BatchParseResponse { results }))
}
