use axum::extract::{Path, Query};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::server::error::{ApiError, ApiErrorResponse};

pub const CAD_ASSISTANT: &str = "cad-assistant";

#[derive(Debug, Serialize, ToSchema)]
pub struct PromptArgumentInfo {
    pub name: String,
    pub description: String,
    pub required: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PromptInfo {
    pub name: String,
    pub description: String,
    pub arguments: Vec<PromptArgumentInfo>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PromptListResponse {
    pub prompts: Vec<PromptInfo>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PromptMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PromptResponse {
    pub description: String,
    pub messages: Vec<PromptMessage>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PromptQuery {
    /// Drawing task to embed in the prompt.
    pub task: Option<String>,
}

fn cad_assistant_info() -> PromptInfo {
    PromptInfo {
        name: CAD_ASSISTANT.to_string(),
        description: "CAD assistant system prompt for natural language drawing control".to_string(),
        arguments: vec![PromptArgumentInfo {
            name: "task".to_string(),
            description: "The drawing task to accomplish".to_string(),
            required: false,
        }],
    }
}

/// Renders the assistant prompt. An empty task counts as no task.
pub fn render_cad_assistant(task: Option<&str>) -> String {
    let closing = match task.filter(|task| !task.is_empty()) {
        Some(task) => format!("Current task: {task}"),
        None => "Waiting for drawing instructions...".to_string(),
    };
    format!(
        "You are a CAD assistant that creates drawings from natural language commands.

You can:
- Draw basic shapes: lines, circles, arcs, ellipses, rectangles, polylines
- Add text and dimensions
- Create hatch patterns for fills
- Save drawings to DWG files

When the user describes what to draw, call the matching tools to create the entities.

Coordinate system:
- Use (x, y) or (x, y, z) coordinates
- Positive X is right, positive Y is up
- Angles are in degrees, counter-clockwise from the positive X axis

Colors (0-255 index):
- 1: Red, 2: Yellow, 3: Green, 4: Cyan, 5: Blue, 6: Magenta, 7: White

{closing}"
    )
}

#[utoipa::path(
    get,
    path = "/prompts",
    tag = "prompts",
    responses((status = 200, body = PromptListResponse)),
    description = "List the prompt templates the server offers."
)]
pub(crate) async fn list_prompts() -> Json<PromptListResponse> {
    Json(PromptListResponse {
        prompts: vec![cad_assistant_info()],
    })
}

#[utoipa::path(
    get,
    path = "/prompts/{name}",
    tag = "prompts",
    params(
        ("name" = String, Path, description = "Prompt name"),
        PromptQuery,
    ),
    responses(
        (status = 200, body = PromptResponse),
        (status = 404, body = ApiErrorResponse),
    ),
    description = "Render one prompt template."
)]
pub(crate) async fn get_prompt(
    Path(name): Path<String>,
    Query(query): Query<PromptQuery>,
) -> Result<Json<PromptResponse>, ApiError> {
    if name != CAD_ASSISTANT {
        return Err(ApiError::not_found(format!("Unknown prompt: {name}")));
    }
    Ok(Json(PromptResponse {
        description: "CAD assistant for natural language control".to_string(),
        messages: vec![PromptMessage {
            role: "user".to_string(),
            content: render_cad_assistant(query.task.as_deref()),
        }],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_is_appended() {
        let prompt = render_cad_assistant(Some("draw a floor plan"));
        assert!(prompt.starts_with("You are a CAD assistant"));
        assert!(prompt.ends_with("Current task: draw a floor plan"));
    }

    #[test]
    fn missing_or_empty_task_waits() {
        for task in [None, Some("")] {
            assert!(render_cad_assistant(task).ends_with("Waiting for drawing instructions..."));
        }
    }

    #[test]
    fn listing_declares_optional_task() {
        let info = cad_assistant_info();
        assert_eq!(info.name, "cad-assistant");
        assert_eq!(info.arguments.len(), 1);
        assert!(!info.arguments[0].required);
    }
}
