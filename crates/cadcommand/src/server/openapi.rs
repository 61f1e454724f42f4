use utoipa::OpenApi;

use crate::server::error::{ApiErrorBody, ApiErrorResponse};
use crate::server::parse::{ApiParsedCommand, BatchParseRequest, BatchParseResponse, ParseRequest};
use crate::server::prompts::{
    PromptArgumentInfo, PromptInfo, PromptListResponse, PromptMessage, PromptResponse,
};
use crate::server::state::ApiDrawingState;
use crate::server::tools::{CallToolRequest, ToolInfo, ToolListResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CAD Command API",
        version = "0.1.0",
        description = "Natural-language drawing commands for CAD applications"
    ),
    paths(
        crate::server::health,
        crate::server::tools::list_tools,
        crate::server::tools::call_tool,
        crate::server::parse::parse_command,
        crate::server::parse::parse_batch,
        crate::server::state::drawing_state,
        crate::server::prompts::list_prompts,
        crate::server::prompts::get_prompt,
    ),
    components(schemas(
        // Error
        ApiErrorResponse,
        ApiErrorBody,
        // Tools
        ToolInfo,
        ToolListResponse,
        CallToolRequest,
        // Parse
        ParseRequest,
        BatchParseRequest,
        ApiParsedCommand,
        BatchParseResponse,
        // Drawing
        ApiDrawingState,
        // Prompts
        PromptArgumentInfo,
        PromptInfo,
        PromptListResponse,
        PromptMessage,
        PromptResponse,
    )),
    tags(
        (name = "system", description = "Liveness"),
        (name = "tools", description = "Drawing tools"),
        (name = "parse", description = "Command parsing"),
        (name = "drawing", description = "Drawing state"),
        (name = "prompts", description = "Prompt templates"),
    )
)]
pub struct ApiDoc;
