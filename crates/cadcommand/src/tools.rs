pub mod drawing;
pub mod registry;
pub mod schema;

use serde_json::{json, Value};

use crate::service::{into_result, CadService};

pub use drawing::{drawing_tools, register_drawing_tools, PROCESS_COMMAND_TOOL};
pub use registry::ToolRegistry;
pub use schema::{validate_schema, ToolDefinition, ToolHandler};

/// Registry pre-populated with every drawing tool.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_drawing_tools(&mut registry);
    registry
}

/// Validates `arguments` against the tool's schema and runs it.
///
/// Never fails: unknown tools, schema violations, and handler errors all come
/// back as `{success: false, error}`.
#[tracing::instrument(skip_all, fields(tool = %name))]
pub fn call_tool(
    registry: &ToolRegistry,
    service: &CadService,
    name: &str,
    arguments: &Value,
) -> Value {
    let Some(tool) = registry.lookup(name) else {
        tracing::warn!("unknown tool requested");
        return json!({ "success": false, "error": format!("Unknown tool: {name}") });
    };

    if let Err(error) = validate_schema(arguments, &tool.input_schema) {
        return into_result(Err(error));
    }

    into_result((tool.handler)(arguments, service))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backend::MemoryBackend;
    use crate::config::{CadKind, Config};

    fn service() -> CadService {
        CadService::new(Config::default(), Arc::new(MemoryBackend::new(CadKind::Autocad)))
    }

    #[test]
    fn unknown_tool() {
        let result = call_tool(&default_registry(), &service(), "draw_spline", &json!({}));
        assert_eq!(result, json!({"success": false, "error": "Unknown tool: draw_spline"}));
    }

    #[test]
    fn schema_violations_do_not_reach_the_service() {
        let service = service();
        let result = call_tool(
            &default_registry(),
            &service,
            "draw_circle",
            &json!({"center": [0, 0, 0, 0], "radius": 5}),
        );
        assert_eq!(result["success"], false);
        assert_eq!(result["error"], "'center': expected at most 3 items, got 4");
        assert_eq!(service.state().expect("state").entity_count, 0);
    }

    #[test]
    fn draw_tool_succeeds() {
        let service = service();
        let result = call_tool(
            &default_registry(),
            &service,
            "draw_ellipse",
            &json!({"center": [5, 5], "major_axis": 20, "minor_axis": 10}),
        );
        assert_eq!(result["success"], true);
        assert_eq!(result["type"], "ellipse");
        assert_eq!(result["rotation"], 0.0);
    }

    #[test]
    fn process_command_failure_keeps_success_false() {
        let result = call_tool(
            &default_registry(),
            &service(),
            PROCESS_COMMAND_TOOL,
            &json!({"command": "gibberish"}),
        );
        assert_eq!(result["success"], false);
        assert_eq!(result["error"], "Could not understand command: gibberish");
    }

    #[test]
    fn process_command_success() {
        let result = call_tool(
            &default_registry(),
            &service(),
            PROCESS_COMMAND_TOOL,
            &json!({"command": "disegna una linea da (0,0) a (10,10)"}),
        );
        assert_eq!(result["success"], true, "{result}");
        assert_eq!(result["type"], "line");
        assert_eq!(result["end"], json!([10.0, 10.0, 0.0]));
    }
}
