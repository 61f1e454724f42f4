//! Drawing tool definitions.

use serde_json::{json, Value};

use super::registry::ToolRegistry;
use super::schema::ToolDefinition;
use crate::dispatch::SAVE_TOOL;
use crate::error::CoreError;

pub const PROCESS_COMMAND_TOOL: &str = "process_command";

fn point_schema(description: &str) -> Value {
    json!({
        "type": "array",
        "items": {"type": "number"},
        "minItems": 2,
        "maxItems": 3,
        "description": description,
    })
}

fn points_schema(min_items: u64, description: &str) -> Value {
    json!({
        "type": "array",
        "items": point_schema("Point coordinates [x, y] or [x, y, z]"),
        "minItems": min_items,
        "description": description,
    })
}

/// Object schema with the shared `layer`/`color`/`lineweight` properties.
fn entity_schema(mut properties: Value, required: &[&str], with_lineweight: bool) -> Value {
    if let Some(map) = properties.as_object_mut() {
        map.insert(
            "layer".to_string(),
            json!({"type": "string", "description": "Layer name (optional)"}),
        );
        map.insert(
            "color".to_string(),
            json!({
                "type": "integer",
                "minimum": 0,
                "maximum": 255,
                "description": "Color index 0-255 (optional)",
            }),
        );
        if with_lineweight {
            map.insert(
                "lineweight".to_string(),
                json!({
                    "type": "integer",
                    "description": "Line weight in hundredths of mm (optional)",
                }),
            );
        }
    }
    json!({"type": "object", "properties": properties, "required": required})
}

fn service_tool(name: &'static str, description: &str, input_schema: Value) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
        handler: Box::new(move |arguments, service| service.invoke(name, arguments)),
    }
}

/// Every tool the server exposes, in listing order.
pub fn drawing_tools() -> Vec<ToolDefinition> {
    vec![
        service_tool(
            "draw_line",
            "Draw a straight line between two points",
            entity_schema(
                json!({
                    "start": point_schema("Start point coordinates [x, y] or [x, y, z]"),
                    "end": point_schema("End point coordinates [x, y] or [x, y, z]"),
                }),
                &["start", "end"],
                true,
            ),
        ),
        service_tool(
            "draw_circle",
            "Draw a circle with specified center and radius",
            entity_schema(
                json!({
                    "center": point_schema("Center point coordinates [x, y] or [x, y, z]"),
                    "radius": {"type": "number", "minimum": 0, "description": "Circle radius"},
                }),
                &["center", "radius"],
                true,
            ),
        ),
        service_tool(
            "draw_arc",
            "Draw an arc with specified center, radius, and angles",
            entity_schema(
                json!({
                    "center": point_schema("Center point coordinates [x, y] or [x, y, z]"),
                    "radius": {"type": "number", "minimum": 0, "description": "Arc radius"},
                    "start_angle": {"type": "number", "description": "Start angle in degrees"},
                    "end_angle": {"type": "number", "description": "End angle in degrees"},
                }),
                &["center", "radius", "start_angle", "end_angle"],
                true,
            ),
        ),
        service_tool(
            "draw_ellipse",
            "Draw an ellipse with specified center, axes, and rotation",
            entity_schema(
                json!({
                    "center": point_schema("Center point coordinates [x, y] or [x, y, z]"),
                    "major_axis": {
                        "type": "number",
                        "minimum": 0,
                        "description": "Length of major axis",
                    },
                    "minor_axis": {
                        "type": "number",
                        "minimum": 0,
                        "description": "Length of minor axis",
                    },
                    "rotation": {
                        "type": "number",
                        "default": 0,
                        "description": "Rotation angle in degrees (optional)",
                    },
                }),
                &["center", "major_axis", "minor_axis"],
                true,
            ),
        ),
        service_tool(
            "draw_polyline",
            "Draw a polyline through multiple points",
            entity_schema(
                json!({
                    "points": points_schema(2, "List of points"),
                    "closed": {
                        "type": "boolean",
                        "default": false,
                        "description": "Close the polyline (optional)",
                    },
                }),
                &["points"],
                true,
            ),
        ),
        service_tool(
            "draw_rectangle",
            "Draw a rectangle defined by two corner points",
            entity_schema(
                json!({
                    "corner1": point_schema("First corner [x, y] or [x, y, z]"),
                    "corner2": point_schema("Opposite corner [x, y] or [x, y, z]"),
                }),
                &["corner1", "corner2"],
                true,
            ),
        ),
        service_tool(
            "draw_text",
            "Add text at a specified position",
            entity_schema(
                json!({
                    "position": point_schema("Insertion point [x, y] or [x, y, z]"),
                    "text": {"type": "string", "description": "Text content"},
                    "height": {
                        "type": "number",
                        "default": 2.5,
                        "minimum": 0,
                        "description": "Text height (optional)",
                    },
                    "rotation": {
                        "type": "number",
                        "default": 0,
                        "description": "Rotation angle in degrees (optional)",
                    },
                }),
                &["position", "text"],
                false,
            ),
        ),
        service_tool(
            "draw_hatch",
            "Create a hatch pattern fill within a boundary",
            entity_schema(
                json!({
                    "boundary_points": points_schema(3, "Boundary points"),
                    "pattern_name": {
                        "type": "string",
                        "default": "SOLID",
                        "description": "Hatch pattern name (optional)",
                    },
                    "pattern_scale": {
                        "type": "number",
                        "default": 1.0,
                        "minimum": 0,
                        "description": "Pattern scale (optional)",
                    },
                }),
                &["boundary_points"],
                false,
            ),
        ),
        service_tool(
            "add_dimension",
            "Add a linear dimension annotation",
            entity_schema(
                json!({
                    "start": point_schema("Dimension start point"),
                    "end": point_schema("Dimension end point"),
                    "text_position": point_schema("Dimension text position"),
                }),
                &["start", "end", "text_position"],
                false,
            ),
        ),
        service_tool(
            SAVE_TOOL,
            "Save the current drawing to a DWG file",
            json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Target path; relative paths land in the output directory",
                    },
                },
                "required": ["file_path"],
            }),
        ),
        ToolDefinition {
            name: PROCESS_COMMAND_TOOL.to_string(),
            description: "Process a natural language command, e.g. \
                          'draw a red circle at (100, 100) with radius 50'"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "command": {
                        "type": "string",
                        "description": "Natural language command (English, Italian, or Chinese)",
                    },
                },
                "required": ["command"],
            }),
            handler: Box::new(|arguments, service| {
                let command = arguments
                    .get("command")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        CoreError::InvalidInput("missing required field: 'command'".to_string())
                    })?;
                Ok(service.process_command(command))
            }),
        },
    ]
}

pub fn register_drawing_tools(registry: &mut ToolRegistry) {
    for tool in drawing_tools() {
        registry.register(tool);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::schema::validate_schema;

    #[test]
    fn eleven_tools_in_listing_order() {
        let mut registry = ToolRegistry::new();
        register_drawing_tools(&mut registry);
        assert_eq!(
            registry.names(),
            vec![
                "draw_line",
                "draw_circle",
                "draw_arc",
                "draw_ellipse",
                "draw_polyline",
                "draw_rectangle",
                "draw_text",
                "draw_hatch",
                "add_dimension",
                "save_drawing",
                "process_command",
            ]
        );
    }

    #[test]
    fn text_and_hatch_have_no_lineweight() {
        for tool in drawing_tools() {
            let has_lineweight = tool.input_schema["properties"].get("lineweight").is_some();
            let expected = !matches!(
                tool.name.as_str(),
                "draw_text" | "draw_hatch" | "add_dimension" | "save_drawing" | "process_command"
            );
            assert_eq!(has_lineweight, expected, "{}", tool.name);
        }
    }

    #[test]
    fn polyline_schema_checks_nested_points() {
        let tool = drawing_tools()
            .into_iter()
            .find(|tool| tool.name == "draw_polyline")
            .expect("polyline tool");
        let ok = json!({"points": [[0, 0], [1, 1, 1]]});
        let bad = json!({"points": [[0, 0], [1, 1, 1, 1]]});
        assert!(validate_schema(&ok, &tool.input_schema).is_ok());
        assert!(validate_schema(&bad, &tool.input_schema).is_err());
    }
}
