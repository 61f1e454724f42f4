//! Maps parsed commands onto drawing tool invocations.

use serde::Serialize;
use serde_json::{json, Map, Value};

use cadcommand_nlp::{Action, CommandParser, ParsedCommand, Shape};

pub const SAVE_TOOL: &str = "save_drawing";

/// A tool name plus its JSON arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCall {
    pub name: &'static str,
    pub arguments: Value,
}

pub fn tool_name(shape: Shape) -> &'static str {
    match shape {
        Shape::Line => "draw_line",
        Shape::Circle => "draw_circle",
        Shape::Arc => "draw_arc",
        Shape::Ellipse => "draw_ellipse",
        Shape::Rectangle => "draw_rectangle",
        Shape::Polyline => "draw_polyline",
        Shape::Text => "draw_text",
        Shape::Hatch => "draw_hatch",
        Shape::Dimension => "add_dimension",
    }
}

/// Arguments used when a parsed command lacks a key.
fn default_arguments(shape: Shape) -> Value {
    match shape {
        Shape::Line => json!({"start": [0.0, 0.0], "end": [100.0, 100.0]}),
        Shape::Circle => json!({"center": [0.0, 0.0], "radius": 50.0}),
        Shape::Arc => json!({
            "center": [0.0, 0.0],
            "radius": 50.0,
            "start_angle": 0.0,
            "end_angle": 90.0
        }),
        Shape::Ellipse => json!({
            "center": [0.0, 0.0],
            "major_axis": 100.0,
            "minor_axis": 50.0,
            "rotation": 0.0
        }),
        Shape::Rectangle => json!({"corner1": [0.0, 0.0], "corner2": [100.0, 50.0]}),
        Shape::Polyline => json!({
            "points": [[0.0, 0.0], [50.0, 50.0], [100.0, 0.0]],
            "closed": false
        }),
        Shape::Text => json!({
            "position": [0.0, 0.0],
            "text": "Text",
            "height": 2.5,
            "rotation": 0.0
        }),
        Shape::Hatch => json!({
            "boundary_points": [[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]],
            "pattern_name": "SOLID",
            "pattern_scale": 1.0
        }),
        Shape::Dimension => json!({
            "start": [0.0, 0.0],
            "end": [100.0, 0.0],
            "text_position": [50.0, 10.0]
        }),
    }
}

/// Builds the tool call for a parsed command.
///
/// Save commands become `save_drawing` regardless of shape. Other actions
/// draw the recognised shape. Returns `None` when no shape was recognised.
pub fn tool_call_for(parsed: &ParsedCommand) -> Option<ToolCall> {
    if parsed.action == Action::Save {
        // Without an explicit path the service applies its configured default.
        let arguments = match CommandParser::new().save_path(&parsed.raw_text) {
            Some(file_path) => json!({ "file_path": file_path }),
            None => json!({}),
        };
        return Some(ToolCall {
            name: SAVE_TOOL,
            arguments,
        });
    }

    let shape = parsed.shape?;
    let mut arguments = match serde_json::to_value(&parsed.parameters) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    if let Value::Object(defaults) = default_arguments(shape) {
        for (key, value) in defaults {
            arguments.entry(key).or_insert(value);
        }
    }

    Some(ToolCall {
        name: tool_name(shape),
        arguments: Value::Object(arguments),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadcommand_nlp::{parse_command, Parameters};

    #[test]
    fn circle_command_maps_to_draw_circle() {
        let call = tool_call_for(&parse_command("draw a red circle at (100,100) radius 50"))
            .expect("tool call");
        assert_eq!(call.name, "draw_circle");
        assert_eq!(
            call.arguments,
            json!({"center": [100.0, 100.0], "radius": 50.0, "color": 1})
        );
    }

    #[test]
    fn dimension_uses_add_dimension() {
        let call = tool_call_for(&parse_command("dimension (0,0) (40,0)")).expect("tool call");
        assert_eq!(call.name, "add_dimension");
        assert_eq!(call.arguments["text_position"], json!([20.0, 10.0]));
    }

    #[test]
    fn missing_keys_are_filled_with_defaults() {
        let parsed = ParsedCommand {
            action: Action::Draw,
            shape: Some(Shape::Arc),
            parameters: Parameters::new(),
            raw_text: "arc".to_string(),
            confidence: 0.5,
        };
        let call = tool_call_for(&parsed).expect("tool call");
        assert_eq!(call.name, "draw_arc");
        assert_eq!(call.arguments["radius"], 50.0);
        assert_eq!(call.arguments["end_angle"], 90.0);
        assert_eq!(call.arguments["center"], json!([0.0, 0.0]));
    }

    #[test]
    fn save_maps_to_save_drawing() {
        let call = tool_call_for(&parse_command("salva 'progetto.dwg'")).expect("tool call");
        assert_eq!(call.name, SAVE_TOOL);
        assert_eq!(call.arguments, json!({"file_path": "progetto.dwg"}));

        let call = tool_call_for(&parse_command("保存")).expect("tool call");
        assert_eq!(call.arguments, json!({}));
    }

    #[test]
    fn unrecognised_shape_has_no_call() {
        assert_eq!(tool_call_for(&parse_command("rotate everything")), None);
    }

    #[test]
    fn non_draw_actions_still_draw_the_shape() {
        let call = tool_call_for(&parse_command("move the line")).expect("tool call");
        assert_eq!(call.name, "draw_line");
    }

    #[test]
    fn every_shape_has_defaults_for_its_tool() {
        for shape in Shape::ALL {
            assert!(default_arguments(shape).is_object());
            assert!(!tool_name(shape).is_empty());
        }
    }
}
