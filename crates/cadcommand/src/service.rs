//! High-level drawing service.
//!
//! Validates tool arguments, lazily starts the backend, forwards calls, and
//! tracks what has been drawn in a [`DrawingState`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use cadcommand_nlp::{parse_command, ColorIndex};

use crate::backend::{to_point3, DrawnEntity, EntityStyle, Point3, SharedBackend, DEFAULT_LAYER};
use crate::config::Config;
use crate::dispatch::{tool_call_for, SAVE_TOOL};
use crate::error::{CoreError, CoreResult};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Optional properties shared by every drawing request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleArgs {
    #[serde(default)]
    pub layer: Option<String>,
    #[serde(default)]
    pub color: Option<i64>,
    #[serde(default)]
    pub lineweight: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineRequest {
    pub start: Vec<f64>,
    pub end: Vec<f64>,
    #[serde(flatten)]
    pub style: StyleArgs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CircleRequest {
    pub center: Vec<f64>,
    pub radius: f64,
    #[serde(flatten)]
    pub style: StyleArgs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArcRequest {
    pub center: Vec<f64>,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    #[serde(flatten)]
    pub style: StyleArgs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EllipseRequest {
    pub center: Vec<f64>,
    pub major_axis: f64,
    pub minor_axis: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(flatten)]
    pub style: StyleArgs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolylineRequest {
    pub points: Vec<Vec<f64>>,
    #[serde(default)]
    pub closed: bool,
    #[serde(flatten)]
    pub style: StyleArgs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RectangleRequest {
    pub corner1: Vec<f64>,
    pub corner2: Vec<f64>,
    #[serde(flatten)]
    pub style: StyleArgs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextRequest {
    pub position: Vec<f64>,
    pub text: String,
    #[serde(default = "default_text_height")]
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(flatten)]
    pub style: StyleArgs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HatchRequest {
    pub boundary_points: Vec<Vec<f64>>,
    #[serde(default = "default_pattern_name")]
    pub pattern_name: String,
    #[serde(default = "default_pattern_scale")]
    pub pattern_scale: f64,
    #[serde(flatten)]
    pub style: StyleArgs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DimensionRequest {
    pub start: Vec<f64>,
    pub end: Vec<f64>,
    pub text_position: Vec<f64>,
    #[serde(flatten)]
    pub style: StyleArgs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveRequest {
    /// Falls back to `output.default_filename` when absent.
    #[serde(default)]
    pub file_path: Option<String>,
}

fn default_text_height() -> f64 {
    cadcommand_nlp::shapes::DEFAULT_TEXT_HEIGHT
}

fn default_pattern_name() -> String {
    cadcommand_nlp::shapes::DEFAULT_HATCH_PATTERN.to_string()
}

fn default_pattern_scale() -> f64 {
    1.0
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct DrawingState {
    pub entities: Vec<DrawnEntity>,
    pub current_layer: String,
    pub last_command: String,
    pub last_result: String,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            current_layer: DEFAULT_LAYER.to_string(),
            last_command: String::new(),
            last_result: String::new(),
        }
    }
}

/// Serializable view of [`DrawingState`].
#[derive(Debug, Clone, Serialize)]
pub struct DrawingSnapshot {
    #[serde(flatten)]
    pub state: DrawingState,
    pub entity_count: usize,
}

impl DrawingState {
    pub fn snapshot(&self) -> DrawingSnapshot {
        DrawingSnapshot {
            state: self.clone(),
            entity_count: self.entities.len(),
        }
    }

    fn record(&mut self, entity: DrawnEntity, command: String) {
        self.entities.push(entity);
        self.last_command = command;
        self.last_result = "success".to_string();
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

pub struct CadService {
    config: Config,
    backend: SharedBackend,
    initialized: AtomicBool,
    state: Mutex<DrawingState>,
}

impl CadService {
    pub fn new(config: Config, backend: SharedBackend) -> Self {
        Self {
            config,
            backend,
            initialized: AtomicBool::new(false),
            state: Mutex::new(DrawingState::default()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> CoreResult<DrawingSnapshot> {
        Ok(self.lock_state()?.snapshot())
    }

    /// Starts the backend unless it is already running.
    pub fn ensure_initialized(&self) -> CoreResult<()> {
        if self.initialized.load(Ordering::Acquire) && self.backend.is_running() {
            return Ok(());
        }

        tracing::info!("initializing CAD connection via {} backend", self.backend.id());
        match self.backend.start() {
            Ok(()) => {
                self.initialized.store(true, Ordering::Release);
                Ok(())
            }
            Err(error) => {
                tracing::warn!("failed to initialize CAD: {error}");
                Err(CoreError::NotInitialized)
            }
        }
    }

    pub fn draw_line(&self, request: &LineRequest) -> CoreResult<DrawnEntity> {
        if request.start.len() < 2 || request.end.len() < 2 {
            return Err(invalid("Coordinates must have at least 2 values"));
        }
        let style = self.prepare(&request.style)?;
        let drawn = self
            .backend
            .draw_line(to_point3(&request.start), to_point3(&request.end), &style)?;
        self.record(
            &drawn,
            format!("draw_line({:?}, {:?})", request.start, request.end),
        )?;
        Ok(drawn)
    }

    pub fn draw_circle(&self, request: &CircleRequest) -> CoreResult<DrawnEntity> {
        require_coordinates(&request.center, "Center must have at least 2 coordinates")?;
        if request.radius <= 0.0 {
            return Err(invalid("Radius must be positive"));
        }
        let style = self.prepare(&request.style)?;
        let drawn = self
            .backend
            .draw_circle(to_point3(&request.center), request.radius, &style)?;
        self.record(
            &drawn,
            format!("draw_circle({:?}, {})", request.center, request.radius),
        )?;
        Ok(drawn)
    }

    pub fn draw_arc(&self, request: &ArcRequest) -> CoreResult<DrawnEntity> {
        require_coordinates(&request.center, "Center must have at least 2 coordinates")?;
        if request.radius <= 0.0 {
            return Err(invalid("Radius must be positive"));
        }
        let style = self.prepare(&request.style)?;
        let drawn = self.backend.draw_arc(
            to_point3(&request.center),
            request.radius,
            request.start_angle,
            request.end_angle,
            &style,
        )?;
        self.record(
            &drawn,
            format!(
                "draw_arc({:?}, {}, {}, {})",
                request.center, request.radius, request.start_angle, request.end_angle
            ),
        )?;
        Ok(drawn)
    }

    pub fn draw_ellipse(&self, request: &EllipseRequest) -> CoreResult<DrawnEntity> {
        require_coordinates(&request.center, "Center must have at least 2 coordinates")?;
        if request.major_axis <= 0.0 {
            return Err(invalid("Major axis must be positive"));
        }
        if request.minor_axis < 0.0 {
            return Err(invalid("Minor axis must be non-negative"));
        }
        let style = self.prepare(&request.style)?;
        let drawn = self.backend.draw_ellipse(
            to_point3(&request.center),
            request.major_axis,
            request.minor_axis,
            request.rotation,
            &style,
        )?;
        self.record(
            &drawn,
            format!(
                "draw_ellipse({:?}, {}, {})",
                request.center, request.major_axis, request.minor_axis
            ),
        )?;
        Ok(drawn)
    }

    pub fn draw_polyline(&self, request: &PolylineRequest) -> CoreResult<DrawnEntity> {
        if request.points.len() < 2 {
            return Err(invalid("Polyline requires at least 2 points"));
        }
        let points = to_points3(&request.points)?;
        let style = self.prepare(&request.style)?;
        let drawn = self.backend.draw_polyline(&points, request.closed, &style)?;
        self.record(
            &drawn,
            format!(
                "draw_polyline({} points, closed={})",
                points.len(),
                request.closed
            ),
        )?;
        Ok(drawn)
    }

    pub fn draw_rectangle(&self, request: &RectangleRequest) -> CoreResult<DrawnEntity> {
        if request.corner1.len() < 2 || request.corner2.len() < 2 {
            return Err(invalid("Corners must have at least 2 coordinates"));
        }
        let style = self.prepare(&request.style)?;
        let drawn = self.backend.draw_rectangle(
            to_point3(&request.corner1),
            to_point3(&request.corner2),
            &style,
        )?;
        self.record(
            &drawn,
            format!("draw_rectangle({:?}, {:?})", request.corner1, request.corner2),
        )?;
        Ok(drawn)
    }

    pub fn draw_text(&self, request: &TextRequest) -> CoreResult<DrawnEntity> {
        require_coordinates(&request.position, "Position must have at least 2 coordinates")?;
        if request.text.is_empty() {
            return Err(invalid("Text cannot be empty"));
        }
        if request.height <= 0.0 {
            return Err(invalid("Height must be positive"));
        }
        let style = self.prepare(&request.style)?;
        let drawn = self.backend.draw_text(
            to_point3(&request.position),
            &request.text,
            request.height,
            request.rotation,
            &style,
        )?;
        self.record(&drawn, format!("draw_text('{}')", request.text))?;
        Ok(drawn)
    }

    pub fn draw_hatch(&self, request: &HatchRequest) -> CoreResult<DrawnEntity> {
        if request.boundary_points.len() < 3 {
            return Err(invalid("Hatch requires at least 3 boundary points"));
        }
        let boundary = to_points3(&request.boundary_points)?;
        if request.pattern_name.is_empty() {
            return Err(invalid("Pattern name cannot be empty"));
        }
        if request.pattern_scale <= 0.0 {
            return Err(invalid("Pattern scale must be positive"));
        }
        let style = self.prepare(&request.style)?;
        let drawn = self.backend.draw_hatch(
            &boundary,
            &request.pattern_name,
            request.pattern_scale,
            &style,
        )?;
        self.record(
            &drawn,
            format!("draw_hatch(pattern={})", request.pattern_name),
        )?;
        Ok(drawn)
    }

    pub fn add_dimension(&self, request: &DimensionRequest) -> CoreResult<DrawnEntity> {
        if request.start.len() < 2 || request.end.len() < 2 || request.text_position.len() < 2 {
            return Err(invalid("All points must have at least 2 coordinates"));
        }
        let style = self.prepare(&request.style)?;
        let drawn = self.backend.add_dimension(
            to_point3(&request.start),
            to_point3(&request.end),
            to_point3(&request.text_position),
            &style,
        )?;
        self.record(
            &drawn,
            format!("add_dimension({:?}, {:?})", request.start, request.end),
        )?;
        Ok(drawn)
    }

    /// Saves the drawing. Relative paths resolve against the output directory.
    pub fn save_drawing(&self, request: &SaveRequest) -> CoreResult<Value> {
        let file_path = request
            .file_path
            .as_deref()
            .unwrap_or(&self.config.output.default_filename);
        if file_path.is_empty() {
            return Err(invalid("File path cannot be empty"));
        }
        if file_path.trim().is_empty() {
            return Err(invalid("File path cannot be whitespace"));
        }
        self.ensure_initialized()?;

        let target = self.config.output.resolve(file_path);
        let written = self.backend.save(&target)?;

        let mut state = self.lock_state()?;
        state.last_command = format!("save_drawing('{file_path}')");
        state.last_result = "success".to_string();
        Ok(json!({ "file_path": written.display().to_string() }))
    }

    /// Runs a named drawing or save tool with JSON arguments.
    pub fn invoke(&self, name: &str, arguments: &Value) -> CoreResult<Value> {
        match name {
            "draw_line" => entity_value(self.draw_line(&decode(arguments)?)),
            "draw_circle" => entity_value(self.draw_circle(&decode(arguments)?)),
            "draw_arc" => entity_value(self.draw_arc(&decode(arguments)?)),
            "draw_ellipse" => entity_value(self.draw_ellipse(&decode(arguments)?)),
            "draw_polyline" => entity_value(self.draw_polyline(&decode(arguments)?)),
            "draw_rectangle" => entity_value(self.draw_rectangle(&decode(arguments)?)),
            "draw_text" => entity_value(self.draw_text(&decode(arguments)?)),
            "draw_hatch" => entity_value(self.draw_hatch(&decode(arguments)?)),
            "add_dimension" => entity_value(self.add_dimension(&decode(arguments)?)),
            SAVE_TOOL => self.save_drawing(&decode(arguments)?),
            other => Err(invalid(format!("Unknown tool: {other}"))),
        }
    }

    /// Parses freeform text and executes the resulting tool call.
    ///
    /// Always returns a result object; failures carry `success: false`.
    pub fn process_command(&self, command: &str) -> Value {
        let parsed = parse_command(command);
        if let Ok(mut state) = self.lock_state() {
            state.last_command = command.to_string();
        }

        let Some(call) = tool_call_for(&parsed) else {
            return json!({
                "success": false,
                "error": format!("Could not understand command: {command}"),
                "parsed": {
                    "action": parsed.action,
                    "confidence": parsed.confidence,
                },
            });
        };

        tracing::info!("command {command:?} dispatched to {}", call.name);
        into_result(self.invoke(call.name, &call.arguments))
    }

    fn prepare(&self, args: &StyleArgs) -> CoreResult<EntityStyle> {
        self.ensure_initialized()?;
        let color = match args.color {
            Some(color) => Some(
                ColorIndex::try_from(color)
                    .map_err(|_| invalid("Color must be between 0 and 255"))?,
            ),
            None => None,
        };
        Ok(EntityStyle {
            layer: args.layer.clone(),
            color,
            lineweight: args.lineweight,
        })
    }

    fn record(&self, drawn: &DrawnEntity, command: String) -> CoreResult<()> {
        let mut state = self.lock_state()?;
        state.record(drawn.clone(), command);
        Ok(())
    }

    fn lock_state(&self) -> CoreResult<MutexGuard<'_, DrawingState>> {
        self.state
            .lock()
            .map_err(|_| CoreError::Internal("drawing state lock poisoned".to_string()))
    }
}

/// Renders a service outcome as `{success: true, ...}` or `{success: false, error}`.
pub fn into_result(result: CoreResult<Value>) -> Value {
    match result {
        Ok(Value::Object(mut map)) => {
            map.entry("success").or_insert(Value::Bool(true));
            Value::Object(map)
        }
        Ok(other) => {
            let mut map = Map::new();
            map.insert("success".to_string(), Value::Bool(true));
            map.insert("result".to_string(), other);
            Value::Object(map)
        }
        Err(error) => {
            tracing::warn!("tool call failed: {error}");
            json!({ "success": false, "error": error.to_string() })
        }
    }
}

fn entity_value(result: CoreResult<DrawnEntity>) -> CoreResult<Value> {
    let drawn = result?;
    serde_json::to_value(drawn)
        .map_err(|error| CoreError::Internal(format!("failed to serialize entity: {error}")))
}

fn decode<T: DeserializeOwned>(arguments: &Value) -> CoreResult<T> {
    serde_json::from_value(arguments.clone())
        .map_err(|error| invalid(format!("invalid arguments: {error}")))
}

fn invalid(message: impl Into<String>) -> CoreError {
    CoreError::InvalidInput(message.into())
}

fn require_coordinates(coords: &[f64], message: &str) -> CoreResult<()> {
    if coords.len() < 2 {
        return Err(invalid(message));
    }
    Ok(())
}

fn to_points3(points: &[Vec<f64>]) -> CoreResult<Vec<Point3>> {
    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            if point.len() < 2 {
                Err(invalid(format!("Point {index} must have at least 2 coordinates")))
            } else {
                Ok(to_point3(point))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backend::{MemoryBackend, UnsupportedBackend};
    use crate::config::{CadKind, OutputConfig};
    use tempfile::tempdir;

    fn memory_service() -> CadService {
        CadService::new(Config::default(), Arc::new(MemoryBackend::new(CadKind::Autocad)))
    }

    fn service_with_output(dir: &std::path::Path) -> CadService {
        let config = Config {
            output: OutputConfig {
                directory: dir.to_path_buf(),
                ..OutputConfig::default()
            },
            ..Config::default()
        };
        CadService::new(config, Arc::new(MemoryBackend::new(CadKind::Autocad)))
    }

    fn error_of(result: Value) -> String {
        assert_eq!(result["success"], false, "expected failure: {result}");
        result["error"].as_str().unwrap_or_default().to_string()
    }

    #[test]
    fn line_is_drawn_and_recorded() {
        let service = memory_service();
        let result = into_result(service.invoke(
            "draw_line",
            &json!({"start": [0, 0], "end": [10, 5, 2]}),
        ));
        assert_eq!(result["success"], true);
        assert_eq!(result["type"], "line");
        assert_eq!(result["start"], json!([0.0, 0.0, 0.0]));
        assert_eq!(result["end"], json!([10.0, 5.0, 2.0]));

        let state = service.state().expect("state");
        assert_eq!(state.entity_count, 1);
        assert_eq!(state.state.last_result, "success");
        assert_eq!(state.state.last_command, "draw_line([0.0, 0.0], [10.0, 5.0, 2.0])");
    }

    #[test]
    fn validation_messages() {
        let service = memory_service();
        let cases = [
            (
                "draw_line",
                json!({"start": [0], "end": [1, 1]}),
                "Coordinates must have at least 2 values",
            ),
            ("draw_circle", json!({"center": [0, 0], "radius": 0}), "Radius must be positive"),
            (
                "draw_circle",
                json!({"center": [0], "radius": 1}),
                "Center must have at least 2 coordinates",
            ),
            (
                "draw_arc",
                json!({"center": [0, 0], "radius": -1, "start_angle": 0, "end_angle": 90}),
                "Radius must be positive",
            ),
            (
                "draw_ellipse",
                json!({"center": [0, 0], "major_axis": 0, "minor_axis": 1}),
                "Major axis must be positive",
            ),
            (
                "draw_ellipse",
                json!({"center": [0, 0], "major_axis": 5, "minor_axis": -1}),
                "Minor axis must be non-negative",
            ),
            ("draw_polyline", json!({"points": [[0, 0]]}), "Polyline requires at least 2 points"),
            (
                "draw_polyline",
                json!({"points": [[0, 0], [1]]}),
                "Point 1 must have at least 2 coordinates",
            ),
            (
                "draw_rectangle",
                json!({"corner1": [0, 0], "corner2": [1]}),
                "Corners must have at least 2 coordinates",
            ),
            ("draw_text", json!({"position": [0, 0], "text": ""}), "Text cannot be empty"),
            (
                "draw_text",
                json!({"position": [0, 0], "text": "a", "height": 0}),
                "Height must be positive",
            ),
            (
                "draw_hatch",
                json!({"boundary_points": [[0, 0], [1, 0]]}),
                "Hatch requires at least 3 boundary points",
            ),
            (
                "draw_hatch",
                json!({"boundary_points": [[0, 0], [1, 0], [1, 1]], "pattern_name": ""}),
                "Pattern name cannot be empty",
            ),
            (
                "draw_hatch",
                json!({"boundary_points": [[0, 0], [1, 0], [1, 1]], "pattern_scale": 0}),
                "Pattern scale must be positive",
            ),
            (
                "add_dimension",
                json!({"start": [0, 0], "end": [1, 0], "text_position": [1]}),
                "All points must have at least 2 coordinates",
            ),
            ("save_drawing", json!({"file_path": ""}), "File path cannot be empty"),
            ("save_drawing", json!({"file_path": "   "}), "File path cannot be whitespace"),
        ];
        for (tool, arguments, expected) in cases {
            assert_eq!(error_of(into_result(service.invoke(tool, &arguments))), expected, "{tool}");
        }
        assert_eq!(service.state().expect("state").entity_count, 0);
    }

    #[test]
    fn color_out_of_range_is_rejected() {
        let service = memory_service();
        let result = into_result(service.invoke(
            "draw_circle",
            &json!({"center": [0, 0], "radius": 5, "color": 256}),
        ));
        assert_eq!(error_of(result), "Color must be between 0 and 255");

        let result = into_result(service.invoke(
            "draw_circle",
            &json!({"center": [0, 0], "radius": 5, "color": 3}),
        ));
        assert_eq!(result["color"], 3);
    }

    #[test]
    fn unsupported_backend_reports_not_initialized() {
        let service = CadService::new(Config::default(), Arc::new(UnsupportedBackend::new()));
        let arguments = json!({"start": [0, 0], "end": [1, 1]});
        let result = into_result(service.invoke("draw_line", &arguments));
        assert_eq!(error_of(result), "CAD not initialized");
    }

    #[test]
    fn unknown_tool_is_rejected() {
        let service = memory_service();
        let result = into_result(service.invoke("draw_spline", &json!({})));
        assert_eq!(error_of(result), "Unknown tool: draw_spline");
    }

    #[test]
    fn rectangle_result_carries_corners() {
        let service = memory_service();
        let result = into_result(service.invoke(
            "draw_rectangle",
            &json!({"corner1": [0, 0], "corner2": [20, 10], "layer": "Walls"}),
        ));
        assert_eq!(result["type"], "rectangle");
        assert_eq!(result["closed"], true);
        assert_eq!(result["corner2"], json!([20.0, 10.0, 0.0]));
        assert_eq!(result["layer"], "Walls");
    }

    #[test]
    fn process_command_draws_parsed_shape() {
        let service = memory_service();
        let result = service.process_command("draw a red circle at (100,100) radius 50");
        assert_eq!(result["success"], true);
        assert_eq!(result["type"], "circle");
        assert_eq!(result["center"], json!([100.0, 100.0, 0.0]));
        assert_eq!(result["radius"], 50.0);
        assert_eq!(result["color"], 1);
    }

    #[test]
    fn process_command_reports_unrecognised_text() {
        let service = memory_service();
        let result = service.process_command("hello there");
        assert_eq!(error_of(result.clone()), "Could not understand command: hello there");
        assert_eq!(result["parsed"]["action"], "draw");
        assert_eq!(result["parsed"]["confidence"], 0.3);
        assert_eq!(service.state().expect("state").state.last_command, "hello there");
    }

    #[test]
    fn process_command_saves_into_output_directory() {
        let dir = tempdir().expect("tempdir");
        let service = service_with_output(dir.path());
        service.process_command("画一个矩形");
        let result = service.process_command("save as plan.dwg");

        assert_eq!(result["success"], true, "{result}");
        let expected = dir.path().join("plan.dwg");
        assert_eq!(result["file_path"], expected.display().to_string());
        assert!(expected.exists());
        assert_eq!(
            service.state().expect("state").state.last_command,
            "save_drawing('plan.dwg')"
        );
    }

    #[test]
    fn save_without_path_uses_configured_filename() {
        let dir = tempdir().expect("tempdir");
        let config = Config {
            output: OutputConfig {
                directory: dir.path().to_path_buf(),
                default_filename: "site.dwg".to_string(),
            },
            ..Config::default()
        };
        let service = CadService::new(config, Arc::new(MemoryBackend::new(CadKind::Autocad)));
        service.process_command("draw a line");

        let result = service.process_command("save now");
        assert_eq!(result["success"], true, "{result}");
        assert!(dir.path().join("site.dwg").exists());

        let result = into_result(service.invoke("save_drawing", &json!({})));
        assert_eq!(result["file_path"], dir.path().join("site.dwg").display().to_string());
    }

    #[test]
    fn absolute_save_paths_are_kept() {
        let dir = tempdir().expect("tempdir");
        let service = memory_service();
        let target = dir.path().join("abs.dwg");
        let result = into_result(service.invoke(
            "save_drawing",
            &json!({"file_path": target.display().to_string()}),
        ));
        assert_eq!(result["success"], true, "{result}");
        assert!(target.exists());
    }

    #[test]
    fn malformed_arguments_are_invalid_input() {
        let service = memory_service();
        let error = service
            .invoke("draw_circle", &json!({"center": "origin", "radius": 5}))
            .expect_err("bad arguments");
        assert!(matches!(error, CoreError::InvalidInput(_)));
    }

    #[test]
    fn fresh_state_is_on_layer_zero() {
        let snapshot = memory_service().state().expect("state");
        let value = serde_json::to_value(&snapshot).expect("serialize");
        assert_eq!(value["current_layer"], "0");
        assert_eq!(value["entity_count"], 0);
        assert_eq!(value["entities"], json!([]));
    }
}
