//! Core types produced by the command parser.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// CAD color index (0-255). Range checks belong to the drawing backend.
pub type ColorIndex = u8;

/// A 2D coordinate pair, serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub const ORIGIN: Point = Point(0.0, 0.0);

    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }
}

/// Canonical action tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Draw,
    Modify,
    Move,
    Rotate,
    Scale,
    Erase,
    Save,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Draw => "draw",
            Action::Modify => "modify",
            Action::Move => "move",
            Action::Rotate => "rotate",
            Action::Scale => "scale",
            Action::Erase => "erase",
            Action::Save => "save",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical shape tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Line,
    Circle,
    Arc,
    Ellipse,
    Rectangle,
    Polyline,
    Text,
    Hatch,
    Dimension,
}

impl Shape {
    pub const ALL: [Shape; 9] = [
        Shape::Line,
        Shape::Circle,
        Shape::Arc,
        Shape::Ellipse,
        Shape::Rectangle,
        Shape::Polyline,
        Shape::Text,
        Shape::Hatch,
        Shape::Dimension,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Line => "line",
            Shape::Circle => "circle",
            Shape::Arc => "arc",
            Shape::Ellipse => "ellipse",
            Shape::Rectangle => "rectangle",
            Shape::Polyline => "polyline",
            Shape::Text => "text",
            Shape::Hatch => "hatch",
            Shape::Dimension => "dimension",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single extracted parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    Point(Point),
    Points(Vec<Point>),
}

impl ParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Number(value) => Some(*value),
            ParamValue::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Point> {
        match self {
            ParamValue::Point(point) => Some(*point),
            _ => None,
        }
    }

    pub fn as_points(&self) -> Option<&[Point]> {
        match self {
            ParamValue::Points(points) => Some(points),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<Point> for ParamValue {
    fn from(value: Point) -> Self {
        ParamValue::Point(value)
    }
}

impl From<Vec<Point>> for ParamValue {
    fn from(value: Vec<Point>) -> Self {
        ParamValue::Points(value)
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

/// Parameter mapping keyed by parameter name.
pub type Parameters = BTreeMap<String, ParamValue>;

/// Result of parsing one freeform drawing command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedCommand {
    pub action: Action,
    pub shape: Option<Shape>,
    pub parameters: Parameters,
    /// Input text, unmodified.
    pub raw_text: String,
    /// Heuristic score in [0, 1]; not a probability.
    pub confidence: f64,
}

impl ParsedCommand {
    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.parameters.get(key)
    }
}
