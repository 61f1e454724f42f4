//! Drawing backend abstraction.
//!
//! A backend owns the CAD model space. The service layer validates arguments
//! and hands 3D points plus an [`EntityStyle`] to one method per entity kind.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use cadcommand_nlp::ColorIndex;

use crate::config::CadConfig;
use crate::error::{CoreError, CoreResult};

pub mod memory;
pub mod unsupported;

pub use memory::MemoryBackend;
pub use unsupported::UnsupportedBackend;

pub type Point3 = [f64; 3];
pub type SharedBackend = Arc<dyn DrawingBackend>;

/// Standard CAD lineweights, in hundredths of a millimetre.
pub const VALID_LINEWEIGHTS: &[i32] = &[
    0, 5, 9, 13, 15, 18, 20, 25, 30, 35, 40, 50, 53, 60, 70, 80, 90, 100, 106, 120, 140, 158, 200,
    211,
];

/// Layer every drawing starts with.
pub const DEFAULT_LAYER: &str = "0";

/// Color given to layers created on first use (white).
pub const DEFAULT_LAYER_COLOR: ColorIndex = 7;

/// Returns `value` if it is a standard lineweight, otherwise 0.
pub fn validate_lineweight(value: i32) -> i32 {
    if VALID_LINEWEIGHTS.contains(&value) {
        value
    } else {
        tracing::warn!("invalid lineweight {value}, using default 0");
        0
    }
}

/// Promotes a 2D or 3D coordinate list to a 3D point; missing z is 0.
pub fn to_point3(coords: &[f64]) -> Point3 {
    [
        coords.first().copied().unwrap_or(0.0),
        coords.get(1).copied().unwrap_or(0.0),
        coords.get(2).copied().unwrap_or(0.0),
    ]
}

/// Optional per-entity properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityStyle {
    pub layer: Option<String>,
    pub color: Option<ColorIndex>,
    pub lineweight: Option<i32>,
}

/// Geometry of one placed entity, tagged by `type` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entity {
    Line {
        start: Point3,
        end: Point3,
    },
    Circle {
        center: Point3,
        radius: f64,
    },
    Arc {
        center: Point3,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Ellipse {
        center: Point3,
        major_axis: f64,
        minor_axis: f64,
        rotation: f64,
    },
    Polyline {
        points: Vec<Point3>,
        closed: bool,
    },
    Rectangle {
        points: Vec<Point3>,
        closed: bool,
        corner1: Point3,
        corner2: Point3,
    },
    Text {
        position: Point3,
        text: String,
        height: f64,
        rotation: f64,
    },
    Hatch {
        boundary_points: Vec<Point3>,
        pattern: String,
        scale: f64,
    },
    Dimension {
        start: Point3,
        end: Point3,
        text_position: Point3,
    },
}

impl Entity {
    pub fn kind(&self) -> &'static str {
        match self {
            Entity::Line { .. } => "line",
            Entity::Circle { .. } => "circle",
            Entity::Arc { .. } => "arc",
            Entity::Ellipse { .. } => "ellipse",
            Entity::Polyline { .. } => "polyline",
            Entity::Rectangle { .. } => "rectangle",
            Entity::Text { .. } => "text",
            Entity::Hatch { .. } => "hatch",
            Entity::Dimension { .. } => "dimension",
        }
    }
}

/// An entity as placed in model space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawnEntity {
    pub handle: Uuid,
    pub created_at: DateTime<Utc>,
    pub layer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorIndex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lineweight: Option<i32>,
    #[serde(flatten)]
    pub entity: Entity,
}

pub trait DrawingBackend: Send + Sync {
    fn id(&self) -> &str {
        "unsupported"
    }

    /// Connects to (or launches) the CAD application.
    fn start(&self) -> CoreResult<()> {
        Err(CoreError::NotImplemented)
    }
    fn is_running(&self) -> bool {
        false
    }

    fn draw_line(
        &self,
        _start: Point3,
        _end: Point3,
        _style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        Err(CoreError::NotImplemented)
    }
    fn draw_circle(
        &self,
        _center: Point3,
        _radius: f64,
        _style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        Err(CoreError::NotImplemented)
    }
    fn draw_arc(
        &self,
        _center: Point3,
        _radius: f64,
        _start_angle: f64,
        _end_angle: f64,
        _style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        Err(CoreError::NotImplemented)
    }
    fn draw_ellipse(
        &self,
        _center: Point3,
        _major_axis: f64,
        _minor_axis: f64,
        _rotation: f64,
        _style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        Err(CoreError::NotImplemented)
    }
    fn draw_polyline(
        &self,
        _points: &[Point3],
        _closed: bool,
        _style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        Err(CoreError::NotImplemented)
    }

    /// Draws a closed four-vertex polyline spanning the two corners.
    fn draw_rectangle(
        &self,
        corner1: Point3,
        corner2: Point3,
        style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        let [x1, y1, z1] = corner1;
        let [x2, y2, z2] = corner2;
        let points = [[x1, y1, z1], [x2, y1, z1], [x2, y2, z2], [x1, y2, z2]];
        let mut drawn = self.draw_polyline(&points, true, style)?;
        drawn.entity = Entity::Rectangle {
            points: points.to_vec(),
            closed: true,
            corner1,
            corner2,
        };
        tracing::info!("drew rectangle from {corner1:?} to {corner2:?}");
        Ok(drawn)
    }

    fn draw_text(
        &self,
        _position: Point3,
        _text: &str,
        _height: f64,
        _rotation: f64,
        _style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        Err(CoreError::NotImplemented)
    }
    fn draw_hatch(
        &self,
        _boundary: &[Point3],
        _pattern_name: &str,
        _pattern_scale: f64,
        _style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        Err(CoreError::NotImplemented)
    }
    fn add_dimension(
        &self,
        _start: Point3,
        _end: Point3,
        _text_position: Point3,
        _style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        Err(CoreError::NotImplemented)
    }

    /// Saves the active drawing and returns the path written.
    fn save(&self, _path: &Path) -> CoreResult<PathBuf> {
        Err(CoreError::NotImplemented)
    }
}

pub fn default_backend(config: &CadConfig) -> SharedBackend {
    Arc::new(MemoryBackend::new(config.kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_lineweights_pass_through() {
        for &weight in VALID_LINEWEIGHTS {
            assert_eq!(validate_lineweight(weight), weight);
        }
    }

    #[test]
    fn nonstandard_lineweights_fall_back_to_zero() {
        assert_eq!(validate_lineweight(7), 0);
        assert_eq!(validate_lineweight(-1), 0);
        assert_eq!(validate_lineweight(212), 0);
    }

    #[test]
    fn points_are_promoted_to_3d() {
        assert_eq!(to_point3(&[1.0, 2.0]), [1.0, 2.0, 0.0]);
        assert_eq!(to_point3(&[1.0, 2.0, 3.0]), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn drawn_entity_flattens_geometry() {
        let drawn = DrawnEntity {
            handle: Uuid::nil(),
            created_at: Utc::now(),
            layer: DEFAULT_LAYER.to_string(),
            color: Some(1),
            lineweight: None,
            entity: Entity::Circle {
                center: [0.0, 0.0, 0.0],
                radius: 5.0,
            },
        };
        let value = serde_json::to_value(&drawn).expect("serialize");
        assert_eq!(value["type"], "circle");
        assert_eq!(value["radius"], 5.0);
        assert_eq!(value["center"], serde_json::json!([0.0, 0.0, 0.0]));
        assert_eq!(value["color"], 1);
        assert!(value.get("lineweight").is_none());
    }

    #[test]
    fn trait_defaults_are_not_implemented() {
        struct Bare;
        impl DrawingBackend for Bare {}

        let style = EntityStyle::default();
        assert!(matches!(Bare.start(), Err(CoreError::NotImplemented)));
        assert!(!Bare.is_running());
        assert!(matches!(
            Bare.draw_rectangle([0.0; 3], [1.0, 1.0, 0.0], &style),
            Err(CoreError::NotImplemented)
        ));
        assert!(matches!(
            Bare.save(Path::new("a.dwg")),
            Err(CoreError::NotImplemented)
        ));
    }
}
