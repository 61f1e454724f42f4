//! In-process model space.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use cadcommand_nlp::ColorIndex;

use super::{
    validate_lineweight, DrawingBackend, DrawnEntity, Entity, EntityStyle, Point3,
    DEFAULT_LAYER, DEFAULT_LAYER_COLOR,
};
use crate::config::CadKind;
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer {
    pub name: String,
    pub color: ColorIndex,
}

#[derive(Debug, Default, Serialize)]
struct ModelSpace {
    #[serde(skip)]
    running: bool,
    layers: Vec<Layer>,
    entities: Vec<DrawnEntity>,
    #[serde(skip)]
    saved_to: Option<PathBuf>,
}

/// Backend that keeps every placed entity in memory and saves the model
/// space as a JSON document.
#[derive(Debug)]
pub struct MemoryBackend {
    kind: CadKind,
    model: Mutex<ModelSpace>,
}

impl MemoryBackend {
    pub fn new(kind: CadKind) -> Self {
        Self {
            kind,
            model: Mutex::new(ModelSpace::default()),
        }
    }

    pub fn kind(&self) -> CadKind {
        self.kind
    }

    pub fn entities(&self) -> Vec<DrawnEntity> {
        self.lock().map(|model| model.entities.clone()).unwrap_or_default()
    }

    pub fn layers(&self) -> Vec<Layer> {
        self.lock().map(|model| model.layers.clone()).unwrap_or_default()
    }

    /// Path of the most recent successful save.
    pub fn saved_to(&self) -> Option<PathBuf> {
        self.lock().ok().and_then(|model| model.saved_to.clone())
    }

    fn lock(&self) -> CoreResult<MutexGuard<'_, ModelSpace>> {
        self.model
            .lock()
            .map_err(|_| CoreError::Internal("model space lock poisoned".to_string()))
    }

    fn place(&self, entity: Entity, style: &EntityStyle) -> CoreResult<DrawnEntity> {
        let mut model = self.lock()?;
        if !model.running {
            return Err(CoreError::NotInitialized);
        }

        let layer = match style.layer.as_deref().filter(|name| !name.is_empty()) {
            Some(name) => ensure_layer(&mut model.layers, name),
            None => DEFAULT_LAYER.to_string(),
        };

        let drawn = DrawnEntity {
            handle: Uuid::new_v4(),
            created_at: Utc::now(),
            layer,
            color: style.color,
            lineweight: style.lineweight.map(validate_lineweight),
            entity,
        };
        model.entities.push(drawn.clone());
        Ok(drawn)
    }
}

/// Returns the stored name of `name`, creating the layer on first use.
/// Layer names compare case-insensitively.
fn ensure_layer(layers: &mut Vec<Layer>, name: &str) -> String {
    let lowered = name.to_lowercase();
    if let Some(existing) = layers.iter().find(|layer| layer.name.to_lowercase() == lowered) {
        return existing.name.clone();
    }
    layers.push(Layer {
        name: name.to_string(),
        color: DEFAULT_LAYER_COLOR,
    });
    tracing::info!("created layer: {name}");
    name.to_string()
}

impl DrawingBackend for MemoryBackend {
    fn id(&self) -> &str {
        "memory"
    }

    fn start(&self) -> CoreResult<()> {
        let mut model = self.lock()?;
        if !model.running {
            model.running = true;
            if model.layers.is_empty() {
                model.layers.push(Layer {
                    name: DEFAULT_LAYER.to_string(),
                    color: DEFAULT_LAYER_COLOR,
                });
            }
            tracing::info!("started {} model space", self.kind.app_id());
        }
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.lock().map(|model| model.running).unwrap_or(false)
    }

    fn draw_line(
        &self,
        start: Point3,
        end: Point3,
        style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        let drawn = self.place(Entity::Line { start, end }, style)?;
        tracing::info!("drew line from {start:?} to {end:?}");
        Ok(drawn)
    }

    fn draw_circle(
        &self,
        center: Point3,
        radius: f64,
        style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        let drawn = self.place(Entity::Circle { center, radius }, style)?;
        tracing::info!("drew circle at {center:?} with radius {radius}");
        Ok(drawn)
    }

    fn draw_arc(
        &self,
        center: Point3,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        let entity = Entity::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        };
        let drawn = self.place(entity, style)?;
        tracing::info!(
            "drew arc at {center:?}, radius {radius}, {start_angle} to {end_angle} degrees"
        );
        Ok(drawn)
    }

    fn draw_ellipse(
        &self,
        center: Point3,
        major_axis: f64,
        minor_axis: f64,
        rotation: f64,
        style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        let entity = Entity::Ellipse {
            center,
            major_axis,
            minor_axis,
            rotation,
        };
        let drawn = self.place(entity, style)?;
        tracing::info!("drew ellipse at {center:?}, axes {major_axis}/{minor_axis}");
        Ok(drawn)
    }

    fn draw_polyline(
        &self,
        points: &[Point3],
        closed: bool,
        style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        let entity = Entity::Polyline {
            points: points.to_vec(),
            closed,
        };
        let drawn = self.place(entity, style)?;
        tracing::info!("drew polyline with {} points, closed={closed}", points.len());
        Ok(drawn)
    }

    fn draw_text(
        &self,
        position: Point3,
        text: &str,
        height: f64,
        rotation: f64,
        style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        let entity = Entity::Text {
            position,
            text: text.to_string(),
            height,
            rotation,
        };
        let drawn = self.place(entity, style)?;
        tracing::info!("drew text '{text}' at {position:?}");
        Ok(drawn)
    }

    fn draw_hatch(
        &self,
        boundary: &[Point3],
        pattern_name: &str,
        pattern_scale: f64,
        style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        let entity = Entity::Hatch {
            boundary_points: boundary.to_vec(),
            pattern: pattern_name.to_string(),
            scale: pattern_scale,
        };
        let drawn = self.place(entity, style)?;
        tracing::info!("drew hatch with pattern '{pattern_name}' at scale {pattern_scale}");
        Ok(drawn)
    }

    fn add_dimension(
        &self,
        start: Point3,
        end: Point3,
        text_position: Point3,
        style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        let entity = Entity::Dimension {
            start,
            end,
            text_position,
        };
        let drawn = self.place(entity, style)?;
        tracing::info!("added dimension from {start:?} to {end:?}");
        Ok(drawn)
    }

    fn save(&self, path: &Path) -> CoreResult<PathBuf> {
        let mut model = self.lock()?;
        if !model.running {
            return Err(CoreError::Backend("No document to save".to_string()));
        }

        let io_error = |source: std::io::Error| CoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        let absolute = std::path::absolute(path).map_err(io_error)?;
        if let Some(parent) = absolute.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let document = serde_json::to_vec_pretty(&*model)
            .map_err(|error| CoreError::Internal(format!("failed to serialize drawing: {error}")))?;
        std::fs::write(&absolute, document).map_err(io_error)?;

        model.saved_to = Some(absolute.clone());
        tracing::info!("saved drawing to {}", absolute.display());
        Ok(absolute)
    }
}
