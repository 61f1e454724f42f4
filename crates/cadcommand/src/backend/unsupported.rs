use std::path::{Path, PathBuf};

use super::{DrawingBackend, DrawnEntity, EntityStyle, Point3};
use crate::error::{CoreError, CoreResult};

/// Backend for platforms without CAD automation. Every call fails.
#[derive(Debug, Default)]
pub struct UnsupportedBackend;

impl UnsupportedBackend {
    pub fn new() -> Self {
        Self
    }
}

impl DrawingBackend for UnsupportedBackend {
    fn start(&self) -> CoreResult<()> {
        Err(not_supported("start"))
    }

    fn draw_line(
        &self,
        _start: Point3,
        _end: Point3,
        _style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        Err(not_supported("draw_line"))
    }

    fn draw_circle(
        &self,
        _center: Point3,
        _radius: f64,
        _style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        Err(not_supported("draw_circle"))
    }

    fn draw_arc(
        &self,
        _center: Point3,
        _radius: f64,
        _start_angle: f64,
        _end_angle: f64,
        _style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        Err(not_supported("draw_arc"))
    }

    fn draw_ellipse(
        &self,
        _center: Point3,
        _major_axis: f64,
        _minor_axis: f64,
        _rotation: f64,
        _style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        Err(not_supported("draw_ellipse"))
    }

    fn draw_polyline(
        &self,
        _points: &[Point3],
        _closed: bool,
        _style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        Err(not_supported("draw_polyline"))
    }

    fn draw_text(
        &self,
        _position: Point3,
        _text: &str,
        _height: f64,
        _rotation: f64,
        _style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        Err(not_supported("draw_text"))
    }

    fn draw_hatch(
        &self,
        _boundary: &[Point3],
        _pattern_name: &str,
        _pattern_scale: f64,
        _style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        Err(not_supported("draw_hatch"))
    }

    fn add_dimension(
        &self,
        _start: Point3,
        _end: Point3,
        _text_position: Point3,
        _style: &EntityStyle,
    ) -> CoreResult<DrawnEntity> {
        Err(not_supported("add_dimension"))
    }

    fn save(&self, _path: &Path) -> CoreResult<PathBuf> {
        Err(not_supported("save"))
    }
}

fn not_supported(operation: &str) -> CoreError {
    tracing::warn!("{operation} called on unsupported CAD backend");
    CoreError::Backend("CAD backend not supported on this platform".to_string())
}
