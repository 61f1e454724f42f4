//! Per-shape parameter extraction with default fallbacks.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::{
    compile, extract_coordinates, extract_numbers, extract_quoted_text, keyword_number,
};
use crate::types::{ParamValue, Parameters, Point, Shape};

/// File name used when a save command names no path.
pub const DEFAULT_DRAWING_FILE: &str = "drawing.dwg";

pub const DEFAULT_RADIUS: f64 = 50.0;
pub const DEFAULT_TEXT: &str = "Text";
pub const DEFAULT_TEXT_HEIGHT: f64 = 2.5;
pub const DEFAULT_HATCH_PATTERN: &str = "SOLID";

const CLOSING_KEYWORDS: &[&str] = &["closed", "close", "闭合", "封闭"];

/// Signature shared by every shape parameter parser.
pub type ShapeParser = fn(&str) -> Parameters;

/// Shape → parser table. Shapes missing here use [`parse_generic`].
pub const SHAPE_PARSERS: &[(Shape, ShapeParser)] = &[
    (Shape::Line, parse_line),
    (Shape::Circle, parse_circle),
    (Shape::Arc, parse_arc),
    (Shape::Ellipse, parse_ellipse),
    (Shape::Rectangle, parse_rectangle),
    (Shape::Polyline, parse_polyline),
    (Shape::Text, parse_text),
    (Shape::Hatch, parse_hatch),
    (Shape::Dimension, parse_dimension),
];

// ---------------------------------------------------------------------------
// Keyword patterns
// ---------------------------------------------------------------------------

/// `<keyword>\s*[=:]?\s*<unsigned number>`
fn keyword_pattern(keyword: &str, case_insensitive: bool) -> Regex {
    let flags = if case_insensitive { "(?i)" } else { "" };
    compile(&format!(r"{flags}{keyword}\s*[=:]?\s*([0-9]+\.?[0-9]*)"))
}

static RADIUS: LazyLock<Regex> = LazyLock::new(|| keyword_pattern("radius", true));
static RADIUS_CN: LazyLock<Regex> = LazyLock::new(|| keyword_pattern("半径", false));
static START_ANGLE: LazyLock<Regex> =
    LazyLock::new(|| keyword_pattern(r"start\s*(?:angle)?", true));
static END_ANGLE: LazyLock<Regex> = LazyLock::new(|| keyword_pattern(r"end\s*(?:angle)?", true));
static START_ANGLE_CN: LazyLock<Regex> = LazyLock::new(|| keyword_pattern("起始角", false));
static END_ANGLE_CN: LazyLock<Regex> = LazyLock::new(|| keyword_pattern("终止角", false));
static MAJOR_AXIS: LazyLock<Regex> =
    LazyLock::new(|| keyword_pattern(r"major\s*(?:axis)?", true));
static MINOR_AXIS: LazyLock<Regex> =
    LazyLock::new(|| keyword_pattern(r"minor\s*(?:axis)?", true));
static ROTATION: LazyLock<Regex> = LazyLock::new(|| keyword_pattern("rotation", true));
static WIDTH: LazyLock<Regex> = LazyLock::new(|| keyword_pattern("width", true));
static HEIGHT: LazyLock<Regex> = LazyLock::new(|| keyword_pattern("height", true));
static WIDTH_CN: LazyLock<Regex> = LazyLock::new(|| keyword_pattern("宽", false));
static HEIGHT_CN: LazyLock<Regex> = LazyLock::new(|| keyword_pattern("高", false));
static TEXT_HEIGHT_CN: LazyLock<Regex> = LazyLock::new(|| keyword_pattern("高度", false));
static PATTERN_SCALE: LazyLock<Regex> = LazyLock::new(|| keyword_pattern("scale", true));
static PATTERN_NAME: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)pattern\s*[=:]?\s*(\w+)"));
static DRAWING_FILE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)(\S+\.dwg)"));

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Runs the parser registered for `shape`, or the generic coordinate parser.
pub fn parse_shape_parameters(shape: Shape, text: &str) -> Parameters {
    match SHAPE_PARSERS.iter().find(|(registered, _)| *registered == shape) {
        Some((_, parser)) => parser(text),
        None => parse_generic(text),
    }
}

/// Collects all coordinates under `points`; empty when there are none.
pub fn parse_generic(text: &str) -> Parameters {
    let mut params = Parameters::new();
    let coords = extract_coordinates(text);
    if !coords.is_empty() {
        insert(&mut params, "points", coords);
    }
    params
}

// ---------------------------------------------------------------------------
// Shape parsers
// ---------------------------------------------------------------------------

pub fn parse_line(text: &str) -> Parameters {
    let coords = extract_coordinates(text);
    let mut params = Parameters::new();

    if let [start, end, ..] = coords[..] {
        insert(&mut params, "start", start);
        insert(&mut params, "end", end);
        return params;
    }

    log::debug!("using default line parameters");
    insert(&mut params, "start", Point::ORIGIN);
    insert(&mut params, "end", Point(100.0, 100.0));
    params
}

pub fn parse_circle(text: &str) -> Parameters {
    let coords = extract_coordinates(text);
    let numbers = extract_numbers(text);
    let mut params = Parameters::new();

    insert(&mut params, "center", first_or_origin(&coords));

    let explicit = keyword_number(&RADIUS, text).or_else(|| keyword_number(&RADIUS_CN, text));
    let radius = match explicit {
        Some(radius) => radius,
        // Each coordinate also contributed two entries to `numbers`.
        None if !coords.is_empty() && numbers.len() > 2 => numbers
            .get(coords.len() * 2)
            .copied()
            .unwrap_or(DEFAULT_RADIUS),
        None if coords.is_empty() && !numbers.is_empty() => numbers[0],
        None => DEFAULT_RADIUS,
    };
    insert(&mut params, "radius", radius);
    params
}

pub fn parse_arc(text: &str) -> Parameters {
    let coords = extract_coordinates(text);
    let mut params = Parameters::new();

    insert(&mut params, "center", first_or_origin(&coords));
    insert(
        &mut params,
        "radius",
        keyword_number(&RADIUS, text).unwrap_or(DEFAULT_RADIUS),
    );

    // Chinese keywords are read last and take precedence.
    let start_angle = keyword_number(&START_ANGLE_CN, text)
        .or_else(|| keyword_number(&START_ANGLE, text))
        .unwrap_or(0.0);
    let end_angle = keyword_number(&END_ANGLE_CN, text)
        .or_else(|| keyword_number(&END_ANGLE, text))
        .unwrap_or(90.0);
    insert(&mut params, "start_angle", start_angle);
    insert(&mut params, "end_angle", end_angle);
    params
}

pub fn parse_ellipse(text: &str) -> Parameters {
    let coords = extract_coordinates(text);
    let mut params = Parameters::new();

    insert(&mut params, "center", first_or_origin(&coords));
    insert(
        &mut params,
        "major_axis",
        keyword_number(&MAJOR_AXIS, text).unwrap_or(100.0),
    );
    insert(
        &mut params,
        "minor_axis",
        keyword_number(&MINOR_AXIS, text).unwrap_or(50.0),
    );
    insert(
        &mut params,
        "rotation",
        keyword_number(&ROTATION, text).unwrap_or(0.0),
    );
    params
}

pub fn parse_rectangle(text: &str) -> Parameters {
    let coords = extract_coordinates(text);
    let mut params = Parameters::new();

    if let [corner1, corner2, ..] = coords[..] {
        insert(&mut params, "corner1", corner1);
        insert(&mut params, "corner2", corner2);
        return params;
    }

    let width = keyword_number(&WIDTH_CN, text)
        .or_else(|| keyword_number(&WIDTH, text))
        .unwrap_or(100.0);
    let height = keyword_number(&HEIGHT_CN, text)
        .or_else(|| keyword_number(&HEIGHT, text))
        .unwrap_or(50.0);

    insert(&mut params, "corner1", Point::ORIGIN);
    insert(&mut params, "corner2", Point(width, height));
    params
}

pub fn parse_polyline(text: &str) -> Parameters {
    let coords = extract_coordinates(text);
    let lowered = text.to_lowercase();
    let closed = CLOSING_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword));

    let points = if coords.len() >= 2 {
        coords
    } else {
        log::debug!("using default polyline points");
        vec![Point::ORIGIN, Point(50.0, 50.0), Point(100.0, 0.0)]
    };

    let mut params = Parameters::new();
    insert(&mut params, "points", points);
    insert(&mut params, "closed", closed);
    params
}

pub fn parse_text(text: &str) -> Parameters {
    let coords = extract_coordinates(text);
    let content = extract_quoted_text(text).unwrap_or_else(|| DEFAULT_TEXT.to_string());
    let height = keyword_number(&TEXT_HEIGHT_CN, text)
        .or_else(|| keyword_number(&HEIGHT, text))
        .unwrap_or(DEFAULT_TEXT_HEIGHT);

    let mut params = Parameters::new();
    insert(&mut params, "position", first_or_origin(&coords));
    insert(&mut params, "text", content);
    insert(&mut params, "height", height);
    insert(
        &mut params,
        "rotation",
        keyword_number(&ROTATION, text).unwrap_or(0.0),
    );
    params
}

pub fn parse_dimension(text: &str) -> Parameters {
    let coords = extract_coordinates(text);
    let mut params = Parameters::new();

    match coords[..] {
        [start, end, ref rest @ ..] => {
            let text_position = rest.first().copied().unwrap_or_else(|| {
                Point((start.x() + end.x()) / 2.0, (start.y() + end.y()) / 2.0 + 10.0)
            });
            insert(&mut params, "start", start);
            insert(&mut params, "end", end);
            insert(&mut params, "text_position", text_position);
        }
        _ => {
            log::debug!("using default dimension parameters");
            insert(&mut params, "start", Point::ORIGIN);
            insert(&mut params, "end", Point(100.0, 0.0));
            insert(&mut params, "text_position", Point(50.0, 10.0));
        }
    }
    params
}

pub fn parse_hatch(text: &str) -> Parameters {
    let coords = extract_coordinates(text);
    let boundary = if coords.len() >= 3 {
        coords
    } else {
        vec![
            Point::ORIGIN,
            Point(100.0, 0.0),
            Point(100.0, 100.0),
            Point(0.0, 100.0),
        ]
    };
    let pattern_name = PATTERN_NAME
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().to_uppercase())
        .unwrap_or_else(|| DEFAULT_HATCH_PATTERN.to_string());

    let mut params = Parameters::new();
    insert(&mut params, "boundary_points", boundary);
    insert(&mut params, "pattern_name", pattern_name);
    insert(
        &mut params,
        "pattern_scale",
        keyword_number(&PATTERN_SCALE, text).unwrap_or(1.0),
    );
    params
}

/// Returns the file path named in a save command: a quoted span, then a
/// `*.dwg` token.
pub fn extract_save_path(text: &str) -> Option<String> {
    extract_quoted_text(text).or_else(|| {
        DRAWING_FILE
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|token| token.as_str().to_string())
    })
}

/// Extracts `file_path`, falling back to the default name.
pub fn parse_save(text: &str) -> Parameters {
    let file_path = extract_save_path(text).unwrap_or_else(|| DEFAULT_DRAWING_FILE.to_string());

    let mut params = Parameters::new();
    insert(&mut params, "file_path", file_path);
    params
}

fn first_or_origin(coords: &[Point]) -> Point {
    coords.first().copied().unwrap_or(Point::ORIGIN)
}

fn insert(params: &mut Parameters, key: &str, value: impl Into<ParamValue>) {
    params.insert(key.to_string(), value.into());
}
