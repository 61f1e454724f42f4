//! Multilingual drawing-command parser.
//!
//! Turns freeform English, Italian, or Chinese text such as
//! "draw a red circle at (100,100) radius 50" into a [`ParsedCommand`]:
//! - Keyword tables normalizing actions, shapes, and colors
//! - Coordinate, number, and quoted-text extraction
//! - Per-shape parameter parsers with default fallbacks
//! - A single-pass orchestrator computing a confidence score
//!
//! Parsing is pure and synchronous; every table and compiled pattern is an
//! immutable process-wide static.

pub mod extract;
pub mod keywords;
pub mod parser;
pub mod shapes;
pub mod types;

// Re-export main types
pub use extract::{extract_coordinates, extract_numbers, extract_quoted_text};
pub use keywords::{extract_color, lookup_action, lookup_shape};
pub use parser::{parse_command, CommandParser};
pub use shapes::DEFAULT_DRAWING_FILE;
pub use types::{Action, ColorIndex, ParamValue, Parameters, ParsedCommand, Point, Shape};
