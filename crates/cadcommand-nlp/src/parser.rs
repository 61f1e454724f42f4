//! Single-pass command parser: action, shape, parameters, color, confidence.

use crate::keywords::{extract_color, lookup_action, lookup_shape};
use crate::shapes::{extract_save_path, parse_save, parse_shape_parameters};
use crate::types::{Action, ParamValue, Parameters, ParsedCommand};

pub const CONFIDENCE_NO_SHAPE: f64 = 0.3;
pub const CONFIDENCE_DEFAULTS_ONLY: f64 = 0.5;
pub const CONFIDENCE_PARAMETERS: f64 = 0.8;

/// Stateless parser handle. All tables and patterns are process-wide statics,
/// so one value can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandParser;

impl CommandParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, text: &str) -> ParsedCommand {
        parse_command(text)
    }

    /// Save commands carry no shape, so their file path is read separately.
    pub fn parse_save(&self, text: &str) -> Parameters {
        parse_save(text)
    }

    /// File path named in a save command, if any.
    pub fn save_path(&self, text: &str) -> Option<String> {
        extract_save_path(text)
    }
}

/// Parses one freeform command. Never fails; unrecognized input degrades to
/// defaults and a lower confidence.
pub fn parse_command(text: &str) -> ParsedCommand {
    let action = lookup_action(text).unwrap_or(Action::Draw);

    let Some(shape) = lookup_shape(text) else {
        return ParsedCommand {
            action,
            shape: None,
            parameters: Parameters::new(),
            raw_text: text.to_string(),
            confidence: CONFIDENCE_NO_SHAPE,
        };
    };

    let mut parameters = parse_shape_parameters(shape, text);
    if let Some(color) = extract_color(text) {
        parameters.insert("color".to_string(), ParamValue::Integer(i64::from(color)));
    }

    let confidence = if parameters.is_empty() {
        CONFIDENCE_DEFAULTS_ONLY
    } else {
        CONFIDENCE_PARAMETERS
    };

    ParsedCommand {
        action,
        shape: Some(shape),
        parameters,
        raw_text: text.to_string(),
        confidence,
    }
}
