//! Stateless extractors over raw command text.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Point;

/// Unsigned-or-negative decimal literal: `-?\d+\.?\d*`.
const NUMBER: &str = r"-?[0-9]+\.?[0-9]*";

static COORDINATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(r"\(?\s*({NUMBER})\s*,\s*({NUMBER})\s*\)?"))
});

static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| compile(&format!("({NUMBER})")));

static QUOTED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"["']([^"']+)["']|"([^"]+)"|「([^」]+)」"#));

/// Compiles one of the crate's fixed patterns.
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern)
        .unwrap_or_else(|error| panic!("invalid built-in pattern {pattern:?}: {error}"))
}

/// Returns every `x, y` pair in order of appearance. Parentheses are optional.
pub fn extract_coordinates(text: &str) -> Vec<Point> {
    COORDINATE_PATTERN
        .captures_iter(text)
        .filter_map(|captures| {
            let x = parse_literal(captures.get(1)?.as_str())?;
            let y = parse_literal(captures.get(2)?.as_str())?;
            Some(Point(x, y))
        })
        .collect()
}

/// Returns every numeric literal in order of appearance, including the
/// components of coordinate pairs.
pub fn extract_numbers(text: &str) -> Vec<f64> {
    NUMBER_PATTERN
        .captures_iter(text)
        .filter_map(|captures| parse_literal(captures.get(1)?.as_str()))
        .collect()
}

/// Returns the first span inside straight quotes or corner brackets.
///
/// Alternatives are tried left to right at each position: a span free of
/// both quote kinds first, then a double-quoted span that may hold
/// apostrophes, then corner brackets.
pub fn extract_quoted_text(text: &str) -> Option<String> {
    let captures = QUOTED_PATTERN.captures(text)?;
    (1..=3)
        .find_map(|group| captures.get(group))
        .map(|span| span.as_str().to_string())
}

/// Returns the number captured by the first group of `pattern`, if it matches.
pub fn keyword_number(pattern: &Regex, text: &str) -> Option<f64> {
    let captures = pattern.captures(text)?;
    parse_literal(captures.get(1)?.as_str())
}

// Literals are pre-validated by the patterns; "5." is accepted by f64's parser.
fn parse_literal(raw: &str) -> Option<f64> {
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_preserve_order() {
        assert_eq!(
            extract_coordinates("(0,0) (10,20)"),
            vec![Point(0.0, 0.0), Point(10.0, 20.0)]
        );
    }

    #[test]
    fn coordinates_tolerate_missing_parens_and_spaces() {
        assert_eq!(
            extract_coordinates("from 1.5 , -2 to ( 30,40 )"),
            vec![Point(1.5, -2.0), Point(30.0, 40.0)]
        );
    }

    #[test]
    fn coordinates_empty_without_pairs() {
        assert!(extract_coordinates("radius 50").is_empty());
        assert!(extract_coordinates("").is_empty());
    }

    #[test]
    fn numbers_include_coordinate_components() {
        assert_eq!(
            extract_numbers("circle at (100, 100) radius 50"),
            vec![100.0, 100.0, 50.0]
        );
    }

    #[test]
    fn numbers_accept_trailing_dot_and_sign() {
        assert_eq!(extract_numbers("move 5. by -3.25"), vec![5.0, -3.25]);
    }

    #[test]
    fn numbers_found_inside_words() {
        assert_eq!(extract_numbers("layer2 半径30"), vec![2.0, 30.0]);
    }

    #[test]
    fn quoted_text_double_and_single() {
        assert_eq!(
            extract_quoted_text(r#"write "Hello World" here"#).as_deref(),
            Some("Hello World")
        );
        assert_eq!(extract_quoted_text("write 'ciao' qui").as_deref(), Some("ciao"));
    }

    #[test]
    fn quoted_text_keeps_apostrophes_inside_double_quotes() {
        assert_eq!(
            extract_quoted_text(r#"say "'hi'" now"#).as_deref(),
            Some("'hi'")
        );
        // An apostrophe inside an ordinary span still closes the first alternative.
        assert_eq!(
            extract_quoted_text(r#"label "it's done""#).as_deref(),
            Some("it")
        );
    }

    #[test]
    fn quoted_text_corner_brackets() {
        assert_eq!(extract_quoted_text("写文字「你好」").as_deref(), Some("你好"));
    }

    #[test]
    fn quoted_text_returns_first_span() {
        assert_eq!(
            extract_quoted_text(r#"'first' and "second""#).as_deref(),
            Some("first")
        );
    }

    #[test]
    fn quoted_text_none_when_unquoted() {
        assert_eq!(extract_quoted_text("no quotes"), None);
        assert_eq!(extract_quoted_text(r#"empty "" quotes"#), None);
    }

    #[test]
    fn keyword_number_reads_first_group() {
        let pattern = compile(r"(?i)radius\s*[=:]?\s*([0-9]+\.?[0-9]*)");
        assert_eq!(keyword_number(&pattern, "Radius = 12.5"), Some(12.5));
        assert_eq!(keyword_number(&pattern, "radius:7"), Some(7.0));
        assert_eq!(keyword_number(&pattern, "no radius here"), None);
    }
}
