//! Multilingual keyword tables for actions, shapes, and colors.
//!
//! Action and shape lookups scan their tables in declaration order and return
//! the first surface form found anywhere in the text. Colors are matched with a
//! single alternation sorted longest-first.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::types::{Action, ColorIndex, Shape};

// ---------------------------------------------------------------------------
// Action table
// ---------------------------------------------------------------------------

pub const ACTION_KEYWORDS: &[(&str, Action)] = &[
    // English
    ("draw", Action::Draw),
    ("create", Action::Draw),
    ("add", Action::Draw),
    ("make", Action::Draw),
    ("place", Action::Draw),
    ("insert", Action::Draw),
    ("modify", Action::Modify),
    ("change", Action::Modify),
    ("edit", Action::Modify),
    ("move", Action::Move),
    ("rotate", Action::Rotate),
    ("scale", Action::Scale),
    ("resize", Action::Scale),
    ("delete", Action::Erase),
    ("remove", Action::Erase),
    ("erase", Action::Erase),
    ("save", Action::Save),
    // Italian
    ("disegna", Action::Draw),
    ("crea", Action::Draw),
    ("aggiungi", Action::Draw),
    ("inserisci", Action::Draw),
    ("traccia", Action::Draw),
    ("modifica", Action::Modify),
    ("cambia", Action::Modify),
    ("sposta", Action::Move),
    ("ruota", Action::Rotate),
    ("scala", Action::Scale),
    ("ridimensiona", Action::Scale),
    ("elimina", Action::Erase),
    ("cancella", Action::Erase),
    ("rimuovi", Action::Erase),
    ("salva", Action::Save),
    // Chinese
    ("画", Action::Draw),
    ("绘制", Action::Draw),
    ("创建", Action::Draw),
    ("添加", Action::Draw),
    ("制作", Action::Draw),
    ("放置", Action::Draw),
    ("修改", Action::Modify),
    ("更改", Action::Modify),
    ("调整", Action::Modify),
    ("移动", Action::Move),
    ("旋转", Action::Rotate),
    ("缩放", Action::Scale),
    ("删除", Action::Erase),
    ("移除", Action::Erase),
    ("擦除", Action::Erase),
    ("保存", Action::Save),
];

// ---------------------------------------------------------------------------
// Shape table
// ---------------------------------------------------------------------------

pub const SHAPE_KEYWORDS: &[(&str, Shape)] = &[
    // English
    ("line", Shape::Line),
    ("circle", Shape::Circle),
    ("arc", Shape::Arc),
    ("ellipse", Shape::Ellipse),
    ("rectangle", Shape::Rectangle),
    ("rect", Shape::Rectangle),
    ("square", Shape::Rectangle),
    ("polyline", Shape::Polyline),
    ("polygon", Shape::Polyline),
    ("text", Shape::Text),
    ("dimension", Shape::Dimension),
    ("hatch", Shape::Hatch),
    ("fill", Shape::Hatch),
    // Italian
    ("linea", Shape::Line),
    ("cerchio", Shape::Circle),
    ("arco", Shape::Arc),
    ("ellisse", Shape::Ellipse),
    ("rettangolo", Shape::Rectangle),
    ("quadrato", Shape::Rectangle),
    ("polilinea", Shape::Polyline),
    ("poligono", Shape::Polyline),
    ("testo", Shape::Text),
    ("quota", Shape::Dimension),
    ("quotatura", Shape::Dimension),
    ("riempimento", Shape::Hatch),
    ("tratteggio", Shape::Hatch),
    // Chinese
    ("线", Shape::Line),
    ("直线", Shape::Line),
    ("圆", Shape::Circle),
    ("圆形", Shape::Circle),
    ("弧", Shape::Arc),
    ("圆弧", Shape::Arc),
    ("椭圆", Shape::Ellipse),
    ("椭圆形", Shape::Ellipse),
    ("矩形", Shape::Rectangle),
    ("方形", Shape::Rectangle),
    ("正方形", Shape::Rectangle),
    ("多段线", Shape::Polyline),
    ("折线", Shape::Polyline),
    ("多边形", Shape::Polyline),
    ("文字", Shape::Text),
    ("文本", Shape::Text),
    ("标注", Shape::Dimension),
    ("尺寸", Shape::Dimension),
    ("填充", Shape::Hatch),
    ("图案填充", Shape::Hatch),
];

// ---------------------------------------------------------------------------
// Color table
// ---------------------------------------------------------------------------

pub const COLOR_KEYWORDS: &[(&str, ColorIndex)] = &[
    // English
    ("red", 1),
    ("yellow", 2),
    ("green", 3),
    ("cyan", 4),
    ("blue", 5),
    ("magenta", 6),
    ("white", 7),
    ("gray", 8),
    ("grey", 8),
    ("black", 250),
    ("orange", 30),
    ("brown", 33),
    ("purple", 200),
    ("pink", 221),
    // Italian (masculine/feminine)
    ("rosso", 1),
    ("rossa", 1),
    ("giallo", 2),
    ("gialla", 2),
    ("verde", 3),
    ("ciano", 4),
    ("blu", 5),
    ("azzurro", 5),
    ("azzurra", 5),
    ("bianco", 7),
    ("bianca", 7),
    ("grigio", 8),
    ("grigia", 8),
    ("nero", 250),
    ("nera", 250),
    ("arancione", 30),
    ("marrone", 33),
    ("viola", 200),
    ("rosa", 221),
    // Chinese
    ("红", 1),
    ("红色", 1),
    ("黄", 2),
    ("黄色", 2),
    ("绿", 3),
    ("绿色", 3),
    ("青", 4),
    ("青色", 4),
    ("蓝", 5),
    ("蓝色", 5),
    ("洋红", 6),
    ("洋红色", 6),
    ("紫红", 6),
    ("白", 7),
    ("白色", 7),
    ("灰", 8),
    ("灰色", 8),
    ("黑", 250),
    ("黑色", 250),
    ("橙", 30),
    ("橙色", 30),
    ("棕", 33),
    ("棕色", 33),
    ("紫", 200),
    ("紫色", 200),
    ("粉", 221),
    ("粉色", 221),
    ("粉红", 221),
];

/// All color surface forms in one case-insensitive alternation, longest first
/// so that a compound such as "红色" is never cut short by "红".
static COLOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let mut names: Vec<&str> = COLOR_KEYWORDS.iter().map(|(name, _)| *name).collect();
    names.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    let alternation = names
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .expect("color alternation is built from escaped literals")
});

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Returns the action of the first table entry occurring in `text`.
pub fn lookup_action(text: &str) -> Option<Action> {
    first_in_table(ACTION_KEYWORDS, text)
}

/// Returns the shape of the first table entry occurring in `text`.
pub fn lookup_shape(text: &str) -> Option<Shape> {
    first_in_table(SHAPE_KEYWORDS, text)
}

/// Returns the color index of the leftmost (then longest) color word in `text`.
pub fn extract_color(text: &str) -> Option<ColorIndex> {
    let found = COLOR_PATTERN.find(text)?;
    let name = found.as_str().to_lowercase();
    COLOR_KEYWORDS
        .iter()
        .find(|(surface, _)| *surface == name)
        .map(|(_, index)| *index)
}

// Declaration order wins, not match length: "polyline" resolves to `line`.
fn first_in_table<T: Copy>(table: &[(&str, T)], text: &str) -> Option<T> {
    let lowered = text.to_lowercase();
    table
        .iter()
        .find(|(surface, _)| lowered.contains(surface))
        .map(|(_, tag)| *tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_lookup_is_case_insensitive() {
        assert_eq!(lookup_action("DRAW a line"), Some(Action::Draw));
        assert_eq!(lookup_action("Rotate it"), Some(Action::Rotate));
    }

    #[test]
    fn action_lookup_covers_each_language() {
        assert_eq!(lookup_action("salva il disegno"), Some(Action::Save));
        assert_eq!(lookup_action("删除这个圆"), Some(Action::Erase));
        assert_eq!(lookup_action("sposta il cerchio"), Some(Action::Move));
    }

    #[test]
    fn action_lookup_none_when_absent() {
        assert_eq!(lookup_action("a circle please"), None);
        assert_eq!(lookup_action(""), None);
    }

    #[test]
    fn first_declared_entry_wins_over_longer_match() {
        // "polyline" contains "line", which is declared first.
        assert_eq!(lookup_shape("a polyline through points"), Some(Shape::Line));
        // "rectangle" is declared before "rect"; both are rectangles anyway.
        assert_eq!(lookup_shape("rect"), Some(Shape::Rectangle));
        // "圆" precedes "椭圆" in the table.
        assert_eq!(lookup_shape("椭圆"), Some(Shape::Circle));
    }

    #[test]
    fn earlier_action_in_table_wins_regardless_of_position() {
        // "save" appears first in the text but "draw" is declared first.
        assert_eq!(lookup_action("save then draw"), Some(Action::Draw));
        assert_eq!(lookup_action("scala"), Some(Action::Scale));
    }

    #[test]
    fn shape_lookup_italian_and_chinese() {
        assert_eq!(lookup_shape("disegna un cerchio"), Some(Shape::Circle));
        assert_eq!(lookup_shape("画一个矩形"), Some(Shape::Rectangle));
        assert_eq!(lookup_shape("添加标注"), Some(Shape::Dimension));
        assert_eq!(lookup_shape("nothing here"), None);
    }

    #[test]
    fn color_prefers_longer_compound() {
        assert_eq!(extract_color("画一个洋红色的圆"), Some(6));
        assert_eq!(extract_color("粉红"), Some(221));
        assert_eq!(extract_color("红色"), Some(1));
    }

    #[test]
    fn color_is_case_insensitive() {
        assert_eq!(extract_color("a RED circle"), Some(1));
        assert_eq!(extract_color("Grey box"), Some(8));
        assert_eq!(extract_color("cerchio Azzurro"), Some(5));
    }

    #[test]
    fn color_leftmost_match_wins() {
        assert_eq!(extract_color("blue then red"), Some(5));
    }

    #[test]
    fn color_none_when_absent() {
        assert_eq!(extract_color("draw a circle"), None);
    }

    #[test]
    fn tables_use_lowercase_surface_forms() {
        let surfaces = ACTION_KEYWORDS
            .iter()
            .map(|(surface, _)| *surface)
            .chain(SHAPE_KEYWORDS.iter().map(|(surface, _)| *surface))
            .chain(COLOR_KEYWORDS.iter().map(|(surface, _)| *surface));
        for surface in surfaces {
            assert_eq!(surface.to_lowercase(), surface);
        }
    }
}
