use indexmap::{IndexMap, IndexSet};
use tracing::warn;

use crate::core::TimelineEntry;
use crate::render::Color;

/// Color used when a configured color string cannot be parsed.
pub const FALLBACK_BAR_COLOR: Color = Color::rgb(0.6, 0.6, 0.6);

/// Per-render mapping from entries to fill and stroke colors.
///
/// With a palette, each category gets `palette[first_seen_index % len]`; the
/// assignment is computed once when the resolver is built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorResolver {
    category_colors: Option<IndexMap<String, Color>>,
}

impl ColorResolver {
    #[must_use]
    pub fn new(palette: Option<&[String]>, categories: &IndexSet<String>) -> Self {
        let category_colors = palette.filter(|palette| !palette.is_empty()).map(|palette| {
            let parsed: Vec<Color> = palette.iter().map(|color| parse_or_fallback(color)).collect();
            categories
                .iter()
                .enumerate()
                .map(|(index, category)| (category.clone(), parsed[index % parsed.len()]))
                .collect()
        });
        Self { category_colors }
    }

    #[must_use]
    pub fn fill(&self, entry: &TimelineEntry) -> Color {
        self.category_colors
            .as_ref()
            .and_then(|colors| colors.get(&entry.category).copied())
            .unwrap_or_else(|| parse_or_fallback(&entry.color))
    }

    #[must_use]
    pub fn stroke(&self, entry: &TimelineEntry) -> Color {
        match &entry.stroke_color {
            Some(stroke) => parse_or_fallback(stroke),
            None => self.fill(entry),
        }
    }
}

pub(crate) fn parse_or_fallback(input: &str) -> Color {
    Color::parse(input).unwrap_or_else(|| {
        warn!(color = input, "unrecognized color; using fallback");
        FALLBACK_BAR_COLOR
    })
}
