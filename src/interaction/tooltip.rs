use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::format::format_grouped;
use crate::core::{TimelineEntry, Viewport};

/// Distance between the cursor and the tooltip's nearest corner.
pub const TOOLTIP_CURSOR_OFFSET_PX: f64 = 12.0;
const TOOLTIP_PADDING_PX: f64 = 8.0;
const TOOLTIP_LINE_HEIGHT_RATIO: f64 = 1.4;
const TOOLTIP_CHAR_WIDTH_RATIO: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipRow {
    pub label: String,
    pub value: String,
}

/// Markup-free tooltip content for one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub title: String,
    pub rows: SmallVec<[TooltipRow; 4]>,
    pub note: Option<String>,
}

impl TooltipContent {
    #[must_use]
    pub fn for_entry(entry: &TimelineEntry) -> Self {
        let title = match &entry.subcategory {
            Some(subcategory) => format!("{} / {subcategory}", entry.category),
            None => entry.category.clone(),
        };
        let rows = [
            ("Start", entry.start),
            ("Duration", entry.duration),
            ("End", entry.end()),
        ]
        .into_iter()
        .map(|(label, value)| TooltipRow {
            label: label.to_owned(),
            value: format_grouped(value, 2),
        })
        .collect();

        Self {
            title,
            rows,
            note: entry.text.clone(),
        }
    }

    /// Text lines in display order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.title.clone());
        lines.extend(
            self.rows
                .iter()
                .map(|row| format!("{}: {}", row.label, row.value)),
        );
        if let Some(note) = &self.note {
            lines.push(note.clone());
        }
        lines
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipSize {
    pub width: f64,
    pub height: f64,
    pub line_height: f64,
    pub padding: f64,
}

/// Approximate box size from character counts; no font metrics are available
/// headlessly.
#[must_use]
pub fn estimate_tooltip_size(content: &TooltipContent, font_size_px: f64) -> TooltipSize {
    let lines = content.lines();
    let longest = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let line_height = font_size_px * TOOLTIP_LINE_HEIGHT_RATIO;
    TooltipSize {
        width: longest as f64 * font_size_px * TOOLTIP_CHAR_WIDTH_RATIO + 2.0 * TOOLTIP_PADDING_PX,
        height: lines.len() as f64 * line_height + 2.0 * TOOLTIP_PADDING_PX,
        line_height,
        padding: TOOLTIP_PADDING_PX,
    }
}

/// Top-left corner of the tooltip box.
///
/// The box sits below-right of the cursor, flips to the opposite side on an
/// axis where it would overflow, and is finally clamped into the container.
#[must_use]
pub fn place_tooltip(
    cursor_x: f64,
    cursor_y: f64,
    size: TooltipSize,
    container: Viewport,
) -> (f64, f64) {
    let x = place_axis(cursor_x, size.width, f64::from(container.width));
    let y = place_axis(cursor_y, size.height, f64::from(container.height));
    (x, y)
}

fn place_axis(cursor: f64, extent: f64, limit: f64) -> f64 {
    let mut start = cursor + TOOLTIP_CURSOR_OFFSET_PX;
    if start + extent > limit {
        start = cursor - TOOLTIP_CURSOR_OFFSET_PX - extent;
    }
    start.clamp(0.0, (limit - extent).max(0.0))
}
