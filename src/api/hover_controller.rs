use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ChartError, ChartResult};
use crate::interaction::{
    HoverState, TooltipContent, TooltipSize, estimate_tooltip_size, place_tooltip,
};
use crate::render::{
    CanvasLayerKind, Color, LayeredRenderFrame, RectPrimitive, Renderer, TextHAlign, TextVAlign,
};

use super::GanttChart;

const TOOLTIP_BACKGROUND: Color = Color::rgba(1.0, 1.0, 1.0, 0.95);
const TOOLTIP_BORDER: Color = Color::rgb(0.6, 0.6, 0.6);

/// Tooltip ready for display: content plus its placed box in container pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipView {
    pub content: TooltipContent,
    pub x: f64,
    pub y: f64,
    pub size: TooltipSize,
}

impl<R: Renderer> GanttChart<R> {
    #[must_use]
    pub fn hover(&self) -> Option<HoverState> {
        self.hover
    }

    /// Topmost bar under `(x, y)`; later entries draw above earlier ones.
    pub fn hit_test_bar(&self, x: f64, y: f64) -> ChartResult<Option<usize>> {
        Ok(self
            .bar_geometries()?
            .into_iter()
            .rev()
            .find(|bar| bar.contains(x, y))
            .map(|bar| bar.index))
    }

    /// Routes an idle pointer move to enter, move or leave.
    pub fn pointer_hover(&mut self, x: f64, y: f64) -> ChartResult<()> {
        if !self.config.interactive_mode {
            return Ok(());
        }
        match (self.hit_test_bar(x, y)?, self.hover) {
            (Some(bar), Some(current)) if current.bar == bar => self.hover_move(x, y),
            (Some(bar), _) => self.hover_enter(bar, x, y),
            (None, Some(_)) => self.hover_leave(),
            (None, None) => Ok(()),
        }
    }

    pub fn hover_enter(&mut self, bar: usize, cursor_x: f64, cursor_y: f64) -> ChartResult<()> {
        if !self.config.interactive_mode {
            return Ok(());
        }
        if bar >= self.bars.len() {
            return Err(ChartError::InvalidData(format!(
                "bar index {bar} out of range for {} entries",
                self.bars.len()
            )));
        }

        if let Some(previous) = self.hover.take() {
            if previous.bar != bar {
                self.bars[previous.bar].hover_leave();
            }
        }
        self.bars[bar].hover_enter();
        self.hover = Some(HoverState {
            bar,
            cursor_x,
            cursor_y,
        });
        trace!(bar, cursor_x, cursor_y, "hover enter");
        self.redraw()
    }

    /// Repositions the tooltip; bar styling is left alone.
    pub fn hover_move(&mut self, cursor_x: f64, cursor_y: f64) -> ChartResult<()> {
        let Some(hover) = &mut self.hover else {
            return Ok(());
        };
        hover.cursor_x = cursor_x;
        hover.cursor_y = cursor_y;
        self.redraw()
    }

    pub fn hover_leave(&mut self) -> ChartResult<()> {
        let Some(hover) = self.hover.take() else {
            return Ok(());
        };
        if let Some(bar) = self.bars.get_mut(hover.bar) {
            bar.hover_leave();
        }
        trace!(bar = hover.bar, "hover leave");
        self.redraw()
    }

    /// Tooltip for the hovered bar, placed inside the chart viewport.
    #[must_use]
    pub fn tooltip(&self) -> Option<TooltipView> {
        let hover = self.hover?;
        let entry = self.entries.get(hover.bar)?;
        let content = TooltipContent::for_entry(entry);
        let size = estimate_tooltip_size(&content, self.config.axis_font_size);
        let (x, y) = place_tooltip(hover.cursor_x, hover.cursor_y, size, self.viewport);
        Some(TooltipView {
            content,
            x,
            y,
            size,
        })
    }

    pub(super) fn push_tooltip_layer(&self, frame: &mut LayeredRenderFrame) {
        let Some(view) = self.tooltip() else {
            return;
        };
        let layer = CanvasLayerKind::Tooltip;
        frame.push_rect(
            layer,
            RectPrimitive::new(view.x, view.y, view.size.width, view.size.height, TOOLTIP_BACKGROUND)
                .with_border(1.0, TOOLTIP_BORDER)
                .with_corner_radius(4.0),
        );

        for (row, line) in view.content.lines().into_iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = view.y + view.size.padding + row as f64 * view.size.line_height;
            frame.push_text(
                layer,
                self.text_primitive(
                    line,
                    view.x + view.size.padding,
                    y,
                    self.config.axis_font_size,
                    TextHAlign::Left,
                )
                .with_v_align(TextVAlign::Top)
                .with_bold(row == 0),
            );
        }
    }
}
