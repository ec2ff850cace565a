use tracing::trace;

use crate::core::format::format_grouped;
use crate::core::intersected_indices;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{DragState, SCRUBBER_INITIAL_FRACTION, ScrubberState};
use crate::render::{
    CanvasLayerKind, Color, LayeredRenderFrame, LinePrimitive, RectPrimitive, Renderer, TextHAlign,
    TextVAlign,
};

use super::GanttChart;

/// Horizontal distance from the scrubber line that still grabs it.
pub const SCRUBBER_HIT_SLOP_PX: f64 = 6.0;
pub const SCRUBBER_HANDLE_WIDTH_PX: f64 = 12.0;
pub const SCRUBBER_HANDLE_HEIGHT_PX: f64 = 16.0;
const SCRUBBER_LINE_WIDTH_PX: f64 = 2.0;
const SCRUBBER_LABEL_GAP_PX: f64 = 6.0;
const SCRUBBER_LABEL_PADDING_PX: f64 = 4.0;
const SCRUBBER_COLOR: Color = Color::rgb(0.85, 0.2, 0.2);

impl<R: Renderer> GanttChart<R> {
    #[must_use]
    pub fn scrubber(&self) -> Option<&ScrubberState> {
        self.scrubber.as_ref()
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Whether `(x, y)` in container pixels is on the scrubber line or handle.
    #[must_use]
    pub fn scrubber_hit_test(&self, x: f64, y: f64) -> bool {
        let Some(scrubber) = &self.scrubber else {
            return false;
        };
        let line_x = self.plot.left + scrubber.position_px;
        let reach = SCRUBBER_HIT_SLOP_PX.max(SCRUBBER_HANDLE_WIDTH_PX / 2.0);
        let handle_top = self.plot.top - SCRUBBER_HANDLE_HEIGHT_PX / 2.0;
        (x - line_x).abs() <= reach && y >= handle_top && y <= self.plot.bottom()
    }

    /// Starts a drag when the pointer lands on the scrubber.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        if self.drag == DragState::Dragging || !self.scrubber_hit_test(x, y) {
            return false;
        }
        self.drag = DragState::Dragging;
        trace!(x, y, "scrubber drag started");
        true
    }

    /// Moves the scrubber while dragging; otherwise updates hover.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        match self.drag {
            DragState::Dragging => self.set_scrubber_position_px(x - self.plot.left),
            DragState::Idle => self.pointer_hover(x, y),
        }
    }

    pub fn pointer_up(&mut self) {
        if self.drag == DragState::Dragging {
            trace!("scrubber drag ended");
        }
        self.drag = DragState::Idle;
    }

    /// Moves the scrubber to a plot-relative pixel position, clamped to the
    /// plot width, then redraws and publishes `scrubberMove`. The event is
    /// published even when the redraw fails; the draw error is returned.
    pub fn set_scrubber_position_px(&mut self, position_px: f64) -> ChartResult<()> {
        if !position_px.is_finite() {
            return Err(ChartError::InvalidData(
                "scrubber position must be finite".to_owned(),
            ));
        }
        if self.scrubber.is_none() {
            return Err(ChartError::InvalidData(
                "scrubber is not active for this render".to_owned(),
            ));
        }

        let clamped = position_px.clamp(0.0, self.plot.width);
        self.scrubber = self.compute_scrubber_state(clamped);
        self.apply_scrubber_to_bars();
        trace!(
            position_px = clamped,
            intersected = self.scrubber.as_ref().map_or(0, |s| s.intersected.len()),
            "scrubber moved"
        );

        let drawn = self.redraw();
        self.publish_scrubber_move();
        drawn
    }

    /// Moves the scrubber to the pixel position of a domain value.
    pub fn set_scrubber_value(&mut self, value: f64) -> ChartResult<()> {
        let Some(scales) = &self.scales else {
            return Err(ChartError::InvalidData(
                "scrubber is not active for this render".to_owned(),
            ));
        };
        let position_px = scales.x.map(value);
        self.set_scrubber_position_px(position_px)
    }

    pub(super) fn init_scrubber(&mut self) {
        if !self.config.scrubber_active() {
            return;
        }
        self.scrubber = self.compute_scrubber_state(self.plot.width * SCRUBBER_INITIAL_FRACTION);
        self.apply_scrubber_to_bars();
    }

    fn compute_scrubber_state(&self, position_px: f64) -> Option<ScrubberState> {
        let scales = self.scales.as_ref()?;
        Some(ScrubberState {
            position_px,
            position_value: scales.x.invert(position_px),
            intersected: intersected_indices(scales.x, &self.entries, position_px),
        })
    }

    fn apply_scrubber_to_bars(&mut self) {
        let Some(scrubber) = &self.scrubber else {
            return;
        };
        for (index, bar) in self.bars.iter_mut().enumerate() {
            bar.apply_scrubber(scrubber.is_intersected(index));
        }
    }

    pub(super) fn push_scrubber_layer(&self, frame: &mut LayeredRenderFrame) {
        let Some(scrubber) = &self.scrubber else {
            return;
        };
        let layer = CanvasLayerKind::Scrubber;
        let line_x = self.plot.left + scrubber.position_px;

        frame.push_line(
            layer,
            LinePrimitive::new(
                line_x,
                self.plot.top,
                line_x,
                self.plot.bottom(),
                SCRUBBER_LINE_WIDTH_PX,
                SCRUBBER_COLOR,
            ),
        );
        frame.push_rect(
            layer,
            RectPrimitive::new(
                line_x - SCRUBBER_HANDLE_WIDTH_PX / 2.0,
                self.plot.top - SCRUBBER_HANDLE_HEIGHT_PX / 2.0,
                SCRUBBER_HANDLE_WIDTH_PX,
                SCRUBBER_HANDLE_HEIGHT_PX,
                SCRUBBER_COLOR,
            )
            .with_corner_radius(3.0)
            .with_element_id("scrubber-handle"),
        );

        let label = format_grouped(scrubber.position_value, 1);
        let font_size = self.config.axis_font_size;
        let label_width = label.chars().count() as f64 * font_size * 0.6
            + 2.0 * SCRUBBER_LABEL_PADDING_PX;
        let label_height = font_size + 2.0 * SCRUBBER_LABEL_PADDING_PX;
        let mut label_x = line_x + SCRUBBER_LABEL_GAP_PX;
        if label_x + label_width > self.plot.right() {
            label_x = line_x - SCRUBBER_LABEL_GAP_PX - label_width;
        }
        let label_y = self.plot.top + SCRUBBER_HANDLE_HEIGHT_PX / 2.0 + SCRUBBER_LABEL_GAP_PX;

        frame.push_rect(
            layer,
            RectPrimitive::new(label_x, label_y, label_width, label_height, SCRUBBER_COLOR)
                .with_corner_radius(2.0),
        );
        frame.push_text(
            layer,
            self.text_primitive(
                label,
                label_x + label_width / 2.0,
                label_y + label_height / 2.0,
                font_size,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Middle)
            .with_color(Color::rgb(1.0, 1.0, 1.0)),
        );
    }
}
