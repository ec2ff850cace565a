use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::format::format_tick;
use crate::core::CategoryScale;
use crate::error::ChartResult;
use crate::render::{
    CanvasLayerKind, Color, LayerStack, LayeredRenderFrame, LinePrimitive, LineStrokeStyle,
    RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive, TextVAlign,
};

use super::GanttChart;

pub const BACKGROUND_COLOR: Color = Color::rgb(1.0, 1.0, 1.0);
pub const CATEGORY_BAND_COLOR: Color = Color::rgb(0.75, 0.75, 0.75);
pub const GRID_COLOR: Color = Color::rgb(0.88, 0.88, 0.88);
pub const AXIS_COLOR: Color = Color::rgb(0.2, 0.2, 0.2);
pub const TEXT_COLOR: Color = Color::rgb(0.1, 0.1, 0.1);
pub const AXIS_TICK_SIZE_PX: f64 = 6.0;
/// Bars stop just short of their end so adjacent bars stay visually apart.
pub const BAR_WIDTH_RATIO: f64 = 0.99;
pub const EMPTY_CHART_MESSAGE: &str = "No data";

const AXIS_LABEL_GAP_PX: f64 = 3.0;
const TITLE_OFFSET_PX: f64 = 15.0;
const Y_LABEL_OFFSET_PX: f64 = 60.0;
const X_LABEL_OFFSET_PX: f64 = 40.0;

/// Bar rectangle in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    /// Index of the entry in input order.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarGeometry {
    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.y + self.height
    }
}

impl<R: Renderer> GanttChart<R> {
    /// One rectangle per entry, in input order. Empty when nothing is rendered.
    pub fn bar_geometries(&self) -> ChartResult<Vec<BarGeometry>> {
        let Some(scales) = &self.scales else {
            return Ok(Vec::new());
        };

        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let (y, height) = scales.y.require_position(entry)?;
                let start_px = scales.x.map(entry.start);
                let end_px = scales.x.map(entry.start + entry.duration * BAR_WIDTH_RATIO);
                Ok(BarGeometry {
                    index,
                    x: self.plot.left + start_px,
                    y: self.plot.top + y,
                    width: (end_px - start_px).max(0.0),
                    height,
                })
            })
            .collect()
    }

    /// Builds the full scene, one layer per `CanvasLayerKind`.
    pub fn build_layered_frame(&self) -> ChartResult<LayeredRenderFrame> {
        let mut frame = LayeredRenderFrame::from_stack(self.viewport, LayerStack::canonical());

        frame.push_rect(
            CanvasLayerKind::Background,
            RectPrimitive::new(
                self.plot.left,
                self.plot.top,
                self.plot.width,
                self.plot.height,
                BACKGROUND_COLOR,
            ),
        );

        match &self.scales {
            Some(scales) => {
                self.push_category_bands(&mut frame, &scales.y);
                self.push_grid_and_x_axis(&mut frame);
                self.push_category_axis(&mut frame, &scales.y);
                self.push_bars(&mut frame)?;
                self.push_scrubber_layer(&mut frame);
                self.push_tooltip_layer(&mut frame);
            }
            None => {
                frame.push_text(
                    CanvasLayerKind::Labels,
                    self.text_primitive(
                        EMPTY_CHART_MESSAGE,
                        self.plot.left + self.plot.width / 2.0,
                        self.plot.top + self.plot.height / 2.0,
                        self.config.axis_font_size,
                        TextHAlign::Center,
                    )
                    .with_v_align(TextVAlign::Middle),
                );
            }
        }

        self.push_chart_labels(&mut frame);
        Ok(frame)
    }

    /// Flattened, back-to-front frame handed to the renderer.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let frame = self.build_layered_frame()?.flatten();
        trace!(primitives = frame.primitives.len(), "built render frame");
        Ok(frame)
    }

    pub(super) fn text_primitive(
        &self,
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        h_align: TextHAlign,
    ) -> TextPrimitive {
        TextPrimitive::new(text, x, y, font_size_px, TEXT_COLOR, h_align)
            .with_font_family(self.config.font_family.clone())
    }

    fn push_category_bands(&self, frame: &mut LayeredRenderFrame, y_scale: &CategoryScale) {
        if !y_scale.is_grouped() {
            return;
        }
        for (index, category) in y_scale.categories().iter().enumerate() {
            let Some((top, height)) = y_scale.category_band(category) else {
                continue;
            };
            let opacity = self.config.category_background_opacity[index % 2];
            frame.push_rect(
                CanvasLayerKind::CategoryBands,
                RectPrimitive::new(
                    self.plot.left,
                    self.plot.top + top,
                    self.plot.width,
                    height,
                    CATEGORY_BAND_COLOR,
                )
                .with_opacity(opacity),
            );
        }
    }

    fn push_grid_and_x_axis(&self, frame: &mut LayeredRenderFrame) {
        let Some(scales) = &self.scales else {
            return;
        };
        let bottom = self.plot.bottom();
        let step = scales.x.tick_step(self.config.num_x_ticks).unwrap_or(1.0);

        frame.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(
                self.plot.left,
                bottom,
                self.plot.right(),
                bottom,
                1.0,
                AXIS_COLOR,
            ),
        );

        for tick in scales.x.ticks(self.config.num_x_ticks) {
            let x = self.plot.left + scales.x.map(tick);
            if self.config.show_grid_lines {
                frame.push_line(
                    CanvasLayerKind::Grid,
                    LinePrimitive::new(x, self.plot.top, x, bottom, 1.0, GRID_COLOR)
                        .with_stroke_style(LineStrokeStyle::Dashed),
                );
            }
            frame.push_line(
                CanvasLayerKind::Axis,
                LinePrimitive::new(x, bottom, x, bottom + AXIS_TICK_SIZE_PX, 1.0, AXIS_COLOR),
            );
            frame.push_text(
                CanvasLayerKind::Axis,
                self.text_primitive(
                    format_tick(tick, step),
                    x,
                    bottom + AXIS_TICK_SIZE_PX + AXIS_LABEL_GAP_PX,
                    self.config.axis_font_size,
                    TextHAlign::Center,
                )
                .with_v_align(TextVAlign::Top),
            );
        }
    }

    fn push_category_axis(&self, frame: &mut LayeredRenderFrame, y_scale: &CategoryScale) {
        frame.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(
                self.plot.left,
                self.plot.top,
                self.plot.left,
                self.plot.bottom(),
                1.0,
                AXIS_COLOR,
            ),
        );

        // Grouped layout always centers: the label names the whole group.
        let centered = self.config.center_category_labels || y_scale.is_grouped();
        for category in y_scale.categories() {
            let Some((top, height)) = y_scale.category_band(category) else {
                continue;
            };
            let (x, h_align) = if centered {
                (self.plot.left / 2.0, TextHAlign::Center)
            } else {
                (
                    self.plot.left - AXIS_TICK_SIZE_PX - AXIS_LABEL_GAP_PX,
                    TextHAlign::Right,
                )
            };
            let y = self.plot.top + top + height / 2.0;

            frame.push_line(
                CanvasLayerKind::Axis,
                LinePrimitive::new(
                    self.plot.left - AXIS_TICK_SIZE_PX,
                    y,
                    self.plot.left,
                    y,
                    1.0,
                    AXIS_COLOR,
                ),
            );
            if category.is_empty() {
                continue;
            }
            frame.push_text(
                CanvasLayerKind::Axis,
                self.text_primitive(category.as_str(), x, y, self.config.axis_font_size, h_align)
                    .with_v_align(TextVAlign::Middle),
            );
        }
    }

    fn push_bars(&self, frame: &mut LayeredRenderFrame) -> ChartResult<()> {
        for bar in self.bar_geometries()? {
            let entry = &self.entries[bar.index];
            let state = self.bars.get(bar.index).copied().unwrap_or_default();
            frame.push_rect(
                CanvasLayerKind::Bars,
                RectPrimitive::new(
                    bar.x,
                    bar.y,
                    bar.width,
                    bar.height,
                    self.colors.fill(entry),
                )
                .with_border(state.stroke_width, self.colors.stroke(entry))
                .with_opacity(state.opacity)
                .with_transition_ms(state.transition.map(|transition| transition.duration_ms))
                .with_element_id(format!("bar-{}", bar.index)),
            );
        }
        Ok(())
    }

    fn push_chart_labels(&self, frame: &mut LayeredRenderFrame) {
        let center_x = self.plot.left + self.plot.width / 2.0;
        let center_y = self.plot.top + self.plot.height / 2.0;

        if !self.config.title.is_empty() {
            frame.push_text(
                CanvasLayerKind::Labels,
                self.text_primitive(
                    self.config.title.as_str(),
                    center_x,
                    self.plot.top - TITLE_OFFSET_PX,
                    self.config.title_font_size,
                    TextHAlign::Center,
                )
                .with_bold(true),
            );
        }
        if !self.config.x_axis_label.is_empty() {
            frame.push_text(
                CanvasLayerKind::Labels,
                self.text_primitive(
                    self.config.x_axis_label.as_str(),
                    center_x,
                    self.plot.bottom() + X_LABEL_OFFSET_PX,
                    self.config.axis_font_size,
                    TextHAlign::Center,
                ),
            );
        }
        if !self.config.y_axis_label.is_empty() {
            frame.push_text(
                CanvasLayerKind::Labels,
                self.text_primitive(
                    self.config.y_axis_label.as_str(),
                    (self.plot.left - Y_LABEL_OFFSET_PX).max(self.config.axis_font_size),
                    center_y,
                    self.config.axis_font_size,
                    TextHAlign::Center,
                )
                .with_rotation(-90.0),
            );
        }
    }
}
