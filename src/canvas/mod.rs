//! Rectangle drawing canvas with auto-sized labels and stack/grid layout.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::api::FALLBACK_BAR_COLOR;
use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LineStrokeStyle, Primitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
    TextVAlign,
};

const FONT_WIDTH_FACTOR: f64 = 0.9;
const FONT_HEIGHT_FACTOR: f64 = 0.3;
const CHAR_WIDTH_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextOrientation {
    #[default]
    Horizontal,
    Vertical,
}

/// A rectangle with an optional centered label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rx: f64,
    pub ry: f64,
    pub color: String,
    pub stroke_color: String,
    /// SVG dash list such as `"5,5"`; `None` draws a solid outline.
    pub stroke_dasharray: Option<String>,
    pub stroke_width: Option<f64>,
    pub text: String,
    /// Explicit label size; `None` derives it from the box and text length.
    pub font_size: Option<f64>,
    pub text_color: String,
    pub text_orientation: TextOrientation,
}

impl ShapeRect {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            rx: 0.0,
            ry: 0.0,
            color: "#000000".to_owned(),
            stroke_color: "black".to_owned(),
            stroke_dasharray: None,
            stroke_width: None,
            text: String::new(),
            font_size: None,
            text_color: "black".to_owned(),
            text_orientation: TextOrientation::Horizontal,
        }
    }

    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    #[must_use]
    pub fn with_corner_radii(mut self, rx: f64, ry: f64) -> Self {
        self.rx = rx;
        self.ry = ry;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, color: impl Into<String>, width: Option<f64>) -> Self {
        self.stroke_color = color.into();
        self.stroke_width = width;
        self
    }

    #[must_use]
    pub fn with_stroke_dasharray(mut self, dasharray: impl Into<String>) -> Self {
        self.stroke_dasharray = Some(dasharray.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = Some(font_size);
        self
    }

    #[must_use]
    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = color.into();
        self
    }

    #[must_use]
    pub fn with_text_orientation(mut self, orientation: TextOrientation) -> Self {
        self.text_orientation = orientation;
        self
    }

    /// Label size: explicit, or the largest size that fits the text along the
    /// reading direction and stays under 30% of the cross extent.
    #[must_use]
    pub fn effective_font_size(&self) -> f64 {
        if let Some(size) = self.font_size {
            return size;
        }
        let estimated_text_width = (CHAR_WIDTH_RATIO * self.text.chars().count() as f64).max(1.0);
        let (along, across) = match self.text_orientation {
            TextOrientation::Horizontal => (self.width, self.height),
            TextOrientation::Vertical => (self.height, self.width),
        };
        (FONT_WIDTH_FACTOR * along / estimated_text_width).min(across * FONT_HEIGHT_FACTOR)
    }

    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "shape coordinates must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0
        {
            return Err(ChartError::InvalidData(
                "shape size must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn primitives(&self, frame: &mut RenderFrame) {
        let fill = parse_color(&self.color);
        let stroke = parse_color(&self.stroke_color);
        let stroke_width = self.stroke_width.unwrap_or(1.0).max(0.0);

        let rect = RectPrimitive::new(self.x, self.y, self.width, self.height, fill)
            .with_border(stroke_width, stroke)
            .with_corner_radius(self.rx.max(self.ry).max(0.0));
        let rect = match self.stroke_dasharray.as_deref().map(str::trim) {
            None | Some("") => rect,
            Some(dashes) if dashes.eq_ignore_ascii_case("none") => rect,
            Some(dashes) => match parse_dasharray(dashes) {
                Some(pattern) => rect.with_border_dash(pattern),
                None => {
                    warn!(dasharray = dashes, "unparseable dash list; using default dashes");
                    rect.with_border_style(LineStrokeStyle::Dashed)
                }
            },
        };
        frame.primitives.push(Primitive::Rect(rect));

        let font_size = self.effective_font_size();
        if self.text.is_empty() || !font_size.is_finite() || font_size <= 0.0 {
            return;
        }
        let rotation = match self.text_orientation {
            TextOrientation::Horizontal => 0.0,
            TextOrientation::Vertical => -90.0,
        };
        frame.primitives.push(Primitive::Text(
            TextPrimitive::new(
                self.text.as_str(),
                self.x + self.width / 2.0,
                self.y + self.height / 2.0,
                font_size,
                parse_color(&self.text_color),
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Middle)
            .with_rotation(rotation),
        ));
    }
}

/// An ordered group of rectangles that moves and measures as one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shapes {
    pub rects: Vec<ShapeRect>,
}

impl Shapes {
    #[must_use]
    pub fn new(rects: Vec<ShapeRect>) -> Self {
        Self { rects }
    }

    /// Smallest rectangle enclosing every member; empty groups give a zero rect.
    #[must_use]
    pub fn bounding_rect(&self) -> ShapeRect {
        let Some(first) = self.rects.first() else {
            return ShapeRect::new(0.0, 0.0);
        };
        let init = (first.x, first.y, first.x + first.width, first.y + first.height);
        let (min_x, min_y, max_x, max_y) =
            self.rects
                .iter()
                .fold(init, |(min_x, min_y, max_x, max_y), rect| {
                    (
                        min_x.min(rect.x),
                        min_y.min(rect.y),
                        max_x.max(rect.x + rect.width),
                        max_y.max(rect.y + rect.height),
                    )
                });
        ShapeRect::new(max_x - min_x, max_y - min_y).at(min_x, min_y)
    }

    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.rects.iter().map(|rect| rect.translate(dx, dy)).collect())
    }

    pub fn to_json(&self) -> ChartResult<String> {
        serde_json::to_string(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize shapes: {e}")))
    }

    /// Draws every rectangle into a frame of the given size, in order.
    pub fn to_render_frame(&self, viewport: Viewport) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(viewport.validate()?);
        for rect in &self.rects {
            rect.validate()?;
            rect.primitives(&mut frame);
        }
        frame.validate()?;
        Ok(frame)
    }
}

impl From<ShapeRect> for Shapes {
    fn from(rect: ShapeRect) -> Self {
        Self::new(vec![rect])
    }
}

/// Anything that can be positioned by the stack helpers.
pub trait Shape {
    fn bounding_rect(&self) -> ShapeRect;
    fn translated(&self, dx: f64, dy: f64) -> Shapes;
}

impl Shape for ShapeRect {
    fn bounding_rect(&self) -> ShapeRect {
        self.clone()
    }

    fn translated(&self, dx: f64, dy: f64) -> Shapes {
        self.translate(dx, dy).into()
    }
}

impl Shape for Shapes {
    fn bounding_rect(&self) -> ShapeRect {
        Shapes::bounding_rect(self)
    }

    fn translated(&self, dx: f64, dy: f64) -> Shapes {
        self.translate(dx, dy)
    }
}

/// Places shapes left to right, `padding` apart; `center` aligns them
/// vertically on the tallest one.
pub fn hstack<S: Shape>(shapes: &[S], padding: f64, center: bool) -> Shapes {
    let tallest = max_extent(shapes, |rect| rect.height);
    let mut dx = 0.0;
    let mut stack = Vec::new();
    for shape in shapes {
        let bounds = shape.bounding_rect();
        let dy = if center {
            (tallest - bounds.height) / 2.0
        } else {
            0.0
        };
        stack.extend(shape.translated(dx, dy).rects);
        dx += bounds.width + padding;
    }
    Shapes::new(stack)
}

/// Places shapes top to bottom, `padding` apart; `center` aligns them
/// horizontally on the widest one.
pub fn vstack<S: Shape>(shapes: &[S], padding: f64, center: bool) -> Shapes {
    let widest = max_extent(shapes, |rect| rect.width);
    let mut dy = 0.0;
    let mut stack = Vec::new();
    for shape in shapes {
        let bounds = shape.bounding_rect();
        let dx = if center {
            (widest - bounds.width) / 2.0
        } else {
            0.0
        };
        stack.extend(shape.translated(dx, dy).rects);
        dy += bounds.height + padding;
    }
    Shapes::new(stack)
}

/// `rows` x `cols` copies of `shape`.
pub fn grid<S: Shape>(
    shape: &S,
    rows: usize,
    cols: usize,
    row_padding: f64,
    col_padding: f64,
) -> Shapes {
    let row = hstack(&vec![shape.translated(0.0, 0.0); cols], col_padding, false);
    vstack(&vec![row; rows], row_padding, false)
}

fn max_extent<S: Shape>(shapes: &[S], extent: impl Fn(&ShapeRect) -> f64) -> f64 {
    shapes
        .iter()
        .map(|shape| extent(&shape.bounding_rect()))
        .fold(0.0, f64::max)
}

/// Parses an SVG dash list (`"5,5"`, `"4 2 1"`); `None` when malformed or all zero.
fn parse_dasharray(input: &str) -> Option<SmallVec<[f64; 4]>> {
    let pattern = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f64>()
                .ok()
                .filter(|length| length.is_finite() && *length >= 0.0)
        })
        .collect::<Option<SmallVec<[f64; 4]>>>()?;
    (!pattern.is_empty() && pattern.iter().any(|length| *length > 0.0)).then_some(pattern)
}

fn parse_color(input: &str) -> Color {
    if input.eq_ignore_ascii_case("none") || input.eq_ignore_ascii_case("transparent") {
        return Color::rgba(0.0, 0.0, 0.0, 0.0);
    }
    Color::parse(input).unwrap_or(FALLBACK_BAR_COLOR)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{ShapeRect, Shapes, TextOrientation, grid, hstack, parse_dasharray, vstack};

    #[test]
    fn dash_lists_accept_commas_and_spaces() {
        assert_eq!(parse_dasharray("2,8").expect("dashes").as_slice(), &[2.0, 8.0]);
        assert_eq!(parse_dasharray(" 4 2, 1 ").expect("dashes").as_slice(), &[4.0, 2.0, 1.0]);
        assert!(parse_dasharray("0,0").is_none());
        assert!(parse_dasharray("5,-1").is_none());
        assert!(parse_dasharray("dotted").is_none());
    }

    #[test]
    fn font_size_fits_text_or_height() {
        let wide = ShapeRect::new(100.0, 20.0).with_text("ab");
        assert_relative_eq!(wide.effective_font_size(), 6.0);

        let narrow = ShapeRect::new(30.0, 100.0).with_text("abcdefghij");
        assert_relative_eq!(narrow.effective_font_size(), 4.5);

        let vertical = ShapeRect::new(20.0, 100.0)
            .with_text("ab")
            .with_text_orientation(TextOrientation::Vertical);
        assert_relative_eq!(vertical.effective_font_size(), 6.0);
    }

    #[test]
    fn empty_group_bounds_to_zero_rect() {
        let bounds = Shapes::default().bounding_rect();
        assert_eq!((bounds.x, bounds.y, bounds.width, bounds.height), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn hstack_centers_on_tallest() {
        let stack = hstack(
            &[ShapeRect::new(10.0, 10.0), ShapeRect::new(20.0, 30.0)],
            5.0,
            true,
        );
        assert_eq!((stack.rects[0].x, stack.rects[0].y), (0.0, 10.0));
        assert_eq!((stack.rects[1].x, stack.rects[1].y), (15.0, 0.0));
    }

    #[test]
    fn vstack_offsets_by_height_and_padding() {
        let stack = vstack(
            &[ShapeRect::new(10.0, 10.0), ShapeRect::new(10.0, 4.0)],
            2.0,
            false,
        );
        assert_eq!(stack.rects[1].y, 12.0);
    }

    #[test]
    fn grid_tiles_rows_and_columns() {
        let cells = grid(&ShapeRect::new(10.0, 5.0), 2, 3, 1.0, 2.0);
        assert_eq!(cells.rects.len(), 6);
        let bounds = cells.bounding_rect();
        assert_eq!((bounds.width, bounds.height), (34.0, 11.0));
    }
}
