use crate::error::ChartResult;
use crate::markup::{Element, Node};
use crate::render::{
    LinePrimitive, LineStrokeStyle, Primitive, RectPrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive, TextVAlign,
};

const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Renders frames to standalone SVG markup for browser and notebook display.
///
/// Opacity transitions are emitted as CSS `transition` declarations so the
/// browser interpolates them when a later frame replaces the element.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    last_svg: String,
    class_name: Option<String>,
}

impl SvgRenderer {
    #[must_use]
    pub fn with_class_name(class_name: impl Into<String>) -> Self {
        Self {
            last_svg: String::new(),
            class_name: Some(class_name.into()),
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "svg"
    }

    #[must_use]
    pub fn last_svg(&self) -> &str {
        &self.last_svg
    }

    #[must_use]
    pub fn into_svg(self) -> String {
        self.last_svg
    }

    /// Builds the SVG element tree without storing it.
    pub fn svg_element(&self, frame: &RenderFrame) -> ChartResult<Element> {
        frame.validate()?;
        let width = frame.viewport.width;
        let height = frame.viewport.height;

        let root = Element::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", width)
            .attr("height", height)
            .attr("viewBox", format!("0 0 {width} {height}"))
            .attr_opt("class", self.class_name.as_deref())
            .children(frame.primitives.iter().map(primitive_node));
        Ok(root)
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        self.last_svg = self.svg_element(frame)?.to_html_string();
        Ok(())
    }
}

fn primitive_node(primitive: &Primitive) -> Node {
    match primitive {
        Primitive::Line(line) => line_element(line).into(),
        Primitive::Rect(rect) => rect_element(rect).into(),
        Primitive::Text(text) => text_element(text).into(),
    }
}

fn line_element(line: &LinePrimitive) -> Element {
    Element::svg_leaf("line")
        .attr("x1", fmt_px(line.x1))
        .attr("y1", fmt_px(line.y1))
        .attr("x2", fmt_px(line.x2))
        .attr("y2", fmt_px(line.y2))
        .attr("stroke", line.color.to_css())
        .attr("stroke-width", fmt_px(line.stroke_width))
        .attr_opt(
            "stroke-dasharray",
            dash_array(line.stroke_style, line.stroke_width),
        )
}

fn rect_element(rect: &RectPrimitive) -> Element {
    let mut element = Element::svg_leaf("rect")
        .attr_opt("id", rect.element_id.as_deref())
        .attr("x", fmt_px(rect.x))
        .attr("y", fmt_px(rect.y))
        .attr("width", fmt_px(rect.width))
        .attr("height", fmt_px(rect.height))
        .attr("fill", rect.fill_color.to_css());

    if rect.corner_radius > 0.0 {
        element = element.attr("rx", fmt_px(rect.corner_radius));
    }
    if rect.border_width > 0.0 {
        element = element
            .attr("stroke", rect.border_color.to_css())
            .attr("stroke-width", fmt_px(rect.border_width))
            .attr_opt("stroke-dasharray", join_dashes(rect.border_dash_pattern()));
    }
    if rect.opacity < 1.0 {
        element = element.attr("opacity", fmt_px(rect.opacity));
    }
    element.attr_opt(
        "style",
        rect.transition_ms
            .map(|ms| format!("transition: opacity {ms}ms ease")),
    )
}

fn text_element(text: &TextPrimitive) -> Element {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    let baseline = match text.v_align {
        TextVAlign::Top => Some("hanging"),
        TextVAlign::Middle => Some("middle"),
        TextVAlign::Baseline => None,
    };
    let transform = (text.rotation_deg != 0.0).then(|| {
        format!(
            "rotate({} {} {})",
            fmt_px(text.rotation_deg),
            fmt_px(text.x),
            fmt_px(text.y)
        )
    });

    Element::new("text")
        .attr("x", fmt_px(text.x))
        .attr("y", fmt_px(text.y))
        .attr("font-size", fmt_px(text.font_size_px))
        .attr(
            "font-family",
            text.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY),
        )
        .attr("fill", text.color.to_css())
        .attr("text-anchor", anchor)
        .attr_opt("dominant-baseline", baseline)
        .attr_opt("font-weight", text.bold.then_some("bold"))
        .attr_opt("transform", transform)
        .text(text.text.clone())
}

fn dash_array(style: LineStrokeStyle, stroke_width: f64) -> Option<String> {
    join_dashes(style.dash_pattern(stroke_width))
}

fn join_dashes(pattern: Vec<f64>) -> Option<String> {
    if pattern.is_empty() {
        return None;
    }
    Some(
        pattern
            .into_iter()
            .map(fmt_px)
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// Two-decimal pixel formatting without trailing zeros.
fn fmt_px(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

#[cfg(test)]
mod tests {
    use super::{SvgRenderer, fmt_px};
    use crate::core::Viewport;
    use crate::render::{Color, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive};

    #[test]
    fn pixel_values_are_trimmed() {
        assert_eq!(fmt_px(12.0), "12");
        assert_eq!(fmt_px(12.346), "12.35");
        assert_eq!(fmt_px(-0.001), "0");
    }

    #[test]
    fn renders_rect_and_escaped_text() {
        let frame = RenderFrame::new(Viewport::new(100, 50))
            .with_rect(
                RectPrimitive::new(1.0, 2.0, 10.0, 5.0, Color::rgb(1.0, 0.0, 0.0))
                    .with_opacity(0.3)
                    .with_transition_ms(Some(200)),
            )
            .with_text(TextPrimitive::new(
                "a < b",
                5.0,
                5.0,
                12.0,
                Color::rgb(0.0, 0.0, 0.0),
                TextHAlign::Center,
            ));

        let mut renderer = SvgRenderer::default();
        renderer.render(&frame).expect("render");
        let svg = renderer.last_svg();

        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\""));
        assert!(svg.contains(
            r##"<rect x="1" y="2" width="10" height="5" fill="#ff0000" opacity="0.3" style="transition: opacity 200ms ease" />"##
        ));
        assert!(svg.contains(">a &lt; b</text>"));
    }
}
