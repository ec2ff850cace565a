use crate::error::ChartResult;
use crate::markup::{Element, Node};
use crate::panel::DataDisplayPanel;
use crate::render::{Renderer, SvgRenderer};

use super::GanttChart;

/// Family name used for the `@font-face` rule when only a URL is configured.
pub const DEFAULT_WEB_FONT_FAMILY: &str = "timeline-font";

impl<R: Renderer> GanttChart<R> {
    /// Current state as standalone SVG, independent of the bound renderer.
    pub fn to_svg(&self) -> ChartResult<String> {
        let frame = self.build_render_frame()?;
        Ok(SvgRenderer::default().svg_element(&frame)?.to_html_string())
    }

    /// Notebook-ready HTML fragment: optional font rule, chart SVG and an
    /// optional panel.
    pub fn to_html_document(&self, panel: Option<&DataDisplayPanel>) -> ChartResult<String> {
        let frame = self.build_render_frame()?;
        let svg = SvgRenderer::with_class_name("timeline-chart").svg_element(&frame)?;

        let mut root = Element::new("div").attr("class", "timeline-widget");
        if let Some(rule) = self.font_face_rule() {
            root = root.child(Element::new("style").child(Node::Raw(rule)));
        }
        root = root.child(svg);
        if let Some(panel) = panel {
            root = root.child(panel.element());
        }
        Ok(root.to_html_string())
    }

    fn font_face_rule(&self) -> Option<String> {
        let url = self.config.font_url.as_deref()?;
        let family = self
            .config
            .font_family
            .as_deref()
            .unwrap_or(DEFAULT_WEB_FONT_FAMILY);
        Some(format!(
            "@font-face {{ font-family: \"{}\"; src: url(\"{}\"); }}",
            css_string(family),
            css_string(url)
        ))
    }
}

/// Keeps a value inside a double-quoted CSS string and out of the
/// surrounding `<style>` element.
fn css_string(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !matches!(ch, '"' | '\\' | '<' | '>' | '\n' | '\r'))
        .collect()
}
