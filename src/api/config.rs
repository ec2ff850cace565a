use serde::{Deserialize, Serialize};

use crate::core::Margins;
use crate::error::ChartResult;

use super::validation::validate_config;

/// Options for one render call of a `GanttChart`.
///
/// Serializes with camelCase keys so notebook-side option records
/// (`scrubberEnabled`, `numXTicks`, ...) deserialize unchanged. Missing keys
/// take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GanttChartConfig {
    /// Chart width in pixels; `None` uses the container width.
    pub width: Option<u32>,
    pub height: u32,
    pub margins: Margins,
    pub scrubber_enabled: bool,
    pub axis_font_size: f64,
    pub title_font_size: f64,
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub num_x_ticks: usize,
    pub show_grid_lines: bool,
    /// Background opacity of even and odd category bands (grouped layout).
    pub category_background_opacity: [f64; 2],
    pub interactive_mode: bool,
    /// Palette indexed by category order; overrides per-entry colors.
    pub color_scheme: Option<Vec<String>>,
    pub center_category_labels: bool,
    pub font_family: Option<String>,
    pub font_url: Option<String>,
}

impl Default for GanttChartConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: 300,
            margins: Margins::default(),
            scrubber_enabled: true,
            axis_font_size: 12.0,
            title_font_size: 15.0,
            title: "timeline".to_owned(),
            x_axis_label: "x-axis".to_owned(),
            y_axis_label: "y-axis".to_owned(),
            num_x_ticks: 8,
            show_grid_lines: true,
            category_background_opacity: [0.3, 0.05],
            interactive_mode: true,
            color_scheme: None,
            center_category_labels: false,
            font_family: None,
            font_url: None,
        }
    }
}

impl GanttChartConfig {
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_axis_label = x.into();
        self.y_axis_label = y.into();
        self
    }

    #[must_use]
    pub fn with_scrubber_enabled(mut self, enabled: bool) -> Self {
        self.scrubber_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_interactive_mode(mut self, interactive: bool) -> Self {
        self.interactive_mode = interactive;
        self
    }

    #[must_use]
    pub fn with_grid_lines(mut self, show: bool) -> Self {
        self.show_grid_lines = show;
        self
    }

    #[must_use]
    pub fn with_color_scheme<I, S>(mut self, palette: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.color_scheme = Some(palette.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_font(mut self, family: impl Into<String>, url: Option<String>) -> Self {
        self.font_family = Some(family.into());
        self.font_url = url;
        self
    }

    /// Checks sizes, margins, font sizes, tick count, band opacities and palette.
    pub fn validate(&self) -> ChartResult<()> {
        validate_config(self)
    }

    /// The scrubber only exists in interactive mode.
    #[must_use]
    pub fn scrubber_active(&self) -> bool {
        self.interactive_mode && self.scrubber_enabled
    }
}
