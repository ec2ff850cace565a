use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub const DEFAULT_ENTRY_COLOR: &str = "steelblue";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Space reserved around the plotting area for title, axes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 20.0,
            bottom: 50.0,
            left: 80.0,
        }
    }
}

impl Margins {
    /// Resolves the inner plotting rectangle for a viewport.
    pub fn plot_area(self, viewport: Viewport) -> ChartResult<PlotArea> {
        let viewport = viewport.validate()?;
        let width = f64::from(viewport.width) - self.left - self.right;
        let height = f64::from(viewport.height) - self.top - self.bottom;
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        Ok(PlotArea {
            left: self.left,
            top: self.top,
            width,
            height,
        })
    }
}

/// Inner plotting rectangle in container pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

/// One bar of the timeline chart.
///
/// Field names follow the record format used at the notebook boundary
/// (`strokeColor` in JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub start: f64,
    pub duration: f64,
    #[serde(default = "default_entry_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

fn default_entry_color() -> String {
    DEFAULT_ENTRY_COLOR.to_owned()
}

impl TimelineEntry {
    #[must_use]
    pub fn new(category: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            category: category.into(),
            subcategory: None,
            start,
            duration,
            color: default_entry_color(),
            stroke_color: None,
            text: None,
        }
    }

    #[must_use]
    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn with_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.start.is_finite() || !self.duration.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "entry `{}` start/duration must be finite",
                self.category
            )));
        }
        if self.duration < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "entry `{}` duration must be >= 0",
                self.category
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Margins, TimelineEntry, Viewport};

    #[test]
    fn plot_area_subtracts_margins() {
        let plot = Margins::default()
            .plot_area(Viewport::new(800, 300))
            .expect("plot area");
        assert_eq!(plot.width, 700.0);
        assert_eq!(plot.height, 210.0);
        assert_eq!(plot.right(), 780.0);
        assert_eq!(plot.bottom(), 250.0);
    }

    #[test]
    fn margins_larger_than_viewport_are_rejected() {
        assert!(Margins::default().plot_area(Viewport::new(90, 300)).is_err());
    }

    #[test]
    fn negative_duration_is_rejected() {
        assert!(TimelineEntry::new("A", 0.0, -1.0).validate().is_err());
        assert!(TimelineEntry::new("A", -5.0, 0.0).validate().is_ok());
    }
}
