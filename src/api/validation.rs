use crate::core::TimelineEntry;
use crate::error::{ChartError, ChartResult};

use super::GanttChartConfig;

pub(super) fn validate_config(config: &GanttChartConfig) -> ChartResult<()> {
    if config.width == Some(0) || config.height == 0 {
        return Err(ChartError::InvalidConfig(
            "chart width and height must be > 0".to_owned(),
        ));
    }

    let margins = config.margins;
    for (name, value) in [
        ("top", margins.top),
        ("right", margins.right),
        ("bottom", margins.bottom),
        ("left", margins.left),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "margin `{name}` must be finite and >= 0"
            )));
        }
    }

    for (name, value) in [
        ("axis font size", config.axis_font_size),
        ("title font size", config.title_font_size),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "{name} must be finite and > 0"
            )));
        }
    }

    if config.num_x_ticks == 0 {
        return Err(ChartError::InvalidConfig(
            "x-axis tick count must be > 0".to_owned(),
        ));
    }

    if config
        .category_background_opacity
        .iter()
        .any(|opacity| !opacity.is_finite() || !(0.0..=1.0).contains(opacity))
    {
        return Err(ChartError::InvalidConfig(
            "category background opacities must be finite and in [0, 1]".to_owned(),
        ));
    }

    if config
        .color_scheme
        .as_ref()
        .is_some_and(|palette| palette.is_empty())
    {
        return Err(ChartError::InvalidConfig(
            "color scheme must not be empty when set".to_owned(),
        ));
    }

    Ok(())
}

pub(super) fn validate_entries(entries: &[TimelineEntry]) -> ChartResult<()> {
    for entry in entries {
        entry.validate()?;
    }
    Ok(())
}
