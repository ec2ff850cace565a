//! Chart widget API.
//!
//! `GanttChart` is split across several `impl` blocks: `engine` owns state and
//! the render entry point, `layout` builds frames, and the two controllers
//! handle scrubber drag and hover.

mod color_resolver;
mod config;
mod document;
mod engine;
mod hover_controller;
mod json_contract;
mod layout;
mod scrubber_controller;
mod validation;

pub use color_resolver::{ColorResolver, FALLBACK_BAR_COLOR};
pub use config::GanttChartConfig;
pub use document::DEFAULT_WEB_FONT_FAMILY;
pub use engine::GanttChart;
pub use hover_controller::TooltipView;
pub use json_contract::{
    CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartSnapshotJsonContractV1, config_from_json,
    entries_from_json, entries_to_json,
};
pub use layout::{
    AXIS_COLOR, AXIS_TICK_SIZE_PX, BACKGROUND_COLOR, BAR_WIDTH_RATIO, BarGeometry,
    CATEGORY_BAND_COLOR, EMPTY_CHART_MESSAGE, GRID_COLOR, TEXT_COLOR,
};
pub use scrubber_controller::{
    SCRUBBER_HANDLE_HEIGHT_PX, SCRUBBER_HANDLE_WIDTH_PX, SCRUBBER_HIT_SLOP_PX,
};
