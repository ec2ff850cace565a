//! timeline-rs: headless Gantt/timeline chart widgets.
//!
//! A `GanttChart` turns timeline entries into backend-agnostic render frames,
//! drives a draggable scrubber and hover tooltips, and publishes the entries
//! under the scrubber to subscribers such as a `DataDisplayPanel`.

pub mod api;
pub mod canvas;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod markup;
pub mod panel;
pub mod render;
pub mod telemetry;

pub use api::{GanttChart, GanttChartConfig};
pub use core::{TimelineEntry, Viewport};
pub use error::{ChartError, ChartResult};
pub use extensions::{ScrubberEvent, ScrubberTopic, SubscriptionId};
pub use panel::DataDisplayPanel;
