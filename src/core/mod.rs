pub mod band_scale;
pub mod category_scale;
pub mod format;
pub mod intersection;
pub mod scale;
pub mod timeline_scales;
pub mod types;

pub use band_scale::BandScale;
pub use category_scale::CategoryScale;
pub use intersection::{entry_contains_px, intersected_indices};
pub use scale::LinearScale;
pub use timeline_scales::{TimelineScales, distinct_categories, subcategory_groups};
pub use types::{Margins, PlotArea, TimelineEntry, Viewport};
