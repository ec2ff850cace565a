use indexmap::{IndexMap, IndexSet};
use ordered_float::OrderedFloat;
use tracing::debug;

use crate::core::category_scale::subcategory_key;
use crate::core::types::TimelineEntry;
use crate::core::{CategoryScale, LinearScale};
use crate::error::{ChartError, ChartResult};

/// Fraction of the largest entry end added on both sides of the time domain.
pub const X_DOMAIN_PADDING_RATIO: f64 = 0.01;

/// Horizontal and vertical scales derived from one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineScales {
    pub x: LinearScale,
    pub y: CategoryScale,
}

impl TimelineScales {
    /// Builds scales for an inner plotting area of `inner_width` x `inner_height`.
    ///
    /// Empty input has no meaningful domain and is rejected; callers render a
    /// placeholder state instead.
    pub fn from_entries(
        entries: &[TimelineEntry],
        inner_width: f64,
        inner_height: f64,
    ) -> ChartResult<Self> {
        let max_end = entries
            .iter()
            .map(|entry| OrderedFloat(entry.end()))
            .max()
            .ok_or_else(|| {
                ChartError::InvalidData("cannot build scales from empty data".to_owned())
            })?
            .into_inner();

        let x = LinearScale::new(
            (
                -max_end * X_DOMAIN_PADDING_RATIO,
                max_end * (1.0 + X_DOMAIN_PADDING_RATIO),
            ),
            (0.0, inner_width),
        )?;

        let y = match subcategory_groups(entries) {
            Some(groups) => CategoryScale::grouped(groups, inner_height)?,
            None => CategoryScale::single(distinct_categories(entries), inner_height)?,
        };

        debug!(
            entries = entries.len(),
            categories = y.categories().len(),
            grouped = y.is_grouped(),
            max_end,
            "built timeline scales"
        );
        Ok(Self { x, y })
    }

    /// Pixel position of `value` inside the plotting area.
    #[must_use]
    pub fn x_px(&self, value: f64) -> f64 {
        self.x.map(value)
    }
}

/// Distinct categories in first-seen order.
#[must_use]
pub fn distinct_categories(entries: &[TimelineEntry]) -> IndexSet<String> {
    entries
        .iter()
        .map(|entry| entry.category.clone())
        .collect()
}

/// Per-category subcategories in first-seen order, or `None` when no entry
/// defines a subcategory.
#[must_use]
pub fn subcategory_groups(entries: &[TimelineEntry]) -> Option<IndexMap<String, IndexSet<String>>> {
    if !entries.iter().any(|entry| entry.subcategory.is_some()) {
        return None;
    }

    let mut groups: IndexMap<String, IndexSet<String>> = IndexMap::new();
    for entry in entries {
        groups
            .entry(entry.category.clone())
            .or_default()
            .insert(subcategory_key(entry).to_owned());
    }
    Some(groups)
}
