use indexmap::{IndexMap, IndexSet};

use crate::core::BandScale;
use crate::core::types::TimelineEntry;
use crate::error::{ChartError, ChartResult};

pub const CATEGORY_BAND_PADDING: f64 = 0.2;
pub const SUBCATEGORY_BAND_PADDING: f64 = 0.1;

/// Subcategory key used for entries without one inside a grouped chart.
pub const UNGROUPED_SUBCATEGORY: &str = "";

/// Vertical placement of timeline rows.
///
/// `Single` bands the categories directly. `Grouped` nests one band scale per
/// category (over its subcategories) inside an unpadded outer category band, so
/// row height is uniform within a category.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryScale {
    Single(BandScale),
    Grouped {
        outer: BandScale,
        inner: IndexMap<String, BandScale>,
    },
}

impl CategoryScale {
    pub fn single(categories: IndexSet<String>, height: f64) -> ChartResult<Self> {
        let band = BandScale::new(categories, (0.0, height))?.with_padding(CATEGORY_BAND_PADDING)?;
        Ok(Self::Single(band))
    }

    pub fn grouped(groups: IndexMap<String, IndexSet<String>>, height: f64) -> ChartResult<Self> {
        let outer = BandScale::new(groups.keys().cloned(), (0.0, height))?;
        let band_height = outer.bandwidth();
        let inner = groups
            .into_iter()
            .map(|(category, subcategories)| {
                let band = BandScale::new(subcategories, (0.0, band_height))?
                    .with_padding(SUBCATEGORY_BAND_PADDING)?;
                Ok((category, band))
            })
            .collect::<ChartResult<IndexMap<_, _>>>()?;
        Ok(Self::Grouped { outer, inner })
    }

    #[must_use]
    pub fn is_grouped(&self) -> bool {
        matches!(self, Self::Grouped { .. })
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> &IndexSet<String> {
        match self {
            Self::Single(band) => band.domain(),
            Self::Grouped { outer, .. } => outer.domain(),
        }
    }

    #[must_use]
    pub fn inner(&self, category: &str) -> Option<&BandScale> {
        match self {
            Self::Single(_) => None,
            Self::Grouped { inner, .. } => inner.get(category),
        }
    }

    /// Top offset and height of the whole band owned by `category`.
    #[must_use]
    pub fn category_band(&self, category: &str) -> Option<(f64, f64)> {
        match self {
            Self::Single(band) | Self::Grouped { outer: band, .. } => {
                Some((band.position(category)?, band.bandwidth()))
            }
        }
    }

    /// Top offset of the row an entry is drawn in.
    #[must_use]
    pub fn position(&self, entry: &TimelineEntry) -> Option<f64> {
        match self {
            Self::Single(band) => band.position(&entry.category),
            Self::Grouped { outer, inner } => {
                let outer_offset = outer.position(&entry.category)?;
                let inner_offset = inner
                    .get(&entry.category)?
                    .position(subcategory_key(entry))?;
                Some(outer_offset + inner_offset)
            }
        }
    }

    /// Row height of an entry; in grouped layout it depends on its category.
    #[must_use]
    pub fn bandwidth(&self, entry: &TimelineEntry) -> Option<f64> {
        match self {
            Self::Single(band) => band
                .domain()
                .contains(&entry.category)
                .then(|| band.bandwidth()),
            Self::Grouped { inner, .. } => inner.get(&entry.category).map(BandScale::bandwidth),
        }
    }

    pub fn require_position(&self, entry: &TimelineEntry) -> ChartResult<(f64, f64)> {
        match (self.position(entry), self.bandwidth(entry)) {
            (Some(y), Some(height)) => Ok((y, height)),
            _ => Err(ChartError::InvalidData(format!(
                "entry category `{}` is not part of the vertical scale",
                entry.category
            ))),
        }
    }
}

pub(crate) fn subcategory_key(entry: &TimelineEntry) -> &str {
    entry
        .subcategory
        .as_deref()
        .unwrap_or(UNGROUPED_SUBCATEGORY)
}
