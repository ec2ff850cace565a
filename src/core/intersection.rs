use crate::core::LinearScale;
use crate::core::types::TimelineEntry;

/// Whether the scrubber at `position_px` lies on the entry's bar.
///
/// Both bar edges are inclusive.
#[must_use]
pub fn entry_contains_px(x: LinearScale, entry: &TimelineEntry, position_px: f64) -> bool {
    let left = x.map(entry.start);
    let right = x.map(entry.end());
    left <= position_px && position_px <= right
}

/// Indices of entries intersected at `position_px`, in input order.
#[must_use]
pub fn intersected_indices(
    x: LinearScale,
    entries: &[TimelineEntry],
    position_px: f64,
) -> Vec<usize> {
    #[cfg(feature = "parallel-intersection")]
    {
        use rayon::prelude::*;

        entries
            .par_iter()
            .enumerate()
            .filter(|(_, entry)| entry_contains_px(x, entry, position_px))
            .map(|(index, _)| index)
            .collect()
    }

    #[cfg(not(feature = "parallel-intersection"))]
    {
        entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry_contains_px(x, entry, position_px))
            .map(|(index, _)| index)
            .collect()
    }
}
