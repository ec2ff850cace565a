use indexmap::IndexSet;

use crate::error::{ChartError, ChartResult};

/// Maps an ordered set of keys onto equal contiguous bands of a pixel range.
///
/// Layout follows the usual band-scale rules: `step` is the distance between
/// band starts, `bandwidth = step * (1 - padding_inner)`, and leftover space
/// from outer padding is split evenly on both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: IndexSet<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new<I, S>(domain: I, range: (f64, f64)) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "band scale range must be finite".to_owned(),
            ));
        }

        let mut scale = Self {
            domain: domain.into_iter().map(Into::into).collect(),
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            start: 0.0,
            step: 0.0,
            bandwidth: 0.0,
        };
        scale.rescale();
        Ok(scale)
    }

    /// Sets inner and outer padding to the same fraction of a step.
    pub fn with_padding(self, padding: f64) -> ChartResult<Self> {
        self.with_paddings(padding, padding)
    }

    pub fn with_paddings(mut self, inner: f64, outer: f64) -> ChartResult<Self> {
        if !inner.is_finite() || !(0.0..=1.0).contains(&inner) {
            return Err(ChartError::InvalidData(
                "band inner padding must be finite and in [0, 1]".to_owned(),
            ));
        }
        if !outer.is_finite() || outer < 0.0 {
            return Err(ChartError::InvalidData(
                "band outer padding must be finite and >= 0".to_owned(),
            ));
        }
        self.padding_inner = inner;
        self.padding_outer = outer;
        self.rescale();
        Ok(self)
    }

    #[must_use]
    pub fn domain(&self) -> &IndexSet<String> {
        &self.domain
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// Start offset of the band for `key`, or `None` for keys outside the domain.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<f64> {
        let index = self.domain.get_index_of(key)?;
        let slot = if self.range.1 < self.range.0 {
            self.domain.len() - 1 - index
        } else {
            index
        };
        Some(self.start + self.step * slot as f64)
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (lo, hi) = if self.range.1 < self.range.0 {
            (self.range.1, self.range.0)
        } else {
            (self.range.0, self.range.1)
        };
        let span = hi - lo;

        let slots = (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        self.step = span / slots;
        self.start = lo + (span - self.step * (n - self.padding_inner)) * 0.5;
        self.bandwidth = self.step * (1.0 - self.padding_inner);
    }
}
