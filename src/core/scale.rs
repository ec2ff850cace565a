use crate::error::{ChartError, ChartResult};

/// Continuous, invertible mapping between a numeric domain and a pixel range.
///
/// A degenerate domain (`start == end`) does not fail: every value maps to the
/// middle of the range and every pixel inverts to the domain start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_start == self.domain_end
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        if self.is_degenerate() {
            return (self.range_start + self.range_end) / 2.0;
        }
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let range_span = self.range_end - self.range_start;
        if self.is_degenerate() || range_span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / range_span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Step between ticks for roughly `count` ticks over the domain.
    #[must_use]
    pub fn tick_step(self, count: usize) -> Option<f64> {
        let (lo, hi) = self.sorted_domain();
        tick_step(lo, hi, count)
    }

    /// Round tick values (1, 2 or 5 times a power of ten) inside the domain.
    ///
    /// Ticks follow domain direction: a reversed domain yields descending ticks.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }
        if self.is_degenerate() {
            return vec![self.domain_start];
        }

        let (lo, hi) = self.sorted_domain();
        let Some(step) = tick_step(lo, hi, count) else {
            return Vec::new();
        };

        let mut ticks = if step >= 1.0 {
            let first = (lo / step).ceil() as i64;
            let last = (hi / step).floor() as i64;
            (first..=last).map(|i| i as f64 * step).collect::<Vec<_>>()
        } else {
            // Dividing by the inverse step keeps values like 0.3 exact.
            let inverse = (1.0 / step).round();
            let first = (lo * inverse).ceil() as i64;
            let last = (hi * inverse).floor() as i64;
            (first..=last).map(|i| i as f64 / inverse).collect::<Vec<_>>()
        };

        if self.domain_start > self.domain_end {
            ticks.reverse();
        }
        ticks
    }

    fn sorted_domain(self) -> (f64, f64) {
        if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        }
    }
}

fn tick_step(lo: f64, hi: f64, count: usize) -> Option<f64> {
    let span = hi - lo;
    if count == 0 || !span.is_finite() || span <= 0.0 {
        return None;
    }

    let raw = span / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    Some(factor * power)
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn ticks_land_on_round_values() {
        let scale = LinearScale::new((-0.15, 15.15), (0.0, 700.0)).expect("scale");
        assert_eq!(
            scale.ticks(8),
            vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0]
        );
    }

    #[test]
    fn fractional_ticks_stay_exact() {
        let scale = LinearScale::new((0.0, 1.0), (0.0, 100.0)).expect("scale");
        let ticks = scale.ticks(5);
        assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn degenerate_domain_maps_to_range_middle() {
        let scale = LinearScale::new((0.0, 0.0), (0.0, 100.0)).expect("scale");
        assert_eq!(scale.map(42.0), 50.0);
        assert_eq!(scale.invert(10.0), 0.0);
        assert_eq!(scale.ticks(8), vec![0.0]);
    }
}
