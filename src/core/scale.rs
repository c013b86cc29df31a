use ordered_float::OrderedFloat;

use crate::error::{VizError, VizResult};

/// Continuous `domain -> pixel range` mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> VizResult<Self> {
        let (domain_start, domain_end) = domain;
        let (range_start, range_end) = range;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(VizError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(VizError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
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
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }
}

/// Evenly divides a pixel range into `count` ordinal bands.
///
/// A reversed range (`start > end`) assigns the first band to the far end,
/// so over 1 of a vertical axis can sit at the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    origin: f64,
    step: f64,
    bandwidth: f64,
    reversed: bool,
}

impl BandScale {
    pub fn new(count: usize, range: (f64, f64)) -> VizResult<Self> {
        Self::with_padding(count, range, 0.0)
    }

    /// `padding_inner` is the fraction of each step left empty between bands.
    pub fn with_padding(count: usize, range: (f64, f64), padding_inner: f64) -> VizResult<Self> {
        if count == 0 {
            return Err(VizError::InvalidData(
                "band scale needs at least one band".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(VizError::InvalidData(
                "band scale range must be finite".to_owned(),
            ));
        }
        if !padding_inner.is_finite() || !(0.0..1.0).contains(&padding_inner) {
            return Err(VizError::InvalidData(
                "band padding must be finite and in [0, 1)".to_owned(),
            ));
        }

        let reversed = range.1 < range.0;
        let (start, stop) = if reversed {
            (range.1, range.0)
        } else {
            (range.0, range.1)
        };
        let slots = (count as f64 - padding_inner).max(1.0);
        let step = (stop - start) / slots;

        Ok(Self {
            count,
            origin: start,
            step,
            bandwidth: step * (1.0 - padding_inner),
            reversed,
        })
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn step(self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn bandwidth(self) -> f64 {
        self.bandwidth
    }

    /// Leading pixel edge of the band at zero-based `index`.
    #[must_use]
    pub fn band(self, index: usize) -> Option<f64> {
        if index >= self.count {
            return None;
        }
        let slot = if self.reversed {
            self.count - 1 - index
        } else {
            index
        };
        Some(self.origin + self.step * slot as f64)
    }

    #[must_use]
    pub fn center(self, index: usize) -> Option<f64> {
        self.band(index).map(|edge| edge + self.bandwidth * 0.5)
    }
}

/// Maps a continuous value to one of `bins` ordinal buckets split at the
/// sample quantiles of its domain.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileScale {
    thresholds: Vec<f64>,
}

impl QuantileScale {
    pub fn new(domain: &[f64], bins: usize) -> VizResult<Self> {
        if bins == 0 {
            return Err(VizError::InvalidData(
                "quantile scale needs at least one bin".to_owned(),
            ));
        }
        if domain.iter().any(|value| !value.is_finite()) {
            return Err(VizError::InvalidData(
                "quantile domain must be finite".to_owned(),
            ));
        }
        if domain.is_empty() {
            return Err(VizError::InvalidData(
                "quantile domain must not be empty".to_owned(),
            ));
        }

        let mut sorted: Vec<OrderedFloat<f64>> = domain.iter().copied().map(OrderedFloat).collect();
        sorted.sort();
        let thresholds = (1..bins)
            .map(|i| quantile(&sorted, i as f64 / bins as f64))
            .collect();

        Ok(Self { thresholds })
    }

    #[must_use]
    pub fn bins(&self) -> usize {
        self.thresholds.len() + 1
    }

    /// Bucket index in `0..bins()`.
    #[must_use]
    pub fn bin(&self, value: f64) -> usize {
        self.thresholds
            .partition_point(|threshold| *threshold <= value)
    }
}

fn quantile(sorted: &[OrderedFloat<f64>], p: f64) -> f64 {
    let position = (sorted.len() - 1) as f64 * p;
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = position - lower as f64;
    sorted[lower].0 + (sorted[upper].0 - sorted[lower].0) * fraction
}
