use serde::Serialize;

use crate::types::{Band, Measure, View};

/// Band edges derived from the observed range of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandBoundaries {
    pub min: f64,
    pub max: f64,
    /// Upper edge of the low band
    pub b1: f64,
    /// Upper edge of the mid band
    pub b2: f64,
}

impl BandBoundaries {
    /// Split `[min, max]` into three equal-width parts.
    pub fn from_range(min: f64, max: f64) -> Self {
        let third = (max - min) / 3.0;
        let b1 = min + third;
        let b2 = b1 + third;
        Self { min, max, b1, b2 }
    }

    /// Observed range of `measure` over `view`, or `None` if the view is empty.
    pub fn observe(view: &View<'_>, measure: Measure) -> Option<Self> {
        let mut values = view.iter().map(|r| measure.value(r));
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Self::from_range(min, max))
    }

    /// Low is closed on both ends, high is open below; anything else is mid.
    pub fn classify(&self, value: f64) -> Band {
        if self.min <= value && value <= self.b1 {
            Band::Low
        } else if self.b2 < value && value <= self.max {
            Band::High
        } else {
            Band::Mid
        }
    }
}

/// Per-record band labels for one measure over one view.
///
/// Labels are a side table aligned with the view's record order; the records
/// themselves are left untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandAssignment {
    pub measure: Measure,
    /// `None` when the view was empty
    pub boundaries: Option<BandBoundaries>,
    pub labels: Vec<Band>,
}

impl BandAssignment {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Label every record of `view` as low, mid or high relative to the view's own
/// min/max of `measure`. An empty view yields an empty assignment.
pub fn bucketize(view: &View<'_>, measure: Measure) -> BandAssignment {
    let boundaries = BandBoundaries::observe(view, measure);
    let labels = match &boundaries {
        Some(b) => view.iter().map(|r| b.classify(measure.value(r))).collect(),
        None => Vec::new(),
    };

    BandAssignment {
        measure,
        boundaries,
        labels,
    }
}
