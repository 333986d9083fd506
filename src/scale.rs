use serde::{Deserialize, Serialize};

/// Output range for the impact radius encoding.
pub const RADIUS_RANGE: (f64, f64) = (5.0, 20.0);

/// Min/max of the defined values in a sequence.
///
/// Absent values are skipped; `None` means nothing was defined, which
/// consumers must treat as "no data to plot" rather than a numeric range.
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut result: Option<(f64, f64)> = None;
    for value in values.into_iter().flatten() {
        result = Some(match result {
            None => (value, value),
            Some((min, max)) => (min.min(value), max.max(value)),
        });
    }
    result
}

/// Square-root interpolation from a data domain into a fixed output range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqrtScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value into the range by square root.
    ///
    /// A zero-width domain maps everything to the middle of the range.
    pub fn scale(&self, value: f64) -> f64 {
        let d0 = self.domain.0.max(0.0).sqrt();
        let d1 = self.domain.1.max(0.0).sqrt();
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        let t = (value.max(0.0).sqrt() - d0) / (d1 - d0);
        r0 + t * (r1 - r0)
    }
}
