use serde::{Deserialize, Serialize};

/// Bins per distribution view.
pub const DEFAULT_BIN_COUNT: usize = 20;

/// One histogram bin: `[lower, upper)` except the last bin, which is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

/// Fixed-count, equal-width histogram over the domain `[0, max(values)]`.
///
/// Empty bins are retained so consumers can render zero-height bars. A value
/// equal to the domain maximum is clamped into the last bin. With no values
/// (or all zeros) the domain has zero width; the bins collapse to single
/// points at zero and every value lands in the first bin, so the bin counts
/// always sum to the number of input values.
pub fn histogram(values: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    if bin_count == 0 {
        return Vec::new();
    }

    let max = values.iter().fold(0.0_f64, |a, &b| a.max(b));
    let width = max / bin_count as f64;

    let mut counts = vec![0_u64; bin_count];
    for &value in values {
        let idx = if width > 0.0 {
            let raw = (value / width).floor() as isize;
            raw.clamp(0, bin_count as isize - 1) as usize
        } else {
            0
        };
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: i as f64 * width,
            upper: if i + 1 == bin_count {
                max
            } else {
                (i + 1) as f64 * width
            },
            count,
        })
        .collect()
}
