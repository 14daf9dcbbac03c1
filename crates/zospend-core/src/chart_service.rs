//! "Nice number" axis scaling for bar and line charts.

/// Number of gridline intervals the axis aims for.
pub const AXIS_TARGET_INTERVALS: f64 = 4.0;

/// Axis used when there is nothing to plot.
pub const FALLBACK_AXIS: ChartAxis = ChartAxis {
    nice_max: 100.0,
    interval: 25.0,
};

const NICE_FRACTIONS: [u8; 4] = [1, 2, 5, 10];
/// Step counts tried before giving up on a nice interval. Multiplying by 4 or
/// 8 is exact in binary, so a representable multiple is always found unless
/// the product overflows.
const MAX_AXIS_STEPS: u32 = 8;

/// A rounded axis maximum and the tick spacing that divides it.
///
/// Both values are whole numbers and finite; `nice_max` is always an exact
/// multiple of `interval` and `interval` is at least 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartAxis {
    pub nice_max: f64,
    pub interval: f64,
}

impl ChartAxis {
    /// Number of intervals between zero and `nice_max`.
    pub fn steps(&self) -> u64 {
        (self.nice_max / self.interval).round() as u64
    }

    /// Tick positions from zero up to and including `nice_max`.
    pub fn ticks(&self) -> Vec<f64> {
        (0..=self.steps())
            .map(|step| step as f64 * self.interval)
            .collect()
    }
}

impl Default for ChartAxis {
    fn default() -> Self {
        FALLBACK_AXIS
    }
}

pub struct ChartService;

impl ChartService {
    /// Computes a human-friendly axis for `values`.
    ///
    /// Absent, negative, and non-finite values are ignored. With no positive
    /// value left the fixed [`FALLBACK_AXIS`] is returned.
    pub fn compute_axis(values: &[Option<f64>]) -> ChartAxis {
        let max_value = values
            .iter()
            .flatten()
            .copied()
            .filter(|value| value.is_finite() && *value > 0.0)
            .fold(0.0_f64, f64::max);
        if max_value == 0.0 {
            return FALLBACK_AXIS;
        }

        let interval = nice_interval(max_value / AXIS_TARGET_INTERVALS);
        let first_step = (max_value / interval).ceil().max(1.0) as u32;
        (first_step..=MAX_AXIS_STEPS)
            .map(|steps| f64::from(steps) * interval)
            .find(|nice_max| {
                nice_max.is_finite() && *nice_max >= max_value && nice_max % interval == 0.0
            })
            .map(|nice_max| ChartAxis { nice_max, interval })
            // Only reachable next to f64::MAX, where every larger multiple overflows.
            .unwrap_or(ChartAxis {
                nice_max: max_value,
                interval: max_value,
            })
    }

    /// Convenience for integer series such as minor-unit totals.
    pub fn compute_axis_for_amounts(amounts: &[i64]) -> ChartAxis {
        let values: Vec<Option<f64>> = amounts.iter().map(|amount| Some(*amount as f64)).collect();
        Self::compute_axis(&values)
    }
}

/// Smallest of 1, 2, 5 or 10 times a power of ten that covers `rough`.
fn nice_interval(rough: f64) -> f64 {
    let exponent = rough.log10().floor() as i32;
    let fraction = rough / decimal(1, exponent);
    let nice_fraction = NICE_FRACTIONS
        .iter()
        .copied()
        .find(|candidate| fraction <= f64::from(*candidate))
        .unwrap_or(10);
    decimal(nice_fraction, exponent).max(1.0)
}

/// `mantissa * 10^exponent`, correctly rounded. `powf` drifts off the nearest
/// double at large exponents.
fn decimal(mantissa: u8, exponent: i32) -> f64 {
    format!("{mantissa}e{exponent}")
        .parse()
        .unwrap_or_else(|_| f64::from(mantissa) * 10_f64.powi(exponent))
}
