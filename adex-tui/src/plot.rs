// Converts a trace into chart series in display units (ms, mV, nA).
//
// Spikes are drawn from the pre-reset peak, truncated at the voltage
// ceiling. The clip only touches these copies, never the trace.

use adex_core::units::{to_ms, to_mv, to_na};
use adex_core::{Sample, Trace};

/// Spikes are drawn truncated at 0 mV.
pub const VOLTAGE_CEILING_MV: f64 = 0.0;

#[inline]
pub fn display_voltage_mv(sample: &Sample, ceiling_mv: f64) -> f64 {
    to_mv(sample.peak.unwrap_or(sample.v)).min(ceiling_mv)
}

/// (t [ms], V [mV])
pub fn voltage_series(trace: &Trace, ceiling_mv: f64) -> Vec<(f64, f64)> {
    trace
        .samples()
        .iter()
        .map(|s| (to_ms(s.t), display_voltage_mv(s, ceiling_mv)))
        .collect()
}

/// (t [ms], w [nA])
pub fn adaptation_series(trace: &Trace) -> Vec<(f64, f64)> {
    trace.samples().iter().map(|s| (to_ms(s.t), to_na(s.w))).collect()
}

/// (V [mV], w [nA])
pub fn phase_series(trace: &Trace, ceiling_mv: f64) -> Vec<(f64, f64)> {
    trace
        .samples()
        .iter()
        .map(|s| (display_voltage_mv(s, ceiling_mv), to_na(s.w)))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Min/max of one coordinate with 5% padding. Degenerate ranges are widened
/// so the chart always has a non-empty span.
pub fn bounds(points: &[(f64, f64)], axis: Axis) -> [f64; 2] {
    let pick = |p: &(f64, f64)| match axis {
        Axis::X => p.0,
        Axis::Y => p.1,
    };
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in points.iter().map(pick).filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo > hi {
        return [0.0, 1.0];
    }
    let span = hi - lo;
    if span <= f64::EPSILON * hi.abs().max(1.0) {
        let pad = hi.abs().max(1.0) * 0.05;
        return [lo - pad, hi + pad];
    }
    let pad = span * 0.05;
    [lo - pad, hi + pad]
}
