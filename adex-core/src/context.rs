//! Caller-owned simulation clock: fixed step size, fixed duration.

use crate::error::{AdexError, AdexResult};
use crate::units::ms;

/// Reference step size (s).
pub const DEFAULT_DT: f64 = 0.1e-3;
/// Reference duration (s).
pub const DEFAULT_DURATION: f64 = 0.6;
/// Upper bound on steps per run. Every step keeps a sample, so this bounds
/// the trace at a few hundred MB.
pub const MAX_STEPS: u64 = 10_000_000;

#[derive(Clone, Debug, PartialEq)]
pub struct SimContext {
    dt: f64,
    duration: f64,
    step: u64,
    total_steps: u64,
}

impl SimContext {
    pub fn new(dt: f64, duration: f64) -> AdexResult<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(AdexError::InvalidSchedule("step size must be positive and finite"));
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(AdexError::InvalidSchedule("duration must be non-negative and finite"));
        }
        // Compare in f64 first: the u64 cast saturates for huge ratios.
        if duration / dt > MAX_STEPS as f64 + 1.0 {
            return Err(AdexError::InvalidSchedule("too many steps for duration / step size"));
        }
        let total_steps = step_count(duration, dt);
        if total_steps > MAX_STEPS {
            return Err(AdexError::InvalidSchedule("too many steps for duration / step size"));
        }
        Ok(Self {
            dt,
            duration,
            step: 0,
            total_steps,
        })
    }

    /// 0.1 ms steps over 0.6 s.
    pub fn reference() -> Self {
        Self {
            dt: DEFAULT_DT,
            duration: DEFAULT_DURATION,
            step: 0,
            total_steps: step_count(DEFAULT_DURATION, DEFAULT_DT),
        }
    }

    /// Same schedule given in milliseconds.
    pub fn from_ms(dt_ms: f64, duration_ms: f64) -> AdexResult<Self> {
        Self::new(ms(dt_ms), ms(duration_ms))
    }

    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[inline]
    pub fn step_index(&self) -> u64 {
        self.step
    }

    /// Number of integration steps in the run; the trace holds one more
    /// sample than this.
    #[inline]
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Time at the current step. Computed from the index so it never drifts.
    #[inline]
    pub fn time(&self) -> f64 {
        self.step as f64 * self.dt
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.step >= self.total_steps
    }

    /// Advance by one step. Returns false (and stays put) once the run is over.
    pub fn advance(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        self.step += 1;
        true
    }

    /// A fresh clock with the same schedule.
    pub fn restarted(&self) -> Self {
        Self { step: 0, ..self.clone() }
    }
}

/// `floor(duration / dt)`, tolerant to the representation error of ratios
/// like 0.6 / 1e-4.
fn step_count(duration: f64, dt: f64) -> u64 {
    let ratio = duration / dt;
    (ratio * (1.0 + 1e-12)).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_schedule_has_6000_steps() {
        let ctx = SimContext::reference();
        assert_eq!(ctx.total_steps(), 6000);
        assert_eq!(SimContext::from_ms(0.1, 600.0).unwrap().total_steps(), 6000);
    }

    #[test]
    fn non_integral_ratio_floors() {
        let ctx = SimContext::new(0.3, 1.0).unwrap();
        assert_eq!(ctx.total_steps(), 3);
    }

    #[test]
    fn advance_stops_at_end() {
        let mut ctx = SimContext::new(0.5, 1.0).unwrap();
        assert!(ctx.advance());
        assert!(ctx.advance());
        assert!(ctx.is_done());
        assert!(!ctx.advance());
        assert_eq!(ctx.step_index(), 2);
        assert!((ctx.time() - 1.0).abs() < 1e-12);
        assert_eq!(ctx.restarted().step_index(), 0);
    }

    #[test]
    fn rejects_bad_schedules() {
        assert!(SimContext::new(0.0, 1.0).is_err());
        assert!(SimContext::new(-1e-4, 1.0).is_err());
        assert!(SimContext::new(f64::NAN, 1.0).is_err());
        assert!(SimContext::new(1e-4, -0.1).is_err());
        assert!(SimContext::new(1e-4, f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_schedules_with_too_many_steps() {
        assert!(matches!(
            SimContext::from_ms(1e-9, 600.0),
            Err(AdexError::InvalidSchedule(_))
        ));
        assert!(matches!(
            SimContext::new(1e-300, 1.0),
            Err(AdexError::InvalidSchedule(_))
        ));
        let at_limit = SimContext::new(1.0, MAX_STEPS as f64).unwrap();
        assert_eq!(at_limit.total_steps(), MAX_STEPS);
        assert!(SimContext::new(1.0, (MAX_STEPS + 1) as f64).is_err());
    }

    #[test]
    fn zero_duration_is_a_single_sample_run() {
        let ctx = SimContext::new(1e-4, 0.0).unwrap();
        assert_eq!(ctx.total_steps(), 0);
        assert!(ctx.is_done());
    }
}
