//! AdEx neuron state and the two-phase step: explicit Euler candidate, then
//! the threshold/reset rule applied to that candidate.

use crate::params::AdexParams;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeuronState {
    /// Membrane potential (V)
    pub v: f64,
    /// Adaptation current (A)
    pub w: f64,
}

impl NeuronState {
    /// Initial state of every run: V at the leak potential, no adaptation.
    pub fn at_rest(p: &AdexParams) -> Self {
        Self { v: p.e_l, w: 0.0 }
    }
}

/// Integrating while the continuous update applies; Resetting for the step
/// at which the fire rule overrode it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Integrating,
    Resetting,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    Continued(NeuronState),
    /// `peak` is the candidate that crossed the threshold, `state` the
    /// post-reset state.
    Fired { state: NeuronState, peak: NeuronState },
}

impl StepOutcome {
    #[inline]
    pub fn state(&self) -> NeuronState {
        match *self {
            StepOutcome::Continued(s) => s,
            StepOutcome::Fired { state, .. } => state,
        }
    }

    #[inline]
    pub fn fired(&self) -> bool {
        matches!(self, StepOutcome::Fired { .. })
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        if self.fired() { Phase::Resetting } else { Phase::Integrating }
    }
}

/// `(dV/dt, dw/dt)` at state `s`.
#[inline]
pub fn derivatives(p: &AdexParams, s: &NeuronState) -> (f64, f64) {
    let leak = p.g_l * (p.e_l - s.v);
    let spike_drive = p.g_l * p.d_t * ((s.v - p.v_t) / p.d_t).exp();
    let dv = (leak + spike_drive + p.i_stim - s.w) / p.c_m;
    let dw = (p.a * (s.v - p.e_l) - s.w) / p.tau_w;
    (dv, dw)
}

/// Phase one: explicit Euler, both derivatives taken at the old state.
#[inline]
pub fn euler_candidate(p: &AdexParams, s: &NeuronState, dt: f64) -> NeuronState {
    let (dv, dw) = derivatives(p, s);
    NeuronState {
        v: s.v + dt * dv,
        w: s.w + dt * dw,
    }
}

/// Phase two: if the candidate V is above the firing threshold, V jumps to
/// the reset potential and w is incremented by `b`.
#[inline]
pub fn apply_reset(p: &AdexParams, candidate: NeuronState) -> StepOutcome {
    if candidate.v > p.v_fire {
        StepOutcome::Fired {
            state: NeuronState { v: p.v_r, w: candidate.w + p.b },
            peak: candidate,
        }
    } else {
        StepOutcome::Continued(candidate)
    }
}

/// One full integration step.
#[inline]
pub fn step(p: &AdexParams, s: &NeuronState, dt: f64) -> StepOutcome {
    apply_reset(p, euler_candidate(p, s, dt))
}
