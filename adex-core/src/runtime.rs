//! Integrator: owns the neuron state for one run, advances it on the
//! caller's clock and records every step.

use tracing::{debug, trace};

use crate::context::SimContext;
use crate::error::AdexResult;
use crate::neuron::{self, NeuronState, Phase, StepOutcome};
use crate::params::AdexParams;
use crate::trace::{Sample, SpikeEvent, Trace};

pub struct Integrator {
    params: AdexParams,
    ctx: SimContext,
    state: NeuronState,
    phase: Phase,
    trace: Trace,
}

impl Integrator {
    /// Validates `params`, places the neuron at rest and records the
    /// initial sample at t = 0.
    pub fn new(params: AdexParams, ctx: SimContext) -> AdexResult<Self> {
        params.validate()?;
        let state = NeuronState::at_rest(&params);
        let mut trace = Trace::with_capacity(ctx.total_steps().saturating_add(1) as usize);
        trace.record(Sample {
            t: ctx.time(),
            v: state.v,
            w: state.w,
            peak: None,
        });
        Ok(Self {
            params,
            ctx,
            state,
            phase: Phase::Integrating,
            trace,
        })
    }

    /// Run a full schedule and hand back the trace.
    pub fn run(params: AdexParams, ctx: SimContext) -> AdexResult<Trace> {
        let mut integrator = Self::new(params, ctx)?;
        integrator.run_to_end();
        Ok(integrator.into_trace())
    }

    pub fn params(&self) -> &AdexParams {
        &self.params
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    pub fn state(&self) -> NeuronState {
        self.state
    }

    /// Phase of the most recent step.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn into_trace(self) -> Trace {
        self.trace
    }

    pub fn is_done(&self) -> bool {
        self.ctx.is_done()
    }

    /// Advance by one step and record it. Returns the spike if the reset
    /// fired at this step; does nothing once the schedule is exhausted.
    pub fn step_once(&mut self) -> Option<SpikeEvent> {
        if !self.ctx.advance() {
            return None;
        }

        // Resetting lasts exactly one step: the phase is recomputed from
        // every outcome.
        let outcome = neuron::step(&self.params, &self.state, self.ctx.dt());
        self.state = outcome.state();
        self.phase = outcome.phase();

        let t = self.ctx.time();
        let mut spike = None;
        let peak = match outcome {
            StepOutcome::Continued(_) => None,
            StepOutcome::Fired { peak, .. } => {
                let event = SpikeEvent {
                    step: self.ctx.step_index(),
                    time: t,
                    v_peak: peak.v,
                    w_before: peak.w,
                };
                trace!(step = event.step, t_ms = t * 1e3, w = self.state.w, "reset");
                self.trace.record_spike(event);
                spike = Some(event);
                Some(peak.v)
            }
        };
        self.trace.record(Sample {
            t,
            v: self.state.v,
            w: self.state.w,
            peak,
        });
        spike
    }

    /// Advance up to `steps` steps; returns how many were taken.
    pub fn run_steps(&mut self, steps: u64) -> u64 {
        let mut taken = 0;
        while taken < steps && !self.ctx.is_done() {
            let _ = self.step_once();
            taken += 1;
        }
        taken
    }

    /// Advance until the schedule is exhausted.
    pub fn run_to_end(&mut self) {
        let remaining = self.ctx.total_steps() - self.ctx.step_index();
        self.run_steps(remaining);
        debug!(
            samples = self.trace.len(),
            spikes = self.trace.spike_count(),
            "run complete"
        );
    }
}
