// Backend abstraction for the TUI: one backend per scenario figure.

use adex_core::{AdexResult, Integrator, Scenario, ScenarioRunner, SimContext, SpikeEvent, Trace};

/// Common interface for anything that can feed a figure.
pub trait SimBackend {
    /// Advance the simulation by one step; returns the spike if the reset fired.
    fn step(&mut self) -> Option<SpikeEvent>;
    /// Everything recorded so far.
    fn trace(&self) -> &Trace;
    /// Figure title.
    fn name(&self) -> &str;
    fn schedule(&self) -> &SimContext;
    fn is_done(&self) -> bool;
    /// Start over from rest on the same schedule.
    fn restart(&mut self) -> AdexResult<()>;

    /// Advance up to `steps` steps; returns how many were taken.
    fn advance(&mut self, steps: usize) -> usize {
        let mut taken = 0;
        while taken < steps && !self.is_done() {
            let _ = self.step();
            taken += 1;
        }
        taken
    }

    fn finish(&mut self) {
        while !self.is_done() {
            let _ = self.step();
        }
    }
}

/// Backed by an adex-core integrator.
pub struct CoreBackend {
    scenario: Scenario,
    integrator: Integrator,
}

impl CoreBackend {
    pub fn new(scenario: Scenario, runner: &ScenarioRunner) -> AdexResult<Self> {
        let integrator = runner.integrator(&scenario)?;
        Ok(Self { scenario, integrator })
    }
}

impl SimBackend for CoreBackend {
    fn step(&mut self) -> Option<SpikeEvent> {
        self.integrator.step_once()
    }

    fn trace(&self) -> &Trace {
        self.integrator.trace()
    }

    fn name(&self) -> &str {
        &self.scenario.name
    }

    fn schedule(&self) -> &SimContext {
        self.integrator.context()
    }

    fn is_done(&self) -> bool {
        self.integrator.is_done()
    }

    fn restart(&mut self) -> AdexResult<()> {
        let ctx = self.integrator.context().restarted();
        self.integrator = Integrator::new(self.scenario.params, ctx)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> CoreBackend {
        let runner = ScenarioRunner::new(SimContext::from_ms(0.1, 5.0).unwrap());
        CoreBackend::new(Scenario::ti_spiking(), &runner).unwrap()
    }

    #[test]
    fn advance_and_finish() {
        let mut b = backend();
        assert_eq!(b.name(), "TI spiking");
        assert_eq!(b.advance(10), 10);
        assert_eq!(b.trace().len(), 11);
        b.finish();
        assert!(b.is_done());
        assert_eq!(b.trace().len(), 51);
        assert_eq!(b.advance(10), 0);
    }

    #[test]
    fn restart_clears_trace() {
        let mut b = backend();
        b.finish();
        b.restart().unwrap();
        assert!(!b.is_done());
        assert_eq!(b.trace().len(), 1);
        assert_eq!(b.schedule().step_index(), 0);
    }

    #[test]
    fn invalid_scenario_is_rejected_up_front() {
        let mut s = Scenario::ta_spiking();
        s.params.d_t = -1.0;
        assert!(CoreBackend::new(s, &ScenarioRunner::reference()).is_err());
    }
}
