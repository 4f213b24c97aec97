//! Named parameter sets and a runner that gives each one a fresh clock and
//! neuron. Scenario enumeration lives here; the integration itself does not
//! know about it.

use tracing::{info, warn};

use crate::context::SimContext;
use crate::error::{AdexError, AdexResult};
use crate::params::AdexParams;
use crate::runtime::Integrator;
use crate::trace::Trace;
use crate::units::{mv, ms, ns, pa, pf};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub name: String,
    pub params: AdexParams,
}

impl Scenario {
    pub fn new(name: impl Into<String>, params: AdexParams) -> Self {
        Self { name: name.into(), params }
    }

    /// Tonic firing under a 12 pA step (Touboul & Brette 2008).
    pub fn ti_spiking() -> Self {
        Self::new(
            "TI spiking",
            AdexParams {
                c_m: pf(40.0),
                g_l: ns(1.0),
                e_l: mv(-55.1),
                v_t: mv(-54.7),
                d_t: mv(1.7),
                a: ns(2.5),
                tau_w: ms(20.0),
                b: pa(70.0),
                v_r: mv(-60.0),
                i_stim: pa(12.0),
                v_fire: mv(15.0),
            },
        )
    }

    /// Larger capacitance, larger increment, 1 pA stimulus.
    pub fn ta_spiking() -> Self {
        Self::new(
            "TA spiking",
            AdexParams {
                c_m: pf(60.0),
                g_l: ns(1.0),
                e_l: mv(-55.1),
                v_t: mv(-54.7),
                d_t: mv(2.55),
                a: ns(2.5),
                tau_w: ms(20.0),
                b: pa(105.0),
                v_r: mv(-60.0),
                i_stim: pa(1.0),
                v_fire: mv(15.0),
            },
        )
    }
}

/// Ordered scenario list. Names are not required to be unique; lookups
/// return the first match.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioTable {
    scenarios: Vec<Scenario>,
}

impl ScenarioTable {
    pub fn new() -> Self {
        Self { scenarios: Vec::new() }
    }

    /// The two reference scenarios, TI then TA.
    pub fn reference() -> Self {
        let mut table = Self::new();
        table.push(Scenario::ti_spiking());
        table.push(Scenario::ta_spiking());
        table
    }

    pub fn push(&mut self, scenario: Scenario) {
        self.scenarios.push(scenario);
    }

    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Keep only the named scenario.
    pub fn only(&self, name: &str) -> AdexResult<Self> {
        let scenario = self
            .get(name)
            .ok_or_else(|| AdexError::UnknownScenario(name.to_string()))?;
        Ok(Self { scenarios: vec![scenario.clone()] })
    }
}

impl FromIterator<Scenario> for ScenarioTable {
    fn from_iter<I: IntoIterator<Item = Scenario>>(iter: I) -> Self {
        Self { scenarios: iter.into_iter().collect() }
    }
}

/// Result of one scenario; a failed setup does not stop the others.
#[derive(Debug)]
pub struct ScenarioRun {
    pub name: String,
    pub outcome: AdexResult<Trace>,
}

pub struct ScenarioRunner {
    schedule: SimContext,
}

impl ScenarioRunner {
    pub fn new(schedule: SimContext) -> Self {
        Self { schedule: schedule.restarted() }
    }

    pub fn reference() -> Self {
        Self::new(SimContext::reference())
    }

    /// Integrator for `scenario` on a fresh clock, not yet stepped.
    pub fn integrator(&self, scenario: &Scenario) -> AdexResult<Integrator> {
        Integrator::new(scenario.params, self.schedule.restarted())
    }

    pub fn run(&self, scenario: &Scenario) -> AdexResult<Trace> {
        let trace = Integrator::run(scenario.params, self.schedule.restarted())?;
        info!(
            scenario = %scenario.name,
            samples = trace.len(),
            spikes = trace.spike_count(),
            "scenario complete"
        );
        Ok(trace)
    }

    pub fn run_named(&self, table: &ScenarioTable, name: &str) -> AdexResult<Trace> {
        let scenario = table
            .get(name)
            .ok_or_else(|| AdexError::UnknownScenario(name.to_string()))?;
        self.run(scenario)
    }

    pub fn run_all(&self, table: &ScenarioTable) -> Vec<ScenarioRun> {
        table
            .iter()
            .map(|scenario| {
                let outcome = self.run(scenario);
                if let Err(e) = &outcome {
                    warn!(scenario = %scenario.name, error = %e, "scenario aborted");
                }
                ScenarioRun { name: scenario.name.clone(), outcome }
            })
            .collect()
    }
}
