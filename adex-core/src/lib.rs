//! adex-core: fixed-step adaptive-exponential integrate-and-fire neuron
//!
//! One neuron, two state variables (membrane potential `v`, adaptation
//! current `w`), explicit Euler with an instantaneous threshold/reset rule,
//! and a gap-free recorded trace. All quantities are SI; see [`units`].

pub mod context;
pub mod error;
pub mod neuron;
pub mod params;
pub mod runtime;
pub mod scenario;
pub mod trace;
pub mod units;

// Re-exports
pub use context::{SimContext, DEFAULT_DT, DEFAULT_DURATION, MAX_STEPS};
pub use error::{AdexError, AdexResult};
pub use neuron::{NeuronState, Phase, StepOutcome};
pub use params::{AdexParams, PARAM_NAMES};
pub use runtime::Integrator;
pub use scenario::{Scenario, ScenarioRun, ScenarioRunner, ScenarioTable};
pub use trace::{Sample, SpikeEvent, Trace, TraceSummary};
