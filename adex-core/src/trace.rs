//! Recorded trace: one sample per step plus the initial state, and the spike
//! events seen along the way.

use crate::neuron::NeuronState;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpikeEvent {
    /// Step index at which the reset fired
    pub step: u64,
    /// Time of the step (s)
    pub time: f64,
    /// Candidate V that crossed the threshold (V)
    pub v_peak: f64,
    /// w just before the increment was applied (A)
    pub w_before: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub t: f64,
    /// Post-reset membrane potential at reset steps.
    pub v: f64,
    pub w: f64,
    /// Pre-reset candidate V when a reset fired at this step.
    pub peak: Option<f64>,
}

impl Sample {
    #[inline]
    pub fn fired(&self) -> bool {
        self.peak.is_some()
    }

    #[inline]
    pub fn state(&self) -> NeuronState {
        NeuronState { v: self.v, w: self.w }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    samples: Vec<Sample>,
    spikes: Vec<SpikeEvent>,
}

impl Trace {
    pub fn with_capacity(samples: usize) -> Self {
        Self {
            samples: Vec::with_capacity(samples),
            spikes: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub(crate) fn record_spike(&mut self, event: SpikeEvent) {
        self.spikes.push(event);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn spikes(&self) -> &[SpikeEvent] {
        &self.spikes
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn spike_count(&self) -> usize {
        self.spikes.len()
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.t)
    }

    pub fn spike_times(&self) -> impl Iterator<Item = f64> + '_ {
        self.spikes.iter().map(|e| e.time)
    }

    /// Intervals between consecutive spikes (s).
    pub fn inter_spike_intervals(&self) -> Vec<f64> {
        self.spikes.windows(2).map(|w| w[1].time - w[0].time).collect()
    }

    pub fn summary(&self) -> TraceSummary {
        let isis = self.inter_spike_intervals();
        let mean_isi = if isis.is_empty() {
            None
        } else {
            Some(isis.iter().sum::<f64>() / isis.len() as f64)
        };
        let max_w = self
            .samples
            .iter()
            .map(|s| s.w)
            .fold(None, |acc: Option<f64>, w| Some(acc.map_or(w, |m| m.max(w))));
        TraceSummary {
            samples: self.samples.len(),
            spike_count: self.spikes.len(),
            first_spike: self.spikes.first().map(|e| e.time),
            mean_isi,
            final_state: self.samples.last().map(Sample::state),
            max_w,
        }
    }
}

/// Scalar digest of a trace, for headless reporting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceSummary {
    pub samples: usize,
    pub spike_count: usize,
    pub first_spike: Option<f64>,
    pub mean_isi: Option<f64>,
    pub final_state: Option<NeuronState>,
    pub max_w: Option<f64>,
}
