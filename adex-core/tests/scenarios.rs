use adex_core::units::{mv, ms, ns, pa, pf};
use adex_core::neuron::{self, NeuronState};
use adex_core::{
    AdexParams, Integrator, Scenario, ScenarioRunner, ScenarioTable, SimContext, Trace,
};

fn reference_trace(scenario: &Scenario) -> Trace {
    ScenarioRunner::reference().run(scenario).unwrap()
}

#[test]
fn trace_length_is_steps_plus_one() {
    for (dt_ms, duration_ms, expected) in [(0.1, 600.0, 6001), (0.1, 0.0, 1), (0.25, 10.0, 41), (0.3, 1.0, 4)] {
        let ctx = SimContext::from_ms(dt_ms, duration_ms).unwrap();
        let trace = Integrator::run(Scenario::ti_spiking().params, ctx).unwrap();
        assert_eq!(trace.len(), expected, "dt={} ms, duration={} ms", dt_ms, duration_ms);
    }
}

#[test]
fn first_sample_is_rest() {
    for scenario in ScenarioTable::reference().iter() {
        let trace = reference_trace(scenario);
        let first = trace.samples()[0];
        assert_eq!(first.t, 0.0);
        assert_eq!(first.v, scenario.params.e_l);
        assert_eq!(first.w, 0.0);
        assert!(!first.fired());
    }
}

#[test]
fn time_advances_by_exactly_one_step() {
    let trace = reference_trace(&Scenario::ti_spiking());
    let dt = ms(0.1);
    for pair in trace.samples().windows(2) {
        let delta = pair[1].t - pair[0].t;
        assert!(delta > 0.0);
        assert!((delta - dt).abs() < 1e-9 * dt, "delta {} != dt {}", delta, dt);
    }
    let last = trace.last().unwrap();
    assert!((last.t - 0.6).abs() < 1e-12);
}

#[test]
fn ti_scenario_fires_and_resets_consistently() {
    let scenario = Scenario::ti_spiking();
    let p = scenario.params;
    let trace = reference_trace(&scenario);

    assert!(trace.spike_count() >= 1);
    let samples = trace.samples();
    for spike in trace.spikes() {
        let at = samples[spike.step as usize];
        let before = samples[spike.step as usize - 1];

        assert_eq!(at.t, spike.time);
        assert!(spike.v_peak > p.v_fire);
        assert_eq!(at.peak, Some(spike.v_peak));
        // post-reset state is what the next step starts from
        assert_eq!(at.v, p.v_r);
        assert_eq!(at.w, spike.w_before + p.b);
        assert!(at.w >= spike.w_before);
        assert!(at.w >= before.w);
    }

    // every sample flagged as fired has a matching spike event
    let fired = samples.iter().filter(|s| s.fired()).count();
    assert_eq!(fired, trace.spike_count());
}

#[test]
fn no_sample_sits_above_threshold() {
    for scenario in ScenarioTable::reference().iter() {
        let trace = reference_trace(scenario);
        for s in trace.samples() {
            assert!(s.v.is_finite() && s.w.is_finite());
            assert!(s.v <= scenario.params.v_fire);
        }
    }
}

#[test]
fn identical_runs_are_bit_identical() {
    let a = reference_trace(&Scenario::ti_spiking());
    let b = reference_trace(&Scenario::ti_spiking());
    assert_eq!(a.len(), b.len());
    for (x, y) in a.samples().iter().zip(b.samples()) {
        assert_eq!(x.t.to_bits(), y.t.to_bits());
        assert_eq!(x.v.to_bits(), y.v.to_bits());
        assert_eq!(x.w.to_bits(), y.w.to_bits());
        assert_eq!(x.peak.map(f64::to_bits), y.peak.map(f64::to_bits));
    }
    assert_eq!(a.spikes(), b.spikes());
}

#[test]
fn unstimulated_neuron_without_adaptation_settles_at_rest() {
    let params = AdexParams {
        c_m: pf(40.0),
        g_l: ns(1.0),
        e_l: mv(-55.1),
        v_t: mv(-40.0),
        d_t: mv(2.0),
        a: 0.0,
        tau_w: ms(20.0),
        b: pa(70.0),
        v_r: mv(-60.0),
        i_stim: 0.0,
        v_fire: mv(15.0),
    };
    let trace = Integrator::run(params, SimContext::reference()).unwrap();

    assert_eq!(trace.spike_count(), 0);
    let samples = trace.samples();
    let rising = samples.windows(2).all(|p| p[1].v >= p[0].v - 1e-15);
    let falling = samples.windows(2).all(|p| p[1].v <= p[0].v + 1e-15);
    assert!(rising || falling, "membrane potential is not monotonic");
    for s in samples {
        assert!((s.v - params.e_l).abs() < mv(0.01));
        assert!(s.v < params.v_fire);
        assert_eq!(s.w, 0.0);
    }
}

#[test]
fn displaced_potential_decays_monotonically_toward_rest() {
    let params = AdexParams {
        c_m: pf(40.0),
        g_l: ns(1.0),
        e_l: mv(-55.1),
        v_t: mv(-40.0),
        d_t: mv(2.0),
        a: 0.0,
        tau_w: ms(20.0),
        b: pa(70.0),
        v_r: mv(-60.0),
        i_stim: 0.0,
        v_fire: mv(15.0),
    };
    let dt = ms(0.1);
    let mut state = NeuronState { v: params.e_l + mv(5.0), w: 0.0 };
    let mut distance = (state.v - params.e_l).abs();

    for _ in 0..6000 {
        let outcome = neuron::step(&params, &state, dt);
        assert!(!outcome.fired());
        state = outcome.state();
        let next = (state.v - params.e_l).abs();
        assert!(next <= distance + 1e-15, "distance grew from {} to {}", distance, next);
        distance = next;
    }
    assert!(distance < mv(0.01));
    assert_eq!(state.w, 0.0);
}

#[test]
fn run_all_covers_the_reference_table() {
    let runs = ScenarioRunner::reference().run_all(&ScenarioTable::reference());
    assert_eq!(runs.len(), 2);
    for run in &runs {
        assert_eq!(run.outcome.as_ref().unwrap().len(), 6001, "{}", run.name);
    }
}
