//! Random raster and voltage data, e.g., to try the charts out without a simulator at hand.
use rand::Rng;
use rand_distr::{Distribution, Exp, Normal};

use crate::data::{RasterData, SpikeEvent, VoltageData};
use crate::error::VizError;

/// The minimum time between two spikes of a neuron (in ms).
pub const REFRACTORY_PERIOD: f64 = 1.0;
/// The resting membrane potential (in mV).
pub const RESTING_POTENTIAL: f64 = -65.0;
/// The potential at which a neuron fires (in mV).
pub const FIRING_THRESHOLD: f64 = -50.0;
/// The potential a neuron is brought back to after firing (in mV).
pub const RESET_POTENTIAL: f64 = -70.0;
/// The membrane time constant (in ms).
pub const MEMBRANE_TIME_CONSTANT: f64 = 20.0;
/// The standard deviation of the membrane noise (in mV per square root of ms).
pub const NOISE_STD: f64 = 1.5;

/// Samples independent Poisson spike trains with a refractory period, for a number of neurons.
///
/// # Parameters
/// - `num_neurons`: The number of neurons, with IDs from 0 to `num_neurons - 1`.
/// - `simtime`: The duration of the simulation (in ms).
/// - `firing_rate`: The firing rate of every neuron (in spikes per ms), ignoring refractoriness.
/// - `rng`: A mutable reference to a random number generator implementing the `Rng` trait.
///
/// # Returns
/// The raster data, with the spikes sorted by time.
pub fn rand_raster<R: Rng>(
    num_neurons: usize,
    simtime: f64,
    firing_rate: f64,
    rng: &mut R,
) -> Result<RasterData, VizError> {
    if !(simtime > 0.0) {
        return Err(VizError::InvalidParameter(format!(
            "The simulation time must be positive, got {}",
            simtime
        )));
    }
    if !(firing_rate >= 0.0) {
        return Err(VizError::InvalidParameter(format!(
            "The firing rate must be non-negative, got {}",
            firing_rate
        )));
    }

    let mut spikes = vec![];
    if firing_rate > 0.0 {
        let isi = Exp::new(firing_rate)
            .map_err(|e| VizError::InvalidParameter(format!("Invalid firing rate: {}", e)))?;
        for id in 0..num_neurons {
            let mut time = isi.sample(rng);
            while time < simtime {
                spikes.push(SpikeEvent::new(id, time));
                time += REFRACTORY_PERIOD + isi.sample(rng);
            }
        }
    }
    spikes.sort_by(|s1, s2| s1.time.total_cmp(&s2.time));

    Ok(RasterData::new(simtime, (0..num_neurons).collect(), spikes))
}

/// Samples membrane potentials of noisy leaky integrate-and-fire neurons, each driven by its own constant input.
///
/// # Parameters
/// - `num_traces`: The number of neurons to record.
/// - `duration`: The duration of the recording (in ms).
/// - `dt`: The sampling (and integration) step (in ms).
/// - `rng`: A mutable reference to a random number generator implementing the `Rng` trait.
pub fn rand_voltage<R: Rng>(
    num_traces: usize,
    duration: f64,
    dt: f64,
    rng: &mut R,
) -> Result<VoltageData, VizError> {
    if !(duration > 0.0) {
        return Err(VizError::InvalidParameter(format!(
            "The duration must be positive, got {}",
            duration
        )));
    }
    if !(dt > 0.0 && dt <= duration) {
        return Err(VizError::InvalidParameter(format!(
            "The sampling step must be in (0, {}], got {}",
            duration, dt
        )));
    }

    let noise = Normal::new(0.0, NOISE_STD * dt.sqrt())
        .map_err(|e| VizError::InvalidParameter(format!("Invalid noise distribution: {}", e)))?;

    let num_samples = (duration / dt).floor() as usize + 1;
    let times: Vec<f64> = (0..num_samples).map(|i| i as f64 * dt).collect();

    let traces = (0..num_traces)
        .map(|_| {
            let drive = rng.gen_range(10.0..20.0);
            let mut potential = RESTING_POTENTIAL;
            let mut trace = Vec::with_capacity(num_samples);
            for _ in 0..num_samples {
                trace.push(potential);
                potential += dt * (RESTING_POTENTIAL - potential + drive) / MEMBRANE_TIME_CONSTANT
                    + noise.sample(rng);
                if potential >= FIRING_THRESHOLD {
                    potential = RESET_POTENTIAL;
                }
            }
            trace
        })
        .collect();

    Ok(VoltageData::new(times, traces))
}
