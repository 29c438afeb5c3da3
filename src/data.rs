//! Input data of the charts: spike events for raster plots, sampled voltages for voltage traces.
//!
//! Both inputs are read-only snapshots, typically loaded from JSON files written by a simulator:
//!
//! ```json
//! {"simtime": 100.0, "neurons": [0, 1, 2], "data": [[0, 1.5], [2, 40.25]]}
//! {"times": [0.0, 0.1, 0.2], "data": [[-65.0, -64.2, -63.9]]}
//! ```
use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::VizError;

/// A spike emitted by a neuron, serialized as an `[id, time]` pair.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "(usize, f64)", into = "(usize, f64)")]
pub struct SpikeEvent {
    /// The ID of the neuron producing the spike.
    pub neuron_id: usize,
    /// The time at which the spike is produced.
    pub time: f64,
}

impl SpikeEvent {
    pub fn new(neuron_id: usize, time: f64) -> Self {
        SpikeEvent { neuron_id, time }
    }
}

impl From<(usize, f64)> for SpikeEvent {
    fn from((neuron_id, time): (usize, f64)) -> Self {
        SpikeEvent { neuron_id, time }
    }
}

impl From<SpikeEvent> for (usize, f64) {
    fn from(spike: SpikeEvent) -> Self {
        (spike.neuron_id, spike.time)
    }
}

/// Spikes of a simulation, with its duration and the neurons it involved.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RasterData {
    /// The total duration of the simulation.
    pub simtime: f64,
    /// The neurons of the simulation; only their number matters.
    pub neurons: Vec<usize>,
    /// The spikes, in any order.
    #[serde(rename = "data")]
    pub spikes: Vec<SpikeEvent>,
}

impl RasterData {
    pub fn new(simtime: f64, neurons: Vec<usize>, spikes: Vec<SpikeEvent>) -> Self {
        RasterData {
            simtime,
            neurons,
            spikes,
        }
    }

    pub fn num_neurons(&self) -> usize {
        self.neurons.len()
    }

    pub fn num_spikes(&self) -> usize {
        self.spikes.len()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, VizError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, VizError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), VizError> {
        save_json(self, path)
    }
}

/// The samples of a single membrane potential, aligned with the shared time axis.
pub type VoltageSeries = Vec<f64>;

/// Membrane potentials of one or more neurons, sampled at common times.
///
/// Every series is expected to have as many samples as there are times; this is not enforced.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct VoltageData {
    /// The sampling times, in increasing order.
    pub times: Vec<f64>,
    /// The voltage series.
    #[serde(rename = "data")]
    pub traces: Vec<VoltageSeries>,
}

impl VoltageData {
    pub fn new(times: Vec<f64>, traces: Vec<VoltageSeries>) -> Self {
        VoltageData { times, traces }
    }

    pub fn num_traces(&self) -> usize {
        self.traces.len()
    }

    /// Returns the last sampling time (NaN times are ignored), if any.
    pub fn max_time(&self) -> Option<f64> {
        self.times
            .iter()
            .copied()
            .filter(|t| !t.is_nan())
            .max_by(|a, b| a.total_cmp(b))
    }

    /// Returns the lowest and highest samples over all series combined (NaN samples are ignored), if any.
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        match self
            .traces
            .iter()
            .flatten()
            .copied()
            .filter(|v| !v.is_nan())
            .minmax()
        {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(v) => Some((v, v)),
            MinMaxResult::MinMax(min, max) => Some((min, max)),
        }
    }

    /// Returns the indices of the series whose length differs from the number of times.
    pub fn mismatched_traces(&self) -> Vec<usize> {
        self.traces
            .iter()
            .positions(|trace| trace.len() != self.times.len())
            .collect()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, VizError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, VizError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), VizError> {
        save_json(self, path)
    }
}

fn save_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<(), VizError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
