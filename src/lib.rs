//! This crate renders the results of spiking neural network simulations as SVG charts.
//!
//! # Raster Plots
//!
//! A raster plot shows one dot per spike, with time on the horizontal axis and the ID of the emitting neuron on the vertical axis.
//!
//! ```rust
//! use rusty_snn_viz::data::{RasterData, SpikeEvent};
//! use rusty_snn_viz::layout::ChartLayout;
//! use rusty_snn_viz::raster::draw_raster_plot;
//! use rusty_snn_viz::svg::Page;
//!
//! let data = RasterData::new(
//!     100.0,
//!     (0..10).collect(),
//!     vec![SpikeEvent::new(5, 50.0), SpikeEvent::new(2, 12.5)],
//! );
//!
//! let mut page = Page::new();
//! draw_raster_plot(&mut page, &data, &ChartLayout::default());
//!
//! let svg = page.get(0).unwrap();
//! assert_eq!(svg.select_all("circle").len(), 2);
//! assert_eq!(svg.select(".y.label").unwrap().text_content(), "Neuron ID");
//! ```
//!
//! # Voltage Traces
//!
//! A voltage trace draws the membrane potentials of one or more neurons as smooth lines over a shared time axis.
//! The time axis can be zoomed (up to 10x) and panned; every zoom event redraws the axes and the lines.
//!
//! ```rust
//! use rusty_snn_viz::data::VoltageData;
//! use rusty_snn_viz::layout::ChartLayout;
//! use rusty_snn_viz::svg::Page;
//! use rusty_snn_viz::voltage::draw_voltage_trace;
//! use rusty_snn_viz::zoom::ZoomEvent;
//!
//! let data = VoltageData::new(
//!     vec![0.0, 10.0, 20.0, 30.0],
//!     vec![vec![-65.0, -58.0, -51.0, -70.0], vec![-65.0, -64.0, -66.0, -65.0]],
//! );
//!
//! let mut page = Page::new();
//! let mut trace = draw_voltage_trace(&mut page, &data, &ChartLayout::default());
//! assert_eq!(trace.y_scale().domain(), [-70.0, -51.0]);
//!
//! trace.on_zoom(&mut page, ZoomEvent::DoubleClick { point: (0.0, 0.0), shift: false });
//! assert_eq!(trace.x_scale().domain(), [0.0, 15.0]);
//! ```
//!
//! # Sampling Data
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use rusty_snn_viz::sampler::rand_raster;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let data = rand_raster(50, 1000.0, 0.02, &mut rng).unwrap();
//! assert_eq!(data.num_neurons(), 50);
//! ```

pub mod axis;
pub mod color;
pub mod data;
pub mod error;
pub mod layout;
pub mod line;
pub mod raster;
pub mod sampler;
pub mod scale;
pub mod svg;
pub mod utils;
pub mod voltage;
pub mod zoom;
