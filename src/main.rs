use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::append::Append;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::{Path, PathBuf};

use rusty_snn_viz::data::{RasterData, VoltageData};
use rusty_snn_viz::error::VizError;
use rusty_snn_viz::layout::{ChartLayout, Margin, DEFAULT_HEIGHT, DEFAULT_TICKS, DEFAULT_WIDTH};
use rusty_snn_viz::raster::draw_raster_plot;
use rusty_snn_viz::sampler::{rand_raster, rand_voltage};
use rusty_snn_viz::svg::Page;
use rusty_snn_viz::voltage::VoltageTrace;

#[derive(Parser, Debug)]
#[command(about = "Draw raster plots and voltage traces of spiking neural network simulations")]
struct Args {
    #[command(subcommand)]
    chart: Chart,
    /// The log level, e.g., error, warn, info or debug
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,
    /// The log file (logs go to stderr if omitted)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Chart {
    /// Draw a raster plot from spike events
    Raster {
        #[command(flatten)]
        common: CommonArgs,
        /// The number of neurons (sampled data only)
        #[arg(short = 'L', long, default_value = "50")]
        num_neurons: usize,
        /// The firing rate, in spikes per ms (sampled data only)
        #[arg(long, default_value = "0.02")]
        firing_rate: f64,
    },
    /// Draw a voltage trace from membrane potentials
    Voltage {
        #[command(flatten)]
        common: CommonArgs,
        /// The number of traces (sampled data only)
        #[arg(long, default_value = "3")]
        num_traces: usize,
        /// The sampling step, in ms (sampled data only)
        #[arg(long, default_value = "0.1")]
        dt: f64,
        /// The initial zoom factor of the time axis
        #[arg(long)]
        zoom: Option<f64>,
        /// The time (in ms) kept in place when zooming
        #[arg(long, default_value = "0.0")]
        zoom_center: f64,
    },
}

#[derive(clap::Args, Debug)]
struct CommonArgs {
    /// The JSON file holding the data to draw
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Sample random data with this seed instead of reading an input file
    #[arg(long, conflicts_with = "input")]
    seed: Option<u64>,
    /// The duration of the sampled data, in ms
    #[arg(short = 'T', long, default_value = "1000.0")]
    duration: f64,
    /// Save the sampled data to this JSON file
    #[arg(long, requires = "seed")]
    save_data: Option<PathBuf>,
    /// The output file
    #[arg(short, long)]
    output: PathBuf,
    /// The output format
    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,
    /// The outer width of the chart
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: f64,
    /// The outer height of the chart
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: f64,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// A web page with the chart in its body
    Html,
    /// A standalone SVG document
    Svg,
}

fn init_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<(), VizError> {
    let encoder = Box::new(PatternEncoder::new("{l} - {m}\n"));
    let appender: Box<dyn Append> = match log_file {
        Some(path) => Box::new(
            FileAppender::builder()
                .encoder(encoder)
                .build(path)
                .map_err(|e| VizError::IOError(e.to_string()))?,
        ),
        None => Box::new(
            ConsoleAppender::builder()
                .encoder(encoder)
                .target(Target::Stderr)
                .build(),
        ),
    };

    let config = Config::builder()
        .appender(Appender::builder().build("main", appender))
        .build(Root::builder().appender("main").build(level))
        .map_err(|e| VizError::IOError(e.to_string()))?;

    log4rs::init_config(config).map_err(|e| VizError::IOError(e.to_string()))?;
    Ok(())
}

fn missing_input() -> VizError {
    VizError::InvalidParameter("Either an input file or a sampling seed is required".to_string())
}

fn write_output(page: &Page, common: &CommonArgs) -> Result<(), VizError> {
    match common.format {
        Format::Html => page.save_to(&common.output)?,
        Format::Svg => {
            let svg = page
                .get(0)
                .ok_or_else(|| VizError::InvalidInput("Nothing was drawn".to_string()))?;
            fs::write(&common.output, svg.to_svg_document())?;
        }
    }
    log::info!("Chart saved to {}", common.output.display());
    Ok(())
}

fn main() -> Result<(), VizError> {
    let args = Args::parse();
    init_logging(args.log_level, args.log_file.as_deref())?;
    log::info!("{:?}", args);

    match &args.chart {
        Chart::Raster {
            common,
            num_neurons,
            firing_rate,
        } => {
            let layout = ChartLayout::build(common.width, common.height, Margin::default(), DEFAULT_TICKS)?;
            let data = match (&common.input, common.seed) {
                (Some(input), _) => RasterData::load_from(input)?,
                (None, Some(seed)) => {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    rand_raster(*num_neurons, common.duration, *firing_rate, &mut rng)?
                }
                (None, None) => return Err(missing_input()),
            };
            if let Some(path) = &common.save_data {
                data.save_to(path)?;
                log::info!("Sampled data saved to {}", path.display());
            }
            log::info!(
                "Raster data: {} spikes from {} neurons over {} ms",
                data.num_spikes(),
                data.num_neurons(),
                data.simtime
            );

            let mut page = Page::new();
            draw_raster_plot(&mut page, &data, &layout);
            write_output(&page, common)?;
        }
        Chart::Voltage {
            common,
            num_traces,
            dt,
            zoom,
            zoom_center,
        } => {
            let layout = ChartLayout::build(common.width, common.height, Margin::default(), DEFAULT_TICKS)?;
            let data = match (&common.input, common.seed) {
                (Some(input), _) => VoltageData::load_from(input)?,
                (None, Some(seed)) => {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    rand_voltage(*num_traces, common.duration, *dt, &mut rng)?
                }
                (None, None) => return Err(missing_input()),
            };
            if let Some(path) = &common.save_data {
                data.save_to(path)?;
                log::info!("Sampled data saved to {}", path.display());
            }
            log::info!(
                "Voltage data: {} traces of {} samples",
                data.num_traces(),
                data.times.len()
            );

            let mut trace = VoltageTrace::new(&data, &layout);
            if let Some(k) = zoom {
                let center = trace.x_scale().map(*zoom_center);
                trace.zoom_to(*k, (center, 0.0));
                log::info!("Time axis zoomed to {:?}", trace.x_scale().domain());
            }

            let mut page = Page::new();
            page.append(trace.render());
            write_output(&page, common)?;
        }
    }
    Ok(())
}
