//! Raster plot: one dot per spike, time on the horizontal axis and neuron ID on the vertical axis.
use log::debug;

use crate::axis::{Axis, Orientation};
use crate::data::RasterData;
use crate::layout::ChartLayout;
use crate::scale::LinearScale;
use crate::svg::{Element, Page};
use crate::utils::fmt_num;

/// Title of the raster plot.
pub const RASTER_TITLE: &str = "Raster plot";
/// Radius of the dot drawn for each spike.
pub const MARK_RADIUS: f64 = 1.0;
/// Above this number of neurons, the vertical axis is labelled with the long label.
pub const LONG_LABEL_MIN_NEURONS: usize = 3;

/// A dot of the raster plot, in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mark {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

/// Returns the label of the vertical axis, which depends on the number of neurons.
pub fn y_label(num_neurons: usize) -> &'static str {
    if num_neurons > LONG_LABEL_MIN_NEURONS {
        "Neuron ID"
    } else {
        "ID"
    }
}

/// A raster plot of a set of spikes.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterPlot<'a> {
    data: &'a RasterData,
    layout: ChartLayout,
    x: LinearScale,
    y: LinearScale,
}

impl<'a> RasterPlot<'a> {
    /// Create a new raster plot.
    /// Time spans `[0, simtime]` horizontally and neuron IDs span `[0, number of neurons]` from top to bottom.
    pub fn new(data: &'a RasterData, layout: &ChartLayout) -> Self {
        let x = LinearScale::new([0.0, data.simtime], [0.0, layout.plot_width()]);
        let y = LinearScale::new(
            [0.0, data.num_neurons() as f64],
            [0.0, layout.plot_height()],
        );
        RasterPlot {
            data,
            layout: layout.clone(),
            x,
            y,
        }
    }

    pub fn x_scale(&self) -> &LinearScale {
        &self.x
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    /// Returns one mark per spike, in the order of the spikes.
    pub fn marks(&self) -> Vec<Mark> {
        self.data
            .spikes
            .iter()
            .map(|spike| Mark {
                cx: self.x.map(spike.time),
                cy: self.y.map(spike.neuron_id as f64),
                r: MARK_RADIUS,
            })
            .collect()
    }

    /// Returns the chart as an `svg` element.
    pub fn render(&self) -> Element {
        debug!(
            "Rendering raster plot of {} spikes from {} neurons over {} ms",
            self.data.num_spikes(),
            self.data.num_neurons(),
            self.data.simtime
        );

        let mut x_axis = self.layout.x_axis_group();
        Axis::new(self.x.clone(), Orientation::Bottom, self.layout.ticks()).render_into(&mut x_axis);
        let mut y_axis = self.layout.y_axis_group();
        Axis::new(self.y.clone(), Orientation::Left, self.layout.ticks()).render_into(&mut y_axis);

        let circles = self.marks().into_iter().map(|mark| {
            Element::new("circle")
                .attr("cx", fmt_num(mark.cx))
                .attr("cy", fmt_num(mark.cy))
                .attr("r", fmt_num(mark.r))
        });

        let plot = self
            .layout
            .plot_group()
            .children_from(self.layout.labels(RASTER_TITLE, y_label(self.data.num_neurons())))
            .child(x_axis)
            .child(y_axis)
            .children_from(circles);

        self.layout.svg_root().child(plot)
    }
}

/// Draw a raster plot at the end of the page and return its position in the page.
/// Previous content is left untouched: drawing twice yields two plots.
pub fn draw_raster_plot(page: &mut Page, data: &RasterData, layout: &ChartLayout) -> usize {
    page.append(RasterPlot::new(data, layout).render())
}
