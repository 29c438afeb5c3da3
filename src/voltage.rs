//! Voltage trace: membrane potentials over time, one smooth line per neuron, with horizontal zoom and pan.
//!
//! # Examples
//!
//! ```
//! use rusty_snn_viz::data::VoltageData;
//! use rusty_snn_viz::layout::ChartLayout;
//! use rusty_snn_viz::svg::Page;
//! use rusty_snn_viz::voltage::draw_voltage_trace;
//! use rusty_snn_viz::zoom::ZoomEvent;
//!
//! let data = VoltageData::new(
//!     vec![0.0, 1.0, 2.0, 3.0],
//!     vec![vec![-65.0, -60.0, -55.0, -70.0]],
//! );
//! let mut page = Page::new();
//! let mut trace = draw_voltage_trace(&mut page, &data, &ChartLayout::default());
//!
//! // zoom in around the middle of the plot
//! trace.on_zoom(&mut page, ZoomEvent::Wheel { point: (445.0, 225.0), delta: 500.0 });
//! assert_eq!(trace.x_scale().domain(), [0.75, 2.25]);
//! ```
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, warn};

use crate::axis::{Axis, Orientation};
use crate::color::series_color;
use crate::data::VoltageData;
use crate::error::VizError;
use crate::layout::ChartLayout;
use crate::line::{path_data, Interpolation, Point};
use crate::scale::LinearScale;
use crate::svg::{Element, Page};
use crate::utils::fmt_num;
use crate::zoom::{Zoom, ZoomEvent};

/// Title of the voltage trace.
pub const VOLTAGE_TITLE: &str = "Voltage trace";
/// Label of the vertical axis.
pub const VOLTAGE_LABEL: &str = "Membrane potential (mV)";
/// ID of the clip path confining the lines to the plot area.
pub const CLIP_ID: &str = "clip";

static TRACE_COUNT: AtomicUsize = AtomicUsize::new(0);

/// The line of one voltage series, in plot coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TracePath {
    pub color: &'static str,
    pub points: Vec<Point>,
    /// The path data; None if the series has no sample.
    pub d: Option<String>,
}

/// A voltage trace of one or more voltage series, with its zoom state.
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageTrace<'a> {
    data: &'a VoltageData,
    layout: ChartLayout,
    y: LinearScale,
    zoom: Zoom,
    id: String,
    node: Option<usize>,
}

impl<'a> VoltageTrace<'a> {
    /// Create a new voltage trace.
    /// Time spans `[0, last time]` horizontally; voltages span the lowest to the highest sample over all series, bottom to top.
    pub fn new(data: &'a VoltageData, layout: &ChartLayout) -> Self {
        let x = LinearScale::new(
            [0.0, data.max_time().unwrap_or(0.0)],
            [0.0, layout.plot_width()],
        );
        let (min, max) = data.value_extent().unwrap_or((0.0, 0.0));
        let y = LinearScale::new([min, max], [layout.plot_height(), 0.0]);

        let mismatched = data.mismatched_traces();
        if !mismatched.is_empty() {
            warn!(
                "Voltage series {:?} do not have {} samples, extra samples or times are ignored",
                mismatched,
                data.times.len()
            );
        }

        VoltageTrace {
            data,
            layout: layout.clone(),
            y,
            zoom: Zoom::new(x),
            id: format!("voltmeter-{}", TRACE_COUNT.fetch_add(1, Ordering::Relaxed)),
            node: None,
        }
    }

    /// Returns the trace with another range of allowed scale factors.
    pub fn with_scale_extent(mut self, scale_extent: [f64; 2]) -> Result<Self, VizError> {
        self.zoom = Zoom::build(self.zoom.base().clone(), scale_extent)?;
        Ok(self)
    }

    /// Returns the horizontal scale of the current view.
    pub fn x_scale(&self) -> LinearScale {
        self.zoom.x()
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    pub fn zoom(&self) -> &Zoom {
        &self.zoom
    }

    /// Returns the id set on the rendered `svg` element, unique to this trace and its clones.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the position of the trace in the page it was last found on, if any.
    pub fn node(&self) -> Option<usize> {
        self.node
    }

    fn find_node(&self, page: &Page) -> Option<usize> {
        let is_own = |svg: &Element| svg.get_attr("id") == Some(self.id.as_str());
        match self.node {
            Some(node) if page.get(node).is_some_and(is_own) => Some(node),
            _ => page.iter().position(is_own),
        }
    }

    /// Returns one line per voltage series, computed against the current view.
    pub fn paths(&self) -> Vec<TracePath> {
        let x = self.x_scale();
        self.data
            .traces
            .iter()
            .enumerate()
            .map(|(i, trace)| {
                let points: Vec<Point> = self
                    .data
                    .times
                    .iter()
                    .zip(trace.iter())
                    .map(|(t, v)| (x.map(*t), self.y.map(*v)))
                    .collect();
                let d = path_data(&points, Interpolation::Monotone);
                TracePath {
                    color: series_color(i),
                    points,
                    d,
                }
            })
            .collect()
    }

    fn axes(&self) -> (Axis, Axis) {
        (
            Axis::new(self.x_scale(), Orientation::Bottom, self.layout.ticks()),
            Axis::new(self.y.clone(), Orientation::Left, self.layout.ticks()),
        )
    }

    /// Returns the chart as an `svg` element.
    pub fn render(&self) -> Element {
        debug!(
            "Rendering voltage trace of {} series over {} samples",
            self.data.num_traces(),
            self.data.times.len()
        );

        let clip = Element::new("defs").child(
            Element::new("clipPath").attr("id", CLIP_ID).child(
                Element::new("rect")
                    .attr("width", fmt_num(self.layout.plot_width()))
                    .attr("height", fmt_num(self.layout.plot_height())),
            ),
        );

        let lines = self.paths().into_iter().map(|path| {
            let line = Element::new("path")
                .attr("class", "line")
                .attr("clip-path", format!("url(#{})", CLIP_ID));
            let line = match path.d {
                Some(d) => line.attr("d", d),
                None => line,
            };
            line.attr("style", format!("stroke: {};", path.color))
        });

        let (x_axis, y_axis) = self.axes();
        let mut x_group = self.layout.x_axis_group();
        x_axis.render_into(&mut x_group);
        let mut y_group = self.layout.y_axis_group();
        y_axis.render_into(&mut y_group);

        let plot = self
            .layout
            .plot_group()
            .child(clip)
            .children_from(lines)
            .children_from(self.layout.labels(VOLTAGE_TITLE, VOLTAGE_LABEL))
            .child(x_group)
            .child(y_group);

        self.layout
            .svg_root()
            .attr("class", "voltmeter")
            .attr("id", &self.id)
            .child(plot)
    }

    /// Update the axes and the lines of a rendered trace to the current view.
    pub fn redraw(&self, svg: &mut Element) {
        let (x_axis, y_axis) = self.axes();
        if let Some(group) = svg.select_mut(".x.axis") {
            x_axis.render_into(group);
        }
        if let Some(group) = svg.select_mut(".y.axis") {
            y_axis.render_into(group);
        }
        for (line, path) in svg.select_all_mut(".line").into_iter().zip(self.paths()) {
            match path.d {
                Some(d) => line.set_attr("d", d),
                None => line.remove_attr("d"),
            }
        }
    }

    /// Apply a zoom event to the view, without redrawing.
    pub fn zoomed(&mut self, event: ZoomEvent) {
        self.zoom.handle(event);
    }

    /// Zoom to the given scale factor around the given point, without redrawing.
    pub fn zoom_to(&mut self, k: f64, center: Point) {
        self.zoom.scale_to(k, center);
    }

    /// Apply a zoom event and redraw the trace on the page it was drawn on.
    /// The trace is looked up by its id, so other charts of the page are never touched.
    /// The redraw completes before returning, so events are processed one at a time.
    pub fn on_zoom(&mut self, page: &mut Page, event: ZoomEvent) {
        self.zoomed(event);
        self.node = self.find_node(page);
        match self.node.and_then(|node| page.get_mut(node)) {
            Some(svg) => self.redraw(svg),
            None => warn!("Voltage trace is not drawn on this page, zoom event ignored"),
        }
    }
}

/// Draw a voltage trace at the end of the page and return it, ready to receive zoom events.
/// Previous content is left untouched: drawing twice yields two traces.
pub fn draw_voltage_trace<'a>(
    page: &mut Page,
    data: &'a VoltageData,
    layout: &ChartLayout,
) -> VoltageTrace<'a> {
    let mut trace = VoltageTrace::new(data, layout);
    trace.node = Some(page.append(trace.render()));
    trace
}
