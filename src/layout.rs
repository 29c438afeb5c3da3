//! Chart geometry shared by the renderers: outer size, margins, ticks and the fixed text labels.
use serde::{Deserialize, Serialize};

use crate::error::VizError;
use crate::svg::Element;
use crate::utils::fmt_num;

/// Default outer width of a chart, margins included.
pub const DEFAULT_WIDTH: f64 = 960.0;
/// Default outer height of a chart, margins included.
pub const DEFAULT_HEIGHT: f64 = 500.0;
/// Default number of ticks requested per axis.
pub const DEFAULT_TICKS: usize = 5;
/// Label of the horizontal axis of both charts.
pub const TIME_LABEL: &str = "Time (ms)";

/// Space around the plot area, reserved for the title, the axes and their labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Margin {
            top: 20.0,
            right: 20.0,
            bottom: 30.0,
            left: 50.0,
        }
    }
}

/// Outer size, margins and tick count of a chart.
///
/// ```
/// use rusty_snn_viz::layout::ChartLayout;
///
/// let layout = ChartLayout::default();
/// assert_eq!(layout.plot_width(), 890.0);
/// assert_eq!(layout.plot_height(), 450.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    width: f64,
    height: f64,
    margin: Margin,
    ticks: usize,
}

impl Default for ChartLayout {
    fn default() -> Self {
        ChartLayout {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            margin: Margin::default(),
            ticks: DEFAULT_TICKS,
        }
    }
}

impl ChartLayout {
    /// Create a new layout with the specified parameters.
    /// Returns an error if the plot area left by the margins is empty or if no tick is requested.
    pub fn build(width: f64, height: f64, margin: Margin, ticks: usize) -> Result<Self, VizError> {
        let layout = ChartLayout {
            width,
            height,
            margin,
            ticks,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Check a layout, e.g., one deserialized from a configuration file.
    pub fn validate(&self) -> Result<(), VizError> {
        let (plot_width, plot_height) = (self.plot_width(), self.plot_height());
        if !(plot_width.is_finite() && plot_width > 0.0) {
            return Err(VizError::InvalidParameter(format!(
                "The plot width must be positive, got {}",
                plot_width
            )));
        }
        if !(plot_height.is_finite() && plot_height > 0.0) {
            return Err(VizError::InvalidParameter(format!(
                "The plot height must be positive, got {}",
                plot_height
            )));
        }
        if self.ticks == 0 {
            return Err(VizError::InvalidParameter(
                "At least one tick per axis is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn margin(&self) -> &Margin {
        &self.margin
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Returns the width of the plot area, i.e., the outer width without the left and right margins.
    pub fn plot_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Returns the height of the plot area, i.e., the outer height without the top and bottom margins.
    pub fn plot_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// Returns the root `svg` element, sized to the outer dimensions.
    pub fn svg_root(&self) -> Element {
        Element::new("svg")
            .attr("width", fmt_num(self.width))
            .attr("height", fmt_num(self.height))
    }

    /// Returns the group holding the plot, translated past the top and left margins.
    pub fn plot_group(&self) -> Element {
        Element::new("g").attr(
            "transform",
            format!(
                "translate({},{})",
                fmt_num(self.margin.left),
                fmt_num(self.margin.top)
            ),
        )
    }

    /// Returns the title, x label and y label, positioned relative to the plot area.
    pub fn labels(&self, title: &str, y_label: &str) -> [Element; 3] {
        let (plot_width, plot_height) = (self.plot_width(), self.plot_height());
        [
            Element::new("text")
                .attr("class", "title")
                .attr("x", fmt_num(plot_width / 2.0 - self.margin.left))
                .attr("y", -10)
                .text(title),
            Element::new("text")
                .attr("class", "x label")
                .attr("text-anchor", "middle")
                .attr("x", fmt_num(plot_width / 2.0))
                .attr("y", fmt_num(plot_height + self.margin.bottom - 12.0))
                .attr("dy", ".75em")
                .text(TIME_LABEL),
            Element::new("text")
                .attr("class", "y label")
                .attr("text-anchor", "middle")
                .attr("x", fmt_num(-plot_height / 2.0))
                .attr("y", fmt_num(-(self.margin.left - 5.0)))
                .attr("dy", ".75em")
                .attr("transform", "rotate(-90)")
                .text(y_label),
        ]
    }

    /// Returns an empty x axis group, moved to the bottom of the plot area.
    pub fn x_axis_group(&self) -> Element {
        Element::new("g")
            .attr("class", "x axis")
            .attr("transform", format!("translate(0,{})", fmt_num(self.plot_height())))
    }

    /// Returns an empty y axis group.
    pub fn y_axis_group(&self) -> Element {
        Element::new("g").attr("class", "y axis")
    }
}
