//! Axis rendering: ticks, tick labels and the domain path of a linear scale.
use crate::scale::LinearScale;
use crate::svg::Element;
use crate::utils::fmt_num;

/// Length of the tick lines and of the domain path end caps.
pub const TICK_SIZE: f64 = 6.0;
/// Space between a tick line and its label.
pub const TICK_PADDING: f64 = 3.0;

/// Where the axis is drawn with respect to the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Horizontal axis, labels below the ticks.
    Bottom,
    /// Vertical axis, labels left of the ticks.
    Left,
}

/// An axis bound to a scale, with a fixed number of requested ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    scale: LinearScale,
    orientation: Orientation,
    ticks: usize,
}

impl Axis {
    pub fn new(scale: LinearScale, orientation: Orientation, ticks: usize) -> Self {
        Axis {
            scale,
            orientation,
            ticks,
        }
    }

    pub fn scale(&self) -> &LinearScale {
        &self.scale
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the elements making up the axis: one `g.tick` per tick followed by the `path.domain`.
    pub fn elements(&self) -> Vec<Element> {
        let mut elements: Vec<Element> = self
            .scale
            .tick_labels(self.ticks)
            .into_iter()
            .map(|(value, label)| self.tick(self.scale.map(value), label))
            .collect();
        elements.push(self.domain_path());
        elements
    }

    /// Replace the content of an axis group with freshly computed ticks.
    pub fn render_into(&self, group: &mut Element) {
        group.clear();
        group.extend(self.elements());
    }

    fn tick(&self, position: f64, label: String) -> Element {
        let offset = fmt_num(TICK_SIZE.max(0.0) + TICK_PADDING);
        match self.orientation {
            Orientation::Bottom => Element::new("g")
                .attr("class", "tick")
                .attr("transform", format!("translate({},0)", fmt_num(position)))
                .attr("style", "opacity: 1;")
                .child(Element::new("line").attr("y2", fmt_num(TICK_SIZE)).attr("x2", 0))
                .child(
                    Element::new("text")
                        .attr("y", offset)
                        .attr("x", 0)
                        .attr("dy", ".71em")
                        .attr("style", "text-anchor: middle;")
                        .text(label),
                ),
            Orientation::Left => Element::new("g")
                .attr("class", "tick")
                .attr("transform", format!("translate(0,{})", fmt_num(position)))
                .attr("style", "opacity: 1;")
                .child(Element::new("line").attr("x2", fmt_num(-TICK_SIZE)).attr("y2", 0))
                .child(
                    Element::new("text")
                        .attr("x", format!("-{}", offset))
                        .attr("y", 0)
                        .attr("dy", ".32em")
                        .attr("style", "text-anchor: end;")
                        .text(label),
                ),
        }
    }

    fn domain_path(&self) -> Element {
        let [r0, r1] = self.scale.range_extent();
        let (r0, r1, cap) = (fmt_num(r0), fmt_num(r1), fmt_num(TICK_SIZE));
        let d = match self.orientation {
            Orientation::Bottom => format!("M{},{}V0H{}V{}", r0, cap, r1, cap),
            Orientation::Left => format!("M-{},{}H0V{}H-{}", cap, r0, r1, cap),
        };
        Element::new("path").attr("class", "domain").attr("d", d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bottom_axis() {
        let axis = Axis::new(
            LinearScale::new([0.0, 100.0], [0.0, 890.0]),
            Orientation::Bottom,
            5,
        );
        let elements = axis.elements();
        assert_eq!(elements.len(), 7);

        let first = &elements[0];
        assert_eq!(first.get_attr("class"), Some("tick"));
        assert_eq!(first.get_attr("transform"), Some("translate(0,0)"));
        assert_eq!(first.select("line").unwrap().get_attr("y2"), Some("6"));
        let text = first.select("text").unwrap();
        assert_eq!(text.get_attr("y"), Some("9"));
        assert_eq!(text.get_attr("dy"), Some(".71em"));
        assert_eq!(text.text_content(), "0");

        assert_eq!(elements[1].get_attr("transform"), Some("translate(178,0)"));
        assert_eq!(elements[5].select("text").unwrap().text_content(), "100");

        let domain = elements.last().unwrap();
        assert_eq!(domain.get_attr("class"), Some("domain"));
        assert_eq!(domain.get_attr("d"), Some("M0,6V0H890V6"));
    }

    #[test]
    fn test_left_axis() {
        let axis = Axis::new(
            LinearScale::new([-70.0, -50.0], [450.0, 0.0]),
            Orientation::Left,
            5,
        );
        let elements = axis.elements();
        assert_eq!(elements.len(), 6);

        let first = &elements[0];
        assert_eq!(first.get_attr("transform"), Some("translate(0,450)"));
        assert_eq!(first.select("line").unwrap().get_attr("x2"), Some("-6"));
        let text = first.select("text").unwrap();
        assert_eq!(text.get_attr("x"), Some("-9"));
        assert_eq!(text.get_attr("dy"), Some(".32em"));
        assert_eq!(text.text_content(), "-70");

        assert_eq!(elements[5].get_attr("d"), Some("M-6,0H0V450H-6"));
    }

    #[test]
    fn test_render_into_replaces_ticks() {
        let mut group = Element::new("g").attr("class", "x axis");
        let axis = Axis::new(LinearScale::new([0.0, 10.0], [0.0, 890.0]), Orientation::Bottom, 5);
        axis.render_into(&mut group);
        axis.render_into(&mut group);
        assert_eq!(group.select_all(".tick").len(), 6);
        assert_eq!(group.select_all(".domain").len(), 1);
    }

    #[test]
    fn test_collapsed_axis() {
        let axis = Axis::new(LinearScale::new([0.0, 0.0], [0.0, 890.0]), Orientation::Bottom, 5);
        let elements = axis.elements();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].get_attr("class"), Some("domain"));
    }
}
