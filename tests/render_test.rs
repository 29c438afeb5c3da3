use approx::assert_relative_eq;

use rusty_snn_viz::color::series_color;
use rusty_snn_viz::data::{RasterData, SpikeEvent, VoltageData};
use rusty_snn_viz::layout::ChartLayout;
use rusty_snn_viz::line::anchors;
use rusty_snn_viz::raster::{draw_raster_plot, RasterPlot};
use rusty_snn_viz::svg::Page;
use rusty_snn_viz::voltage::{draw_voltage_trace, VoltageTrace};
use rusty_snn_viz::zoom::ZoomEvent;

fn raster(simtime: f64, num_neurons: usize, spikes: Vec<SpikeEvent>) -> RasterData {
    RasterData::new(simtime, (0..num_neurons).collect(), spikes)
}

fn voltage() -> VoltageData {
    let times: Vec<f64> = (0..=40).map(|i| i as f64 * 2.5).collect();
    let traces = (0..3)
        .map(|n| {
            times
                .iter()
                .map(|t| -65.0 + 10.0 * ((t + 7.0 * n as f64) / 9.0).sin())
                .collect()
        })
        .collect();
    VoltageData::new(times, traces)
}

#[test]
fn test_raster_marks_follow_linear_scales() {
    let layout = ChartLayout::default();
    let (width, height) = (layout.plot_width(), layout.plot_height());

    let data = raster(
        100.0,
        10,
        vec![
            SpikeEvent::new(5, 50.0),
            SpikeEvent::new(2, 10.0),
            SpikeEvent::new(9, 99.0),
            SpikeEvent::new(0, 0.0),
        ],
    );
    let marks = RasterPlot::new(&data, &layout).marks();

    assert_relative_eq!(marks[0].cx, width / 2.0);
    assert_relative_eq!(marks[0].cy, height * 0.5);
    for (mark, spike) in marks.iter().zip(data.spikes.iter()) {
        assert_relative_eq!(mark.cx, spike.time / 100.0 * width, epsilon = 1e-9);
        assert_relative_eq!(mark.cy, spike.neuron_id as f64 / 10.0 * height, epsilon = 1e-9);
        assert_eq!(mark.r, 1.0);
    }
}

#[test]
fn test_raster_y_label_boundary() {
    let layout = ChartLayout::default();

    let data = raster(10.0, 3, vec![]);
    let svg = RasterPlot::new(&data, &layout).render();
    assert_eq!(svg.select(".y.label").unwrap().text_content(), "ID");

    let data = raster(10.0, 4, vec![]);
    let svg = RasterPlot::new(&data, &layout).render();
    assert_eq!(svg.select(".y.label").unwrap().text_content(), "Neuron ID");
}

#[test]
fn test_voltage_domain_spans_all_series() {
    let data = VoltageData::new(
        vec![0.0, 1.0, 2.0],
        vec![vec![-80.0, -75.0, -70.0], vec![20.0, 35.0, 30.0]],
    );
    let trace = VoltageTrace::new(&data, &ChartLayout::default());
    assert_eq!(trace.y_scale().domain(), [-80.0, 35.0]);
    assert_eq!(trace.x_scale().domain(), [0.0, 2.0]);

    // both series use the shared scale: the lowest sample is at the bottom, the highest at the top
    let paths = trace.paths();
    assert_relative_eq!(paths[0].points[0].1, 450.0);
    assert_relative_eq!(paths[1].points[1].1, 0.0);
}

#[test]
fn test_series_colors_cycle() {
    assert_eq!(series_color(0), "#1f77b4");
    assert_eq!(series_color(9), "#17becf");
    assert_eq!(series_color(10), series_color(0));
    assert_eq!(series_color(23), series_color(3));

    let data = VoltageData::new(vec![0.0, 1.0], vec![vec![0.0, 1.0]; 12]);
    let svg = VoltageTrace::new(&data, &ChartLayout::default()).render();
    let lines = svg.select_all(".line");
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[10].get_attr("style"), lines[0].get_attr("style"));
    assert_eq!(lines[11].get_attr("style"), Some("stroke: #ff7f0e;"));
}

#[test]
fn test_zoom_changes_only_x() {
    let data = voltage();
    let mut page = Page::new();
    let mut trace = draw_voltage_trace(&mut page, &data, &ChartLayout::default());

    let y_before = trace.y_scale().clone();
    let before: Vec<Option<String>> = page
        .get(0)
        .unwrap()
        .select_all(".line")
        .iter()
        .map(|line| line.get_attr("d").map(String::from))
        .collect();

    trace.on_zoom(
        &mut page,
        ZoomEvent::Wheel {
            point: (200.0, 100.0),
            delta: 250.0,
        },
    );

    let k = trace.zoom().transform().k;
    assert_relative_eq!(k, 2_f64.sqrt());
    let [d0, d1] = trace.x_scale().domain();
    assert_relative_eq!((d1 - d0) * k, 100.0, epsilon = 1e-9);
    assert_eq!(trace.y_scale(), &y_before);

    let after: Vec<Option<String>> = page
        .get(0)
        .unwrap()
        .select_all(".line")
        .iter()
        .map(|line| line.get_attr("d").map(String::from))
        .collect();
    assert_eq!(before.len(), after.len());

    for (d_before, d_after) in before.iter().zip(after.iter()) {
        let anchors_before = anchors(d_before.as_ref().unwrap());
        let anchors_after = anchors(d_after.as_ref().unwrap());
        assert_eq!(anchors_before.len(), anchors_after.len());
        for ((x0, y0), (x1, y1)) in anchors_before.iter().zip(anchors_after.iter()) {
            // x stretches around the pointer, y does not move
            assert_relative_eq!(*x1, (*x0 - 200.0) * k + 200.0, epsilon = 1e-6);
            assert_relative_eq!(*y1, *y0, epsilon = 1e-9);
        }
    }

    // axis ticks follow the new domain
    let svg = page.get(0).unwrap();
    let first_tick = svg.select(".x.axis").unwrap().select(".tick").unwrap();
    assert_ne!(first_tick.get_attr("transform"), Some("translate(0,0)"));
}

#[test]
fn test_repeated_draws_append() {
    let raster_data = raster(100.0, 10, vec![SpikeEvent::new(5, 50.0)]);
    let voltage_data = voltage();
    let layout = ChartLayout::default();

    let mut page = Page::new();
    draw_raster_plot(&mut page, &raster_data, &layout);
    draw_raster_plot(&mut page, &raster_data, &layout);
    assert_eq!(page.select_all("svg").len(), 2);

    draw_voltage_trace(&mut page, &voltage_data, &layout);
    draw_voltage_trace(&mut page, &voltage_data, &layout);
    assert_eq!(page.select_all("svg").len(), 4);
    assert_eq!(page.select_all("svg.voltmeter").len(), 2);
    assert_eq!(page.to_html().matches("<svg").count(), 4);
}

#[test]
fn test_page_saved_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("raster.json");
    let page_path = dir.path().join("raster.html");

    raster(100.0, 4, vec![SpikeEvent::new(1, 20.0), SpikeEvent::new(3, 80.0)])
        .save_to(&data_path)
        .unwrap();
    let data = RasterData::load_from(&data_path).unwrap();

    let mut page = Page::new();
    draw_raster_plot(&mut page, &data, &ChartLayout::default());
    page.save_to(&page_path).unwrap();

    let html = std::fs::read_to_string(&page_path).unwrap();
    assert!(html.contains("<circle cx=\"178\" cy=\"112.5\" r=\"1\"/>"));
    assert!(html.contains(">Neuron ID</text>"));
}
