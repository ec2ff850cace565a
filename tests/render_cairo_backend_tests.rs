#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use timeline_rs::ChartError;
use timeline_rs::api::{GanttChart, GanttChartConfig};
use timeline_rs::core::{TimelineEntry, Viewport};
use timeline_rs::render::{CairoContextRenderer, CairoRenderer};

fn entries() -> Vec<TimelineEntry> {
    vec![
        TimelineEntry::new("A", 0.0, 10.0),
        TimelineEntry::new("B", 5.0, 10.0).with_subcategory("x"),
    ]
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_chart_and_encodes_png() {
    let renderer = CairoRenderer::new(900, 400).expect("renderer");
    let mut chart = GanttChart::new(renderer, Viewport::new(900, 400)).expect("chart init");
    chart
        .render(entries(), GanttChartConfig::default())
        .expect("render");

    let frame = chart.build_render_frame().expect("frame");
    let renderer = chart.into_renderer();
    let stats = renderer.last_stats();
    assert_eq!(stats.rects_drawn, frame.rects().count());
    assert_eq!(stats.texts_drawn, frame.texts().count());

    let mut png = Vec::new();
    renderer.write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let mut chart = GanttChart::new(
        CairoRenderer::new(600, 320).expect("renderer"),
        Viewport::new(600, 320),
    )
    .expect("chart init");
    chart
        .render(entries(), GanttChartConfig::default())
        .expect("render");
    let frame = chart.build_render_frame().expect("frame");

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    let mut renderer = chart.into_renderer();
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("external context render");
    assert_eq!(renderer.last_stats().lines_drawn, frame.lines().count());
}
