use std::cell::RefCell;
use std::rc::Rc;

use timeline_rs::api::{GanttChart, GanttChartConfig};
use timeline_rs::core::{TimelineEntry, Viewport};
use timeline_rs::extensions::ScrubberTopic;
use timeline_rs::panel::{DataDisplayPanel, EMPTY_PANEL_MESSAGE};
use timeline_rs::render::NullRenderer;

fn entries() -> Vec<TimelineEntry> {
    vec![
        TimelineEntry::new("A", 0.0, 10.0),
        TimelineEntry::new("B", 5.0, 10.0),
    ]
}

fn chart_with_panel() -> (GanttChart<NullRenderer>, Rc<RefCell<DataDisplayPanel>>) {
    let mut chart =
        GanttChart::new(NullRenderer::default(), Viewport::new(800, 300)).expect("chart init");
    let panel = Rc::new(RefCell::new(DataDisplayPanel::new()));
    DataDisplayPanel::subscribe_to(&panel, &mut chart);
    (chart, panel)
}

#[test]
fn panel_follows_scrubber_intersection() {
    let (mut chart, panel) = chart_with_panel();
    chart
        .render(entries(), GanttChartConfig::default())
        .expect("render");
    assert_eq!(panel.borrow().cards().len(), 1);
    assert_eq!(panel.borrow().cards()[0].category, "A");

    chart.set_scrubber_value(7.0).expect("move");
    let categories: Vec<String> = panel
        .borrow()
        .cards()
        .iter()
        .map(|card| card.category.clone())
        .collect();
    assert_eq!(categories, vec!["A", "B"]);
}

#[test]
fn panel_lists_everything_without_scrubber() {
    let (mut chart, panel) = chart_with_panel();
    chart
        .render(
            entries(),
            GanttChartConfig::default().with_scrubber_enabled(false),
        )
        .expect("render");
    assert_eq!(panel.borrow().cards().len(), 2);
}

#[test]
fn empty_data_leaves_panel_in_placeholder_state() {
    let (mut chart, panel) = chart_with_panel();
    chart
        .render(Vec::new(), GanttChartConfig::default())
        .expect("render");

    let panel = panel.borrow();
    assert!(panel.is_placeholder());
    assert!(panel.cards().is_empty());
    assert!(panel.to_html().contains(EMPTY_PANEL_MESSAGE));
}

#[test]
fn scrubber_between_bars_shows_placeholder() {
    let (mut chart, panel) = chart_with_panel();
    chart
        .render(
            vec![
                TimelineEntry::new("A", 0.0, 2.0),
                TimelineEntry::new("B", 8.0, 2.0),
            ],
            GanttChartConfig::default(),
        )
        .expect("render");

    chart.set_scrubber_value(5.0).expect("move");
    assert!(panel.borrow().is_placeholder());
    assert_eq!(chart.subscriber_count(ScrubberTopic::ScrubberMove), 1);
}

#[test]
fn card_html_carries_swatch_and_values() {
    let mut panel = DataDisplayPanel::new().with_class_name("records");
    panel.update_data(&[TimelineEntry::new("deploy", 1_500.0, 250.0).with_color("#ff8800")]);

    let html = panel.to_html();
    assert!(html.starts_with("<div class=\"records\">"));
    assert!(html.contains("background-color: #ff8800"));
    assert!(html.contains("1,500"));
    assert!(html.contains("1,750"));
}

#[test]
fn swatch_matches_bar_fill_under_color_scheme() {
    let (mut chart, panel) = chart_with_panel();
    chart
        .render(
            vec![TimelineEntry::new("A", 0.0, 10.0)],
            GanttChartConfig::default().with_color_scheme(["#ff0000"]),
        )
        .expect("render");

    let frame = chart.build_render_frame().expect("frame");
    let bar = frame
        .rects()
        .find(|rect| rect.element_id.as_deref() == Some("bar-0"))
        .expect("bar rect");
    assert_eq!(bar.fill_color.to_css(), "#ff0000");

    let panel = panel.borrow();
    assert_eq!(panel.cards()[0].swatch_color, "#ff0000");
    assert!(panel.to_html().contains("background-color: #ff0000"));
}
