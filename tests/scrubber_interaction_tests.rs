use std::cell::{Cell, RefCell};
use std::rc::Rc;

use approx::assert_relative_eq;
use timeline_rs::api::{GanttChart, GanttChartConfig};
use timeline_rs::core::{TimelineEntry, Viewport};
use timeline_rs::extensions::{ScrubberEvent, ScrubberTopic};
use timeline_rs::interaction::{
    DIMMED_BAR_OPACITY, DragState, FULL_BAR_OPACITY, SCRUBBER_TRANSITION_MS, TransitionChannel,
};
use timeline_rs::render::{NullRenderer, RenderFrame, Renderer};
use timeline_rs::{ChartError, ChartResult};

fn two_entries() -> Vec<TimelineEntry> {
    vec![
        TimelineEntry::new("A", 0.0, 10.0),
        TimelineEntry::new("B", 5.0, 10.0),
    ]
}

fn chart() -> GanttChart<NullRenderer> {
    GanttChart::new(NullRenderer::default(), Viewport::new(800, 300)).expect("chart init")
}

fn record_events(chart: &mut GanttChart<NullRenderer>) -> Rc<RefCell<Vec<ScrubberEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    chart.on(ScrubberTopic::ScrubberMove, move |event| {
        sink.borrow_mut().push(event.clone());
    });
    events
}

#[test]
fn initial_render_publishes_scrubber_at_thirty_percent() {
    let mut chart = chart();
    let events = record_events(&mut chart);
    chart
        .render(two_entries(), GanttChartConfig::default())
        .expect("render");

    let scrubber = chart.scrubber().expect("scrubber active");
    assert_relative_eq!(scrubber.position_px, 210.0);

    let events = events.borrow();
    assert_eq!(events.len(), 1);
    let position = events[0].position.expect("position");
    assert_relative_eq!(position, scrubber.position_value);
    // 210 px of 700 over [-0.15, 15.15] lands at 4.44, inside A only.
    assert_eq!(events[0].intersected_data, vec![two_entries()[0].clone()]);
}

#[test]
fn scrubber_at_seven_intersects_both_entries() {
    let mut chart = chart();
    let events = record_events(&mut chart);
    chart
        .render(two_entries(), GanttChartConfig::default())
        .expect("render");

    chart.set_scrubber_value(7.0).expect("move scrubber");

    let events = events.borrow();
    let last = events.last().expect("event");
    assert_relative_eq!(last.position.expect("position"), 7.0, epsilon = 1e-9);
    assert_eq!(last.intersected_data, two_entries());
    assert!(
        chart
            .bar_states()
            .iter()
            .all(|bar| bar.opacity == FULL_BAR_OPACITY)
    );
}

#[test]
fn disabled_scrubber_publishes_full_data_once() {
    let mut chart = chart();
    let events = record_events(&mut chart);
    chart
        .render(
            two_entries(),
            GanttChartConfig::default().with_scrubber_enabled(false),
        )
        .expect("render");

    assert!(chart.scrubber().is_none());
    let events = events.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].position, None);
    assert_eq!(events[0].intersected_data, two_entries());
}

#[test]
fn static_mode_disables_scrubber_even_when_enabled() {
    let mut chart = chart();
    let events = record_events(&mut chart);
    chart
        .render(
            two_entries(),
            GanttChartConfig::default().with_interactive_mode(false),
        )
        .expect("render");

    assert!(chart.scrubber().is_none());
    assert_eq!(events.borrow()[0].position, None);
    assert!(chart.set_scrubber_position_px(100.0).is_err());
}

#[test]
fn drag_moves_clamps_and_releases() {
    let mut chart = chart();
    let events = record_events(&mut chart);
    chart
        .render(two_entries(), GanttChartConfig::default())
        .expect("render");
    let plot = chart.plot_area();

    assert!(!chart.pointer_down(plot.left + 500.0, plot.top + 50.0));
    assert_eq!(chart.drag_state(), DragState::Idle);

    assert!(chart.pointer_down(plot.left + 210.0, plot.top + 50.0));
    assert_eq!(chart.drag_state(), DragState::Dragging);

    chart
        .pointer_move(plot.left + 350.0, plot.top + 50.0)
        .expect("drag");
    assert_relative_eq!(chart.scrubber().expect("scrubber").position_px, 350.0);

    chart.pointer_move(5_000.0, 0.0).expect("drag past edge");
    assert_eq!(
        chart.scrubber().expect("scrubber").position_px,
        plot.width
    );

    chart.pointer_move(-5_000.0, 0.0).expect("drag past edge");
    assert_eq!(chart.scrubber().expect("scrubber").position_px, 0.0);

    chart.pointer_up();
    assert_eq!(chart.drag_state(), DragState::Idle);
    assert_eq!(events.borrow().len(), 4);
}

#[test]
fn idle_pointer_move_does_not_publish() {
    let mut chart = chart();
    let events = record_events(&mut chart);
    chart
        .render(two_entries(), GanttChartConfig::default())
        .expect("render");

    chart.pointer_move(400.0, 100.0).expect("hover move");
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn published_position_round_trips_through_scale() {
    let mut chart = chart();
    let events = record_events(&mut chart);
    chart
        .render(two_entries(), GanttChartConfig::default())
        .expect("render");

    for px in [0.0, 12.5, 333.3, 699.0, 700.0] {
        chart.set_scrubber_position_px(px).expect("move");
        let position = events
            .borrow()
            .last()
            .and_then(|event| event.position)
            .expect("position");
        let x = chart.scales().expect("scales").x;
        assert_relative_eq!(x.map(position), px, epsilon = 1e-9);
    }
}

#[test]
fn non_intersected_bars_dim_with_scrubber_transition() {
    let mut chart = chart();
    chart
        .render(two_entries(), GanttChartConfig::default())
        .expect("render");

    chart.set_scrubber_value(2.0).expect("move");
    let bars = chart.bar_states();
    assert_eq!(bars[0].opacity, FULL_BAR_OPACITY);
    assert_eq!(bars[1].opacity, DIMMED_BAR_OPACITY);

    let transition = bars[1].transition.expect("transition");
    assert_eq!(transition.channel, TransitionChannel::Scrubber);
    assert_eq!(transition.duration_ms, SCRUBBER_TRANSITION_MS);
    assert_eq!(transition.to, DIMMED_BAR_OPACITY);
}

#[test]
fn bar_edges_are_inclusive() {
    let mut chart = chart();
    let events = record_events(&mut chart);
    chart
        .render(two_entries(), GanttChartConfig::default())
        .expect("render");

    chart.set_scrubber_value(10.0).expect("move to A end");
    assert_eq!(
        events.borrow().last().expect("event").intersected_data,
        two_entries()
    );

    chart.set_scrubber_value(15.0).expect("move to B end");
    assert_eq!(
        events.borrow().last().expect("event").intersected_data,
        vec![two_entries()[1].clone()]
    );
}

#[test]
fn non_finite_position_is_rejected() {
    let mut chart = chart();
    chart
        .render(two_entries(), GanttChartConfig::default())
        .expect("render");
    assert!(chart.set_scrubber_position_px(f64::NAN).is_err());
}

#[test]
fn subscriptions_survive_rerender() {
    let mut chart = chart();
    let events = record_events(&mut chart);
    chart
        .render(two_entries(), GanttChartConfig::default())
        .expect("first render");
    chart
        .render(vec![TimelineEntry::new("C", 0.0, 1.0)], GanttChartConfig::default())
        .expect("second render");

    assert_eq!(events.borrow().len(), 2);
    assert_eq!(chart.subscriber_count(ScrubberTopic::ScrubberMove), 1);
}

#[test]
fn off_stops_delivery() {
    let mut chart = chart();
    let hits = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&hits);
    let id = chart
        .on_named("scrubberMove", move |_| *counter.borrow_mut() += 1)
        .expect("known topic");

    chart
        .render(two_entries(), GanttChartConfig::default())
        .expect("render");
    assert!(chart.off(id));
    assert!(!chart.off(id));
    chart.set_scrubber_value(3.0).expect("move");

    assert_eq!(*hits.borrow(), 1);
    assert!(chart.on_named("scrubberDrag", |_| {}).is_err());
}

struct FlakyRenderer {
    fail: Rc<Cell<bool>>,
}

impl Renderer for FlakyRenderer {
    fn render(&mut self, _frame: &RenderFrame) -> ChartResult<()> {
        if self.fail.get() {
            return Err(ChartError::InvalidData("backend unavailable".to_owned()));
        }
        Ok(())
    }
}

#[test]
fn move_is_published_when_redraw_fails() {
    let fail = Rc::new(Cell::new(false));
    let mut chart = GanttChart::new(
        FlakyRenderer {
            fail: Rc::clone(&fail),
        },
        Viewport::new(800, 300),
    )
    .expect("chart init");
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    chart.on(ScrubberTopic::ScrubberMove, move |event: &ScrubberEvent| {
        sink.borrow_mut().push(event.clone());
    });
    chart
        .render(two_entries(), GanttChartConfig::default())
        .expect("render");

    fail.set(true);
    let err = chart
        .set_scrubber_value(7.0)
        .expect_err("redraw failure surfaces");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let events = events.borrow();
    assert_eq!(events.len(), 2);
    let scrubber = chart.scrubber().expect("scrubber");
    assert_relative_eq!(events[1].position.expect("position"), scrubber.position_value);
    assert_eq!(events[1].intersected_data, two_entries());
}
