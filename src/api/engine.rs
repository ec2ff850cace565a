use tracing::debug;

use crate::core::{PlotArea, TimelineEntry, TimelineScales, Viewport};
use crate::error::ChartResult;
use crate::extensions::{EventBus, ScrubberEvent, ScrubberTopic, SubscriptionId};
use crate::interaction::{BarVisualState, DragState, HoverState, ScrubberState};
use crate::render::Renderer;

use super::validation::{validate_config, validate_entries};
use super::{ColorResolver, GanttChartConfig};

/// One Gantt/timeline widget bound to a container.
///
/// The instance owns its scales, scrubber and per-bar state for the current
/// render. `render` rebuilds all of it from scratch; subscriptions registered
/// with `on` survive re-renders.
pub struct GanttChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) container: Viewport,
    pub(super) config: GanttChartConfig,
    pub(super) viewport: Viewport,
    pub(super) plot: PlotArea,
    pub(super) entries: Vec<TimelineEntry>,
    pub(super) scales: Option<TimelineScales>,
    pub(super) colors: ColorResolver,
    pub(super) bars: Vec<BarVisualState>,
    pub(super) scrubber: Option<ScrubberState>,
    pub(super) drag: DragState,
    pub(super) hover: Option<HoverState>,
    pub(super) bus: EventBus,
}

impl<R: Renderer> GanttChart<R> {
    /// Creates an empty chart for a container; nothing is drawn until `render`.
    pub fn new(renderer: R, container: Viewport) -> ChartResult<Self> {
        let container = container.validate()?;
        let config = GanttChartConfig::default();
        let viewport = resolve_viewport(container, &config)?;
        let plot = config.margins.plot_area(viewport)?;

        Ok(Self {
            renderer,
            container,
            config,
            viewport,
            plot,
            entries: Vec::new(),
            scales: None,
            colors: ColorResolver::default(),
            bars: Vec::new(),
            scrubber: None,
            drag: DragState::Idle,
            hover: None,
            bus: EventBus::new(),
        })
    }

    /// Replaces data and options, rebuilds scales and interaction state, draws,
    /// and publishes the initial `scrubberMove` notification.
    pub fn render(&mut self, data: Vec<TimelineEntry>, config: GanttChartConfig) -> ChartResult<()> {
        validate_config(&config)?;
        validate_entries(&data)?;
        let viewport = resolve_viewport(self.container, &config)?;
        let plot = config.margins.plot_area(viewport)?;

        let scales = if data.is_empty() {
            None
        } else {
            Some(TimelineScales::from_entries(&data, plot.width, plot.height)?)
        };
        let colors = scales
            .as_ref()
            .map(|scales| ColorResolver::new(config.color_scheme.as_deref(), scales.y.categories()))
            .unwrap_or_default();

        debug!(
            entries = data.len(),
            width = viewport.width,
            height = viewport.height,
            scrubber = config.scrubber_active(),
            "render timeline chart"
        );

        self.bars = vec![BarVisualState::default(); data.len()];
        self.entries = data;
        self.config = config;
        self.viewport = viewport;
        self.plot = plot;
        self.scales = scales;
        self.colors = colors;
        self.drag = DragState::Idle;
        self.hover = None;
        self.scrubber = None;
        self.init_scrubber();

        self.redraw()?;
        self.publish_scrubber_move();
        Ok(())
    }

    /// Draws the current state through the renderer.
    pub fn redraw(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    pub fn on(
        &mut self,
        topic: ScrubberTopic,
        callback: impl FnMut(&ScrubberEvent) + 'static,
    ) -> SubscriptionId {
        self.bus.on(topic, callback)
    }

    /// Same as `on`, with the topic given by its wire name (`"scrubberMove"`).
    pub fn on_named(
        &mut self,
        topic: &str,
        callback: impl FnMut(&ScrubberEvent) + 'static,
    ) -> ChartResult<SubscriptionId> {
        Ok(self.bus.on(topic.parse()?, callback))
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.bus.off(id)
    }

    #[must_use]
    pub fn subscriber_count(&self, topic: ScrubberTopic) -> usize {
        self.bus.subscriber_count(topic)
    }

    #[must_use]
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    #[must_use]
    pub fn config(&self) -> &GanttChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn scales(&self) -> Option<&TimelineScales> {
        self.scales.as_ref()
    }

    #[must_use]
    pub fn bar_states(&self) -> &[BarVisualState] {
        &self.bars
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub(super) fn current_scrubber_event(&self) -> ScrubberEvent {
        let (position, intersected_data): (Option<f64>, Vec<TimelineEntry>) = match &self.scrubber {
            Some(scrubber) => (
                Some(scrubber.position_value),
                scrubber
                    .intersected
                    .iter()
                    .map(|&index| self.entries[index].clone())
                    .collect(),
            ),
            None => (None, self.entries.clone()),
        };
        let fill_colors = intersected_data
            .iter()
            .map(|entry| self.colors.fill(entry))
            .collect();
        ScrubberEvent {
            position,
            intersected_data,
            fill_colors,
        }
    }

    pub(super) fn publish_scrubber_move(&mut self) {
        let event = self.current_scrubber_event();
        self.bus.publish(ScrubberTopic::ScrubberMove, &event);
    }
}

fn resolve_viewport(container: Viewport, config: &GanttChartConfig) -> ChartResult<Viewport> {
    Viewport::new(config.width.unwrap_or(container.width), config.height).validate()
}
