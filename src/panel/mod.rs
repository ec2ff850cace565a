//! Data display panel listing the entries the scrubber currently crosses.
//!
//! The panel owns no chart state; it is a view over the last
//! `scrubberMove` payload. `subscribe_to` wires it to a chart through a
//! shared `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{FALLBACK_BAR_COLOR, GanttChart};
use crate::core::TimelineEntry;
use crate::core::format::format_grouped;
use crate::extensions::{ScrubberEvent, ScrubberTopic, SubscriptionId};
use crate::markup::Element;
use crate::render::{Color, Renderer};

pub const EMPTY_PANEL_MESSAGE: &str = "No entries intersected";

/// One record rendered as a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelCard {
    pub category: String,
    pub subcategory: Option<String>,
    /// Normalized CSS color of the swatch (`#rrggbb` or `rgba(..)`).
    pub swatch_color: String,
    pub start: String,
    pub duration: String,
    pub end: String,
    pub note: Option<String>,
}

impl PanelCard {
    /// Card with the entry's own color as swatch.
    #[must_use]
    pub fn from_entry(entry: &TimelineEntry) -> Self {
        let swatch = Color::parse(&entry.color).unwrap_or(FALLBACK_BAR_COLOR);
        Self::with_swatch(entry, swatch)
    }

    #[must_use]
    pub fn with_swatch(entry: &TimelineEntry, swatch: Color) -> Self {
        Self {
            category: entry.category.clone(),
            subcategory: entry.subcategory.clone(),
            swatch_color: swatch.to_css(),
            start: format_grouped(entry.start, 0),
            duration: format_grouped(entry.duration, 0),
            end: format_grouped(entry.end(), 0),
            note: entry.text.clone(),
        }
    }

    #[must_use]
    pub fn title(&self) -> String {
        match &self.subcategory {
            Some(subcategory) => format!("{} / {subcategory}", self.category),
            None => self.category.clone(),
        }
    }

    fn element(&self) -> Element {
        let field = |label: &str, value: &str| {
            Element::new("div")
                .attr("class", "panel-field")
                .child(Element::new("span").attr("class", "panel-label").text(label))
                .child(Element::new("span").attr("class", "panel-value").text(value))
        };

        let mut card = Element::new("div")
            .attr("class", "panel-card")
            .child(
                Element::new("div")
                    .attr("class", "panel-card-header")
                    .child(
                        Element::new("span")
                            .attr("class", "panel-swatch")
                            .attr("style", format!("background-color: {}", self.swatch_color)),
                    )
                    .child(Element::new("strong").text(self.title())),
            )
            .child(field("Start", &self.start))
            .child(field("Duration", &self.duration))
            .child(field("End", &self.end));

        if let Some(note) = &self.note {
            card = card.child(Element::new("p").attr("class", "panel-note").text(note.as_str()));
        }
        card
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelContent {
    Placeholder(String),
    Cards(Vec<PanelCard>),
}

impl Default for PanelContent {
    fn default() -> Self {
        Self::Placeholder(EMPTY_PANEL_MESSAGE.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataDisplayPanel {
    content: PanelContent,
    class_name: Option<String>,
}

impl DataDisplayPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Replaces the whole content with `entries`.
    pub fn update_data(&mut self, entries: &[TimelineEntry]) {
        self.content = if entries.is_empty() {
            PanelContent::default()
        } else {
            PanelContent::Cards(entries.iter().map(PanelCard::from_entry).collect())
        };
        debug!(cards = self.cards().len(), "data panel updated");
    }

    /// Replaces the content from a chart notification, using the fills the
    /// chart drew so swatches match their bars under a color scheme.
    pub fn update_from_event(&mut self, event: &ScrubberEvent) {
        self.content = if event.intersected_data.is_empty() {
            PanelContent::default()
        } else {
            PanelContent::Cards(
                event
                    .intersected_data
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| match event.fill_color(index) {
                        Some(fill) => PanelCard::with_swatch(entry, fill),
                        None => PanelCard::from_entry(entry),
                    })
                    .collect(),
            )
        };
        debug!(cards = self.cards().len(), "data panel updated");
    }

    #[must_use]
    pub fn content(&self) -> &PanelContent {
        &self.content
    }

    #[must_use]
    pub fn cards(&self) -> &[PanelCard] {
        match &self.content {
            PanelContent::Cards(cards) => cards,
            PanelContent::Placeholder(_) => &[],
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self.content, PanelContent::Placeholder(_))
    }

    #[must_use]
    pub fn element(&self) -> Element {
        let root = Element::new("div")
            .attr("class", self.class_name.as_deref().unwrap_or("data-display-panel"));
        match &self.content {
            PanelContent::Placeholder(message) => root.child(
                Element::new("p")
                    .attr("class", "panel-placeholder")
                    .text(message.as_str()),
            ),
            PanelContent::Cards(cards) => root.children(cards.iter().map(PanelCard::element)),
        }
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        self.element().to_html_string()
    }

    /// Registers `panel` for the chart's `scrubberMove` notifications.
    ///
    /// Subscribe before `render` so the initial notification fills the panel.
    pub fn subscribe_to<R: Renderer>(
        panel: &Rc<RefCell<Self>>,
        chart: &mut GanttChart<R>,
    ) -> SubscriptionId {
        let panel = Rc::clone(panel);
        chart.on(ScrubberTopic::ScrubberMove, move |event| {
            panel.borrow_mut().update_from_event(event);
        })
    }
}
