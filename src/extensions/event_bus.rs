use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::TimelineEntry;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Named topics observers can subscribe to.
///
/// Only `ScrubberMove` is published today; start/end are accepted so hosts can
/// register ahead of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrubberTopic {
    ScrubberMove,
    ScrubberStart,
    ScrubberEnd,
}

impl ScrubberTopic {
    pub const ALL: [Self; 3] = [Self::ScrubberMove, Self::ScrubberStart, Self::ScrubberEnd];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ScrubberMove => "scrubberMove",
            Self::ScrubberStart => "scrubberStart",
            Self::ScrubberEnd => "scrubberEnd",
        }
    }
}

impl fmt::Display for ScrubberTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScrubberTopic {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        Self::ALL
            .into_iter()
            .find(|topic| topic.as_str() == input)
            .ok_or_else(|| ChartError::UnknownTopic(input.to_owned()))
    }
}

/// Payload of scrubber notifications.
///
/// `position` is the scrubber location in domain units, or `None` when the
/// chart has no scrubber and every entry counts as intersected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrubberEvent {
    pub position: Option<f64>,
    pub intersected_data: Vec<TimelineEntry>,
    /// Bar fill of each intersected entry as drawn, index-aligned with
    /// `intersected_data`. Not part of the wire payload.
    #[serde(skip)]
    pub fill_colors: Vec<Color>,
}

impl ScrubberEvent {
    #[must_use]
    pub fn new(position: Option<f64>, intersected_data: Vec<TimelineEntry>) -> Self {
        Self {
            position,
            intersected_data,
            fill_colors: Vec::new(),
        }
    }

    /// Drawn fill of the `index`-th intersected entry, if the chart supplied it.
    #[must_use]
    pub fn fill_color(&self, index: usize) -> Option<Color> {
        self.fill_colors.get(index).copied()
    }

    pub fn to_json(&self) -> ChartResult<String> {
        serde_json::to_string(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize scrubber event: {e}"))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

pub type ScrubberCallback = Box<dyn FnMut(&ScrubberEvent)>;

/// In-process publish/subscribe keyed by topic.
///
/// Publishing calls every callback of the topic synchronously, in
/// registration order. There is no queueing.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: IndexMap<ScrubberTopic, Vec<(SubscriptionId, ScrubberCallback)>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<(ScrubberTopic, usize)> = self
            .subscribers
            .iter()
            .map(|(topic, callbacks)| (*topic, callbacks.len()))
            .collect();
        f.debug_struct("EventBus")
            .field("next_id", &self.next_id)
            .field("subscribers", &counts)
            .finish()
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(
        &mut self,
        topic: ScrubberTopic,
        callback: impl FnMut(&ScrubberEvent) + 'static,
    ) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers
            .entry(topic)
            .or_default()
            .push((id, Box::new(callback)));
        trace!(%topic, id = id.0, "subscribed");
        id
    }

    /// Removes a subscription. Returns `true` when it existed.
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        for callbacks in self.subscribers.values_mut() {
            if let Some(position) = callbacks.iter().position(|(entry, _)| *entry == id) {
                callbacks.remove(position);
                return true;
            }
        }
        false
    }

    /// Delivers `event` to every subscriber of `topic`; returns the number of
    /// callbacks invoked.
    pub fn publish(&mut self, topic: ScrubberTopic, event: &ScrubberEvent) -> usize {
        let Some(callbacks) = self.subscribers.get_mut(&topic) else {
            return 0;
        };
        for (_, callback) in callbacks.iter_mut() {
            callback(event);
        }
        trace!(%topic, delivered = callbacks.len(), "published");
        callbacks.len()
    }

    #[must_use]
    pub fn subscriber_count(&self, topic: ScrubberTopic) -> usize {
        self.subscribers.get(&topic).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{EventBus, ScrubberEvent, ScrubberTopic};
    use crate::error::ChartError;

    #[test]
    fn topics_parse_from_wire_names() {
        assert_eq!(
            "scrubberMove".parse::<ScrubberTopic>().expect("topic"),
            ScrubberTopic::ScrubberMove
        );
        assert!(matches!(
            "scrubberDrag".parse::<ScrubberTopic>(),
            Err(ChartError::UnknownTopic(_))
        ));
    }

    #[test]
    fn publish_reaches_only_matching_topic() {
        let mut bus = EventBus::new();
        let hits = Rc::new(RefCell::new(Vec::new()));

        let move_hits = hits.clone();
        bus.on(ScrubberTopic::ScrubberMove, move |_| {
            move_hits.borrow_mut().push("move")
        });
        let end_hits = hits.clone();
        bus.on(ScrubberTopic::ScrubberEnd, move |_| {
            end_hits.borrow_mut().push("end")
        });

        let event = ScrubberEvent::new(Some(1.0), Vec::new());
        assert_eq!(bus.publish(ScrubberTopic::ScrubberMove, &event), 1);
        assert_eq!(bus.publish(ScrubberTopic::ScrubberStart, &event), 0);
        assert_eq!(*hits.borrow(), vec!["move"]);
    }

    #[test]
    fn event_serializes_with_camel_case_keys() {
        let event = ScrubberEvent::new(None, Vec::new());
        assert_eq!(
            event.to_json().expect("json"),
            r#"{"position":null,"intersectedData":[]}"#
        );
    }
}
