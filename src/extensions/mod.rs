//! Observer wiring between a chart and the widgets linked to it.

pub mod event_bus;

pub use event_bus::{
    EventBus, ScrubberCallback, ScrubberEvent, ScrubberTopic, SubscriptionId,
};
