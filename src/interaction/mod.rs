mod tooltip;

use serde::{Deserialize, Serialize};

pub use tooltip::{
    TOOLTIP_CURSOR_OFFSET_PX, TooltipContent, TooltipRow, TooltipSize, estimate_tooltip_size,
    place_tooltip,
};

/// Opacity of bars the scrubber does not touch.
pub const DIMMED_BAR_OPACITY: f64 = 0.3;
pub const FULL_BAR_OPACITY: f64 = 1.0;
pub const BAR_STROKE_WIDTH: f64 = 1.0;
pub const HOVER_BAR_STROKE_WIDTH: f64 = 2.0;
pub const SCRUBBER_TRANSITION_MS: u32 = 200;
pub const HOVER_TRANSITION_MS: u32 = 100;
/// Initial scrubber position as a fraction of the inner plot width.
pub const SCRUBBER_INITIAL_FRACTION: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Scrubber position in plot pixels and in domain units, plus the indices of
/// the entries it currently intersects (input order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrubberState {
    pub position_px: f64,
    pub position_value: f64,
    pub intersected: Vec<usize>,
}

impl ScrubberState {
    #[must_use]
    pub fn is_intersected(&self, index: usize) -> bool {
        self.intersected.binary_search(&index).is_ok()
    }
}

/// Which interaction started an opacity transition.
///
/// Channels are kept apart so hover and scrubber animations interrupt each
/// other instead of running concurrently on one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionChannel {
    Scrubber,
    Hover,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpacityTransition {
    pub channel: TransitionChannel,
    pub from: f64,
    pub to: f64,
    pub duration_ms: u32,
}

/// Per-bar visual state driven by scrubber and hover interactions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarVisualState {
    /// Opacity dictated by the scrubber intersection.
    pub scrubber_opacity: f64,
    /// Opacity currently targeted on screen.
    pub opacity: f64,
    pub stroke_width: f64,
    pub hovered: bool,
    pub transition: Option<OpacityTransition>,
    /// Channel of the last transition cut short by another channel.
    pub interrupted: Option<TransitionChannel>,
}

impl Default for BarVisualState {
    fn default() -> Self {
        Self {
            scrubber_opacity: FULL_BAR_OPACITY,
            opacity: FULL_BAR_OPACITY,
            stroke_width: BAR_STROKE_WIDTH,
            hovered: false,
            transition: None,
            interrupted: None,
        }
    }
}

impl BarVisualState {
    /// Applies a scrubber intersection result.
    ///
    /// Any in-flight hover transition is interrupted first.
    pub fn apply_scrubber(&mut self, intersected: bool) {
        self.interrupt(TransitionChannel::Hover);
        let target = if intersected {
            FULL_BAR_OPACITY
        } else {
            DIMMED_BAR_OPACITY
        };
        self.scrubber_opacity = target;
        self.start_transition(TransitionChannel::Scrubber, target, SCRUBBER_TRANSITION_MS);
    }

    /// Highlights the bar under the pointer, interrupting scrubber animation.
    pub fn hover_enter(&mut self) {
        self.interrupt(TransitionChannel::Scrubber);
        self.hovered = true;
        self.stroke_width = HOVER_BAR_STROKE_WIDTH;
        self.start_transition(TransitionChannel::Hover, FULL_BAR_OPACITY, HOVER_TRANSITION_MS);
    }

    /// Restores the scrubber-determined look.
    pub fn hover_leave(&mut self) {
        self.interrupt(TransitionChannel::Scrubber);
        self.hovered = false;
        self.stroke_width = BAR_STROKE_WIDTH;
        self.start_transition(
            TransitionChannel::Hover,
            self.scrubber_opacity,
            HOVER_TRANSITION_MS,
        );
    }

    fn interrupt(&mut self, channel: TransitionChannel) {
        if self
            .transition
            .is_some_and(|transition| transition.channel == channel)
        {
            self.transition = None;
            self.interrupted = Some(channel);
        }
    }

    fn start_transition(&mut self, channel: TransitionChannel, to: f64, duration_ms: u32) {
        self.transition = Some(OpacityTransition {
            channel,
            from: self.opacity,
            to,
            duration_ms,
        });
        self.opacity = to;
    }
}

/// Bar currently under the pointer and the pointer position in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverState {
    pub bar: usize,
    pub cursor_x: f64,
    pub cursor_y: f64,
}

#[cfg(test)]
mod tests {
    use super::{
        BarVisualState, DIMMED_BAR_OPACITY, FULL_BAR_OPACITY, HOVER_BAR_STROKE_WIDTH,
        TransitionChannel,
    };

    #[test]
    fn hover_interrupts_scrubber_transition() {
        let mut bar = BarVisualState::default();
        bar.apply_scrubber(false);
        assert_eq!(bar.opacity, DIMMED_BAR_OPACITY);

        bar.hover_enter();
        let transition = bar.transition.expect("hover transition");
        assert_eq!(transition.channel, TransitionChannel::Hover);
        assert_eq!(transition.from, DIMMED_BAR_OPACITY);
        assert_eq!(bar.interrupted, Some(TransitionChannel::Scrubber));
        assert_eq!(bar.opacity, FULL_BAR_OPACITY);
        assert_eq!(bar.stroke_width, HOVER_BAR_STROKE_WIDTH);
    }

    #[test]
    fn hover_leave_restores_scrubber_opacity() {
        let mut bar = BarVisualState::default();
        bar.apply_scrubber(false);
        bar.hover_enter();
        bar.hover_leave();
        assert_eq!(bar.opacity, DIMMED_BAR_OPACITY);
        assert!(!bar.hovered);
    }

    #[test]
    fn scrubber_interrupts_hover_transition() {
        let mut bar = BarVisualState::default();
        bar.hover_enter();
        bar.apply_scrubber(true);
        assert_eq!(bar.interrupted, Some(TransitionChannel::Hover));
        assert_eq!(
            bar.transition.map(|transition| transition.channel),
            Some(TransitionChannel::Scrubber)
        );
    }
}
