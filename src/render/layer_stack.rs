use serde::{Deserialize, Serialize};

/// Drawing layers of a timeline chart, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    CategoryBands,
    Grid,
    Axis,
    Bars,
    Scrubber,
    Labels,
    Tooltip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStack {
    pub layers: Vec<CanvasLayerKind>,
}

impl LayerStack {
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            layers: vec![
                CanvasLayerKind::Background,
                CanvasLayerKind::CategoryBands,
                CanvasLayerKind::Grid,
                CanvasLayerKind::Axis,
                CanvasLayerKind::Bars,
                CanvasLayerKind::Scrubber,
                CanvasLayerKind::Labels,
                CanvasLayerKind::Tooltip,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasLayerKind, LayerStack};

    #[test]
    fn bars_draw_above_grid_and_below_scrubber() {
        let stack = LayerStack::canonical();
        let index = |kind| stack.layers.iter().position(|layer| *layer == kind);
        assert!(index(CanvasLayerKind::Grid) < index(CanvasLayerKind::Bars));
        assert!(index(CanvasLayerKind::Bars) < index(CanvasLayerKind::Scrubber));
        assert_eq!(stack.layers.last(), Some(&CanvasLayerKind::Tooltip));
    }
}
