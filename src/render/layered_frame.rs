use crate::core::Viewport;

use super::{
    CanvasLayerKind, LayerStack, LinePrimitive, Primitive, RectPrimitive, RenderFrame,
    TextPrimitive,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub primitives: Vec<Primitive>,
}

impl LayerPrimitives {
    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Text(text) => Some(text),
            _ => None,
        })
    }
}

/// Frame with primitives grouped by layer; flattened for backends.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredRenderFrame {
    pub viewport: Viewport,
    pub layers: Vec<LayerPrimitives>,
}

impl LayeredRenderFrame {
    #[must_use]
    pub fn from_stack(viewport: Viewport, stack: LayerStack) -> Self {
        let layers = stack
            .layers
            .into_iter()
            .map(|kind| LayerPrimitives {
                kind,
                primitives: Vec::new(),
            })
            .collect();
        Self { viewport, layers }
    }

    pub fn push_line(&mut self, kind: CanvasLayerKind, line: LinePrimitive) {
        self.push(kind, Primitive::Line(line));
    }

    pub fn push_rect(&mut self, kind: CanvasLayerKind, rect: RectPrimitive) {
        self.push(kind, Primitive::Rect(rect));
    }

    pub fn push_text(&mut self, kind: CanvasLayerKind, text: TextPrimitive) {
        self.push(kind, Primitive::Text(text));
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    /// Concatenates layers in stack order, preserving order inside each layer.
    #[must_use]
    pub fn flatten(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        for layer in &self.layers {
            frame.primitives.extend(layer.primitives.iter().cloned());
        }
        frame
    }

    fn push(&mut self, kind: CanvasLayerKind, primitive: Primitive) {
        if let Some(layer) = self.layers.iter_mut().find(|layer| layer.kind == kind) {
            layer.primitives.push(primitive);
        }
    }
}
