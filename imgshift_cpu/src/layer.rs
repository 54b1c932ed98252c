// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Isolated layers for group opacity.
//!
//! Every layer is a transparent pixmap the size of the canvas. Drawing goes to the topmost
//! layer; popping it composites the layer onto the one beneath, or onto the base pixmap when
//! it was the last one.

use imgshift_common::pixmap::Pixmap;
use thiserror::Error;

/// Errors of unbalanced layer usage.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerError {
    /// A layer was popped without a matching push.
    #[error("pop_layer called without a pushed layer")]
    EmptyStack,
    /// Rendering finished with layers still pushed.
    #[error("{0} layer(s) were pushed but never popped")]
    Unbalanced(usize),
}

#[derive(Debug)]
struct Layer {
    pixmap: Pixmap,
    opacity: f64,
}

/// A stack of isolated layers.
#[derive(Debug)]
pub struct LayerStack {
    width: u32,
    height: u32,
    layers: Vec<Layer>,
}

impl LayerStack {
    /// Create an empty stack for layers of the given size in pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            layers: Vec::new(),
        }
    }

    /// The number of pushed layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Push a new transparent layer that is composited with `opacity` when popped.
    pub fn push_layer(&mut self, opacity: f64) {
        self.layers.push(Layer {
            pixmap: Pixmap::new(self.width, self.height),
            opacity,
        });
    }

    /// Pop the topmost layer and composite it onto the layer beneath, or onto `base` if there
    /// is none.
    pub fn pop_layer(&mut self, base: &mut Pixmap) -> Result<(), LayerError> {
        let layer = self.layers.pop().ok_or(LayerError::EmptyStack)?;
        let target = match self.layers.last_mut() {
            Some(below) => &mut below.pixmap,
            None => base,
        };
        target.composite(&layer.pixmap, layer.opacity);
        Ok(())
    }

    /// The topmost layer, if any.
    pub fn top_mut(&mut self) -> Option<&mut Pixmap> {
        self.layers.last_mut().map(|layer| &mut layer.pixmap)
    }

    /// The pixmap drawing currently goes to: the topmost layer, or `base`.
    pub fn target<'a>(&'a mut self, base: &'a mut Pixmap) -> &'a mut Pixmap {
        match self.layers.last_mut() {
            Some(layer) => &mut layer.pixmap,
            None => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgshift_common::color::{Rgba8, BLACK, WHITE};

    #[test]
    fn pop_on_empty_stack_fails() {
        let mut stack = LayerStack::new(1, 1);
        let mut base = Pixmap::new(1, 1);
        assert_eq!(stack.pop_layer(&mut base), Err(LayerError::EmptyStack));
    }

    #[test]
    fn layers_start_transparent_and_isolate_drawing() {
        let mut stack = LayerStack::new(1, 1);
        let mut base = Pixmap::filled(1, 1, WHITE);
        stack.push_layer(1.0);
        assert_eq!(stack.depth(), 1);
        stack.target(&mut base).blend_pixel(0, 0, BLACK);
        assert_eq!(base.pixel(0, 0), Some(WHITE));
        stack.pop_layer(&mut base).unwrap();
        assert_eq!(base.pixel(0, 0), Some(BLACK));
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn nested_layers_pop_onto_parent() {
        let mut stack = LayerStack::new(1, 1);
        let mut base = Pixmap::filled(1, 1, WHITE);
        stack.push_layer(1.0);
        stack.push_layer(0.5);
        stack.top_mut().unwrap().blend_pixel(0, 0, BLACK);
        stack.pop_layer(&mut base).unwrap();
        // The inner layer landed in the outer one, not on the base.
        assert_eq!(base.pixel(0, 0), Some(WHITE));
        assert_eq!(
            stack.top_mut().unwrap().pixel(0, 0),
            Some(Rgba8 {
                r: 0,
                g: 0,
                b: 0,
                a: 127
            })
        );
        stack.pop_layer(&mut base).unwrap();
        assert_eq!(
            base.pixel(0, 0),
            Some(Rgba8 {
                r: 128,
                g: 128,
                b: 128,
                a: 255
            })
        );
    }
}
