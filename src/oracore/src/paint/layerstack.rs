// SPDX-License-Identifier: GPL-3.0-or-later

use super::image::Image8;
use super::Size;

/// One normalized layer of a stack.
///
/// The pixel buffer is always sized exactly to the canvas, so the offset
/// is pure metadata here: it records where the source raster was placed
/// and is written back to the container verbatim. `visible` is likewise
/// retained and serialized but does not by itself exclude the layer from
/// compositing (see `flatten::LayerViewOptions`).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Layer {
    pub name: String,
    pub offset: (i32, i32),
    pub visible: bool,
    pub image: Image8,
}

/// An ordered set of layers sharing one canvas.
///
/// Index 0 is the bottommost layer and the last index the topmost. This
/// is the reverse of the on-disk document order, which lists layers from
/// the top down.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LayerStack {
    size: Size,
    layers: Vec<Layer>,
}

impl LayerStack {
    pub fn new(width: u32, height: u32) -> LayerStack {
        LayerStack {
            size: Size::new(width as i32, height as i32),
            layers: Vec::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width as u32
    }

    pub fn height(&self) -> u32 {
        self.size.height as u32
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Append a layer on top of the stack
    pub fn add_layer(&mut self, layer: Layer) {
        assert!(layer.image.size() == self.size);
        self.layers.push(layer);
    }

    pub fn remove_layer(&mut self, index: usize) -> Layer {
        self.layers.remove(index)
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    /// Find the bottommost layer with the given name
    pub fn layer_by_name(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn iter_layers(&self) -> impl ExactSizeIterator<Item = &Layer> + DoubleEndedIterator {
        self.layers.iter()
    }
}
