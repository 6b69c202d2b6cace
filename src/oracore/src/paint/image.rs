// SPDX-License-Identifier: GPL-3.0-or-later

use super::color::{Pixel8, ZERO_PIXEL8};
use super::rectiter::{MutableRectIterator, RectIterator};
use super::{Rectangle, Size};

/// A flat image buffer in normalized form: straight-alpha RGBA,
/// row major, with the row stride equal to the width.
#[derive(Default, Clone, PartialEq, Eq, Debug)]
pub struct Image8 {
    pub pixels: Vec<Pixel8>,
    pub width: usize,
    pub height: usize,
}

impl Image8 {
    pub fn new(width: usize, height: usize) -> Image8 {
        Image8 {
            pixels: vec![ZERO_PIXEL8; width * height],
            width,
            height,
        }
    }

    pub fn is_null(&self) -> bool {
        assert!(self.pixels.len() == self.width * self.height);
        self.pixels.is_empty()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as i32, self.height as i32)
    }

    pub fn rect_iter(&self, rect: &Rectangle) -> RectIterator<Pixel8> {
        RectIterator::new(&self.pixels, self.width, rect)
    }

    pub fn rect_iter_mut(&mut self, rect: &Rectangle) -> MutableRectIterator<Pixel8> {
        MutableRectIterator::new(&mut self.pixels, self.width, rect)
    }
}

/// Channel layout of a freshly decoded source raster
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChannelLayout {
    Rgb,
    Rgba,
}

impl ChannelLayout {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }
}

/// A decoded but not yet normalized raster: arbitrary dimensions,
/// interleaved bytes, three or four channels per pixel.
#[derive(Clone, Debug)]
pub struct RawImage {
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub layout: ChannelLayout,
}

impl RawImage {
    pub fn new(pixels: Vec<u8>, width: usize, height: usize, layout: ChannelLayout) -> RawImage {
        assert!(pixels.len() == width * height * layout.bytes_per_pixel());
        RawImage {
            pixels,
            width,
            height,
            layout,
        }
    }
}
