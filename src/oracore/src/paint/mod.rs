// SPDX-License-Identifier: GPL-3.0-or-later

pub mod color;
pub mod editlayer;
pub mod flatten;
pub mod rasterop;
pub mod rectiter;

mod image;
mod layerstack;
mod rect;

pub use color::Pixel8;
pub use editlayer::normalize_image;
pub use flatten::{merge, thumbnail_size, LayerViewOptions, THUMBNAIL_MAX_SIZE};
pub use image::{ChannelLayout, Image8, RawImage};
pub use layerstack::{Layer, LayerStack};
pub use rect::{Rectangle, Size};
