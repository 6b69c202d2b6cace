// SPDX-License-Identifier: GPL-3.0-or-later

use super::image::Image8;
use super::layerstack::LayerStack;
use super::rasterop;
use super::Size;
use tracing::warn;

/// Layer flattening options
#[derive(Default, Clone, Copy, Debug)]
pub struct LayerViewOptions {
    /// Leave hidden layers out of the composite.
    ///
    /// Defaults to false: every layer is composited no matter its
    /// visibility flag, and the flag only toggles display elsewhere.
    /// Set this to make the other choice deliberately.
    pub skip_hidden: bool,
}

pub const THUMBNAIL_MAX_SIZE: i32 = 256;

/// Merge the stack into a single image, bottom layer first.
///
/// Returns None if the stack has no layers. Blending happens in
/// premultiplied space, but the input layers and the returned image are
/// straight alpha like every other buffer in the codec.
pub fn merge(stack: &LayerStack, opts: &LayerViewOptions) -> Option<Image8> {
    let first = stack.layer(0)?;
    let mut dest = Image8::new(first.image.width, first.image.height);

    let mut scratch = vec![super::color::ZERO_PIXEL8; dest.pixels.len()];
    for layer in stack.iter_layers() {
        if opts.skip_hidden && !layer.visible {
            continue;
        }
        if layer.image.width != dest.width || layer.image.height != dest.height {
            warn!(
                "Skipping layer \"{}\": size {}x{} does not match canvas",
                layer.name, layer.image.width, layer.image.height
            );
            continue;
        }
        for (s, p) in scratch.iter_mut().zip(layer.image.pixels.iter()) {
            *s = rasterop::premultiply(*p);
        }
        rasterop::alpha_pixel_blend(&mut dest.pixels, &scratch);
    }

    for p in dest.pixels.iter_mut() {
        *p = rasterop::unpremultiply(*p);
    }

    Some(dest)
}

/// Scale a canvas size to fit the thumbnail bound, preserving aspect ratio.
///
/// Sizes already within the bound pass through unchanged; otherwise the
/// longer side becomes 256 and the shorter side is truncated downward.
pub fn thumbnail_size(size: Size) -> Size {
    let (w, h) = (size.width as i64, size.height as i64);
    if w <= THUMBNAIL_MAX_SIZE as i64 && h <= THUMBNAIL_MAX_SIZE as i64 {
        return size;
    }

    let max = THUMBNAIL_MAX_SIZE as i64;
    if w > h {
        Size::new(max as i32, (h * max / w) as i32)
    } else {
        Size::new((w * max / h) as i32, max as i32)
    }
}
