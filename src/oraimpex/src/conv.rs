// SPDX-License-Identifier: GPL-3.0-or-later

use image::{DynamicImage, RgbaImage};
use oracore::paint::color::Pixel8;
use oracore::paint::{ChannelLayout, Image8, RawImage};

/// Unpack a freshly decoded image into a raw raster, keeping its own
/// channel layout so the normalization step can apply the alpha policy.
pub fn to_raw_image(img: DynamicImage) -> RawImage {
    if img.color().has_alpha() {
        let rgba = img.into_rgba8();
        let (w, h) = rgba.dimensions();
        RawImage::new(rgba.into_raw(), w as usize, h as usize, ChannelLayout::Rgba)
    } else {
        let rgb = img.into_rgb8();
        let (w, h) = rgb.dimensions();
        RawImage::new(rgb.into_raw(), w as usize, h as usize, ChannelLayout::Rgb)
    }
}

/// Buffers are straight alpha on both sides, so this is a plain
/// reinterpretation of the pixel bytes.
pub fn to_rgba_image(img: &Image8) -> RgbaImage {
    RgbaImage::from_raw(
        img.width as u32,
        img.height as u32,
        bytemuck::cast_slice(&img.pixels).to_vec(),
    )
    .unwrap()
}

pub fn from_rgba_image(img: &RgbaImage) -> Image8 {
    let mut out = Image8::new(img.width() as usize, img.height() as usize);
    out.pixels
        .copy_from_slice(bytemuck::cast_slice::<_, Pixel8>(img.as_raw()));
    out
}
