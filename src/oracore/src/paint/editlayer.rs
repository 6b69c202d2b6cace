// SPDX-License-Identifier: GPL-3.0-or-later

use super::image::{ChannelLayout, Image8, RawImage};
use super::{Rectangle, Size};

/// Normalize a decoded source raster into a canvas sized layer buffer.
///
/// The source pixels are placed with their origin at `offset` and clipped
/// to the canvas bounds. Pixels outside the placed rectangle stay fully
/// transparent. Three channel sources get their alpha forced to opaque,
/// four channel sources keep their alpha verbatim. No scaling happens
/// here, this is a placement and reformat operation only.
pub fn normalize_image(src: &RawImage, offset: (i32, i32), canvas: Size) -> Image8 {
    assert!(canvas.width > 0 && canvas.height > 0);
    let mut dest = Image8::new(canvas.width as usize, canvas.height as usize);

    if src.width == 0 || src.height == 0 {
        return dest;
    }

    let placement = Rectangle::new(offset.0, offset.1, src.width as i32, src.height as i32);
    let destrect = match placement.cropped(canvas) {
        Some(r) => r,
        None => return dest,
    };
    // The same rectangle in source coordinates
    let srcrect = destrect.offset(-offset.0, -offset.1);

    let bpp = src.layout.bytes_per_pixel();
    let stride = src.width * bpp;

    for (destrow, sy) in dest.rect_iter_mut(&destrect).zip(srcrect.y..) {
        let srcrow = &src.pixels[sy as usize * stride..][..stride];
        for (dp, sx) in destrow.iter_mut().zip(srcrect.x as usize..) {
            let sp = &srcrow[sx * bpp..][..bpp];
            *dp = match src.layout {
                ChannelLayout::Rgba => [sp[0], sp[1], sp[2], sp[3]],
                ChannelLayout::Rgb => [sp[0], sp[1], sp[2], 255],
            };
        }
    }

    dest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_raw(width: usize, height: usize, layout: ChannelLayout) -> RawImage {
        // Pixel value encodes its source column so placement is traceable
        let bpp = layout.bytes_per_pixel();
        let mut pixels = Vec::with_capacity(width * height * bpp);
        for _y in 0..height {
            for x in 0..width {
                pixels.push(x as u8);
                pixels.push(100 + x as u8);
                pixels.push(200);
                if bpp == 4 {
                    pixels.push(128);
                }
            }
        }
        RawImage::new(pixels, width, height, layout)
    }

    #[test]
    fn test_left_clip() {
        let src = gradient_raw(10, 2, ChannelLayout::Rgba);
        let out = normalize_image(&src, (-5, 0), Size::new(8, 2));

        assert_eq!(out.width, 8);
        assert_eq!(out.height, 2);
        // Source columns 5..10 land on canvas columns 0..5
        for x in 0..5usize {
            assert_eq!(out.pixels[x], [(x + 5) as u8, (105 + x) as u8, 200, 128]);
        }
        // Beyond the source width the canvas stays transparent
        for x in 5..8usize {
            assert_eq!(out.pixels[x], [0, 0, 0, 0]);
        }
    }

    #[test]
    fn test_bottom_right_clip() {
        let src = gradient_raw(4, 4, ChannelLayout::Rgba);
        let out = normalize_image(&src, (6, 6), Size::new(8, 8));

        // Only the source's top-left 2x2 corner is visible
        assert_eq!(out.pixels[6 * 8 + 5], [0, 0, 0, 0]);
        assert_eq!(out.pixels[6 * 8 + 6], [0, 100, 200, 128]);
        assert_eq!(out.pixels[7 * 8 + 7], [1, 101, 200, 128]);
    }

    #[test]
    fn test_fully_outside() {
        let src = gradient_raw(4, 4, ChannelLayout::Rgba);
        let out = normalize_image(&src, (100, -100), Size::new(8, 8));
        assert!(out.pixels.iter().all(|p| *p == [0, 0, 0, 0]));
    }

    #[test]
    fn test_opaque_alpha_for_rgb_source() {
        let src = gradient_raw(3, 3, ChannelLayout::Rgb);
        let out = normalize_image(&src, (1, 1), Size::new(5, 5));

        for y in 0..5usize {
            for x in 0..5usize {
                let p = out.pixels[y * 5 + x];
                if (1..4).contains(&x) && (1..4).contains(&y) {
                    assert_eq!(p[3], 255);
                } else {
                    assert_eq!(p, [0, 0, 0, 0]);
                }
            }
        }
    }
}
