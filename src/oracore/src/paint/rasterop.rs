// SPDX-License-Identifier: GPL-3.0-or-later

use super::color::{Pixel8, ALPHA_CHANNEL};

trait ScratchArray {
    fn into_work(self) -> [u32; 4];
    fn from_work(p: [u32; 4]) -> Self;
}

impl ScratchArray for Pixel8 {
    fn from_work(p: [u32; 4]) -> Self {
        [p[0] as u8, p[1] as u8, p[2] as u8, p[3] as u8]
    }
    fn into_work(self) -> [u32; 4] {
        [
            self[0] as u32,
            self[1] as u32,
            self[2] as u32,
            self[3] as u32,
        ]
    }
}

fn u8_mult(a: u32, b: u32) -> u32 {
    let c = a * b + 0x80;
    ((c >> 8) + c) >> 8
}

/// Source-over blend a slice of premultiplied pixels onto a base slice
/// of premultiplied pixels.
pub fn alpha_pixel_blend(base: &mut [Pixel8], over: &[Pixel8]) {
    for (dp, sp) in base.iter_mut().zip(over.iter()) {
        let bp = dp.into_work();
        let src = sp.into_work();
        let a_s = 255 - src[ALPHA_CHANNEL];

        let result = [
            src[0] + u8_mult(bp[0], a_s),
            src[1] + u8_mult(bp[1], a_s),
            src[2] + u8_mult(bp[2], a_s),
            src[3] + u8_mult(bp[3], a_s),
        ];

        *dp = Pixel8::from_work(result);
    }
}

/// Convert a straight-alpha pixel to premultiplied alpha
pub fn premultiply(p: Pixel8) -> Pixel8 {
    let a = p[ALPHA_CHANNEL] as u32;
    [
        u8_mult(p[0] as u32, a) as u8,
        u8_mult(p[1] as u32, a) as u8,
        u8_mult(p[2] as u32, a) as u8,
        p[ALPHA_CHANNEL],
    ]
}

/// Convert a premultiplied pixel back to straight alpha
pub fn unpremultiply(p: Pixel8) -> Pixel8 {
    let a = p[ALPHA_CHANNEL] as u32;
    let a = if a > 0 { (255 * 255 + a / 2) / a } else { 0 };
    [
        u8_mult(p[0] as u32, a) as u8,
        u8_mult(p[1] as u32, a) as u8,
        u8_mult(p[2] as u32, a) as u8,
        p[ALPHA_CHANNEL],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_over_replaces() {
        let mut base = [[10, 20, 30, 255]; 3];
        let over = [[200, 100, 50, 255]; 3];
        alpha_pixel_blend(&mut base, &over);
        assert_eq!(base, over);
    }

    #[test]
    fn test_transparent_over_keeps_base() {
        let mut base = [[10, 20, 30, 255]; 2];
        let over = [[0, 0, 0, 0]; 2];
        alpha_pixel_blend(&mut base, &over);
        assert_eq!(base, [[10, 20, 30, 255]; 2]);
    }

    #[test]
    fn test_half_transparent_blend() {
        // Premultiplied half transparent blue over opaque red
        let mut base = [[255, 0, 0, 255]];
        let over = [premultiply([0, 0, 255, 128])];
        alpha_pixel_blend(&mut base, &over);

        let [r, g, b, a] = base[0];
        assert_eq!(a, 255);
        assert_eq!(g, 0);
        // Roughly half red, half blue
        assert!((126..=129).contains(&r));
        assert!((126..=129).contains(&b));
    }

    #[test]
    fn test_premultiply_roundtrip_opaque() {
        let p = [12, 200, 99, 255];
        assert_eq!(premultiply(p), p);
        assert_eq!(unpremultiply(p), p);
    }
}
