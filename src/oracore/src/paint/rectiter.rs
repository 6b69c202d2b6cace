// SPDX-License-Identifier: GPL-3.0-or-later

use super::Rectangle;

// Row-at-a-time access into a strided pixel buffer through ordinary
// slice indexing, so every access is bounds checked against the buffer
// length. No unsafe stride arithmetic.

pub struct RectIterator<'a, T> {
    buf: &'a [T],
    stride: usize,
    x0: usize,
    x1: usize,
    rows: usize,
}

fn test_bounds(buflen: usize, stride: usize, x: usize, y: usize, w: usize, h: usize) {
    debug_assert!(w > 0);
    debug_assert!(h > 0);
    debug_assert!(x + w <= stride);
    debug_assert!(((y + h - 1) * stride + x + w) <= buflen);
}

impl<'a, T> RectIterator<'a, T> {
    pub fn new(buf: &'a [T], stride: usize, r: &Rectangle) -> RectIterator<'a, T> {
        let (x, y, w, h) = (r.x as usize, r.y as usize, r.w as usize, r.h as usize);
        test_bounds(buf.len(), stride, x, y, w, h);
        RectIterator {
            buf: &buf[(y * stride)..],
            stride,
            x0: x,
            x1: x + w,
            rows: h,
        }
    }
}

impl<'a, T> Iterator for RectIterator<'a, T> {
    type Item = &'a [T];
    fn next(&mut self) -> Option<Self::Item> {
        if self.rows > 0 {
            self.rows -= 1;
            let slice = &self.buf[self.x0..self.x1];
            self.buf = &self.buf[self.stride..];
            Some(slice)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rows, Some(self.rows))
    }
}

pub struct MutableRectIterator<'a, T: 'a> {
    buf: &'a mut [T],
    stride: usize,
    x0: usize,
    x1: usize,
    rows: usize,
}

impl<'a, T> MutableRectIterator<'a, T> {
    pub fn new(buf: &'a mut [T], stride: usize, r: &Rectangle) -> MutableRectIterator<'a, T> {
        let (x, y, w, h) = (r.x as usize, r.y as usize, r.w as usize, r.h as usize);
        test_bounds(buf.len(), stride, x, y, w, h);
        MutableRectIterator {
            buf: &mut buf[(y * stride)..],
            stride,
            x0: x,
            x1: x + w,
            rows: h,
        }
    }
}

impl<'a, T> Iterator for MutableRectIterator<'a, T> {
    type Item = &'a mut [T];
    fn next(&mut self) -> Option<Self::Item> {
        if self.rows > 0 {
            self.rows -= 1;
            let tmp = std::mem::take(&mut self.buf);
            let (slice, rest) = tmp.split_at_mut(self.stride);
            self.buf = rest;
            Some(&mut slice[self.x0..self.x1])
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rows, Some(self.rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::zip_eq;

    const BUFFER: [i32; 25] = [
        0, 1, 2, 3, 4, 10, 11, 12, 13, 14, 20, 21, 22, 23, 24, 30, 31, 32, 33, 34, 40, 41, 42, 43,
        44,
    ];

    #[test]
    fn test_full() {
        let mut crop = RectIterator::new(&BUFFER, 5, &Rectangle::new(0, 0, 5, 5));

        assert_eq!(crop.next(), Some(&BUFFER[0..5]));
        assert_eq!(crop.size_hint(), (4, Some(4)));
        assert_eq!(crop.next(), Some(&BUFFER[5..10]));
        assert_eq!(crop.next(), Some(&BUFFER[10..15]));
        assert_eq!(crop.next(), Some(&BUFFER[15..20]));
        assert_eq!(crop.next(), Some(&BUFFER[20..25]));
        assert_eq!(crop.next(), None);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds() {
        let iter = RectIterator::new(&BUFFER, 5, &Rectangle::new(3, 0, 5, 5));
        for _ in iter {}
    }

    #[test]
    fn test_partial_middle() {
        let expected = [[11, 12, 13], [21, 22, 23]];
        let crop = RectIterator::new(&BUFFER, 5, &Rectangle::new(1, 1, 3, 2));
        for (cropped, expected_row) in zip_eq(crop, expected.iter()) {
            assert_eq!(cropped, expected_row);
        }
    }

    #[test]
    fn test_mutation_partial() {
        let mut buf = [0, 1, 2, 3, 10, 11, 12, 12, 20, 21, 22, 13, 30, 31, 32, 33];
        let crop = MutableRectIterator::new(&mut buf, 4, &Rectangle::new(1, 1, 2, 2));
        for pixel in crop.flatten() {
            *pixel += 50;
        }
        let expected = [0, 1, 2, 3, 10, 61, 62, 12, 20, 71, 72, 13, 30, 31, 32, 33];
        assert_eq!(buf, expected);
    }
}
