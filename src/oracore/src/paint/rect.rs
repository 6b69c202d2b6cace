// SPDX-License-Identifier: GPL-3.0-or-later

use core::cmp::{max, min};

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Size {
        Size { width, height }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rectangle {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Rectangle {
        assert!(w > 0 && h > 0);
        Rectangle { x, y, w, h }
    }

    pub fn intersected(&self, other: &Rectangle) -> Option<Rectangle> {
        let leftx = max(self.x, other.x);
        let rightx = min(self.x + self.w, other.x + other.w);
        let topy = max(self.y, other.y);
        let btmy = min(self.y + self.h, other.y + other.h);

        if leftx < rightx && topy < btmy {
            Some(Rectangle::new(leftx, topy, rightx - leftx, btmy - topy))
        } else {
            None
        }
    }

    /// Clip this rectangle to a canvas of the given size, anchored at the origin
    pub fn cropped(&self, size: Size) -> Option<Rectangle> {
        if size.width <= 0 || size.height <= 0 {
            return None;
        }
        self.intersected(&Rectangle::new(0, 0, size.width, size.height))
    }

    pub fn right(&self) -> i32 {
        self.x + self.w - 1
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h - 1
    }

    pub fn offset(&self, x: i32, y: i32) -> Rectangle {
        Rectangle {
            x: self.x + x,
            y: self.y + y,
            w: self.w,
            h: self.h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection() {
        let r1 = Rectangle::new(0, 0, 100, 100);
        let r2 = Rectangle::new(-10, -10, 20, 20);
        let edge = Rectangle::new(99, 0, 10, 10);

        assert_eq!(r1.intersected(&r2), Some(Rectangle::new(0, 0, 10, 10)));
        assert_eq!(r1.intersected(&edge), Some(Rectangle::new(99, 0, 1, 10)));

        let touching = Rectangle::new(100, 100, 20, 20);
        let outside = Rectangle::new(200, 200, 10, 10);
        assert_eq!(r1.intersected(&touching), None);
        assert_eq!(r1.intersected(&outside), None);
    }

    #[test]
    fn test_cropped() {
        let canvas = Size::new(8, 8);
        let r = Rectangle::new(-5, 0, 10, 4);
        assert_eq!(r.cropped(canvas), Some(Rectangle::new(0, 0, 5, 4)));

        let off = Rectangle::new(8, 0, 4, 4);
        assert_eq!(off.cropped(canvas), None);
    }
}
