// SPDX-License-Identifier: GPL-3.0-or-later

/// A straight (unassociated) alpha RGBA pixel.
///
/// The component order is fixed: red, green, blue, alpha. This matches
/// the byte order of the PNG files stored inside the container, so layer
/// buffers round-trip through the archive without any channel shuffling.
pub type Pixel8 = [u8; 4];

pub const RED_CHANNEL: usize = 0;
pub const GREEN_CHANNEL: usize = 1;
pub const BLUE_CHANNEL: usize = 2;
pub const ALPHA_CHANNEL: usize = 3;

pub const ZERO_PIXEL8: Pixel8 = [0; 4];
pub const WHITE_PIXEL8: Pixel8 = [255; 4];
