// SPDX-License-Identifier: GPL-3.0-or-later

use oracore::paint::Size;

/// OpenRaster files are identified by a "mimetype" entry with exactly
/// these bytes, stored uncompressed as the first entry in the archive.
pub(crate) const ORA_MIMETYPE: &[u8] = b"image/openraster";

pub(crate) const STACK_XML_NAME: &str = "stack.xml";
pub(crate) const THUMBNAIL_NAME: &str = "Thumbnails/thumbnail.png";

pub(crate) fn layer_entry_name(index: usize) -> String {
    format!("data/layer{}.png", index)
}

/// Parsed stack.xml document. Layer descriptors are kept in document
/// order, which lists layers from topmost to bottommost.
pub(crate) struct OraDocument {
    pub size: Size,
    pub layers: Vec<OraLayerDesc>,
}

pub(crate) struct OraLayerDesc {
    pub name: String,
    pub offset: (i32, i32),
    pub visible: bool,
    pub src: String,
}
