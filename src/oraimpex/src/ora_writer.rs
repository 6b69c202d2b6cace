// SPDX-License-Identifier: GPL-3.0-or-later

use crate::conv;
use crate::ora_utils::{layer_entry_name, ORA_MIMETYPE, STACK_XML_NAME, THUMBNAIL_NAME};
use crate::{ImageExportResult, ImpexError};

use oracore::paint::{merge, thumbnail_size, LayerStack, LayerViewOptions};

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{imageops, ColorType, EncodableLayout, ImageEncoder, RgbaImage};
use xml::common::XmlVersion;
use xml::writer::XmlEvent;
use xml::EmitterConfig;
use zip::ZipWriter;

pub fn save_openraster_image(path: &Path, stack: &LayerStack) -> ImageExportResult {
    let mut archive = ZipWriter::new(File::create(path)?);

    // The mimetype entry must come first and must be STORED, not
    // DEFLATED, so the marker bytes sit at a fixed offset in the file.
    archive.start_file(
        "mimetype",
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored),
    )?;
    archive.write_all(ORA_MIMETYPE)?;

    // One PNG per layer, indexed bottom to top. The stack.xml src
    // attributes bind these entries back to their layers.
    for (i, layer) in stack.iter_layers().enumerate() {
        write_png(
            &mut archive,
            &layer_entry_name(i),
            &conv::to_rgba_image(&layer.image),
        )?;
    }

    write_stack_xml(&mut archive, stack)?;

    // The thumbnail is always regenerated from the current layer content
    if let Some(thumb) = render_thumbnail(stack) {
        write_png(&mut archive, THUMBNAIL_NAME, &thumb)?;
    }

    archive.finish()?;
    Ok(())
}

/// Composite the stack and scale it to fit the thumbnail bound.
///
/// This renders from the layer stack itself rather than reusing a
/// previously merged image, so the result always reflects the current
/// content. Returns None for an empty stack.
pub fn render_thumbnail(stack: &LayerStack) -> Option<RgbaImage> {
    let merged = merge(stack, &LayerViewOptions::default())?;
    let img = conv::to_rgba_image(&merged);

    let target = thumbnail_size(merged.size());
    if target == merged.size() {
        Some(img)
    } else {
        Some(imageops::resize(
            &img,
            target.width as u32,
            target.height as u32,
            imageops::FilterType::CatmullRom,
        ))
    }
}

fn write_png<W: Write + Seek>(
    archive: &mut ZipWriter<W>,
    filename: &str,
    image: &RgbaImage,
) -> Result<(), ImpexError> {
    // PNG data is already compressed, recompressing it is a waste
    let store_options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);
    archive.start_file(filename, store_options)?;

    PngEncoder::new(archive).write_image(
        image.as_bytes(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    )?;

    Ok(())
}

fn write_stack_xml<W: Write + Seek>(
    archive: &mut ZipWriter<W>,
    stack: &LayerStack,
) -> ImageExportResult {
    archive.start_file(STACK_XML_NAME, zip::write::FileOptions::default())?;
    let mut writer = EmitterConfig::new()
        .perform_indent(true)
        .create_writer(archive);

    writer.write(XmlEvent::StartDocument {
        version: XmlVersion::Version10,
        encoding: None,
        standalone: None,
    })?;

    let w = stack.width().to_string();
    let h = stack.height().to_string();
    writer.write(XmlEvent::start_element("image").attr("w", &w).attr("h", &h))?;

    writer.write(
        XmlEvent::start_element("stack")
            .attr("opacity", "1")
            .attr("name", "root"),
    )?;

    // Emit layers from the highest index down so the document lists them
    // topmost first, undoing the in-memory reversal.
    for (i, layer) in stack.iter_layers().enumerate().rev() {
        let src = layer_entry_name(i);
        let x = layer.offset.0.to_string();
        let y = layer.offset.1.to_string();

        writer.write(
            XmlEvent::start_element("layer")
                .attr("opacity", "1.00")
                .attr("name", &layer.name)
                .attr("src", &src)
                .attr("visibility", if layer.visible { "visible" } else { "hidden" })
                .attr("x", &x)
                .attr("y", &y)
                .attr("composite-op", "svg:src-over"),
        )?;
        writer.write(XmlEvent::end_element())?;
    }

    writer.write(XmlEvent::end_element())?; // /stack
    writer.write(XmlEvent::end_element())?; // /image

    Ok(())
}
