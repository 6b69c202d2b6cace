// SPDX-License-Identifier: GPL-3.0-or-later

use crate::conv;
use crate::ora_utils::{OraDocument, OraLayerDesc, ORA_MIMETYPE, STACK_XML_NAME, THUMBNAIL_NAME};
use crate::{ImageImportResult, ImpexError};

use oracore::paint::{normalize_image, Image8, Layer, LayerStack, RawImage, Size};

use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::Path;

use image::io::Reader as ImageReader;
use tracing::warn;
use xml::attribute::OwnedAttribute;
use xml::reader::{EventReader, XmlEvent};
use zip::result::ZipError;
use zip::ZipArchive;

pub fn load_openraster_image(path: &Path) -> ImageImportResult {
    let mut archive = open_archive(path)?;

    check_mimetype(&mut archive)?;
    let doc = parse_stack_xml(archive.by_name(STACK_XML_NAME)?)?;

    let mut stack = LayerStack::new(doc.size.width as u32, doc.size.height as u32);

    // The document lists layers topmost first; reading it back to front
    // leaves index 0 as the bottommost layer.
    for desc in doc.layers.iter().rev() {
        let raw = get_image_file(&mut archive, &desc.src)?;
        stack.add_layer(Layer {
            name: desc.name.clone(),
            offset: desc.offset,
            visible: desc.visible,
            image: normalize_image(&raw, desc.offset, doc.size),
        });
    }

    Ok(stack)
}

/// Best-effort load of the pregenerated thumbnail entry.
///
/// This is a preview path: a missing archive, missing entry or corrupt
/// image all just mean there is no thumbnail to show, so every failure
/// maps to None instead of propagating.
pub fn load_openraster_thumbnail(path: &Path) -> Option<Image8> {
    fn inner(path: &Path) -> Result<Image8, ImpexError> {
        let mut archive = open_archive(path)?;
        let mut bytes = Vec::new();
        archive.by_name(THUMBNAIL_NAME)?.read_to_end(&mut bytes)?;
        let img = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .decode()?;
        Ok(conv::from_rgba_image(&img.into_rgba8()))
    }
    inner(path).ok()
}

fn open_archive(path: &Path) -> Result<ZipArchive<File>, ImpexError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ImpexError::ArchiveError(ZipError::FileNotFound)
        } else {
            ImpexError::IoError(e)
        }
    })?;
    Ok(ZipArchive::new(file)?)
}

fn check_mimetype<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<(), ImpexError> {
    let mut mtfile = archive.by_name("mimetype")?;
    if mtfile.size() != ORA_MIMETYPE.len() as u64 {
        return Err(ImpexError::FormatError("wrong mimetype".into()));
    }

    let mut mimetype = Vec::new();
    mtfile.read_to_end(&mut mimetype)?;

    if mimetype == ORA_MIMETYPE {
        Ok(())
    } else {
        Err(ImpexError::FormatError("wrong mimetype".into()))
    }
}

fn get_image_file<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    filename: &str,
) -> Result<RawImage, ImpexError> {
    let mut filecontent = Vec::new();
    archive.by_name(filename)?.read_to_end(&mut filecontent)?;
    let img = ImageReader::new(Cursor::new(filecontent))
        .with_guessed_format()?
        .decode()?;

    Ok(conv::to_raw_image(img))
}

fn parse_stack_xml<R: Read>(file: R) -> Result<OraDocument, ImpexError> {
    let mut parser = EventReader::new(file);

    // Expect <image> root element
    loop {
        match parser.next() {
            Ok(XmlEvent::StartElement {
                name, attributes, ..
            }) => {
                if name.local_name != "image" {
                    return Err(ImpexError::FormatError(format!(
                        "expected <image>, got <{}>",
                        name
                    )));
                }

                return parse_image(attributes, &mut parser);
            }
            Ok(XmlEvent::EndDocument) => {
                return Err(ImpexError::FormatError("unexpected end of document".into()));
            }
            Err(e) => {
                return Err(ImpexError::FormatError(e.to_string()));
            }
            _ => {}
        }
    }
}

fn parse_image<R: Read>(
    mut attributes: Vec<OwnedAttribute>,
    parser: &mut EventReader<R>,
) -> Result<OraDocument, ImpexError> {
    let mut doc = OraDocument {
        size: Size::new(
            require_numeric_attribute(&mut attributes, "w")?,
            require_numeric_attribute(&mut attributes, "h")?,
        ),
        layers: Vec::new(),
    };

    if doc.size.width <= 0 || doc.size.height <= 0 {
        return Err(ImpexError::FormatError("invalid image size".into()));
    }

    loop {
        match parser.next() {
            Ok(XmlEvent::StartElement { name, .. }) => {
                if name.local_name == "stack" {
                    parse_stack(&mut doc.layers, parser)?;
                } else {
                    warn!("Unsupported OpenRaster <image> element <{}>", name);
                    skip_element(parser)?;
                }
            }
            Ok(XmlEvent::EndElement { .. }) => {
                if doc.layers.is_empty() {
                    return Err(ImpexError::FormatError("no layers".into()));
                }
                return Ok(doc);
            }
            Ok(XmlEvent::EndDocument) => {
                return Err(ImpexError::FormatError(
                    "unexpected end of document while parsing <image>".into(),
                ));
            }
            Err(e) => {
                return Err(ImpexError::FormatError(e.to_string()));
            }
            _ => {}
        }
    }
}

fn parse_stack<R: Read>(
    layers: &mut Vec<OraLayerDesc>,
    parser: &mut EventReader<R>,
) -> Result<(), ImpexError> {
    loop {
        match parser.next() {
            Ok(XmlEvent::StartElement {
                name, attributes, ..
            }) => {
                if name.local_name == "layer" {
                    layers.push(parse_layer(attributes, layers.len(), parser)?);
                } else {
                    // Sub-stacks and other extensions are not modeled;
                    // their content does not end up in the layer list.
                    warn!("Unsupported OpenRaster stack element <{}>", name.local_name);
                    skip_element(parser)?;
                }
            }
            Ok(XmlEvent::EndElement { .. }) => {
                return Ok(());
            }
            Ok(XmlEvent::EndDocument) => {
                return Err(ImpexError::FormatError(
                    "unexpected end of document while parsing <stack>".into(),
                ));
            }
            Err(e) => {
                return Err(ImpexError::FormatError(e.to_string()));
            }
            _ => (),
        }
    }
}

fn parse_layer<R: Read>(
    mut attributes: Vec<OwnedAttribute>,
    index: usize,
    parser: &mut EventReader<R>,
) -> Result<OraLayerDesc, ImpexError> {
    let layer = OraLayerDesc {
        name: take_attribute(&mut attributes, "name")
            .unwrap_or_else(|| format!("Layer {}", index)),
        offset: (
            numeric_attribute(&mut attributes, "x", 0)?,
            numeric_attribute(&mut attributes, "y", 0)?,
        ),
        visible: take_attribute(&mut attributes, "visibility").map_or(true, |a| a == "visible"),
        src: take_attribute(&mut attributes, "src")
            .ok_or_else(|| ImpexError::FormatError("layer without src".into()))?,
    };

    // Layer elements shouldn't have any children
    loop {
        match parser.next() {
            Ok(XmlEvent::StartElement { name, .. }) => {
                warn!("Unsupported OpenRaster layer element <{}>", name.local_name);
                skip_element(parser)?;
            }
            Ok(XmlEvent::EndElement { .. }) => {
                return Ok(layer);
            }
            Ok(XmlEvent::EndDocument) => {
                return Err(ImpexError::FormatError(
                    "unexpected end of document while parsing <layer>".into(),
                ));
            }
            Err(e) => {
                return Err(ImpexError::FormatError(e.to_string()));
            }
            _ => (),
        }
    }
}

fn skip_element<R: Read>(parser: &mut EventReader<R>) -> Result<(), ImpexError> {
    let mut depth = 1;
    loop {
        match parser.next() {
            Ok(XmlEvent::StartElement { .. }) => {
                depth += 1;
            }
            Ok(XmlEvent::EndElement { .. }) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Ok(XmlEvent::EndDocument) => {
                return Err(ImpexError::FormatError("unexpected end of document".into()));
            }
            Err(e) => {
                return Err(ImpexError::FormatError(e.to_string()));
            }
            _ => (),
        }
    }
}

/// Attribute names are matched case-insensitively; files in the wild
/// are not consistent about casing.
fn take_attribute(attrs: &mut Vec<OwnedAttribute>, name: &str) -> Option<String> {
    attrs
        .iter()
        .position(|a| a.name.local_name.eq_ignore_ascii_case(name))
        .map(|idx| attrs.remove(idx).value)
}

fn numeric_attribute(
    attrs: &mut Vec<OwnedAttribute>,
    name: &str,
    default: i32,
) -> Result<i32, ImpexError> {
    match take_attribute(attrs, name) {
        Some(v) => v.trim().parse().map_err(|_| {
            ImpexError::FormatError(format!("non-numeric attribute {}=\"{}\"", name, v))
        }),
        None => Ok(default),
    }
}

fn require_numeric_attribute(
    attrs: &mut Vec<OwnedAttribute>,
    name: &str,
) -> Result<i32, ImpexError> {
    take_attribute(attrs, name)
        .ok_or_else(|| ImpexError::FormatError(format!("missing attribute {}", name)))?
        .trim()
        .parse()
        .map_err(|_| ImpexError::FormatError(format!("non-numeric attribute {}", name)))
}
