// SPDX-License-Identifier: GPL-3.0-or-later

//! Reader and writer for the OpenRaster container format: a ZIP archive
//! holding one PNG per layer, a `stack.xml` document describing layer
//! order and placement, and a pregenerated thumbnail.

use image::error::ImageError;
use oracore::paint::LayerStack;
use std::{fmt, io};
use xml::writer::Error as XmlError;
use zip::result::ZipError;

mod conv;
mod ora_reader;
mod ora_utils;
mod ora_writer;

pub use ora_reader::{load_openraster_image, load_openraster_thumbnail};
pub use ora_writer::{render_thumbnail, save_openraster_image};

#[derive(Debug)]
pub enum ImpexError {
    /// Filesystem failure while reading or writing
    IoError(io::Error),
    /// PNG decode or encode failure
    CodecError(ImageError),
    /// Missing archive, missing entry or corrupt ZIP structure
    ArchiveError(ZipError),
    /// stack.xml is missing required data or not valid for this format
    FormatError(String),
    /// stack.xml serialization failure
    XmlError(XmlError),
}

impl fmt::Display for ImpexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpexError::IoError(e) => e.fmt(f),
            ImpexError::CodecError(e) => e.fmt(f),
            ImpexError::ArchiveError(e) => e.fmt(f),
            ImpexError::FormatError(msg) => write!(f, "invalid OpenRaster file: {}", msg),
            ImpexError::XmlError(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ImpexError {
    fn cause(&self) -> Option<&dyn std::error::Error> {
        match self {
            ImpexError::IoError(e) => Some(e),
            ImpexError::CodecError(e) => Some(e),
            ImpexError::ArchiveError(e) => Some(e),
            ImpexError::XmlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ImpexError {
    fn from(err: io::Error) -> Self {
        Self::IoError(err)
    }
}

impl From<ImageError> for ImpexError {
    fn from(err: ImageError) -> Self {
        Self::CodecError(err)
    }
}

impl From<ZipError> for ImpexError {
    fn from(err: ZipError) -> Self {
        match err {
            ZipError::Io(io) => Self::IoError(io),
            _ => Self::ArchiveError(err),
        }
    }
}

impl From<XmlError> for ImpexError {
    fn from(err: XmlError) -> Self {
        Self::XmlError(err)
    }
}

pub type ImageImportResult = Result<LayerStack, ImpexError>;
pub type ImageExportResult = Result<(), ImpexError>;
