//! Export adapters for lighting-control software.
//!
//! Each adapter turns a computed `SphereModel` into the files one application
//! expects. Adapters are pure: they return file contents and leave writing to
//! the caller.

pub mod channel_summary;
pub mod chromatik;
pub mod madmapper;
pub mod xlights;
pub mod xlights3d;

use anyhow::{Context, Result};
use clap::ValueEnum;
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Config;
use crate::services::SphereModel;

pub use channel_summary::render_channel_summary;

/// Supported output formats.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// xLights 2D custom model, channel CSV and coordinate JSON
    #[value(name = "xlights")]
    Xlights,
    /// xLights 3D grid custom model, channel CSV and coordinate JSON
    #[value(name = "xlights3d")]
    Xlights3d,
    /// MadMapper LED fixture library
    #[value(name = "madmapper")]
    Madmapper,
    /// Chromatik JSON fixture
    #[value(name = "chromatik")]
    Chromatik,
}

impl Format {
    /// All formats in canonical order.
    pub const ALL: [Self; 4] = [Self::Xlights, Self::Xlights3d, Self::Madmapper, Self::Chromatik];

    /// Config/CLI name of the format.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Xlights => "xlights",
            Self::Xlights3d => "xlights3d",
            Self::Madmapper => "madmapper",
            Self::Chromatik => "chromatik",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Xlights => "xLights custom model (2D)",
            Self::Xlights3d => "xLights custom model (3D grid)",
            Self::Madmapper => "MadMapper LED fixture library",
            Self::Chromatik => "Chromatik fixture",
        }
    }

    /// File name suffixes appended to the output prefix.
    #[must_use]
    pub const fn suffixes(self) -> &'static [&'static str] {
        match self {
            Self::Xlights => &[".xmodel", ".csv", "_coordinates.json"],
            Self::Xlights3d => &["_3d.xmodel", "_3d.csv", "_3d_coordinates.json"],
            Self::Madmapper => &[".mmfl"],
            Self::Chromatik => &[".lxf"],
        }
    }

    /// Returns true if the format consumes the 3D grid projection.
    #[must_use]
    pub const fn needs_grid(self) -> bool {
        matches!(self, Self::Xlights3d)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Appended to the output prefix to form the file name
    pub suffix: String,
    /// File contents
    pub contents: String,
}

impl OutputFile {
    /// Creates a new output file.
    pub fn new(suffix: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            contents: contents.into(),
        }
    }
}

/// Renders all files of one format.
pub fn render(format: Format, model: &SphereModel, config: &Config) -> Result<Vec<OutputFile>> {
    match format {
        Format::Xlights => xlights::render(model, config),
        Format::Xlights3d => xlights3d::render(model, config),
        Format::Madmapper => madmapper::render(model, config),
        Format::Chromatik => chromatik::render(model, config),
    }
}

/// In-memory XML writer shared by the `.xmodel` and `.mmfl` adapters.
pub(crate) type XmlWriter = Writer<Vec<u8>>;

/// Opens an indented XML document with its declaration written.
pub(crate) fn xml_document(encoding: Option<&str>) -> Result<XmlWriter> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", encoding, None)))?;
    Ok(writer)
}

/// Start tag with escaped attribute values, in the given order.
pub(crate) fn xml_element<'a>(name: &'a str, attributes: &[(&str, String)]) -> BytesStart<'a> {
    let mut element = BytesStart::new(name);
    for (key, value) in attributes {
        element.push_attribute((*key, value.as_str()));
    }
    element
}

/// Returns the document text with a trailing newline.
pub(crate) fn finish_xml(writer: XmlWriter) -> Result<String> {
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).context("Generated XML is not valid UTF-8")
}

/// Rounds to two decimals for JSON output, folding `-0.0` into `0.0`.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}
