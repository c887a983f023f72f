//! `primary.xml`: the XML listing of a repository's packages.

use std::fmt::Display;
use std::io::{BufRead, BufReader, Read, Write};
use std::str::FromStr;

use failure::{bail, format_err, Error, ResultExt};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::errors::{ErrorKind, Result};
use crate::package::PackageEntry;

pub const XMLNS: &str = "http://linux.duke.edu/metadata/common";
pub const XMLNS_RPM: &str = "http://linux.duke.edu/metadata/rpm";

/// The root `<metadata>` element.
///
/// `packages_count` is the `packages` attribute as read; it is not checked
/// against `packages.len()`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrimaryMetadata {
    pub xmlns: String,
    pub packages_count: usize,
    pub packages: Vec<PackageEntry>,
}

impl PrimaryMetadata {
    pub fn new(packages: Vec<PackageEntry>) -> PrimaryMetadata {
        PrimaryMetadata {
            xmlns: XMLNS.to_owned(),
            packages_count: packages.len(),
            packages,
        }
    }

    pub fn parse<R: Read>(r: R) -> Result<PrimaryMetadata> {
        Ok(decode(BufReader::new(r)).context(ErrorKind::DecodeMetadata)?)
    }

    /// Writes the document; the `packages` attribute is the number of
    /// packages actually written.
    pub fn write<W: Write>(&self, w: W) -> Result<()> {
        Ok(encode(self, w).context(ErrorKind::EncodeMetadata)?)
    }
}

fn xml_error(e: quick_xml::Error) -> Error {
    format_err!("{}", e)
}

fn attributes(e: &BytesStart) -> std::result::Result<Vec<(String, String)>, Error> {
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| format_err!("Malformed attribute: {}", err))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| format_err!("Malformed {} attribute: {}", key, err))?
            .into_owned();
        attrs.push((key, value));
    }
    Ok(attrs)
}

fn number<T>(element: &str, key: &str, value: &str) -> std::result::Result<T, Error> where
    T: FromStr,
    <T as FromStr>::Err: Display,
{
    value
        .parse::<T>()
        .map_err(|e| format_err!("Malformed <{} {}={:?}>: {}", element, key, value, e))
}

fn start_metadata(e: &BytesStart) -> std::result::Result<PrimaryMetadata, Error> {
    let mut md = PrimaryMetadata {
        xmlns: String::new(),
        packages_count: 0,
        packages: Vec::new(),
    };
    for (key, value) in attributes(e)? {
        match key.as_str() {
            "xmlns" => md.xmlns = value,
            "packages" => md.packages_count = number("metadata", &key, &value)?,
            _ => {}
        }
    }
    Ok(md)
}

fn start_package_child(
    p: &mut PackageEntry,
    name: &[u8],
    e: &BytesStart,
) -> std::result::Result<(), Error> {
    let attrs = attributes(e)?;
    for (key, value) in attrs {
        match (name, key.as_str()) {
            (b"version", "epoch") => p.version.epoch = number("version", &key, &value)?,
            (b"version", "ver") => p.version.ver = value,
            (b"version", "rel") => p.version.rel = value,
            (b"checksum", "type") => p.checksum.tpe = value,
            (b"checksum", "pkgid") => p.checksum.pkgid = value,
            (b"time", "file") => p.time.file = number("time", &key, &value)?,
            (b"time", "build") => p.time.build = number("time", &key, &value)?,
            (b"size", "package") => p.size.package = number("size", &key, &value)?,
            (b"size", "installed") => p.size.installed = number("size", &key, &value)?,
            (b"size", "archive") => p.size.archive = number("size", &key, &value)?,
            (b"location", "href") => p.location.href = value,
            _ => {}
        }
    }
    Ok(())
}

fn package_text(p: &mut PackageEntry, name: &[u8], text: &str) {
    let field = match name {
        b"name" => &mut p.name,
        b"arch" => &mut p.arch,
        b"checksum" => &mut p.checksum.hash,
        b"summary" => &mut p.summary,
        b"packager" => &mut p.packager,
        b"url" => &mut p.url,
        _ => return,
    };
    field.push_str(text);
}

fn decode<R: BufRead>(r: R) -> std::result::Result<PrimaryMetadata, Error> {
    let mut reader = Reader::from_reader(r);
    reader.trim_text(true).expand_empty_elements(true);
    let mut buf = Vec::new();
    // Names of the currently open elements, root first.
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut md: Option<PrimaryMetadata> = None;
    let mut package: Option<PackageEntry> = None;
    let mut closed = false;
    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => bail!("{} at position {}", e, reader.buffer_position()),
        };
        match event {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                match path.len() {
                    0 if closed => bail!(
                        "Unexpected <{}> after </metadata>", String::from_utf8_lossy(&name)),
                    0 if name == b"metadata" => md = Some(start_metadata(&e)?),
                    0 => bail!(
                        "Expected <metadata>, found <{}>", String::from_utf8_lossy(&name)),
                    1 if name == b"package" => package = Some(PackageEntry::default()),
                    2 => if let Some(p) = package.as_mut() {
                        start_package_child(p, &name, &e)?;
                    },
                    _ => {}
                }
                path.push(name);
            }
            Event::Text(e) => {
                if let (3, Some(p)) = (path.len(), package.as_mut()) {
                    let text = e.unescape().map_err(xml_error)?;
                    package_text(p, &path[2], &text);
                }
            }
            Event::End(_) => {
                let name = path.pop();
                match path.len() {
                    1 if name.as_ref().map(Vec::as_slice) == Some(&b"package"[..]) => {
                        if let (Some(md), Some(p)) = (md.as_mut(), package.take()) {
                            md.packages.push(p);
                        }
                    }
                    0 => closed = true,
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    if !closed {
        bail!("Unexpected end of document at position {}", reader.buffer_position());
    }
    md.ok_or_else(|| format_err!("Missing <metadata>"))
}

fn write_text<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> std::result::Result<(), Error> {
    writer.write_event(Event::Start(BytesStart::new(name))).map_err(xml_error)?;
    writer.write_event(Event::Text(BytesText::new(text))).map_err(xml_error)?;
    writer.write_event(Event::End(BytesEnd::new(name))).map_err(xml_error)?;
    Ok(())
}

fn write_empty<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
) -> std::result::Result<(), Error> {
    let mut elem = BytesStart::new(name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    writer.write_event(Event::Empty(elem)).map_err(xml_error)?;
    Ok(())
}

fn write_package<W: Write>(
    writer: &mut Writer<W>,
    p: &PackageEntry,
) -> std::result::Result<(), Error> {
    let mut elem = BytesStart::new("package");
    elem.push_attribute(("type", "rpm"));
    writer.write_event(Event::Start(elem)).map_err(xml_error)?;
    write_text(writer, "name", &p.name)?;
    write_text(writer, "arch", &p.arch)?;
    write_empty(writer, "version", &[
        ("epoch", p.version.epoch.to_string().as_str()),
        ("ver", p.version.ver.as_str()),
        ("rel", p.version.rel.as_str()),
    ])?;
    let mut checksum = BytesStart::new("checksum");
    checksum.push_attribute(("type", p.checksum.tpe.as_str()));
    checksum.push_attribute(("pkgid", p.checksum.pkgid.as_str()));
    writer.write_event(Event::Start(checksum)).map_err(xml_error)?;
    writer.write_event(Event::Text(BytesText::new(&p.checksum.hash))).map_err(xml_error)?;
    writer.write_event(Event::End(BytesEnd::new("checksum"))).map_err(xml_error)?;
    write_text(writer, "summary", &p.summary)?;
    write_text(writer, "packager", &p.packager)?;
    write_text(writer, "url", &p.url)?;
    write_empty(writer, "time", &[
        ("file", p.time.file.to_string().as_str()),
        ("build", p.time.build.to_string().as_str()),
    ])?;
    write_empty(writer, "size", &[
        ("package", p.size.package.to_string().as_str()),
        ("installed", p.size.installed.to_string().as_str()),
        ("archive", p.size.archive.to_string().as_str()),
    ])?;
    write_empty(writer, "location", &[("href", p.location.href.as_str())])?;
    writer.write_event(Event::End(BytesEnd::new("package"))).map_err(xml_error)?;
    Ok(())
}

fn encode<W: Write>(md: &PrimaryMetadata, w: W) -> std::result::Result<(), Error> {
    let mut writer = Writer::new_with_indent(w, b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    let count = md.packages.len().to_string();
    let mut root = BytesStart::new("metadata");
    root.push_attribute(("xmlns", md.xmlns.as_str()));
    root.push_attribute(("xmlns:rpm", XMLNS_RPM));
    root.push_attribute(("packages", count.as_str()));
    writer.write_event(Event::Start(root)).map_err(xml_error)?;
    for p in &md.packages {
        write_package(&mut writer, p)?;
    }
    writer.write_event(Event::End(BytesEnd::new("metadata"))).map_err(xml_error)?;
    writer.get_mut().write_all(b"\n").context("Failed to write primary metadata")?;
    Ok(())
}
