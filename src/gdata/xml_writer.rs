/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Atom entries sent on create, update and upload.

use crate::errors::PhotosError;
use crate::gdata::album::AlbumProps;
use crate::gdata::namespaces::{
    ATOM_NS, GEORSS_NS, GML_NS, KIND_ALBUM, KIND_COMMENT, KIND_PHOTO, KIND_SCHEME, MEDIA_NS,
    PHOTOS_NS,
};
use crate::gdata::photo::PhotoProps;
use crate::gdata::properties::Access;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

struct EntryWriter {
    writer: Writer<Vec<u8>>,
}

impl EntryWriter {
    /// Opens the root `entry`, declaring Atom as the default namespace plus `prefixes`
    fn new(prefixes: &[(&str, &str)]) -> Result<Self, PhotosError> {
        let mut w = Self {
            writer: Writer::new(Vec::new()),
        };
        let root = BytesStart::new("entry")
            .with_attributes([("xmlns", ATOM_NS)])
            .with_attributes(prefixes.iter().copied());
        w.write(Event::Start(root))?;
        Ok(w)
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), PhotosError> {
        self.writer
            .write_event(event)
            .map_err(|e| PhotosError::XmlSerialization(e.to_string()))
    }

    fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), PhotosError> {
        let elem = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.write(Event::Start(elem))
    }

    fn end(&mut self, name: &str) -> Result<(), PhotosError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn text_element(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
        text: &str,
    ) -> Result<(), PhotosError> {
        self.start(name, attributes)?;
        self.write(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn category(&mut self, kind: &str) -> Result<(), PhotosError> {
        let elem = BytesStart::new("category")
            .with_attributes([("scheme", KIND_SCHEME), ("term", kind)]);
        self.write(Event::Empty(elem))
    }

    fn keywords(&mut self, keywords: &str) -> Result<(), PhotosError> {
        self.start("media:group", &[])?;
        self.text_element("media:keywords", &[], keywords)?;
        self.end("media:group")
    }

    fn finish(mut self) -> Result<String, PhotosError> {
        self.end("entry")?;
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| PhotosError::XmlSerialization(e.to_string()))
    }
}

/// Metadata part of a photo upload, also the body of a photo update.
///
/// Title, summary and keywords are always written, empty when unset. Only the position is
/// optional.
pub fn photo_entry_xml(props: &PhotoProps) -> Result<String, PhotosError> {
    let mut w = EntryWriter::new(&[
        ("xmlns:media", MEDIA_NS),
        ("xmlns:gml", GML_NS),
        ("xmlns:georss", GEORSS_NS),
    ])?;
    w.text_element("title", &[], props.title.as_deref().unwrap_or_default())?;
    w.text_element("summary", &[], props.summary.as_deref().unwrap_or_default())?;
    w.category(KIND_PHOTO)?;
    w.keywords(props.keywords.as_deref().unwrap_or_default())?;
    if let Some(position) = &props.position {
        w.start("georss:where", &[])?;
        w.start("gml:Point", &[])?;
        w.text_element(
            "gml:pos",
            &[],
            &format!("{} {}", position.latitude, position.longitude),
        )?;
        w.end("gml:Point")?;
        w.end("georss:where")?;
    }
    w.finish()
}

/// Album entry for creates and updates. Only the given properties are written.
pub fn album_entry_xml(props: &AlbumProps) -> Result<String, PhotosError> {
    let mut w = EntryWriter::new(&[("xmlns:media", MEDIA_NS), ("xmlns:gphoto", PHOTOS_NS)])?;
    if let Some(title) = &props.title {
        w.text_element("title", &[("type", "text")], title)?;
    }
    if let Some(summary) = &props.summary {
        w.text_element("summary", &[("type", "text")], summary)?;
    }
    if let Some(location) = &props.location {
        w.text_element("gphoto:location", &[], location)?;
    }
    if let Some(access) = props.access.filter(|a| *a != Access::Unknown) {
        let token: &'static str = access.into();
        w.text_element("gphoto:access", &[], token)?;
    }
    if let Some(timestamp) = props.timestamp {
        w.text_element("gphoto:timestamp", &[], &timestamp.to_string())?;
    }
    if let Some(keywords) = &props.keywords {
        w.keywords(keywords)?;
    }
    w.category(KIND_ALBUM)?;
    w.finish()
}

pub fn comment_entry_xml(text: &str) -> Result<String, PhotosError> {
    let mut w = EntryWriter::new(&[])?;
    w.text_element("content", &[], text)?;
    w.category(KIND_COMMENT)?;
    w.finish()
}
