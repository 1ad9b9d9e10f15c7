/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Parsed XML tree with namespace-qualified lookups.
//!
//! Documents are read with quick-xml's `NsReader` so every element and attribute carries the
//! namespace URI its prefix was bound to. Lookups take a [`QualifiedName`]; a missing optional
//! element or attribute is `None`, never an error.

use crate::errors::PhotosError;
use crate::gdata::namespaces::{QualifiedName, atom};
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
struct XmlAttribute {
    local_name: String,
    namespace: Option<String>,
    value: String,
}

/// One element of a parsed document.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    local_name: String,
    namespace: Option<String>,
    attributes: Vec<XmlAttribute>,
    children: Vec<XmlElement>,
    text: String,
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    pub fn parse(xml: &str) -> Result<Self, PhotosError> {
        let mut reader = NsReader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        loop {
            match reader.read_event()? {
                Event::Start(ref e) => {
                    let element = open_element(&reader, e)?;
                    stack.push(element);
                }
                Event::Empty(ref e) => {
                    let element = open_element(&reader, e)?;
                    attach(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    if let Some(element) = stack.pop() {
                        attach(&mut stack, &mut root, element);
                    }
                }
                Event::Text(ref e) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&e.unescape()?);
                    }
                }
                Event::CData(ref e) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(std::str::from_utf8(e)?);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }
        root.map(|root| Self { root })
            .ok_or(PhotosError::MissingElement("document root"))
    }

    pub fn from_bytes(xml: &[u8]) -> Result<Self, PhotosError> {
        Self::parse(std::str::from_utf8(xml)?)
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }
}

fn open_element(reader: &NsReader<&[u8]>, start: &BytesStart<'_>) -> Result<XmlElement, PhotosError> {
    let (ns, local) = reader.resolve_element(start.name());
    let namespace = namespace_uri(ns)?;
    let local_name = std::str::from_utf8(local.as_ref())?.to_string();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (ns, local) = reader.resolve_attribute(attr.key);
        attributes.push(XmlAttribute {
            local_name: std::str::from_utf8(local.as_ref())?.to_string(),
            namespace: namespace_uri(ns)?,
            value: attr.unescape_value()?.into_owned(),
        });
    }

    Ok(XmlElement {
        local_name,
        namespace,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

fn namespace_uri(result: ResolveResult<'_>) -> Result<Option<String>, PhotosError> {
    match result {
        ResolveResult::Bound(Namespace(uri)) => Ok(Some(std::str::from_utf8(uri)?.to_string())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(PhotosError::UnboundPrefix(
            String::from_utf8_lossy(&prefix).into_owned(),
        )),
    }
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            // First top level element wins
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

impl XmlElement {
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn is(&self, name: QualifiedName<'_>) -> bool {
        self.local_name == name.local_name && self.namespace.as_deref() == name.namespace
    }

    /// First child element with the given name
    pub fn element(&self, name: QualifiedName<'_>) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.is(name))
    }

    /// All child elements with the given name, in document order
    pub fn elements<'a>(
        &'a self,
        name: QualifiedName<'a>,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.is(name))
    }

    pub fn attribute(&self, name: QualifiedName<'_>) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.local_name == name.local_name && a.namespace.as_deref() == name.namespace)
            .map(|a| a.value.as_str())
    }

    /// Text content of this element and all its descendants
    pub fn value(&self) -> String {
        let mut value = self.text.clone();
        for child in &self.children {
            value.push_str(&child.value());
        }
        value
    }

    /// `href` of the first `<link rel="alternate">` child
    pub fn alternate_link(&self) -> Option<&str> {
        self.elements(atom("link"))
            .find(|link| link.attribute(QualifiedName::unqualified("rel")) == Some("alternate"))
            .and_then(|link| link.attribute(QualifiedName::unqualified("href")))
    }

    pub fn child_value(&self, name: QualifiedName<'_>) -> Option<String> {
        self.element(name).map(XmlElement::value)
    }

    /// Value of a child that the service always sends
    pub fn required_value(&self, name: QualifiedName<'static>) -> Result<String, PhotosError> {
        self.child_value(name)
            .ok_or(PhotosError::MissingElement(name.local_name))
    }

    /// Parses an optional numeric child. Present but malformed values are errors.
    pub fn child_number<T: FromStr>(
        &self,
        name: QualifiedName<'static>,
    ) -> Result<Option<T>, PhotosError> {
        self.child_value(name)
            .map(|v| parse_number(name.local_name, &v))
            .transpose()
    }

    pub fn attribute_number<T: FromStr>(
        &self,
        name: QualifiedName<'static>,
    ) -> Result<Option<T>, PhotosError> {
        self.attribute(name)
            .map(|v| parse_number(name.local_name, v))
            .transpose()
    }

    pub fn child_date(
        &self,
        name: QualifiedName<'static>,
    ) -> Result<Option<DateTime<Utc>>, PhotosError> {
        self.child_value(name)
            .map(|v| parse_date(name.local_name, &v))
            .transpose()
    }
}

pub(crate) fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, PhotosError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| PhotosError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

// Atom dates are RFC 3339 timestamps
pub(crate) fn parse_date(field: &'static str, value: &str) -> Result<DateTime<Utc>, PhotosError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| PhotosError::InvalidDate {
            field,
            value: value.to_string(),
        })
}
