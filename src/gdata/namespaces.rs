/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
pub const MEDIA_NS: &str = "http://search.yahoo.com/mrss/";
pub const GML_NS: &str = "http://www.opengis.net/gml";
pub const GEORSS_NS: &str = "http://www.georss.org/georss";
pub const PHOTOS_NS: &str = "http://schemas.google.com/photos/2007";
pub const OPENSEARCH_NS: &str = "http://a9.com/-/spec/opensearch/1.1/";
pub const GD_NS: &str = "http://schemas.google.com/g/2005";

// Atom category identifying the kind of an entry
pub const KIND_SCHEME: &str = "http://schemas.google.com/g/2005#kind";
pub const KIND_ALBUM: &str = "http://schemas.google.com/photos/2007#album";
pub const KIND_PHOTO: &str = "http://schemas.google.com/photos/2007#photo";
pub const KIND_COMMENT: &str = "http://schemas.google.com/photos/2007#comment";

/// Element or attribute name qualified by its namespace URI.
///
/// Unprefixed attributes have no namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualifiedName<'a> {
    pub local_name: &'a str,
    pub namespace: Option<&'a str>,
}

impl<'a> QualifiedName<'a> {
    pub const fn new(local_name: &'a str, namespace: &'a str) -> Self {
        Self {
            local_name,
            namespace: Some(namespace),
        }
    }

    pub const fn unqualified(local_name: &'a str) -> Self {
        Self {
            local_name,
            namespace: None,
        }
    }
}

impl std::fmt::Display for QualifiedName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => f.write_str(self.local_name),
        }
    }
}

pub const fn atom(local_name: &str) -> QualifiedName<'_> {
    QualifiedName::new(local_name, ATOM_NS)
}

pub const fn media(local_name: &str) -> QualifiedName<'_> {
    QualifiedName::new(local_name, MEDIA_NS)
}

pub const fn gml(local_name: &str) -> QualifiedName<'_> {
    QualifiedName::new(local_name, GML_NS)
}

pub const fn georss(local_name: &str) -> QualifiedName<'_> {
    QualifiedName::new(local_name, GEORSS_NS)
}

pub const fn photos(local_name: &str) -> QualifiedName<'_> {
    QualifiedName::new(local_name, PHOTOS_NS)
}

pub const fn open_search(local_name: &str) -> QualifiedName<'_> {
    QualifiedName::new(local_name, OPENSEARCH_NS)
}

pub const fn gd(local_name: &str) -> QualifiedName<'_> {
    QualifiedName::new(local_name, GD_NS)
}
