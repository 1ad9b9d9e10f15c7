/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::errors::PhotosError;
use crate::gdata::namespaces::{QualifiedName, atom, photos};
use crate::gdata::xml::XmlElement;

const URL: QualifiedName<'static> = QualifiedName::unqualified("url");
const WIDTH: QualifiedName<'static> = QualifiedName::unqualified("width");
const HEIGHT: QualifiedName<'static> = QualifiedName::unqualified("height");

/// `<media:content>` of an album or photo entry
#[derive(Debug, Clone, PartialEq)]
pub struct MediaContent {
    pub url: Option<String>,
    pub content_type: Option<String>,
    pub medium: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl MediaContent {
    pub(crate) fn parse(e: &XmlElement) -> Result<Self, PhotosError> {
        Ok(Self {
            url: e.attribute(URL).map(str::to_string),
            content_type: e
                .attribute(QualifiedName::unqualified("type"))
                .map(str::to_string),
            medium: e
                .attribute(QualifiedName::unqualified("medium"))
                .map(str::to_string),
            width: e.attribute_number(WIDTH)?,
            height: e.attribute_number(HEIGHT)?,
        })
    }
}

/// `<media:thumbnail>` of an album or photo entry
#[derive(Debug, Clone, PartialEq)]
pub struct MediaThumbnail {
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl MediaThumbnail {
    pub(crate) fn parse(e: &XmlElement) -> Result<Self, PhotosError> {
        Ok(Self {
            url: e.attribute(URL).map(str::to_string),
            width: e.attribute_number(WIDTH)?,
            height: e.attribute_number(HEIGHT)?,
        })
    }
}

/// Feed level `<author>`
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub name: Option<String>,
    pub uri: Option<String>,
    pub email: Option<String>,
    pub user: Option<String>,
    pub nickname: Option<String>,
}

impl Author {
    pub(crate) fn parse(e: &XmlElement) -> Self {
        Self {
            name: e.child_value(atom("name")),
            uri: e.child_value(atom("uri")),
            email: e.child_value(atom("email")),
            user: e.child_value(photos("user")),
            nickname: e.child_value(photos("nickname")),
        }
    }
}
