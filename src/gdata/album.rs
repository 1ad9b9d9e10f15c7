/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::entity::Entity;
use crate::errors::PhotosError;
use crate::gdata::feed::FeedEntry;
use crate::gdata::media::{MediaContent, MediaThumbnail};
use crate::gdata::namespaces::{atom, gd, media, photos};
use crate::gdata::properties::Access;
use crate::gdata::xml::XmlElement;
use chrono::{DateTime, Utc};

/// Album entry of the legacy feed API.
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    /// `gphoto:id`
    pub id: String,
    /// `atom:id`, the entry's own URI
    pub uri: Option<String>,
    pub link: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub etag: Option<String>,
    pub num_photos: Option<u32>,
    pub access: Access,
    pub location: Option<String>,
    pub album_type: Option<String>,
    /// Milliseconds since the Unix epoch
    pub timestamp: Option<i64>,
    pub updated: Option<DateTime<Utc>>,
    pub published: Option<DateTime<Utc>>,
    pub content: Option<MediaContent>,
    pub thumbnail: Option<MediaThumbnail>,
}

impl FeedEntry for Album {
    fn parse(entry: &XmlElement) -> Result<Self, PhotosError> {
        let group = entry.element(media("group"));
        Ok(Album {
            id: entry.required_value(photos("id"))?,
            uri: entry.child_value(atom("id")),
            link: entry.alternate_link().map(str::to_string),
            title: entry.child_value(atom("title")),
            description: group.and_then(|g| g.child_value(media("description"))),
            etag: entry.attribute(gd("etag")).map(str::to_string),
            num_photos: entry.child_number(photos("numphotos"))?,
            access: entry
                .child_value(photos("access"))
                .map_or(Access::Unknown, |v| Access::parse(&v)),
            location: entry.child_value(photos("location")),
            album_type: entry.child_value(photos("albumType")),
            timestamp: entry.child_number(photos("timestamp"))?,
            updated: entry.child_date(atom("updated"))?,
            published: entry.child_date(atom("published"))?,
            content: group
                .and_then(|g| g.element(media("content")))
                .map(MediaContent::parse)
                .transpose()?,
            thumbnail: group
                .and_then(|g| g.element(media("thumbnail")))
                .map(MediaThumbnail::parse)
                .transpose()?,
        })
    }
}

impl Entity for Album {
    fn id(&self) -> &str {
        &self.id
    }

    fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }
}

impl std::fmt::Display for Album {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "title: {}, id: {}",
            self.title.as_deref().unwrap_or_default(),
            self.id
        )
    }
}

/// Properties that can be used in the creation or update of an Album.
///
/// Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlbumProps {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub access: Option<Access>,
    /// Milliseconds since the Unix epoch
    pub timestamp: Option<i64>,
    /// Comma separated keywords
    pub keywords: Option<String>,
}
