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
use crate::gdata::geo::{GeoPosition, GeoRss};
use crate::gdata::media::{MediaContent, MediaThumbnail};
use crate::gdata::namespaces::{atom, gd, georss, media, photos};
use crate::gdata::properties::Access;
use crate::gdata::xml::XmlElement;
use chrono::{DateTime, Utc};

/// Photo entry of the legacy feed API.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub id: String,
    pub album_id: Option<String>,
    pub title: Option<String>,
    pub uri: Option<String>,
    pub etag: Option<String>,
    pub updated: Option<DateTime<Utc>>,
    pub published: Option<DateTime<Utc>>,
    pub thumbnails: Vec<MediaThumbnail>,
    pub content: Option<MediaContent>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub geo: Option<GeoRss>,
    pub keywords: Option<String>,
    pub access: Access,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// File size in bytes
    pub size: Option<u64>,
    pub commenting_enabled: Option<bool>,
    pub comment_count: Option<u32>,
}

impl FeedEntry for Photo {
    fn parse(entry: &XmlElement) -> Result<Self, PhotosError> {
        let group = entry.element(media("group"));
        Ok(Photo {
            id: entry.required_value(photos("id"))?,
            album_id: entry.child_value(photos("albumid")),
            title: entry.child_value(atom("title")),
            uri: entry.child_value(atom("id")),
            etag: entry.attribute(gd("etag")).map(str::to_string),
            updated: entry.child_date(atom("updated"))?,
            published: entry.child_date(atom("published"))?,
            thumbnails: group
                .map(|g| {
                    g.elements(media("thumbnail"))
                        .map(MediaThumbnail::parse)
                        .collect::<Result<Vec<_>, _>>()
                })
                .transpose()?
                .unwrap_or_default(),
            content: group
                .and_then(|g| g.element(media("content")))
                .map(MediaContent::parse)
                .transpose()?,
            link: entry.alternate_link().map(str::to_string),
            summary: group.and_then(|g| g.child_value(media("description"))),
            geo: entry
                .element(georss("where"))
                .map(GeoRss::parse)
                .transpose()?,
            keywords: group.and_then(|g| g.child_value(media("keywords"))),
            access: entry
                .child_value(photos("access"))
                .map_or(Access::Unknown, |v| Access::parse(&v)),
            width: entry.child_number(photos("width"))?,
            height: entry.child_number(photos("height"))?,
            size: entry.child_number(photos("size"))?,
            commenting_enabled: entry.child_number(photos("commentingEnabled"))?,
            comment_count: entry.child_number(photos("commentCount"))?,
        })
    }
}

impl Photo {
    pub fn position(&self) -> Option<GeoPosition> {
        self.geo.as_ref().map(GeoRss::to_position)
    }
}

impl Entity for Photo {
    fn id(&self) -> &str {
        &self.id
    }

    fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }
}

/// Properties sent when uploading or updating a photo
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoProps {
    pub title: Option<String>,
    pub summary: Option<String>,
    /// Comma separated keywords
    pub keywords: Option<String>,
    pub position: Option<GeoPosition>,
}
