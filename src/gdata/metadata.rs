/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::entity::Entity;
use crate::errors::PhotosError;
use crate::gdata::namespaces::{atom, photos};
use crate::gdata::xml::XmlElement;

/// Account information found at the root of the user feed.
///
/// Every field is optional since a `fields` projection can leave any of them out.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub user: Option<String>,
    pub nickname: Option<String>,
    pub thumbnail: Option<String>,
    /// Bytes used
    pub quota_current: Option<u64>,
    /// Bytes allowed, -1 for unlimited accounts
    pub quota_limit: Option<i64>,
    pub max_photos_per_album: Option<u32>,
}

impl Metadata {
    /// Parses the `<feed>` element of a user feed
    pub fn parse(feed: &XmlElement) -> Result<Self, PhotosError> {
        if !feed.is(atom("feed")) {
            return Err(PhotosError::MissingElement("feed"));
        }
        Ok(Self {
            user: feed.child_value(photos("user")),
            nickname: feed.child_value(photos("nickname")),
            thumbnail: feed.child_value(photos("thumbnail")),
            quota_current: feed.child_number(photos("quotacurrent"))?,
            quota_limit: feed.child_number(photos("quotalimit"))?,
            max_photos_per_album: feed.child_number(photos("maxPhotosPerAlbum"))?,
        })
    }
}

impl Entity for Metadata {
    fn id(&self) -> &str {
        self.user.as_deref().unwrap_or_default()
    }
}
