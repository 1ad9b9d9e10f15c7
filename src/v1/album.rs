/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::entity::Entity;
use crate::v1::parsers::{from_empty_str_to_none, from_int64_string};
use serde::{Deserialize, Serialize};

/// Holds information returned from the Library API albums endpoints.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub product_url: Option<String>,

    #[serde(default)]
    pub is_writeable: Option<bool>,

    #[serde(default, deserialize_with = "from_int64_string")]
    pub media_items_count: Option<u64>,

    #[serde(default)]
    pub cover_photo_base_url: Option<String>,

    #[serde(default)]
    pub cover_photo_media_item_id: Option<String>,
}

impl Entity for Album {
    fn id(&self) -> &str {
        &self.id
    }
}

impl PartialEq for Album {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Album {}

impl std::hash::Hash for Album {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
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

// Body of an album creation request
#[derive(Serialize, Debug)]
pub(crate) struct CreateAlbumRequest<'a> {
    pub album: NewAlbum<'a>,
}

#[derive(Serialize, Debug)]
pub(crate) struct NewAlbum<'a> {
    pub title: &'a str,
}
