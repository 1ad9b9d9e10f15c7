/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::page::{ListResponse, Page};
use crate::v1::{Album, Filters, MediaItem};
use serde::{Deserialize, Serialize};

/// Body of a `mediaItems:search` request.
///
/// `album_id` and `filters` cannot be combined.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filters>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

impl SearchRequest {
    pub fn in_album(album_id: &str) -> Self {
        Self {
            album_id: Some(album_id.to_string()),
            ..Default::default()
        }
    }

    pub fn with_filters(filters: Filters) -> Self {
        Self {
            filters: Some(filters),
            ..Default::default()
        }
    }
}

// Expected response from listing albums
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AlbumsResponse {
    #[serde(default)]
    albums: Vec<Album>,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl ListResponse for AlbumsResponse {
    type Item = Album;

    fn into_page(self) -> Page<Album> {
        Page::new(self.albums, self.next_page_token)
    }
}

// Expected response from listing or searching media items
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MediaItemsResponse {
    #[serde(default)]
    media_items: Vec<MediaItem>,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl ListResponse for MediaItemsResponse {
    type Item = MediaItem;

    fn into_page(self) -> Page<MediaItem> {
        Page::new(self.media_items, self.next_page_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v1::{MediaType, MediaTypeFilter};
    use serde_json::json;

    #[test]
    fn test_search_request_shape() {
        let mut request = SearchRequest::with_filters(Filters {
            media_type_filter: Some(MediaTypeFilter {
                media_types: vec![MediaType::Photo],
            }),
            ..Default::default()
        });
        request.page_size = Some(50);
        request.page_token = Some("abc".to_string());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "pageSize": 50,
                "pageToken": "abc",
                "filters": {"mediaTypeFilter": {"mediaTypes": ["PHOTO"]}}
            })
        );
        assert_eq!(
            serde_json::to_value(SearchRequest::in_album("a1")).unwrap(),
            json!({"albumId": "a1"})
        );
    }
}
