/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::entity::Entity;
use crate::v1::Status;
use crate::v1::parsers::{from_empty_str_to_none, from_int64_string, from_video_status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{EnumString, IntoStaticStr};

/// A photo or video in the user's library.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub product_url: Option<String>,

    /// Needs size parameters appended (`=w2048-h1024`) before use
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub mime_type: Option<String>,

    #[serde(default)]
    pub media_metadata: Option<MediaMetadata>,

    #[serde(default)]
    pub contributor_info: Option<ContributorInfo>,

    #[serde(default)]
    pub filename: Option<String>,
}

impl Entity for MediaItem {
    fn id(&self) -> &str {
        &self.id
    }
}

impl PartialEq for MediaItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MediaItem {}

impl std::hash::Hash for MediaItem {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    /// When the item was taken, not when it was uploaded
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "from_int64_string")]
    pub width: Option<u64>,

    #[serde(default, deserialize_with = "from_int64_string")]
    pub height: Option<u64>,

    #[serde(default)]
    pub photo: Option<PhotoMetadata>,

    #[serde(default)]
    pub video: Option<VideoMetadata>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoMetadata {
    #[serde(default)]
    pub camera_make: Option<String>,
    #[serde(default)]
    pub camera_model: Option<String>,
    #[serde(default)]
    pub focal_length: Option<f64>,
    #[serde(default)]
    pub aperture_f_number: Option<f64>,
    #[serde(default)]
    pub iso_equivalent: Option<i32>,
    /// Seconds with a trailing `s`, e.g. `0.008s`
    #[serde(default)]
    pub exposure_time: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    #[serde(default)]
    pub camera_make: Option<String>,
    #[serde(default)]
    pub camera_model: Option<String>,
    #[serde(default)]
    pub fps: Option<f64>,
    #[serde(default, deserialize_with = "from_video_status")]
    pub status: VideoProcessingStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoProcessingStatus {
    #[default]
    Unspecified,
    Processing,
    Ready,
    Failed,
}

/// Only present for items in shared albums created by this application
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContributorInfo {
    #[serde(default)]
    pub profile_picture_base_url: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Media item to create from previously uploaded bytes
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMediaItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub simple_media_item: SimpleMediaItem,
}

impl NewMediaItem {
    pub fn from_upload(upload_token: &str, description: Option<&str>) -> Self {
        Self {
            description: description.map(str::to_string),
            simple_media_item: SimpleMediaItem {
                upload_token: upload_token.to_string(),
                file_name: None,
            },
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimpleMediaItem {
    pub upload_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,
    pub new_media_items: Vec<NewMediaItem>,
    /// Requires `album_id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_position: Option<AlbumPosition>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlbumPosition {
    pub position: PositionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_media_item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_enrichment_item_id: Option<String>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionType {
    PositionTypeUnspecified,
    FirstInAlbum,
    LastInAlbum,
    AfterMediaItem,
    AfterEnrichmentItem,
}

/// Outcome of creating one item of a batch.
///
/// Either `media_item` or a non-zero `status` is populated.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewMediaItemResult {
    #[serde(default)]
    pub upload_token: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub media_item: Option<MediaItem>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateResponse {
    #[serde(default)]
    pub new_media_item_results: Vec<NewMediaItemResult>,
}
