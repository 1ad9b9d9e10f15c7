/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use serde::Serialize;

/// Search filters. When several are set an item must match all of them.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_filter: Option<DateFilter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_filter: Option<ContentFilter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type_filter: Option<MediaTypeFilter>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub include_archived_media: bool,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub exclude_non_app_created_data: bool,
}

/// Up to 5 dates and 5 ranges
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct DateFilter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dates: Vec<Date>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<DateRange>,
}

/// Calendar date, any part may be 0 to leave it unconstrained
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Date {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Date {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

impl From<chrono::NaiveDate> for Date {
    fn from(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        Self::new(date.year(), date.month(), date.day())
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: Date,
    pub end_date: Date,
}

/// Included categories are ORed, then items matching any excluded category are removed
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentFilter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub included_content_categories: Vec<ContentCategory>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excluded_content_categories: Vec<ContentCategory>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentCategory {
    None,
    Landscapes,
    Receipts,
    Cityscapes,
    Landmarks,
    Selfies,
    People,
    Pets,
    Weddings,
    Birthdays,
    Documents,
    Travel,
    Animals,
    Food,
    Sport,
    Night,
    Performances,
    Whiteboards,
    Screenshots,
    Utility,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaTypeFilter {
    pub media_types: Vec<MediaType>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    AllMedia,
    Video,
    Photo,
}
