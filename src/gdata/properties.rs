/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use std::str::FromStr;
use strum_macros::{EnumString, IntoStaticStr};

/// Visibility of an album or photo.
///
/// The service adds new values over time, anything unrecognised parses as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, IntoStaticStr)]
pub enum Access {
    #[strum(to_string = "private", serialize = "only_you")]
    Private,
    #[strum(to_string = "public")]
    Public,
    #[strum(to_string = "protected")]
    Protected,
    #[default]
    #[strum(to_string = "unknown")]
    Unknown,
}

impl Access {
    /// Parses an access token, never failing
    pub fn parse(s: &str) -> Access {
        Access::from_str(s.trim()).unwrap_or(Access::Unknown)
    }
}

/// Value of the `kind` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Kind {
    Album,
    Photo,
    Comment,
    Tag,
    User,
}

/// Common query parameters of feed requests.
///
/// `start_index` is 1-based. Zero values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    pub fields: Option<String>,
    pub start_index: Option<u32>,
    pub max_results: Option<u32>,
    pub order_by: Option<String>,
}

impl FeedQuery {
    pub fn page(start_index: u32, max_results: u32) -> Self {
        Self {
            start_index: Some(start_index),
            max_results: Some(max_results),
            ..Default::default()
        }
    }

    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(order_by) = &self.order_by {
            params.push(("orderby", order_by.clone()));
        }
        if let Some(start) = self.start_index.filter(|v| *v > 0) {
            params.push(("start-index", start.to_string()));
        }
        if let Some(max) = self.max_results.filter(|v| *v > 0) {
            params.push(("max-results", max.to_string()));
        }
        if let Some(fields) = self.fields.as_deref().filter(|f| !f.trim().is_empty()) {
            params.push(("fields", fields.to_string()));
        }
        params
    }
}
