/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Optimistic concurrency preconditions for mutating calls.

use crate::api::ApiRequest;

pub const IF_MATCH: &str = "If-Match";

/// Precondition token matching whatever version the service currently holds
pub const ANY_VERSION: &str = "*";

/// Builds the `If-Match` value for the given ETag.
///
/// A missing, empty or whitespace-only ETag becomes the wildcard [`ANY_VERSION`]; the request
/// always carries a precondition. Tags already in entity-tag form (`"x"` or `W/"x"`, which is
/// how `gd:etag` attributes arrive) are sent as is, bare tokens are quoted.
pub fn if_match(etag: Option<&str>) -> String {
    let etag = etag.map(str::trim).unwrap_or_default();
    if etag.is_empty() {
        ANY_VERSION.to_string()
    } else if etag == ANY_VERSION || etag.starts_with('"') || etag.starts_with("W/\"") {
        etag.to_string()
    } else {
        format!("\"{}\"", etag)
    }
}

/// Attaches the `If-Match` precondition to a request
pub fn with_precondition(request: ApiRequest, etag: Option<&str>) -> ApiRequest {
    request.header(IF_MATCH, if_match(etag))
}
