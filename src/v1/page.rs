/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Token based pagination of the Library API.
//!
//! A page without a `nextPageToken` is the last one. Pages are fetched only as the consumer
//! polls, so dropping a stream early never requests pages it did not read.

use crate::errors::PhotosError;
use async_stream::try_stream;
use futures::Stream;
use log::{debug, warn};
use serde::de::DeserializeOwned;

/// One page of a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// `None` on the last page
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_page_token: Option<String>) -> Self {
        Self {
            items,
            next_page_token: next_page_token.filter(|t| !t.is_empty()),
        }
    }

    pub fn is_last(&self) -> bool {
        self.next_page_token.is_none()
    }
}

/// A list response body, keyed by the collection it carries (`albums`, `mediaItems`)
pub trait ListResponse: DeserializeOwned {
    type Item;

    fn into_page(self) -> Page<Self::Item>;
}

/// Parses a list response body into a [`Page`]
pub fn parse_page<R: ListResponse>(body: &[u8]) -> Result<Page<R::Item>, PhotosError> {
    Ok(serde_json::from_slice::<R>(body)?.into_page())
}

/// Lazily walks every page.
///
/// `fetch` is called with `None` first and then with the token of the previous page. The walk
/// ends after the first page without a token. A token equal to the one just sent also ends
/// the walk, since following it would request the same page forever.
pub fn walk_pages<T, F, Fut>(fetch: F) -> impl Stream<Item = Result<Page<T>, PhotosError>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, PhotosError>>,
{
    try_stream! {
        let mut fetch = fetch;
        let mut token: Option<String> = None;
        loop {
            let page = fetch(token.clone()).await?;
            let next = page.next_page_token.clone().filter(|t| !t.is_empty());
            debug!("page with {} items, more: {}", page.items.len(), next.is_some());
            yield page;

            match next {
                None => break,
                Some(next) if token.as_deref() == Some(next.as_str()) => {
                    warn!("page token {} repeated, stopping", next);
                    break;
                }
                Some(next) => token = Some(next),
            }
        }
    }
}

/// Lazily walks every page, yielding the items in server order
pub fn walk_items<T, F, Fut>(fetch: F) -> impl Stream<Item = Result<T, PhotosError>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, PhotosError>>,
{
    try_stream! {
        for await page in walk_pages(fetch) {
            for item in page?.items {
                yield item;
            }
        }
    }
}
