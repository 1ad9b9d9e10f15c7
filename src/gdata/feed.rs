/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::errors::PhotosError;
use crate::gdata::media::Author;
use crate::gdata::namespaces::{QualifiedName, atom, open_search};
use crate::gdata::xml::{XmlDocument, XmlElement};

/// An entity that appears as an `<entry>` of a feed.
pub trait FeedEntry: Sized {
    fn parse(entry: &XmlElement) -> Result<Self, PhotosError>;
}

/// One page of a legacy feed.
///
/// Counters the service did not send are `-1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed<T> {
    pub icon: Option<String>,
    pub author: Option<Author>,
    pub total_results: i64,
    pub start_index: i64,
    pub items_per_page: i64,
    pub items: Vec<T>,
}

impl<T: FeedEntry> Feed<T> {
    pub fn parse(doc: &XmlDocument) -> Result<Self, PhotosError> {
        let feed = doc.root();
        if !feed.is(atom("feed")) {
            return Err(PhotosError::MissingElement("feed"));
        }

        let items = feed
            .elements(atom("entry"))
            .map(T::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            icon: feed.child_value(atom("icon")),
            author: feed.element(atom("author")).map(Author::parse),
            total_results: counter(feed, open_search("totalResults"))?,
            start_index: counter(feed, open_search("startIndex"))?,
            items_per_page: counter(feed, open_search("itemsPerPage"))?,
            items,
        })
    }
}

fn counter(feed: &XmlElement, name: QualifiedName<'static>) -> Result<i64, PhotosError> {
    Ok(feed.child_number(name)?.unwrap_or(-1))
}
