/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

// Walks a feed one page at a time using start-index arithmetic. Stops on an empty page or
// once totalResults has been reached.
macro_rules! stream_feed_entries {
    ( $c:expr, $url:expr, $query:expr, $et:ty ) => {{
        let client = $c.clone();
        let url: url::Url = $url;
        let mut query: FeedQuery = $query;

        try_stream! {
            let mut start_index = query.start_index.filter(|v| *v > 0).unwrap_or(1);
            loop {
                query.start_index = Some(start_index);
                let feed = client.feed::<$et>(&url, &query).await?;
                let received = feed.items.len();
                debug!(
                    "feed page at {} returned {} of {} entries",
                    start_index, received, feed.total_results
                );
                let page_start = if feed.start_index > 0 {
                    feed.start_index
                } else {
                    i64::from(start_index)
                };
                let total_results = feed.total_results;
                for item in feed.items {
                    yield item
                }

                if received == 0 {
                    break;
                }
                let next = page_start + received as i64;
                if total_results >= 0 && next > total_results {
                    break;
                }
                start_index = u32::try_from(next).map_err(|_| PhotosError::InvalidNumber {
                    field: "startIndex",
                    value: next.to_string(),
                })?;
            }
        }
    }};
}

pub(crate) use stream_feed_entries;
