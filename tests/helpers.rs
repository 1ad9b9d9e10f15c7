/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use gphotos::PhotosError;
use gphotos::api::{ApiRequest, ApiResponse, HttpMethod, RequestBody, Transport};
use serde::Deserialize;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use url::Url;

#[derive(Deserialize, Debug)]
struct OAuth2TokenCache {
    access_token: String,
}

fn get_cached_token(path: PathBuf) -> anyhow::Result<OAuth2TokenCache> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Bearer token for live tests, either set directly or read from a token cache file
#[allow(dead_code)]
pub(crate) fn get_access_token() -> anyhow::Result<String> {
    if let Ok(token) = std::env::var("GOOGLE_PHOTOS_ACCESS_TOKEN") {
        return Ok(token);
    }
    let token_cache = std::env::var("GOOGLE_PHOTOS_TOKEN_CACHE")?;
    Ok(get_cached_token(token_cache.into())?.access_token)
}

/// A request as the transport saw it, with any streamed body fully read
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// Set when reading the body stream failed
    pub body_error: Option<io::ErrorKind>,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn query(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// In-memory transport answering with queued responses in order
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, response: ApiResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, PhotosError> {
        let ApiRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut data = Vec::new();
        let mut failure = None;
        match body {
            RequestBody::Empty => {}
            RequestBody::Bytes(bytes) => data.extend_from_slice(&bytes),
            RequestBody::Stream { mut stream, .. } => {
                while let Some(chunk) = stream.next().await {
                    match chunk {
                        Ok(chunk) => data.extend_from_slice(&chunk),
                        Err(e) => {
                            failure = Some(e);
                            break;
                        }
                    }
                }
            }
        }

        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url,
            headers,
            body: data,
            body_error: failure.as_ref().map(io::Error::kind),
        });
        if let Some(e) = failure {
            return Err(PhotosError::Io(e));
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(PhotosError::ResponseMissing())
    }
}

#[allow(dead_code)]
pub(crate) fn response(status: u16, body: &str) -> ApiResponse {
    ApiResponse {
        status,
        headers: Vec::new(),
        body: Bytes::from(body.to_string()),
    }
}

#[allow(dead_code)]
pub(crate) fn response_with_headers(status: u16, headers: &[(&str, &str)], body: &str) -> ApiResponse {
    ApiResponse {
        status,
        headers: headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        body: Bytes::from(body.to_string()),
    }
}

/// Legacy feed document with the given openSearch counters and entries
#[allow(dead_code)]
pub(crate) fn atom_feed(
    total_results: Option<u32>,
    start_index: Option<u32>,
    entries: &[String],
) -> String {
    let mut counters = String::new();
    if let Some(total) = total_results {
        counters.push_str(&format!("<openSearch:totalResults>{total}</openSearch:totalResults>"));
    }
    if let Some(start) = start_index {
        counters.push_str(&format!("<openSearch:startIndex>{start}</openSearch:startIndex>"));
    }
    format!(
        "<?xml version='1.0' encoding='UTF-8'?>\
         <feed xmlns='http://www.w3.org/2005/Atom' \
               xmlns:openSearch='http://a9.com/-/spec/opensearch/1.1/' \
               xmlns:gphoto='http://schemas.google.com/photos/2007' \
               xmlns:media='http://search.yahoo.com/mrss/' \
               xmlns:gd='http://schemas.google.com/g/2005'>\
           <title>default</title>\
           {counters}{}\
         </feed>",
        entries.concat()
    )
}

#[allow(dead_code)]
pub(crate) fn album_entry(id: &str, title: &str) -> String {
    format!(
        "<entry gd:etag='\"etag-{id}\"'>\
           <title type='text'>{title}</title>\
           <gphoto:id>{id}</gphoto:id>\
           <gphoto:access>public</gphoto:access>\
         </entry>"
    )
}

#[allow(dead_code)]
pub(crate) fn photo_entry(id: &str, album_id: &str) -> String {
    format!(
        "<entry gd:etag='W/\"etag-{id}\"'>\
           <title type='text'>{id}.jpg</title>\
           <gphoto:id>{id}</gphoto:id>\
           <gphoto:albumid>{album_id}</gphoto:albumid>\
         </entry>"
    )
}

/// Single entry document as returned by create and update calls
#[allow(dead_code)]
pub(crate) fn standalone_entry(entry: &str) -> String {
    entry.replacen(
        "<entry ",
        "<entry xmlns='http://www.w3.org/2005/Atom' \
                xmlns:gphoto='http://schemas.google.com/photos/2007' \
                xmlns:gd='http://schemas.google.com/g/2005' ",
        1,
    )
}
