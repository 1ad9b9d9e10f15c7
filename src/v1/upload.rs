/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Resumable upload protocol of the Library API.
//!
//! An upload is negotiated first, which yields a session URL. The bytes are then sent to that
//! URL and the session is finalized in the same request. The body of the final response is the
//! upload token used to create a media item.

use crate::api::{ApiClient, ApiRequest, ErrorFormat, HttpMethod, PHOTOS_API_ORIGIN};
use crate::errors::PhotosError;
use crate::progress::{UploadProgress, progress_stream};
use log::{debug, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncRead;
use tokio_util::sync::CancellationToken;
use url::Url;

pub const UPLOAD_COMMAND: &str = "X-Goog-Upload-Command";
pub const UPLOAD_CONTENT_TYPE: &str = "X-Goog-Upload-Content-Type";
pub const UPLOAD_FILE_NAME: &str = "X-Goog-Upload-File-Name";
pub const UPLOAD_PROTOCOL: &str = "X-Goog-Upload-Protocol";
pub const UPLOAD_RAW_SIZE: &str = "X-Goog-Upload-Raw-Size";
pub const UPLOAD_URL: &str = "X-Goog-Upload-URL";
pub const UPLOAD_CHUNK_GRANULARITY: &str = "X-Goog-Upload-Chunk-Granularity";
pub const UPLOAD_OFFSET: &str = "X-Goog-Upload-Offset";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Negotiated,
    Uploading,
    Finalized,
    Failed,
}

/// What is about to be uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_name: String,
    pub mime_type: String,
    /// Total size in bytes, when known up front
    pub length: Option<u64>,
}

impl UploadRequest {
    pub fn new(file_name: &str, mime_type: &str, length: Option<u64>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            length,
        }
    }
}

/// Opaque token identifying uploaded bytes, valid for one day
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UploadToken(String);

impl UploadToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for UploadToken {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One upload, driven from `Idle` to `Finalized` or `Failed`.
///
/// Nothing is retried. A failed session cannot be resumed; start a new one.
#[derive(Debug)]
pub struct UploadSession {
    request: UploadRequest,
    state: UploadState,
    upload_url: Option<Url>,
    chunk_granularity: u64,
    bytes_sent: u64,
}

impl UploadSession {
    pub fn new(request: UploadRequest) -> Self {
        Self {
            request,
            state: UploadState::Idle,
            upload_url: None,
            chunk_granularity: 0,
            bytes_sent: 0,
        }
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn request(&self) -> &UploadRequest {
        &self.request
    }

    /// Session URL handed out by the service
    pub fn upload_url(&self) -> Option<&Url> {
        self.upload_url.as_ref()
    }

    /// Chunk size the service asked for, 0 when it did not say
    pub fn chunk_granularity(&self) -> u64 {
        self.chunk_granularity
    }

    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }

    fn expect_state(&self, expected: UploadState) -> Result<(), PhotosError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(PhotosError::UploadState {
                expected,
                actual: self.state,
            })
        }
    }

    fn fail(&mut self, error: PhotosError) -> PhotosError {
        warn!("upload of {} failed: {}", self.request.file_name, error);
        self.state = UploadState::Failed;
        error
    }

    /// Starts the session. Service errors carry the response body as returned.
    pub async fn negotiate(&mut self, api: &ApiClient) -> Result<(), PhotosError> {
        self.expect_state(UploadState::Idle)?;

        let mut req = ApiRequest::new(
            HttpMethod::Post,
            Url::parse(PHOTOS_API_ORIGIN)?.join("/v1/uploads")?,
        )
        .header(UPLOAD_COMMAND, "start")
        .header(UPLOAD_CONTENT_TYPE, self.request.mime_type.as_str())
        .header(
            UPLOAD_FILE_NAME,
            urlencoding::encode(&self.request.file_name).into_owned(),
        )
        .header(UPLOAD_PROTOCOL, "resumable");
        if let Some(length) = self.request.length {
            req = req.header(UPLOAD_RAW_SIZE, length.to_string());
        }

        let resp = match api.execute(req, ErrorFormat::RawText).await {
            Ok(resp) => resp,
            Err(e) => return Err(self.fail(e)),
        };
        let upload_url = match resp.header(UPLOAD_URL) {
            Some(url) => Url::parse(url).map_err(PhotosError::from),
            None => Err(PhotosError::MissingHeader(UPLOAD_URL)),
        };
        let upload_url = match upload_url {
            Ok(url) => url,
            Err(e) => return Err(self.fail(e)),
        };
        let chunk_granularity = match resp.header(UPLOAD_CHUNK_GRANULARITY) {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(v) => v,
                Err(_) => {
                    return Err(self.fail(PhotosError::InvalidNumber {
                        field: UPLOAD_CHUNK_GRANULARITY,
                        value: v.to_string(),
                    }));
                }
            },
            None => 0,
        };

        debug!(
            "upload of {} negotiated, granularity {}",
            self.request.file_name, chunk_granularity
        );
        self.upload_url = Some(upload_url);
        self.chunk_granularity = chunk_granularity;
        self.state = UploadState::Negotiated;
        Ok(())
    }

    /// Sends every byte of `reader` and finalizes the session.
    ///
    /// The body is sent as one request starting at offset 0. `progress` is called with the
    /// cumulative byte count after each chunk is handed to the transport. The token is checked
    /// before every read; cancelling fails the session with [`PhotosError::Cancelled`].
    pub async fn upload<R, F>(
        &mut self,
        api: &ApiClient,
        reader: R,
        progress: F,
        cancel: &CancellationToken,
    ) -> Result<UploadToken, PhotosError>
    where
        R: AsyncRead + Send + Unpin + 'static,
        F: Fn(UploadProgress) + Send + Sync + 'static,
    {
        self.expect_state(UploadState::Negotiated)?;
        let upload_url = match self.upload_url.clone() {
            Some(url) => url,
            None => return Err(self.fail(PhotosError::MissingHeader(UPLOAD_URL))),
        };
        if cancel.is_cancelled() {
            return Err(self.fail(PhotosError::Cancelled));
        }
        self.state = UploadState::Uploading;

        let sent = Arc::new(AtomicU64::new(0));
        let body = progress_stream(
            reader,
            self.request.length,
            Arc::new(progress),
            cancel.clone(),
            sent.clone(),
        );
        let req = ApiRequest::new(HttpMethod::Post, upload_url)
            .header(UPLOAD_COMMAND, "upload, finalize")
            .header(UPLOAD_OFFSET, "0")
            .stream("application/octet-stream", Box::pin(body), self.request.length);

        let result = api.execute(req, ErrorFormat::RawText).await;
        self.bytes_sent = sent.load(Ordering::SeqCst);
        if cancel.is_cancelled() {
            return Err(self.fail(PhotosError::Cancelled));
        }
        let resp = match result {
            Ok(resp) => resp,
            Err(e) => return Err(self.fail(e)),
        };

        let token = resp.text().trim().to_string();
        if token.is_empty() {
            return Err(self.fail(PhotosError::ResponseMissing()));
        }
        debug!(
            "upload of {} finalized after {} bytes",
            self.request.file_name, self.bytes_sent
        );
        self.state = UploadState::Finalized;
        Ok(UploadToken(token))
    }
}
