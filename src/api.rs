/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::errors::PhotosError;
use crate::v1::Status;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use log::{debug, trace};
use num_enum::TryFromPrimitive;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use url::Url;

// Root of the legacy GData (Picasa Web Albums) feed API
pub const GDATA_ORIGIN: &str = "https://picasaweb.google.com";

// Root of the Photos Library API
pub const PHOTOS_API_ORIGIN: &str = "https://photoslibrary.googleapis.com";

/// Streamed request body. Errors abort the request.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, io::Error>> + Send>>;

/// This can be filter types as well as other parameters the specific API expects
pub type ApiParams<'a> = [(&'a str, &'a str)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

pub enum RequestBody {
    Empty,
    Bytes(Bytes),
    Stream {
        stream: BodyStream,
        length: Option<u64>,
    },
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestBody::Empty => f.write_str("Empty"),
            RequestBody::Bytes(b) => write!(f, "Bytes({} bytes)", b.len()),
            RequestBody::Stream { length, .. } => write!(f, "Stream(length: {:?})", length),
        }
    }
}

/// A single request handed to a [`Transport`].
#[derive(Debug)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn bytes(self, content_type: &str, body: impl Into<Bytes>) -> Self {
        let mut req = self.header("Content-Type", content_type);
        req.body = RequestBody::Bytes(body.into());
        req
    }

    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, PhotosError> {
        let data = serde_json::to_vec(body)?;
        Ok(self.bytes("application/json", data))
    }

    pub fn stream(self, content_type: &str, stream: BodyStream, length: Option<u64>) -> Self {
        let mut req = self.header("Content-Type", content_type);
        req.body = RequestBody::Stream { stream, length };
        req
    }

    /// Case-insensitive header lookup, first match wins
    pub fn header_value(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Response as seen by the protocol layers. The body is fully buffered.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Executes requests on behalf of an [`ApiClient`].
///
/// The default implementation is [`HttpsTransport`]. Failures returned from here are
/// transport failures and are surfaced to the caller unmodified.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, PhotosError>;
}

/// [`Transport`] backed by a single long lived `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct HttpsTransport {
    https_client: reqwest::Client,
}

impl HttpsTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(https_client: reqwest::Client) -> Self {
        Self { https_client }
    }
}

#[async_trait]
impl Transport for HttpsTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, PhotosError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.https_client.request(method, request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Bytes(data) => builder.body(data),
            RequestBody::Stream { stream, length } => {
                if let Some(length) = length {
                    builder = builder.header(reqwest::header::CONTENT_LENGTH, length.to_string());
                }
                builder.body(reqwest::Body::wrap_stream(stream))
            }
        };

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|v| (k.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = resp.bytes().await?;
        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

/// How the service reports failures in a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFormat {
    /// Legacy feeds answer with plain text
    RawText,
    /// The Library API answers with a `{"error": Status}` document
    JsonStatus,
}

/// Directly communicates with the API.
#[derive(Clone)]
pub struct ApiClient {
    access_token: Arc<str>,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Creates a new client using the default HTTPS transport and the provided bearer token
    pub fn new(access_token: &str) -> Self {
        Self::with_transport(Arc::new(HttpsTransport::new()), access_token)
    }

    pub fn with_transport(transport: Arc<dyn Transport>, access_token: &str) -> Self {
        Self {
            access_token: access_token.into(),
            transport,
        }
    }

    /// Sends the request with the bearer token attached.
    ///
    /// Any non-success status is converted into an error carrying the response body.
    pub async fn execute(
        &self,
        request: ApiRequest,
        format: ErrorFormat,
    ) -> Result<ApiResponse, PhotosError> {
        let method = request.method;
        let url = request.url.to_string();
        let request = request.header("Authorization", format!("Bearer {}", self.access_token));
        debug!("{:?} {}", method, url);

        let resp = self.transport.execute(request).await?;
        trace!("{:?} {} -> {}", method, url, resp.status);
        if resp.is_success() {
            Ok(resp)
        } else {
            debug!("{:?} {} failed with status {}", method, url, resp.status);
            Err(service_error(&resp, format))
        }
    }

    /// Performs a get request against the Library API
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: Option<&ApiParams<'_>>,
    ) -> Result<T, PhotosError> {
        let req_url = params.map_or(Url::parse(url), |v| Url::parse_with_params(url, v))?;
        let resp = self
            .execute(ApiRequest::new(HttpMethod::Get, req_url), ErrorFormat::JsonStatus)
            .await?;
        Ok(serde_json::from_slice(&resp.body)?)
    }

    /// Performs a post request with a JSON body against the Library API
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, PhotosError> {
        let req = ApiRequest::new(HttpMethod::Post, Url::parse(url)?).json(body)?;
        let resp = self.execute(req, ErrorFormat::JsonStatus).await?;
        Ok(serde_json::from_slice(&resp.body)?)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("access_token", &"xxx")
            .finish()
    }
}

/// Status codes the client treats specially
#[derive(Debug, TryFromPrimitive)]
#[repr(u16)]
pub enum ApiErrorCodes {
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    Conflict = 409,
    PreconditionFailed = 412,
    TooManyRequests = 429,
    InternalServerError = 500,
    ServiceUnavailable = 503,
}

// Error document returned by the Library API
#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: Status,
}

/// Converts a non-success response into the matching [`PhotosError`].
///
/// Only the legacy feeds use ETag preconditions; Library API conflicts keep their status body.
pub(crate) fn service_error(resp: &ApiResponse, format: ErrorFormat) -> PhotosError {
    use ApiErrorCodes as E;
    let body = resp.text();
    match format {
        ErrorFormat::RawText => {
            if let Ok(E::Conflict | E::PreconditionFailed) = ApiErrorCodes::try_from(resp.status) {
                return PhotosError::PreconditionFailed {
                    status: resp.status,
                    body,
                };
            }
        }
        ErrorFormat::JsonStatus => {
            if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(&resp.body) {
                return PhotosError::ApiStatus {
                    status: resp.status,
                    error: parsed.error,
                };
            }
        }
    }
    PhotosError::ApiResponse {
        status: resp.status,
        body,
    }
}
