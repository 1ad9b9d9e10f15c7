/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::api::{
    ApiClient, ApiRequest, ApiResponse, ErrorFormat, GDATA_ORIGIN, HttpMethod, Transport,
};
use crate::errors::PhotosError;
use crate::etag::with_precondition;
use crate::gdata::album::{Album, AlbumProps};
use crate::gdata::comment::Comment;
use crate::gdata::feed::{Feed, FeedEntry};
use crate::gdata::macros::stream_feed_entries;
use crate::gdata::metadata::Metadata;
use crate::gdata::multipart::{MediaPart, related_body};
use crate::gdata::photo::{Photo, PhotoProps};
use crate::gdata::properties::{FeedQuery, Kind};
use crate::gdata::xml::XmlDocument;
use crate::gdata::xml_writer::{album_entry_xml, comment_entry_xml, photo_entry_xml};
use crate::progress::UploadProgress;
use async_stream::try_stream;
use bytes::Bytes;
use futures::Stream;
use log::{debug, warn};
use std::sync::Arc;
use tokio::io::AsyncRead;
use tokio_util::sync::CancellationToken;
use url::Url;
use urlencoding::encode;

const GDATA_VERSION: (&str, &str) = ("GData-Version", "2");
const ATOM_XML: &str = "application/atom+xml";
// Updates are sent as partial entries
const PATCH_XML: &str = "application/xml";

const USER_FEED: &str = "/data/feed/api/user/default";
const USER_ENTRY: &str = "/data/entry/api/user/default";

/// Client for the legacy Atom feed API.
///
/// ```no_run
/// # async fn run() -> Result<(), gphotos::errors::PhotosError> {
/// use futures::{pin_mut, StreamExt};
/// use gphotos::gdata::{Client, FeedQuery};
///
/// let client = Client::new("access-token");
/// let albums = client.albums_stream(FeedQuery::default())?;
/// pin_mut!(albums);
/// while let Some(album) = albums.next().await {
///     println!("{}", album?);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    api_client: Arc<ApiClient>,
}

impl Client {
    pub fn new(access_token: &str) -> Self {
        Self {
            api_client: Arc::new(ApiClient::new(access_token)),
        }
    }

    pub fn with_transport(transport: Arc<dyn Transport>, access_token: &str) -> Self {
        Self {
            api_client: Arc::new(ApiClient::with_transport(transport, access_token)),
        }
    }

    /// Returns account information of the authenticated user
    pub async fn metadata(&self, fields: Option<&str>) -> Result<Metadata, PhotosError> {
        let query = FeedQuery {
            fields: fields.map(str::to_string),
            ..Default::default()
        };
        let url = with_params(gdata_url(USER_FEED)?, &query.params());
        let resp = self.send(ApiRequest::new(HttpMethod::Get, url)).await?;
        Metadata::parse(XmlDocument::from_bytes(&resp.body)?.root())
    }

    /// Returns one page of the user's albums
    pub async fn albums(&self, query: &FeedQuery) -> Result<Feed<Album>, PhotosError> {
        self.feed(&gdata_url(USER_FEED)?, query).await
    }

    /// Returns every album, fetching pages as the stream is polled
    pub fn albums_stream(
        &self,
        query: FeedQuery,
    ) -> Result<impl Stream<Item = Result<Album, PhotosError>> + use<>, PhotosError> {
        Ok(stream_feed_entries!(self, gdata_url(USER_FEED)?, query, Album))
    }

    pub async fn album_photos(
        &self,
        album_id: &str,
        query: &FeedQuery,
    ) -> Result<Feed<Photo>, PhotosError> {
        self.feed(&album_feed_url(album_id)?, query).await
    }

    /// Returns every photo of the album, fetching pages as the stream is polled
    pub fn album_photos_stream(
        &self,
        album_id: &str,
        query: FeedQuery,
    ) -> Result<impl Stream<Item = Result<Photo, PhotosError>> + use<>, PhotosError> {
        Ok(stream_feed_entries!(self, album_feed_url(album_id)?, query, Photo))
    }

    /// Full text search over the user's photos. A blank `q` is not sent.
    pub async fn search_photos(
        &self,
        q: &str,
        query: &FeedQuery,
    ) -> Result<Feed<Photo>, PhotosError> {
        let kind: &'static str = Kind::Photo.into();
        let mut params = Vec::with_capacity(2);
        if !q.trim().is_empty() {
            params.push(("q", q));
        }
        params.push(("kind", kind));
        let url = with_params(gdata_url(USER_FEED)?, &params);
        self.feed(&url, query).await
    }

    pub async fn photo_comments(
        &self,
        photo_id: &str,
        query: &FeedQuery,
    ) -> Result<Feed<Comment>, PhotosError> {
        let kind: &'static str = Kind::Comment.into();
        let url = with_params(
            gdata_url(&format!("{}/photoid/{}", USER_FEED, encode(photo_id)))?,
            &[("kind", kind)],
        );
        self.feed(&url, query).await
    }

    pub async fn add_comment(&self, photo_id: &str, text: &str) -> Result<Comment, PhotosError> {
        let url = gdata_url(&format!(
            "{}/albumid/default/photoid/{}",
            USER_FEED,
            encode(photo_id)
        ))?;
        let req = ApiRequest::new(HttpMethod::Post, url).bytes(ATOM_XML, comment_entry_xml(text)?);
        self.entry(req).await
    }

    pub async fn create_album(&self, props: &AlbumProps) -> Result<Album, PhotosError> {
        let req = ApiRequest::new(HttpMethod::Post, gdata_url(USER_FEED)?)
            .bytes(ATOM_XML, album_entry_xml(props)?);
        self.entry(req).await
    }

    /// Uploads a photo together with its metadata as a single `multipart/related` request.
    ///
    /// `progress` receives the cumulative number of media bytes sent. Cancelling `cancel`
    /// aborts the request body and the call fails with [`PhotosError::Cancelled`].
    #[allow(clippy::too_many_arguments)]
    pub async fn upload_photo<R, F>(
        &self,
        album_id: &str,
        props: &PhotoProps,
        mime_type: Option<&str>,
        reader: R,
        length: Option<u64>,
        progress: F,
        cancel: &CancellationToken,
    ) -> Result<Photo, PhotosError>
    where
        R: AsyncRead + Send + Unpin + 'static,
        F: Fn(UploadProgress) + Send + Sync + 'static,
    {
        if cancel.is_cancelled() {
            return Err(PhotosError::Cancelled);
        }
        let body = related_body(
            &photo_entry_xml(props)?,
            MediaPart {
                file_name: props.title.clone().unwrap_or_default(),
                mime_type: mime_type.map(str::to_string),
                reader,
                length,
            },
            Arc::new(progress),
            cancel.clone(),
        );
        let req = ApiRequest::new(HttpMethod::Post, album_feed_url(album_id)?).stream(
            &body.content_type,
            body.stream,
            body.length,
        );

        let result = self.send(req).await;
        if cancel.is_cancelled() {
            warn!("photo upload to album {} cancelled", album_id);
            return Err(PhotosError::Cancelled);
        }
        parse_entry(&result?)
    }

    /// Updates an album. A missing etag overwrites whatever version is stored.
    pub async fn update_album(
        &self,
        album_id: &str,
        etag: Option<&str>,
        props: &AlbumProps,
    ) -> Result<Album, PhotosError> {
        let req = ApiRequest::new(HttpMethod::Patch, album_entry_url(album_id)?)
            .bytes(PATCH_XML, album_entry_xml(props)?);
        self.entry(with_precondition(req, etag)).await
    }

    pub async fn update_photo(
        &self,
        photo_id: &str,
        album_id: &str,
        etag: Option<&str>,
        props: &PhotoProps,
    ) -> Result<Photo, PhotosError> {
        let req = ApiRequest::new(HttpMethod::Patch, photo_entry_url(photo_id, album_id)?)
            .bytes(PATCH_XML, photo_entry_xml(props)?);
        self.entry(with_precondition(req, etag)).await
    }

    pub async fn delete_album(&self, album_id: &str, etag: Option<&str>) -> Result<(), PhotosError> {
        let req = ApiRequest::new(HttpMethod::Delete, album_entry_url(album_id)?);
        self.send(with_precondition(req, etag)).await?;
        Ok(())
    }

    pub async fn delete_photo(&self, photo_id: &str, etag: Option<&str>) -> Result<(), PhotosError> {
        let req = ApiRequest::new(HttpMethod::Delete, photo_entry_url(photo_id, "default")?);
        self.send(with_precondition(req, etag)).await?;
        Ok(())
    }

    /// Downloads the media at `url`, usually a `media:content` url
    pub async fn download(&self, url: &str) -> Result<Bytes, PhotosError> {
        let resp = self
            .send(ApiRequest::new(HttpMethod::Get, Url::parse(url)?))
            .await?;
        debug!("downloaded {} bytes from {}", resp.body.len(), url);
        Ok(resp.body)
    }

    pub(crate) async fn feed<T: FeedEntry>(
        &self,
        url: &Url,
        query: &FeedQuery,
    ) -> Result<Feed<T>, PhotosError> {
        let url = with_params(url.clone(), &query.params());
        let resp = self.send(ApiRequest::new(HttpMethod::Get, url)).await?;
        Feed::parse(&XmlDocument::from_bytes(&resp.body)?)
    }

    async fn entry<T: FeedEntry>(&self, req: ApiRequest) -> Result<T, PhotosError> {
        parse_entry(&self.send(req).await?)
    }

    async fn send(&self, req: ApiRequest) -> Result<ApiResponse, PhotosError> {
        let req = req.header(GDATA_VERSION.0, GDATA_VERSION.1);
        self.api_client.execute(req, ErrorFormat::RawText).await
    }
}

fn parse_entry<T: FeedEntry>(resp: &ApiResponse) -> Result<T, PhotosError> {
    T::parse(XmlDocument::from_bytes(&resp.body)?.root())
}

fn gdata_url(path: &str) -> Result<Url, PhotosError> {
    Ok(Url::parse(GDATA_ORIGIN)?.join(path)?)
}

fn album_feed_url(album_id: &str) -> Result<Url, PhotosError> {
    gdata_url(&format!("{}/albumid/{}", USER_FEED, encode(album_id)))
}

fn album_entry_url(album_id: &str) -> Result<Url, PhotosError> {
    gdata_url(&format!("{}/albumid/{}", USER_ENTRY, encode(album_id)))
}

fn photo_entry_url(photo_id: &str, album_id: &str) -> Result<Url, PhotosError> {
    gdata_url(&format!(
        "{}/albumid/{}/photoid/{}",
        USER_ENTRY,
        encode(album_id),
        encode(photo_id)
    ))
}

fn with_params<K: AsRef<str>, V: AsRef<str>>(mut url: Url, params: &[(K, V)]) -> Url {
    if !params.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (k.as_ref(), v.as_ref())));
    }
    url
}
