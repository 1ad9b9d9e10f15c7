/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::api::{
    ApiClient, ApiRequest, ErrorFormat, HttpMethod, PHOTOS_API_ORIGIN, Transport,
};
use crate::errors::PhotosError;
use crate::progress::UploadProgress;
use crate::v1::album::{CreateAlbumRequest, NewAlbum};
use crate::v1::page::{ListResponse, Page, parse_page, walk_items};
use crate::v1::search::{AlbumsResponse, MediaItemsResponse, SearchRequest};
use crate::v1::upload::{UploadRequest, UploadSession, UploadToken};
use crate::v1::{Album, BatchCreateRequest, BatchCreateResponse, MediaItem, NewMediaItem};
use futures::Stream;
use log::debug;
use std::sync::Arc;
use tokio::io::AsyncRead;
use tokio_util::sync::CancellationToken;
use url::Url;
use urlencoding::encode;

/// Client for the Photos Library API.
///
/// ```no_run
/// # async fn run() -> Result<(), gphotos::errors::PhotosError> {
/// use futures::{pin_mut, StreamExt};
/// use gphotos::v1::{Client, SearchRequest};
///
/// let client = Client::new("access-token");
/// let items = client.search_stream(SearchRequest::in_album("album-id"));
/// pin_mut!(items);
/// while let Some(item) = items.next().await {
///     println!("{}", item?.id);
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

    /// Lower level client, shared by every clone of this one
    pub fn api_client(&self) -> &ApiClient {
        &self.api_client
    }

    /// Returns one page of the albums in the user's library
    pub async fn list_albums(
        &self,
        page_size: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<Page<Album>, PhotosError> {
        self.list::<AlbumsResponse>("/v1/albums", page_size, page_token)
            .await
    }

    /// Returns every album, fetching pages as the stream is polled
    pub fn albums(
        &self,
        page_size: Option<u32>,
    ) -> impl Stream<Item = Result<Album, PhotosError>> + use<> {
        let client = self.clone();
        walk_items(move |token: Option<String>| {
            let client = client.clone();
            async move { client.list_albums(page_size, token.as_deref()).await }
        })
    }

    pub async fn album(&self, album_id: &str) -> Result<Album, PhotosError> {
        self.api_client
            .get(&api_url(&format!("/v1/albums/{}", encode(album_id)))?, None)
            .await
    }

    pub async fn create_album(&self, title: &str) -> Result<Album, PhotosError> {
        let body = CreateAlbumRequest {
            album: NewAlbum { title },
        };
        self.api_client.post(&api_url("/v1/albums")?, &body).await
    }

    /// Returns one page of search results
    pub async fn search(&self, request: &SearchRequest) -> Result<Page<MediaItem>, PhotosError> {
        let req = ApiRequest::new(HttpMethod::Post, Url::parse(&api_url("/v1/mediaItems:search")?)?)
            .json(request)?;
        let resp = self.api_client.execute(req, ErrorFormat::JsonStatus).await?;
        parse_page::<MediaItemsResponse>(&resp.body)
    }

    /// Returns every search result, fetching pages as the stream is polled.
    ///
    /// Any `page_token` already set on the request is replaced.
    pub fn search_stream(
        &self,
        request: SearchRequest,
    ) -> impl Stream<Item = Result<MediaItem, PhotosError>> + use<> {
        let client = self.clone();
        walk_items(move |token: Option<String>| {
            let client = client.clone();
            let request = SearchRequest {
                page_token: token,
                ..request.clone()
            };
            async move { client.search(&request).await }
        })
    }

    /// Returns one page of the items in the user's library
    pub async fn list_media_items(
        &self,
        page_size: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<Page<MediaItem>, PhotosError> {
        self.list::<MediaItemsResponse>("/v1/mediaItems", page_size, page_token)
            .await
    }

    pub async fn media_item(&self, media_item_id: &str) -> Result<MediaItem, PhotosError> {
        self.api_client
            .get(
                &api_url(&format!("/v1/mediaItems/{}", encode(media_item_id)))?,
                None,
            )
            .await
    }

    /// Uploads bytes and returns the token needed to create a media item from them
    pub async fn upload<R, F>(
        &self,
        request: UploadRequest,
        reader: R,
        progress: F,
        cancel: &CancellationToken,
    ) -> Result<UploadToken, PhotosError>
    where
        R: AsyncRead + Send + Unpin + 'static,
        F: Fn(UploadProgress) + Send + Sync + 'static,
    {
        let mut session = UploadSession::new(request);
        session.negotiate(&self.api_client).await?;
        session
            .upload(&self.api_client, reader, progress, cancel)
            .await
    }

    pub async fn create_media_items(
        &self,
        request: &BatchCreateRequest,
    ) -> Result<BatchCreateResponse, PhotosError> {
        self.api_client
            .post(&api_url("/v1/mediaItems:batchCreate")?, request)
            .await
    }

    /// Uploads a file and creates a media item from it, optionally inside an album.
    ///
    /// No media item is created when the upload fails or is cancelled.
    pub async fn upload_file<R, F>(
        &self,
        request: UploadRequest,
        description: Option<&str>,
        album_id: Option<&str>,
        reader: R,
        progress: F,
        cancel: &CancellationToken,
    ) -> Result<MediaItem, PhotosError>
    where
        R: AsyncRead + Send + Unpin + 'static,
        F: Fn(UploadProgress) + Send + Sync + 'static,
    {
        let token = self.upload(request, reader, progress, cancel).await?;
        let batch = BatchCreateRequest {
            album_id: album_id.map(str::to_string),
            new_media_items: vec![NewMediaItem::from_upload(token.as_str(), description)],
            album_position: None,
        };
        let result = self
            .create_media_items(&batch)
            .await?
            .new_media_item_results
            .into_iter()
            .next()
            .ok_or(PhotosError::ResponseMissing())?;

        match (result.media_item, result.status) {
            (Some(item), _) => {
                debug!("created media item {}", item.id);
                Ok(item)
            }
            (None, Some(status)) => Err(PhotosError::ApiStatus {
                status: 200,
                error: status,
            }),
            (None, None) => Err(PhotosError::ResponseMissing()),
        }
    }

    async fn list<R: ListResponse>(
        &self,
        path: &str,
        page_size: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<Page<R::Item>, PhotosError> {
        let page_size = page_size.map(|s| s.to_string());
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(page_size) = page_size.as_deref() {
            params.push(("pageSize", page_size));
        }
        if let Some(page_token) = page_token.filter(|t| !t.is_empty()) {
            params.push(("pageToken", page_token));
        }
        let url = api_url(path)?;
        let req_url = if params.is_empty() {
            Url::parse(&url)?
        } else {
            Url::parse_with_params(&url, &params)?
        };
        let resp = self
            .api_client
            .execute(ApiRequest::new(HttpMethod::Get, req_url), ErrorFormat::JsonStatus)
            .await?;
        parse_page::<R>(&resp.body)
    }
}

fn api_url(path: &str) -> Result<String, PhotosError> {
    Ok(Url::parse(PHOTOS_API_ORIGIN)?.join(path)?.to_string())
}
