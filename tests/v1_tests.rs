/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

#[cfg(test)]
mod test {
    use crate::helpers;
    use crate::helpers::{ScriptedTransport, response, response_with_headers};
    use dotenvy::dotenv;
    use futures::{StreamExt, TryStreamExt, pin_mut};
    use gphotos::PhotosError;
    use gphotos::api::{ApiClient, HttpMethod};
    use gphotos::v1::{
        Client, Date, DateFilter, DateRange, Filters, SearchRequest, UploadRequest, UploadSession,
        UploadState,
    };
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};
    use tokio_util::sync::CancellationToken;

    const SESSION_URL: &str = "https://photoslibrary.googleapis.com/v1/uploads?upload_id=abc&upload_protocol=resumable";

    fn client(transport: &Arc<ScriptedTransport>) -> Client {
        Client::with_transport(transport.clone(), "test-token")
    }

    fn negotiated() -> gphotos::api::ApiResponse {
        response_with_headers(
            200,
            &[
                ("x-goog-upload-url", SESSION_URL),
                ("x-goog-upload-chunk-granularity", "262144"),
                ("x-goog-upload-status", "active"),
            ],
            "",
        )
    }

    #[tokio::test]
    async fn albums_stream_walks_every_page() {
        let transport = ScriptedTransport::new();
        transport.push(response(
            200,
            r#"{"albums":[{"id":"a1","title":"One"},{"id":"a2","title":"Two"}],"nextPageToken":"t1"}"#,
        ));
        transport.push(response(
            200,
            r#"{"albums":[{"id":"a3","mediaItemsCount":"12"}],"nextPageToken":"t2"}"#,
        ));
        transport.push(response(200, "{}"));

        let albums: Vec<_> = client(&transport)
            .albums(Some(50))
            .try_collect()
            .await
            .unwrap();
        let ids: Vec<_> = albums.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2", "a3"]);
        assert_eq!(albums[2].media_items_count, Some(12));

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].url.path(), "/v1/albums");
        assert_eq!(requests[0].query("pageSize").as_deref(), Some("50"));
        assert_eq!(requests[0].query("pageToken"), None);
        assert_eq!(requests[1].query("pageToken").as_deref(), Some("t1"));
        assert_eq!(requests[2].query("pageToken").as_deref(), Some("t2"));
        assert_eq!(requests[0].header("Authorization"), Some("Bearer test-token"));
    }

    #[tokio::test]
    async fn albums_stream_is_lazy() {
        let transport = ScriptedTransport::new();
        transport.push(response(
            200,
            r#"{"albums":[{"id":"a1"}],"nextPageToken":"t1"}"#,
        ));

        let albums = client(&transport).albums(None);
        pin_mut!(albums);
        assert!(transport.requests().is_empty());
        let first = albums.next().await.unwrap().unwrap();
        assert_eq!(first.id, "a1");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn search_stream_sends_token_in_body() {
        let transport = ScriptedTransport::new();
        transport.push(response(
            200,
            r#"{"mediaItems":[{"id":"m1","filename":"a.jpg"}],"nextPageToken":"n1"}"#,
        ));
        transport.push(response(200, r#"{"mediaItems":[{"id":"m2"}],"nextPageToken":""}"#));

        let request = SearchRequest {
            page_size: Some(100),
            ..SearchRequest::in_album("album-1")
        };
        let items: Vec<_> = client(&transport)
            .search_stream(request)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].filename.as_deref(), Some("a.jpg"));

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].url.path(), "/v1/mediaItems:search");
        assert_eq!(requests[0].header("Content-Type"), Some("application/json"));
        let first = requests[0].body_json();
        assert_eq!(first["albumId"], "album-1");
        assert_eq!(first["pageSize"], 100);
        assert!(first.get("pageToken").is_none());
        let second = requests[1].body_json();
        assert_eq!(second["pageToken"], "n1");
        assert_eq!(second["albumId"], "album-1");
    }

    #[tokio::test]
    async fn search_with_date_filter() {
        let transport = ScriptedTransport::new();
        transport.push(response(200, "{}"));

        let filters = Filters {
            date_filter: Some(DateFilter {
                dates: vec![],
                ranges: vec![DateRange {
                    start_date: Date::new(2023, 1, 1),
                    end_date: Date::new(2023, 12, 31),
                }],
            }),
            ..Default::default()
        };
        let page = client(&transport)
            .search(&SearchRequest::with_filters(filters))
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert!(page.is_last());

        let body = transport.requests()[0].body_json();
        assert_eq!(
            body["filters"]["dateFilter"]["ranges"][0]["startDate"]["year"],
            2023
        );
        assert!(body.get("albumId").is_none());
    }

    #[tokio::test]
    async fn upload_file_negotiates_uploads_and_creates() {
        let transport = ScriptedTransport::new();
        transport.push(negotiated());
        transport.push(response(200, "upload-token-1\n"));
        transport.push(response(
            200,
            r#"{"newMediaItemResults":[{
                "uploadToken":"upload-token-1",
                "status":{"message":"Success"},
                "mediaItem":{"id":"m1","filename":"beach.jpg","mimeType":"image/jpeg"}
            }]}"#,
        ));

        let reported = Arc::new(Mutex::new(Vec::new()));
        let sink = reported.clone();
        let data = b"0123456789".to_vec();
        let item = client(&transport)
            .upload_file(
                UploadRequest::new("beach day.jpg", "image/jpeg", Some(10)),
                Some("At the beach"),
                Some("album-1"),
                Cursor::new(data),
                move |p| sink.lock().unwrap().push((p.bytes_sent, p.total_bytes)),
                &CancellationToken::new(),
            )
            .await
            .unwrap();
        assert_eq!(item.id, "m1");
        assert_eq!(*reported.lock().unwrap(), vec![(10, Some(10))]);

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);

        let start = &requests[0];
        assert_eq!(start.url.path(), "/v1/uploads");
        assert_eq!(start.header("X-Goog-Upload-Command"), Some("start"));
        assert_eq!(start.header("X-Goog-Upload-Protocol"), Some("resumable"));
        assert_eq!(start.header("X-Goog-Upload-Content-Type"), Some("image/jpeg"));
        assert_eq!(start.header("X-Goog-Upload-File-Name"), Some("beach%20day.jpg"));
        assert_eq!(start.header("X-Goog-Upload-Raw-Size"), Some("10"));

        let upload = &requests[1];
        assert_eq!(upload.url.as_str(), SESSION_URL);
        assert_eq!(upload.header("X-Goog-Upload-Command"), Some("upload, finalize"));
        assert_eq!(upload.header("X-Goog-Upload-Offset"), Some("0"));
        assert_eq!(upload.body, b"0123456789");

        let create = &requests[2];
        assert_eq!(create.url.path(), "/v1/mediaItems:batchCreate");
        let body = create.body_json();
        assert_eq!(body["albumId"], "album-1");
        assert_eq!(
            body["newMediaItems"][0]["simpleMediaItem"]["uploadToken"],
            "upload-token-1"
        );
        assert_eq!(body["newMediaItems"][0]["description"], "At the beach");
    }

    #[tokio::test]
    async fn upload_file_cancelled_creates_nothing() {
        let transport = ScriptedTransport::new();
        transport.push(negotiated());
        transport.push(response(200, "upload-token-1"));

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let data = vec![0u8; 700 * 1024];
        let err = client(&transport)
            .upload_file(
                UploadRequest::new("big.mp4", "video/mp4", Some(data.len() as u64)),
                None,
                None,
                Cursor::new(data),
                move |_| trigger.cancel(),
                &cancel,
            )
            .await
            .unwrap_err();
        assert!(err.is_cancelled());

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.url.path() != "/v1/mediaItems:batchCreate"));
    }

    #[tokio::test]
    async fn upload_session_fails_on_cancel() {
        let transport = ScriptedTransport::new();
        transport.push(negotiated());

        let api = ApiClient::with_transport(transport.clone(), "test-token");
        let mut session = UploadSession::new(UploadRequest::new("big.bin", "application/zip", None));
        session.negotiate(&api).await.unwrap();
        assert_eq!(session.state(), UploadState::Negotiated);
        assert_eq!(session.chunk_granularity(), 262144);

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let err = session
            .upload(
                &api,
                Cursor::new(vec![1u8; 300 * 1024]),
                move |_| trigger.cancel(),
                &cancel,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PhotosError::Cancelled));
        assert_eq!(session.state(), UploadState::Failed);
        assert_eq!(session.bytes_sent(), 256 * 1024);
    }

    #[tokio::test]
    async fn negotiate_error_is_verbatim() {
        let transport = ScriptedTransport::new();
        transport.push(response(400, "Bad upload request: missing file name"));

        let err = client(&transport)
            .upload_file(
                UploadRequest::new("x.jpg", "image/jpeg", Some(1)),
                None,
                None,
                Cursor::new(vec![1u8]),
                |_| {},
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        match err {
            PhotosError::ApiResponse { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "Bad upload request: missing file name");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn batch_status_without_item_is_error() {
        let transport = ScriptedTransport::new();
        transport.push(negotiated());
        transport.push(response(200, "upload-token-2"));
        transport.push(response(
            200,
            r#"{"newMediaItemResults":[{
                "uploadToken":"upload-token-2",
                "status":{"code":3,"message":"Failed: There was an error while trying to create this media item."}
            }]}"#,
        ));

        let err = client(&transport)
            .upload_file(
                UploadRequest::new("x.jpg", "image/jpeg", Some(1)),
                None,
                None,
                Cursor::new(vec![1u8]),
                |_| {},
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        match err {
            PhotosError::ApiStatus { status, error } => {
                assert_eq!(status, 200);
                assert_eq!(error.code, 3);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn json_status_error() {
        let transport = ScriptedTransport::new();
        transport.push(response(
            400,
            r#"{"error":{"code":400,"message":"Request contains an invalid argument.","status":"INVALID_ARGUMENT"}}"#,
        ));

        let err = client(&transport)
            .list_media_items(Some(1000), None)
            .await
            .unwrap_err();
        match err {
            PhotosError::ApiStatus { status, error } => {
                assert_eq!(status, 400);
                assert_eq!(error.status.as_deref(), Some("INVALID_ARGUMENT"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn conflict_keeps_json_status() {
        let transport = ScriptedTransport::new();
        transport.push(response(
            409,
            r#"{"error":{"code":409,"message":"The operation was aborted.","status":"ABORTED"}}"#,
        ));

        let err = client(&transport).create_album("Trip").await.unwrap_err();
        assert!(!err.is_conflict());
        match err {
            PhotosError::ApiStatus { status, error } => {
                assert_eq!(status, 409);
                assert_eq!(error.status.as_deref(), Some("ABORTED"));
                assert_eq!(error.message, "The operation was aborted.");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_album_posts_title() {
        let transport = ScriptedTransport::new();
        transport.push(response(
            200,
            r#"{"id":"a9","title":"Trip","isWriteable":true}"#,
        ));

        let album = client(&transport).create_album("Trip").await.unwrap();
        assert_eq!(album.id, "a9");
        assert_eq!(album.is_writeable, Some(true));

        let body = transport.requests()[0].body_json();
        assert_eq!(body["album"]["title"], "Trip");
    }

    #[tokio::test]
    async fn media_item_id_is_encoded() {
        let transport = ScriptedTransport::new();
        transport.push(response(200, r#"{"id":"a/b"}"#));

        let item = client(&transport).media_item("a/b").await.unwrap();
        assert_eq!(item.id, "a/b");
        assert_eq!(transport.requests()[0].url.path(), "/v1/mediaItems/a%2Fb");
    }

    #[tokio::test]
    #[ignore] // Needs a live access token, see helpers::get_access_token
    async fn live_list_albums() {
        dotenv().ok();
        let _ = env_logger::try_init();
        let client = Client::new(&helpers::get_access_token().unwrap());
        let albums = client.albums(Some(50));
        pin_mut!(albums);
        while let Some(album) = albums.next().await {
            println!("{}", album.unwrap());
        }
    }
}
