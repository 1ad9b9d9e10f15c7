/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # Google Photos
//!
//! Client library for the two generations of the Google Photos web API.
//!
//! ## Features
//!
//! - Legacy Picasa Web Albums feeds ([`gdata`])
//!     - Account metadata, albums, photos, comments and photo search
//!     - Namespace aware parsing of the Atom/XML documents
//!     - Create, update and delete albums and photos, guarded by ETags
//!     - Photo upload as a single `multipart/related` request
//! - Photos Library API ([`v1`])
//!     - Albums, media items and filtered search
//!     - Token based paging exposed as lazy streams
//!     - Resumable upload with progress reporting and cancellation
//! - Lower level interface for the raw communication ([`api::ApiClient`], [`api::Transport`])
//!
//! *Both APIs authenticate with an OAuth2 bearer token. Getting the token is left up to the
//! consumer of this library*
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! gphotos = "0.1.0"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use futures::{pin_mut, StreamExt};
//! use gphotos::v1::{Client, UploadRequest};
//! use tokio_util::sync::CancellationToken;
//!
//! async fn upload_and_list(access_token: &str) -> anyhow::Result<()> {
//!     let client = Client::new(access_token);
//!
//!     // Upload a file and create a media item for it
//!     let file = tokio::fs::File::open("beach.jpg").await?;
//!     let length = file.metadata().await?.len();
//!     let cancel = CancellationToken::new();
//!     let item = client
//!         .upload_file(
//!             UploadRequest::new("beach.jpg", "image/jpeg", Some(length)),
//!             Some("At the beach"),
//!             None,
//!             file,
//!             |p| println!("{} of {:?} bytes", p.bytes_sent, p.total_bytes),
//!             &cancel,
//!         )
//!         .await?;
//!     println!("created {}", item.id);
//!
//!     // Iterate over every album, pages are requested as needed
//!     let albums = client.albums(Some(50));
//!     pin_mut!(albums);
//!     while let Some(album) = albums.next().await {
//!         println!("{}", album?);
//!     }
//!     Ok(())
//! }
//! ```
//!
pub mod api;
pub mod entity;
pub mod errors;
pub mod etag;
pub mod gdata;
pub mod progress;
pub mod v1;

pub use entity::Entity;
pub use errors::PhotosError;
pub use progress::UploadProgress;
