/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::api::BodyStream;
use crate::progress::{ProgressFn, progress_stream};
use bytes::Bytes;
use futures::{StreamExt, stream};
use std::io;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::io::AsyncRead;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

pub(crate) const DEFAULT_MEDIA_TYPE: &str = "image/jpeg";

/// `multipart/related` body made of an Atom entry followed by the media bytes.
pub(crate) struct RelatedBody {
    pub content_type: String,
    /// Only known when the media length is
    pub length: Option<u64>,
    pub stream: BodyStream,
}

pub(crate) struct MediaPart<R> {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub reader: R,
    pub length: Option<u64>,
}

/// Composes the body in one pass. Progress covers the media part only.
pub(crate) fn related_body<R>(
    entry_xml: &str,
    media: MediaPart<R>,
    progress: ProgressFn,
    cancel: CancellationToken,
) -> RelatedBody
where
    R: AsyncRead + Send + Unpin + 'static,
{
    let boundary = format!("END_OF_PART_{}", Uuid::new_v4().simple());
    let mime_type = media
        .mime_type
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(DEFAULT_MEDIA_TYPE);

    let head = Bytes::from(format!(
        "--{boundary}\r\n\
         Content-Type: application/atom+xml\r\n\r\n\
         {entry_xml}\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=file; filename=\"{}\"\r\n\
         Content-Type: {mime_type}\r\n\r\n",
        media.file_name.replace('"', "")
    ));
    let tail = Bytes::from(format!("\r\n--{boundary}--\r\n"));
    let length = media
        .length
        .map(|len| head.len() as u64 + len + tail.len() as u64);

    let body = progress_stream(
        media.reader,
        media.length,
        progress,
        cancel,
        Arc::new(AtomicU64::new(0)),
    );
    let stream = stream::once(async move { Ok::<_, io::Error>(head) })
        .chain(body)
        .chain(stream::once(async move { Ok(tail) }));

    RelatedBody {
        content_type: format!("multipart/related; boundary=\"{boundary}\""),
        length,
        stream: Box::pin(stream),
    }
}
