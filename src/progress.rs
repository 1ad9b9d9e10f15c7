/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use async_stream::try_stream;
use bytes::Bytes;
use futures::Stream;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;

// Size of each read from the caller's source
pub(crate) const UPLOAD_CHUNK_SIZE: usize = 256 * 1024;

/// Reported to progress callbacks while an upload body is being sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    /// Bytes handed to the transport so far
    pub bytes_sent: u64,
    /// Declared length of the upload when known
    pub total_bytes: Option<u64>,
}

pub(crate) type ProgressFn = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// Streams `reader` in chunks, reporting cumulative progress after each chunk is taken by the
/// transport. The cancellation token is checked before every read; once cancelled the stream
/// ends with an `Interrupted` error, which aborts the request.
pub(crate) fn progress_stream<R>(
    reader: R,
    total_bytes: Option<u64>,
    progress: ProgressFn,
    cancel: CancellationToken,
    sent: Arc<AtomicU64>,
) -> impl Stream<Item = Result<Bytes, io::Error>> + Send + 'static
where
    R: AsyncRead + Send + Unpin + 'static,
{
    try_stream! {
        let mut reader = reader;
        let mut buf = vec![0u8; UPLOAD_CHUNK_SIZE];
        loop {
            if cancel.is_cancelled() {
                Err::<(), io::Error>(io::Error::new(io::ErrorKind::Interrupted, "upload cancelled"))?;
            }
            let read = reader.read(&mut buf).await?;
            if read == 0 {
                break;
            }
            yield Bytes::copy_from_slice(&buf[..read]);

            let bytes_sent = sent.fetch_add(read as u64, Ordering::SeqCst) + read as u64;
            progress(UploadProgress {
                bytes_sent,
                total_bytes,
            });
        }
    }
}
