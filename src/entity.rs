/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

/// Identity shared by every parsed album, photo, media item and comment.
pub trait Entity {
    /// Stable identifier assigned by the service
    fn id(&self) -> &str;

    /// Version token for optimistic concurrency. Only legacy feed entries carry one.
    fn etag(&self) -> Option<&str> {
        None
    }
}
