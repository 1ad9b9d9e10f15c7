/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Photos Library REST API (JSON).

pub mod album;
pub mod client;
pub mod filters;
pub mod media_item;
pub mod page;
mod parsers;
pub mod search;
pub mod status;
pub mod upload;

pub use album::*;
pub use client::*;
pub use filters::*;
pub use media_item::*;
pub use page::*;
pub use search::*;
pub use status::*;
pub use upload::*;
