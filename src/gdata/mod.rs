/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Legacy Atom/XML feed API (`GData-Version: 2`).

pub mod album;
pub mod client;
pub mod comment;
pub mod feed;
pub mod geo;
mod macros;
pub mod media;
pub mod metadata;
mod multipart;
pub mod namespaces;
pub mod photo;
pub mod properties;
pub mod xml;
pub mod xml_writer;

pub use album::*;
pub use client::*;
pub use comment::*;
pub use feed::*;
pub use geo::*;
pub use media::*;
pub use metadata::*;
pub use photo::*;
pub use properties::*;
