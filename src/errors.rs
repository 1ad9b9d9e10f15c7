/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::v1::{Status, UploadState};
use std::io;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum PhotosError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Request network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Text is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Namespace prefix `{0}` is not bound")]
    UnboundPrefix(String),

    #[error("Mandatory element missing: {0}")]
    MissingElement(&'static str),

    #[error("Invalid number in `{field}`: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid date in `{field}`: {value:?}")]
    InvalidDate { field: &'static str, value: String },

    #[error("Invalid value in `{field}`: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Expected response header missing: {0}")]
    MissingHeader(&'static str),

    #[error("Expected response missing")]
    ResponseMissing(),

    #[error("API Response was error: {status}, body: {body}")]
    ApiResponse { status: u16, body: String },

    #[error("API Response was error: {status}, {error}")]
    ApiStatus { status: u16, error: Status },

    #[error("Precondition failed ({status}), the entity was modified: {body}")]
    PreconditionFailed { status: u16, body: String },

    #[error("Upload cancelled")]
    Cancelled,

    #[error("Upload session is {actual:?}, expected {expected:?}")]
    UploadState {
        expected: UploadState,
        actual: UploadState,
    },

    #[error("Failed serializing to XML: {0}")]
    XmlSerialization(String),
}

impl PhotosError {
    /// True when the service rejected a mutation because the supplied ETag is stale.
    pub fn is_conflict(&self) -> bool {
        matches!(self, PhotosError::PreconditionFailed { .. })
    }

    /// True when the caller cancelled the operation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PhotosError::Cancelled)
    }
}
