// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Software manifests and measurements (RFC 9711 Sections 4.2.15 and 4.2.16).

use crate::b64url::Base64UrlBytes;
use crate::cbor::{self, Decode as _, Encode as _};
use crate::error::Result;
use crate::json::{self, Decode as _, Encode as _};

/// CoAP content format of a CoSWID tag in CBOR.
pub const CONTENT_FORMAT_COSWID: u64 = 258;

/// ContentFormat is an opaque document tagged with its CoAP content format:
/// `[content-type, content]`. It carries both manifests (e.g. CoSWID or SUIT)
/// and measurement evidence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentFormat {
    pub content_type: u64,
    pub content: Base64UrlBytes,
}

impl ContentFormat {
    /// Creates a tagged document.
    pub fn new(content_type: u64, content: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type,
            content: Base64UrlBytes::new(content.into()),
        }
    }

    /// encode_cbor wraps a CBOR document, such as a
    /// [`MeasuredComponent`](super::MeasuredComponent), under the given
    /// content type.
    pub fn encode_cbor<T: cbor::Encode + ?Sized>(content_type: u64, doc: &T) -> Result<Self> {
        Ok(Self::new(content_type, cbor::encode(doc)?))
    }

    /// decode_cbor parses the content as a CBOR document. The content type is
    /// not checked, callers know which types carry which documents.
    pub fn decode_cbor<T: cbor::Decode>(&self) -> Result<T> {
        cbor::decode(self.content.as_bytes())
    }
}

impl cbor::Encode for ContentFormat {
    fn to_cbor(&self) -> Result<cbor::Value> {
        Ok(cbor::Value::Array(vec![
            cbor::Value::from(self.content_type),
            self.content.to_cbor()?,
        ]))
    }
}

impl cbor::Decode for ContentFormat {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        let items = cbor::as_array_len(value, "content-format", 2, 2)?;
        Ok(Self {
            content_type: cbor::as_uint(&items[0], "content-type")?,
            content: Base64UrlBytes::from_cbor(&items[1]).map_err(|e| e.in_claim("content"))?,
        })
    }
}

impl json::Encode for ContentFormat {
    fn to_json(&self) -> Result<json::Value> {
        Ok(json::Value::Array(vec![
            json::Value::from(self.content_type),
            self.content.to_json()?,
        ]))
    }
}

impl json::Decode for ContentFormat {
    fn from_json(value: &json::Value) -> Result<Self> {
        let items = json::as_array_len(value, "content-format", 2, 2)?;
        Ok(Self {
            content_type: json::as_uint(&items[0], "content-type")?,
            content: Base64UrlBytes::from_json(&items[1]).map_err(|e| e.in_claim("content"))?,
        })
    }
}
