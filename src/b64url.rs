// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Byte strings that are base64url encoded in JSON.
//!
//! RFC 9711 Section 7.2.2 maps every CBOR `bstr` to `base64-url-text` in JSON:
//! the URL and filename safe alphabet of RFC 4648 Section 5, no padding, no
//! line breaks, and at least one character.

use crate::error::{Error, Result};
use crate::{cbor, json};
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use std::ops::Deref;

/// Engine for base64url text: no padding on encode, padding refused on
/// decode, and non-zero leftover bits in the final symbol tolerated.
const BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

/// encode converts raw bytes into unpadded base64url text.
pub fn encode(bytes: &[u8]) -> String {
    BASE64URL.encode(bytes)
}

/// decode converts unpadded base64url text into raw bytes. Empty input is
/// rejected since the JSON grammar requires `[A-Za-z0-9_-]+`.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(Error::InvalidValue(
            "base64url must be a non-empty string".into(),
        ));
    }
    BASE64URL
        .decode(text)
        .map_err(|e| Error::InvalidValue(format!("base64url decode error: {e}")))
}

/// Base64UrlBytes is an owned byte string: a CBOR `bstr` in the binary format
/// and base64url text in the JSON format.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Base64UrlBytes(Vec<u8>);

impl Base64UrlBytes {
    /// Creates a byte string taking ownership of the buffer.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the wrapper, returning the buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Returns the base64url text form of the bytes.
    pub fn to_base64url(&self) -> String {
        encode(&self.0)
    }

    /// Parses the base64url text form of a byte string.
    pub fn from_base64url(text: &str) -> Result<Self> {
        decode(text).map(Self)
    }
}

impl Deref for Base64UrlBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Base64UrlBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Base64UrlBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Base64UrlBytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Base64UrlBytes {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl cbor::Encode for Base64UrlBytes {
    fn to_cbor(&self) -> Result<cbor::Value> {
        Ok(cbor::Value::Bytes(self.0.clone()))
    }
}

impl cbor::Decode for Base64UrlBytes {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        cbor::as_bytes(value, "bstr").map(|bytes| Self(bytes.to_vec()))
    }
}

impl json::Encode for Base64UrlBytes {
    fn to_json(&self) -> Result<json::Value> {
        Ok(json::Value::String(self.to_base64url()))
    }
}

impl json::Decode for Base64UrlBytes {
    fn from_json(value: &json::Value) -> Result<Self> {
        Self::from_base64url(json::as_str(value, "base64url")?)
    }
}
