// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::b64url::Base64UrlBytes;
use crate::cbor::{self, Encode as _};
use crate::error::{Error, Result};
use crate::json::{self, Encode as _};

/// StringOrBinary is either a text string or a byte string, used for result
/// identifiers. In JSON both travel as strings, so any text that is valid
/// base64url decodes as binary; the empty string always decodes as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StringOrBinary {
    Text(String),
    Binary(Base64UrlBytes),
}

impl From<&str> for StringOrBinary {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for StringOrBinary {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<u8>> for StringOrBinary {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Binary(bytes.into())
    }
}

impl cbor::Encode for StringOrBinary {
    fn to_cbor(&self) -> Result<cbor::Value> {
        match self {
            Self::Text(text) => text.to_cbor(),
            Self::Binary(bytes) => bytes.to_cbor(),
        }
    }
}

impl cbor::Decode for StringOrBinary {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        match value {
            cbor::Value::Bytes(bytes) => Ok(Self::Binary(bytes.clone().into())),
            cbor::Value::Text(text) => Ok(Self::Text(text.clone())),
            _ => Err(Error::UnexpectedType {
                what: "string-or-binary",
                have: cbor::kind(value),
                want: "bstr or tstr",
            }),
        }
    }
}

impl json::Encode for StringOrBinary {
    fn to_json(&self) -> Result<json::Value> {
        match self {
            Self::Text(text) => text.to_json(),
            Self::Binary(bytes) => bytes.to_json(),
        }
    }
}

impl json::Decode for StringOrBinary {
    fn from_json(value: &json::Value) -> Result<Self> {
        let text = json::as_str(value, "string-or-binary")?;
        match Base64UrlBytes::from_base64url(text) {
            Ok(bytes) => Ok(Self::Binary(bytes)),
            Err(_) => Ok(Self::Text(text.to_owned())),
        }
    }
}
