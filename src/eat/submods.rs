// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Submodules (RFC 9711 Section 4.2.18).

use super::Eat;
use super::measured_component::Digest;
use crate::b64url::Base64UrlBytes;
use crate::cbor::{self, Decode as _, Encode as _};
use crate::error::{Error, Result};
use crate::json::{self, Decode as _, Encode as _};

/// Submodule describes a part of the entity. Its claims are either inlined
/// as a nested claims set, detached and represented by their digest, or
/// carried as a separately secured token.
#[derive(Clone, Debug, PartialEq)]
pub enum Submodule {
    Claims(Box<Eat>),
    Digest(Digest),
    Token(Base64UrlBytes),
}

impl From<Eat> for Submodule {
    fn from(claims: Eat) -> Self {
        Self::Claims(Box::new(claims))
    }
}

impl cbor::Encode for Submodule {
    fn to_cbor(&self) -> Result<cbor::Value> {
        match self {
            Self::Claims(claims) => claims.to_cbor(),
            Self::Digest(digest) => digest.to_cbor(),
            Self::Token(token) => token.to_cbor(),
        }
    }
}

impl cbor::Decode for Submodule {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        match value {
            cbor::Value::Map(_) => Eat::from_cbor(value).map(Self::from),
            cbor::Value::Array(_) => Digest::from_cbor(value).map(Self::Digest),
            cbor::Value::Bytes(_) => Base64UrlBytes::from_cbor(value).map(Self::Token),
            _ => Err(Error::UnexpectedType {
                what: "submodule",
                have: cbor::kind(value),
                want: "map, array or byte string",
            }),
        }
    }
}

impl json::Encode for Submodule {
    fn to_json(&self) -> Result<json::Value> {
        match self {
            Self::Claims(claims) => claims.to_json(),
            Self::Digest(digest) => digest.to_json(),
            Self::Token(token) => token.to_json(),
        }
    }
}

impl json::Decode for Submodule {
    fn from_json(value: &json::Value) -> Result<Self> {
        match value {
            json::Value::Object(_) => Eat::from_json(value).map(Self::from),
            json::Value::Array(_) => Digest::from_json(value).map(Self::Digest),
            json::Value::String(_) => Base64UrlBytes::from_json(value).map(Self::Token),
            _ => Err(Error::UnexpectedType {
                what: "submodule",
                have: json::kind(value),
                want: "object, array or string",
            }),
        }
    }
}
