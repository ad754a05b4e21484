// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! EAT profile identifier (RFC 9711 Section 4.3.2).

use crate::error::{Error, Result};
use crate::{cbor, json};
use const_oid::ObjectIdentifier;
use url::Url;

/// Profile names the document that pins down the options of a token, either
/// by an absolute URI or by an OID. In CBOR the OID is the content of its DER
/// encoding as a byte string; in JSON it is the dotted decimal text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Profile {
    Uri(Url),
    Oid(ObjectIdentifier),
}

impl Profile {
    /// Parses a profile URI, which must be absolute.
    pub fn from_uri(uri: &str) -> Result<Self> {
        Url::parse(uri)
            .map(Self::Uri)
            .map_err(|e| Error::InvalidValue(format!("profile {uri:?} is not an absolute URI: {e}")))
    }

    /// Parses a profile OID in dotted decimal form.
    pub fn from_oid(oid: &str) -> Result<Self> {
        ObjectIdentifier::new(oid)
            .map(Self::Oid)
            .map_err(|e| Error::InvalidValue(format!("profile {oid:?} is not an OID: {e}")))
    }
}

impl cbor::Encode for Profile {
    fn to_cbor(&self) -> Result<cbor::Value> {
        Ok(match self {
            Self::Uri(uri) => cbor::Value::Text(uri.as_str().to_owned()),
            Self::Oid(oid) => cbor::Value::Bytes(oid.as_bytes().to_vec()),
        })
    }
}

impl cbor::Decode for Profile {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        match value {
            cbor::Value::Text(uri) => Self::from_uri(uri),
            cbor::Value::Bytes(der) => ObjectIdentifier::from_bytes(der)
                .map(Self::Oid)
                .map_err(|e| Error::InvalidValue(format!("profile OID is malformed: {e}"))),
            _ => Err(Error::UnexpectedType {
                what: "profile",
                have: cbor::kind(value),
                want: "text string or byte string",
            }),
        }
    }
}

impl json::Encode for Profile {
    fn to_json(&self) -> Result<json::Value> {
        Ok(match self {
            Self::Uri(uri) => json::Value::from(uri.as_str()),
            Self::Oid(oid) => json::Value::from(oid.to_string()),
        })
    }
}

impl json::Decode for Profile {
    fn from_json(value: &json::Value) -> Result<Self> {
        let text = json::as_str(value, "profile")?;
        // Dotted decimal never contains the ':' every absolute URI has
        if text.contains(':') {
            Self::from_uri(text)
        } else {
            Self::from_oid(text)
        }
    }
}
