// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Universal Entity ID (RFC 9711 Section 4.2.1).

use crate::b64url::Base64UrlBytes;
use crate::cbor::{self, Decode as _, Encode as _};
use crate::error::{Error, Result};
use crate::json::{self, Decode as _, Encode as _};

/// Type byte of a UEID made of random bytes.
pub const UEID_TYPE_RAND: u8 = 0x01;

/// Type byte of a UEID holding an IEEE EUI (MAC address).
pub const UEID_TYPE_EUI: u8 = 0x02;

/// Type byte of a UEID holding a 3GPP IMEI.
pub const UEID_TYPE_IMEI: u8 = 0x03;

/// Ueid is a globally unique device identifier: a type byte followed by the
/// identifier itself. Decoding only checks the encoding, [`Ueid::validate`]
/// checks the type/length table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ueid(Base64UrlBytes);

impl Ueid {
    /// Creates a UEID from its raw bytes, type byte included.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Base64UrlBytes::new(bytes.into()))
    }

    /// Creates a UEID by prefixing the identifier with its type byte.
    pub fn with_type(kind: u8, id: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(1 + id.len());
        bytes.push(kind);
        bytes.extend_from_slice(id);
        Self::new(bytes)
    }

    /// Returns the raw bytes, type byte included.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Returns the type byte, or None for an empty UEID.
    pub fn kind(&self) -> Option<u8> {
        self.0.first().copied()
    }

    /// validate checks that the identifier length matches its type.
    pub fn validate(&self) -> Result<()> {
        let Some((&kind, id)) = self.as_bytes().split_first() else {
            return Err(Error::InvalidValue("empty UEID".into()));
        };
        let n = id.len();
        match kind {
            UEID_TYPE_RAND if !matches!(n, 16 | 24 | 32) => Err(Error::InvalidValue(format!(
                "RAND length must be exactly 16, 24, or 32 bytes; found {n} bytes"
            ))),
            UEID_TYPE_EUI if !matches!(n, 6 | 8) => Err(Error::InvalidValue(format!(
                "EUI length must be exactly 6 (EUI-48) or 8 (EUI-60 or EUI-64) bytes; found {n} bytes"
            ))),
            UEID_TYPE_IMEI if n != 14 => Err(Error::InvalidValue(format!(
                "IMEI length must be exactly 14 bytes; found {n} bytes"
            ))),
            UEID_TYPE_RAND | UEID_TYPE_EUI | UEID_TYPE_IMEI => Ok(()),
            _ => Err(Error::InvalidValue(format!("invalid UEID type {kind}"))),
        }
    }
}

impl cbor::Encode for Ueid {
    fn to_cbor(&self) -> Result<cbor::Value> {
        self.0.to_cbor()
    }
}

impl cbor::Decode for Ueid {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        Base64UrlBytes::from_cbor(value).map(Self)
    }
}

impl json::Encode for Ueid {
    fn to_json(&self) -> Result<json::Value> {
        self.0.to_json()
    }
}

impl json::Decode for Ueid {
    fn from_json(value: &json::Value) -> Result<Self> {
        Base64UrlBytes::from_json(value).map(Self)
    }
}
