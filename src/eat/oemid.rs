// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Hardware OEM identifier (RFC 9711 Section 4.2.3).

use crate::b64url::Base64UrlBytes;
use crate::cbor::{self, Decode as _, Encode as _};
use crate::error::{Error, Result};
use crate::json::{self, Decode as _, Encode as _};

/// Length of an OEMID holding an IEEE OUI/MA-L.
pub const OEMID_IEEE_SIZE: usize = 3;

/// Length of an OEMID made of random bytes.
pub const OEMID_RANDOM_SIZE: usize = 16;

/// Oemid identifies the hardware manufacturer. The OEM can be identified by
/// an IANA Private Enterprise Number, a 3-byte IEEE OUI or a 16-byte random
/// ID. The byte length is checked on decode and again on encode, so a value
/// built with [`Oemid::from_bytes`] may fail to encode.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Oemid {
    Pen(i64),
    Bytes(Base64UrlBytes),
}

impl Oemid {
    /// Creates an OEMID from an IANA Private Enterprise Number.
    pub fn new_pen(pen: i64) -> Self {
        Self::Pen(pen)
    }

    /// Creates an OEMID from a 3-byte IEEE OUI/MA-L.
    pub fn new_ieee(id: [u8; OEMID_IEEE_SIZE]) -> Self {
        Self::Bytes(id.into())
    }

    /// Creates an OEMID from a 16-byte random manufacturer identifier.
    pub fn new_random(id: [u8; OEMID_RANDOM_SIZE]) -> Self {
        Self::Bytes(id.into())
    }

    /// Creates a byte OEMID without checking its length.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(Base64UrlBytes::new(bytes.into()))
    }

    /// Returns the IANA Private Enterprise Number, or None if this is not a PEN OEM ID.
    pub fn pen(&self) -> Option<i64> {
        match self {
            Self::Pen(pen) => Some(*pen),
            Self::Bytes(_) => None,
        }
    }

    /// Returns the 3-byte IEEE OUI/MA-L, or None if this is not an IEEE OEM ID.
    pub fn ieee(&self) -> Option<[u8; OEMID_IEEE_SIZE]> {
        match self {
            Self::Bytes(bytes) => bytes.as_bytes().try_into().ok(),
            Self::Pen(_) => None,
        }
    }

    /// Returns the 16-byte random OEM ID, or None if this is not a random OEM ID.
    pub fn random(&self) -> Option<[u8; OEMID_RANDOM_SIZE]> {
        match self {
            Self::Bytes(bytes) => bytes.as_bytes().try_into().ok(),
            Self::Pen(_) => None,
        }
    }

    /// validate checks the byte length of a byte OEMID. PENs are always valid.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Pen(_) => Ok(()),
            Self::Bytes(bytes) => check_len(bytes.len()),
        }
    }
}

fn check_len(n: usize) -> Result<()> {
    match n {
        OEMID_IEEE_SIZE | OEMID_RANDOM_SIZE => Ok(()),
        _ => Err(Error::InvalidValue(format!(
            "OEMID bytes must be {OEMID_IEEE_SIZE} (IEEE) or {OEMID_RANDOM_SIZE} (random) long; found {n} bytes"
        ))),
    }
}

fn check_encodable(bytes: &Base64UrlBytes) -> Result<()> {
    check_len(bytes.len()).map_err(|e| Error::Unencodable {
        what: "oemid",
        reason: e.to_string(),
    })
}

/// neither reports a node that is not an OEMID under either interpretation.
fn neither(pen: Error, bytes: Error) -> Error {
    Error::InvalidValue(format!(
        "OEMID is neither a PEN ({pen}) nor an IEEE or random ID ({bytes})"
    ))
}

impl cbor::Encode for Oemid {
    fn to_cbor(&self) -> Result<cbor::Value> {
        match self {
            Self::Pen(pen) => Ok(cbor::Value::from(*pen)),
            Self::Bytes(bytes) => {
                check_encodable(bytes)?;
                bytes.to_cbor()
            }
        }
    }
}

impl cbor::Decode for Oemid {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        let pen_err = match cbor::as_int(value, "oemid") {
            Ok(pen) => return Ok(Self::Pen(pen)),
            Err(e) => e,
        };
        let bytes = Base64UrlBytes::from_cbor(value)
            .and_then(|bytes| check_len(bytes.len()).map(|_| bytes))
            .map_err(|e| neither(pen_err, e))?;
        Ok(Self::Bytes(bytes))
    }
}

impl json::Encode for Oemid {
    fn to_json(&self) -> Result<json::Value> {
        match self {
            Self::Pen(pen) => Ok(json::Value::from(*pen)),
            Self::Bytes(bytes) => {
                check_encodable(bytes)?;
                bytes.to_json()
            }
        }
    }
}

impl json::Decode for Oemid {
    fn from_json(value: &json::Value) -> Result<Self> {
        let pen_err = match json::as_int(value, "oemid") {
            Ok(pen) => return Ok(Self::Pen(pen)),
            Err(e) => e,
        };
        let bytes = Base64UrlBytes::from_json(value)
            .and_then(|bytes| check_len(bytes.len()).map(|_| bytes))
            .map_err(|e| neither(pen_err, e))?;
        Ok(Self::Bytes(bytes))
    }
}
