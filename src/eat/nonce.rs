// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Freshness nonce (RFC 9711 Section 4.1).

use crate::b64url::Base64UrlBytes;
use crate::cbor::{self, Decode as _, Encode as _};
use crate::error::{Error, Result, check_array_len};
use crate::json::{self, Decode as _, Encode as _};

/// Smallest nonce a token may carry, in bytes.
pub const NONCE_MIN_SIZE: usize = 8;

/// Largest nonce a token may carry, in bytes.
pub const NONCE_MAX_SIZE: usize = 64;

/// Nonce holds one or more freshness values supplied by relying parties. A
/// single nonce is written as a bare byte string, several as an array.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Nonce(Vec<Base64UrlBytes>);

impl Nonce {
    /// Creates a nonce claim holding a single value.
    pub fn new(nonce: impl Into<Vec<u8>>) -> Self {
        Self(vec![Base64UrlBytes::new(nonce.into())])
    }

    /// Creates a nonce claim holding several values. An empty list has no
    /// encoding.
    pub fn from_values(nonces: Vec<Base64UrlBytes>) -> Self {
        Self(nonces)
    }

    /// Returns the individual nonce values.
    pub fn values(&self) -> &[Base64UrlBytes] {
        &self.0
    }

    /// validate checks that each nonce is within the allowed size bounds.
    pub fn validate(&self) -> Result<()> {
        check_array_len("nonce", self.0.len(), 1, usize::MAX)?;
        for nonce in &self.0 {
            let n = nonce.len();
            if !(NONCE_MIN_SIZE..=NONCE_MAX_SIZE).contains(&n) {
                return Err(Error::InvalidValue(format!(
                    "nonce length must be between {NONCE_MIN_SIZE} and {NONCE_MAX_SIZE} bytes; found {n} bytes"
                )));
            }
        }
        Ok(())
    }

    fn check_encodable(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(Error::Unencodable {
                what: "nonce",
                reason: "no values".into(),
            });
        }
        Ok(())
    }
}

impl cbor::Encode for Nonce {
    fn to_cbor(&self) -> Result<cbor::Value> {
        self.check_encodable()?;
        match self.0.as_slice() {
            [nonce] => nonce.to_cbor(),
            nonces => nonces
                .iter()
                .map(|n| n.to_cbor())
                .collect::<Result<_>>()
                .map(cbor::Value::Array),
        }
    }
}

impl cbor::Decode for Nonce {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        match value {
            cbor::Value::Array(items) => {
                check_array_len("nonce", items.len(), 1, usize::MAX)?;
                Vec::from_cbor(value).map(Self)
            }
            _ => Base64UrlBytes::from_cbor(value).map(|nonce| Self(vec![nonce])),
        }
    }
}

impl json::Encode for Nonce {
    fn to_json(&self) -> Result<json::Value> {
        self.check_encodable()?;
        match self.0.as_slice() {
            [nonce] => nonce.to_json(),
            nonces => nonces
                .iter()
                .map(|n| n.to_json())
                .collect::<Result<_>>()
                .map(json::Value::Array),
        }
    }
}

impl json::Decode for Nonce {
    fn from_json(value: &json::Value) -> Result<Self> {
        match value {
            json::Value::Array(items) => {
                check_array_len("nonce", items.len(), 1, usize::MAX)?;
                Vec::from_json(value).map(Self)
            }
            _ => Base64UrlBytes::from_json(value).map(|nonce| Self(vec![nonce])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    // Tests that a single nonce is written bare and several as an array.
    #[test]
    fn test_shapes() {
        let single = Nonce::new([0x01u8; 8]);
        let blob = cbor::encode(&single).expect("encode");
        assert_eq!(blob, hex::decode("480101010101010101").expect("hex"));
        assert_eq!(cbor::decode::<Nonce>(&blob).expect("decode"), single);
        assert_eq!(json::encode(&single).expect("encode"), br#""AQEBAQEBAQE""#);

        let multi = Nonce::from_values(vec![[0x01u8; 8].into(), [0x02u8; 8].into()]);
        let blob = cbor::encode(&multi).expect("encode");
        assert_eq!(blob[0], 0x82);
        assert_eq!(cbor::decode::<Nonce>(&blob).expect("decode"), multi);

        let blob = json::encode(&multi).expect("encode");
        assert_eq!(blob, br#"["AQEBAQEBAQE","AgICAgICAgI"]"#);
        assert_eq!(json::decode::<Nonce>(&blob).expect("decode"), multi);
    }

    // Tests the size bounds of the validator.
    #[test]
    fn test_validate() {
        Nonce::new([0u8; 8]).validate().expect("8 bytes");
        Nonce::new([0u8; 64]).validate().expect("64 bytes");
        Nonce::new([0u8; 7]).validate().expect_err("7 bytes");
        Nonce::new(vec![0u8; 65]).validate().expect_err("65 bytes");
        Nonce::from_values(vec![[0u8; 8].into(), [0u8; 4].into()])
            .validate()
            .expect_err("second nonce too short");
    }

    // Tests that empty nonce lists are refused both ways.
    #[test]
    fn test_empty() {
        let err = json::decode::<Nonce>(b"[]").expect_err("empty array");
        assert_eq!(err.kind(), ErrorKind::Structural);
        cbor::decode::<Nonce>(&[0x80]).expect_err("empty array");

        let err = cbor::encode(&Nonce::from_values(vec![])).expect_err("no values");
        assert_eq!(err.kind(), ErrorKind::Encode);
    }
}
