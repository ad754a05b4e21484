// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Proof-of-possession key confirmation (RFC 8747 and RFC 7800).

use crate::b64url::Base64UrlBytes;
use crate::error::{Error, Result};
use crate::{cbor, json};

/// COSE key type of octet key pairs (RFC 9053 Section 7.2).
pub const COSE_KTY_OKP: i64 = 1;

/// COSE_Key label of the key type.
const COSE_KEY_KTY: i64 = 1;

/// COSE_Key label of the OKP curve.
const COSE_KEY_CRV: i64 = -1;

/// COSE_Key label of the OKP public key bytes.
const COSE_KEY_X: i64 = -2;

/// ConfirmationKey is an embedded public key. The key node is carried
/// verbatim: a COSE_Key map in CBOR or a JWK object in JSON. Neither is
/// converted into the other, so a key can only be written in the format it
/// was read from.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfirmationKey {
    Cose(cbor::Value),
    Jwk(json::Value),
}

impl ConfirmationKey {
    /// Creates a minimal OKP COSE_Key `{1: kty, -1: crv, -2: x}`.
    pub fn cose_okp(crv: i64, x: &[u8]) -> Self {
        Self::Cose(cbor::Value::Map(vec![
            (cbor::Value::from(COSE_KEY_KTY), cbor::Value::from(COSE_KTY_OKP)),
            (cbor::Value::from(COSE_KEY_CRV), cbor::Value::from(crv)),
            (cbor::Value::from(COSE_KEY_X), cbor::Value::Bytes(x.to_vec())),
        ]))
    }
}

impl cbor::Encode for ConfirmationKey {
    fn to_cbor(&self) -> Result<cbor::Value> {
        match self {
            Self::Cose(key) => Ok(key.clone()),
            Self::Jwk(_) => Err(Error::Unencodable {
                what: "confirmation key",
                reason: "a JWK has no CBOR form".into(),
            }),
        }
    }
}

impl cbor::Decode for ConfirmationKey {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        cbor::as_map(value, "COSE_Key")?;
        Ok(Self::Cose(value.clone()))
    }
}

impl json::Encode for ConfirmationKey {
    fn to_json(&self) -> Result<json::Value> {
        match self {
            Self::Jwk(key) => Ok(key.clone()),
            Self::Cose(_) => Err(Error::Unencodable {
                what: "confirmation key",
                reason: "a COSE_Key has no JSON form".into(),
            }),
        }
    }
}

impl json::Decode for ConfirmationKey {
    fn from_json(value: &json::Value) -> Result<Self> {
        json::as_object(value, "JWK")?;
        Ok(Self::Jwk(value.clone()))
    }
}

claims_set! {
    /// KeyConfirmation binds a key to the token via the cnf claim, either by
    /// embedding it, by naming it or by its thumbprint.
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct KeyConfirmation {
        /// Embedded public key.
        key: ConfirmationKey = 1, "jwk";
        /// Identifier of a key known to the recipient.
        kid: Base64UrlBytes = 3, "kid";
        /// Thumbprint of the key.
        thumbprint: Base64UrlBytes = 5, "jkt";
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    // Tests that an embedded COSE_Key is framed as-is.
    #[test]
    fn test_cose_key() {
        let cnf = KeyConfirmation {
            key: Some(ConfirmationKey::cose_okp(6, &[0xab; 32])),
            ..Default::default()
        };
        let blob = cbor::encode(&cnf).expect("encode");
        assert_eq!(&blob[..6], [0xa1, 0x01, 0xa3, 0x01, 0x01, 0x20]);
        assert_eq!(cbor::decode::<KeyConfirmation>(&blob).expect("decode"), cnf);

        let err = json::encode(&cnf).expect_err("COSE_Key in JSON");
        assert_eq!(err.kind(), ErrorKind::Encode);
        assert_eq!(err.claim(), Some("jwk"));
    }

    // Tests that an embedded JWK is framed as-is.
    #[test]
    fn test_jwk() {
        let data = br#"{"jwk":{"kty":"OKP","crv":"Ed25519","x":"11qYAYKxCrfVS_7TyWQHOg7hcvPapiMlrwIaaPcHURo"},"kid":"AQI"}"#;
        let cnf: KeyConfirmation = json::decode(data).expect("decode");
        assert!(matches!(cnf.key, Some(ConfirmationKey::Jwk(_))));
        assert_eq!(cnf.kid.as_deref(), Some(&[0x01, 0x02][..]));
        assert_eq!(json::encode(&cnf).expect("encode"), data);

        cbor::encode(&cnf).expect_err("JWK in CBOR");
    }

    // Tests key references without an embedded key.
    #[test]
    fn test_references() {
        let cnf = KeyConfirmation {
            kid: Some(vec![0x01].into()),
            thumbprint: Some(vec![0x02].into()),
            ..Default::default()
        };
        let blob = cbor::encode(&cnf).expect("encode");
        assert_eq!(blob, [0xa2, 0x03, 0x41, 0x01, 0x05, 0x41, 0x02]);
        assert_eq!(cbor::decode::<KeyConfirmation>(&blob).expect("decode"), cnf);

        json::decode::<KeyConfirmation>(br#"{"jwk":"not a key"}"#).expect_err("string key");
    }
}
