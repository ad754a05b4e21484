// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Standard CWT/JWT claims.
//!
//! <https://datatracker.ietf.org/doc/html/rfc8392>
//!
//! An EAT is a CWT (or JWT) claims set, so every token may carry the base
//! claims registered for those. They are collected into [`CwtClaims`], which
//! the [`crate::eat::Eat`] claims set flattens into its own map.

mod confirm;

pub use confirm::{COSE_KTY_OKP, ConfirmationKey, KeyConfirmation};

use crate::b64url::Base64UrlBytes;
use crate::cbor::{self, Decode as _, Encode as _};
use crate::eat::StringOrUri;
use crate::error::{Error, Result, check_array_len};
use crate::json::{self, Decode as _, Encode as _};

/// Audience identifies the recipients the token is intended for. A single
/// recipient is written bare, several as an array.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Audience(Vec<StringOrUri>);

impl Audience {
    /// Creates an audience of a single recipient.
    pub fn new(aud: StringOrUri) -> Self {
        Self(vec![aud])
    }

    /// Creates an audience of several recipients.
    pub fn from_values(auds: Vec<StringOrUri>) -> Self {
        Self(auds)
    }

    /// Returns the recipients.
    pub fn values(&self) -> &[StringOrUri] {
        &self.0
    }

    /// Reports whether the recipient is part of the audience.
    pub fn contains(&self, aud: &str) -> bool {
        self.0.iter().any(|v| v.as_str() == aud)
    }
}

fn no_audience() -> Error {
    Error::Unencodable {
        what: "audience",
        reason: "no recipients".into(),
    }
}

impl cbor::Encode for Audience {
    fn to_cbor(&self) -> Result<cbor::Value> {
        match self.0.as_slice() {
            [] => Err(no_audience()),
            [aud] => aud.to_cbor(),
            _ => self.0.to_cbor(),
        }
    }
}

impl cbor::Decode for Audience {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        match value {
            cbor::Value::Array(_) => {
                let auds = Vec::from_cbor(value)?;
                check_array_len("audience", auds.len(), 1, usize::MAX)?;
                Ok(Self(auds))
            }
            _ => StringOrUri::from_cbor(value).map(Self::new),
        }
    }
}

impl json::Encode for Audience {
    fn to_json(&self) -> Result<json::Value> {
        match self.0.as_slice() {
            [] => Err(no_audience()),
            [aud] => aud.to_json(),
            _ => self.0.to_json(),
        }
    }
}

impl json::Decode for Audience {
    fn from_json(value: &json::Value) -> Result<Self> {
        match value {
            json::Value::Array(_) => {
                let auds = Vec::from_json(value)?;
                check_array_len("audience", auds.len(), 1, usize::MAX)?;
                Ok(Self(auds))
            }
            _ => StringOrUri::from_json(value).map(Self::new),
        }
    }
}

claims_set! {
    /// CwtClaims is the set of base claims shared by all CWTs and JWTs. Times
    /// are NumericDate values: seconds since the Unix epoch.
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct CwtClaims {
        /// Principal that issued the token.
        iss: StringOrUri = 1, "iss";
        /// Principal that is the subject of the token.
        sub: StringOrUri = 2, "sub";
        /// Recipients the token is intended for.
        aud: Audience = 3, "aud";
        /// Time on or after which the token must not be accepted.
        exp: i64 = 4, "exp";
        /// Time before which the token must not be accepted.
        nbf: i64 = 5, "nbf";
        /// Time at which the token was issued.
        iat: i64 = 6, "iat";
        /// Unique identifier of the token.
        cti: Base64UrlBytes = 7, "cti";
        /// Key bound to the token.
        cnf: KeyConfirmation = 8, "cnf";
    }
}
