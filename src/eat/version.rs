// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Hardware and software versions (RFC 9711 Sections 4.2.5 and 4.2.7).

use crate::cbor::{self, Decode as _, Encode as _};
use crate::error::{Error, Result};
use crate::json::{self, Decode as _, Encode as _};

/// VersionScheme is a CoSWID version scheme (RFC 9393 Section 4.1). The
/// registry is open, so values without a label stay representable and are
/// written as integers in both formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionScheme(pub i64);

const SCHEMES: &[(i64, &str)] = &[
    (1, "multipartnumeric"),
    (2, "multipartnumeric+suffix"),
    (3, "alphanumeric"),
    (4, "decimal"),
    (16384, "semver"),
];

impl VersionScheme {
    pub const MULTIPART_NUMERIC: Self = Self(1);
    pub const MULTIPART_NUMERIC_SUFFIX: Self = Self(2);
    pub const ALPHANUMERIC: Self = Self(3);
    pub const DECIMAL: Self = Self(4);
    pub const SEMVER: Self = Self(16384);

    /// Returns the registered name of the scheme, if any.
    pub fn label(&self) -> Option<&'static str> {
        SCHEMES
            .iter()
            .find(|(value, _)| *value == self.0)
            .map(|(_, label)| *label)
    }

    /// Looks up a scheme by its registered name.
    pub fn from_label(label: &str) -> Option<Self> {
        SCHEMES
            .iter()
            .find(|(_, l)| *l == label)
            .map(|(value, _)| Self(*value))
    }
}

impl cbor::Encode for VersionScheme {
    fn to_cbor(&self) -> Result<cbor::Value> {
        Ok(cbor::Value::from(self.0))
    }
}

impl cbor::Decode for VersionScheme {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        cbor::as_int(value, "version scheme").map(Self)
    }
}

impl json::Encode for VersionScheme {
    fn to_json(&self) -> Result<json::Value> {
        Ok(match self.label() {
            Some(label) => json::Value::from(label),
            None => json::Value::from(self.0),
        })
    }
}

impl json::Decode for VersionScheme {
    fn from_json(value: &json::Value) -> Result<Self> {
        match value {
            json::Value::String(label) => Self::from_label(label).ok_or_else(|| {
                Error::InvalidValue(format!("invalid version scheme string {label:?}"))
            }),
            _ => json::as_int(value, "version scheme").map(Self),
        }
    }
}

/// Version is a version string with an optional scheme telling how to
/// compare it: `[version, ?scheme]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Version {
    pub version: String,
    pub scheme: Option<VersionScheme>,
}

impl Version {
    /// Creates a version without a scheme.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            scheme: None,
        }
    }

    /// Creates a version with an explicit scheme.
    pub fn with_scheme(version: impl Into<String>, scheme: VersionScheme) -> Self {
        Self {
            version: version.into(),
            scheme: Some(scheme),
        }
    }
}

impl cbor::Encode for Version {
    fn to_cbor(&self) -> Result<cbor::Value> {
        let mut items = vec![cbor::Value::Text(self.version.clone())];
        if let Some(scheme) = &self.scheme {
            items.push(scheme.to_cbor()?);
        }
        Ok(cbor::Value::Array(items))
    }
}

impl cbor::Decode for Version {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        let items = cbor::as_array_len(value, "version", 1, 2)?;
        Ok(Self {
            version: cbor::as_text(&items[0], "version")?.to_owned(),
            scheme: items
                .get(1)
                .map(VersionScheme::from_cbor)
                .transpose()?,
        })
    }
}

impl json::Encode for Version {
    fn to_json(&self) -> Result<json::Value> {
        let mut items = vec![json::Value::String(self.version.clone())];
        if let Some(scheme) = &self.scheme {
            items.push(scheme.to_json()?);
        }
        Ok(json::Value::Array(items))
    }
}

impl json::Decode for Version {
    fn from_json(value: &json::Value) -> Result<Self> {
        let items = json::as_array_len(value, "version", 1, 2)?;
        Ok(Self {
            version: json::as_str(&items[0], "version")?.to_owned(),
            scheme: items
                .get(1)
                .map(VersionScheme::from_json)
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests both forms of a schemed version.
    #[test]
    fn test_scheme() {
        let version = Version::with_scheme("1.3.4", VersionScheme::MULTIPART_NUMERIC);
        assert_eq!(
            cbor::encode(&version).expect("encode"),
            hex::decode("8265312e332e3401").expect("hex")
        );
        assert_eq!(
            json::encode(&version).expect("encode"),
            br#"["1.3.4","multipartnumeric"]"#
        );

        let version = Version::with_scheme("2.0.0", VersionScheme::SEMVER);
        let blob = cbor::encode(&version).expect("encode");
        assert_eq!(&blob[blob.len() - 3..], [0x19, 0x40, 0x00]);
        assert_eq!(cbor::decode::<Version>(&blob).expect("decode"), version);
    }

    // Tests that a version without a scheme is a single element array.
    #[test]
    fn test_bare() {
        let version = Version::new("4.5.6");
        assert_eq!(json::encode(&version).expect("encode"), br#"["4.5.6"]"#);
        assert_eq!(json::decode::<Version>(br#"["4.5.6"]"#).expect("decode"), version);
    }

    // Tests that unregistered schemes survive as integers.
    #[test]
    fn test_unknown_scheme() {
        let version = Version::with_scheme("x", VersionScheme(-7));
        let blob = json::encode(&version).expect("encode");
        assert_eq!(blob, br#"["x",-7]"#);
        assert_eq!(json::decode::<Version>(&blob).expect("decode"), version);

        json::decode::<Version>(br#"["x","unheard-of"]"#).expect_err("unknown label");
    }

    // Tests the array arity checks.
    #[test]
    fn test_arity() {
        json::decode::<Version>(b"[]").expect_err("empty");
        json::decode::<Version>(br#"["1",1,2]"#).expect_err("too long");
        json::decode::<Version>(br#""1""#).expect_err("not an array");
        cbor::decode::<Version>(&[0x81, 0x01]).expect_err("version must be text");
    }
}
