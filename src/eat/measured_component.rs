// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Measured components (RFC 9783 Section 4).
//!
//! A measured component names a piece of firmware or software together with
//! its version, digest and the signers that vouched for it.

use super::version::Version;
use crate::b64url::Base64UrlBytes;
use crate::cbor::{self, Decode as _, Encode as _};
use crate::error::{Error, Result};
use crate::json::{self, Decode as _, Encode as _};
use sha2::{Digest as _, Sha256};
use subtle::ConstantTimeEq;

/// Hash algorithm ID for "unknown" from the IANA Named Information registry.
pub const HASH_ALG_UNKNOWN: u64 = 0;

/// Hash algorithm ID for SHA-256 from the IANA Named Information registry.
pub const HASH_ALG_SHA256: u64 = 1;

/// ComponentId names a component with an optional version: `[name, ?version]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComponentId {
    pub name: String,
    pub version: Option<Version>,
}

impl ComponentId {
    /// Creates a component ID without a version.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    /// Creates a component ID with a version.
    pub fn with_version(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version: Some(version),
        }
    }
}

impl cbor::Encode for ComponentId {
    fn to_cbor(&self) -> Result<cbor::Value> {
        let mut items = vec![cbor::Value::Text(self.name.clone())];
        if let Some(version) = &self.version {
            items.push(version.to_cbor()?);
        }
        Ok(cbor::Value::Array(items))
    }
}

impl cbor::Decode for ComponentId {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        let items = cbor::as_array_len(value, "component-id", 1, 2)?;
        Ok(Self {
            name: cbor::as_text(&items[0], "component name")?.to_owned(),
            version: items
                .get(1)
                .map(|item| Version::from_cbor(item).map_err(|e| e.in_claim("version")))
                .transpose()?,
        })
    }
}

impl json::Encode for ComponentId {
    fn to_json(&self) -> Result<json::Value> {
        let mut items = vec![json::Value::String(self.name.clone())];
        if let Some(version) = &self.version {
            items.push(version.to_json()?);
        }
        Ok(json::Value::Array(items))
    }
}

impl json::Decode for ComponentId {
    fn from_json(value: &json::Value) -> Result<Self> {
        let items = json::as_array_len(value, "component-id", 1, 2)?;
        Ok(Self {
            name: json::as_str(&items[0], "component name")?.to_owned(),
            version: items
                .get(1)
                .map(|item| Version::from_json(item).map_err(|e| e.in_claim("version")))
                .transpose()?,
        })
    }
}

/// Digest is a hash value tagged with its algorithm: `[alg-id, value]`. The
/// algorithm is an ID from the IANA Named Information Hash Algorithm
/// registry, [`HASH_ALG_UNKNOWN`] when not known.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Digest {
    pub alg: u64,
    pub value: Base64UrlBytes,
}

impl Digest {
    /// Creates a digest from an algorithm ID and a precomputed hash.
    pub fn new(alg: u64, value: impl Into<Vec<u8>>) -> Self {
        Self {
            alg,
            value: Base64UrlBytes::new(value.into()),
        }
    }

    /// sha256 hashes the data with SHA-256.
    pub fn sha256(data: &[u8]) -> Self {
        Self::new(HASH_ALG_SHA256, Sha256::digest(data).to_vec())
    }

    /// matches reports whether the data hashes to this digest. Only SHA-256 is
    /// supported, any other algorithm never matches. The comparison runs in
    /// constant time.
    pub fn matches(&self, data: &[u8]) -> bool {
        if self.alg != HASH_ALG_SHA256 {
            return false;
        }
        let hash = Sha256::digest(data);
        hash.as_slice().ct_eq(self.value.as_bytes()).into()
    }
}

impl cbor::Encode for Digest {
    fn to_cbor(&self) -> Result<cbor::Value> {
        Ok(cbor::Value::Array(vec![
            cbor::Value::from(self.alg),
            self.value.to_cbor()?,
        ]))
    }
}

impl cbor::Decode for Digest {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        let items = cbor::as_array_len(value, "digest", 2, 2)?;
        Ok(Self {
            alg: cbor::as_uint(&items[0], "digest alg-id")?,
            value: Base64UrlBytes::from_cbor(&items[1]).map_err(|e| e.in_claim("digest value"))?,
        })
    }
}

impl json::Encode for Digest {
    fn to_json(&self) -> Result<json::Value> {
        Ok(json::Value::Array(vec![
            json::Value::from(self.alg),
            self.value.to_json()?,
        ]))
    }
}

impl json::Decode for Digest {
    fn from_json(value: &json::Value) -> Result<Self> {
        let items = json::as_array_len(value, "digest", 2, 2)?;
        Ok(Self {
            alg: json::as_uint(&items[0], "digest alg-id")?,
            value: Base64UrlBytes::from_json(&items[1]).map_err(|e| e.in_claim("digest value"))?,
        })
    }
}

/// MeasuredComponent is a component identifier with the evidence gathered
/// about it. Only the identifier is mandatory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeasuredComponent {
    pub id: ComponentId,
    pub measurement: Option<Digest>,
    pub signers: Option<Vec<Base64UrlBytes>>,
    pub flags: Option<Base64UrlBytes>,
    pub raw_measurement: Option<Base64UrlBytes>,
}

impl MeasuredComponent {
    /// Creates a measured component with no evidence attached.
    pub fn new(id: ComponentId) -> Self {
        Self {
            id,
            measurement: None,
            signers: None,
            flags: None,
            raw_measurement: None,
        }
    }
}

/// Member keys and names of a measured component, in encoding order.
const ID: (i64, &str) = (1, "id");
const MEASUREMENT: (i64, &str) = (2, "measurement");
const SIGNERS: (i64, &str) = (3, "signers");
const FLAGS: (i64, &str) = (4, "flags");
const RAW_MEASUREMENT: (i64, &str) = (5, "raw-measurement");

/// Partially decoded component, before the required identifier is checked.
#[derive(Default)]
struct Builder {
    id: Option<ComponentId>,
    measurement: Option<Digest>,
    signers: Option<Vec<Base64UrlBytes>>,
    flags: Option<Base64UrlBytes>,
    raw_measurement: Option<Base64UrlBytes>,
}

impl Builder {
    fn finish(self) -> Result<MeasuredComponent> {
        Ok(MeasuredComponent {
            id: self.id.ok_or(Error::MissingField(ID.1))?,
            measurement: self.measurement,
            signers: self.signers,
            flags: self.flags,
            raw_measurement: self.raw_measurement,
        })
    }
}

impl cbor::Encode for MeasuredComponent {
    fn to_cbor(&self) -> Result<cbor::Value> {
        let mut entries = vec![(cbor::Value::from(ID.0), self.id.to_cbor()?)];
        if let Some(digest) = &self.measurement {
            entries.push((cbor::Value::from(MEASUREMENT.0), digest.to_cbor()?));
        }
        if let Some(signers) = &self.signers {
            entries.push((cbor::Value::from(SIGNERS.0), signers.to_cbor()?));
        }
        if let Some(flags) = &self.flags {
            entries.push((cbor::Value::from(FLAGS.0), flags.to_cbor()?));
        }
        if let Some(raw) = &self.raw_measurement {
            entries.push((cbor::Value::from(RAW_MEASUREMENT.0), raw.to_cbor()?));
        }
        Ok(cbor::Value::Map(entries))
    }
}

impl cbor::Decode for MeasuredComponent {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        let mut b = Builder::default();
        cbor::for_each_entry(value, "measured-component", |key, value| {
            match key {
                1 => b.id = Some(ComponentId::from_cbor(value).map_err(|e| e.in_claim(ID.1))?),
                2 => b.measurement = Some(Digest::from_cbor(value).map_err(|e| e.in_claim(MEASUREMENT.1))?),
                3 => b.signers = Some(Vec::from_cbor(value).map_err(|e| e.in_claim(SIGNERS.1))?),
                4 => b.flags = Some(Base64UrlBytes::from_cbor(value).map_err(|e| e.in_claim(FLAGS.1))?),
                5 => {
                    b.raw_measurement =
                        Some(Base64UrlBytes::from_cbor(value).map_err(|e| e.in_claim(RAW_MEASUREMENT.1))?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        b.finish()
    }
}

impl json::Encode for MeasuredComponent {
    fn to_json(&self) -> Result<json::Value> {
        let mut entries = json::Map::new();
        entries.insert(ID.1.into(), self.id.to_json()?);
        if let Some(digest) = &self.measurement {
            entries.insert(MEASUREMENT.1.into(), digest.to_json()?);
        }
        if let Some(signers) = &self.signers {
            entries.insert(SIGNERS.1.into(), signers.to_json()?);
        }
        if let Some(flags) = &self.flags {
            entries.insert(FLAGS.1.into(), flags.to_json()?);
        }
        if let Some(raw) = &self.raw_measurement {
            entries.insert(RAW_MEASUREMENT.1.into(), raw.to_json()?);
        }
        Ok(json::Value::Object(entries))
    }
}

impl json::Decode for MeasuredComponent {
    fn from_json(value: &json::Value) -> Result<Self> {
        let mut b = Builder::default();
        json::for_each_entry(value, "measured-component", |key, value| {
            match key {
                "id" => b.id = Some(ComponentId::from_json(value).map_err(|e| e.in_claim(ID.1))?),
                "measurement" => {
                    b.measurement = Some(Digest::from_json(value).map_err(|e| e.in_claim(MEASUREMENT.1))?)
                }
                "signers" => b.signers = Some(Vec::from_json(value).map_err(|e| e.in_claim(SIGNERS.1))?),
                "flags" => b.flags = Some(Base64UrlBytes::from_json(value).map_err(|e| e.in_claim(FLAGS.1))?),
                "raw-measurement" => {
                    b.raw_measurement =
                        Some(Base64UrlBytes::from_json(value).map_err(|e| e.in_claim(RAW_MEASUREMENT.1))?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        b.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::eat::VersionScheme;

    const HASH_JSON: &str = "3q2-796tvu_erb7v3q2-796tvu_erb7v3q2-796tvu8";

    fn deadbeef() -> Vec<u8> {
        [0xde, 0xad, 0xbe, 0xef].repeat(8)
    }

    fn digest_cbor() -> Vec<u8> {
        let mut blob = vec![0x82, 0x01, 0x58, 0x20];
        blob.extend_from_slice(&deadbeef());
        blob
    }

    /// Verifies the digest JSON form against a known vector.
    #[test]
    fn test_digest_json() {
        let data = format!(r#"[1,"{HASH_JSON}"]"#);
        let digest: Digest = json::decode(data.as_bytes()).expect("decode");
        assert_eq!(digest, Digest::new(HASH_ALG_SHA256, deadbeef()));
        assert_eq!(json::encode(&digest).expect("encode"), data.as_bytes());
    }

    /// Verifies the digest CBOR form is reproduced byte for byte.
    #[test]
    fn test_digest_cbor() {
        let data = digest_cbor();
        let digest: Digest = cbor::decode(&data).expect("decode");
        assert_eq!(digest.alg, 1);
        assert_eq!(digest.value.as_bytes(), deadbeef());
        assert_eq!(cbor::encode(&digest).expect("encode"), data);
    }

    /// Verifies that the digest arity is checked before its elements.
    #[test]
    fn test_digest_invalid() {
        let err = json::decode::<Digest>(br#"["x"]"#).expect_err("short");
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(matches!(err, Error::InvalidArrayLength { .. }));

        json::decode::<Digest>(br#"[-1,"AAAA"]"#).expect_err("negative alg");
        json::decode::<Digest>(br#"[1,"AAAA","AAAA"]"#).expect_err("long");
        json::decode::<Digest>(br#"[1,"AA=="]"#).expect_err("padding");
        cbor::decode::<Digest>(&[0x82, 0x01, 0x62, 0x41, 0x41]).expect_err("text value");
    }

    /// Verifies hashing and constant time matching.
    #[test]
    fn test_digest_sha256() {
        let digest = Digest::sha256(b"abc");
        assert_eq!(
            hex::encode(digest.value.as_bytes()),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert!(digest.matches(b"abc"));
        assert!(!digest.matches(b"abd"));

        let unknown = Digest::new(HASH_ALG_UNKNOWN, digest.value.to_vec());
        assert!(!unknown.matches(b"abc"));
    }

    fn example() -> MeasuredComponent {
        let mut mc = MeasuredComponent::new(ComponentId::with_version(
            "Foo",
            Version::with_scheme("1.3.4", VersionScheme::MULTIPART_NUMERIC),
        ));
        mc.measurement = Some(Digest::new(HASH_ALG_SHA256, deadbeef()));
        mc
    }

    /// Verifies the measured component JSON form against a known vector.
    #[test]
    fn test_json() {
        let data = format!(
            r#"{{"id":["Foo",["1.3.4","multipartnumeric"]],"measurement":[1,"{HASH_JSON}"]}}"#
        );
        let mc: MeasuredComponent = json::decode(data.as_bytes()).expect("decode");
        assert_eq!(mc, example());
        assert_eq!(json::encode(&mc).expect("encode"), data.as_bytes());
    }

    /// Verifies the measured component CBOR form against a known vector.
    #[test]
    fn test_cbor() {
        let mut data = hex::decode("a2018263466f6f8265312e332e340102").expect("hex");
        data.extend_from_slice(&digest_cbor());

        let mc: MeasuredComponent = cbor::decode(&data).expect("decode");
        assert_eq!(mc, example());
        assert_eq!(cbor::encode(&mc).expect("encode"), data);
    }

    /// Verifies that every optional member survives both formats.
    #[test]
    fn test_all_members() {
        let mut mc = example();
        mc.signers = Some(vec![vec![0x01, 0x02].into(), vec![0x03].into()]);
        mc.flags = Some(vec![0x80].into());
        mc.raw_measurement = Some(b"raw".to_vec().into());

        let blob = cbor::encode(&mc).expect("encode");
        assert_eq!(cbor::decode::<MeasuredComponent>(&blob).expect("decode"), mc);

        let blob = json::encode(&mc).expect("encode");
        assert_eq!(json::decode::<MeasuredComponent>(&blob).expect("decode"), mc);
    }

    /// Verifies that the identifier is required and member errors are named.
    #[test]
    fn test_invalid() {
        let err = json::decode::<MeasuredComponent>(br#"{"flags":"gA"}"#).expect_err("missing id");
        assert_eq!(err, Error::MissingField("id"));

        let err = json::decode::<MeasuredComponent>(br#"{"id":["Foo"],"measurement":[1]}"#)
            .expect_err("bad digest");
        assert_eq!(err.claim(), Some("measurement"));

        json::decode::<MeasuredComponent>(br#"{"id":[]}"#).expect_err("empty id");
        json::decode::<MeasuredComponent>(br#"{"id":["a",["1"],"x"]}"#).expect_err("long id");
    }
}
