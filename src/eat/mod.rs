// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! EAT (Entity Attestation Token) claims set.
//!
//! <https://datatracker.ietf.org/doc/html/rfc9711>
//!
//! The claims set is a single record of optional claims, each with a fixed
//! integer key in CBOR and a fixed member name in JSON. Every claim type has
//! its own pair of codecs per format and its own validity rules; decoding
//! checks structure only, [`Eat::validate`] checks semantics.
//!
//! # Example
//!
//! ```
//! use darkbio_eat::eat::{Eat, IntendedUse, Oemid};
//!
//! let token = Eat {
//!     oemid: Some(Oemid::new_pen(76543)),
//!     intuse: Some(IntendedUse::GENERIC),
//!     ..Default::default()
//! };
//! let blob = token.encode_cbor().unwrap();
//! assert_eq!(Eat::decode_cbor(&blob).unwrap(), token);
//!
//! let text = token.encode_json().unwrap();
//! assert_eq!(text, br#"{"oemid":76543,"intuse":"generic"}"#);
//! ```

mod content_format;
mod debug_status;
mod dloa;
mod intended_use;
mod location;
mod measured_component;
mod measurement_results;
mod nonce;
mod oemid;
mod profile;
mod string_or_binary;
mod string_or_uri;
mod submods;
mod ueid;
mod version;

pub use content_format::{CONTENT_FORMAT_COSWID, ContentFormat};
pub use debug_status::DebugStatus;
pub use dloa::Dloa;
pub use intended_use::IntendedUse;
pub use location::Location;
pub use measured_component::{
    ComponentId, Digest, HASH_ALG_SHA256, HASH_ALG_UNKNOWN, MeasuredComponent,
};
pub use measurement_results::{IndividualResult, MeasurementResultsGroup, ResultType};
pub use nonce::{NONCE_MAX_SIZE, NONCE_MIN_SIZE, Nonce};
pub use oemid::{OEMID_IEEE_SIZE, OEMID_RANDOM_SIZE, Oemid};
pub use profile::Profile;
pub use string_or_binary::StringOrBinary;
pub use string_or_uri::StringOrUri;
pub use submods::Submodule;
pub use ueid::{UEID_TYPE_EUI, UEID_TYPE_IMEI, UEID_TYPE_RAND, Ueid};
pub use version::{Version, VersionScheme};

use crate::b64url::Base64UrlBytes;
use crate::cwt::CwtClaims;
use crate::error::{Error, Result};
use crate::{cbor, json};
use std::collections::BTreeMap;

/// Sueids maps the name of a subsystem to its UEID.
pub type Sueids = BTreeMap<String, Ueid>;

/// Submods maps the name of a submodule to its claims.
pub type Submods = BTreeMap<String, Submodule>;

/// Claim keys in the binary format.
pub mod keys {
    pub const ISS: i64 = 1;
    pub const SUB: i64 = 2;
    pub const AUD: i64 = 3;
    pub const EXP: i64 = 4;
    pub const NBF: i64 = 5;
    pub const IAT: i64 = 6;
    pub const CTI: i64 = 7;
    pub const CNF: i64 = 8;
    pub const NONCE: i64 = 10;
    pub const UEID: i64 = 256;
    pub const SUEIDS: i64 = 257;
    pub const OEMID: i64 = 258;
    pub const HWMODEL: i64 = 259;
    pub const HWVERSION: i64 = 260;
    pub const UPTIME: i64 = 261;
    pub const OEMBOOT: i64 = 262;
    pub const DBGSTAT: i64 = 263;
    pub const LOCATION: i64 = 264;
    pub const EAT_PROFILE: i64 = 265;
    pub const SUBMODS: i64 = 266;
    pub const BOOTCOUNT: i64 = 267;
    pub const BOOTSEED: i64 = 268;
    pub const DLOAS: i64 = 269;
    pub const SWNAME: i64 = 270;
    pub const SWVERSION: i64 = 271;
    pub const MANIFESTS: i64 = 272;
    pub const MEASUREMENTS: i64 = 273;
    pub const MEASRES: i64 = 274;
    pub const INTUSE: i64 = 275;
}

claims_set! {
    /// Eat is an EAT claims set. All claims are optional; absent ones are
    /// left out of the encoding entirely. The base CWT claims are flattened
    /// into the same map.
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Eat {
        /// Freshness nonce supplied by the relying party.
        nonce: Nonce = 10, "eat_nonce";
        /// Universal entity ID.
        ueid: Ueid = 256, "ueid";
        /// Semi-permanent UEIDs of subsystems.
        sueids: Sueids = 257, "sueids";
        /// Hardware manufacturer.
        oemid: Oemid = 258, "oemid";
        /// Product or board model identifier.
        hwmodel: Base64UrlBytes = 259, "hwmodel";
        /// Hardware revision.
        hwversion: Version = 260, "hwversion";
        /// Seconds since the last boot.
        uptime: u64 = 261, "uptime";
        /// Whether the boot chain is OEM-authorized.
        oemboot: bool = 262, "oemboot";
        /// Debug port state.
        dbgstat: DebugStatus = 263, "dbgstat";
        /// Geographic position.
        location: Location = 264, "location";
        /// Profile the token conforms to. Drafts of RFC 9711 spelled the
        /// member `eat-profile`, which is still read.
        eat_profile: Profile = 265, "eat_profile" | "eat-profile";
        /// Claims of the parts of the entity.
        submods: Submods = 266, "submods";
        /// Number of times the entity has booted.
        bootcount: u64 = 267, "bootcount";
        /// Random value unique to the current boot cycle.
        bootseed: Base64UrlBytes = 268, "bootseed";
        /// Certifications of the entity.
        dloas: Vec<Dloa> = 269, "dloas";
        /// Name of the running software.
        swname: StringOrUri = 270, "swname";
        /// Version of the running software.
        swversion: Version = 271, "swversion";
        /// Software manifests.
        manifests: Vec<ContentFormat> = 272, "manifests";
        /// Software measurements.
        measurements: Vec<ContentFormat> = 273, "measurements";
        /// Results of comparing measurements against references.
        measres: Vec<MeasurementResultsGroup> = 274, "measres";
        /// Purpose of the token.
        intuse: IntendedUse = 275, "intuse";
    }
    base cwt: CwtClaims;
}

impl Eat {
    /// decode_cbor decodes a CBOR claims set. Only the structure is checked,
    /// call [`Eat::validate`] for the semantic rules.
    pub fn decode_cbor(blob: &[u8]) -> Result<Self> {
        log::trace!("decoding {} byte CBOR claims set", blob.len());
        cbor::decode(blob)
    }

    /// encode_cbor encodes the claims set into CBOR.
    pub fn encode_cbor(&self) -> Result<Vec<u8>> {
        let blob = cbor::encode(self)?;
        log::trace!("encoded {} byte CBOR claims set", blob.len());
        Ok(blob)
    }

    /// decode_json decodes a JSON claims set. Only the structure is checked,
    /// call [`Eat::validate`] for the semantic rules.
    pub fn decode_json(blob: &[u8]) -> Result<Self> {
        log::trace!("decoding {} byte JSON claims set", blob.len());
        json::decode(blob)
    }

    /// encode_json encodes the claims set into compact JSON.
    pub fn encode_json(&self) -> Result<Vec<u8>> {
        let blob = json::encode(self)?;
        log::trace!("encoded {} byte JSON claims set", blob.len());
        Ok(blob)
    }

    /// validate runs the semantic checks of every present claim, including
    /// those of nested submodule claims sets, and reports the first failure
    /// tagged with the claim name.
    pub fn validate(&self) -> Result<()> {
        if let Some(nonce) = &self.nonce {
            nonce.validate().map_err(|e| e.in_claim("eat_nonce"))?;
        }
        if let Some(ueid) = &self.ueid {
            ueid.validate().map_err(|e| e.in_claim("ueid"))?;
        }
        if let Some(sueids) = &self.sueids {
            for ueid in sueids.values() {
                ueid.validate().map_err(|e| e.in_claim("sueids"))?;
            }
        }
        if let Some(oemid) = &self.oemid {
            oemid.validate().map_err(|e| e.in_claim("oemid"))?;
        }
        if let Some(dloas) = &self.dloas {
            if dloas.is_empty() {
                return Err(Error::InvalidValue("no DLOAs listed".into()).in_claim("dloas"));
            }
        }
        if let Some(groups) = &self.measres {
            for group in groups {
                group.validate().map_err(|e| e.in_claim("measres"))?;
            }
        }
        if let Some(submods) = &self.submods {
            for submod in submods.values() {
                if let Submodule::Claims(claims) = submod {
                    claims.validate().map_err(|e| e.in_claim("submods"))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::cwt::Audience;
    use url::Url;

    fn deadbeef(n: usize) -> Vec<u8> {
        [0xde, 0xad, 0xbe, 0xef].iter().copied().cycle().take(n).collect()
    }

    /// Builds a claims set with every claim populated.
    fn full() -> Eat {
        let mut sueids = Sueids::new();
        sueids.insert("EUI".into(), Ueid::with_type(UEID_TYPE_EUI, &deadbeef(6)));

        let mut submods = Submods::new();
        submods.insert(
            "fw".into(),
            Submodule::from(Eat {
                swname: Some(StringOrUri::parse("bootloader").expect("swname")),
                ..Default::default()
            }),
        );

        Eat {
            cwt: CwtClaims {
                iss: Some(StringOrUri::parse("https://attester.example/").expect("iss")),
                aud: Some(Audience::new(StringOrUri::parse("verifier").expect("aud"))),
                iat: Some(1_700_000_000),
                ..Default::default()
            },
            nonce: Some(Nonce::new(deadbeef(8))),
            ueid: Some(Ueid::with_type(UEID_TYPE_RAND, &deadbeef(16))),
            sueids: Some(sueids),
            oemid: Some(Oemid::new_ieee([0x89, 0x48, 0x23])),
            hwmodel: Some(b"model".to_vec().into()),
            hwversion: Some(Version::new("1.0")),
            uptime: Some(3600),
            oemboot: Some(true),
            dbgstat: Some(DebugStatus::DISABLED_SINCE_BOOT),
            location: Some(Location::new(47.5, 8.25)),
            eat_profile: Some(Profile::from_oid("1.3.6.1.4.1.54321.1").expect("oid")),
            submods: Some(submods),
            bootcount: Some(12),
            bootseed: Some(deadbeef(32).into()),
            dloas: Some(vec![Dloa::new(
                Url::parse("http://example.com/").expect("url"),
                "foo",
            )]),
            swname: Some(StringOrUri::parse("acme-os").expect("swname")),
            swversion: Some(Version::with_scheme("2.1.0", VersionScheme::SEMVER)),
            manifests: Some(vec![ContentFormat::new(CONTENT_FORMAT_COSWID, vec![0xa0])]),
            measurements: Some(vec![ContentFormat::new(CONTENT_FORMAT_COSWID, vec![0xa1, 0x00, 0x01])]),
            measres: Some(vec![MeasurementResultsGroup::new(
                "OS",
                vec![IndividualResult::new("component 1", ResultType::SUCCESS)],
            )]),
            intuse: Some(IntendedUse::PROVISIONING),
        }
    }

    /// Verifies that a fully populated claims set survives both formats.
    #[test]
    fn test_round_trip() {
        let eat = full();
        eat.validate().expect("valid");

        let blob = eat.encode_cbor().expect("encode cbor");
        assert_eq!(Eat::decode_cbor(&blob).expect("decode cbor"), eat);

        let blob = eat.encode_json().expect("encode json");
        assert_eq!(Eat::decode_json(&blob).expect("decode json"), eat);
    }

    /// Verifies that claims are keyed and ordered canonically in CBOR.
    #[test]
    fn test_cbor_keys() {
        let blob = full().encode_cbor().expect("encode");
        let value = cbor::decode_value(&blob).expect("decode");
        let got: Vec<i64> = cbor::as_map(&value, "eat")
            .expect("map")
            .iter()
            .map(|(key, _)| cbor::as_int(key, "key").expect("int key"))
            .collect();

        use keys::*;
        assert_eq!(
            got,
            [
                ISS, AUD, IAT, NONCE, UEID, SUEIDS, OEMID, HWMODEL, HWVERSION, UPTIME, OEMBOOT,
                DBGSTAT, LOCATION, EAT_PROFILE, SUBMODS, BOOTCOUNT, BOOTSEED, DLOAS, SWNAME,
                SWVERSION, MANIFESTS, MEASUREMENTS, MEASRES, INTUSE,
            ]
        );
    }

    /// Verifies the JSON member names and order.
    #[test]
    fn test_json_keys() {
        let blob = full().encode_json().expect("encode");
        let value = json::decode_value(&blob).expect("decode");
        let got: Vec<&str> = json::as_object(&value, "eat")
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            got,
            [
                "iss", "aud", "iat", "eat_nonce", "ueid", "sueids", "oemid", "hwmodel",
                "hwversion", "uptime", "oemboot", "dbgstat", "location", "eat_profile", "submods",
                "bootcount", "bootseed", "dloas", "swname", "swversion", "manifests",
                "measurements", "measres", "intuse",
            ]
        );
    }

    /// Verifies that a claims set containing only SUEIDs decodes.
    #[test]
    fn test_sueids_only() {
        let data = br#"{
            "sueids": {
                "RAND": "Ad6tvu_erb7v3q2-796tvu8",
                "EUI": "At6tvu_erQ",
                "IMEI": "A96tvu_erb7v3q2-796t"
            }
        }"#;
        let eat = Eat::decode_json(data).expect("decode");
        let sueids = eat.sueids.as_ref().expect("sueids present");

        assert_eq!(sueids["RAND"], Ueid::with_type(UEID_TYPE_RAND, &deadbeef(16)));
        assert_eq!(sueids["EUI"], Ueid::with_type(UEID_TYPE_EUI, &deadbeef(6)));
        assert_eq!(sueids["IMEI"], Ueid::with_type(UEID_TYPE_IMEI, &deadbeef(14)));
        assert_eq!(eat.ueid, None);
        eat.validate().expect("valid");
    }

    /// Verifies that the draft spelling of the profile member is still read
    /// but never written.
    #[test]
    fn test_profile_alias() {
        let eat = Eat::decode_json(br#"{"eat-profile":"https://example.com/p"}"#).expect("decode");
        let profile = Profile::from_uri("https://example.com/p").expect("uri");
        assert_eq!(eat.eat_profile, Some(profile));
        assert_eq!(
            eat.encode_json().expect("encode"),
            br#"{"eat_profile":"https://example.com/p"}"#
        );

        let err = Eat::decode_json(br#"{"eat-profile":"1.2.3","eat_profile":"1.2.3"}"#)
            .expect_err("both spellings");
        assert_eq!(err, Error::DuplicateKey("eat_profile".into()));

        let err = Eat::decode_json(br#"{"eat-profile":7}"#).expect_err("number");
        assert_eq!(err.claim(), Some("eat_profile"));
    }

    /// Verifies that an empty claims set is an empty map in both formats.
    #[test]
    fn test_empty() {
        let eat = Eat::default();
        assert_eq!(eat.encode_cbor().expect("encode"), [0xa0]);
        assert_eq!(eat.encode_json().expect("encode"), b"{}");
        assert_eq!(Eat::decode_json(b"{}").expect("decode"), eat);
    }

    /// Verifies that unknown claims are skipped in both formats.
    #[test]
    fn test_unknown_claims() {
        let eat = Eat::decode_json(br#"{"private":[1,2],"uptime":5}"#).expect("decode");
        assert_eq!(eat.uptime, Some(5));

        // {-70000: "x", "name": 1, 261: 5}
        let blob = hex::decode("a33a0001116f6178646e616d650119010505").expect("hex");
        let eat = Eat::decode_cbor(&blob).expect("decode");
        assert_eq!(eat.uptime, Some(5));
    }

    /// Verifies that a failing claim aborts decoding and is named in the error.
    #[test]
    fn test_claim_errors() {
        let err = Eat::decode_json(br#"{"uptime":5,"oemid":"iUg"}"#).expect_err("bad oemid");
        assert_eq!(err.claim(), Some("oemid"));
        assert_eq!(err.kind(), ErrorKind::Value);

        let err = Eat::decode_json(br#"{"intuse":1}"#).expect_err("bare number");
        assert_eq!(err.claim(), Some("intuse"));

        // {275: 1, 275: 2}
        let err = Eat::decode_cbor(&hex::decode("a21901130119011302").expect("hex"))
            .expect_err("duplicate");
        assert_eq!(err, Error::DuplicateKey("275".into()));

        let err = Eat::decode_cbor(b"\xa0\x00").expect_err("trailing");
        assert_eq!(err.kind(), ErrorKind::Codec);

        Eat::decode_json(b"[]").expect_err("not an object");
    }

    /// Verifies that encoding refuses values without a legal encoding.
    #[test]
    fn test_encode_errors() {
        let eat = Eat {
            oemid: Some(Oemid::from_bytes(vec![0x00; 2])),
            ..Default::default()
        };
        let err = eat.encode_cbor().expect_err("short oemid");
        assert_eq!(err.claim(), Some("oemid"));
        assert_eq!(err.kind(), ErrorKind::Encode);

        let eat = Eat {
            dbgstat: Some(DebugStatus(9)),
            ..Default::default()
        };
        eat.encode_json().expect_err("unmapped debug status");
    }

    /// Verifies that validation is explicit and names the failing claim.
    #[test]
    fn test_validate() {
        let eat = Eat::decode_json(br#"{"ueid":"At6tvu_erb4"}"#).expect("decode");
        let err = eat.validate().expect_err("EUI of 7 bytes");
        assert_eq!(err.claim(), Some("ueid"));
        assert_eq!(
            err.root().to_string(),
            "EUI length must be exactly 6 (EUI-48) or 8 (EUI-60 or EUI-64) bytes; found 7 bytes"
        );

        let eat = Eat {
            nonce: Some(Nonce::new(vec![0x00; 4])),
            ..Default::default()
        };
        assert_eq!(eat.validate().expect_err("short nonce").claim(), Some("eat_nonce"));

        let mut submods = Submods::new();
        submods.insert(
            "tee".into(),
            Submodule::from(Eat {
                ueid: Some(Ueid::default()),
                ..Default::default()
            }),
        );
        let eat = Eat {
            submods: Some(submods),
            ..Default::default()
        };
        let err = eat.validate().expect_err("nested empty ueid");
        assert_eq!(err.to_string(), "submods: ueid: empty UEID");
    }
}
