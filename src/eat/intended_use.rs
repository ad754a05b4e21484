// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

enumerated! {
    /// IntendedUse is the token's purpose (RFC 9711 Section 4.3.3).
    pub struct IntendedUse("intended use") {
        /// General-purpose attestation.
        GENERIC = 1 => "generic",
        /// Attestation for service registration.
        REGISTRATION = 2 => "registration",
        /// Attestation prior to key/config provisioning.
        PROVISIONING = 3 => "provisioning",
        /// Attestation for certificate signing requests.
        CSR = 4 => "csr",
        /// Attestation accompanying a proof-of-possession.
        POP = 5 => "pop",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, cbor, json};

    /// Verifies that every defined value round-trips through both formats.
    #[test]
    fn test_round_trip() {
        for (value, label) in [
            (IntendedUse::GENERIC, "generic"),
            (IntendedUse::REGISTRATION, "registration"),
            (IntendedUse::PROVISIONING, "provisioning"),
            (IntendedUse::CSR, "csr"),
            (IntendedUse::POP, "pop"),
        ] {
            let text = format!("{label:?}");
            assert_eq!(json::encode(&value).expect("encode"), text.as_bytes());
            assert_eq!(json::decode::<IntendedUse>(text.as_bytes()).expect("decode"), value);

            let blob = cbor::encode(&value).expect("encode");
            assert_eq!(blob, [value.0 as u8]);
            assert_eq!(cbor::decode::<IntendedUse>(&blob).expect("decode"), value);
        }
    }

    /// Verifies that unmapped values and labels are rejected.
    #[test]
    fn test_invalid() {
        let err = json::encode(&IntendedUse(0)).expect_err("unmapped value");
        assert_eq!(err.kind(), ErrorKind::Encode);
        cbor::encode(&IntendedUse(6)).expect_err("unmapped value");

        let err = json::decode::<IntendedUse>(br#""invalid""#).expect_err("unknown label");
        assert_eq!(err.to_string(), r#"invalid intended use string "invalid""#);
        json::decode::<IntendedUse>(b"1").expect_err("bare number");

        cbor::decode::<IntendedUse>(&[0x00]).expect_err("unmapped value");
        cbor::decode::<IntendedUse>(&[0x63, 0x63, 0x73, 0x72]).expect_err("label in cbor");
    }
}
