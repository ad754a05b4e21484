// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Demo: Build an attestation claims set and move it between formats.
//!
//! This example demonstrates:
//! 1. Assembling claims for a device and one of its submodules
//! 2. Encoding them into CBOR and JSON
//! 3. Decoding the CBOR form and converting it into JSON
//! 4. Validating the claims and reporting a failing one

use darkbio_eat::cwt::{Audience, CwtClaims};
use darkbio_eat::eat::{
    ComponentId, ContentFormat, DebugStatus, Digest, Eat, IntendedUse, MeasuredComponent, Nonce,
    Oemid, StringOrUri, Submodule, Submods, UEID_TYPE_RAND, Ueid, Version,
};
use darkbio_eat::json;
use std::time::{SystemTime, UNIX_EPOCH};

// CoAP content format from the experimental range, pending IANA assignment
const MEASURED_COMPONENT_CBOR: u64 = 65000;

fn main() {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    // =========================================================================
    // Step 1: Assemble the claims of the device and its firmware
    // =========================================================================
    println!("1. Assembling claims...");
    let firmware = b"firmware image v1.2.0";

    let mut submods = Submods::new();
    submods.insert(
        "firmware".into(),
        Submodule::from(Eat {
            swname: Some(StringOrUri::parse("bootloader").unwrap()),
            swversion: Some(Version::new("1.2.0")),
            ..Default::default()
        }),
    );
    submods.insert("image".into(), Submodule::Digest(Digest::sha256(firmware)));

    let mut component = MeasuredComponent::new(ComponentId::new("bootloader"));
    component.measurement = Some(Digest::sha256(firmware));

    let claims = Eat {
        cwt: CwtClaims {
            iss: Some(StringOrUri::parse("https://device.example/").unwrap()),
            aud: Some(Audience::new(StringOrUri::parse("verifier").unwrap())),
            iat: Some(now),
            ..Default::default()
        },
        nonce: Some(Nonce::new(*b"fresh-nonce-0001")),
        ueid: Some(Ueid::with_type(UEID_TYPE_RAND, &[0x5a; 16])),
        oemid: Some(Oemid::new_pen(76543)),
        dbgstat: Some(DebugStatus::DISABLED_SINCE_BOOT),
        submods: Some(submods),
        intuse: Some(IntendedUse::GENERIC),
        measurements: Some(vec![
            ContentFormat::encode_cbor(MEASURED_COMPONENT_CBOR, &component).unwrap(),
        ]),
        ..Default::default()
    };
    claims.validate().unwrap();
    let unwrapped: MeasuredComponent = claims.measurements.as_ref().unwrap()[0]
        .decode_cbor()
        .unwrap();
    assert_eq!(unwrapped, component);
    println!(
        "   Measured component: {}",
        String::from_utf8_lossy(&json::encode(&unwrapped).unwrap())
    );

    // =========================================================================
    // Step 2: Encode the claims into both formats
    // =========================================================================
    println!("\n2. Encoding claims...");
    let cbor = claims.encode_cbor().unwrap();
    println!("   CBOR ({} bytes): {}", cbor.len(), hex::encode(&cbor));

    let json = claims.encode_json().unwrap();
    println!("   JSON ({} bytes): {}", json.len(), String::from_utf8_lossy(&json));

    // =========================================================================
    // Step 3: Decode the CBOR form and convert it into JSON
    // =========================================================================
    println!("\n3. Converting CBOR into JSON...");
    let decoded = Eat::decode_cbor(&cbor).unwrap();
    assert_eq!(decoded, claims);
    assert_eq!(decoded.encode_json().unwrap(), json);
    println!("   Conversion matches");

    // =========================================================================
    // Step 4: Validation failures name the offending claim
    // =========================================================================
    println!("\n4. Validating a broken token...");
    let broken = Eat::decode_json(br#"{"ueid":"AQID"}"#).unwrap();
    match broken.validate() {
        Ok(()) => println!("   Unexpectedly valid"),
        Err(err) => println!("   Rejected claim {:?}: {}", err.claim(), err.root()),
    }
}
