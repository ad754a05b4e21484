// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#![no_main]

use darkbio_eat::Eat;
use libfuzzer_sys::fuzz_target;

macro_rules! roundtrip {
    ($data:expr, $decode:path, $encode:ident) => {
        if let Ok(decoded) = $decode($data) {
            // Decoding checks everything encoding does, so whatever decodes
            // must encode again. Encodings are compared, not values, since
            // NaN floats never compare equal.
            let encoded = decoded
                .$encode()
                .expect(concat!("Failed to encode decoded data for ", stringify!($decode)));
            let decoded2 = $decode(&encoded).expect(concat!(
                "Failed to decode re-encoded data for ",
                stringify!($decode)
            ));
            let encoded2 = decoded2
                .$encode()
                .expect(concat!("Failed to re-encode ", stringify!($decode)));
            assert_eq!(encoded, encoded2, "Roundtrip failed for {}", stringify!($decode));
        }
    };
}

fuzz_target!(|data: &[u8]| {
    roundtrip!(data, Eat::decode_cbor, encode_cbor);
    roundtrip!(data, Eat::decode_json, encode_json);
});
