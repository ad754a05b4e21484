// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Entity Attestation Token (RFC 9711) claims with CBOR and JSON codecs.
//!
//! The [`eat::Eat`] claims set converts to and from both wire formats.
//! Token signing and verification are out of scope: the claims set is the
//! payload a COSE or JOSE envelope would carry.

#[macro_use]
mod macros;

pub mod b64url;
pub mod cbor;
pub mod cwt;
pub mod eat;
mod error;
pub mod json;

pub use error::{Error, ErrorKind, Result};
pub use eat::Eat;
