// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::{cbor, json};

/// Result type used by the claim codecs.
pub type Result<T> = std::result::Result<T, Error>;

/// Error is the failures that can occur while encoding, decoding or validating
/// claims.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("cbor: {0}")]
    Cbor(#[from] cbor::Error),
    #[error("json: {0}")]
    Json(#[from] json::Error),
    #[error("unexpected {what} type: have {have}, want {want}")]
    UnexpectedType {
        what: &'static str,
        have: &'static str,
        want: &'static str,
    },
    #[error("invalid {what} array length: have {have}, want {want}")]
    InvalidArrayLength {
        what: &'static str,
        have: usize,
        want: String,
    },
    #[error("duplicate map key: {0}")]
    DuplicateKey(String),
    #[error("missing required {0}")]
    MissingField(&'static str),
    #[error("{0}")]
    InvalidValue(String),
    #[error("cannot encode {what}: {reason}")]
    Unencodable { what: &'static str, reason: String },
    #[error("{claim}: {source}")]
    Claim {
        claim: &'static str,
        #[source]
        source: Box<Error>,
    },
}

/// ErrorKind is the coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The generic CBOR or JSON engine rejected the bytes or the node tree.
    Codec,
    /// The node tree has the wrong shape: node type, array length, map keys.
    Structural,
    /// The shape is right but a semantic rule is violated.
    Value,
    /// An in-memory value has no legal encoding.
    Encode,
}

impl Error {
    /// kind classifies the error, looking through claim annotations.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Cbor(_) | Error::Json(_) => ErrorKind::Codec,
            Error::UnexpectedType { .. }
            | Error::InvalidArrayLength { .. }
            | Error::DuplicateKey(_)
            | Error::MissingField(_) => ErrorKind::Structural,
            Error::InvalidValue(_) => ErrorKind::Value,
            Error::Unencodable { .. } => ErrorKind::Encode,
            Error::Claim { source, .. } => source.kind(),
        }
    }

    /// claim returns the outermost claim name the error is attributed to.
    pub fn claim(&self) -> Option<&'static str> {
        match self {
            Error::Claim { claim, .. } => Some(*claim),
            _ => None,
        }
    }

    /// root returns the underlying failure with all claim annotations removed.
    pub fn root(&self) -> &Error {
        let mut err = self;
        while let Error::Claim { source, .. } = err {
            err = source;
        }
        err
    }

    /// in_claim attributes the error to the named claim or record member.
    pub(crate) fn in_claim(self, claim: &'static str) -> Error {
        Error::Claim {
            claim,
            source: Box::new(self),
        }
    }
}

/// check_array_len rejects arrays outside the `min..=max` element bounds.
pub(crate) fn check_array_len(what: &'static str, have: usize, min: usize, max: usize) -> Result<()> {
    if (min..=max).contains(&have) {
        return Ok(());
    }
    let want = if min == max {
        min.to_string()
    } else if max == usize::MAX {
        format!("at least {min}")
    } else {
        format!("{min} to {max}")
    };
    Err(Error::InvalidArrayLength { what, have, want })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests that claim annotations nest and keep the original message.
    #[test]
    fn test_claim_annotation() {
        let err = Error::InvalidValue("empty UEID".into())
            .in_claim("RAND")
            .in_claim("sueids");

        assert_eq!(err.to_string(), "sueids: RAND: empty UEID");
        assert_eq!(err.claim(), Some("sueids"));
        assert_eq!(err.root().to_string(), "empty UEID");
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    // Tests the array length bounds and their messages.
    #[test]
    fn test_check_array_len() {
        check_array_len("dloa", 2, 2, 3).expect("2 is in bounds");
        check_array_len("dloa", 3, 2, 3).expect("3 is in bounds");

        let err = check_array_len("dloa", 4, 2, 3).expect_err("4 is out of bounds");
        assert_eq!(err.to_string(), "invalid dloa array length: have 4, want 2 to 3");
        assert_eq!(err.kind(), ErrorKind::Structural);

        let err = check_array_len("digest", 1, 2, 2).expect_err("1 is out of bounds");
        assert_eq!(err.to_string(), "invalid digest array length: have 1, want 2");

        let err = check_array_len("nonce", 0, 1, usize::MAX).expect_err("empty");
        assert_eq!(err.to_string(), "invalid nonce array length: have 0, want at least 1");
    }
}
