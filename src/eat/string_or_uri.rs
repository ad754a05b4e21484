// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::error::{Error, Result};
use crate::{cbor, json};
use std::fmt;
use url::Url;

/// StringOrUri is the text type of issuer, subject, audience and software
/// name (RFC 7519 Section 2). Any value containing a ':' must be a URI.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StringOrUri {
    String(String),
    Uri(Url),
}

impl StringOrUri {
    /// parse classifies a text value, rejecting ':' separated text that is
    /// not a valid URI.
    pub fn parse(text: &str) -> Result<Self> {
        if !text.contains(':') {
            return Ok(Self::String(text.to_owned()));
        }
        Url::parse(text)
            .map(Self::Uri)
            .map_err(|e| Error::InvalidValue(format!("{text:?} contains ':' but is not a URI: {e}")))
    }

    /// Returns the value as text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String(text) => text,
            Self::Uri(uri) => uri.as_str(),
        }
    }
}

impl fmt::Display for StringOrUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Url> for StringOrUri {
    fn from(uri: Url) -> Self {
        Self::Uri(uri)
    }
}

impl cbor::Encode for StringOrUri {
    fn to_cbor(&self) -> Result<cbor::Value> {
        Ok(cbor::Value::Text(self.as_str().to_owned()))
    }
}

impl cbor::Decode for StringOrUri {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        Self::parse(cbor::as_text(value, "string-or-uri")?)
    }
}

impl json::Encode for StringOrUri {
    fn to_json(&self) -> Result<json::Value> {
        Ok(json::Value::from(self.as_str()))
    }
}

impl json::Decode for StringOrUri {
    fn from_json(value: &json::Value) -> Result<Self> {
        Self::parse(json::as_str(value, "string-or-uri")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests the classification of text values.
    #[test]
    fn test_parse() {
        assert_eq!(
            StringOrUri::parse("acme-firmware").expect("string"),
            StringOrUri::String("acme-firmware".into())
        );
        let uri = StringOrUri::parse("urn:example:fw").expect("uri");
        assert!(matches!(uri, StringOrUri::Uri(_)));
        assert_eq!(uri.to_string(), "urn:example:fw");

        StringOrUri::parse("1a:foo").expect_err("not a uri");
    }

    // Tests both encodings are plain text.
    #[test]
    fn test_formats() {
        let value = StringOrUri::parse("https://example.com/").expect("uri");
        assert_eq!(json::encode(&value).expect("encode"), br#""https://example.com/""#);
        let blob = cbor::encode(&value).expect("encode");
        assert_eq!(cbor::decode::<StringOrUri>(&blob).expect("decode"), value);

        cbor::decode::<StringOrUri>(&[0x41, 0x00]).expect_err("bytes");
        json::decode::<StringOrUri>(br#""::""#).expect_err("bad uri");
    }
}
