// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Digital Letter of Approval (RFC 9711 Section 4.2.14).

use crate::error::{Error, Result};
use crate::{cbor, json};
use url::Url;

/// Dloa points to a certification of the entity: the registrar that keeps the
/// letter, the certified platform and optionally the certified application.
/// Encoded as `[registrar, platform, ?application]` in both formats.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dloa {
    pub registrar: Url,
    pub platform_label: String,
    pub application_label: Option<String>,
}

impl Dloa {
    /// Creates a DLOA for a platform without an application label.
    pub fn new(registrar: Url, platform_label: impl Into<String>) -> Self {
        Self {
            registrar,
            platform_label: platform_label.into(),
            application_label: None,
        }
    }
}

fn parse_registrar(text: &str) -> Result<Url> {
    Url::parse(text)
        .map_err(|e| Error::InvalidValue(format!("DLOA registrar {text:?} is not an absolute URL: {e}")))
}

impl cbor::Encode for Dloa {
    fn to_cbor(&self) -> Result<cbor::Value> {
        let mut items = vec![
            cbor::Value::Text(self.registrar.as_str().to_owned()),
            cbor::Value::Text(self.platform_label.clone()),
        ];
        if let Some(label) = &self.application_label {
            items.push(cbor::Value::Text(label.clone()));
        }
        Ok(cbor::Value::Array(items))
    }
}

impl cbor::Decode for Dloa {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        let items = cbor::as_array_len(value, "dloa", 2, 3)?;
        Ok(Self {
            registrar: parse_registrar(cbor::as_text(&items[0], "dloa registrar")?)?,
            platform_label: cbor::as_text(&items[1], "dloa platform label")?.to_owned(),
            application_label: items
                .get(2)
                .map(|item| cbor::as_text(item, "dloa application label").map(str::to_owned))
                .transpose()?,
        })
    }
}

impl json::Encode for Dloa {
    fn to_json(&self) -> Result<json::Value> {
        let mut items = vec![
            json::Value::from(self.registrar.as_str()),
            json::Value::from(self.platform_label.as_str()),
        ];
        if let Some(label) = &self.application_label {
            items.push(json::Value::from(label.as_str()));
        }
        Ok(json::Value::Array(items))
    }
}

impl json::Decode for Dloa {
    fn from_json(value: &json::Value) -> Result<Self> {
        let items = json::as_array_len(value, "dloa", 2, 3)?;
        Ok(Self {
            registrar: parse_registrar(json::as_str(&items[0], "dloa registrar")?)?,
            platform_label: json::as_str(&items[1], "dloa platform label")?.to_owned(),
            application_label: items
                .get(2)
                .map(|item| json::as_str(item, "dloa application label").map(str::to_owned))
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    const URL: &str = "http://example.com/";

    fn example() -> Dloa {
        Dloa::new(Url::parse(URL).expect("url"), "foo")
    }

    /// Verifies the two and three element JSON forms.
    #[test]
    fn test_json() {
        let data = br#"["http://example.com/","foo"]"#;
        let dloa: Dloa = json::decode(data).expect("decode");
        assert_eq!(dloa, example());
        assert_eq!(json::encode(&dloa).expect("encode"), data);

        let data = br#"["http://example.com/","foo","bar"]"#;
        let dloa: Dloa = json::decode(data).expect("decode");
        assert_eq!(dloa.application_label.as_deref(), Some("bar"));
        assert_eq!(json::encode(&dloa).expect("encode"), data);
    }

    /// Verifies that malformed JSON DLOAs are rejected.
    #[test]
    fn test_json_invalid() {
        for data in [
            "0",
            r#"["not url"]"#,
            r#"["http://example.com/"]"#,
            r#"["http://example.com/",0]"#,
            r#"["http://example.com/","foo","bar","baz"]"#,
            r#"["not url","foo"]"#,
            r#"["/relative/path","foo"]"#,
        ] {
            json::decode::<Dloa>(data.as_bytes()).expect_err(data);
        }
        let err = json::decode::<Dloa>(br#"["not url","foo","bar","baz"]"#).expect_err("arity");
        assert_eq!(err.kind(), ErrorKind::Structural);

        let err = json::decode::<Dloa>(b"[]").expect_err("empty");
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(matches!(err, Error::InvalidArrayLength { have: 0, .. }));
    }

    /// Verifies the byte exact CBOR forms.
    #[test]
    fn test_cbor() {
        let mut len2 = vec![0x82, 0x73];
        len2.extend_from_slice(URL.as_bytes());
        len2.extend_from_slice(&[0x63, 0x66, 0x6f, 0x6f]);

        let dloa: Dloa = cbor::decode(&len2).expect("decode");
        assert_eq!(dloa, example());
        assert_eq!(cbor::encode(&dloa).expect("encode"), len2);

        let mut len3 = len2.clone();
        len3[0] = 0x83;
        len3.extend_from_slice(&[0x63, 0x62, 0x61, 0x72]);

        let dloa: Dloa = cbor::decode(&len3).expect("decode");
        assert_eq!(dloa.application_label.as_deref(), Some("bar"));
        assert_eq!(cbor::encode(&dloa).expect("encode"), len3);
    }

    /// Verifies that malformed CBOR DLOAs are rejected.
    #[test]
    fn test_cbor_invalid() {
        cbor::decode::<Dloa>(&[0x00]).expect_err("not an array");

        let err = cbor::decode::<Dloa>(&[0x80]).expect_err("empty");
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(matches!(err, Error::InvalidArrayLength { have: 0, .. }));
        cbor::decode::<Dloa>(&hex::decode("81676e6f742075726c").expect("hex")).expect_err("1 element");

        let mut one = vec![0x81, 0x73];
        one.extend_from_slice(URL.as_bytes());
        cbor::decode::<Dloa>(&one).expect_err("1 element");

        let mut wrong = one.clone();
        wrong[0] = 0x82;
        wrong.push(0x00);
        cbor::decode::<Dloa>(&wrong).expect_err("label not text");

        let mut four = one;
        four[0] = 0x84;
        four.extend_from_slice(&hex::decode("63666f6f636261726362617a").expect("hex"));
        cbor::decode::<Dloa>(&four).expect_err("4 elements");
    }
}
