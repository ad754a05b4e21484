// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Text (JSON) format plumbing.
//!
//! https://datatracker.ietf.org/doc/html/rfc8259
//!
//! Mirrors the [`crate::cbor`] module: `serde_json` tokenizes and frames the
//! documents, claim codecs work on raw [`Value`] trees. Byte strings have no
//! native JSON form and travel as base64url text (RFC 9711 Section 7.2.2).

use std::collections::BTreeMap;

pub use serde_json::{Map, Value};

/// Error is the failures the generic JSON engine can report.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    #[error("encode failed: {0}")]
    EncodeFailed(String),
}

/// Encode converts a claim value into its raw JSON node.
pub trait Encode {
    fn to_json(&self) -> Result<Value, crate::Error>;
}

/// Decode converts a raw JSON node into a claim value.
pub trait Decode: Sized {
    fn from_json(value: &Value) -> Result<Self, crate::Error>;
}

/// encode JSON encodes a claim value into a freshly allocated byte slice.
pub fn encode<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>, crate::Error> {
    Ok(encode_value(&value.to_json()?)?)
}

/// decode JSON decodes a byte slice into a claim value.
pub fn decode<T: Decode>(blob: &[u8]) -> Result<T, crate::Error> {
    T::from_json(&decode_value(blob)?)
}

/// encode_value serializes a raw node tree in compact form.
pub fn encode_value(value: &Value) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(value).map_err(|e| Error::EncodeFailed(e.to_string()))
}

/// decode_value parses a complete JSON document into a raw node tree.
pub fn decode_value(blob: &[u8]) -> Result<Value, Error> {
    serde_json::from_slice(blob).map_err(|e| Error::DecodeFailed(e.to_string()))
}

/// kind names the type of a node for error reporting.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unexpected(what: &'static str, want: &'static str, value: &Value) -> crate::Error {
    crate::Error::UnexpectedType {
        what,
        have: kind(value),
        want,
    }
}

pub(crate) fn as_array<'a>(value: &'a Value, what: &'static str) -> Result<&'a [Value], crate::Error> {
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(unexpected(what, "array", value)),
    }
}

/// as_array_len checks the node is an array and its length is within the
/// given bounds before handing out the elements.
pub(crate) fn as_array_len<'a>(
    value: &'a Value,
    what: &'static str,
    min: usize,
    max: usize,
) -> Result<&'a [Value], crate::Error> {
    let items = as_array(value, what)?;
    crate::error::check_array_len(what, items.len(), min, max)?;
    Ok(items)
}

pub(crate) fn as_object<'a>(value: &'a Value, what: &'static str) -> Result<&'a Map<String, Value>, crate::Error> {
    match value {
        Value::Object(entries) => Ok(entries),
        _ => Err(unexpected(what, "object", value)),
    }
}

pub(crate) fn as_str<'a>(value: &'a Value, what: &'static str) -> Result<&'a str, crate::Error> {
    match value {
        Value::String(text) => Ok(text),
        _ => Err(unexpected(what, "string", value)),
    }
}

pub(crate) fn as_uint(value: &Value, what: &'static str) -> Result<u64, crate::Error> {
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| {
            crate::Error::InvalidValue(format!("{what}: {n} is not an unsigned integer"))
        }),
        _ => Err(unexpected(what, "unsigned integer", value)),
    }
}

pub(crate) fn as_int(value: &Value, what: &'static str) -> Result<i64, crate::Error> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| crate::Error::InvalidValue(format!("{what}: {n} is not an integer"))),
        _ => Err(unexpected(what, "integer", value)),
    }
}

pub(crate) fn as_number(value: &Value, what: &'static str) -> Result<f64, crate::Error> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| crate::Error::InvalidValue(format!("{what}: {n} is not representable"))),
        _ => Err(unexpected(what, "number", value)),
    }
}

/// number converts a float into a JSON number; NaN and infinities have no
/// JSON representation.
pub(crate) fn number(value: f64, what: &'static str) -> Result<Value, crate::Error> {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| crate::Error::Unencodable {
            what,
            reason: format!("{value} is not a finite number"),
        })
}

/// for_each_entry walks an object, handing every member to the callback.
/// Duplicate member names are collapsed by the JSON engine itself.
pub(crate) fn for_each_entry<F>(value: &Value, what: &'static str, mut f: F) -> Result<(), crate::Error>
where
    F: FnMut(&str, &Value) -> Result<bool, crate::Error>,
{
    for (key, value) in as_object(value, what)? {
        if !f(key, value)? {
            log::debug!("{what}: ignoring unknown member {key:?}");
        }
    }
    Ok(())
}

impl Encode for u64 {
    fn to_json(&self) -> Result<Value, crate::Error> {
        Ok(Value::from(*self))
    }
}

impl Decode for u64 {
    fn from_json(value: &Value) -> Result<Self, crate::Error> {
        as_uint(value, "uint")
    }
}

impl Encode for i64 {
    fn to_json(&self) -> Result<Value, crate::Error> {
        Ok(Value::from(*self))
    }
}

impl Decode for i64 {
    fn from_json(value: &Value) -> Result<Self, crate::Error> {
        as_int(value, "int")
    }
}

impl Encode for bool {
    fn to_json(&self) -> Result<Value, crate::Error> {
        Ok(Value::Bool(*self))
    }
}

impl Decode for bool {
    fn from_json(value: &Value) -> Result<Self, crate::Error> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(unexpected("bool", "bool", value)),
        }
    }
}

impl Encode for String {
    fn to_json(&self) -> Result<Value, crate::Error> {
        Ok(Value::String(self.clone()))
    }
}

impl Decode for String {
    fn from_json(value: &Value) -> Result<Self, crate::Error> {
        as_str(value, "string").map(str::to_owned)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn to_json(&self) -> Result<Value, crate::Error> {
        Ok(Value::Array(
            self.iter().map(Encode::to_json).collect::<Result<_, _>>()?,
        ))
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn from_json(value: &Value) -> Result<Self, crate::Error> {
        as_array(value, "array")?.iter().map(T::from_json).collect()
    }
}

impl<T: Encode> Encode for BTreeMap<String, T> {
    fn to_json(&self) -> Result<Value, crate::Error> {
        let mut entries = Map::new();
        for (key, value) in self {
            entries.insert(key.clone(), value.to_json()?);
        }
        Ok(Value::Object(entries))
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn from_json(value: &Value) -> Result<Self, crate::Error> {
        as_object(value, "object")?
            .iter()
            .map(|(key, value)| Ok((key.clone(), T::from_json(value)?)))
            .collect()
    }
}
