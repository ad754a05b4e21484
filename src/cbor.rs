// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Binary (CBOR) format plumbing.
//!
//! https://datatracker.ietf.org/doc/html/rfc8949
//!
//! The byte level work is delegated to `ciborium`: documents are decoded into
//! a raw [`Value`] tree and claim codecs only ever inspect or build such trees.

use std::collections::BTreeMap;

pub use ciborium::Value;

/// Error is the failures the generic CBOR engine can report.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    #[error("encode failed: {0}")]
    EncodeFailed(String),
    #[error("unexpected trailing bytes: {0}")]
    TrailingBytes(usize),
}

/// Encode converts a claim value into its raw CBOR node.
pub trait Encode {
    fn to_cbor(&self) -> Result<Value, crate::Error>;
}

/// Decode converts a raw CBOR node into a claim value.
pub trait Decode: Sized {
    fn from_cbor(value: &Value) -> Result<Self, crate::Error>;
}

/// encode CBOR encodes a claim value into a freshly allocated byte slice.
pub fn encode<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>, crate::Error> {
    Ok(encode_value(&value.to_cbor()?)?)
}

/// decode CBOR decodes a byte slice into a claim value, ensuring that all data
/// is fully consumed.
pub fn decode<T: Decode>(blob: &[u8]) -> Result<T, crate::Error> {
    T::from_cbor(&decode_value(blob)?)
}

/// encode_value serializes a raw node tree.
pub fn encode_value(value: &Value) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    ciborium::ser::into_writer(value, &mut buf).map_err(|e| Error::EncodeFailed(e.to_string()))?;
    Ok(buf)
}

/// decode_value parses a single CBOR item into a raw node tree. Any bytes left
/// over after the first item are rejected.
pub fn decode_value(blob: &[u8]) -> Result<Value, Error> {
    let mut rest = blob;
    let value: Value =
        ciborium::de::from_reader(&mut rest).map_err(|e| Error::DecodeFailed(e.to_string()))?;
    if !rest.is_empty() {
        return Err(Error::TrailingBytes(rest.len()));
    }
    Ok(value)
}

/// kind names the major type of a node for error reporting.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Integer(_) => "integer",
        Value::Bytes(_) => "byte string",
        Value::Float(_) => "float",
        Value::Text(_) => "text string",
        Value::Bool(_) => "bool",
        Value::Null => "null",
        Value::Tag(..) => "tag",
        Value::Array(_) => "array",
        Value::Map(_) => "map",
        _ => "unknown",
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

pub(crate) fn as_map<'a>(
    value: &'a Value,
    what: &'static str,
) -> Result<&'a [(Value, Value)], crate::Error> {
    match value {
        Value::Map(entries) => Ok(entries),
        _ => Err(unexpected(what, "map", value)),
    }
}

pub(crate) fn as_text<'a>(value: &'a Value, what: &'static str) -> Result<&'a str, crate::Error> {
    match value {
        Value::Text(text) => Ok(text),
        _ => Err(unexpected(what, "text string", value)),
    }
}

pub(crate) fn as_bytes<'a>(value: &'a Value, what: &'static str) -> Result<&'a [u8], crate::Error> {
    match value {
        Value::Bytes(bytes) => Ok(bytes),
        _ => Err(unexpected(what, "byte string", value)),
    }
}

pub(crate) fn as_uint(value: &Value, what: &'static str) -> Result<u64, crate::Error> {
    match value {
        Value::Integer(int) => u64::try_from(*int).map_err(|_| {
            crate::Error::InvalidValue(format!("{what}: {} is not an unsigned integer", i128::from(*int)))
        }),
        _ => Err(unexpected(what, "unsigned integer", value)),
    }
}

pub(crate) fn as_int(value: &Value, what: &'static str) -> Result<i64, crate::Error> {
    match value {
        Value::Integer(int) => i64::try_from(*int).map_err(|_| {
            crate::Error::InvalidValue(format!("{what}: {} overflows a 64 bit integer", i128::from(*int)))
        }),
        _ => Err(unexpected(what, "integer", value)),
    }
}

/// as_number accepts both floats and integers, as CBOR encoders are free to
/// shrink integral floats.
pub(crate) fn as_number(value: &Value, what: &'static str) -> Result<f64, crate::Error> {
    match value {
        Value::Float(float) => Ok(*float),
        Value::Integer(int) => Ok(i128::from(*int) as f64),
        _ => Err(unexpected(what, "number", value)),
    }
}

/// for_each_entry walks an integer keyed map, rejecting duplicate keys. Keys
/// which are not integers cannot belong to any known claim and are skipped.
pub(crate) fn for_each_entry<F>(value: &Value, what: &'static str, mut f: F) -> Result<(), crate::Error>
where
    F: FnMut(i64, &Value) -> Result<bool, crate::Error>,
{
    let entries = as_map(value, what)?;
    let mut seen = std::collections::BTreeSet::new();

    for (key, value) in entries {
        let Some(key) = key.as_integer().and_then(|key| i64::try_from(key).ok()) else {
            log::debug!("{what}: skipping non-integer map key of type {}", kind(key));
            continue;
        };
        if !seen.insert(key) {
            return Err(crate::Error::DuplicateKey(key.to_string()));
        }
        if !f(key, value)? {
            log::debug!("{what}: ignoring unknown key {key}");
        }
    }
    Ok(())
}

impl Encode for u64 {
    fn to_cbor(&self) -> Result<Value, crate::Error> {
        Ok(Value::from(*self))
    }
}

impl Decode for u64 {
    fn from_cbor(value: &Value) -> Result<Self, crate::Error> {
        as_uint(value, "uint")
    }
}

impl Encode for i64 {
    fn to_cbor(&self) -> Result<Value, crate::Error> {
        Ok(Value::from(*self))
    }
}

impl Decode for i64 {
    fn from_cbor(value: &Value) -> Result<Self, crate::Error> {
        as_int(value, "int")
    }
}

impl Encode for bool {
    fn to_cbor(&self) -> Result<Value, crate::Error> {
        Ok(Value::Bool(*self))
    }
}

impl Decode for bool {
    fn from_cbor(value: &Value) -> Result<Self, crate::Error> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(unexpected("bool", "bool", value)),
        }
    }
}

impl Encode for String {
    fn to_cbor(&self) -> Result<Value, crate::Error> {
        Ok(Value::Text(self.clone()))
    }
}

impl Decode for String {
    fn from_cbor(value: &Value) -> Result<Self, crate::Error> {
        as_text(value, "tstr").map(str::to_owned)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn to_cbor(&self) -> Result<Value, crate::Error> {
        Ok(Value::Array(
            self.iter().map(Encode::to_cbor).collect::<Result<_, _>>()?,
        ))
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn from_cbor(value: &Value) -> Result<Self, crate::Error> {
        as_array(value, "array")?.iter().map(T::from_cbor).collect()
    }
}

impl<T: Encode> Encode for BTreeMap<String, T> {
    fn to_cbor(&self) -> Result<Value, crate::Error> {
        let mut entries = Vec::with_capacity(self.len());
        for (key, value) in self {
            entries.push((Value::Text(key.clone()), value.to_cbor()?));
        }
        Ok(Value::Map(entries))
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn from_cbor(value: &Value) -> Result<Self, crate::Error> {
        let mut out = BTreeMap::new();
        for (key, value) in as_map(value, "map")? {
            let key = as_text(key, "map key")?;
            if out.insert(key.to_owned(), T::from_cbor(value)?).is_some() {
                return Err(crate::Error::DuplicateKey(key.to_owned()));
            }
        }
        Ok(out)
    }
}
