// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Declarative generators for the two repetitive claim shapes: enumerations
//! that travel as integers in CBOR and as labels in JSON, and maps made of
//! independently optional claims.

use crate::error::{Error, Result};

/// EnumTable is the immutable value <-> label mapping behind an enumerated
/// claim (the `JC<label, value>` convention of RFC 9711).
pub(crate) struct EnumTable {
    pub what: &'static str,
    pub entries: &'static [(u64, &'static str)],
}

impl EnumTable {
    pub fn label(&self, value: u64) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, label)| *label)
    }

    pub fn value(&self, label: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(_, l)| *l == label)
            .map(|(value, _)| *value)
    }

    /// encode_label maps a value to its label, refusing unmapped values.
    pub fn encode_label(&self, value: u64) -> Result<&'static str> {
        self.label(value).ok_or_else(|| Error::Unencodable {
            what: self.what,
            reason: format!("out of range value {value}"),
        })
    }

    /// encode_value refuses unmapped values in the binary format.
    pub fn encode_value(&self, value: u64) -> Result<u64> {
        self.encode_label(value).map(|_| value)
    }

    /// decode_label maps a label to its value, naming the offending text on
    /// failure.
    pub fn decode_label(&self, label: &str) -> Result<u64> {
        self.value(label)
            .ok_or_else(|| Error::InvalidValue(format!("invalid {} string {label:?}", self.what)))
    }

    /// decode_value refuses unmapped values in the binary format.
    pub fn decode_value(&self, value: u64) -> Result<u64> {
        match self.label(value) {
            Some(_) => Ok(value),
            None => Err(Error::InvalidValue(format!(
                "invalid {} value {value}",
                self.what
            ))),
        }
    }
}

/// enumerated defines a closed enumeration claim. The type is a transparent
/// wrapper around the integer so out of range values stay representable and
/// get rejected at encode time instead.
macro_rules! enumerated {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($what:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal => $label:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl $name {
            $(
                $(#[$vmeta])*
                pub const $variant: Self = Self($value);
            )*

            const TABLE: $crate::macros::EnumTable = $crate::macros::EnumTable {
                what: $what,
                entries: &[$(($value, $label)),*],
            };

            /// Returns the JSON label of the value, if it is a known one.
            pub fn label(&self) -> Option<&'static str> {
                Self::TABLE.label(self.0)
            }

            /// Looks up a value by its JSON label.
            pub fn from_label(label: &str) -> Option<Self> {
                Self::TABLE.value(label).map(Self)
            }

            /// Reports whether the value is one of the defined ones.
            pub fn is_valid(&self) -> bool {
                self.label().is_some()
            }
        }

        impl $crate::cbor::Encode for $name {
            fn to_cbor(&self) -> $crate::Result<$crate::cbor::Value> {
                Ok($crate::cbor::Value::from(Self::TABLE.encode_value(self.0)?))
            }
        }

        impl $crate::cbor::Decode for $name {
            fn from_cbor(value: &$crate::cbor::Value) -> $crate::Result<Self> {
                let value = $crate::cbor::as_uint(value, $what)?;
                Self::TABLE.decode_value(value).map(Self)
            }
        }

        impl $crate::json::Encode for $name {
            fn to_json(&self) -> $crate::Result<$crate::json::Value> {
                Ok($crate::json::Value::from(Self::TABLE.encode_label(self.0)?))
            }
        }

        impl $crate::json::Decode for $name {
            fn from_json(value: &$crate::json::Value) -> $crate::Result<Self> {
                let label = $crate::json::as_str(value, $what)?;
                Self::TABLE.decode_label(label).map(Self)
            }
        }
    };
}

/// claims_set defines a record of independently optional claims with a CBOR
/// integer key and a JSON member name per claim. Claims are written in
/// declaration order, absent ones are omitted, unknown keys are skipped. A
/// member name may be followed by `| "alias"` spellings that are accepted on
/// decode only; a claim seen under two spellings is a duplicate. An optional
/// `base` record is flattened into the same map, ahead of the own claims.
macro_rules! claims_set {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident: $ty:ty = $key:literal, $label:literal $(| $alias:literal)*;
            )*
        }
        $(base $base:ident: $base_ty:ty;)?
    ) => {
        $(#[$meta])*
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: Option<$ty>,
            )*
            $(pub $base: $base_ty,)?
        }

        impl $name {
            pub(crate) fn encode_cbor_entries(
                &self,
                entries: &mut Vec<($crate::cbor::Value, $crate::cbor::Value)>,
            ) -> $crate::Result<()> {
                $(self.$base.encode_cbor_entries(entries)?;)?
                $(
                    if let Some(value) = &self.$field {
                        let encoded = $crate::cbor::Encode::to_cbor(value).map_err(|e| e.in_claim($label))?;
                        entries.push(($crate::cbor::Value::from($key as i64), encoded));
                    }
                )*
                Ok(())
            }

            pub(crate) fn decode_cbor_entry(
                &mut self,
                key: i64,
                value: &$crate::cbor::Value,
            ) -> $crate::Result<bool> {
                match key {
                    $(
                        $key => {
                            let decoded = <$ty as $crate::cbor::Decode>::from_cbor(value)
                                .map_err(|e| e.in_claim($label))?;
                            self.$field = Some(decoded);
                            Ok(true)
                        }
                    )*
                    _ => {
                        $(
                            if self.$base.decode_cbor_entry(key, value)? {
                                return Ok(true);
                            }
                        )?
                        Ok(false)
                    }
                }
            }

            pub(crate) fn encode_json_entries(
                &self,
                entries: &mut $crate::json::Map<String, $crate::json::Value>,
            ) -> $crate::Result<()> {
                $(self.$base.encode_json_entries(entries)?;)?
                $(
                    if let Some(value) = &self.$field {
                        let encoded = $crate::json::Encode::to_json(value).map_err(|e| e.in_claim($label))?;
                        entries.insert($label.to_owned(), encoded);
                    }
                )*
                Ok(())
            }

            pub(crate) fn decode_json_entry(
                &mut self,
                key: &str,
                value: &$crate::json::Value,
            ) -> $crate::Result<bool> {
                match key {
                    $(
                        $label $(| $alias)* => {
                            if self.$field.is_some() {
                                return Err($crate::Error::DuplicateKey($label.to_owned()));
                            }
                            let decoded = <$ty as $crate::json::Decode>::from_json(value)
                                .map_err(|e| e.in_claim($label))?;
                            self.$field = Some(decoded);
                            Ok(true)
                        }
                    )*
                    _ => {
                        $(
                            if self.$base.decode_json_entry(key, value)? {
                                return Ok(true);
                            }
                        )?
                        Ok(false)
                    }
                }
            }
        }

        impl $crate::cbor::Encode for $name {
            fn to_cbor(&self) -> $crate::Result<$crate::cbor::Value> {
                let mut entries = Vec::new();
                self.encode_cbor_entries(&mut entries)?;
                Ok($crate::cbor::Value::Map(entries))
            }
        }

        impl $crate::cbor::Decode for $name {
            fn from_cbor(value: &$crate::cbor::Value) -> $crate::Result<Self> {
                let mut claims = Self::default();
                $crate::cbor::for_each_entry(value, stringify!($name), |key, value| {
                    claims.decode_cbor_entry(key, value)
                })?;
                Ok(claims)
            }
        }

        impl $crate::json::Encode for $name {
            fn to_json(&self) -> $crate::Result<$crate::json::Value> {
                let mut entries = $crate::json::Map::new();
                self.encode_json_entries(&mut entries)?;
                Ok($crate::json::Value::Object(entries))
            }
        }

        impl $crate::json::Decode for $name {
            fn from_json(value: &$crate::json::Value) -> $crate::Result<Self> {
                let mut claims = Self::default();
                $crate::json::for_each_entry(value, stringify!($name), |key, value| {
                    claims.decode_json_entry(key, value)
                })?;
                Ok(claims)
            }
        }
    };
}
