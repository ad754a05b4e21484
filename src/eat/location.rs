// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Geographic location (RFC 9711 Section 4.2.10).

use crate::cbor::{self, Decode as _, Encode as _};
use crate::error::{Error, Result};
use crate::json::{self, Decode as _, Encode as _};

/// Location is the geographic position of the entity, modelled after the W3C
/// Geolocation API. Latitude and longitude are mandatory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub altitude_accuracy: Option<f64>,
    pub heading: Option<f64>,
    pub speed: Option<f64>,
    /// Epoch time at which the position was taken.
    pub timestamp: Option<i64>,
    /// Seconds elapsed between taking the position and signing the token.
    pub age: Option<u64>,
}

impl Location {
    /// Creates a location from its mandatory coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..Default::default()
        }
    }

    /// Returns the optional float members with their keys and names, in
    /// encoding order.
    fn floats(&self) -> [(i64, &'static str, Option<f64>); 5] {
        [
            (3, "altitude", self.altitude),
            (4, "accuracy", self.accuracy),
            (5, "altitude-accuracy", self.altitude_accuracy),
            (6, "heading", self.heading),
            (7, "speed", self.speed),
        ]
    }

    fn float_mut(&mut self, key: i64) -> Option<&mut Option<f64>> {
        match key {
            3 => Some(&mut self.altitude),
            4 => Some(&mut self.accuracy),
            5 => Some(&mut self.altitude_accuracy),
            6 => Some(&mut self.heading),
            7 => Some(&mut self.speed),
            _ => None,
        }
    }
}

const LATITUDE: (i64, &str) = (1, "latitude");
const LONGITUDE: (i64, &str) = (2, "longitude");
const TIMESTAMP: (i64, &str) = (8, "timestamp");
const AGE: (i64, &str) = (9, "age");

fn json_key(name: &str) -> Option<i64> {
    Some(match name {
        "latitude" => 1,
        "longitude" => 2,
        "altitude" => 3,
        "accuracy" => 4,
        "altitude-accuracy" => 5,
        "heading" => 6,
        "speed" => 7,
        "timestamp" => 8,
        "age" => 9,
        _ => return None,
    })
}

/// Partially decoded location, before the mandatory coordinates are checked.
#[derive(Default)]
struct Builder {
    latitude: Option<f64>,
    longitude: Option<f64>,
    rest: Location,
}

impl Builder {
    fn finish(self) -> Result<Location> {
        Ok(Location {
            latitude: self.latitude.ok_or(Error::MissingField(LATITUDE.1))?,
            longitude: self.longitude.ok_or(Error::MissingField(LONGITUDE.1))?,
            ..self.rest
        })
    }
}

impl cbor::Encode for Location {
    fn to_cbor(&self) -> Result<cbor::Value> {
        let mut entries = vec![
            (cbor::Value::from(LATITUDE.0), cbor::Value::Float(self.latitude)),
            (cbor::Value::from(LONGITUDE.0), cbor::Value::Float(self.longitude)),
        ];
        for (key, _, value) in self.floats() {
            if let Some(value) = value {
                entries.push((cbor::Value::from(key), cbor::Value::Float(value)));
            }
        }
        if let Some(timestamp) = self.timestamp {
            entries.push((cbor::Value::from(TIMESTAMP.0), timestamp.to_cbor()?));
        }
        if let Some(age) = self.age {
            entries.push((cbor::Value::from(AGE.0), age.to_cbor()?));
        }
        Ok(cbor::Value::Map(entries))
    }
}

impl cbor::Decode for Location {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        let mut b = Builder::default();
        cbor::for_each_entry(value, "location", |key, value| {
            match key {
                1 => b.latitude = Some(cbor::as_number(value, LATITUDE.1)?),
                2 => b.longitude = Some(cbor::as_number(value, LONGITUDE.1)?),
                8 => b.rest.timestamp = Some(i64::from_cbor(value).map_err(|e| e.in_claim(TIMESTAMP.1))?),
                9 => b.rest.age = Some(u64::from_cbor(value).map_err(|e| e.in_claim(AGE.1))?),
                _ => match b.rest.float_mut(key) {
                    Some(slot) => *slot = Some(cbor::as_number(value, "location")?),
                    None => return Ok(false),
                },
            }
            Ok(true)
        })?;
        b.finish()
    }
}

impl json::Encode for Location {
    fn to_json(&self) -> Result<json::Value> {
        let mut entries = json::Map::new();
        entries.insert(LATITUDE.1.into(), json::number(self.latitude, LATITUDE.1)?);
        entries.insert(LONGITUDE.1.into(), json::number(self.longitude, LONGITUDE.1)?);
        for (_, name, value) in self.floats() {
            if let Some(value) = value {
                entries.insert(name.into(), json::number(value, "location")?);
            }
        }
        if let Some(timestamp) = self.timestamp {
            entries.insert(TIMESTAMP.1.into(), timestamp.to_json()?);
        }
        if let Some(age) = self.age {
            entries.insert(AGE.1.into(), age.to_json()?);
        }
        Ok(json::Value::Object(entries))
    }
}

impl json::Decode for Location {
    fn from_json(value: &json::Value) -> Result<Self> {
        let mut b = Builder::default();
        json::for_each_entry(value, "location", |name, value| {
            let Some(key) = json_key(name) else {
                return Ok(false);
            };
            match key {
                1 => b.latitude = Some(json::as_number(value, LATITUDE.1)?),
                2 => b.longitude = Some(json::as_number(value, LONGITUDE.1)?),
                8 => b.rest.timestamp = Some(i64::from_json(value).map_err(|e| e.in_claim(TIMESTAMP.1))?),
                9 => b.rest.age = Some(u64::from_json(value).map_err(|e| e.in_claim(AGE.1))?),
                _ => {
                    if let Some(slot) = b.rest.float_mut(key) {
                        *slot = Some(json::as_number(value, "location")?);
                    }
                }
            }
            Ok(true)
        })?;
        b.finish()
    }
}
