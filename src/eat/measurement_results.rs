// eat-rs: entity attestation token claims
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Measurement results (RFC 9711 Section 4.2.17).

use super::string_or_binary::StringOrBinary;
use crate::cbor::{self, Decode as _, Encode as _};
use crate::error::{Error, Result};
use crate::json::{self, Decode as _, Encode as _};

enumerated! {
    /// ResultType is the outcome of comparing one measurement.
    pub struct ResultType("result-type") {
        /// The measurement matched the reference.
        SUCCESS = 1 => "success",
        /// The measurement did not match the reference.
        FAIL = 2 => "fail",
        /// The comparison was not attempted.
        NOT_RUN = 3 => "not-run",
        /// The measurement was expected but not found.
        ABSENT = 4 => "absent",
    }
}

/// IndividualResult is the result of one comparison: `[result-id, result]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndividualResult {
    pub id: StringOrBinary,
    pub result: ResultType,
}

impl IndividualResult {
    /// Creates a result for the given identifier.
    pub fn new(id: impl Into<StringOrBinary>, result: ResultType) -> Self {
        Self {
            id: id.into(),
            result,
        }
    }
}

impl cbor::Encode for IndividualResult {
    fn to_cbor(&self) -> Result<cbor::Value> {
        Ok(cbor::Value::Array(vec![
            self.id.to_cbor()?,
            self.result.to_cbor()?,
        ]))
    }
}

impl cbor::Decode for IndividualResult {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        let items = cbor::as_array_len(value, "individual-result", 2, 2)?;
        Ok(Self {
            id: StringOrBinary::from_cbor(&items[0]).map_err(|e| e.in_claim("result-id"))?,
            result: ResultType::from_cbor(&items[1]).map_err(|e| e.in_claim("result"))?,
        })
    }
}

impl json::Encode for IndividualResult {
    fn to_json(&self) -> Result<json::Value> {
        Ok(json::Value::Array(vec![
            self.id.to_json()?,
            self.result.to_json()?,
        ]))
    }
}

impl json::Decode for IndividualResult {
    fn from_json(value: &json::Value) -> Result<Self> {
        let items = json::as_array_len(value, "individual-result", 2, 2)?;
        Ok(Self {
            id: StringOrBinary::from_json(&items[0]).map_err(|e| e.in_claim("result-id"))?,
            result: ResultType::from_json(&items[1]).map_err(|e| e.in_claim("result"))?,
        })
    }
}

/// MeasurementResultsGroup collects the results produced by one measurement
/// system (verifier, TEE, ...): `[system, [ result* ]]`.
///
/// The wire grammar asks for at least one result, but an empty list decodes
/// fine and is only reported by [`MeasurementResultsGroup::validate`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MeasurementResultsGroup {
    pub system: String,
    pub results: Vec<IndividualResult>,
}

impl MeasurementResultsGroup {
    /// Creates a group for the given measurement system.
    pub fn new(system: impl Into<String>, results: Vec<IndividualResult>) -> Self {
        Self {
            system: system.into(),
            results,
        }
    }

    /// validate checks that the group carries at least one result.
    pub fn validate(&self) -> Result<()> {
        if self.results.is_empty() {
            return Err(Error::InvalidValue(format!(
                "measurement system {:?} has no results",
                self.system
            )));
        }
        Ok(())
    }
}

impl cbor::Encode for MeasurementResultsGroup {
    fn to_cbor(&self) -> Result<cbor::Value> {
        Ok(cbor::Value::Array(vec![
            cbor::Value::Text(self.system.clone()),
            self.results.to_cbor()?,
        ]))
    }
}

impl cbor::Decode for MeasurementResultsGroup {
    fn from_cbor(value: &cbor::Value) -> Result<Self> {
        let items = cbor::as_array_len(value, "measurement-results-group", 2, 2)?;
        Ok(Self {
            system: cbor::as_text(&items[0], "measurement-system")?.to_owned(),
            results: Vec::from_cbor(&items[1]).map_err(|e| e.in_claim("measurement-results"))?,
        })
    }
}

impl json::Encode for MeasurementResultsGroup {
    fn to_json(&self) -> Result<json::Value> {
        Ok(json::Value::Array(vec![
            json::Value::String(self.system.clone()),
            self.results.to_json()?,
        ]))
    }
}

impl json::Decode for MeasurementResultsGroup {
    fn from_json(value: &json::Value) -> Result<Self> {
        let items = json::as_array_len(value, "measurement-results-group", 2, 2)?;
        Ok(Self {
            system: json::as_str(&items[0], "measurement-system")?.to_owned(),
            results: Vec::from_json(&items[1]).map_err(|e| e.in_claim("measurement-results"))?,
        })
    }
}
