//! Feature Vectors
//!
//! The six soil/environment measurements in their fixed order
//! (nitrogen, phosphorus, potassium, temperature, humidity, pH), plus the
//! acceptance-boundary parsing that turns raw form or JSON input into them.
//!
//! No range validation happens here: any finite value is accepted and passed
//! to the normalizer unclamped.

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of measurements the fitted artifacts expect
pub const FEATURE_COUNT: usize = 6;

/// Canonical feature names, in pipeline order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "nitrogen",
    "phosphorus",
    "potassium",
    "temperature",
    "humidity",
    "ph",
];

/// HTML form field names, in pipeline order
///
/// "Phosporus" is misspelled on purpose: it is the field name existing front
/// ends submit.
pub const FORM_FIELDS: [&str; FEATURE_COUNT] = [
    "Nitrogen",
    "Phosporus",
    "Potassium",
    "Temperature",
    "Humidity",
    "pH",
];

/// Raw measurements for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FeatureFields")]
pub struct FeatureVector {
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
    temperature: f64,
    humidity: f64,
    ph: f64,
}

/// Unvalidated JSON shape of a `FeatureVector`
#[derive(Deserialize)]
struct FeatureFields {
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
    temperature: f64,
    humidity: f64,
    ph: f64,
}

impl TryFrom<FeatureFields> for FeatureVector {
    type Error = InputError;

    fn try_from(f: FeatureFields) -> Result<Self, Self::Error> {
        FeatureVector::new(f.nitrogen, f.phosphorus, f.potassium, f.temperature, f.humidity, f.ph)
    }
}

impl FeatureVector {
    /// Build a vector from the six measurements, rejecting NaN and infinities
    pub fn new(
        nitrogen: f64,
        phosphorus: f64,
        potassium: f64,
        temperature: f64,
        humidity: f64,
        ph: f64,
    ) -> Result<Self, InputError> {
        Self::from_array([nitrogen, phosphorus, potassium, temperature, humidity, ph])
    }

    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Result<Self, InputError> {
        for (field, value) in FEATURE_NAMES.into_iter().zip(values) {
            if !value.is_finite() {
                return Err(InputError::NonFinite { field, value });
            }
        }

        let [nitrogen, phosphorus, potassium, temperature, humidity, ph] = values;
        Ok(Self {
            nitrogen,
            phosphorus,
            potassium,
            temperature,
            humidity,
            ph,
        })
    }

    pub fn from_slice(values: &[f64]) -> Result<Self, InputError> {
        let array: [f64; FEATURE_COUNT] =
            values.try_into().map_err(|_| InputError::WrongArity {
                expected: FEATURE_COUNT,
                got: values.len(),
            })?;
        Self::from_array(array)
    }

    /// Parse the six submitted form fields
    ///
    /// Values are trimmed before parsing. The first missing or malformed
    /// field (in pipeline order) is reported.
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self, InputError> {
        let mut values = [0.0; FEATURE_COUNT];

        for (slot, field) in values.iter_mut().zip(FORM_FIELDS) {
            let raw = form.get(field).ok_or(InputError::MissingField(field))?;
            *slot = raw.trim().parse::<f64>().map_err(|_| InputError::NotNumeric {
                field,
                value: raw.clone(),
            })?;
        }

        Self::from_array(values)
    }

    pub fn nitrogen(&self) -> f64 {
        self.nitrogen
    }

    pub fn phosphorus(&self) -> f64 {
        self.phosphorus
    }

    pub fn potassium(&self) -> f64 {
        self.potassium
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn ph(&self) -> f64 {
        self.ph
    }

    /// Measurements in pipeline order
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
        ]
    }
}

/// Output of the min-max then standardization transforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedVector([f64; FEATURE_COUNT]);

impl NormalizedVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }
}
