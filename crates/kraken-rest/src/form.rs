//! Form-encoded request payloads
//!
//! Kraken takes every parameter as an `application/x-www-form-urlencoded`
//! POST body. The encoded string is both what gets signed and what gets
//! sent, so encoding has to be deterministic: fields are kept sorted by key.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{RestError, RestResult};

/// Form field key/value pairs for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, returning the previous value if there was one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`FormData::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a field if the value is present
    pub fn set_opt<V: ToString>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.set(key, value.to_string());
        }
    }

    /// Get a field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Remove a field
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Check if a field is set
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the form has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over fields in encoding order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Apply extra arguments, overwriting fields with the same key
    ///
    /// Fails without touching the form if any float argument is NaN or
    /// infinite.
    pub fn extend_args<K, I>(&mut self, args: I) -> RestResult<()>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ArgValue)>,
    {
        let args: Vec<(String, ArgValue)> =
            args.into_iter().map(|(key, value)| (key.into(), value)).collect();

        if let Some((key, value)) = args.iter().find(|(_, value)| !value.is_finite()) {
            return Err(RestError::Construction(format!(
                "argument {} is not a finite number: {}",
                key, value
            )));
        }

        for (key, value) in args {
            self.set(key, value.to_form_value());
        }
        Ok(())
    }

    /// URL-encode the form, keys in ascending order
    pub fn encode(&self) -> RestResult<String> {
        serde_urlencoded::to_string(&self.0).map_err(|e| RestError::Construction(e.to_string()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        for (key, value) in iter {
            form.set(key, value);
        }
        form
    }
}

/// Value of an extra request argument
///
/// Every variant has a form encoding, so no argument is ever dropped.
/// Non-finite floats are rejected by [`FormData::extend_args`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// Sent as-is
    String(String),
    /// Base 10
    Integer(i64),
    /// Fixed point with 8 decimals, must be finite
    Float(f64),
    /// `true` / `false`
    Boolean(bool),
}

impl ArgValue {
    /// False only for NaN or infinite floats, which have no form encoding
    /// Kraken accepts
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Float(f) => f.is_finite(),
            _ => true,
        }
    }

    /// Render the value as a form field
    pub fn to_form_value(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => format!("{:.8}", f),
            Self::Boolean(b) => b.to_string(),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_form_value())
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for ArgValue {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}
