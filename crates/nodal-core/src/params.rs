//! Analysis parameter sets.

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Named real-valued parameters handed to component models during a sweep.
///
/// Only [`Parameters::FREQUENCY`] is read by the built-in components, but any
/// key may be stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    values: IndexMap<String, f64>,
}

impl Parameters {
    /// Key for the analysis frequency in hertz.
    pub const FREQUENCY: &'static str = "frequency";

    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parameter set holding only a frequency.
    pub fn with_frequency(frequency: f64) -> Self {
        let mut params = Self::new();
        params.set(Self::FREQUENCY, frequency);
        params
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace a parameter.
    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    /// Look up a parameter.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Look up a parameter that a model cannot do without.
    pub fn require(&self, key: &str) -> Result<f64> {
        self.get(key).ok_or_else(|| Error::MissingParameter(key.to_string()))
    }

    /// The analysis frequency, if set.
    pub fn frequency(&self) -> Option<f64> {
        self.get(Self::FREQUENCY)
    }

    /// Iterate over all parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
