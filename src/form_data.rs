//! `application/x-www-form-urlencoded` body helper
//!
//! Pairs are encoded with [`url::form_urlencoded`]: keys in ascending byte
//! order, values of a repeated key in insertion order, space as `+`, and every
//! byte other than ASCII alphanumerics and `*-._` percent-encoded.

use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use url::form_urlencoded;

/// Ordered multi-map of form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    values: BTreeMap<String, Vec<String>>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a form-urlencoded payload. Malformed escapes are kept as-is.
    pub fn parse(input: &[u8]) -> Self {
        form_urlencoded::parse(input).into_owned().collect()
    }

    /// Append `value` to the values already stored under `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// Replace every value stored under `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), vec![value.into()]);
    }

    /// First value stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.values.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Every key/value pair, in the order they are encoded.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        })
    }

    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.iter() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Encoded form as request body bytes. Empty for an empty form.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode().into_bytes()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        form.extend(iter);
        form
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for FormData {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl From<HashMap<String, Vec<String>>> for FormData {
    fn from(map: HashMap<String, Vec<String>>) -> Self {
        // Keys without values would not survive encoding.
        let values = map
            .into_iter()
            .filter(|(_, values)| !values.is_empty())
            .collect();
        Self { values }
    }
}

impl From<FormData> for Vec<u8> {
    fn from(form: FormData) -> Self {
        form.to_bytes()
    }
}

impl fmt::Display for FormData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for FormData {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s.as_bytes()))
    }
}
