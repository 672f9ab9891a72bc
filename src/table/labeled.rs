use std::collections::HashMap;

use serde::Serialize;
use serde::ser::SerializeMap;

use super::TableError;

/// Values keyed by identifier, iterated in insertion order.
///
/// [`Labeled::insert`] and [`Labeled::from_pairs`] reject a repeated
/// identifier. Collecting through [`FromIterator`] keeps the first value of a
/// repeated identifier and drops the later ones; use it only for identifiers
/// that are already known to be unique.
#[derive(Debug, Clone)]
pub struct Labeled<T> {
    ids: Vec<String>,
    values: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Labeled<T> {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            values: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Labeled<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(id, value)` pairs, failing on the first repeated identifier.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
    {
        let mut labeled = Self::new();
        for (id, value) in pairs {
            labeled.insert(id, value)?;
        }
        Ok(labeled)
    }

    /// Append a value. Identifiers must be unique.
    pub fn insert(&mut self, id: impl Into<String>, value: T) -> Result<(), TableError> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(TableError::DuplicateIdentifier(id));
        }
        self.index.insert(id.clone(), self.ids.len());
        self.ids.push(id);
        self.values.push(value);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&idx| &self.values[idx])
    }

    /// Like [`Labeled::get`], but a missing identifier is an error.
    pub fn lookup(&self, id: &str) -> Result<&T, TableError> {
        self.get(id)
            .ok_or_else(|| TableError::MissingIdentifier(id.to_owned()))
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.ids.iter().map(String::as_str)
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.values.iter()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &T)> + '_ {
        self.ids.iter().map(String::as_str).zip(self.values.iter())
    }

    /// Keep only the rows whose identifier appears in `ids`, in the order of `ids`.
    /// Identifiers without a row are skipped.
    #[must_use]
    pub fn restrict_to<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> Self
    where
        T: Clone,
    {
        let mut restricted = Self::new();
        for id in ids {
            if let Some(value) = self.get(id) {
                // Duplicates in `ids` are collapsed to their first occurrence.
                let _ = restricted.insert(id, value.clone());
            }
        }
        restricted
    }

    /// Transform every value, keeping identifiers and order.
    #[must_use]
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Labeled<U> {
        Labeled {
            ids: self.ids.clone(),
            values: self.values.iter().map(f).collect(),
            index: self.index.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for Labeled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids && self.values == other.values
    }
}

impl<S: Into<String>, T> FromIterator<(S, T)> for Labeled<T> {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut labeled = Self::new();
        for (id, value) in iter {
            let _ = labeled.insert(id, value);
        }
        labeled
    }
}

/// Serialized as a map that keeps insertion order.
impl<T: Serialize> Serialize for Labeled<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (id, value) in self.iter() {
            map.serialize_entry(id, value)?;
        }
        map.end()
    }
}
