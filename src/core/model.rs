//! # Entities
//!
//! The two records the app works with. Both serialize with camelCase keys,
//! which is the on-disk layout of `allCountries.json` and `<officialName>.json`.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Capital shown when the API lists none (Antarctica, Macau, ...).
pub const NO_CAPITAL: &str = "No Capital";

/// Lightweight summary used in the list. Identity: `name` (official name).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub flag: String,
    pub capital: String,
    pub name: String,
}

/// Full record for the detail screen. Identity and cache key: `official_name`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CountryDetails {
    pub flag_png: String,
    pub common_name: String,
    pub official_name: String,
    pub independent: bool,
    pub currency_name: String,
    pub currency_symbol: String,
    pub capital: String,
    pub region: String,
    pub subregion: String,
    pub languages: Languages,
    pub english_translation: String,
    pub population: u64,
    pub timezone: String,
    pub google_maps_link: String,
}

impl CountryDetails {
    /// Store key for this entity.
    pub fn key(&self) -> &str {
        &self.official_name
    }
}

/// Language code → language name, in the order the API listed them.
///
/// Serialized as a plain JSON object. A `Vec` of pairs rather than a map type
/// so that insertion order is part of equality and survives a round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Languages(Vec<(String, String)>);

impl Languages {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts or replaces the name for `code`, keeping its original position.
    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) {
        let code = code.into();
        let name = name.into();
        match self.0.iter_mut().find(|(c, _)| *c == code) {
            Some(entry) => entry.1 = name,
            None => self.0.push((code, name)),
        }
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, n)| n.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, n)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Languages {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut languages = Languages::new();
        for (code, name) in iter {
            languages.insert(code, name);
        }
        languages
    }
}

impl Serialize for Languages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (code, name) in &self.0 {
            map.serialize_entry(code, name)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Languages {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LanguagesVisitor;

        impl<'de> Visitor<'de> for LanguagesVisitor {
            type Value = Languages;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of language code to language name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Languages, A::Error> {
                let mut languages = Languages::new();
                while let Some((code, name)) = access.next_entry::<String, String>()? {
                    languages.insert(code, name);
                }
                Ok(languages)
            }
        }

        deserializer.deserialize_map(LanguagesVisitor)
    }
}
