//! Raw REST Countries v3.1 payload shapes.
//!
//! These mirror the JSON the API sends, nothing more. Fields the API omits
//! for some countries (capital, currencies, subregion, ...) default to empty
//! so a single odd entry never fails the whole response.
//! Flattening into app entities happens in `core::transform`.

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Flags {
    #[serde(default)]
    pub png: String,
}

/// `name` block of the `/all?fields=name,capital,flags` response.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct OfficialName {
    #[serde(default)]
    pub official: String,
}

/// One entry of `GET /all?fields=name,capital,flags`.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CountryResponse {
    #[serde(default)]
    pub name: OfficialName,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub flags: Flags,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CountryName {
    #[serde(default)]
    pub common: String,
    #[serde(default)]
    pub official: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Translation {
    #[serde(default)]
    pub official: String,
    #[serde(default)]
    pub common: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Maps {
    #[serde(default, rename = "googleMaps")]
    pub google_maps: String,
}

/// One entry of `GET /name/{name}`.
///
/// `currencies`, `languages` and `translations` are kept as JSON objects so
/// their key order survives decoding (serde_json is built with
/// `preserve_order`); the transformer relies on "first entry" meaning the
/// first one the API sent.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CountryDetailsResponse {
    #[serde(default)]
    pub flags: Flags,
    #[serde(default)]
    pub name: CountryName,
    #[serde(default)]
    pub independent: Option<bool>,
    #[serde(default)]
    pub currencies: Map<String, Value>,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: String,
    #[serde(default)]
    pub languages: Map<String, Value>,
    #[serde(default)]
    pub translations: Map<String, Value>,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub timezones: Vec<String>,
    #[serde(default)]
    pub maps: Maps,
}
