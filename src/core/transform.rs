//! # Response Transformer
//!
//! Pure mapping from raw API payloads to app entities.
//! Multi-valued upstream fields collapse to their first element
//! (capital, timezone, currency); languages are kept whole.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::model::{Country, CountryDetails, Languages, NO_CAPITAL};
use crate::countries::types::{Currency, Translation};
use crate::countries::{CountryDetailsResponse, CountryResponse};

/// Maps every `/all` entry to a `Country`. Length and order are preserved.
pub fn to_country_list(responses: &[CountryResponse]) -> Vec<Country> {
    responses
        .iter()
        .map(|r| Country {
            flag: r.flags.png.clone(),
            capital: first_capital(&r.capital),
            name: r.name.official.clone(),
        })
        .collect()
}

/// Flattens one `/name/{name}` entry into `CountryDetails`.
pub fn to_country_details(response: &CountryDetailsResponse) -> CountryDetails {
    let currency: Currency = response
        .currencies
        .values()
        .next()
        .map(lenient)
        .unwrap_or_default();

    let languages: Languages = response
        .languages
        .iter()
        .filter_map(|(code, name)| name.as_str().map(|n| (code.clone(), n.to_string())))
        .collect();

    CountryDetails {
        flag_png: response.flags.png.clone(),
        common_name: response.name.common.clone(),
        official_name: response.name.official.clone(),
        independent: response.independent.unwrap_or(false),
        currency_name: currency.name,
        currency_symbol: currency.symbol,
        capital: first_capital(&response.capital),
        region: response.region.clone(),
        subregion: response.subregion.clone(),
        languages,
        english_translation: english_translation(response),
        population: response.population,
        timezone: response.timezones.first().cloned().unwrap_or_default(),
        google_maps_link: response.maps.google_maps.clone(),
    }
}

fn first_capital(capitals: &[String]) -> String {
    capitals
        .first()
        .cloned()
        .unwrap_or_else(|| NO_CAPITAL.to_string())
}

/// v3.1 has no `eng` translation entry since `name` is already English;
/// an explicit one wins when present.
fn english_translation(response: &CountryDetailsResponse) -> String {
    response
        .translations
        .get("eng")
        .map(|t| lenient::<Translation>(t).common)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| response.name.common.clone())
}

/// Decodes a nested object, falling back to empty fields if it is malformed.
fn lenient<T: DeserializeOwned + Default>(value: &Value) -> T {
    serde_json::from_value(value.clone()).unwrap_or_default()
}
