//! # Countries API
//!
//! Remote side of atlas: the `CountrySource` trait, its REST Countries
//! implementation, and the raw payload types it decodes.

pub mod rest;
pub mod source;
pub mod types;

pub use rest::RestCountriesSource;
pub use source::{CountrySource, SourceError};
pub use types::{CountryDetailsResponse, CountryResponse};
