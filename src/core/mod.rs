//! # Core Application Logic
//!
//! This module contains atlas's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Controllers          │
//!                    │  • State + Action       │
//!                    │  • update() (reducer)   │
//!                    │  • Store / Transform    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  countries │
//!     │  Adapter   │                          │ (REST API) │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`model`]: `Country` and `CountryDetails`
//! - [`transform`]: raw API payloads → entities
//! - [`store`]: file-per-entity JSON cache
//! - [`service`]: cache-or-fetch pipeline shared by the controllers
//! - [`list`] / [`detail`]: the two screen controllers
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`config`]: layered settings

pub mod action;
pub mod config;
pub mod detail;
pub mod list;
pub mod model;
pub mod service;
pub mod state;
pub mod store;
pub mod transform;
