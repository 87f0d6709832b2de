//! # TUI Components
//!
//! Components follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: app name, status message, spinner
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; a render wrapper borrowing it is
//! built each frame with fresh props from `App`.
//!
//! - `SearchBox`: single-line query input
//! - `CountryListState` / `CountryList`: selectable country table
//! - `DetailViewState` / `DetailView`: scrollable country details
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── country_list.rs  (List screen body)
//! ├── detail_view.rs   (Detail screen)
//! └── search_box/      (Query input with horizontal scroll)
//! ```

pub mod country_list;
pub mod detail_view;
pub mod search_box;
mod title_bar;

pub use country_list::{CountryList, CountryListState, ListEvent};
pub use detail_view::{DetailEvent, DetailView, DetailViewState};
pub use search_box::{SearchBox, SearchEvent};
pub use title_bar::TitleBar;
