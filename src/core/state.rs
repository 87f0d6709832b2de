//! # Application State
//!
//! Core business state for atlas. Domain logic only, no TUI-specific types.
//! Presentation state (cursor position, scroll) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── service: Arc<CountryService>  // cache-or-fetch pipeline
//! ├── screen: Screen                // which view is in front
//! ├── list: ListController          // all countries + search
//! ├── detail: DetailController      // current country + save flag
//! └── status_message: String        // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::detail::DetailController;
use crate::core::list::ListController;
use crate::core::service::CountryService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    Detail,
}

pub struct App {
    pub service: Arc<CountryService>,
    pub screen: Screen,
    pub list: ListController,
    pub detail: DetailController,
    pub status_message: String,
}

impl App {
    pub fn new(service: Arc<CountryService>) -> Self {
        Self {
            service,
            screen: Screen::List,
            list: ListController::new(),
            detail: DetailController::new(),
            status_message: String::from("Welcome to atlas!"),
        }
    }

    /// True while any load is in flight (drives the spinner).
    pub fn is_loading(&self) -> bool {
        self.list.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::list::ListPhase;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let (_dir, app) = test_app();
        assert_eq!(app.status_message, "Welcome to atlas!");
        assert_eq!(app.screen, super::Screen::List);
        assert_eq!(app.list.phase(), &ListPhase::Idle);
        assert!(!app.is_loading());
    }
}
