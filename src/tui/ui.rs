use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::{App, Screen};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CountryList, DetailView, TitleBar};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_glyph(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [title_area, main_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());
    let spinner = spinner_glyph(spinner_frame);

    TitleBar::new(app.status_message.clone(), app.is_loading(), spinner).render(frame, title_area);

    match app.screen {
        Screen::List => {
            let [search_area, list_area] = Layout::vertical([Length(3), Min(0)]).areas(main_area);

            tui.search_box.enabled = app.list.search_enabled();
            tui.search_box.focused = app.list.search_focused();
            tui.search_box.render(frame, search_area);

            CountryList {
                state: &mut tui.country_list,
                countries: app.list.visible(),
                phase: app.list.phase(),
                error: app.list.error(),
                filtered: app.list.is_filtered(),
                spinner,
            }
            .render(frame, list_area);
        }
        Screen::Detail => {
            DetailView {
                state: &mut tui.detail_view,
                lines: app.detail.display_lines(),
                save_icon: app.detail.save_icon(),
                origin: app.detail.origin(),
            }
            .render(frame, main_area);
        }
    }
}
