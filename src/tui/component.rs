use ratatui::Frame;
use ratatui::layout::Rect;

/// Something that draws itself into a rectangle of the frame.
///
/// Props are struct fields set by the parent before rendering; `&mut self`
/// lets a component keep presentation state (scroll offsets, list
/// selection) up to date while it draws.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns raw terminal events into its own higher-level events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a `TuiEvent`; `None` means the event was absorbed or ignored.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
