use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// The three panes follow the same pattern:
/// - Props arrive as struct fields (profile sections, the selected date,
///   the accepted-file list).
/// - Persistent state, if any, is borrowed from `TuiState`.
/// - Rendering happens into a `Frame` within a given `Rect`.
///
/// `render` takes `&mut self` so components can update presentation state
/// (scroll offsets, cached layouts) during the render pass, matching
/// Ratatui's `StatefulWidget` shape.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns low-level terminal events into high-level ones.
///
/// This is where "click on a day cell" becomes `CalendarEvent::Selected`
/// and "d pressed twice on a list row" becomes `IntakeUiEvent::Remove`.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
