use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Props are struct fields set by the parent before rendering. `render`
/// takes `&mut self` so components can update presentation state (scroll
/// offsets, cached measurements) during the draw pass, as ratatui's
/// `StatefulWidget` does.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that interprets terminal events.
pub trait EventHandler {
    /// The high-level event this component emits to its parent.
    type Event;

    /// Consume a low-level `TuiEvent`, optionally producing a high-level event.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
