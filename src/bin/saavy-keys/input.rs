//! Terminal mouse to keyboard pointer events

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use saavy_keys::keyboard::PointerEvent;

/// Translate a mouse event into surface coordinates of `area`.
///
/// Only the left button plays. A press must land on the keyboard, but once
/// down the pointer is followed anywhere so drags and lifts off the edge
/// still reach the surface. Cells are hit at their centre, the same point
/// the renderer samples.
pub fn pointer_event(mouse: MouseEvent, area: Rect) -> Option<PointerEvent> {
    let x = mouse.column as f32 - area.x as f32 + 0.5;
    let y = mouse.row as f32 - area.y as f32 + 0.5;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let inside = area.contains(Position::new(mouse.column, mouse.row));
            inside.then_some(PointerEvent::Down { x, y })
        }
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::Move { x, y }),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Up { x, y }),
        _ => None,
    }
}
