use crate::input::events::InputEvent;
use crate::util::Point;

use super::PointerAction;

/// Normalizes mouse and touch events into one logical pointer action.
///
/// Touch events consult only the first touch point; a touch-start or
/// touch-move carrying no points is dropped. Non-pointer events yield `None`.
pub fn pointer_action(event: &InputEvent) -> Option<PointerAction> {
    match event {
        InputEvent::PointerDown { x, y } => Some(PointerAction::Down(Point::new(*x, *y))),
        InputEvent::PointerMove { x, y } => Some(PointerAction::Move(Point::new(*x, *y))),
        InputEvent::PointerUp => Some(PointerAction::Up),
        InputEvent::PointerLeave => Some(PointerAction::Leave),
        InputEvent::TouchStart { touches } => touches.first().copied().map(PointerAction::Down),
        InputEvent::TouchMove { touches } => touches.first().copied().map(PointerAction::Move),
        InputEvent::TouchEnd => Some(PointerAction::Up),
        _ => None,
    }
}
