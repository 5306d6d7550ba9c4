use super::*;
use crate::draw::{CompositeMode, DrawingSurface};
use crate::input::InputEvent;
use crate::input::tool::ToolState;
use crate::util::Point;

fn surface() -> DrawingSurface {
    DrawingSurface::new(120, 40).unwrap()
}

#[test]
fn move_while_idle_paints_nothing() {
    let mut engine = StrokeEngine::new();
    let mut surface = surface();

    let painted = engine
        .on_pointer_move(Point::new(20.0, 20.0), &surface)
        .unwrap();

    assert!(!painted);
    assert!(surface.is_blank().unwrap());
    assert_eq!(engine.state(), &DrawingState::Idle);
}

#[test]
fn up_without_down_is_noop() {
    let mut engine = StrokeEngine::new();
    assert!(!engine.on_pointer_up());
    assert!(!engine.is_drawing());
}

#[test]
fn stroke_paints_incrementally_and_completes() {
    let mut engine = StrokeEngine::new();
    let mut surface = surface();
    let tools = ToolState::default();

    engine.on_pointer_down(Point::new(10.0, 10.0), &tools);
    assert!(engine.is_drawing());
    assert!(surface.is_blank().unwrap());

    assert!(
        engine
            .on_pointer_move(Point::new(60.0, 10.0), &surface)
            .unwrap()
    );
    // Visible before the stroke ends.
    assert_ne!(surface.pixel(35, 10).unwrap(), Some(0));

    engine
        .on_pointer_move(Point::new(100.0, 10.0), &surface)
        .unwrap();
    assert_ne!(surface.pixel(80, 10).unwrap(), Some(0));

    if let DrawingState::Drawing { segments, last, .. } = engine.state() {
        assert_eq!(*segments, 2);
        assert_eq!(*last, Point::new(100.0, 10.0));
    } else {
        panic!("Expected to be drawing");
    }

    assert!(engine.on_pointer_up());
    assert!(!engine.is_drawing());
}

#[test]
fn parameters_are_latched_at_stroke_start() {
    let mut engine = StrokeEngine::new();
    let mut tools = ToolState::default();

    engine.on_pointer_down(Point::new(5.0, 5.0), &tools);
    tools.set_tool("eraser");
    tools.set_width(20.0);

    let style = engine.active_style().unwrap();
    assert_eq!(style.composite, CompositeMode::Paint);
    assert_eq!(style.width, 3.0);
}

#[test]
fn second_pointer_down_keeps_first_stroke() {
    let mut engine = StrokeEngine::new();
    let tools = ToolState::default();

    engine.on_pointer_down(Point::new(5.0, 5.0), &tools);
    engine.on_pointer_down(Point::new(50.0, 25.0), &tools);

    if let DrawingState::Drawing { start, .. } = engine.state() {
        assert_eq!(*start, Point::new(5.0, 5.0));
    } else {
        panic!("Expected to be drawing");
    }
}

#[test]
fn eraser_stroke_clears_to_transparent() {
    let mut engine = StrokeEngine::new();
    let mut surface = surface();
    {
        let ctx = surface.context().unwrap();
        ctx.set_source_rgba(1.0, 1.0, 1.0, 1.0);
        ctx.paint().unwrap();
    }

    let mut tools = ToolState::default();
    tools.set_tool("eraser");
    engine.on_pointer_down(Point::new(10.0, 20.0), &tools);
    engine
        .on_pointer_move(Point::new(110.0, 20.0), &surface)
        .unwrap();
    engine.on_pointer_up();

    assert_eq!(surface.pixel(60, 20).unwrap(), Some(0));
    // Eraser width is 9px, so rows well off the center line are cleared too.
    assert_eq!(surface.pixel(60, 23).unwrap(), Some(0));
    assert_ne!(surface.pixel(60, 2).unwrap(), Some(0));
}

#[test]
fn cancel_drops_stroke_without_completion() {
    let mut engine = StrokeEngine::new();
    engine.on_pointer_down(Point::new(1.0, 1.0), &ToolState::default());
    engine.cancel();
    assert!(!engine.on_pointer_up());
}

#[test]
fn touch_events_normalize_to_first_point() {
    let start = InputEvent::TouchStart {
        touches: vec![Point::new(4.0, 5.0), Point::new(90.0, 90.0)],
    };
    assert_eq!(
        pointer_action(&start),
        Some(PointerAction::Down(Point::new(4.0, 5.0)))
    );

    let moved = InputEvent::TouchMove {
        touches: vec![Point::new(7.0, 8.0)],
    };
    assert_eq!(
        pointer_action(&moved),
        Some(PointerAction::Move(Point::new(7.0, 8.0)))
    );

    assert_eq!(pointer_action(&InputEvent::TouchEnd), Some(PointerAction::Up));
    assert_eq!(
        pointer_action(&InputEvent::TouchMove { touches: vec![] }),
        None
    );
    assert_eq!(pointer_action(&InputEvent::Undo), None);
}

#[test]
fn mouse_events_normalize_directly() {
    assert_eq!(
        pointer_action(&InputEvent::PointerMove { x: 1.0, y: 2.0 }),
        Some(PointerAction::Move(Point::new(1.0, 2.0)))
    );
    assert_eq!(
        pointer_action(&InputEvent::PointerLeave),
        Some(PointerAction::Leave)
    );
}
