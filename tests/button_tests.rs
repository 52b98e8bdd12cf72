use sprite_pick::button::ButtonState;
use sprite_pick::utils::{Position, Size};

fn button() -> ButtonState {
    ButtonState::new(
        Position { x: 100.0, y: 100.0 },
        Size {
            width: 114.0,
            height: 38.0,
        },
    )
}

#[test]
fn click_is_consumed_once() {
    let mut state = button();
    state.on_cursor_moved(Position { x: 170.0, y: 180.0 });
    state.on_left_press();
    assert_eq!(state.take_clicked(), Some(Position { x: 170.0, y: 180.0 }));
    assert_eq!(state.take_clicked(), None, "click flag must be one-shot");
}

#[test]
fn click_records_cursor_at_press_time() {
    let mut state = button();
    state.on_cursor_moved(Position { x: 10.0, y: 20.0 });
    state.on_left_press();
    state.on_cursor_moved(Position { x: 300.0, y: 300.0 });
    assert_eq!(state.take_clicked(), Some(Position { x: 10.0, y: 20.0 }));
}

#[test]
fn release_clears_pressed() {
    let mut state = button();
    state.set_pressed();
    assert!(state.pressed());
    state.on_left_release();
    assert!(!state.pressed());
}

#[test]
fn release_without_press_is_harmless() {
    let mut state = button();
    state.on_left_release();
    assert!(!state.pressed());
}

#[test]
fn frame_selection_by_vertex_range() {
    let mut state = button();
    assert_eq!(state.vertex_range(), 0..4);
    state.set_pressed();
    assert_eq!(state.vertex_range(), 4..8);
    state.on_left_release();
    assert_eq!(state.vertex_range(), 0..4);
}

#[test]
fn bounds_are_centered_on_position() {
    let state = button();
    let bounds = state.bounds();
    assert_eq!(bounds.x, 43.0);
    assert_eq!(bounds.y, 81.0);
    assert!(bounds.contains(Position { x: 100.0, y: 100.0 }));
    assert!(!bounds.contains(Position { x: 0.0, y: 0.0 }));
}
