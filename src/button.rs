use std::ops::Range;

use crate::utils::{Position, Rectangle, Size};

/// Rotation applied to the hidden hit pass. The visible draw stays
/// axis-aligned.
pub const PICK_ROTATION_DEG: f32 = 30.0;

/// Input state for the button sprite: the last cursor position in physical
/// pixels (top-left origin), a one-shot click latch consumed by the next
/// paint, and the pressed flag driving frame selection.
#[derive(Debug)]
pub struct ButtonState {
    position: Position, // world units, quad center
    size: Size,
    cursor: Position,
    click: Option<Position>,
    pressed: bool,
}

impl ButtonState {
    pub fn new(position: Position, size: Size) -> Self {
        Self {
            position,
            size,
            cursor: Position::default(),
            click: None,
            pressed: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// World-space bounds of the untransformed quad.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(
            self.position.x - self.size.width / 2.0,
            self.position.y - self.size.height / 2.0,
            self.size.width,
            self.size.height,
        )
    }

    pub fn on_cursor_moved(&mut self, cursor: Position) {
        self.cursor = cursor;
    }

    /// Latches a click at the current cursor position.
    pub fn on_left_press(&mut self) {
        self.click = Some(self.cursor);
    }

    /// Release clears `pressed` unconditionally.
    pub fn on_left_release(&mut self) {
        self.pressed = false;
    }

    /// Consumes the pending click, yielding the cursor position recorded at
    /// press time. At most one click per press.
    pub fn take_clicked(&mut self) -> Option<Position> {
        self.click.take()
    }

    pub fn set_pressed(&mut self) {
        self.pressed = true;
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// Vertex range for the visible draw: the normal frame occupies
    /// vertices 0..4, the active frame 4..8.
    pub fn vertex_range(&self) -> Range<u32> {
        if self.pressed {
            4..8
        } else {
            0..4
        }
    }
}
