// Pointer plumbing: from raw samples in window (client) space to surface calls.
// Mouse and touch samples normalize to the same surface-local point before the
// surface ever sees them.

use crate::controls::Brush;
use crate::surface::StrokeSurface;

/// Where the surface sits inside the window, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width && y < self.height
    }
}

/// One raw position reading.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerSample {
    Mouse { client_x: f32, client_y: f32 },
    /// Only the first touch is drawn with.
    Touch { touches: Vec<(f32, f32)> },
}

impl PointerSample {
    /// Client position minus the surface origin. `None` for a touch list with no touches.
    pub fn to_local(&self, rect: &SurfaceRect) -> Option<(f32, f32)> {
        let (cx, cy) = match self {
            PointerSample::Mouse { client_x, client_y } => (*client_x, *client_y),
            PointerSample::Touch { touches } => *touches.first()?,
        };
        Some((cx - rect.left, cy - rect.top))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Down(PointerSample),
    Move(PointerSample),
    Up,
    Leave,
}

/// Route one pointer event to the surface, stamping it with the current brush.
pub fn dispatch(surface: &mut StrokeSurface, rect: &SurfaceRect, brush: Brush, event: &PointerEvent) {
    match event {
        PointerEvent::Down(sample) => {
            if let Some((x, y)) = sample.to_local(rect) {
                surface.begin_stroke(brush.point_at(x, y));
            }
        }
        PointerEvent::Move(sample) => {
            // Cheap bail-out: hover moves never reach the log.
            if !surface.is_active() {
                return;
            }
            if let Some((x, y)) = sample.to_local(rect) {
                surface.continue_stroke(brush.point_at(x, y));
            }
        }
        PointerEvent::Up | PointerEvent::Leave => surface.end_stroke(),
    }
}

/// Turns polled mouse state (button held? where?) into discrete pointer events.
/// minifb only offers polling, so edges are detected here.
#[derive(Debug, Default)]
pub struct PointerTracker {
    held: bool,
    drawing: bool,
    last: Option<(f32, f32)>,
}

impl PointerTracker {
    /// `position` is in client space, `None` when the cursor is outside the window.
    pub fn poll(&mut self, rect: &SurfaceRect, button_down: bool, position: Option<(f32, f32)>) -> Option<PointerEvent> {
        let inside = position.filter(|&(x, y)| rect.contains(x - rect.left, y - rect.top));
        let pressed_now = button_down && !self.held;

        let event = match (self.drawing, button_down, inside) {
            // A press only counts on the frame the button goes down, over the surface.
            (false, true, Some((x, y))) if pressed_now => {
                self.drawing = true;
                Some(PointerEvent::Down(PointerSample::Mouse { client_x: x, client_y: y }))
            }
            (true, true, Some((x, y))) if self.last != Some((x, y)) => {
                Some(PointerEvent::Move(PointerSample::Mouse { client_x: x, client_y: y }))
            }
            (true, true, None) => {
                self.drawing = false;
                Some(PointerEvent::Leave)
            }
            (true, false, _) => {
                self.drawing = false;
                Some(PointerEvent::Up)
            }
            _ => None,
        };
        self.held = button_down;
        self.last = inside;
        event
    }
}
