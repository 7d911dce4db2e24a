// Turns the window's polled mouse state into discrete pointer events.
// minifb only tells us "where is the mouse / is the button down" each frame,
// so edges (press, release, leave) are detected here by comparing frames.

use crate::scroll::PointerEvent;
use crate::types::Rect;

/// One frame's worth of raw mouse state, in window pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub pos: Option<(f32, f32)>,
    pub left_down: bool,
    /// Wheel notches this frame; minifb reports positive = up.
    pub wheel_y: f32,
}

pub struct PointerTracker {
    wheel_pixels_per_notch: f64,
    was_down: bool,
    was_inside: bool,
    pressed_inside: bool,
    last_y: Option<f64>,
}

impl PointerTracker {
    pub fn new(wheel_pixels_per_notch: f64) -> Self {
        Self {
            wheel_pixels_per_notch,
            was_down: false,
            was_inside: false,
            pressed_inside: false,
            last_y: None,
        }
    }

    /// Compare against the previous sample and emit what happened, in order.
    /// Coordinates in the events are relative to the container's top edge.
    pub fn update(&mut self, sample: PointerSample, container: Rect) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let inside = sample.pos.is_some_and(|(x, y)| container.contains(x, y));
        let local_y = sample.pos.map(|(_, y)| (y - container.y as f32) as f64);

        if self.was_inside && !inside {
            events.push(PointerEvent::Leave);
            self.pressed_inside = false;
        } else if sample.left_down && !self.was_down {
            // A press only counts when it starts on the surface.
            if let (true, Some(y)) = (inside, local_y) {
                events.push(PointerEvent::Down { y });
                self.pressed_inside = true;
                self.last_y = Some(y);
            }
        } else if sample.left_down && self.pressed_inside {
            if let Some(y) = local_y {
                if self.last_y != Some(y) {
                    events.push(PointerEvent::Move { y });
                    self.last_y = Some(y);
                }
            }
        } else if !sample.left_down && self.pressed_inside {
            events.push(PointerEvent::Up);
            self.pressed_inside = false;
        }

        if inside && sample.wheel_y != 0.0 {
            // Flip to the browser convention (positive = content scrolls down).
            let delta_y = -(sample.wheel_y as f64) * self.wheel_pixels_per_notch;
            events.push(PointerEvent::Wheel { delta_y });
        }

        self.was_down = sample.left_down;
        self.was_inside = inside;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect { x: 100, y: 50, width: 300, height: 600 };

    fn at(x: f32, y: f32, down: bool) -> PointerSample {
        PointerSample { pos: Some((x, y)), left_down: down, wheel_y: 0.0 }
    }

    #[test]
    fn press_drag_release_inside() {
        let mut t = PointerTracker::new(100.0);
        assert!(t.update(at(150.0, 150.0, false), SCREEN).is_empty());
        assert_eq!(t.update(at(150.0, 150.0, true), SCREEN), vec![PointerEvent::Down { y: 100.0 }]);
        assert!(t.update(at(150.0, 150.0, true), SCREEN).is_empty());
        assert_eq!(t.update(at(150.0, 180.0, true), SCREEN), vec![PointerEvent::Move { y: 130.0 }]);
        assert_eq!(t.update(at(150.0, 180.0, false), SCREEN), vec![PointerEvent::Up]);
    }

    #[test]
    fn press_outside_is_ignored() {
        let mut t = PointerTracker::new(100.0);
        assert!(t.update(at(10.0, 10.0, true), SCREEN).is_empty());
        // Dragging into the surface with the button held does not start a drag.
        assert!(t.update(at(150.0, 150.0, true), SCREEN).is_empty());
        assert!(t.update(at(150.0, 150.0, false), SCREEN).is_empty());
    }

    #[test]
    fn leaving_the_surface_emits_leave() {
        let mut t = PointerTracker::new(100.0);
        t.update(at(150.0, 150.0, false), SCREEN);
        t.update(at(150.0, 150.0, true), SCREEN);
        assert_eq!(t.update(at(5.0, 150.0, true), SCREEN), vec![PointerEvent::Leave]);
        // Releasing later outside produces nothing more.
        assert!(t.update(at(5.0, 150.0, false), SCREEN).is_empty());
    }

    #[test]
    fn wheel_notches_become_pixels_only_over_surface() {
        let mut t = PointerTracker::new(100.0);
        let mut s = at(150.0, 150.0, false);
        s.wheel_y = -1.0;
        assert_eq!(t.update(s, SCREEN), vec![PointerEvent::Wheel { delta_y: 100.0 }]);

        let mut outside = at(5.0, 5.0, false);
        outside.wheel_y = 2.0;
        assert_eq!(t.update(outside, SCREEN), vec![PointerEvent::Leave]);
    }
}
