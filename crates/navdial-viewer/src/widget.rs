//! Pointer-event dispatch for the compass dial.
//!
//! Maps winit window events onto the representation's operations: hover
//! highlighting, ring drags, slider tube drags, and repeated stepping while
//! an arrow cap is held.

use glam::Vec2;
use navdial::{CompassRep, InteractionState, Viewport};
use winit::event::{ElementState, MouseButton, WindowEvent};

/// Tilt change per second while an arrow cap is held, degrees.
const TILT_STEP_PER_SEC: f64 = 45.0;

/// Distance change per second while an arrow cap is held.
const DISTANCE_STEP_PER_SEC: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Idle,
    Rotating,
    TiltSliding,
    TiltStepping { up: bool },
    DistanceSliding,
    DistanceStepping { out: bool },
}

pub struct CompassWidget {
    pub rep: CompassRep,
    gesture: Gesture,
    /// Pointer position in widget space (pixels, y-up).
    cursor: Vec2,
}

impl Default for CompassWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl CompassWidget {
    pub fn new() -> Self {
        Self {
            rep: CompassRep::new(),
            gesture: Gesture::Idle,
            cursor: Vec2::ZERO,
        }
    }

    /// Routes a window event into the dial. Returns true when the event was
    /// consumed and should not reach the rest of the app.
    pub fn handle_event(&mut self, event: &WindowEvent, viewport: Viewport) -> bool {
        self.rep.set_viewport(viewport);

        match event {
            WindowEvent::CursorMoved { position, .. } => {
                // winit is y-down, widget space is y-up.
                self.cursor = Vec2::new(
                    position.x as f32,
                    viewport.height as f32 - position.y as f32,
                );
                self.pointer_moved()
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } => self.pointer_pressed(),
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Released,
                ..
            } => self.pointer_released(),
            _ => false,
        }
    }

    fn pointer_moved(&mut self) -> bool {
        match self.gesture {
            Gesture::Idle => {
                let state = self
                    .rep
                    .compute_interaction_state(self.cursor.x, self.cursor.y);
                self.rep.highlight(state != InteractionState::Outside);
                false
            }
            Gesture::Rotating => {
                self.rep.pointer_interaction(self.cursor);
                true
            }
            Gesture::TiltSliding => {
                let value = self.rep.tilt_slider().pointer_value(self.cursor);
                self.rep.set_tilt(value);
                true
            }
            Gesture::DistanceSliding => {
                let value = self.rep.distance_slider().pointer_value(self.cursor);
                self.rep.set_distance(value);
                true
            }
            // Cap stepping latches until release; the pointer may wander.
            Gesture::TiltStepping { .. } | Gesture::DistanceStepping { .. } => true,
        }
    }

    fn pointer_pressed(&mut self) -> bool {
        let state = self.rep.start_interaction(self.cursor);
        self.gesture = match state {
            InteractionState::Adjusting => Gesture::Rotating,
            InteractionState::TiltAdjusting => Gesture::TiltSliding,
            InteractionState::TiltUp => Gesture::TiltStepping { up: true },
            InteractionState::TiltDown => Gesture::TiltStepping { up: false },
            InteractionState::DistanceAdjusting => Gesture::DistanceSliding,
            InteractionState::DistanceOut => Gesture::DistanceStepping { out: true },
            InteractionState::DistanceIn => Gesture::DistanceStepping { out: false },
            InteractionState::Inside | InteractionState::Outside => Gesture::Idle,
        };
        if self.gesture != Gesture::Idle {
            log::debug!("compass gesture start: {:?}", self.gesture);
            true
        } else {
            false
        }
    }

    fn pointer_released(&mut self) -> bool {
        let ended = std::mem::replace(&mut self.gesture, Gesture::Idle);
        match ended {
            Gesture::TiltSliding | Gesture::TiltStepping { .. } => self.rep.end_tilt(),
            Gesture::DistanceSliding | Gesture::DistanceStepping { .. } => {
                self.rep.end_distance()
            }
            Gesture::Rotating | Gesture::Idle => {}
        }
        ended != Gesture::Idle
    }

    /// Per-frame step for held arrow caps.
    pub fn update(&mut self, dt: f32) {
        let dt = f64::from(dt);
        match self.gesture {
            Gesture::TiltStepping { up } => {
                let step = TILT_STEP_PER_SEC * dt;
                self.rep.update_tilt(if up { step } else { -step });
            }
            Gesture::DistanceStepping { out } => {
                let step = DISTANCE_STEP_PER_SEC * dt;
                self.rep.update_distance(if out { step } else { -step });
            }
            _ => {}
        }
    }
}
