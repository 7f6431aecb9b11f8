//! Lifecycle events and host callbacks.

use crate::state::PointerState;

/// Edges of a joystick gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoystickEvent {
    /// Idle → active.
    Start,
    /// The handle was updated by a drag.
    Move,
    /// Active → idle.
    End,
}

impl JoystickEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            JoystickEvent::Start => "start",
            JoystickEvent::Move => "move",
            JoystickEvent::End => "end",
        }
    }
}

type Handler = Box<dyn FnMut(&PointerState)>;

/// Optional host callbacks, one per event.
///
/// Handlers see the state as it is right after the transition.
#[derive(Default)]
pub struct Callbacks {
    on_start: Option<Handler>,
    on_move: Option<Handler>,
    on_end: Option<Handler>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start(&mut self, f: impl FnMut(&PointerState) + 'static) {
        self.on_start = Some(Box::new(f));
    }

    pub fn on_move(&mut self, f: impl FnMut(&PointerState) + 'static) {
        self.on_move = Some(Box::new(f));
    }

    pub fn on_end(&mut self, f: impl FnMut(&PointerState) + 'static) {
        self.on_end = Some(Box::new(f));
    }

    pub fn dispatch(&mut self, event: JoystickEvent, state: &PointerState) {
        let handler = match event {
            JoystickEvent::Start => self.on_start.as_mut(),
            JoystickEvent::Move => self.on_move.as_mut(),
            JoystickEvent::End => self.on_end.as_mut(),
        };
        if let Some(handler) = handler {
            handler(state);
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_start", &self.on_start.is_some())
            .field("on_move", &self.on_move.is_some())
            .field("on_end", &self.on_end.is_some())
            .finish()
    }
}
