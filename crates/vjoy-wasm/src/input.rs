//! Mouse and touch adapters.
//!
//! Translate DOM events into `PointerSample`s in viewport (client)
//! coordinates. Everything else happens in the shared state machine.

use vjoy_core::{InputModality, Phase, PointerSample};
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, TouchEvent};

/// DOM event names and the phase each one maps to.
pub fn event_names(modality: InputModality) -> &'static [(&'static str, Phase)] {
    match modality {
        InputModality::Touch => &[
            ("touchstart", Phase::Begin),
            ("touchmove", Phase::Move),
            ("touchend", Phase::End),
            ("touchcancel", Phase::End),
        ],
        InputModality::Mouse | InputModality::Auto => &[
            ("mousedown", Phase::Begin),
            ("mousemove", Phase::Move),
            ("mouseup", Phase::End),
        ],
    }
}

/// Adapter for the given modality.
pub fn sample(modality: InputModality, event: &Event, phase: Phase) -> Option<PointerSample> {
    match modality {
        InputModality::Touch => touch_sample(event, phase),
        InputModality::Mouse | InputModality::Auto => mouse_sample(event, phase),
    }
}

pub fn mouse_sample(event: &Event, phase: Phase) -> Option<PointerSample> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(at(phase, mouse.client_x() as f32, mouse.client_y() as f32))
}

/// Uses the first active touch. Touch-end has no active touch left, so
/// the release carries no position.
pub fn touch_sample(event: &Event, phase: Phase) -> Option<PointerSample> {
    let touch_event = event.dyn_ref::<TouchEvent>()?;
    if phase == Phase::End {
        return Some(PointerSample::end());
    }
    let touch = touch_event.touches().get(0)?;
    Some(at(phase, touch.client_x() as f32, touch.client_y() as f32))
}

fn at(phase: Phase, x: f32, y: f32) -> PointerSample {
    match phase {
        Phase::Begin => PointerSample::begin(x, y),
        Phase::Move => PointerSample::moved(x, y),
        Phase::End => PointerSample::end(),
    }
}
