//! DOM event subscriptions.
//!
//! Each `Subscription` owns its closure and removes the listener when
//! dropped, so discarding a joystick leaves nothing attached to the page.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

pub struct Subscription {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Subscription {
    /// Attach `handler` for `event` on `target`.
    pub fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        log::trace!("listening for {event}");
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let removed = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
        if removed.is_err() {
            log::warn!("failed to detach {} listener", self.event);
        }
    }
}
