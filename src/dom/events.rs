// ============================================================================
// EVENT HANDLING
// ============================================================================
// Los closures de listeners viven en LISTENERS hasta el siguiente render.
// Quitar el elemento del DOM no libera el closure de Rust: hay que soltarlo
// con `release_listeners()` antes de vaciar el árbol.
// ============================================================================

use std::cell::RefCell;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent};

thread_local! {
    static LISTENERS: RefCell<Vec<Closure<dyn FnMut(Event)>>> = RefCell::new(Vec::new());
}

fn listen(element: &Element, event_type: &str, closure: Closure<dyn FnMut(Event)>) -> Result<(), JsValue> {
    element.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    LISTENERS.with(|listeners| listeners.borrow_mut().push(closure));
    Ok(())
}

pub fn on_click<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(move |e: Event| {
        handler(e.unchecked_into::<MouseEvent>())
    }) as Box<dyn FnMut(Event)>);
    listen(element, "click", closure)
}

/// Submit de formulario; el handler decide si llama a `prevent_default`
pub fn on_submit<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    listen(element, "submit", closure)
}

/// Suelta los listeners del render anterior.
/// El handler que disparó el re-render puede seguir en la pila, así que el
/// drop se hace en el siguiente tick.
pub fn release_listeners() {
    let previous = LISTENERS.with(|listeners| std::mem::take(&mut *listeners.borrow_mut()));
    if previous.is_empty() {
        return;
    }
    log::debug!("🧹 [DOM] Liberando {} listeners", previous.len());
    Timeout::new(0, move || drop(previous)).forget();
}
