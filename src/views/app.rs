// ============================================================================
// APP VIEW - Selecciona login o layout según la ruta actual
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::models::View;
use crate::state::AppState;
use crate::views::{render_layout, render_login};

pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    match state.current_route() {
        // Primera navegación aún pendiente (p.ej. esperando /auth/me)
        None => Ok(ElementBuilder::new("div")?
            .class("app-loading")
            .text("Загрузка...")
            .build()),
        Some(route) if route.descriptor.view == View::Login => render_login(state),
        Some(route) => render_layout(state, &route),
    }
}
