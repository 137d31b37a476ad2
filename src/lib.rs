// ============================================================================
// DISPATCH CONSOLE - FRONTEND (RUST PURO + WASM)
// ============================================================================
// - Router: tabla de rutas + guard por sesión/rol + History API
// - State: SessionStore (token + perfil) y AppState con Rc<RefCell>
// - Services: SOLO comunicación API
// - Views: funciones que construyen DOM
// ============================================================================

pub mod app;
pub mod config;
pub mod dom;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use crate::app::App;
use crate::config::CONFIG;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if CONFIG.is_logging_enabled() {
        wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    }
    log::info!("🚀 Dispatch console ({}) -> {}", CONFIG.environment, CONFIG.backend_url());

    let mut app = App::new()?;
    app.render()?;
    app.start()?;

    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });
    Ok(())
}

/// Re-render completo de la app
pub fn rerender_app() {
    APP.with(|cell| match cell.try_borrow_mut() {
        Ok(mut app) => {
            if let Some(app) = app.as_mut() {
                if let Err(e) = app.render() {
                    log::error!("❌ [RERENDER] {:?}", e);
                }
            }
        }
        // Render en curso (callback síncrono durante render): reintentar en el próximo tick
        Err(_) => {
            gloo_timers::callback::Timeout::new(0, rerender_app).forget();
        }
    });
}

/// Llamable desde JavaScript
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}

/// Navegación programática desde JavaScript
#[wasm_bindgen]
pub fn navigate(path: &str) {
    APP.with(|cell| {
        if let Some(app) = cell.borrow().as_ref() {
            app.state().navigate(path);
        } else {
            log::warn!("⚠️ [APP] navigate({}) antes de inicializar", path);
        }
    });
}
