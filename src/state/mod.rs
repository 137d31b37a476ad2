// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod session_state;
pub mod app_state;

pub use reactivity::Subscribers;
pub use session_state::{SessionSnapshot, SessionStore};
pub use app_state::AppState;
