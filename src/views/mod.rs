pub mod app;
pub mod layout;
pub mod login;
pub mod page;

pub use app::render_app;
pub use layout::{nav_items, render_layout};
pub use login::render_login;
pub use page::render_page;
