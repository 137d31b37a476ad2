// ============================================================================
// MAIN LAYOUT - Cabecera + menú lateral filtrado por rol + contenido
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::models::{RouteDescriptor, UserProfile};
use crate::router::ResolvedRoute;
use crate::state::AppState;
use crate::views::page::render_page;

/// Entradas del menú: rutas sin parámetros, no públicas y permitidas al rol.
/// Sin perfil cargado solo se muestran las que no exigen rol.
pub fn nav_items<'a>(routes: &'a [RouteDescriptor], user: Option<&UserProfile>) -> Vec<&'a RouteDescriptor> {
    routes
        .iter()
        .filter(|route| !route.meta.public && !route.path.contains(':'))
        .filter(|route| match &route.meta.required_role {
            None => true,
            Some(required) => user.is_some_and(|u| &u.role == required),
        })
        .collect()
}

pub fn render_layout(state: &AppState, route: &ResolvedRoute) -> Result<Element, JsValue> {
    let user = state.session.user();

    let menu = ElementBuilder::new("nav")?.class("sidebar").build();
    for item in nav_items(state.router.routes(), user.as_ref()) {
        let active = item.path == route.descriptor.path;
        let path = item.path;
        let nav_state = state.clone();
        let link = ElementBuilder::new("a")?
            .class(if active { "nav-link active" } else { "nav-link" })
            .attr("href", path)?
            .text(item.view.title())
            .on_click(move |e| {
                e.prevent_default();
                nav_state.navigate(path);
            })?
            .build();
        menu.append_child(&link)?;
    }

    let user_label = user
        .as_ref()
        .map(|u| format!("{} · {}", u.display_name(), u.role))
        .unwrap_or_default();

    let logout_state = state.clone();
    let header = ElementBuilder::new("header")?
        .class("topbar")
        .child(ElementBuilder::new("span")?.class("topbar-user").text(&user_label).build())?
        .child(
            ElementBuilder::new("button")?
                .class("btn btn-link")
                .text("Выйти")
                .on_click(move |_| logout_state.logout())?
                .build(),
        )?
        .build();

    let content = ElementBuilder::new("main")?
        .class("content")
        .child(render_page(route)?)?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("main-layout")
        .children([menu, header, content])?
        .build())
}
