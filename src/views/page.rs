// Contenido de cada vista de negocio (placeholder: título + parámetros)

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;
use crate::models::View;
use crate::router::ResolvedRoute;

pub fn page_heading(route: &ResolvedRoute) -> String {
    match (route.descriptor.view, route.params.get("id")) {
        (View::ObjectDetails, Some(id)) => format!("{} №{}", View::ObjectDetails.title(), id),
        (view, _) => view.title().to_string(),
    }
}

pub fn render_page(route: &ResolvedRoute) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?
        .class("page")
        .attr("data-route", route.descriptor.name.unwrap_or_default())?
        .child(ElementBuilder::new("h1")?.text(&page_heading(route)).build())?;

    let section = if route.descriptor.view == View::NotFound {
        section.child(
            ElementBuilder::new("p")?
                .class("muted")
                .text(&format!("Адрес {} не существует", route.path))
                .build(),
        )?
    } else {
        section
    };
    Ok(section.build())
}
