// ============================================================================
// LOGIN VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{input_value, on_submit, ElementBuilder};
use crate::state::AppState;

const USERNAME_INPUT_ID: &str = "login-username";
const PASSWORD_INPUT_ID: &str = "login-password";

pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    let pending = *state.login_pending.borrow();
    let username = state.login_username.borrow().clone();

    let form = ElementBuilder::new("form")?
        .class("login-form")
        .child(render_field(USERNAME_INPUT_ID, "Логин", "text", "username", &username)?)?
        .child(render_field(PASSWORD_INPUT_ID, "Пароль", "password", "current-password", "")?)?
        .build();

    if let Some(error) = state.login_error.borrow().as_deref() {
        let message = ElementBuilder::new("div")?
            .class("login-error")
            .attr("role", "alert")?
            .text(error)
            .build();
        form.append_child(&message)?;
    }

    let submit = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .text(if pending { "Вход..." } else { "Войти" });
    let submit = if pending { submit.attr("disabled", "")? } else { submit };
    form.append_child(&submit.build())?;

    {
        let state = state.clone();
        on_submit(&form, move |e| {
            e.prevent_default();
            if *state.login_pending.borrow() {
                return;
            }
            let username = input_value(USERNAME_INPUT_ID);
            let password = input_value(PASSWORD_INPUT_ID);
            *state.login_username.borrow_mut() = username.trim().to_string();
            if username.trim().is_empty() || password.is_empty() {
                *state.login_error.borrow_mut() = Some("Введите логин и пароль".to_string());
                crate::rerender_app();
                return;
            }
            state.login(username.trim().to_string(), password);
        })?;
    }

    let card = ElementBuilder::new("div")?
        .class("login-card")
        .child(ElementBuilder::new("h1")?.text("Логистика").build())?
        .child(form)?
        .build();

    Ok(ElementBuilder::new("div")?.class("login-screen").child(card)?.build())
}

fn render_field(
    id: &str,
    label: &str,
    input_type: &str,
    autocomplete: &str,
    value: &str,
) -> Result<Element, JsValue> {
    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label)
        .build();
    let input = ElementBuilder::new("input")?
        .id(id)?
        .attr("type", input_type)?
        .attr("autocomplete", autocomplete)?;
    let input = if value.is_empty() { input } else { input.attr("value", value)? };
    let input = input.build();
    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(label)?
        .child(input)?
        .build())
}
