//! New Todo Form Component
//!
//! Controlled input owned by the App so it only clears when the
//! insert actually succeeded.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Form for creating new todos
#[component]
pub fn NewTodoForm(
    text: ReadSignal<String>,
    set_text: WriteSignal<String>,
    on_submit: Callback<()>,
) -> impl IntoView {
    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        on_submit.run(());
    };

    view! {
        <form class="new-todo-form" on:submit=submit>
            <input
                type="text"
                placeholder="Add a new todo..."
                prop:value=move || text.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_text.set(input.value());
                }
            />
            <button type="submit">"Add"</button>
        </form>
    }
}
