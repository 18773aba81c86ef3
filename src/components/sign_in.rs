//! Sign In Component
//!
//! Minimal email/password affordance shown when no identity is known.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

fn input_value(ev: &web_sys::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_ref::<web_sys::HtmlInputElement>().map(|i| i.value()))
        .unwrap_or_default()
}

/// Sign-in card
#[component]
pub fn SignIn(on_sign_in: Callback<(String, String)>) -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        on_sign_in.run((email.get_untracked(), password.get_untracked()));
    };

    view! {
        <div class="sign-in-screen">
            <form class="sign-in-card" on:submit=submit>
                <h1>"Welcome to Team Cat"</h1>
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(input_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(input_value(&ev))
                />
                <button type="submit">"Sign In"</button>
            </form>
        </div>
    }
}
