//! Theme Toggle Component

use leptos::prelude::*;

/// Sun/moon button switching between light and dark
#[component]
pub fn ThemeToggle(is_dark: ReadSignal<bool>, on_toggle: Callback<()>) -> impl IntoView {
    view! {
        <button
            class="theme-toggle"
            aria-label=move || {
                if is_dark.get() { "Switch to light theme" } else { "Switch to dark theme" }
            }
            on:click=move |_| on_toggle.run(())
        >
            {move || if is_dark.get() { "☀" } else { "🌙" }}
        </button>
    }
}
