//! Todo Item Component
//!
//! One row of the list: drag handle, complete toggle, text, delegate
//! badge, delete button. Stateless; reports intents by id upward.

use leptos::prelude::*;
use leptos_sortable::{make_on_mousedown, make_on_row_mouseenter, SortableState};

use crate::models::{Delegate, Todo};

/// A single todo row
#[component]
pub fn TodoItem(
    todo: Todo,
    index: usize,
    sortable: SortableState,
    on_toggle: Callback<String>,
    on_delegate_toggle: Callback<String>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let id = todo.id.clone();
    let completed = todo.completed;
    let delegate = todo.delegate;
    let text = todo.text.clone();

    let row_class = {
        let id = id.clone();
        move || {
            let mut c = String::from("todo-row");
            if completed {
                c.push_str(" completed");
            }
            // Dimmed/scaled while actively dragged
            if sortable.dragging.get().as_deref() == Some(id.as_str()) {
                c.push_str(" dragging");
            }
            c
        }
    };

    let delegate_class = match delegate {
        Delegate::T => "delegate-badge t",
        Delegate::K => "delegate-badge k",
    };

    let toggle_id = id.clone();
    let delegate_id = id.clone();
    let delete_id = id.clone();

    view! {
        <div
            class=row_class
            on:mousedown=make_on_mousedown(sortable, id)
            on:mouseenter=make_on_row_mouseenter(sortable, index)
        >
            <span class="drag-handle">"⠿"</span>

            <button
                class="toggle-btn"
                on:click=move |_| on_toggle.run(toggle_id.clone())
            >
                {if completed { "●" } else { "○" }}
            </button>

            <span class="todo-text">{text}</span>

            <button
                class=delegate_class
                on:click=move |_| on_delegate_toggle.run(delegate_id.clone())
            >
                {delegate.as_str()}
            </button>

            <button
                class="delete-btn"
                on:click=move |_| on_delete.run(delete_id.clone())
            >
                "×"
            </button>
        </div>
    }
}
