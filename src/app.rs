//! Team Cat App
//!
//! Top-level component: auth gate, theme, and the todo list controller.
//! The in-memory list signal is the single source of UI truth.
//!
//! Consistency policy per operation: add, toggle, delegate-toggle and
//! delete confirm remotely before patching local state; reorder applies
//! locally first and then writes every position in one batched upsert.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_sortable::{bind_global_handlers, create_sortable_state, make_on_list_mouseleave};

use crate::components::{NewTodoForm, SignIn, ThemeToggle, TodoItem};
use crate::models::Todo;
use crate::store;
use crate::supabase::{Supabase, SupabaseError};
use crate::theme;

/// Log a remote failure and surface it in the error banner
fn report(set_last_error: WriteSignal<Option<String>>, action: &str, err: &SupabaseError) {
    let msg = format!("Error {action}: {err}");
    web_sys::console::error_1(&msg.clone().into());
    set_last_error.set(Some(msg));
}

#[component]
pub fn App() -> impl IntoView {
    let supabase = Supabase::from_env();
    supabase.restore_session();
    let session = supabase.session;

    // State
    let (todos, set_todos) = signal(Vec::<Todo>::new());
    let (new_text, set_new_text) = signal(String::new());
    let (is_dark, set_is_dark) = signal(theme::initial_dark());
    let (last_error, set_last_error) = signal(None::<String>);

    // Persist + apply every theme change
    Effect::new(move |_| theme::apply_dark(is_dark.get()));

    // Load the list on sign-in, clear it on sign-out
    {
        let supabase = supabase.clone();
        Effect::new(move |_| {
            if session.get().is_none() {
                set_todos.set(Vec::new());
                return;
            }
            let supabase = supabase.clone();
            spawn_local(async move {
                match supabase.fetch_todos().await {
                    Ok(loaded) => {
                        web_sys::console::log_1(
                            &format!("[APP] Loaded {} todos", loaded.len()).into(),
                        );
                        set_todos.set(loaded);
                    }
                    // Non-fatal: the list stays empty
                    Err(e) => report(set_last_error, "loading todos", &e),
                }
            });
        });
    }

    // ========================
    // Action Handlers
    // ========================

    let add_todo = {
        let supabase = supabase.clone();
        Callback::new(move |_: ()| {
            let Some(text) = store::prepared_text(&new_text.get_untracked()) else {
                return;
            };
            let position = todos.get_untracked().len() as i32;
            let supabase = supabase.clone();
            spawn_local(async move {
                match supabase.insert_todo(&text, position).await {
                    Ok(created) => {
                        set_todos.update(|list| store::push(list, created));
                        set_new_text.set(String::new());
                    }
                    Err(e) => report(set_last_error, "adding todo", &e),
                }
            });
        })
    };

    let toggle_todo = {
        let supabase = supabase.clone();
        Callback::new(move |id: String| {
            let current = todos.get_untracked();
            let Some(todo) = current.iter().find(|t| t.id == id) else {
                return;
            };
            let completed = !todo.completed;
            let supabase = supabase.clone();
            spawn_local(async move {
                match supabase.set_completed(&id, completed).await {
                    Ok(()) => set_todos.update(|list| {
                        store::set_completed(list, &id, completed);
                    }),
                    Err(e) => report(set_last_error, "toggling todo", &e),
                }
            });
        })
    };

    let toggle_delegate = {
        let supabase = supabase.clone();
        Callback::new(move |id: String| {
            let current = todos.get_untracked();
            let Some(todo) = current.iter().find(|t| t.id == id) else {
                return;
            };
            let delegate = todo.delegate.other();
            let supabase = supabase.clone();
            spawn_local(async move {
                match supabase.set_delegate(&id, delegate).await {
                    Ok(()) => set_todos.update(|list| {
                        store::set_delegate(list, &id, delegate);
                    }),
                    Err(e) => report(set_last_error, "toggling delegate", &e),
                }
            });
        })
    };

    let delete_todo = {
        let supabase = supabase.clone();
        Callback::new(move |id: String| {
            let supabase = supabase.clone();
            spawn_local(async move {
                match supabase.delete_todo(&id).await {
                    Ok(()) => set_todos.update(|list| {
                        store::remove(list, &id);
                    }),
                    Err(e) => report(set_last_error, "deleting todo", &e),
                }
            });
        })
    };

    // Reorder: optimistic local apply, then one batched position write
    let sortable = create_sortable_state();
    {
        let supabase = supabase.clone();
        bind_global_handlers(sortable, move |id: String, to: usize| {
            let current = todos.get_untracked();
            let Some(from) = store::index_of(&current, &id) else {
                return;
            };
            if from == to || to >= current.len() {
                return;
            }
            let mut next = current;
            store::move_todo(&mut next, from, to);
            store::reindex(&mut next);
            set_todos.set(next.clone());
            let supabase = supabase.clone();
            spawn_local(async move {
                if let Err(e) = supabase.write_positions(&next).await {
                    report(set_last_error, "saving order", &e);
                }
            });
        });
    }

    let sign_in = {
        let supabase = supabase.clone();
        Callback::new(move |(email, password): (String, String)| {
            let supabase = supabase.clone();
            spawn_local(async move {
                if let Err(e) = supabase.sign_in(&email, &password).await {
                    report(set_last_error, "signing in", &e);
                }
            });
        })
    };

    let sign_out = {
        let supabase = supabase.clone();
        Callback::new(move |_: ()| {
            let supabase = supabase.clone();
            spawn_local(async move {
                if let Err(e) = supabase.sign_out().await {
                    report(set_last_error, "signing out", &e);
                }
            });
        })
    };

    let toggle_theme = Callback::new(move |_: ()| set_is_dark.update(|d| *d = !*d));

    view! {
        <Show
            when=move || session.get().is_some()
            fallback=move || view! { <SignIn on_sign_in=sign_in /> }
        >
            <main class="app-shell">
                <header class="app-header">
                    <h1>"Team Cat"</h1>
                    <div class="header-actions">
                        <button class="sign-out-btn" on:click=move |_| sign_out.run(())>
                            "Sign Out"
                        </button>
                        <ThemeToggle is_dark=is_dark on_toggle=toggle_theme />
                    </div>
                </header>

                {move || last_error.get().map(|msg| view! {
                    <div class="error-banner">
                        <span>{msg}</span>
                        <button class="dismiss-btn" on:click=move |_| set_last_error.set(None)>
                            "×"
                        </button>
                    </div>
                })}

                <NewTodoForm text=new_text set_text=set_new_text on_submit=add_todo />

                <div class="todo-list" on:mouseleave=make_on_list_mouseleave(sortable)>
                    {move || todos.get().into_iter().enumerate().map(|(index, todo)| view! {
                        <TodoItem
                            todo=todo
                            index=index
                            sortable=sortable
                            on_toggle=toggle_todo
                            on_delegate_toggle=toggle_delegate
                            on_delete=delete_todo
                        />
                    }).collect_view()}
                </div>

                <Show when=move || todos.get().is_empty()>
                    <p class="empty-hint">"No todos yet. Add one above!"</p>
                </Show>
            </main>
        </Show>
    }
}
