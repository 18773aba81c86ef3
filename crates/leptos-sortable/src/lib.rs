//! Leptos Sortable
//!
//! Flat-list drag-and-drop reordering for Leptos using mouse events.
//! Uses a movement threshold to distinguish click from drag; reports a
//! single "item X dropped at index N" callback on mouseup.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Shared drag state for one sortable list
#[derive(Clone, Copy)]
pub struct SortableState {
    /// Id of the row currently being dragged
    pub dragging: RwSignal<Option<String>>,
    /// List index the pointer is currently over
    pub over_index: RwSignal<Option<usize>>,
    /// Row under a pressed button that has not crossed the threshold yet
    pending: RwSignal<Option<String>>,
    start_x: RwSignal<i32>,
    start_y: RwSignal<i32>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_sortable_state() -> SortableState {
    SortableState {
        dragging: RwSignal::new(None),
        over_index: RwSignal::new(None),
        pending: RwSignal::new(None),
        start_x: RwSignal::new(0),
        start_y: RwSignal::new(0),
    }
}

fn crossed_threshold(dx: i32, dy: i32) -> bool {
    dx.abs() > DRAG_THRESHOLD_PX || dy.abs() > DRAG_THRESHOLD_PX
}

/// Clear all drag state
pub fn end_drag(state: &SortableState) {
    state.dragging.set(None);
    state.over_index.set(None);
    state.pending.set(None);
}

/// Create mousedown handler for a draggable row.
/// Records a pending drag with its start position.
pub fn make_on_mousedown(
    state: SortableState,
    item_id: String,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Ignore presses on the row's controls
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() {
                return;
            }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() {
                return;
            }
        }
        state.pending.set(Some(item_id.clone()));
        state.start_x.set(ev.client_x());
        state.start_y.set(ev.client_y());
    }
}

/// Create mouseenter handler for the row at `index` (becomes the drop slot)
pub fn make_on_row_mouseenter(
    state: SortableState,
    index: usize,
) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if state.dragging.get_untracked().is_some() {
            state.over_index.set(Some(index));
        }
    }
}

/// Create mouseleave handler for the list container
pub fn make_on_list_mouseleave(
    state: SortableState,
) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if state.dragging.get_untracked().is_some() {
            state.over_index.set(None);
        }
    }
}

/// Global mousemove handler - promotes a pending press to a drag once the
/// pointer moves beyond the threshold.
fn bind_global_mousemove(state: SortableState) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = state.pending.get_untracked();
        if pending.is_some() && state.dragging.get_untracked().is_none() {
            let dx = ev.client_x() - state.start_x.get_untracked();
            let dy = ev.client_y() - state.start_y.get_untracked();
            if crossed_threshold(dx, dy) {
                state.dragging.set(pending);
            }
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback(
                "mousemove",
                on_mousemove.as_ref().unchecked_ref(),
            );
        }
    }
    on_mousemove.forget();
}

/// Bind global mouseup + mousemove handlers. `on_drop` fires once per drag
/// with the dragged row id and the index it was dropped on.
pub fn bind_global_handlers<F>(state: SortableState, on_drop: F)
where
    F: Fn(String, usize) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging = state.dragging.get_untracked();
        let over = state.over_index.get_untracked();

        end_drag(&state);

        // Only a real drag with a known slot produces a drop
        if let (Some(id), Some(index)) = (dragging, over) {
            on_drop(id, index);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback(
                "mouseup",
                on_mouseup.as_ref().unchecked_ref(),
            );
        }
    }
    on_mouseup.forget();

    bind_global_mousemove(state);
}

#[cfg(test)]
mod tests {
    use super::crossed_threshold;

    #[test]
    fn small_movement_is_a_click() {
        assert!(!crossed_threshold(0, 0));
        assert!(!crossed_threshold(5, -5));
    }

    #[test]
    fn movement_past_threshold_starts_a_drag() {
        assert!(crossed_threshold(6, 0));
        assert!(crossed_threshold(0, -6));
    }
}
