//! List State Transitions
//!
//! Pure functions over the in-memory todo list. Every user action maps to
//! one transition here; the App component owns the signal and decides when
//! (before or after the remote call) a transition is applied.

use crate::models::{Delegate, Todo};

/// Trimmed input text, or None when the input is blank
pub fn prepared_text(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Index of the row with `id`, if present
pub fn index_of(todos: &[Todo], id: &str) -> Option<usize> {
    todos.iter().position(|t| t.id == id)
}

/// Append a freshly inserted row
pub fn push(todos: &mut Vec<Todo>, todo: Todo) {
    todos.push(todo);
}

/// Set the completed flag on the row with `id`.
/// Returns false (no-op) when the id is absent.
pub fn set_completed(todos: &mut [Todo], id: &str, completed: bool) -> bool {
    match todos.iter_mut().find(|t| t.id == id) {
        Some(todo) => {
            todo.completed = completed;
            true
        }
        None => false,
    }
}

/// Set the delegate tag on the row with `id`.
pub fn set_delegate(todos: &mut [Todo], id: &str, delegate: Delegate) -> bool {
    match todos.iter_mut().find(|t| t.id == id) {
        Some(todo) => {
            todo.delegate = delegate;
            true
        }
        None => false,
    }
}

/// Remove the row with `id`, preserving the relative order of the rest.
pub fn remove(todos: &mut Vec<Todo>, id: &str) -> bool {
    let before = todos.len();
    todos.retain(|t| t.id != id);
    todos.len() != before
}

/// Single-element move: remove the row at `from` and reinsert it at `to`.
/// Out-of-range indices are a no-op.
pub fn move_todo(todos: &mut Vec<Todo>, from: usize, to: usize) {
    if from >= todos.len() || to >= todos.len() {
        return;
    }
    let moved = todos.remove(from);
    todos.insert(to, moved);
}

/// Rewrite every position to its array index (dense 0..N-1)
pub fn reindex(todos: &mut [Todo]) {
    for (index, todo) in todos.iter_mut().enumerate() {
        todo.position = index as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: &str, text: &str, position: i32) -> Todo {
        Todo {
            id: id.to_string(),
            text: text.to_string(),
            completed: false,
            position,
            user_id: "u1".to_string(),
            delegate: Delegate::T,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn sample() -> Vec<Todo> {
        vec![
            todo("a", "A", 0),
            todo("b", "B", 1),
            todo("c", "C", 2),
            todo("d", "D", 3),
        ]
    }

    fn order(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn blank_input_is_rejected() {
        assert_eq!(prepared_text("  "), None);
        assert_eq!(prepared_text(""), None);
        assert_eq!(prepared_text("\t\n"), None);
    }

    #[test]
    fn input_is_trimmed() {
        assert_eq!(prepared_text("  Buy milk "), Some("Buy milk".to_string()));
    }

    #[test]
    fn new_row_appends_at_list_length() {
        let mut todos = vec![todo("a", "A", 0), todo("b", "B", 1), todo("c", "C", 2)];
        let position = todos.len() as i32;
        assert_eq!(position, 3);
        push(&mut todos, todo("d", "Buy milk", position));
        assert_eq!(order(&todos), vec!["a", "b", "c", "d"]);
        assert_eq!(todos[3].position, 3);
        assert_eq!(todos[3].delegate, Delegate::T);
    }

    #[test]
    fn toggle_flips_exactly_one_row() {
        let mut todos = sample();
        assert!(set_completed(&mut todos, "b", true));
        assert!(todos[1].completed);
        assert!(todos.iter().filter(|t| t.completed).count() == 1);
    }

    #[test]
    fn toggle_of_unknown_id_is_a_noop() {
        let mut todos = sample();
        let before = todos.clone();
        assert!(!set_completed(&mut todos, "zz", true));
        assert_eq!(todos, before);
    }

    #[test]
    fn delegate_never_leaves_the_two_tags() {
        let mut todos = sample();
        let next = todos[0].delegate.other();
        assert!(set_delegate(&mut todos, "a", next));
        assert_eq!(todos[0].delegate, Delegate::K);
        let next = todos[0].delegate.other();
        assert!(set_delegate(&mut todos, "a", next));
        assert_eq!(todos[0].delegate, Delegate::T);
    }

    #[test]
    fn remove_preserves_relative_order() {
        let mut todos = sample();
        assert!(remove(&mut todos, "b"));
        assert_eq!(order(&todos), vec!["a", "c", "d"]);
        assert!(!remove(&mut todos, "b"));
    }

    #[test]
    fn drag_a_after_c_yields_bcad_with_dense_positions() {
        let mut todos = sample();
        let from = index_of(&todos, "a").unwrap();
        let to = 2; // the slot C occupies
        move_todo(&mut todos, from, to);
        reindex(&mut todos);
        assert_eq!(order(&todos), vec!["b", "c", "a", "d"]);
        let positions: Vec<(&str, i32)> =
            todos.iter().map(|t| (t.id.as_str(), t.position)).collect();
        assert_eq!(positions, vec![("b", 0), ("c", 1), ("a", 2), ("d", 3)]);
    }

    #[test]
    fn move_to_earlier_slot() {
        let mut todos = sample();
        move_todo(&mut todos, 3, 0);
        reindex(&mut todos);
        assert_eq!(order(&todos), vec!["d", "a", "b", "c"]);
        assert_eq!(todos[0].position, 0);
    }

    #[test]
    fn out_of_range_move_is_a_noop() {
        let mut todos = sample();
        let before = todos.clone();
        move_todo(&mut todos, 9, 0);
        move_todo(&mut todos, 0, 9);
        assert_eq!(todos, before);
    }

    #[test]
    fn reindex_always_matches_indices() {
        let mut todos = sample();
        todos[0].position = 7;
        todos[2].position = -1;
        reindex(&mut todos);
        for (i, t) in todos.iter().enumerate() {
            assert_eq!(t.position, i as i32);
        }
    }
}
