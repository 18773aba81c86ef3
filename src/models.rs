//! Frontend Models
//!
//! Data structures matching the remote `todos` table and the auth session.

use serde::{Deserialize, Deserializer, Serialize};

/// Which of the two parties owns a todo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delegate {
    #[default]
    T,
    K,
}

impl Delegate {
    /// The other of the two tags
    pub fn other(self) -> Self {
        match self {
            Delegate::T => Delegate::K,
            Delegate::K => Delegate::T,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Delegate::T => "T",
            Delegate::K => "K",
        }
    }
}

/// Rows created before the delegate column existed hold NULL
fn delegate_or_default<'de, D>(deserializer: D) -> Result<Delegate, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Delegate>::deserialize(deserializer)?.unwrap_or_default())
}

/// Todo row (matches the remote table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// Ordering key within the owner's list, intended dense 0..N-1
    pub position: i32,
    pub user_id: String,
    #[serde(default, deserialize_with = "delegate_or_default")]
    pub delegate: Delegate,
    pub created_at: String,
}

/// Fields sent when inserting a new row; id and created_at are
/// assigned by the store.
#[derive(Debug, Clone, Serialize)]
pub struct NewTodo<'a> {
    pub text: &'a str,
    pub position: i32,
    pub user_id: &'a str,
    pub delegate: Delegate,
}

/// Authenticated user as returned by the auth endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
}

/// Opaque proof of authenticated identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delegate_round_trips_as_single_letters() {
        assert_eq!(serde_json::to_string(&Delegate::T).unwrap(), "\"T\"");
        assert_eq!(serde_json::to_string(&Delegate::K).unwrap(), "\"K\"");
        let t: Delegate = serde_json::from_str("\"T\"").unwrap();
        assert_eq!(t, Delegate::T);
    }

    #[test]
    fn delegate_cycles_between_exactly_two_tags() {
        assert_eq!(Delegate::T.other(), Delegate::K);
        assert_eq!(Delegate::K.other(), Delegate::T);
        assert_eq!(Delegate::T.other().other(), Delegate::T);
    }

    #[test]
    fn null_delegate_defaults_to_t() {
        let row: Todo = serde_json::from_str(
            r#"{
                "id": "a1",
                "text": "Buy milk",
                "completed": false,
                "position": 0,
                "user_id": "u1",
                "delegate": null,
                "created_at": "2024-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(row.delegate, Delegate::T);
    }

    #[test]
    fn missing_delegate_defaults_to_t() {
        let row: Todo = serde_json::from_str(
            r#"{
                "id": "a1",
                "text": "Buy milk",
                "completed": false,
                "position": 0,
                "user_id": "u1",
                "created_at": "2024-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(row.delegate, Delegate::T);
    }
}
