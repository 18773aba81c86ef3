//! Supabase Client
//!
//! Auth (password grant) and row CRUD against the remote `todos` table,
//! over the browser fetch API. The current session lives in a reactive
//! signal so effects re-run on sign-in/out, and is persisted to
//! localStorage so a reload stays signed in.

use leptos::prelude::*;
use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::models::{Delegate, NewTodo, Session, Todo};

/// localStorage key holding the serialized session
const SESSION_STORAGE_KEY: &str = "team-cat.session";

/// Remote-call failure
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("not signed in")]
    NoSession,
    #[error("browser error: {0}")]
    Browser(String),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("decode error: {0}")]
    Decode(String),
}

fn js_error(value: JsValue) -> SupabaseError {
    SupabaseError::Browser(format!("{value:?}"))
}

// ========================
// Endpoint Builders
// ========================

fn rows_url(base: &str) -> String {
    format!("{base}/rest/v1/todos")
}

fn list_url(base: &str) -> String {
    format!("{}?select=*&order=position.asc", rows_url(base))
}

fn insert_url(base: &str) -> String {
    format!("{}?select=*", rows_url(base))
}

fn row_url(base: &str, id: &str) -> String {
    format!("{}?id=eq.{id}", rows_url(base))
}

fn upsert_url(base: &str) -> String {
    format!("{}?on_conflict=id", rows_url(base))
}

fn token_url(base: &str) -> String {
    format!("{base}/auth/v1/token?grant_type=password")
}

fn logout_url(base: &str) -> String {
    format!("{base}/auth/v1/logout")
}

/// Full-row payload for the reorder upsert: one entry per item, each
/// carrying the position it holds in the new order.
fn upsert_body(todos: &[Todo]) -> Result<String, SupabaseError> {
    serde_json::to_string(todos).map_err(|e| SupabaseError::Decode(e.to_string()))
}

// ========================
// Client
// ========================

/// Handle on the remote store. Cheap to clone into spawned tasks.
#[derive(Clone)]
pub struct Supabase {
    url: String,
    anon_key: String,
    /// Current session; None means signed out. Reading it inside an
    /// effect subscribes that effect to auth changes.
    pub session: RwSignal<Option<Session>>,
}

impl Supabase {
    pub fn new(url: &str, anon_key: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            session: RwSignal::new(None),
        }
    }

    /// Project URL and anon key are baked in at build time
    pub fn from_env() -> Self {
        Self::new(
            option_env!("SUPABASE_URL").unwrap_or("http://127.0.0.1:54321"),
            option_env!("SUPABASE_ANON_KEY").unwrap_or("dev-anon-key"),
        )
    }

    // ========================
    // Auth
    // ========================

    /// Load a previously persisted session, if any
    pub fn restore_session(&self) {
        if let Some(session) = load_persisted_session() {
            self.session.set(Some(session));
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), SupabaseError> {
        let body = serde_json::json!({ "email": email, "password": password }).to_string();
        let resp = self
            .request("POST", &token_url(&self.url), None, Some(body))
            .await?;
        let session: Session = response_json(resp).await?;
        persist_session(Some(&session));
        self.session.set(Some(session));
        Ok(())
    }

    /// Revoke the session remotely and forget it locally. The local
    /// session is dropped even when the revoke call fails.
    pub async fn sign_out(&self) -> Result<(), SupabaseError> {
        let result = self
            .request("POST", &logout_url(&self.url), None, None)
            .await
            .map(|_| ());
        persist_session(None);
        self.session.set(None);
        result
    }

    fn user_id(&self) -> Result<String, SupabaseError> {
        self.session
            .get_untracked()
            .map(|s| s.user.id)
            .ok_or(SupabaseError::NoSession)
    }

    // ========================
    // Rows
    // ========================

    /// All rows visible to the session's owner, ordered by position
    pub async fn fetch_todos(&self) -> Result<Vec<Todo>, SupabaseError> {
        let resp = self.request("GET", &list_url(&self.url), None, None).await?;
        response_json(resp).await
    }

    /// Insert a row at `position` and return it as stored
    pub async fn insert_todo(&self, text: &str, position: i32) -> Result<Todo, SupabaseError> {
        let user_id = self.user_id()?;
        let row = NewTodo {
            text,
            position,
            user_id: &user_id,
            delegate: Delegate::default(),
        };
        let body = serde_json::to_string(&[row]).map_err(|e| SupabaseError::Decode(e.to_string()))?;
        let resp = self
            .request(
                "POST",
                &insert_url(&self.url),
                Some("return=representation"),
                Some(body),
            )
            .await?;
        let mut rows: Vec<Todo> = response_json(resp).await?;
        rows.pop()
            .ok_or_else(|| SupabaseError::Decode("insert returned no row".to_string()))
    }

    pub async fn set_completed(&self, id: &str, completed: bool) -> Result<(), SupabaseError> {
        self.patch_row(id, serde_json::json!({ "completed": completed }))
            .await
    }

    pub async fn set_delegate(&self, id: &str, delegate: Delegate) -> Result<(), SupabaseError> {
        self.patch_row(id, serde_json::json!({ "delegate": delegate.as_str() }))
            .await
    }

    pub async fn delete_todo(&self, id: &str) -> Result<(), SupabaseError> {
        self.request("DELETE", &row_url(&self.url, id), None, None)
            .await?;
        Ok(())
    }

    /// Persist a reorder: one upsert carrying every row's new position
    pub async fn write_positions(&self, todos: &[Todo]) -> Result<(), SupabaseError> {
        let body = upsert_body(todos)?;
        self.request(
            "POST",
            &upsert_url(&self.url),
            Some("resolution=merge-duplicates,return=minimal"),
            Some(body),
        )
        .await?;
        Ok(())
    }

    async fn patch_row(
        &self,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<(), SupabaseError> {
        self.request("PATCH", &row_url(&self.url, id), None, Some(patch.to_string()))
            .await?;
        Ok(())
    }

    // ========================
    // Transport
    // ========================

    async fn request(
        &self,
        method: &str,
        url: &str,
        prefer: Option<&str>,
        body: Option<String>,
    ) -> Result<web_sys::Response, SupabaseError> {
        let headers = web_sys::Headers::new().map_err(js_error)?;
        headers.set("apikey", &self.anon_key).map_err(js_error)?;
        let bearer = self
            .session
            .get_untracked()
            .map(|s| s.access_token)
            .unwrap_or_else(|| self.anon_key.clone());
        headers
            .set("Authorization", &format!("Bearer {bearer}"))
            .map_err(js_error)?;
        if let Some(prefer) = prefer {
            headers.set("Prefer", prefer).map_err(js_error)?;
        }

        let init = web_sys::RequestInit::new();
        init.set_method(method);
        if let Some(body) = body {
            headers
                .set("Content-Type", "application/json")
                .map_err(js_error)?;
            init.set_body(&JsValue::from_str(&body));
        }
        init.set_headers(&headers);

        let request = web_sys::Request::new_with_str_and_init(url, &init).map_err(js_error)?;
        let window = web_sys::window()
            .ok_or_else(|| SupabaseError::Browser("no window".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let resp: web_sys::Response = resp_value.dyn_into().map_err(js_error)?;

        if !resp.ok() {
            return Err(SupabaseError::Http {
                status: resp.status(),
                message: response_text(&resp).await,
            });
        }
        Ok(resp)
    }
}

async fn response_text(resp: &web_sys::Response) -> String {
    match resp.text() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

async fn response_json<T: DeserializeOwned>(
    resp: web_sys::Response,
) -> Result<T, SupabaseError> {
    let promise = resp.json().map_err(js_error)?;
    let value = JsFuture::from(promise).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(value).map_err(|e| SupabaseError::Decode(e.to_string()))
}

// ========================
// Session Persistence
// ========================

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn persist_session(session: Option<&Session>) {
    let Some(storage) = local_storage() else { return };
    match session {
        Some(session) => {
            if let Ok(json) = serde_json::to_string(session) {
                let _ = storage.set_item(SESSION_STORAGE_KEY, &json);
            }
        }
        None => {
            let _ = storage.remove_item(SESSION_STORAGE_KEY);
        }
    }
}

fn load_persisted_session() -> Option<Session> {
    let storage = local_storage()?;
    let json = storage.get_item(SESSION_STORAGE_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Delegate;

    const BASE: &str = "https://example.supabase.co";

    #[test]
    fn list_url_orders_by_position() {
        assert_eq!(
            list_url(BASE),
            "https://example.supabase.co/rest/v1/todos?select=*&order=position.asc"
        );
    }

    #[test]
    fn row_url_filters_by_id_equality() {
        assert_eq!(
            row_url(BASE, "7c9e"),
            "https://example.supabase.co/rest/v1/todos?id=eq.7c9e"
        );
    }

    #[test]
    fn upsert_url_merges_on_id() {
        assert_eq!(
            upsert_url(BASE),
            "https://example.supabase.co/rest/v1/todos?on_conflict=id"
        );
    }

    #[test]
    fn auth_urls() {
        assert_eq!(
            token_url(BASE),
            "https://example.supabase.co/auth/v1/token?grant_type=password"
        );
        assert_eq!(logout_url(BASE), "https://example.supabase.co/auth/v1/logout");
    }

    #[test]
    fn reorder_payload_carries_one_entry_per_row_with_its_new_index() {
        let mut todos: Vec<Todo> = ["b", "c", "a", "d"]
            .iter()
            .map(|id| Todo {
                id: id.to_string(),
                text: id.to_uppercase(),
                completed: false,
                position: -1,
                user_id: "u1".to_string(),
                delegate: Delegate::T,
                created_at: "2024-01-01T00:00:00Z".to_string(),
            })
            .collect();
        crate::store::reindex(&mut todos);

        let payload: serde_json::Value =
            serde_json::from_str(&upsert_body(&todos).unwrap()).unwrap();
        let rows = payload.as_array().unwrap();
        assert_eq!(rows.len(), 4);
        for (index, row) in rows.iter().enumerate() {
            assert_eq!(row["position"], index as i64);
        }
        assert_eq!(rows[2]["id"], "a");
    }
}
