//! Theme Preference
//!
//! Light/dark flag persisted in localStorage, defaulting to the system
//! color-scheme when no choice was stored. Applied as a `dark` class on
//! the document element.

/// localStorage key holding "light" or "dark"
const THEME_STORAGE_KEY: &str = "theme";

/// Resolve the effective theme: an explicit stored choice wins,
/// otherwise the system preference decides.
pub fn resolve(stored: Option<&str>, system_dark: bool) -> bool {
    match stored {
        Some("dark") => true,
        Some("light") => false,
        _ => system_dark,
    }
}

/// Initial flag for app startup
pub fn initial_dark() -> bool {
    resolve(stored_theme().as_deref(), system_prefers_dark())
}

/// Persist the resolved value and toggle the document class
pub fn apply_dark(dark: bool) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(THEME_STORAGE_KEY, if dark { "dark" } else { "light" });
    }
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let _ = root.class_list().toggle_with_force("dark", dark);
}

fn stored_theme() -> Option<String> {
    local_storage()?.get_item(THEME_STORAGE_KEY).ok()?
}

fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok())
        .flatten()
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(test)]
mod tests {
    use super::resolve;

    #[test]
    fn stored_choice_wins_over_system() {
        assert!(resolve(Some("dark"), false));
        assert!(!resolve(Some("light"), true));
    }

    #[test]
    fn no_stored_choice_falls_back_to_system() {
        assert!(resolve(None, true));
        assert!(!resolve(None, false));
    }

    #[test]
    fn unknown_stored_value_falls_back_to_system() {
        assert!(resolve(Some("sepia"), true));
        assert!(!resolve(Some(""), false));
    }
}
