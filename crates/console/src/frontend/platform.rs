//! Browser glue: `window.confirm` and the stored session.

use riskdesk_auth::AuthContext;

use crate::confirm::Confirm;
use crate::storage::{session_from_storage, SESSION_KEY};

/// Confirmation through the browser's modal dialog.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowConfirm;

impl Confirm for WindowConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

pub fn load_session() -> AuthContext {
    let raw = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(SESSION_KEY).ok().flatten());
    session_from_storage(raw.as_deref())
}
