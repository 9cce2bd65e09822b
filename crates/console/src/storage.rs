//! Session persisted by the sign-in screen.
//!
//! Sign-in itself lives outside the console; it leaves a JSON blob under
//! [`SESSION_KEY`] that is turned into an explicit [`AuthContext`] here.

use serde::{Deserialize, Serialize};

use riskdesk_auth::{AuthContext, Role};

pub const SESSION_KEY: &str = "riskdesk.session";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub username: String,
    pub role: Role,
    pub token: String,
}

/// Parse a stored session; anything unreadable yields an anonymous context.
pub fn session_from_storage(raw: Option<&str>) -> AuthContext {
    let Some(raw) = raw else {
        return AuthContext::anonymous();
    };
    match serde_json::from_str::<StoredSession>(raw) {
        Ok(session) => AuthContext::signed_in(session.username, session.role, session.token),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unreadable stored session");
            AuthContext::anonymous()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_session_becomes_signed_in_context() {
        let ctx = session_from_storage(Some(
            r#"{"username":"root","role":"ADMIN","token":"abc"}"#,
        ));
        assert!(ctx.is_admin());
        assert_eq!(ctx.bearer_token(), Some("abc"));
    }

    #[test]
    fn missing_or_garbled_session_is_anonymous() {
        assert_eq!(session_from_storage(None), AuthContext::anonymous());
        assert_eq!(session_from_storage(Some("{not json")), AuthContext::anonymous());
    }
}
