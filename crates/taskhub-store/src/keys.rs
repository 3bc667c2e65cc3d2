//! Key builders for session store entries.

/// Key under which a session id maps to its subject id.
pub fn session(session_id: &str) -> String {
    format!("session:{session_id}")
}
