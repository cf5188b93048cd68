//! Session management for authenticated callers.
//!
//! Provides session token issuance and lookup against a [`SessionStore`] with
//! a fixed TTL. A session carries the caller's role (`user_type`), which the
//! handlers check before mutations.

use crate::domain::SessionStore;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

// ---

/// Role required to create genres and manage movies.
pub const ROLE_ADMIN: &str = "ADMIN";

/// Role required to post reviews.
pub const ROLE_USER: &str = "USER";

/// Session token time-to-live in seconds (7 days).
const SESSION_TTL_SECONDS: i64 = 604_800;

// ---

/// Session data stored under `session:{token}`.
#[derive(Debug, Serialize, Deserialize)]
struct SessionData {
    //
    user_id: String,
    username: String,
    user_type: String,
    expires_at: i64,
}

/// Identity resolved from a valid bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub user_id: String,
    pub username: String,
    pub user_type: String,
}

/// Caller lacks the role an operation requires.
#[derive(Debug, thiserror::Error)]
#[error("Unauthorized to access this resource")]
pub struct RoleDenied;

impl SessionInfo {
    // ---
    /// Succeeds only if the caller holds exactly `role`.
    pub fn require_role(&self, role: &str) -> Result<(), RoleDenied> {
        // ---
        if self.user_type == role {
            Ok(())
        } else {
            tracing::debug!(
                user_id = %self.user_id,
                user_type = %self.user_type,
                required = role,
                "Role check failed"
            );
            Err(RoleDenied)
        }
    }
}

fn session_key(token: &str) -> String {
    // ---
    format!("session:{token}")
}

// ---

/// Creates a new session token and stores it.
///
/// # Returns
/// The opaque session token (UUID) to hand back to the caller.
pub async fn create_session(
    store: &dyn SessionStore,
    user_id: &str,
    username: &str,
    user_type: &str,
) -> Result<String> {
    //
    let token = Uuid::new_v4().to_string();
    let expires_at = chrono::Utc::now().timestamp() + SESSION_TTL_SECONDS;

    let session_data = SessionData {
        //
        user_id: user_id.to_string(),
        username: username.to_string(),
        user_type: user_type.to_string(),
        expires_at,
    };

    let session_json = serde_json::to_string(&session_data)?;

    store
        .put(
            &session_key(&token),
            session_json,
            Duration::from_secs(SESSION_TTL_SECONDS as u64),
        )
        .await?;

    tracing::info!("Created session for user: {}", username);

    Ok(token)
}

/// Resolves a session token.
///
/// Returns `Ok(None)` for unknown, expired or unreadable sessions; `Err` only
/// when the store itself fails.
pub async fn validate_session(store: &dyn SessionStore, token: &str) -> Result<Option<SessionInfo>> {
    //
    let Some(raw) = store.get(&session_key(token)).await? else {
        return Ok(None);
    };

    let data: SessionData = match serde_json::from_str(&raw) {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!("Discarding unreadable session record: {}", err);
            return Ok(None);
        }
    };

    if data.expires_at <= chrono::Utc::now().timestamp() {
        return Ok(None);
    }

    Ok(Some(SessionInfo {
        user_id: data.user_id,
        username: data.username,
        user_type: data.user_type,
    }))
}

/// Removes a session token.
pub async fn revoke_session(store: &dyn SessionStore, token: &str) -> Result<()> {
    //
    store.remove(&session_key(token)).await
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::infrastructure::create_memory_sessions;

    #[tokio::test]
    async fn session_round_trip_and_revoke() {
        // ---
        let store = create_memory_sessions();
        let token = create_session(&store, "u1", "thorin", ROLE_ADMIN).await.unwrap();

        let info = validate_session(&store, &token).await.unwrap().unwrap();
        assert_eq!(info.user_id, "u1");
        assert_eq!(info.username, "thorin");
        assert!(info.require_role(ROLE_ADMIN).is_ok());
        assert!(info.require_role(ROLE_USER).is_err());

        revoke_session(&store, &token).await.unwrap();
        assert!(validate_session(&store, &token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_and_corrupt_tokens_resolve_to_none() {
        // ---
        let store = create_memory_sessions();
        assert!(validate_session(&store, "nope").await.unwrap().is_none());

        store
            .put("session:bad", "{not json".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        assert!(validate_session(&store, "bad").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stale_expiry_stamp_is_rejected() {
        // ---
        let store = create_memory_sessions();
        let stale = serde_json::json!({
            "user_id": "u1",
            "username": "old",
            "user_type": "USER",
            "expires_at": chrono::Utc::now().timestamp() - 1,
        });
        store
            .put("session:stale", stale.to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        assert!(validate_session(&store, "stale").await.unwrap().is_none());
    }
}
