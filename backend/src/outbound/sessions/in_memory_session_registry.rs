//! Process-local session registry with absolute expiry.
//!
//! Entries live for a fixed duration from creation; resolving a session
//! never extends it. Expired entries are dropped when looked up and swept
//! whenever a new session is created, so the table stays bounded by the
//! number of logins within one lifetime window.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use rand::RngCore;
use rand::rngs::OsRng;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::SessionRegistry;
use crate::domain::{SessionSnapshot, SessionToken};

/// Lifetime of a session measured from login.
pub const DEFAULT_SESSION_TTL: Duration = Duration::hours(24);

const TOKEN_BYTES: usize = 32;

struct Entry {
    snapshot: SessionSnapshot,
    expires_at: DateTime<Utc>,
}

/// [`SessionRegistry`] backed by a `HashMap` behind an async `RwLock`.
pub struct InMemorySessionRegistry {
    entries: RwLock<HashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl InMemorySessionRegistry {
    /// Registry whose sessions expire `ttl` after creation.
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
            ttl,
        }
    }

    /// Number of entries currently held, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether no entries are held.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

fn generate_token() -> String {
    let mut bytes = [0_u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn create(&self, snapshot: SessionSnapshot) -> SessionToken {
        let now = self.clock.utc();
        let expires_at = now + self.ttl;
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        let swept = before - entries.len();
        if swept > 0 {
            debug!(swept, "expired sessions removed");
        }

        let mut token = generate_token();
        while entries.contains_key(&token) {
            token = generate_token();
        }
        entries.insert(
            token.clone(),
            Entry {
                snapshot,
                expires_at,
            },
        );
        SessionToken::new(token)
    }

    async fn resolve(&self, token: &SessionToken) -> Option<SessionSnapshot> {
        let now = self.clock.utc();
        {
            let entries = self.entries.read().await;
            match entries.get(token.as_str()) {
                None => return None,
                Some(entry) if entry.expires_at > now => return Some(entry.snapshot.clone()),
                Some(_) => {}
            }
        }
        let mut entries = self.entries.write().await;
        if entries
            .get(token.as_str())
            .is_some_and(|entry| entry.expires_at <= now)
        {
            entries.remove(token.as_str());
        }
        None
    }

    async fn revoke(&self, token: &SessionToken) {
        self.entries.write().await.remove(token.as_str());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{Local, TimeZone};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{Role, UserId, UserType};

    struct SteppingClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl SteppingClock {
        fn advance(&self, by: Duration) {
            let mut now = self.now.lock().expect("clock lock");
            *now += by;
        }
    }

    impl Clock for SteppingClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.now.lock().expect("clock lock")
        }
    }

    #[fixture]
    fn clock() -> Arc<SteppingClock> {
        Arc::new(SteppingClock {
            now: Mutex::new(
                Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0)
                    .single()
                    .expect("valid instant"),
            ),
        })
    }

    fn snapshot(username: &str) -> SessionSnapshot {
        SessionSnapshot {
            user_id: UserId::random(),
            username: username.to_owned(),
            role: Role::User,
            user_type: UserType::Staff,
            name: "Dr. John Smith".into(),
            student_id: None,
            department: "Computer Science".into(),
        }
    }

    fn registry(clock: &Arc<SteppingClock>) -> InMemorySessionRegistry {
        InMemorySessionRegistry::new(clock.clone(), DEFAULT_SESSION_TTL)
    }

    #[rstest]
    #[tokio::test]
    async fn created_sessions_resolve_to_their_snapshot(clock: Arc<SteppingClock>) {
        let registry = registry(&clock);
        let token = registry.create(snapshot("staff001")).await;

        assert_eq!(token.as_str().len(), TOKEN_BYTES * 2);
        let resolved = registry.resolve(&token).await.expect("live session");
        assert_eq!(resolved.username, "staff001");
    }

    #[rstest]
    #[tokio::test]
    async fn tokens_are_unique(clock: Arc<SteppingClock>) {
        let registry = registry(&clock);
        let first = registry.create(snapshot("a")).await;
        let second = registry.create(snapshot("a")).await;
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_tokens_do_not_resolve(clock: Arc<SteppingClock>) {
        let registry = registry(&clock);
        assert!(registry.resolve(&SessionToken::new("forged")).await.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn revoked_sessions_stop_resolving(clock: Arc<SteppingClock>) {
        let registry = registry(&clock);
        let token = registry.create(snapshot("a")).await;
        registry.revoke(&token).await;
        assert!(registry.resolve(&token).await.is_none());
        registry.revoke(&token).await;
    }

    #[rstest]
    #[tokio::test]
    async fn sessions_expire_without_sliding(clock: Arc<SteppingClock>) {
        let registry = registry(&clock);
        let token = registry.create(snapshot("a")).await;

        clock.advance(Duration::hours(23));
        assert!(registry.resolve(&token).await.is_some());
        clock.advance(Duration::hours(1));
        assert!(registry.resolve(&token).await.is_none());
        assert!(registry.is_empty().await);
    }

    #[rstest]
    #[tokio::test]
    async fn new_logins_sweep_expired_entries(clock: Arc<SteppingClock>) {
        let registry = registry(&clock);
        registry.create(snapshot("old")).await;
        registry.create(snapshot("older")).await;
        clock.advance(Duration::hours(25));

        let fresh = registry.create(snapshot("new")).await;

        assert_eq!(registry.len().await, 1);
        assert!(registry.resolve(&fresh).await.is_some());
    }
}
