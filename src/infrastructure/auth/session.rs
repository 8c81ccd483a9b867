use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::{distributions::Alphanumeric, Rng};

pub const SESSION_COOKIE: &str = "photowall_session";

const TOKEN_LENGTH: usize = 48;

#[derive(Debug, Clone)]
struct SessionRecord {
    admin_id: i64,
    created_at: DateTime<Utc>,
    last_seen: DateTime<Utc>,
}

/// Server-side session records keyed by the opaque cookie token. A record
/// expires when it has been idle longer than `idle` or has existed longer
/// than `absolute`, whichever comes first.
pub struct SessionStore {
    sessions: DashMap<String, SessionRecord>,
    idle: Duration,
    absolute: Duration,
}

impl SessionStore {
    pub fn new(idle: Duration, absolute: Duration) -> Self {
        SessionStore {
            sessions: DashMap::new(),
            idle,
            absolute,
        }
    }

    /// Issues a fresh token bound to the admin identity.
    pub fn create(&self, admin_id: i64) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();

        let now = Utc::now();
        self.sessions.insert(
            token.clone(),
            SessionRecord {
                admin_id,
                created_at: now,
                last_seen: now,
            },
        );
        token
    }

    /// Resolves a token to its admin id, sliding the idle window forward.
    /// Expired records are removed on sight.
    pub fn validate(&self, token: &str) -> Option<i64> {
        let now = Utc::now();

        let expired = match self.sessions.get_mut(token) {
            Some(mut record) => {
                if self.is_expired(&record, now) {
                    true
                } else {
                    record.last_seen = now;
                    return Some(record.admin_id);
                }
            }
            None => return None,
        };

        if expired {
            self.sessions.remove(token);
        }
        None
    }

    /// Unconditional removal; logging out an unknown token is a no-op.
    pub fn destroy(&self, token: &str) {
        self.sessions.remove(token);
    }

    /// Sweeps expired records; returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, record| !self.is_expired(record, now));
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn is_expired(&self, record: &SessionRecord, now: DateTime<Utc>) -> bool {
        now - record.last_seen > self.idle || now - record.created_at > self.absolute
    }
}
