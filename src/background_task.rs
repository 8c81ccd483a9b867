use std::sync::Arc;

use tokio::time::{interval, Duration};

use crate::infrastructure::auth::session::SessionStore;

/// Sweeps expired sessions so abandoned logins do not accumulate; expiry is
/// also enforced on every validate, this only reclaims memory.
pub async fn start_session_purge_task(sessions: Arc<SessionStore>) {
    let mut interval = interval(Duration::from_secs(60 * 15));

    loop {
        interval.tick().await;

        let purged = sessions.purge_expired();
        if purged > 0 {
            tracing::info!("Purged {} expired sessions", purged);
        }
    }
}
