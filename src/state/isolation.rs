//! Event isolation
//!
//! Telegram can deliver several webhook updates for the same chat almost
//! simultaneously. Each update is handled under a Redis lock keyed by
//! (bot_id, chat_id) so state transitions in one chat never interleave.
//! The lock auto-expires in case a handler dies while holding it.
//!
//! Every acquisition stores a unique token as the lock value and release
//! deletes the key only while it still holds that token, so a guard can
//! never free a lock a later acquisition owns.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use crate::config::RedisConfig;
use crate::utils::errors::Result;

const LOCK_TTL_MS: u64 = 30_000;
const RETRY_DELAY: Duration = Duration::from_millis(50);
const MAX_ATTEMPTS: u32 = 100;

/// Delete the key only if it still carries our token.
const RELEASE_SCRIPT: &str =
    "if redis.call('get', KEYS[1]) == ARGV[1] then return redis.call('del', KEYS[1]) else return 0 end";

static LOCK_SEQ: AtomicU64 = AtomicU64::new(0);

fn lock_token() -> String {
    let seq = LOCK_SEQ.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("{}-{}-{}", std::process::id(), nanos, seq)
}

#[derive(Clone)]
pub struct EventIsolation {
    connection_manager: redis::aio::ConnectionManager,
    prefix: String,
}

impl EventIsolation {
    pub async fn new(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            prefix: config.prefix.clone(),
        })
    }

    /// Acquire the per-chat lock, waiting for a concurrent holder to finish.
    pub async fn acquire(&self, bot_id: i64, chat_id: i64) -> Result<EventLock> {
        let key = format!("{}lock:{}:{}", self.prefix, bot_id, chat_id);
        let token = lock_token();
        let mut conn = self.connection_manager.clone();

        for attempt in 0..MAX_ATTEMPTS {
            let acquired: Option<String> = redis::cmd("SET")
                .arg(&key)
                .arg(&token)
                .arg("NX")
                .arg("PX")
                .arg(LOCK_TTL_MS)
                .query_async(&mut conn)
                .await?;

            if acquired.is_some() {
                if attempt > 0 {
                    debug!(bot_id = bot_id, chat_id = chat_id, attempt = attempt,
                           "Event lock acquired after waiting");
                }
                return Ok(EventLock {
                    connection_manager: self.connection_manager.clone(),
                    key,
                    token,
                });
            }

            tokio::time::sleep(RETRY_DELAY).await;
        }

        // A stale holder keeps its TTL; proceed rather than drop the update.
        // The guard's token was never stored, so its release is a no-op and
        // the current holder's lock stays intact.
        warn!(bot_id = bot_id, chat_id = chat_id, "Event lock wait exhausted, proceeding");
        Ok(EventLock {
            connection_manager: self.connection_manager.clone(),
            key,
            token,
        })
    }
}

impl std::fmt::Debug for EventIsolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventIsolation")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

/// Held lock; released on drop, but only while the key still carries this
/// guard's token.
pub struct EventLock {
    connection_manager: redis::aio::ConnectionManager,
    key: String,
    token: String,
}

impl Drop for EventLock {
    fn drop(&mut self) {
        let mut conn = self.connection_manager.clone();
        let key = self.key.clone();
        let token = self.token.clone();
        tokio::spawn(async move {
            let _: redis::RedisResult<i32> = redis::cmd("EVAL")
                .arg(RELEASE_SCRIPT)
                .arg(1)
                .arg(&key)
                .arg(&token)
                .query_async(&mut conn)
                .await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_tokens_never_repeat() {
        let first = lock_token();
        let second = lock_token();
        assert_ne!(first, second);
    }
}
