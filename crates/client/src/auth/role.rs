use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use shared_types::SessionConfig;

use super::{jwt, SessionStore};

/// One evaluation of the role flag from whatever token is stored right now.
pub fn check_manager(session: &SessionStore) -> bool {
    let token = session.access_token();
    let is_manager = jwt::is_manager_token(token.as_deref());
    tracing::debug!(has_token = token.is_some(), is_manager, "role evaluated");
    is_manager
}

/// Recomputes the role flag on a fixed interval, since the token can be
/// replaced underneath the UI (refresh, callback, another window).
#[derive(Debug, Clone)]
pub struct RoleWatcher {
    session: SessionStore,
    interval: Duration,
}

impl RoleWatcher {
    pub fn new(session: SessionStore, interval: Duration) -> Self {
        Self { session, interval }
    }

    pub fn from_config(session: SessionStore, config: &SessionConfig) -> Self {
        Self::new(session, Duration::from_millis(config.poll_interval_ms.max(1)))
    }

    /// Evaluate immediately, then on every tick. `on_change` receives the
    /// first value unconditionally and afterwards only transitions.
    pub async fn run<F>(self, mut on_change: F)
    where
        F: FnMut(bool),
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last: Option<bool> = None;
        loop {
            ticker.tick().await;
            let current = check_manager(&self.session);
            if last != Some(current) {
                if last.is_some() {
                    tracing::info!(is_manager = current, "role changed");
                }
                last = Some(current);
                on_change(current);
            }
        }
    }

    /// Run on a tokio task. The receiver always holds the latest flag; the
    /// task stops when the handle is dropped.
    pub fn spawn(self) -> (watch::Receiver<bool>, RoleWatchHandle) {
        let (tx, rx) = watch::channel(check_manager(&self.session));
        let task = tokio::spawn(self.run(move |flag| {
            tx.send_if_modified(|current| {
                let changed = *current != flag;
                *current = flag;
                changed
            });
        }));
        (rx, RoleWatchHandle { task })
    }
}

/// Aborts the watcher task on drop.
#[derive(Debug)]
pub struct RoleWatchHandle {
    task: JoinHandle<()>,
}

impl Drop for RoleWatchHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
