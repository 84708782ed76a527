/// Blocking wait for a database to answer its liveness check.
///
/// Meant for startup ordering, e.g. an application container that comes up
/// before its database does.

use crate::config::WaitConfig;
use crate::core::db::Ping;
use crate::core::{Escalation, Result, SqlPrintError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Delay between two liveness checks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);
/// Total time budget, measured from the first check.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Polls a [`Ping`] until it succeeds or the timeout runs out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waiter {
    pub interval: Duration,
    pub timeout: Duration,
    pub escalation: Escalation,
}

impl Default for Waiter {
    fn default() -> Self {
        Waiter {
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            escalation: Escalation::default(),
        }
    }
}

impl Waiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &WaitConfig, escalation: Escalation) -> Self {
        Waiter {
            interval: config.interval(),
            timeout: config.timeout(),
            escalation,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_escalation(mut self, escalation: Escalation) -> Self {
        self.escalation = escalation;
        self
    }

    /// Blocks until `db.ping()` succeeds.
    ///
    /// The deadline is wall-clock from the first check, so slow checks count
    /// against it. Once a failed check finds the deadline passed, the failure
    /// is escalated; only under [`Escalation::ReturnError`] does this return
    /// an error.
    pub fn wait<P: Ping + ?Sized>(&self, db: &P) -> Result<()> {
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            match db.ping() {
                Ok(()) => {
                    if attempts > 1 {
                        info!(attempts, "database reachable after {:?}", started.elapsed());
                    }
                    return Ok(());
                }
                Err(err) => {
                    let waited = started.elapsed();
                    if waited > self.timeout {
                        return Err(self.escalation.escalate(SqlPrintError::Unavailable {
                            waited,
                            last: err.to_string(),
                        }));
                    }
                    debug!(attempt = attempts, "database not reachable yet: {}", err);
                    thread::sleep(self.interval);
                }
            }
        }
    }
}

/// Waits with the default one second interval and thirty second timeout.
pub fn wait_for_db<P: Ping + ?Sized>(db: &P) -> Result<()> {
    Waiter::default().wait(db)
}
