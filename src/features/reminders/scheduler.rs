//! Periodic reminder scan and dispatch
//!
//! The scheduler alternates between idle (waiting for the next tick) and
//! scanning. A scan takes exclusive access to the store, collects every
//! reminder whose target date has arrived and is not yet delivered, hands each
//! one to the notifier, and marks it delivered regardless of the delivery
//! outcome. The delivered flag is the single source of truth preventing
//! duplicate sends across overlapping ticks and process restarts.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use log::{debug, error, info, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::core::config::StartupTick;
use crate::core::error::Result;
use crate::features::notifications::Notifier;
use crate::store::SharedStore;

/// Summary of one scheduler scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Reminders that were due and not yet delivered
    pub due: usize,
    /// Deliveries the notifier accepted
    pub delivered: usize,
    /// Deliveries the notifier rejected (still marked delivered)
    pub failed: usize,
}

/// Periodic scanner that dispatches due reminders
pub struct ReminderScheduler {
    store: SharedStore,
    notifier: Arc<dyn Notifier>,
    period: Duration,
    startup_tick: StartupTick,
}

impl ReminderScheduler {
    pub fn new(store: SharedStore, notifier: Arc<dyn Notifier>, period: Duration) -> Self {
        Self {
            store,
            notifier,
            period,
            startup_tick: StartupTick::AfterFirstPeriod,
        }
    }

    /// Override the first-tick policy (default: one full period after start)
    pub fn with_startup_tick(mut self, startup_tick: StartupTick) -> Self {
        self.startup_tick = startup_tick;
        self
    }

    /// Spawn the scan loop. The returned handle owns the task and can stop it
    /// deterministically.
    pub fn spawn(self) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(shutdown_rx));
        SchedulerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Reminder scheduler started (period {:?}, first tick {})",
            self.period,
            match self.startup_tick {
                StartupTick::Immediate => "immediate",
                StartupTick::AfterFirstPeriod => "after first period",
            }
        );

        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // tokio intervals complete their first tick immediately; consume it
        // when the deployment wants the first scan a full period out
        if self.startup_tick == StartupTick::AfterFirstPeriod {
            interval.tick().await;
        }

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match self.run_tick().await {
                        Ok(report) if report.due > 0 => {
                            info!(
                                "Reminder scan: {} due, {} delivered, {} failed",
                                report.due, report.delivered, report.failed
                            );
                        }
                        Ok(_) => debug!("Reminder scan: nothing due"),
                        Err(e) => error!("Reminder scan failed: {e}"),
                    }
                }
                changed = shutdown.changed() => {
                    // a dropped sender counts as a stop signal
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Reminder scheduler stopping");
                        break;
                    }
                }
            }
        }
    }

    /// Scan using the current local calendar date
    pub async fn run_tick(&self) -> Result<TickReport> {
        self.tick_with_date(Local::now().date_naive()).await
    }

    /// Scan as of a given date. The whole scan happens inside one exclusive
    /// section: deliveries are awaited under the lock so the delivered mark
    /// and the dispatch can never be observed out of step, and the snapshot
    /// is committed once before the lock is released.
    pub async fn tick_with_date(&self, today: NaiveDate) -> Result<TickReport> {
        let mut guard = self.store.exclusive().await;

        let due = guard.due_candidates(today);
        let mut report = TickReport {
            due: due.len(),
            ..TickReport::default()
        };

        if due.is_empty() {
            return Ok(report);
        }

        for idx in due {
            let (destination, message) = {
                let reminder = &guard.reminders[idx];
                (reminder.destination.clone(), reminder.message.clone())
            };

            match self.notifier.deliver(&destination, &message).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    // best effort: the reminder still counts as handled
                    warn!("Delivery to {destination} failed, dropping reminder: {e}");
                    report.failed += 1;
                }
            }
            guard.reminders[idx].delivered = true;
        }

        guard.commit()?;
        Ok(report)
    }
}

/// Owned handle to the running scan loop
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signal the loop to stop and wait for it to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            error!("Scheduler task did not shut down cleanly: {e}");
        }
    }

    /// Abort without waiting. Only used when the runtime is going away.
    pub fn abort(self) {
        self.task.abort();
    }
}
