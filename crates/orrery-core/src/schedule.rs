//! Deferred tasks driven by the frame clock
//!
//! Tasks are fire-and-forget: once scheduled they always run, so handlers
//! must tolerate firing after the state they were meant for has moved on.

use std::time::Duration;

use crate::navigation::Ticket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredTask {
    /// End the navigation guard interval for a transition
    SettleTransition(Ticket),
    /// Dismiss the host page's loading indicator
    HideLoading,
}

#[derive(Debug, Clone)]
struct Scheduled {
    due: f64,
    seq: u64,
    task: DeferredTask,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    clock: f64,
    seq: u64,
    pending: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds accumulated through `advance`
    pub fn now(&self) -> f64 {
        self.clock
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn schedule_after(&mut self, delay: Duration, task: DeferredTask) {
        self.seq += 1;
        self.pending.push(Scheduled {
            due: self.clock + delay.as_secs_f64(),
            seq: self.seq,
            task,
        });
    }

    /// Move the clock forward and return every task that came due, oldest first
    pub fn advance(&mut self, dt: f64) -> Vec<DeferredTask> {
        self.clock += dt.max(0.0);
        let clock = self.clock;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due <= clock);
        self.pending = waiting;

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|s| s.task).collect()
    }
}
