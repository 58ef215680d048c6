//! Explicit timers for the engine.
//!
//! Nothing here reads the wall clock: the host passes `now` into every call,
//! which keeps firing order deterministic and lets tests jump through time.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timer {
    RevealGlyph,
    BlinkCaret,
    Navigate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub timer: Timer,
    pub due: Instant,
    pub period: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Firing {
    pub id: TaskId,
    pub timer: Timer,
    /// When the task was due, not when it was observed.
    pub due: Instant,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_once(&mut self, timer: Timer, from: Instant, delay: Duration) -> TaskId {
        self.insert(timer, from + delay, None)
    }

    pub fn schedule_every(&mut self, timer: Timer, from: Instant, period: Duration) -> TaskId {
        let period = period.max(Duration::from_millis(1));
        self.insert(timer, from + period, Some(period))
    }

    /// Returns `false` when the task already fired or was canceled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    #[cfg(test)]
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }

    #[cfg(test)]
    pub fn pending(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    #[cfg(test)]
    pub fn next_due(&self) -> Option<Instant> {
        self.tasks.iter().map(|task| task.due).min()
    }

    /// Removes and returns every firing due at or before `now`, oldest first.
    /// A periodic task fires once however many periods were missed and is
    /// re-armed on its next slot after `now`.
    pub fn take_due(&mut self, now: Instant) -> Vec<Firing> {
        let mut fired = Vec::new();
        let mut index = 0;
        while index < self.tasks.len() {
            if self.tasks[index].due > now {
                index += 1;
                continue;
            }
            match self.tasks[index].period {
                Some(period) => {
                    let task = &mut self.tasks[index];
                    fired.push(Firing {
                        id: task.id,
                        timer: task.timer.clone(),
                        due: task.due,
                    });
                    task.due = next_slot(task.due, period, now);
                    index += 1;
                }
                None => {
                    let task = self.tasks.remove(index);
                    fired.push(Firing {
                        id: task.id,
                        timer: task.timer,
                        due: task.due,
                    });
                }
            }
        }
        fired.sort_by_key(|firing| (firing.due, firing.id));
        fired
    }

    fn insert(&mut self, timer: Timer, due: Instant, period: Option<Duration>) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            timer,
            due,
            period,
        });
        id
    }
}

/// First `due + k * period` strictly after `now`.
fn next_slot(due: Instant, period: Duration, now: Instant) -> Instant {
    let behind = now.duration_since(due).as_nanos() % period.as_nanos();
    let into_period = Duration::from_nanos(u64::try_from(behind).unwrap_or(0));
    now + (period - into_period)
}
