//! Virtual-clock timers for report phases and battle steps.
//!
//! The session owns two slots, one for the current report phase and one for
//! the battle sequence. Scheduling into a slot replaces whatever was pending
//! there, so each slot has at most one outstanding timer. Nothing sleeps:
//! the caller advances virtual time and the due timers are handed back in
//! order.
use serde::{Deserialize, Serialize};

/// Identity of one scheduled timer. Replaced timers keep their id, which
/// then no longer matches the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer<T> {
    pub id: TimerId,
    pub due_ms: u64,
    pub payload: T,
}

/// A timer handed back by [`Scheduler::pop_due`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fired<B> {
    Report(TimerId),
    Battle(TimerId, B),
}

#[derive(Debug, Clone, Serialize)]
pub struct Scheduler<B> {
    now_ms: u64,
    next_id: u64,
    report: Option<Timer<()>>,
    battle: Option<Timer<B>>,
}

impl<B> Default for Scheduler<B> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            report: None,
            battle: None,
        }
    }
}

impl<B> Scheduler<B> {
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn issue(&mut self) -> TimerId {
        self.next_id += 1;
        TimerId(self.next_id)
    }

    pub fn schedule_report(&mut self, delay_ms: u64) -> TimerId {
        let id = self.issue();
        self.report = Some(Timer {
            id,
            due_ms: self.now_ms.saturating_add(delay_ms),
            payload: (),
        });
        id
    }

    pub fn schedule_battle(&mut self, delay_ms: u64, step: B) -> TimerId {
        let id = self.issue();
        self.battle = Some(Timer {
            id,
            due_ms: self.now_ms.saturating_add(delay_ms),
            payload: step,
        });
        id
    }

    pub fn cancel_report(&mut self) -> Option<TimerId> {
        self.report.take().map(|timer| timer.id)
    }

    pub fn cancel_battle(&mut self) -> Option<TimerId> {
        self.battle.take().map(|timer| timer.id)
    }

    /// Remove the pending battle step regardless of its due time.
    pub fn take_battle(&mut self) -> Option<B> {
        self.battle.take().map(|timer| timer.payload)
    }

    #[must_use]
    pub const fn report_timer(&self) -> Option<&Timer<()>> {
        self.report.as_ref()
    }

    #[must_use]
    pub const fn battle_timer(&self) -> Option<&Timer<B>> {
        self.battle.as_ref()
    }

    /// Whether `id` is still the pending timer of its slot.
    #[cfg(test)]
    pub(crate) fn is_pending(&self, id: TimerId) -> bool {
        self.report.as_ref().is_some_and(|t| t.id == id)
            || self.battle.as_ref().is_some_and(|t| t.id == id)
    }

    /// Earliest due time across both slots.
    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        match (&self.report, &self.battle) {
            (Some(r), Some(b)) => Some(r.due_ms.min(b.due_ms)),
            (Some(r), None) => Some(r.due_ms),
            (None, Some(b)) => Some(b.due_ms),
            (None, None) => None,
        }
    }

    /// Take the earliest timer due at or before `deadline_ms` (any timer when
    /// `None`) and move the clock to its due time. Ties go to the timer
    /// scheduled first.
    pub fn pop_due(&mut self, deadline_ms: Option<u64>) -> Option<Fired<B>> {
        let report_key = self.report.as_ref().map(|t| (t.due_ms, t.id));
        let battle_key = self.battle.as_ref().map(|t| (t.due_ms, t.id));
        let take_report = match (report_key, battle_key) {
            (Some(r), Some(b)) => r < b,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return None,
        };
        let due_ms = if take_report {
            report_key.map(|(due, _)| due)
        } else {
            battle_key.map(|(due, _)| due)
        }?;
        if deadline_ms.is_some_and(|deadline| due_ms > deadline) {
            return None;
        }
        self.now_ms = self.now_ms.max(due_ms);
        if take_report {
            self.report.take().map(|timer| Fired::Report(timer.id))
        } else {
            self.battle
                .take()
                .map(|timer| Fired::Battle(timer.id, timer.payload))
        }
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    pub fn clear(&mut self) {
        self.report = None;
        self.battle = None;
    }
}
