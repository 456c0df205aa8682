//! Delayed transitions.
//!
//! A passing evaluation does not change progression immediately: it schedules
//! a reveal (or the win) a short delay later. Entries carry enough state to be
//! re-validated when they come due, since the session may have been edited or
//! reset in between.

use crate::RuleId;
use chrono::NaiveDateTime;

/// Something that happened to the session when [`Session::poll`](crate::Session::poll) fired a
/// scheduled entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    RuleRevealed(RuleId),
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pending {
    /// Activate the next rule, provided `active_count` is still `expected_active`.
    Reveal { expected_active: usize },
    Win,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scheduled {
    pub pending: Pending,
    pub due: NaiveDateTime,
    /// Session generation at scheduling time; bumped by every reset.
    pub generation: u64,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct Schedule {
    entries: Vec<Scheduled>,
}

impl Schedule {
    /// Queue `pending` unless an identical entry for the same generation is
    /// already waiting. Returns whether it was queued.
    pub fn push(&mut self, pending: Pending, due: NaiveDateTime, generation: u64) -> bool {
        if self.entries.iter().any(|e| e.pending == pending && e.generation == generation) {
            return false;
        }
        self.entries.push(Scheduled { pending, due, generation });
        true
    }

    /// Remove and return every entry due at or before `now`, earliest first.
    pub fn take_due(&mut self, now: NaiveDateTime) -> Vec<Scheduled> {
        let (mut due, waiting): (Vec<_>, Vec<_>) = self.entries.drain(..).partition(|e| e.due <= now);
        self.entries = waiting;
        due.sort_by_key(|e| e.due);
        due
    }

    pub fn next_deadline(&self) -> Option<NaiveDateTime> {
        self.entries.iter().map(|e| e.due).min()
    }

    pub fn has_win(&self, generation: u64) -> bool {
        self.entries.iter().any(|e| e.pending == Pending::Win && e.generation == generation)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 2, 12).unwrap().and_hms_opt(4, 30, 0).unwrap()
    }

    #[test]
    fn duplicate_entries_are_ignored() {
        let mut schedule = Schedule::default();
        assert!(schedule.push(Pending::Reveal { expected_active: 1 }, t0(), 0));
        assert!(!schedule.push(Pending::Reveal { expected_active: 1 }, t0() + TimeDelta::seconds(1), 0));
        assert!(schedule.push(Pending::Reveal { expected_active: 2 }, t0(), 0));
        assert!(schedule.push(Pending::Reveal { expected_active: 1 }, t0(), 1));
        assert_eq!(schedule.len(), 3);
    }

    #[test]
    fn take_due_splits_on_deadline() {
        let mut schedule = Schedule::default();
        schedule.push(Pending::Win, t0() + TimeDelta::seconds(1), 0);
        schedule.push(Pending::Reveal { expected_active: 3 }, t0() + TimeDelta::milliseconds(500), 0);

        assert!(schedule.take_due(t0()).is_empty());
        assert_eq!(schedule.next_deadline(), Some(t0() + TimeDelta::milliseconds(500)));

        let due = schedule.take_due(t0() + TimeDelta::seconds(1));
        assert_eq!(due.iter().map(|e| e.pending).collect::<Vec<_>>(), vec![
            Pending::Reveal { expected_active: 3 },
            Pending::Win
        ]);
        assert_eq!(schedule.len(), 0);
    }
}
